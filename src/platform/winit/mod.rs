//=========================================================================
// Winit Backend
//
// Native windows on every winit desktop platform (X11, Wayland, Cocoa,
// Windows) and Android, polled without blocking.
//
// Architecture:
// ```text
//  WinitEventQueue::update()
//    └─ pump_app_events(Some(ZERO), QueueHandler)
//          ├─ resumed / about_to_wait: create pending windows
//          ├─ window_event  ─┐
//          └─ device_event  ─┴─> dispatch
//                                  ├─ WinitTranslator → EventBuffer
//                                  └─ window callback
// ```
//
// Key Design Decisions:
// - **Deferred creation**: winit only creates windows from inside the
//   event loop, so `create` queues the request and pumps until the
//   handler has built it
// - **Queue-owned registry**: the queue core maps winit window ids to
//   the shared state of each window; windows keep a weak handle back to
//   unregister themselves on close
// - **Close honored by default**: a close request emits `Close` and then
//   destroys the native window, like `DefWindowProcW` does on Win32
// - **Raw motion**: device events are enabled on the first window event
//   the queue sees and attributed to that window
//
//=========================================================================

//=== Submodules ==========================================================

mod translate;

pub use translate::{mouse_input_from, WinitTranslator};

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};
use std::time::Duration;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, DeviceEvents, EventLoop},
    monitor::{MonitorHandle, VideoModeHandle},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Fullscreen, Window as NativeWindow, WindowAttributes, WindowId as NativeWindowId},
};

//=== Internal Imports ====================================================

use crate::event::{Event, EventBuffer, EventData};
use crate::platform::{EventPump, PlatformError, PlatformWindow, Rect};
use crate::window::{
    forwarding_callback, CallbackSlot, Registry, WindowDesc, WindowError, WindowId, WindowState,
};

/// Pumps allowed for the handler to build a requested window.
const CREATE_PUMP_LIMIT: usize = 16;

//=== Shared Window State =================================================

/// State of one window reachable from the event loop handler.
struct WinitWindowShared {
    id: WindowId,
    desc: WindowDesc,
    callback: Rc<CallbackSlot>,
    native: RefCell<Option<Rc<NativeWindow>>>,
}

impl WinitWindowShared {
    fn client_rect(&self) -> Rect {
        self.native
            .borrow()
            .as_ref()
            .map(|window| {
                let size = window.inner_size();
                Rect::from_size(size.width as i32, size.height as i32)
            })
            .unwrap_or_default()
    }

    fn native_id(&self) -> Option<NativeWindowId> {
        self.native.borrow().as_ref().map(|window| window.id())
    }
}

//=== WinitQueueCore ======================================================

/// Everything the queue and its windows share.
///
/// Borrowed only for short, non-reentrant sections; callbacks always run
/// after the borrow is released.
#[derive(Default)]
struct WinitQueueCore {
    events: EventBuffer,
    translator: WinitTranslator,
    windows: Registry<NativeWindowId, Rc<WinitWindowShared>>,
    names: HashSet<String>,
    pending: Vec<Rc<WinitWindowShared>>,
    raw_target: Option<Weak<WinitWindowShared>>,
}

impl WinitQueueCore {
    /// Claims `name` for a new window. False if a live window holds it.
    fn reserve_name(&mut self, name: &str) -> bool {
        self.names.insert(name.to_owned())
    }

    fn release(&mut self, shared: &WinitWindowShared) {
        if let Some(native_id) = shared.native_id() {
            self.windows.unregister(native_id);
        }
        self.names.remove(&shared.desc.name);
        self.pending.retain(|pending| pending.id != shared.id);
    }
}

/// Queues `Close` for `shared` and runs its callback, as a native
/// destroy would.
fn emit_close(core: &RefCell<WinitQueueCore>, shared: &WinitWindowShared) {
    let event = Event::new(shared.id, EventData::Close);
    core.borrow_mut().events.push(event);
    shared.callback.invoke(&event);
}

impl std::fmt::Debug for WinitQueueCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinitQueueCore")
            .field("events", &self.events.len())
            .field("windows", &self.windows.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}

//=== QueueHandler ========================================================

/// The `ApplicationHandler` driven by `pump_app_events`.
struct QueueHandler {
    core: Rc<RefCell<WinitQueueCore>>,
}

impl QueueHandler {
    //--- Window Creation --------------------------------------------------

    /// Builds every window requested since the last pump.
    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        let pending = std::mem::take(&mut self.core.borrow_mut().pending);

        for shared in pending {
            let window = match event_loop.create_window(window_attributes(event_loop, &shared.desc)) {
                Ok(window) => Rc::new(window),
                Err(e) => {
                    error!(target: "platform::winit", "Could not create window '{}': {}", shared.desc.name, e);
                    std::process::exit(1);
                }
            };

            if shared.desc.visible {
                window.focus_window();
            }

            let native_id = window.id();
            *shared.native.borrow_mut() = Some(Rc::clone(&window));
            self.core.borrow_mut().windows.register(native_id, Rc::clone(&shared));

            info!(
                target: "platform::winit",
                "Window {} '{}' created: {}x{} @ {}x DPI",
                shared.id.get(),
                shared.desc.title,
                window.inner_size().width,
                window.inner_size().height,
                window.scale_factor()
            );

            self.dispatch(event_loop, &shared, |_, _| EventData::Create);
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Translates one event for `shared`, queues it and runs the callback.
    fn dispatch<F>(&mut self, event_loop: &ActiveEventLoop, shared: &Rc<WinitWindowShared>, translate: F)
    where
        F: FnOnce(&mut WinitTranslator, Rect) -> EventData,
    {
        let client = shared.client_rect();

        let event = {
            let mut core = self.core.borrow_mut();

            if core.raw_target.is_none() {
                event_loop.listen_device_events(DeviceEvents::Always);
                core.raw_target = Some(Rc::downgrade(shared));
                debug!(
                    target: "platform::winit",
                    "Raw mouse motion enabled for window {}",
                    shared.id.get()
                );
            }

            let event = Event::new(shared.id, translate(&mut core.translator, client));
            core.events.push(event);
            event
        };

        if !event.is_none() {
            trace!(target: "platform::winit", "{:?} for window {}", event.event_type(), shared.id.get());
        }
        shared.callback.invoke(&event);
    }

    /// Destroys the native window after a close request.
    fn destroy(&mut self, shared: &Rc<WinitWindowShared>) {
        self.core.borrow_mut().release(shared);
        shared.native.borrow_mut().take();
        info!(target: "platform::winit", "Window {} closed by request", shared.id.get());
    }
}

impl ApplicationHandler for QueueHandler {
    /// Startup (or mobile resume): first chance to build windows.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: NativeWindowId, event: WindowEvent) {
        let Some(shared) = self.core.borrow().windows.lookup(window_id) else {
            trace!(target: "platform::winit", "Event for unknown window {:?} ignored", window_id);
            return;
        };

        self.dispatch(event_loop, &shared, |translator, client| {
            translator.translate_window_event(&event, client)
        });

        if matches!(event, WindowEvent::CloseRequested) && shared.native.borrow().is_some() {
            self.destroy(&shared);
        }
    }

    fn device_event(&mut self, event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        let target = self.core.borrow().raw_target.as_ref().and_then(Weak::upgrade);
        let Some(shared) = target else {
            return;
        };
        if shared.native.borrow().is_none() {
            return;
        }

        self.dispatch(event_loop, &shared, |translator, _| {
            translator.translate_device_event(&event)
        });
    }

    /// Called once per pump; windows requested after startup are built here.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }
}

//--- Attribute Helpers ---------------------------------------------------

fn window_attributes(event_loop: &ActiveEventLoop, desc: &WindowDesc) -> WindowAttributes {
    let size = PhysicalSize::new(desc.width, desc.height);
    let mut attrs = NativeWindow::default_attributes()
        .with_title(desc.title.as_str())
        .with_inner_size(size)
        .with_visible(desc.visible)
        .with_decorations(!desc.is_borderless());

    let monitor = event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next());

    let fullscreen = if desc.fullscreen {
        let mode = monitor.as_ref().and_then(|monitor| exclusive_mode(monitor, size));
        if mode.is_none() {
            warn!(
                target: "platform::winit",
                "No {}x{} display mode available, falling back to windowed",
                desc.width,
                desc.height
            );
        }
        mode
    } else {
        None
    };

    match (fullscreen, monitor) {
        (Some(mode), _) => {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Exclusive(mode)));
        }
        (None, Some(monitor)) => {
            attrs = attrs.with_position(centered(&monitor, size));
        }
        (None, None) => {}
    }

    attrs
}

/// Best video mode of `monitor` with exactly `size`.
fn exclusive_mode(monitor: &MonitorHandle, size: PhysicalSize<u32>) -> Option<VideoModeHandle> {
    monitor
        .video_modes()
        .filter(|mode| mode.size() == size)
        .max_by_key(|mode| (mode.bit_depth(), mode.refresh_rate_millihertz()))
}

fn centered(monitor: &MonitorHandle, size: PhysicalSize<u32>) -> PhysicalPosition<i32> {
    let origin = monitor.position();
    let screen = monitor.size();
    let x = (screen.width as i32 - size.width as i32) / 2;
    let y = (screen.height as i32 - size.height as i32) / 2;
    PhysicalPosition::new(origin.x + x.max(0), origin.y + y.max(0))
}

//=== WinitEventQueue =====================================================

/// Event queue fed by a winit event loop.
///
/// Only one event loop may exist per process, and on some platforms it
/// must be created on the main thread.
pub struct WinitEventQueue {
    event_loop: EventLoop<()>,
    handler: QueueHandler,
}

impl WinitEventQueue {
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created.
    pub fn new() -> Result<Self, PlatformError> {
        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        debug!(target: "platform::winit", "Event loop created");

        Ok(Self {
            event_loop,
            handler: QueueHandler {
                core: Rc::new(RefCell::new(WinitQueueCore::default())),
            },
        })
    }

    fn pump(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);

        if let PumpStatus::Exit(code) = status {
            warn!(target: "platform::winit", "Event loop exited with code {}", code);
        }
    }
}

impl EventPump for WinitEventQueue {
    fn update(&mut self) {
        self.pump();
    }

    fn front(&self) -> Option<Event> {
        self.handler.core.borrow().events.front().copied()
    }

    fn pop(&mut self) -> Option<Event> {
        self.handler.core.borrow_mut().events.pop()
    }

    fn is_empty(&self) -> bool {
        self.handler.core.borrow().events.is_empty()
    }

    fn len(&self) -> usize {
        self.handler.core.borrow().events.len()
    }
}

//=== WinitWindow =========================================================

/// A native window created through winit.
pub struct WinitWindow {
    id: WindowId,
    state: WindowState,
    callback: Rc<CallbackSlot>,
    shared: Option<Rc<WinitWindowShared>>,
    core: Weak<RefCell<WinitQueueCore>>,
}

impl WinitWindow {
    pub fn new() -> Self {
        Self {
            id: WindowId::next(),
            state: WindowState::Uninitialized,
            callback: Rc::new(CallbackSlot::default()),
            shared: None,
            core: Weak::new(),
        }
    }

    /// The winit window, while it is open.
    pub fn native(&self) -> Option<Rc<NativeWindow>> {
        self.shared.as_ref()?.native.borrow().clone()
    }

    pub fn desc(&self) -> Option<&WindowDesc> {
        self.shared.as_ref().map(|shared| &shared.desc)
    }
}

impl Default for WinitWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformWindow for WinitWindow {
    type Queue = WinitEventQueue;

    fn create(&mut self, desc: &WindowDesc, queue: &mut WinitEventQueue) -> Result<(), WindowError> {
        if self.state != WindowState::Uninitialized {
            return Err(WindowError::AlreadyCreated);
        }
        desc.validate()?;

        let shared = Rc::new(WinitWindowShared {
            id: self.id,
            desc: desc.clone(),
            callback: Rc::clone(&self.callback),
            native: RefCell::new(None),
        });

        {
            let mut core = queue.handler.core.borrow_mut();
            if !core.reserve_name(&desc.name) {
                let err = WindowError::ClassRegistration {
                    name: desc.name.clone(),
                    code: 0,
                };
                warn!(target: "platform::winit", "{}", err);
                return Err(err);
            }
            core.pending.push(Rc::clone(&shared));
        }

        for _ in 0..CREATE_PUMP_LIMIT {
            queue.pump();
            if shared.native.borrow().is_some() {
                break;
            }
        }

        if shared.native.borrow().is_none() {
            error!(
                target: "platform::winit",
                "Window '{}' was not created after {} event loop pumps",
                desc.name,
                CREATE_PUMP_LIMIT
            );
            std::process::exit(1);
        }

        self.core = Rc::downgrade(&queue.handler.core);
        self.shared = Some(shared);
        self.state = WindowState::Created;
        Ok(())
    }

    fn close(&mut self) {
        if self.state != WindowState::Created {
            return;
        }

        if let Some(shared) = self.shared.take() {
            if let Some(core) = self.core.upgrade() {
                if shared.native.borrow().is_some() {
                    emit_close(&core, &shared);
                }
                core.borrow_mut().release(&shared);
            }
            shared.native.borrow_mut().take();
        }

        self.state = WindowState::Closed;
        info!(target: "platform::winit", "Window {} closed", self.id.get());
    }

    fn id(&self) -> WindowId {
        self.id
    }

    fn state(&self) -> WindowState {
        match (&self.state, &self.shared) {
            (WindowState::Created, Some(shared)) if shared.native.borrow().is_none() => {
                WindowState::Closed
            }
            (state, _) => *state,
        }
    }

    fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.callback.set(Box::new(callback));
    }

    fn clear_callback(&mut self) {
        self.callback.clear();
    }

    fn forward_to(&mut self, sender: Sender<Event>) {
        if self.callback.is_set() {
            debug!(target: "platform::winit", "Window {} callback replaced by channel forwarding", self.id.get());
        }
        self.callback.set(forwarding_callback(sender));
    }
}

impl Drop for WinitWindow {
    fn drop(&mut self) {
        self.close();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
