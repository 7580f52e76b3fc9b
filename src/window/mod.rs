//=========================================================================
// Window Types
//
// Backend-independent pieces of a native window: the creation
// descriptor, the identity carried by events, the lifecycle state, the
// synchronous event callback and the creation errors.
//
// Lifecycle:
// ```text
//  Uninitialized ──create(Ok)──> Created ──close()──> Closed
//        │                                              (terminal)
//        └──create(Err)──> Uninitialized
// ```
//
// The backend `Window` types (`platform::win32::Win32Window`,
// `platform::winit::WinitWindow`) build on these.
//
//=========================================================================

//=== Submodules ==========================================================

mod registry;

pub(crate) use registry::Registry;

//=== Standard Library Imports ============================================

use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicU64, Ordering};

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::warn;

//=== Internal Imports ====================================================

use crate::event::Event;

//=== WindowId ============================================================

/// Process-unique window identity.
///
/// Events refer back to their window through this id instead of holding
/// a reference, so they stay valid after the window is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

//=== WindowState =========================================================

/// Where a window is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Constructed, no native handle yet.
    Uninitialized,

    /// Native handle is open.
    Created,

    /// Native handle was destroyed. Terminal.
    Closed,
}

//=== WindowDesc ==========================================================

/// Description of the window to create.
///
/// `name` keys the native window class and must be unique among live
/// windows. `x`/`y` are only used as the origin for the frame
/// adjustment; windowed windows are centered on the primary screen.
///
/// # Default Values
///
/// - **name** / **title**: `"crosswin"`
/// - **size**: 1280 × 720
/// - **position**: 0, 0
/// - **fullscreen**: false
/// - **visible**: true
/// - **borderless resize / drag**: false
///
/// # Examples
///
/// ```
/// use crosswin::window::WindowDesc;
///
/// let desc = WindowDesc::new("main")
///     .with_title("Viewer")
///     .with_size(800, 600)
///     .with_visible(false);
///
/// assert_eq!(desc.name, "main");
/// assert_eq!((desc.width, desc.height), (800, 600));
/// assert!(!desc.visible);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDesc {
    pub name: String,
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub visible: bool,

    /// Report the frame edges as resize handles when hit-testing a
    /// borderless window.
    pub borderless_resize: bool,

    /// Report the client area as a caption so the window can be dragged
    /// from anywhere.
    pub borderless_drag: bool,
}

impl WindowDesc {
    /// Creates a descriptor with default settings and the given class name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the inner (client area) size in physical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_borderless_resize(mut self, enabled: bool) -> Self {
        self.borderless_resize = enabled;
        self
    }

    pub fn with_borderless_drag(mut self, enabled: bool) -> Self {
        self.borderless_drag = enabled;
        self
    }

    /// True when the window draws its own frame and relies on custom
    /// hit-testing.
    pub fn is_borderless(&self) -> bool {
        self.borderless_resize || self.borderless_drag
    }

    /// Checks that `name` can key a native window class.
    pub(crate) fn validate(&self) -> Result<(), WindowError> {
        if self.name.is_empty() || self.name.contains('\0') {
            return Err(WindowError::InvalidName(self.name.clone()));
        }
        Ok(())
    }
}

impl Default for WindowDesc {
    fn default() -> Self {
        Self {
            name: "crosswin".to_owned(),
            title: "crosswin".to_owned(),
            x: 0,
            y: 0,
            width: 1280,
            height: 720,
            fullscreen: false,
            visible: true,
            borderless_resize: false,
            borderless_drag: false,
        }
    }
}

//=== WindowError =========================================================

/// Recoverable window creation failures.
///
/// Failing to allocate the native handle itself is not represented here:
/// that path logs and terminates the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The window class could not be registered, either because a class
    /// with this name already exists or the OS refused it.
    ClassRegistration { name: String, code: i32 },

    /// `create` was called on a window that is not `Uninitialized`.
    AlreadyCreated,

    /// The display mode switch failed and the user declined the windowed
    /// fallback.
    FullscreenDeclined,

    /// The descriptor name is empty or contains a NUL character.
    InvalidName(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClassRegistration { name, code } => {
                write!(f, "Window class '{}' registration failed (os error {})", name, code)
            }
            Self::AlreadyCreated => write!(f, "Window was already created"),
            Self::FullscreenDeclined => {
                write!(f, "Fullscreen mode unsupported and windowed fallback declined")
            }
            Self::InvalidName(name) => write!(f, "Invalid window class name {:?}", name),
        }
    }
}

impl std::error::Error for WindowError {}

//=== Event Callback ======================================================

/// Synchronous hook invoked with every translated event, including
/// `None` translations, before the consumer drains the queue.
pub type EventCallback = Box<dyn FnMut(&Event)>;

/// Holds a window's callback.
///
/// The callback is moved out of the slot while it runs, so it may replace
/// or clear itself (or close its window) without a re-borrow panic. A
/// replacement made during the call wins over the running callback.
#[derive(Default)]
pub(crate) struct CallbackSlot {
    callback: RefCell<Option<EventCallback>>,
    generation: Cell<u64>,
}

impl CallbackSlot {
    pub(crate) fn set(&self, callback: EventCallback) {
        self.generation.set(self.generation.get().wrapping_add(1));
        *self.callback.borrow_mut() = Some(callback);
    }

    pub(crate) fn clear(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        self.callback.borrow_mut().take();
    }

    pub(crate) fn is_set(&self) -> bool {
        self.callback.borrow().is_some()
    }

    /// Runs the callback, if any, with `event`.
    pub(crate) fn invoke(&self, event: &Event) {
        let generation = self.generation.get();
        let taken = self.callback.borrow_mut().take();

        if let Some(mut callback) = taken {
            callback(event);

            if self.generation.get() == generation {
                *self.callback.borrow_mut() = Some(callback);
            }
        }
    }
}

/// Builds a callback that forwards every non-`None` event into `sender`.
///
/// A disconnected receiver is reported once and the events are dropped;
/// the window keeps running.
pub(crate) fn forwarding_callback(sender: Sender<Event>) -> EventCallback {
    let mut disconnected = false;

    Box::new(move |event: &Event| {
        if event.is_none() || disconnected {
            return;
        }
        if sender.send(*event).is_err() {
            disconnected = true;
            warn!(
                target: "platform",
                "Event receiver for window {} disconnected, dropping forwarded events",
                event.window.get()
            );
        }
    })
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventData, EventType};
    use crossbeam_channel::unbounded;
    use std::rc::Rc;

    //=====================================================================
    // WindowId / WindowDesc
    //=====================================================================

    #[test]
    fn window_ids_are_unique() {
        let a = WindowId::next();
        let b = WindowId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn desc_defaults() {
        let desc = WindowDesc::default();
        assert_eq!((desc.width, desc.height), (1280, 720));
        assert!(desc.visible);
        assert!(!desc.fullscreen);
        assert!(!desc.is_borderless());
    }

    #[test]
    fn desc_builder_sets_fields() {
        let desc = WindowDesc::new("tool")
            .with_title("Tool")
            .with_position(10, 20)
            .with_size(320, 240)
            .with_fullscreen(true)
            .with_borderless_drag(true);

        assert_eq!(desc.name, "tool");
        assert_eq!(desc.title, "Tool");
        assert_eq!((desc.x, desc.y), (10, 20));
        assert_eq!((desc.width, desc.height), (320, 240));
        assert!(desc.fullscreen);
        assert!(desc.is_borderless());
        assert!(!desc.borderless_resize);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn desc_rejects_zero_size() {
        let _ = WindowDesc::new("zero").with_size(0, 10);
    }

    #[test]
    fn desc_validation_rejects_bad_names() {
        assert!(WindowDesc::new("ok").validate().is_ok());
        assert_eq!(
            WindowDesc::new("").validate(),
            Err(WindowError::InvalidName(String::new()))
        );
        assert!(WindowDesc::new("a\0b").validate().is_err());
    }

    //=====================================================================
    // WindowError
    //=====================================================================

    #[test]
    fn window_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<WindowError>();
    }

    #[test]
    fn window_error_display_names_class() {
        let err = WindowError::ClassRegistration {
            name: "main".to_owned(),
            code: 1410,
        };
        let text = err.to_string();
        assert!(text.contains("main"));
        assert!(text.contains("1410"));
    }

    //=====================================================================
    // CallbackSlot
    //=====================================================================

    #[test]
    fn callback_receives_every_event() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let slot = CallbackSlot::default();
        let sink = Rc::clone(&seen);
        slot.set(Box::new(move |event| sink.borrow_mut().push(event.event_type())));

        let id = WindowId::next();
        slot.invoke(&Event::none(id));
        slot.invoke(&Event::new(id, EventData::Paint));

        assert_eq!(*seen.borrow(), vec![EventType::None, EventType::Paint]);
        assert!(slot.is_set());
    }

    #[test]
    fn invoke_without_callback_is_noop() {
        let slot = CallbackSlot::default();
        slot.invoke(&Event::none(WindowId::next()));
        assert!(!slot.is_set());
    }

    #[test]
    fn callback_can_clear_itself() {
        let slot = Rc::new(CallbackSlot::default());
        let inner = Rc::clone(&slot);
        slot.set(Box::new(move |_| inner.clear()));

        slot.invoke(&Event::none(WindowId::next()));

        assert!(!slot.is_set(), "Cleared callback must not be restored");
    }

    #[test]
    fn callback_replacement_during_call_wins() {
        let calls = Rc::new(Cell::new(0));
        let slot = Rc::new(CallbackSlot::default());

        let inner = Rc::clone(&slot);
        let counter = Rc::clone(&calls);
        slot.set(Box::new(move |_| {
            let counter = Rc::clone(&counter);
            inner.set(Box::new(move |_| counter.set(counter.get() + 10)));
        }));

        let event = Event::none(WindowId::next());
        slot.invoke(&event);
        slot.invoke(&event);

        assert_eq!(calls.get(), 10);
    }

    //=====================================================================
    // Forwarding
    //=====================================================================

    #[test]
    fn forwarding_skips_none_events() {
        let (tx, rx) = unbounded();
        let mut callback = forwarding_callback(tx);
        let id = WindowId::next();

        callback(&Event::none(id));
        callback(&Event::new(id, EventData::Close));

        assert_eq!(rx.try_recv().map(|e| e.event_type()), Ok(EventType::Close));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn forwarding_survives_disconnect() {
        let (tx, rx) = unbounded();
        let mut callback = forwarding_callback(tx);
        drop(rx);

        let event = Event::new(WindowId::next(), EventData::Paint);
        callback(&event);
        callback(&event);
    }
}
