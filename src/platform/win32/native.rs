//=========================================================================
// Win32 Native Backend
//
// Owns real HWNDs and pumps the thread's message queue.
//
// Architecture:
// ```text
//  Win32EventQueue::update()
//    └─ PeekMessageW / TranslateMessage / DispatchMessageW
//          ↓
//  window_proc (extern "system" trampoline)
//    ├─ WM_NCCREATE: adopt the shared window state passed through
//    │               CreateWindowExW's lpParam, register the HWND
//    ├─ lookup HWND → Win32WindowShared (thread-local registry)
//    ├─ push_event → translator → EventBuffer + callback
//    └─ WM_NCDESTROY: unregister the HWND
// ```
//
// HWNDs are thread-affine, so the registry is thread-local and nothing
// here is Send.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::mem::{size_of, MaybeUninit};
use std::rc::Rc;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::{debug, error, info, trace, warn};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{GetLastError, FALSE, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    ChangeDisplaySettingsW, GetStockObject, BLACK_BRUSH, CDS_FULLSCREEN, CDS_TYPE, DEVMODEW,
    DISP_CHANGE_SUCCESSFUL, DM_BITSPERPEL, DM_PELSHEIGHT, DM_PELSWIDTH, HBRUSH,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::SetFocus;
use windows::Win32::UI::Input::{
    GetRawInputData, RegisterRawInputDevices, HRAWINPUT, RAWINPUT, RAWINPUTDEVICE,
    RAWINPUTHEADER, RIDEV_INPUTSINK, RID_INPUT, RIM_TYPEKEYBOARD, RIM_TYPEMOUSE,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRectEx, CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW,
    GetClientRect, GetSystemMetrics, GetWindowRect, LoadCursorW, LoadIconW, MessageBoxW,
    PeekMessageW, RegisterClassExW, SetForegroundWindow, SetWindowPos, ShowWindow,
    TranslateMessage, UnregisterClassW, CREATESTRUCTW, CS_HREDRAW, CS_VREDRAW, IDC_ARROW,
    IDI_APPLICATION, IDYES, MB_ICONEXCLAMATION, MB_YESNO, MSG, PM_REMOVE, SM_CXFRAME,
    SM_CXPADDEDBORDER, SM_CXSCREEN, SM_CYFRAME, SM_CYSCREEN, SWP_NOSIZE, SWP_NOZORDER,
    SW_SHOW, WINDOW_EX_STYLE, WINDOW_STYLE, WM_NCCREATE, WM_NCDESTROY, WNDCLASSEXW,
    WS_CLIPCHILDREN, WS_CLIPSIBLINGS, WS_EX_APPWINDOW, WS_EX_WINDOWEDGE, WS_MINIMIZEBOX,
    WS_OVERLAPPEDWINDOW, WS_POPUP,
};

//=== Internal Imports ====================================================

use super::hit_test::HitTestConfig;
use super::queue::{push_event, Win32QueueCore};
use super::translate::{NativeMessage, NativeWindow, RawInputPacket};
use crate::event::Event;
use crate::platform::{EventPump, PlatformError, PlatformWindow, Rect};
use crate::window::{
    forwarding_callback, CallbackSlot, Registry, WindowDesc, WindowError, WindowId, WindowState,
};

//=== Handle Registry =====================================================

thread_local! {
    static WINDOWS: RefCell<Registry<isize, Rc<Win32WindowShared>>> = RefCell::new(Registry::new());
}

fn hwnd_key(hwnd: HWND) -> isize {
    hwnd.0 as isize
}

fn lookup(hwnd: HWND) -> Option<Rc<Win32WindowShared>> {
    WINDOWS.with(|windows| windows.borrow().lookup(hwnd_key(hwnd)))
}

fn unregister(key: isize) {
    WINDOWS.with(|windows| windows.borrow_mut().unregister(key));
}

//--- Wide Strings --------------------------------------------------------

fn widestring(value: &str) -> Vec<u16> {
    use std::os::windows::ffi::OsStrExt;
    std::ffi::OsStr::new(value)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

//=== Shared Window State =================================================

/// State reachable from the window procedure.
struct Win32WindowShared {
    id: WindowId,
    desc: WindowDesc,
    hwnd: Cell<isize>,
    queue: Rc<RefCell<Win32QueueCore>>,
    callback: Rc<CallbackSlot>,
}

//=== OS Queries ==========================================================

/// `NativeWindow` backed by a live HWND.
struct HwndQueries<'a> {
    hwnd: HWND,
    desc: &'a WindowDesc,
}

impl NativeWindow for HwndQueries<'_> {
    fn register_raw_mouse(&self) -> bool {
        const HID_USAGE_PAGE_GENERIC: u16 = 0x01;
        const HID_USAGE_GENERIC_MOUSE: u16 = 0x02;

        let device = RAWINPUTDEVICE {
            usUsagePage: HID_USAGE_PAGE_GENERIC,
            usUsage: HID_USAGE_GENERIC_MOUSE,
            dwFlags: RIDEV_INPUTSINK,
            hwndTarget: self.hwnd,
        };

        unsafe { RegisterRawInputDevices(&[device], size_of::<RAWINPUTDEVICE>() as u32) }.is_ok()
    }

    fn client_rect(&self) -> Option<Rect> {
        let mut rect = RECT::default();
        unsafe { GetClientRect(self.hwnd, &mut rect) }.ok()?;
        Some(to_rect(rect))
    }

    fn window_rect(&self) -> Option<Rect> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(self.hwnd, &mut rect) }.ok()?;
        Some(to_rect(rect))
    }

    fn frame_border(&self) -> (i32, i32) {
        unsafe {
            let padded = GetSystemMetrics(SM_CXPADDEDBORDER);
            (
                GetSystemMetrics(SM_CXFRAME) + padded,
                GetSystemMetrics(SM_CYFRAME) + padded,
            )
        }
    }

    fn sizing_rect(&self, lparam: isize) -> Option<Rect> {
        let proposed = lparam as *const RECT;
        if proposed.is_null() {
            return None;
        }
        // WM_SIZING: lParam points at the drag rectangle for the duration
        // of the message.
        Some(to_rect(unsafe { *proposed }))
    }

    fn read_raw_input(&self, lparam: isize) -> Option<RawInputPacket> {
        read_raw_input(HRAWINPUT(lparam as _))
    }

    fn hit_test_config(&self) -> Option<HitTestConfig> {
        self.desc.is_borderless().then(|| HitTestConfig {
            resize: self.desc.borderless_resize,
            drag: self.desc.borderless_drag,
        })
    }
}

fn to_rect(rect: RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}

/// Reads one raw input record into a stack buffer.
///
/// Mouse and keyboard records always fit in `RAWINPUT`; larger HID
/// records are reported as `Other` without being copied.
fn read_raw_input(handle: HRAWINPUT) -> Option<RawInputPacket> {
    let header_size = size_of::<RAWINPUTHEADER>() as u32;
    let mut size = 0_u32;

    let queried = unsafe { GetRawInputData(handle, RID_INPUT, None, &mut size, header_size) };
    if queried == u32::MAX {
        return None;
    }
    if size as usize > size_of::<RAWINPUT>() {
        return Some(RawInputPacket::Other);
    }

    let mut record = MaybeUninit::<RAWINPUT>::zeroed();
    let copied = unsafe {
        GetRawInputData(
            handle,
            RID_INPUT,
            Some(record.as_mut_ptr() as *mut c_void),
            &mut size,
            header_size,
        )
    };
    if copied != size {
        debug!(target: "platform::win32", "GetRawInputData returned {} of {} bytes", copied, size);
        return None;
    }

    let record = unsafe { record.assume_init() };
    let packet = if record.header.dwType == RIM_TYPEMOUSE.0 {
        let mouse = unsafe { record.data.mouse };
        RawInputPacket::Mouse {
            last_x: mouse.lLastX,
            last_y: mouse.lLastY,
        }
    } else if record.header.dwType == RIM_TYPEKEYBOARD.0 {
        RawInputPacket::Keyboard
    } else {
        RawInputPacket::Other
    };
    Some(packet)
}

//=== Window Procedure ====================================================

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCCREATE {
        adopt_created_window(hwnd, lparam);
    }

    let Some(shared) = lookup(hwnd) else {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    };

    let native = HwndQueries {
        hwnd,
        desc: &shared.desc,
    };
    let result = push_event(
        &shared.queue,
        NativeMessage::new(msg, wparam.0, lparam.0),
        shared.id,
        &native,
        &shared.callback,
    );

    if msg == WM_NCDESTROY {
        debug!(target: "platform::win32", "Window {} destroyed", shared.id.get());
        unregister(hwnd_key(hwnd));
        shared.hwnd.set(0);
    }

    match result {
        Some(code) => LRESULT(code),
        None => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Registers `hwnd` for the shared state passed as the creation param.
fn adopt_created_window(hwnd: HWND, lparam: LPARAM) {
    let create = lparam.0 as *const CREATESTRUCTW;
    if create.is_null() {
        return;
    }

    let param = unsafe { (*create).lpCreateParams } as *const Win32WindowShared;
    if param.is_null() {
        return;
    }

    // The creating Win32Window holds a strong reference for the whole
    // CreateWindowExW call; take one more for the registry.
    let shared = unsafe {
        Rc::increment_strong_count(param);
        Rc::from_raw(param)
    };
    shared.hwnd.set(hwnd_key(hwnd));
    WINDOWS.with(|windows| windows.borrow_mut().register(hwnd_key(hwnd), shared));
}

//=== Win32EventQueue =====================================================

/// Event queue fed by the calling thread's Win32 message queue.
pub struct Win32EventQueue {
    core: Rc<RefCell<Win32QueueCore>>,
}

impl Win32EventQueue {
    /// Creates a queue for windows owned by the calling thread.
    ///
    /// Never fails on Win32; the `Result` matches the winit backend.
    pub fn new() -> Result<Self, PlatformError> {
        Ok(Self {
            core: Rc::new(RefCell::new(Win32QueueCore::new())),
        })
    }
}

impl EventPump for Win32EventQueue {
    /// Dispatches every message currently waiting on this thread.
    fn update(&mut self) {
        let mut msg = MSG::default();
        let mut dispatched = 0_usize;

        while unsafe { PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE) }.as_bool() {
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
            dispatched += 1;
        }

        if dispatched > 0 {
            trace!(target: "platform::win32", "Pumped {} messages", dispatched);
        }
    }

    fn front(&self) -> Option<Event> {
        self.core.borrow().events.front().copied()
    }

    fn pop(&mut self) -> Option<Event> {
        self.core.borrow_mut().events.pop()
    }

    fn is_empty(&self) -> bool {
        self.core.borrow().events.is_empty()
    }

    fn len(&self) -> usize {
        self.core.borrow().events.len()
    }
}

//=== Win32Window =========================================================

/// A native Win32 window.
pub struct Win32Window {
    id: WindowId,
    state: WindowState,
    callback: Rc<CallbackSlot>,
    shared: Option<Rc<Win32WindowShared>>,
    class: Option<(Vec<u16>, HINSTANCE)>,
    display_changed: bool,
}

impl Win32Window {
    pub fn new() -> Self {
        Self {
            id: WindowId::next(),
            state: WindowState::Uninitialized,
            callback: Rc::new(CallbackSlot::default()),
            shared: None,
            class: None,
            display_changed: false,
        }
    }

    /// The native handle, while the window is open.
    pub fn hwnd(&self) -> Option<HWND> {
        let hwnd = self.shared.as_ref()?.hwnd.get();
        (hwnd != 0).then(|| HWND(hwnd as _))
    }

    pub fn desc(&self) -> Option<&WindowDesc> {
        self.shared.as_ref().map(|shared| &shared.desc)
    }

    /// Registers the window class keyed by `desc.name`.
    ///
    /// The returned class name points into `self.class` and stays valid
    /// until the class is unregistered.
    fn register_class(&mut self, desc: &WindowDesc) -> Result<(PCWSTR, HINSTANCE), WindowError> {
        let registration_error = |name: &str| WindowError::ClassRegistration {
            name: name.to_owned(),
            code: unsafe { GetLastError() }.0 as i32,
        };

        let module = unsafe { GetModuleHandleW(None) }.map_err(|_| registration_error(&desc.name))?;
        let instance = HINSTANCE(module.0);
        let class_name = widestring(&desc.name);

        let class = WNDCLASSEXW {
            cbSize: size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(window_proc),
            hInstance: instance,
            hIcon: unsafe { LoadIconW(None, IDI_APPLICATION) }.unwrap_or_default(),
            hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
            hbrBackground: HBRUSH(unsafe { GetStockObject(BLACK_BRUSH) }.0),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            hIconSm: unsafe { LoadIconW(None, IDI_APPLICATION) }.unwrap_or_default(),
            ..Default::default()
        };

        if unsafe { RegisterClassExW(&class) } == 0 {
            let err = registration_error(&desc.name);
            warn!(target: "platform::win32", "{}", err);
            return Err(err);
        }

        let name = PCWSTR(class_name.as_ptr());
        self.class = Some((class_name, instance));
        Ok((name, instance))
    }

    fn unregister_class(&mut self) {
        if let Some((name, instance)) = self.class.take() {
            if unsafe { UnregisterClassW(PCWSTR(name.as_ptr()), instance) }.is_err() {
                debug!(target: "platform::win32", "Window class of window {} not unregistered", self.id.get());
            }
        }
    }
}

impl Default for Win32Window {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformWindow for Win32Window {
    type Queue = Win32EventQueue;

    fn create(&mut self, desc: &WindowDesc, queue: &mut Win32EventQueue) -> Result<(), WindowError> {
        if self.state != WindowState::Uninitialized {
            return Err(WindowError::AlreadyCreated);
        }
        desc.validate()?;

        let (class_name, instance) = self.register_class(desc)?;

        let (screen_width, screen_height) =
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };

        let mut fullscreen = desc.fullscreen;
        let needs_mode_change =
            fullscreen && (desc.width as i32 != screen_width || desc.height as i32 != screen_height);
        if needs_mode_change && change_display_mode(desc.width, desc.height) {
            self.display_changed = true;
        } else if needs_mode_change {
            warn!(
                target: "platform::win32",
                "Display mode {}x{} not supported",
                desc.width,
                desc.height
            );
            if confirm_windowed_fallback() {
                fullscreen = false;
            } else {
                self.unregister_class();
                return Err(WindowError::FullscreenDeclined);
            }
        }

        let (ex_style, style) = window_styles(desc, fullscreen);

        let mut frame = client_frame(desc);
        if unsafe { AdjustWindowRectEx(&mut frame, style, FALSE, ex_style) }.is_err() {
            debug!(target: "platform::win32", "AdjustWindowRectEx failed, using client size");
        }
        let outer_width = frame.right - frame.left;
        let outer_height = frame.bottom - frame.top;

        let shared = Rc::new(Win32WindowShared {
            id: self.id,
            desc: desc.clone(),
            hwnd: Cell::new(0),
            queue: Rc::clone(&queue.core),
            callback: Rc::clone(&self.callback),
        });
        let title = widestring(&desc.title);

        let created = unsafe {
            CreateWindowExW(
                ex_style,
                class_name,
                PCWSTR(title.as_ptr()),
                style | WS_CLIPSIBLINGS | WS_CLIPCHILDREN,
                0,
                0,
                outer_width,
                outer_height,
                None,
                None,
                instance,
                Some(Rc::as_ptr(&shared) as *const c_void),
            )
        };

        let hwnd = match created {
            Ok(hwnd) => hwnd,
            Err(err) => {
                let code = unsafe { GetLastError() }.0 as i32;
                error!(target: "platform::win32", "Could not create window '{}': {}", desc.name, err);
                std::process::exit(code);
            }
        };

        // Windows whose WM_NCCREATE was not seen (should not happen) are
        // registered here so they still reach the queue.
        if shared.hwnd.get() == 0 {
            shared.hwnd.set(hwnd_key(hwnd));
            WINDOWS.with(|windows| windows.borrow_mut().register(hwnd_key(hwnd), Rc::clone(&shared)));
        }

        unsafe {
            if !fullscreen {
                let x = ((screen_width - outer_width) / 2).max(0);
                let y = ((screen_height - outer_height) / 2).max(0);
                let _ = SetWindowPos(hwnd, None, x, y, 0, 0, SWP_NOZORDER | SWP_NOSIZE);
            }

            if desc.visible {
                let _ = ShowWindow(hwnd, SW_SHOW);
                let _ = SetForegroundWindow(hwnd);
                let _ = SetFocus(hwnd);
            }
        }

        info!(
            target: "platform::win32",
            "Window {} '{}' created: {}x{}{}",
            self.id.get(),
            desc.title,
            desc.width,
            desc.height,
            if fullscreen { " fullscreen" } else { "" }
        );

        self.shared = Some(shared);
        self.state = WindowState::Created;
        Ok(())
    }

    fn close(&mut self) {
        if self.state != WindowState::Created {
            return;
        }

        if let Some(shared) = self.shared.take() {
            let hwnd = shared.hwnd.get();
            if hwnd != 0 {
                if unsafe { DestroyWindow(HWND(hwnd as _)) }.is_err() {
                    warn!(target: "platform::win32", "DestroyWindow failed for window {}", self.id.get());
                }
                unregister(hwnd);
                shared.hwnd.set(0);
            }
        }

        self.unregister_class();
        if self.display_changed {
            restore_display_mode();
            self.display_changed = false;
        }
        self.state = WindowState::Closed;
        info!(target: "platform::win32", "Window {} closed", self.id.get());
    }

    fn id(&self) -> WindowId {
        self.id
    }

    fn state(&self) -> WindowState {
        match (&self.state, &self.shared) {
            (WindowState::Created, Some(shared)) if shared.hwnd.get() == 0 => WindowState::Closed,
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
            debug!(target: "platform::win32", "Window {} callback replaced by channel forwarding", self.id.get());
        }
        self.callback.set(forwarding_callback(sender));
    }
}

impl Drop for Win32Window {
    fn drop(&mut self) {
        self.close();
    }
}

//=== Creation Helpers ====================================================

fn window_styles(desc: &WindowDesc, fullscreen: bool) -> (WINDOW_EX_STYLE, WINDOW_STYLE) {
    if fullscreen {
        (WS_EX_APPWINDOW, WS_POPUP)
    } else if desc.is_borderless() {
        (WS_EX_APPWINDOW, WS_POPUP | WS_MINIMIZEBOX)
    } else {
        (WS_EX_APPWINDOW | WS_EX_WINDOWEDGE, WS_OVERLAPPEDWINDOW)
    }
}

/// Client area of `desc` in screen coordinates, clamped to `i32`.
fn client_frame(desc: &WindowDesc) -> RECT {
    let extent = |size: u32| size.min(i32::MAX as u32) as i32;
    RECT {
        left: desc.x,
        top: desc.y,
        right: desc.x.saturating_add(extent(desc.width)),
        bottom: desc.y.saturating_add(extent(desc.height)),
    }
}

/// Switches the primary display to `width` × `height` at 32 bpp.
fn change_display_mode(width: u32, height: u32) -> bool {
    let mode = DEVMODEW {
        dmSize: size_of::<DEVMODEW>() as u16,
        dmPelsWidth: width,
        dmPelsHeight: height,
        dmBitsPerPel: 32,
        dmFields: DM_BITSPERPEL | DM_PELSWIDTH | DM_PELSHEIGHT,
        ..Default::default()
    };

    unsafe { ChangeDisplaySettingsW(Some(&mode as *const DEVMODEW), CDS_FULLSCREEN) } == DISP_CHANGE_SUCCESSFUL
}

/// Returns the primary display to its registry mode.
fn restore_display_mode() {
    let result = unsafe { ChangeDisplaySettingsW(None, CDS_TYPE(0)) };
    if result != DISP_CHANGE_SUCCESSFUL {
        warn!(target: "platform::win32", "Display mode not restored: {:?}", result);
    } else {
        debug!(target: "platform::win32", "Display mode restored");
    }
}

/// Asks the user whether to continue in windowed mode.
fn confirm_windowed_fallback() -> bool {
    let text = widestring("Fullscreen mode not supported!\nSwitch to window mode?");
    let caption = widestring("Error");

    let answer = unsafe {
        MessageBoxW(
            None,
            PCWSTR(text.as_ptr()),
            PCWSTR(caption.as_ptr()),
            MB_YESNO | MB_ICONEXCLAMATION,
        )
    };
    answer == IDYES
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    fn drain(queue: &mut Win32EventQueue) -> Vec<Event> {
        queue.update();
        std::iter::from_fn(|| queue.pop()).collect()
    }

    fn hidden(name: &str) -> WindowDesc {
        WindowDesc::new(name).with_title("crosswin test").with_size(320, 240).with_visible(false)
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn create_queues_create_first() {
        let mut queue = Win32EventQueue::new().unwrap();
        let mut window = Win32Window::new();
        window.create(&hidden("crosswin-test-create"), &mut queue).unwrap();

        assert_eq!(window.state(), WindowState::Created);
        assert!(window.hwnd().is_some());
        assert_eq!(window.desc().map(|desc| desc.name.as_str()), Some("crosswin-test-create"));

        let events = drain(&mut queue);
        assert_eq!(events.first().map(Event::event_type), Some(EventType::Create));
        assert!(events.iter().all(|event| event.window == window.id()));
    }

    #[test]
    fn create_twice_is_rejected() {
        let mut queue = Win32EventQueue::new().unwrap();
        let mut window = Win32Window::new();
        let desc = hidden("crosswin-test-twice");
        window.create(&desc, &mut queue).unwrap();

        assert!(matches!(window.create(&desc, &mut queue), Err(WindowError::AlreadyCreated)));
    }

    #[test]
    fn close_twice_then_drop_is_safe() {
        let mut queue = Win32EventQueue::new().unwrap();
        let mut window = Win32Window::new();
        window.create(&hidden("crosswin-test-close"), &mut queue).unwrap();
        drain(&mut queue);

        window.close();
        window.close();

        assert_eq!(window.state(), WindowState::Closed);
        assert!(window.hwnd().is_none());
        assert!(window.class.is_none());

        let events = drain(&mut queue);
        let closes = events.iter().filter(|event| event.event_type() == EventType::Close).count();
        assert_eq!(closes, 1, "DestroyWindow should report Close once");

        drop(window);
        assert!(drain(&mut queue).is_empty(), "Drop after close should not tear down again");
    }

    #[test]
    fn name_is_reusable_after_close() {
        let mut queue = Win32EventQueue::new().unwrap();
        let desc = hidden("crosswin-test-reuse");

        let mut first = Win32Window::new();
        first.create(&desc, &mut queue).unwrap();
        first.close();
        drop(first);

        let mut second = Win32Window::new();
        second.create(&desc, &mut queue).unwrap();
        assert_eq!(second.state(), WindowState::Created);
    }

    #[test]
    fn duplicate_live_name_fails_registration() {
        let mut queue = Win32EventQueue::new().unwrap();
        let desc = hidden("crosswin-test-duplicate");

        let mut first = Win32Window::new();
        first.create(&desc, &mut queue).unwrap();

        let mut second = Win32Window::new();
        let result = second.create(&desc, &mut queue);
        assert!(matches!(result, Err(WindowError::ClassRegistration { .. })));
        assert_eq!(second.state(), WindowState::Uninitialized);
    }

    #[test]
    fn callback_sees_close_from_explicit_close() {
        let mut queue = Win32EventQueue::new().unwrap();
        let mut window = Win32Window::new();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        window.set_callback(move |event| sink.borrow_mut().push(event.event_type()));

        window.create(&hidden("crosswin-test-callback"), &mut queue).unwrap();
        window.close();

        let seen = seen.borrow();
        assert_eq!(seen.first(), Some(&EventType::Create));
        assert!(seen.contains(&EventType::Close));
    }

    //=====================================================================
    // Display Mode
    //=====================================================================

    #[test]
    fn windowed_create_leaves_display_mode_alone() {
        let mut queue = Win32EventQueue::new().unwrap();
        let mut window = Win32Window::new();
        window.create(&hidden("crosswin-test-display"), &mut queue).unwrap();
        assert!(!window.display_changed);
    }

    #[test]
    fn close_restores_changed_display_mode() {
        let mut queue = Win32EventQueue::new().unwrap();
        let mut window = Win32Window::new();
        window.create(&hidden("crosswin-test-restore"), &mut queue).unwrap();

        window.display_changed = true;
        window.close();
        assert!(!window.display_changed);
    }

    //=====================================================================
    // Creation Helpers
    //=====================================================================

    #[test]
    fn client_frame_spans_position_and_size() {
        let desc = WindowDesc::new("frame").with_position(10, 20).with_size(640, 480);
        let frame = client_frame(&desc);
        assert_eq!((frame.left, frame.top, frame.right, frame.bottom), (10, 20, 650, 500));
    }

    #[test]
    fn client_frame_saturates_large_extents() {
        let desc = WindowDesc::new("frame")
            .with_position(i32::MAX - 5, -10)
            .with_size(u32::MAX, 100);
        let frame = client_frame(&desc);
        assert_eq!(frame.right, i32::MAX);
        assert_eq!(frame.bottom, 90);
    }

    #[test]
    fn borderless_and_fullscreen_styles() {
        let windowed = WindowDesc::new("styles");
        assert_eq!(window_styles(&windowed, false).1, WS_OVERLAPPEDWINDOW);
        assert_eq!(window_styles(&windowed, true), (WS_EX_APPWINDOW, WS_POPUP));
    }
}
