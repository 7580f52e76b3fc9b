//=========================================================================
// Win32 Message Translator
//
// Converts one window-procedure message into a normalized `Event`.
//
// Architecture:
// ```text
//   WndProc(hwnd, msg, wParam, lParam)
//         ↓
//   NativeMessage ──> Win32Translator ──> Translation { event, result }
//                          │
//                          └─ NativeWindow (OS queries: rects, frame
//                             metrics, raw input, hit-test config)
// ```
//
// OS queries go through the `NativeWindow` trait, so the translator is
// plain Rust and runs in tests without a window station.
//
// Stateful pieces:
// - Raw mouse input is registered once, on the first message this
//   translator sees, for whichever window sent it
// - The previous cursor position feeds mouse deltas
//
//=========================================================================

//=== External Crates =====================================================

use log::{debug, trace, warn};

//=== Internal Imports ====================================================

use super::consts::*;
use super::hit_test::{hit_test, HitTestConfig};
use super::keymap::key_from_vk;
use crate::event::{
    ButtonState, Event, EventData, FocusData, KeyboardData, ModifierState, MouseInput,
    MouseInputData, MouseRawData, MouseWheelData, ResizeData,
};
use crate::platform::mouse::MouseTracker;
use crate::platform::Rect;
use crate::window::WindowId;

//=== NativeMessage =======================================================

/// A window message as received by the window procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeMessage {
    pub message: u32,
    pub wparam: usize,
    pub lparam: isize,
}

impl NativeMessage {
    pub const fn new(message: u32, wparam: usize, lparam: isize) -> Self {
        Self { message, wparam, lparam }
    }
}

//--- Packed Parameter Helpers --------------------------------------------

const fn loword(value: usize) -> u16 {
    (value & 0xFFFF) as u16
}

const fn hiword(value: usize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

/// Signed x coordinate packed in the low word (`GET_X_LPARAM`).
const fn x_lparam(lparam: isize) -> i32 {
    loword(lparam as usize) as i16 as i32
}

/// Signed y coordinate packed in the high word (`GET_Y_LPARAM`).
const fn y_lparam(lparam: isize) -> i32 {
    hiword(lparam as usize) as i16 as i32
}

/// Packs two signed coordinates the way the OS does for mouse messages.
pub const fn pack_point(x: i32, y: i32) -> isize {
    ((x as u16 as u32) | ((y as u16 as u32) << 16)) as isize
}

//=== RawInputPacket ======================================================

/// Device data read for a `WM_INPUT` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInputPacket {
    /// Keyboard report. Read but not turned into an event.
    Keyboard,

    /// Relative mouse motion.
    Mouse { last_x: i32, last_y: i32 },

    /// Any other HID device.
    Other,
}

//=== NativeWindow ========================================================

/// OS queries about the window a message is addressed to.
pub trait NativeWindow {
    /// Registers this window as the sink for raw mouse input. Returns
    /// false if the OS refused.
    fn register_raw_mouse(&self) -> bool;

    fn client_rect(&self) -> Option<Rect>;

    /// Outer window rectangle in screen coordinates.
    fn window_rect(&self) -> Option<Rect>;

    /// Resize border thickness (frame plus padded border) per axis.
    fn frame_border(&self) -> (i32, i32);

    /// Proposed window rectangle carried by a `WM_SIZING` lParam.
    fn sizing_rect(&self, lparam: isize) -> Option<Rect>;

    /// Reads the raw input record referenced by a `WM_INPUT` lParam.
    fn read_raw_input(&self, lparam: isize) -> Option<RawInputPacket>;

    /// Borderless behavior of the window, `None` for a framed window.
    fn hit_test_config(&self) -> Option<HitTestConfig>;
}

//=== Translation =========================================================

/// Outcome of translating one message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    pub event: Event,

    /// Value to return from the window procedure. `None` leaves the
    /// message to default processing.
    pub result: Option<isize>,
}

//=== Win32Translator =====================================================

/// Per-queue translation state.
#[derive(Debug, Default)]
pub struct Win32Translator {
    raw_input_registered: bool,
    mouse: MouseTracker,
}

impl Win32Translator {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            raw_input_registered: false,
            mouse: MouseTracker::new(),
        }
    }

    pub fn raw_input_registered(&self) -> bool {
        self.raw_input_registered
    }

    //--- Translation ------------------------------------------------------

    /// Translates `msg`, addressed to the window `window`.
    ///
    /// Unhandled messages produce an `EventData::None` event.
    pub fn translate<N: NativeWindow + ?Sized>(
        &mut self,
        msg: NativeMessage,
        window: WindowId,
        native: &N,
    ) -> Translation {
        if !self.raw_input_registered {
            self.raw_input_registered = true;
            if native.register_raw_mouse() {
                debug!(
                    target: "platform::win32",
                    "Raw mouse input registered for window {}",
                    window.get()
                );
            } else {
                warn!(target: "platform::win32", "Raw mouse input registration failed");
            }
        }

        let mut result = None;
        let data = match msg.message {
            WM_CREATE => EventData::Create,
            WM_PAINT => EventData::Paint,
            WM_DESTROY => EventData::Close,
            WM_SETFOCUS => EventData::Focus(FocusData { focused: true }),
            WM_KILLFOCUS => EventData::Focus(FocusData { focused: false }),

            WM_NCHITTEST => {
                if let Some(config) = native.hit_test_config() {
                    let cursor = (x_lparam(msg.lparam), y_lparam(msg.lparam));
                    result = Some(hit_test(
                        cursor,
                        native.window_rect(),
                        native.frame_border(),
                        config,
                    ));
                }
                EventData::None
            }

            WM_MOUSEWHEEL => EventData::MouseWheel(MouseWheelData {
                delta: f64::from(hiword(msg.wparam) as i16) / f64::from(WHEEL_DELTA),
                modifiers: mouse_modifiers(msg.wparam),
            }),

            WM_LBUTTONDOWN => mouse_button(MouseInput::Left, ButtonState::Pressed, msg.wparam),
            WM_LBUTTONUP => mouse_button(MouseInput::Left, ButtonState::Released, msg.wparam),
            WM_MBUTTONDOWN => mouse_button(MouseInput::Middle, ButtonState::Pressed, msg.wparam),
            WM_MBUTTONUP => mouse_button(MouseInput::Middle, ButtonState::Released, msg.wparam),
            WM_RBUTTONDOWN => mouse_button(MouseInput::Right, ButtonState::Pressed, msg.wparam),
            WM_RBUTTONUP => mouse_button(MouseInput::Right, ButtonState::Released, msg.wparam),
            WM_XBUTTONDOWN => mouse_button(x_button(msg.wparam), ButtonState::Pressed, msg.wparam),
            WM_XBUTTONUP => mouse_button(x_button(msg.wparam), ButtonState::Released, msg.wparam),

            WM_INPUT => match native.read_raw_input(msg.lparam) {
                Some(RawInputPacket::Mouse { last_x, last_y }) => {
                    EventData::MouseRaw(MouseRawData {
                        delta_x: last_x,
                        delta_y: last_y,
                    })
                }
                Some(_) => EventData::None,
                None => {
                    debug!(target: "platform::win32", "Raw input record could not be read");
                    EventData::None
                }
            },

            WM_MOUSEMOVE => {
                let client = native.client_rect().unwrap_or_default();
                let moved = self
                    .mouse
                    .track(x_lparam(msg.lparam), y_lparam(msg.lparam), client);
                EventData::MouseMove(moved)
            }

            WM_KEYDOWN | WM_SYSKEYDOWN => keyboard(msg.wparam, ButtonState::Pressed),
            WM_KEYUP | WM_SYSKEYUP => keyboard(msg.wparam, ButtonState::Released),

            WM_SIZE => EventData::Resize(ResizeData {
                width: u32::from(loword(msg.lparam as usize)),
                height: u32::from(hiword(msg.lparam as usize)),
                resizing: false,
            }),

            WM_SIZING => match native.sizing_rect(msg.lparam) {
                Some(rect) => EventData::Resize(ResizeData {
                    width: rect.width().max(0) as u32,
                    height: rect.height().max(0) as u32,
                    resizing: true,
                }),
                None => EventData::None,
            },

            // WM_CHAR, WM_LBUTTONDBLCLK, WM_ERASEBKGND and the rest
            _ => EventData::None,
        };

        let event = Event::new(window, data);
        if !event.is_none() {
            trace!(
                target: "platform::win32",
                "msg {:#06x} -> {:?}",
                msg.message,
                event.event_type()
            );
        }

        Translation { event, result }
    }
}

//=== Internal Helpers ====================================================

/// Modifier snapshot from the `MK_*` bits of a mouse message.
fn mouse_modifiers(wparam: usize) -> ModifierState {
    let keys = usize::from(loword(wparam));
    ModifierState::new(
        keys & MK_CONTROL != 0,
        keys & MK_ALT != 0,
        keys & MK_SHIFT != 0,
        false,
    )
}

fn mouse_button(button: MouseInput, state: ButtonState, wparam: usize) -> EventData {
    EventData::MouseInput(MouseInputData {
        button,
        state,
        modifiers: mouse_modifiers(wparam),
    })
}

fn x_button(wparam: usize) -> MouseInput {
    if usize::from(hiword(wparam)) & XBUTTON1 != 0 {
        MouseInput::Button4
    } else {
        MouseInput::Button5
    }
}

/// Key messages never carry modifier state.
fn keyboard(vk: usize, state: ButtonState) -> EventData {
    EventData::Keyboard(KeyboardData {
        key: key_from_vk(vk),
        state,
        modifiers: ModifierState::NONE,
    })
}

//=========================================================================
// Tests
//=========================================================================
