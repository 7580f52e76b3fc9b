//=========================================================================
// Event Model
//
// Platform-independent representation of everything a native window
// reports: lifecycle markers, focus, mouse, keyboard and resize.
//
// Responsibilities:
// - Tag every event with the window it came from (`WindowId`)
// - Carry kind-specific payload in a single `EventData` union
// - Expose the fieldless `EventType` discriminant for cheap filtering
//
// Design:
// Events are `Copy` values with no heap data. The window back-reference
// is an id rather than a pointer, so an event can outlive its window and
// cross thread boundaries.
//
// Event Flow:
// ```text
// Native message (WM_* / winit WindowEvent)
//         ↓
//    Translator (platform::win32 / platform::winit)
//         ↓
//    Event (this module)
//         ↓
//    EventBuffer (FIFO) + window callback
// ```
//
//=========================================================================

//=== Submodules ==========================================================

mod buffer;
mod key;

//=== Public Exports ======================================================

pub use buffer::EventBuffer;
pub use key::Key;

//=== Internal Dependencies ===============================================

use crate::window::WindowId;

//=== EventType ===========================================================

/// Discriminant of an [`Event`].
///
/// `None` marks a native message that had no normalized meaning. Such
/// events are never queued but are still handed to the window callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    None,
    Create,
    Paint,
    Close,
    Focus,
    MouseInput,
    MouseMove,
    MouseWheel,
    MouseRaw,
    Keyboard,
    Resize,
}

//=== ButtonState =========================================================

/// Whether a key or mouse button went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Pressed,
    Released,
}

//=== MouseInput ==========================================================

/// Physical mouse button identifier.
///
/// `Button4` and `Button5` are the two side buttons (X1/X2 on Windows,
/// Back/Forward on winit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseInput {
    /// Primary button (typically left).
    Left,

    /// Middle button (wheel click).
    Middle,

    /// Secondary button (typically right).
    Right,

    /// First side button.
    Button4,

    /// Second side button.
    Button5,
}

//=== ModifierState =======================================================

/// Modifier key snapshot taken when the event was produced.
///
/// `meta` is the Windows/Super/Command key. The Win32 backend derives the
/// state from the `MK_*` bits of mouse messages, which never report it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierState {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl ModifierState {
    /// No modifiers held.
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const fn new(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        Self { ctrl, alt, shift, meta }
    }

    /// Returns true when no modifier is held.
    pub const fn is_empty(&self) -> bool {
        !(self.ctrl || self.alt || self.shift || self.meta)
    }
}

//=== Payloads ============================================================

/// Keyboard focus gained (`true`) or lost (`false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusData {
    pub focused: bool,
}

/// Mouse button press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseInputData {
    pub button: MouseInput,
    pub state: ButtonState,
    pub modifiers: ModifierState,
}

/// Cursor movement.
///
/// `x`/`y` are relative to the client area, or [`OUTSIDE_CLIENT`] on the
/// axis where the cursor left it. `screen_x`/`screen_y` are never
/// clamped. The deltas are measured against the previous move reported to
/// the same queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseMoveData {
    pub x: u32,
    pub y: u32,
    pub screen_x: u32,
    pub screen_y: u32,
    pub delta_x: i32,
    pub delta_y: i32,
}

/// Client coordinate reported when the cursor is outside the client area.
pub const OUTSIDE_CLIENT: u32 = u32::MAX;

impl MouseMoveData {
    /// Client-relative position, or `None` if the cursor left the client
    /// area on either axis.
    pub fn local(&self) -> Option<(u32, u32)> {
        if self.x == OUTSIDE_CLIENT || self.y == OUTSIDE_CLIENT {
            None
        } else {
            Some((self.x, self.y))
        }
    }
}

/// Wheel rotation in notches (positive away from the user).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseWheelData {
    pub delta: f64,
    pub modifiers: ModifierState,
}

/// Unaccelerated relative motion straight from the pointing device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseRawData {
    pub delta_x: i32,
    pub delta_y: i32,
}

/// Key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardData {
    pub key: Key,
    pub state: ButtonState,
    pub modifiers: ModifierState,
}

/// New window size.
///
/// `resizing` is true while the user is still dragging the frame and the
/// size is only a proposal; false once the size has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeData {
    pub width: u32,
    pub height: u32,
    pub resizing: bool,
}

//=== EventData ===========================================================

/// Kind-specific payload of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventData {
    None,
    Create,
    Paint,
    Close,
    Focus(FocusData),
    MouseInput(MouseInputData),
    MouseMove(MouseMoveData),
    MouseWheel(MouseWheelData),
    MouseRaw(MouseRawData),
    Keyboard(KeyboardData),
    Resize(ResizeData),
}

impl EventData {
    pub fn event_type(&self) -> EventType {
        match self {
            Self::None => EventType::None,
            Self::Create => EventType::Create,
            Self::Paint => EventType::Paint,
            Self::Close => EventType::Close,
            Self::Focus(_) => EventType::Focus,
            Self::MouseInput(_) => EventType::MouseInput,
            Self::MouseMove(_) => EventType::MouseMove,
            Self::MouseWheel(_) => EventType::MouseWheel,
            Self::MouseRaw(_) => EventType::MouseRaw,
            Self::Keyboard(_) => EventType::Keyboard,
            Self::Resize(_) => EventType::Resize,
        }
    }
}

//=== Event ===============================================================

/// A normalized native event.
///
/// # Examples
///
/// ```
/// use crosswin::event::{Event, EventData, EventType, ResizeData};
/// use crosswin::window::WindowId;
///
/// let id = WindowId::next();
/// let event = Event::new(id, EventData::Resize(ResizeData {
///     width: 640,
///     height: 480,
///     resizing: false,
/// }));
///
/// assert_eq!(event.event_type(), EventType::Resize);
/// assert_eq!(event.window, id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Window that produced the event.
    pub window: WindowId,

    pub data: EventData,
}

impl Event {
    pub fn new(window: WindowId, data: EventData) -> Self {
        Self { window, data }
    }

    /// An event that carries no information for `window`.
    pub fn none(window: WindowId) -> Self {
        Self::new(window, EventData::None)
    }

    pub fn event_type(&self) -> EventType {
        self.data.event_type()
    }

    pub fn is_none(&self) -> bool {
        matches!(self.data, EventData::None)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
