//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use crosswin::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Backend native to the compile target
#[cfg(any(windows, not(any(target_arch = "wasm32", target_os = "ios"))))]
pub use crate::platform::{EventQueue, Window};

// Backend traits
pub use crate::platform::{EventPump, PlatformError, PlatformWindow};

// Window description and lifecycle
pub use crate::window::{WindowDesc, WindowError, WindowId, WindowState};

// Event model
pub use crate::event::{
    ButtonState, Event, EventData, EventType, Key, ModifierState, MouseInput, OUTSIDE_CLIENT,
};
