//=========================================================================
// crosswin Library Root
//
// Native windows and a normalized, pollable input event queue.
//
// Responsibilities:
// - Describe and create OS windows (`window`)
// - Normalize OS messages into one event model (`event`)
// - Provide the per-OS backends behind a common surface (`platform`)
//
// Typical usage:
// ```no_run
// use crosswin::prelude::*;
//
// let mut queue = EventQueue::new()?;
// let mut window = Window::new();
// window.create(&WindowDesc::new("main").with_title("Hello"), &mut queue)?;
//
// loop {
//     queue.update();
//     while let Some(event) = queue.pop() {
//         if event.event_type() == EventType::Close {
//             return Ok(());
//         }
//     }
// }
// # Ok::<(), Box<dyn std::error::Error>>(())
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `event` holds the platform-independent event model and queue buffer.
// `window` holds the window descriptor, identity, state and errors.
// `platform` holds the Win32 and winit backends.
//
pub mod event;
pub mod platform;
pub mod prelude;
pub mod window;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the backend native to the compile target, so applications
// can write `crosswin::Window` / `crosswin::EventQueue` and stay portable.
//
#[cfg(any(windows, not(any(target_arch = "wasm32", target_os = "ios"))))]
pub use platform::{EventQueue, Window};

pub use event::{Event, EventData, EventType};
pub use platform::{EventPump, PlatformWindow};
pub use window::{WindowDesc, WindowError};
