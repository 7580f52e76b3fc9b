//=========================================================================
// Platform Subsystem
//
// Native window backends and the event pumps that feed them.
//
// Architecture:
// ```text
//  ┌─────────────────────────────┐   ┌─────────────────────────────┐
//  │  win32 (Windows)            │   │  winit (everything else)    │
//  │   PeekMessageW loop         │   │   pump_app_events(ZERO)     │
//  │    ↓                        │   │    ↓                        │
//  │  window_proc                │   │  ApplicationHandler         │
//  │    ↓                        │   │    ↓                        │
//  │  Win32Translator            │   │  WinitTranslator            │
//  └──────────────┬──────────────┘   └──────────────┬──────────────┘
//                 └────────────┬────────────────────┘
//                              ↓
//               EventBuffer (FIFO) + window callback
// ```
//
// Both backends expose the same surface through `PlatformWindow` and
// `EventPump`. `Window` / `EventQueue` alias whichever backend is native
// to the compile target.
//
// Key Design Decisions:
// - **Poll, never block**: `update()` drains what the OS has queued and
//   returns, so the caller owns the frame loop
// - **Translation is pure**: OS queries sit behind small traits so every
//   translation rule is testable without a display
// - **Single-threaded**: windows and queues are `!Send`; events are `Copy`
//   and `Send` and can be forwarded to other threads
//
//=========================================================================

//=== Submodules ==========================================================

mod mouse;

pub mod win32;

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub mod winit;

//=== Public Exports ======================================================

pub use mouse::Rect;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use ::winit::error::EventLoopError;

//=== Internal Imports ====================================================

use crate::event::Event;
use crate::window::{WindowDesc, WindowError, WindowId, WindowState};

//=== Backend Selection ===================================================

#[cfg(windows)]
pub type Window = win32::Win32Window;
#[cfg(windows)]
pub type EventQueue = win32::Win32EventQueue;

#[cfg(all(not(windows), not(any(target_arch = "wasm32", target_os = "ios"))))]
pub type Window = self::winit::WinitWindow;
#[cfg(all(not(windows), not(any(target_arch = "wasm32", target_os = "ios"))))]
pub type EventQueue = self::winit::WinitEventQueue;

//=== PlatformError =======================================================

/// Event loop failures.
///
/// These are typically fatal: without an event loop there is nothing to
/// attach windows to.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates an OS-level issue or a
    /// second event loop in the same process).
    EventLoopCreation(EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventLoopCreation(e) => Some(e),
        }
    }
}

//=== EventPump ===========================================================

/// A queue of normalized events filled from the OS.
///
/// # Examples
///
/// ```no_run
/// use crosswin::prelude::*;
///
/// fn drain(queue: &mut impl EventPump) {
///     queue.update();
///     while let Some(event) = queue.pop() {
///         println!("{:?}", event.event_type());
///     }
/// }
/// ```
pub trait EventPump {
    /// Processes every native message currently available, then returns.
    fn update(&mut self);

    /// Oldest queued event, if any.
    fn front(&self) -> Option<Event>;

    /// Removes and returns the oldest queued event.
    fn pop(&mut self) -> Option<Event>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;
}

//=== PlatformWindow ======================================================

/// A native window bound to an [`EventPump`].
pub trait PlatformWindow {
    type Queue: EventPump;

    /// Opens the native window described by `desc`. Its events are queued
    /// on `queue`.
    ///
    /// # Errors
    ///
    /// See [`WindowError`]. A native handle that cannot be allocated is not
    /// an error: it is logged and the process exits.
    fn create(&mut self, desc: &WindowDesc, queue: &mut Self::Queue) -> Result<(), WindowError>;

    /// Destroys the native window. Safe to call more than once.
    fn close(&mut self);

    fn id(&self) -> WindowId;

    fn state(&self) -> WindowState;

    /// Installs the synchronous hook called for every translated event.
    fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&Event) + 'static;

    fn clear_callback(&mut self);

    /// Forwards every meaningful event of this window into `sender`.
    ///
    /// Replaces any callback installed with `set_callback`.
    fn forward_to(&mut self, sender: Sender<Event>);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }

    #[test]
    fn platform_error_display_format() {
        fn assert_display<T: std::fmt::Display>() {}
        assert_display::<PlatformError>();
    }

    #[test]
    fn traits_are_usable_as_bounds() {
        fn assert_pump<T: EventPump>() {}
        fn assert_window<T: PlatformWindow>() {}
        let _ = assert_pump::<EventQueue>;
        let _ = assert_window::<Window>;
    }
}
