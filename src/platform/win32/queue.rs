//=========================================================================
// Win32 Queue Core
//
// The push-event step of the Win32 backend: translate, store if
// meaningful, then hand the event to the window callback.
//
// The queue core is borrowed only while translating and storing. The
// callback runs after the borrow is released so it can drain the queue
// or close its window re-entrantly.
//
//=========================================================================

use std::cell::RefCell;

use super::translate::{NativeMessage, NativeWindow, Win32Translator};
use crate::event::EventBuffer;
use crate::window::{CallbackSlot, WindowId};

//=== Win32QueueCore ======================================================

#[derive(Debug, Default)]
pub(crate) struct Win32QueueCore {
    pub(crate) events: EventBuffer,
    translator: Win32Translator,
}

impl Win32QueueCore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

//=== Push Event ==========================================================

/// Runs one window-procedure message through `core`.
///
/// Returns the value the window procedure should return, or `None` to
/// fall through to default processing.
pub(crate) fn push_event<N: NativeWindow + ?Sized>(
    core: &RefCell<Win32QueueCore>,
    msg: NativeMessage,
    window: WindowId,
    native: &N,
    callback: &CallbackSlot,
) -> Option<isize> {
    let translation = {
        let mut core = core.borrow_mut();
        let translation = core.translator.translate(msg, window, native);
        core.events.push(translation.event);
        translation
    };

    callback.invoke(&translation.event);
    translation.result
}

//=========================================================================
// Tests
//=========================================================================
