//=========================================================================
// Event Buffer
//
// FIFO store of translated events waiting for the consumer. Every
// backend's EventQueue owns one and fills it from its message pump.
//
// Responsibilities:
// - Keep arrival order (no deduplication, no coalescing)
// - Reject `None` translations before they are stored
// - Give the consumer front/pop/len access plus a draining iterator
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::VecDeque;

//=== Internal Modules ====================================================
use super::Event;

//=== EventBuffer =========================================================

/// Ordered queue of pending events.
#[derive(Debug)]
pub struct EventBuffer {
    events: VecDeque<Event>,
}

impl EventBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates room for a typical frame worth of input so the
    // message pump does not reallocate under normal load.
    //
    pub fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: VecDeque::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Insertion --------------------------------------------------------

    /// Appends `event` unless it is a `None` translation.
    ///
    /// Returns whether the event was stored.
    pub fn push(&mut self, event: Event) -> bool {
        if event.is_none() {
            return false;
        }
        self.events.push_back(event);
        true
    }

    //--- Consumption ------------------------------------------------------

    /// Oldest pending event.
    pub fn front(&self) -> Option<&Event> {
        self.events.front()
    }

    /// Removes and returns the oldest pending event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Removes every pending event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain(..)
    }

    //--- Utilities --------------------------------------------------------

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for EventBuffer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
