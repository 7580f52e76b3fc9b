//=========================================================================
// Mouse Tracker
//
// Turns absolute cursor positions into `MouseMoveData`, shared by every
// backend so they agree on clamping and delta semantics.
//
// - Coordinates outside the client rectangle become `OUTSIDE_CLIENT`
//   on that axis; the absolute coordinates are kept untouched.
// - Deltas are taken against the previous absolute position. The first
//   move is measured from the origin.
//
//=========================================================================

use crate::event::{MouseMoveData, OUTSIDE_CLIENT};

//=== Rect ================================================================

/// Axis-aligned rectangle in native pixel coordinates.
///
/// Edges are inclusive for client clamping: a cursor exactly on `right`
/// still counts as inside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle anchored at the origin.
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

//=== MouseTracker ========================================================

/// Remembers the previous cursor position of one event queue.
#[derive(Debug, Default)]
pub(crate) struct MouseTracker {
    prev_x: i32,
    prev_y: i32,
}

impl MouseTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a move to (`x`, `y`) and describes it against `client`.
    pub(crate) fn track(&mut self, x: i32, y: i32, client: Rect) -> MouseMoveData {
        let local_x = if client.left <= x && x <= client.right {
            (x - client.left) as u32
        } else {
            OUTSIDE_CLIENT
        };
        let local_y = if client.top <= y && y <= client.bottom {
            (y - client.top) as u32
        } else {
            OUTSIDE_CLIENT
        };

        let data = MouseMoveData {
            x: local_x,
            y: local_y,
            screen_x: x as u32,
            screen_y: y as u32,
            delta_x: x.wrapping_sub(self.prev_x),
            delta_y: y.wrapping_sub(self.prev_y),
        };

        self.prev_x = x;
        self.prev_y = y;
        data
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
