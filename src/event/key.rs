//=========================================================================
// Key
//
// Abstract keyboard key, independent of the backend's key codes.
//
//=========================================================================

/// Keyboard key identifier.
///
/// Covers the digit row, letters, the numeric keypad, arrows, F1-F12 and
/// a few special keys. Every key a backend cannot map becomes
/// [`Key::Unidentified`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    //--- Digit Row --------------------------------------------------------

    Num0, Num1, Num2, Num3, Num4,
    Num5, Num6, Num7, Num8, Num9,

    //--- Letters ----------------------------------------------------------

    A, B, C, D, E, F, G, H, I,
    J, K, L, M, N, O, P, Q, R,
    S, T, U, V, W, X, Y, Z,

    //--- Numeric Keypad ---------------------------------------------------

    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,

    //--- Navigation -------------------------------------------------------

    Up,
    Left,
    Down,
    Right,
    Home,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    //--- Special ----------------------------------------------------------

    Escape,
    Space,

    /// Any key outside the table above.
    Unidentified,
}

impl Key {
    pub fn is_identified(&self) -> bool {
        !matches!(self, Key::Unidentified)
    }
}
