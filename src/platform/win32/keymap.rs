//=========================================================================
// Virtual-Key Table
//
// Maps Win32 virtual-key codes to `Key`. Digits and letters share their
// ASCII codes ('0'..='9', 'A'..='Z'); everything else is listed
// explicitly.
//
//=========================================================================

use super::consts::*;
use crate::event::Key;

//=== Lookup Tables =======================================================

const DIGITS: [Key; 10] = [
    Key::Num0, Key::Num1, Key::Num2, Key::Num3, Key::Num4,
    Key::Num5, Key::Num6, Key::Num7, Key::Num8, Key::Num9,
];

const NUMPAD: [Key; 10] = [
    Key::Numpad0, Key::Numpad1, Key::Numpad2, Key::Numpad3, Key::Numpad4,
    Key::Numpad5, Key::Numpad6, Key::Numpad7, Key::Numpad8, Key::Numpad9,
];

const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

const FUNCTION: [Key; 12] = [
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
    Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
];

//=== Conversion ==========================================================

/// Translates a virtual-key code (the wParam of `WM_KEY*`).
///
/// Unknown codes map to [`Key::Unidentified`].
pub fn key_from_vk(vk: usize) -> Key {
    match vk {
        0x30..=0x39 => DIGITS[vk - 0x30],
        0x41..=0x5A => LETTERS[vk - 0x41],
        VK_NUMPAD0..=VK_NUMPAD9 => NUMPAD[vk - VK_NUMPAD0],
        VK_F1..=VK_F12 => FUNCTION[vk - VK_F1],

        VK_ESCAPE => Key::Escape,
        VK_SPACE => Key::Space,
        VK_HOME => Key::Home,
        VK_UP => Key::Up,
        VK_LEFT => Key::Left,
        VK_DOWN => Key::Down,
        VK_RIGHT => Key::Right,

        _ => Key::Unidentified,
    }
}

//=========================================================================
// Tests
//=========================================================================
