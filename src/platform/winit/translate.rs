//=========================================================================
// Winit Translator
//=========================================================================
//
// Converts winit window and device events into normalized `EventData`,
// following the same rules as the Win32 translator.
//
// Architecture:
//   WindowEvent / DeviceEvent → WinitTranslator → EventData → EventBuffer
//
// Stateful pieces: modifier state cached from `ModifiersChanged` and
// applied to subsequent mouse button and wheel events, and the previous
// cursor position for mouse deltas. Keyboard events carry no modifiers,
// matching the Win32 backend.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    dpi::PhysicalSize,
    event::{DeviceEvent, ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::event::{
    ButtonState, EventData, FocusData, Key, KeyboardData, ModifierState, MouseInput,
    MouseInputData, MouseRawData, MouseWheelData, ResizeData,
};
use crate::platform::mouse::MouseTracker;
use crate::platform::Rect;

/// Pixel scroll distance that counts as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 120.0;

//=== WinitTranslator =====================================================

/// Per-queue translation state for the winit backend.
#[derive(Debug, Default)]
pub struct WinitTranslator {
    modifiers: ModifierState,
    mouse: MouseTracker,
}

impl WinitTranslator {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached modifier state (applied to subsequent events).
    pub fn update_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = ModifierState::from(state);
    }

    pub fn current_modifiers(&self) -> ModifierState {
        self.modifiers
    }

    //--- Event Processing -------------------------------------------------

    /// Translates a window event. `client` is the window's inner area.
    ///
    /// Unhandled events produce `EventData::None`.
    pub fn translate_window_event(&mut self, event: &WindowEvent, client: Rect) -> EventData {
        match event {
            WindowEvent::CloseRequested => EventData::Close,
            WindowEvent::RedrawRequested => EventData::Paint,
            WindowEvent::Focused(focused) => EventData::Focus(FocusData { focused: *focused }),
            WindowEvent::Resized(size) => self.process_resize(*size),

            WindowEvent::ModifiersChanged(modifiers) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", modifiers);
                self.update_modifiers(modifiers.state());
                EventData::None
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.process_mouse_move(position.x.round() as i32, position.y.round() as i32, client)
            }

            WindowEvent::MouseWheel { delta, .. } => self.process_wheel(*delta),

            WindowEvent::MouseInput { state, button, .. } => {
                self.process_mouse_button(*button, *state)
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.process_key(event.physical_key, event.state)
            }

            // Destroyed, Moved, ScaleFactorChanged and the rest
            _ => EventData::None,
        }
    }

    /// Translates a device event. Only relative mouse motion is kept.
    pub fn translate_device_event(&self, event: &DeviceEvent) -> EventData {
        match event {
            DeviceEvent::MouseMotion { delta: (dx, dy) } => EventData::MouseRaw(MouseRawData {
                delta_x: dx.round() as i32,
                delta_y: dy.round() as i32,
            }),
            _ => EventData::None,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Keyboard event from a physical key. Unmapped keys still produce an
    /// event, with `Key::Unidentified`.
    fn process_key(&self, physical: PhysicalKey, state: ElementState) -> EventData {
        let key = match physical {
            PhysicalKey::Code(code) => Key::from(code),
            PhysicalKey::Unidentified(_) => Key::Unidentified,
        };

        EventData::Keyboard(KeyboardData {
            key,
            state: ButtonState::from(state),
            modifiers: ModifierState::NONE,
        })
    }

    fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> EventData {
        match mouse_input_from(button) {
            Some(button) => EventData::MouseInput(MouseInputData {
                button,
                state: ButtonState::from(state),
                modifiers: self.modifiers,
            }),
            None => {
                trace!(target: "platform::input", "Unmapped mouse button ignored: {:?}", button);
                EventData::None
            }
        }
    }

    fn process_wheel(&self, delta: MouseScrollDelta) -> EventData {
        let delta = match delta {
            MouseScrollDelta::LineDelta(_, lines) => f64::from(lines),
            MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_NOTCH,
        };

        EventData::MouseWheel(MouseWheelData {
            delta,
            modifiers: self.modifiers,
        })
    }

    fn process_mouse_move(&mut self, x: i32, y: i32, client: Rect) -> EventData {
        EventData::MouseMove(self.mouse.track(x, y, client))
    }

    fn process_resize(&self, size: PhysicalSize<u32>) -> EventData {
        EventData::Resize(ResizeData {
            width: size.width,
            height: size.height,
            resizing: false,
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Winit normalizes platform keys (the macOS Command key reports as
/// `super`), which lands in `meta`.
impl From<ModifiersState> for ModifierState {
    fn from(state: ModifiersState) -> Self {
        Self::new(
            state.control_key(),
            state.alt_key(),
            state.shift_key(),
            state.super_key(),
        )
    }
}

impl From<ElementState> for ButtonState {
    fn from(state: ElementState) -> Self {
        match state {
            ElementState::Pressed => ButtonState::Pressed,
            ElementState::Released => ButtonState::Released,
        }
    }
}

/// Converts winit physical key codes to `Key`.
///
/// Covers the same keys as the Win32 virtual-key table; everything else
/// is `Key::Unidentified`.
impl From<WinitKeyCode> for Key {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------
            Digit0 => Key::Num0, Digit1 => Key::Num1, Digit2 => Key::Num2,
            Digit3 => Key::Num3, Digit4 => Key::Num4, Digit5 => Key::Num5,
            Digit6 => Key::Num6, Digit7 => Key::Num7, Digit8 => Key::Num8,
            Digit9 => Key::Num9,

            //--- Letters ------------------------------------------------------
            KeyA => Key::A, KeyB => Key::B, KeyC => Key::C, KeyD => Key::D,
            KeyE => Key::E, KeyF => Key::F, KeyG => Key::G, KeyH => Key::H,
            KeyI => Key::I, KeyJ => Key::J, KeyK => Key::K, KeyL => Key::L,
            KeyM => Key::M, KeyN => Key::N, KeyO => Key::O, KeyP => Key::P,
            KeyQ => Key::Q, KeyR => Key::R, KeyS => Key::S, KeyT => Key::T,
            KeyU => Key::U, KeyV => Key::V, KeyW => Key::W, KeyX => Key::X,
            KeyY => Key::Y, KeyZ => Key::Z,

            //--- Numpad -------------------------------------------------------
            Numpad0 => Key::Numpad0, Numpad1 => Key::Numpad1, Numpad2 => Key::Numpad2,
            Numpad3 => Key::Numpad3, Numpad4 => Key::Numpad4, Numpad5 => Key::Numpad5,
            Numpad6 => Key::Numpad6, Numpad7 => Key::Numpad7, Numpad8 => Key::Numpad8,
            Numpad9 => Key::Numpad9,

            //--- Navigation ---------------------------------------------------
            ArrowUp => Key::Up, ArrowLeft => Key::Left,
            ArrowDown => Key::Down, ArrowRight => Key::Right,
            Home => Key::Home,

            //--- Function -----------------------------------------------------
            F1 => Key::F1, F2 => Key::F2, F3 => Key::F3, F4 => Key::F4,
            F5 => Key::F5, F6 => Key::F6, F7 => Key::F7, F8 => Key::F8,
            F9 => Key::F9, F10 => Key::F10, F11 => Key::F11, F12 => Key::F12,

            //--- Special ------------------------------------------------------
            Escape => Key::Escape,
            Space => Key::Space,

            _ => Key::Unidentified,
        }
    }
}

/// Maps winit mouse buttons. Back/Forward are the X1/X2 side buttons;
/// other buttons have no counterpart.
pub fn mouse_input_from(button: WinitMouseButton) -> Option<MouseInput> {
    match button {
        WinitMouseButton::Left => Some(MouseInput::Left),
        WinitMouseButton::Middle => Some(MouseInput::Middle),
        WinitMouseButton::Right => Some(MouseInput::Right),
        WinitMouseButton::Back => Some(MouseInput::Button4),
        WinitMouseButton::Forward => Some(MouseInput::Button5),
        WinitMouseButton::Other(_) => None,
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::OUTSIDE_CLIENT;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, TouchPhase};

    const CLIENT: Rect = Rect::from_size(800, 600);

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift { state.insert(ModifiersState::SHIFT); }
        if ctrl { state.insert(ModifiersState::CONTROL); }
        if alt { state.insert(ModifiersState::ALT); }
        state
    }

    fn device() -> DeviceId {
        DeviceId::dummy()
    }

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(x, y),
        }
    }

    //=====================================================================
    // Modifiers
    //=====================================================================

    #[test]
    fn starts_with_no_modifiers() {
        let translator = WinitTranslator::new();
        assert!(translator.current_modifiers().is_empty());
    }

    #[test]
    fn modifiers_changed_updates_state_without_event() {
        let mut translator = WinitTranslator::new();
        let event = WindowEvent::ModifiersChanged(make_modifiers(true, false, true).into());

        let data = translator.translate_window_event(&event, CLIENT);

        assert_eq!(data, EventData::None);
        let mods = translator.current_modifiers();
        assert!(mods.shift && !mods.ctrl && mods.alt);
    }

    #[test]
    fn super_key_maps_to_meta() {
        let mods = ModifierState::from(ModifiersState::SUPER);
        assert!(mods.meta);
        assert!(!mods.ctrl);
    }

    #[test]
    fn modifiers_persist_across_mouse_events() {
        let mut translator = WinitTranslator::new();
        translator.update_modifiers(make_modifiers(true, false, false));

        let button = translator.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);
        let wheel = translator.process_wheel(MouseScrollDelta::LineDelta(0.0, 1.0));

        match button {
            EventData::MouseInput(data) => assert!(data.modifiers.shift),
            other => panic!("Expected MouseInput, got {:?}", other),
        }
        match wheel {
            EventData::MouseWheel(data) => assert!(data.modifiers.shift),
            other => panic!("Expected MouseWheel, got {:?}", other),
        }
    }

    //=====================================================================
    // Keyboard
    //=====================================================================

    #[test]
    fn key_events_carry_no_modifiers() {
        let mut translator = WinitTranslator::new();
        translator.update_modifiers(make_modifiers(false, true, false));

        let data = translator.process_key(PhysicalKey::Code(WinitKeyCode::KeyS), ElementState::Pressed);

        assert_eq!(
            data,
            EventData::Keyboard(KeyboardData {
                key: Key::S,
                state: ButtonState::Pressed,
                modifiers: ModifierState::NONE,
            })
        );
    }

    #[test]
    fn unmapped_keys_are_unidentified() {
        let translator = WinitTranslator::new();

        let data = translator.process_key(PhysicalKey::Code(WinitKeyCode::F13), ElementState::Released);
        match data {
            EventData::Keyboard(data) => {
                assert_eq!(data.key, Key::Unidentified);
                assert_eq!(data.state, ButtonState::Released);
            }
            other => panic!("Expected Keyboard, got {:?}", other),
        }
    }

    #[test]
    fn keycode_conversion_covers_table() {
        assert_eq!(Key::from(WinitKeyCode::KeyA), Key::A);
        assert_eq!(Key::from(WinitKeyCode::KeyZ), Key::Z);
        assert_eq!(Key::from(WinitKeyCode::Digit7), Key::Num7);
        assert_eq!(Key::from(WinitKeyCode::Numpad3), Key::Numpad3);
        assert_eq!(Key::from(WinitKeyCode::F12), Key::F12);
        assert_eq!(Key::from(WinitKeyCode::ArrowLeft), Key::Left);
        assert_eq!(Key::from(WinitKeyCode::Home), Key::Home);
        assert_eq!(Key::from(WinitKeyCode::Escape), Key::Escape);
        assert_eq!(Key::from(WinitKeyCode::Enter), Key::Unidentified);
    }

    //=====================================================================
    // Mouse
    //=====================================================================

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(mouse_input_from(WinitMouseButton::Left), Some(MouseInput::Left));
        assert_eq!(mouse_input_from(WinitMouseButton::Middle), Some(MouseInput::Middle));
        assert_eq!(mouse_input_from(WinitMouseButton::Right), Some(MouseInput::Right));
        assert_eq!(mouse_input_from(WinitMouseButton::Back), Some(MouseInput::Button4));
        assert_eq!(mouse_input_from(WinitMouseButton::Forward), Some(MouseInput::Button5));
        assert_eq!(mouse_input_from(WinitMouseButton::Other(9)), None);
    }

    #[test]
    fn other_mouse_button_produces_nothing() {
        let translator = WinitTranslator::new();
        let data = translator.process_mouse_button(WinitMouseButton::Other(7), ElementState::Pressed);
        assert_eq!(data, EventData::None);
    }

    #[test]
    fn wheel_lines_and_pixels_are_notches() {
        let translator = WinitTranslator::new();

        let lines = translator.process_wheel(MouseScrollDelta::LineDelta(0.0, -2.0));
        let pixels = translator.process_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 60.0)));

        match (lines, pixels) {
            (EventData::MouseWheel(lines), EventData::MouseWheel(pixels)) => {
                assert_eq!(lines.delta, -2.0);
                assert_eq!(pixels.delta, 0.5);
            }
            other => panic!("Expected two MouseWheel events, got {:?}", other),
        }
    }

    #[test]
    fn wheel_event_through_window_event() {
        let mut translator = WinitTranslator::new();
        let event = WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::LineDelta(0.0, 1.0),
            phase: TouchPhase::Moved,
        };

        match translator.translate_window_event(&event, CLIENT) {
            EventData::MouseWheel(data) => assert_eq!(data.delta, 1.0),
            other => panic!("Expected MouseWheel, got {:?}", other),
        }
    }

    #[test]
    fn cursor_moves_track_delta_and_clamp() {
        let mut translator = WinitTranslator::new();

        let first = translator.translate_window_event(&cursor_moved(100.4, 50.0), CLIENT);
        let second = translator.translate_window_event(&cursor_moved(900.0, 40.0), CLIENT);

        match (first, second) {
            (EventData::MouseMove(first), EventData::MouseMove(second)) => {
                assert_eq!((first.x, first.y), (100, 50));
                assert_eq!(second.x, OUTSIDE_CLIENT);
                assert_eq!(second.y, 40);
                assert_eq!((second.delta_x, second.delta_y), (800, -10));
            }
            other => panic!("Expected two MouseMove events, got {:?}", other),
        }
    }

    #[test]
    fn raw_motion_becomes_mouse_raw() {
        let translator = WinitTranslator::new();

        let data = translator.translate_device_event(&DeviceEvent::MouseMotion { delta: (3.0, -4.6) });
        assert_eq!(data, EventData::MouseRaw(MouseRawData { delta_x: 3, delta_y: -5 }));

        let other = translator.translate_device_event(&DeviceEvent::Added);
        assert_eq!(other, EventData::None);
    }

    //=====================================================================
    // Window Lifecycle
    //=====================================================================

    #[test]
    fn lifecycle_events_are_markers() {
        let mut translator = WinitTranslator::new();

        let cases = [
            (WindowEvent::CloseRequested, EventData::Close),
            (WindowEvent::RedrawRequested, EventData::Paint),
            (WindowEvent::Destroyed, EventData::None),
            (WindowEvent::Focused(true), EventData::Focus(FocusData { focused: true })),
            (WindowEvent::Focused(false), EventData::Focus(FocusData { focused: false })),
        ];

        for (event, expected) in cases {
            assert_eq!(translator.translate_window_event(&event, CLIENT), expected);
        }
    }

    #[test]
    fn resized_is_not_interactive() {
        let mut translator = WinitTranslator::new();
        let event = WindowEvent::Resized(PhysicalSize::new(1024, 768));

        assert_eq!(
            translator.translate_window_event(&event, CLIENT),
            EventData::Resize(ResizeData { width: 1024, height: 768, resizing: false })
        );
    }
}
