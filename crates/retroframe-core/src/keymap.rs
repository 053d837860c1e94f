use retroframe_sys as sys;

use crate::host::GamepadButton;

/// Physical keyboard keys the bridge can ask the host about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Semicolon,
    Equal,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    LeftBracket,
    Backslash,
    RightBracket,
    Grave,
    Space,
    Escape,
    Enter,
    Tab,
    Backspace,
    Insert,
    Delete,
    Right,
    Left,
    Down,
    Up,
    PageUp,
    PageDown,
    Home,
    End,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    LeftShift,
    LeftControl,
    LeftAlt,
    LeftSuper,
    RightShift,
    RightControl,
    RightAlt,
    RightSuper,
    Menu,
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpDecimal,
    KpDivide,
    KpMultiply,
    KpSubtract,
    KpAdd,
    KpEnter,
    KpEqual,
}

/// The 16 joypad button ids in bitmask order.
pub const JOYPAD_BUTTONS: [u32; 16] = [
    sys::RETRO_DEVICE_ID_JOYPAD_B,
    sys::RETRO_DEVICE_ID_JOYPAD_Y,
    sys::RETRO_DEVICE_ID_JOYPAD_SELECT,
    sys::RETRO_DEVICE_ID_JOYPAD_START,
    sys::RETRO_DEVICE_ID_JOYPAD_UP,
    sys::RETRO_DEVICE_ID_JOYPAD_DOWN,
    sys::RETRO_DEVICE_ID_JOYPAD_LEFT,
    sys::RETRO_DEVICE_ID_JOYPAD_RIGHT,
    sys::RETRO_DEVICE_ID_JOYPAD_A,
    sys::RETRO_DEVICE_ID_JOYPAD_X,
    sys::RETRO_DEVICE_ID_JOYPAD_L,
    sys::RETRO_DEVICE_ID_JOYPAD_R,
    sys::RETRO_DEVICE_ID_JOYPAD_L2,
    sys::RETRO_DEVICE_ID_JOYPAD_R2,
    sys::RETRO_DEVICE_ID_JOYPAD_L3,
    sys::RETRO_DEVICE_ID_JOYPAD_R3,
];

/// Keyboard code standing in for a joypad button on port 0.
pub fn joypad_to_retro_key(id: u32) -> Option<u32> {
    let key = match id {
        sys::RETRO_DEVICE_ID_JOYPAD_B => sys::RETROK_z,
        sys::RETRO_DEVICE_ID_JOYPAD_Y => sys::RETROK_a,
        sys::RETRO_DEVICE_ID_JOYPAD_SELECT => sys::RETROK_RSHIFT,
        sys::RETRO_DEVICE_ID_JOYPAD_START => sys::RETROK_RETURN,
        sys::RETRO_DEVICE_ID_JOYPAD_UP => sys::RETROK_UP,
        sys::RETRO_DEVICE_ID_JOYPAD_DOWN => sys::RETROK_DOWN,
        sys::RETRO_DEVICE_ID_JOYPAD_LEFT => sys::RETROK_LEFT,
        sys::RETRO_DEVICE_ID_JOYPAD_RIGHT => sys::RETROK_RIGHT,
        sys::RETRO_DEVICE_ID_JOYPAD_A => sys::RETROK_x,
        sys::RETRO_DEVICE_ID_JOYPAD_X => sys::RETROK_s,
        sys::RETRO_DEVICE_ID_JOYPAD_L => sys::RETROK_q,
        sys::RETRO_DEVICE_ID_JOYPAD_R => sys::RETROK_w,
        sys::RETRO_DEVICE_ID_JOYPAD_L2 => sys::RETROK_e,
        sys::RETRO_DEVICE_ID_JOYPAD_R2 => sys::RETROK_r,
        sys::RETRO_DEVICE_ID_JOYPAD_L3 => sys::RETROK_d,
        sys::RETRO_DEVICE_ID_JOYPAD_R3 => sys::RETROK_f,
        _ => return None,
    };
    Some(key)
}

/// Physical gamepad button for a joypad id on ports 1 and up.
pub fn joypad_to_gamepad(id: u32) -> Option<GamepadButton> {
    let button = match id {
        sys::RETRO_DEVICE_ID_JOYPAD_B => GamepadButton::RightFaceDown,
        sys::RETRO_DEVICE_ID_JOYPAD_Y => GamepadButton::RightFaceLeft,
        sys::RETRO_DEVICE_ID_JOYPAD_SELECT => GamepadButton::MiddleLeft,
        sys::RETRO_DEVICE_ID_JOYPAD_START => GamepadButton::MiddleRight,
        sys::RETRO_DEVICE_ID_JOYPAD_UP => GamepadButton::LeftFaceUp,
        sys::RETRO_DEVICE_ID_JOYPAD_DOWN => GamepadButton::LeftFaceDown,
        sys::RETRO_DEVICE_ID_JOYPAD_LEFT => GamepadButton::LeftFaceLeft,
        sys::RETRO_DEVICE_ID_JOYPAD_RIGHT => GamepadButton::LeftFaceRight,
        sys::RETRO_DEVICE_ID_JOYPAD_A => GamepadButton::RightFaceRight,
        sys::RETRO_DEVICE_ID_JOYPAD_X => GamepadButton::RightFaceUp,
        sys::RETRO_DEVICE_ID_JOYPAD_L => GamepadButton::LeftTrigger1,
        sys::RETRO_DEVICE_ID_JOYPAD_R => GamepadButton::RightTrigger1,
        sys::RETRO_DEVICE_ID_JOYPAD_L2 => GamepadButton::LeftTrigger2,
        sys::RETRO_DEVICE_ID_JOYPAD_R2 => GamepadButton::RightTrigger2,
        sys::RETRO_DEVICE_ID_JOYPAD_L3 => GamepadButton::LeftThumb,
        sys::RETRO_DEVICE_ID_JOYPAD_R3 => GamepadButton::RightThumb,
        _ => return None,
    };
    Some(button)
}

/// Host key for a libretro keyboard code.
///
/// Shifted symbols share the key that produces them where the layout is
/// unambiguous (`!` is `1`, `?` is `/`, `_` is `-`, `~` is the grave key).
/// Codes with no physical counterpart map to `None`.
pub fn retro_key_to_key(code: u32) -> Option<Key> {
    use Key::*;

    let key = match code {
        sys::RETROK_BACKSPACE => Backspace,
        sys::RETROK_TAB => Tab,
        sys::RETROK_CLEAR | sys::RETROK_PAUSE => Pause,
        sys::RETROK_RETURN => Enter,
        sys::RETROK_ESCAPE => Escape,
        sys::RETROK_SPACE => Space,
        sys::RETROK_EXCLAIM => Digit1,
        sys::RETROK_QUOTE => Apostrophe,
        sys::RETROK_COMMA => Comma,
        sys::RETROK_MINUS | sys::RETROK_UNDERSCORE => Minus,
        sys::RETROK_PERIOD => Period,
        sys::RETROK_SLASH | sys::RETROK_QUESTION => Slash,
        sys::RETROK_0 => Digit0,
        sys::RETROK_1 => Digit1,
        sys::RETROK_2 => Digit2,
        sys::RETROK_3 => Digit3,
        sys::RETROK_4 => Digit4,
        sys::RETROK_5 => Digit5,
        sys::RETROK_6 => Digit6,
        sys::RETROK_7 => Digit7,
        sys::RETROK_8 => Digit8,
        sys::RETROK_9 => Digit9,
        sys::RETROK_SEMICOLON => Semicolon,
        sys::RETROK_EQUALS => Equal,
        sys::RETROK_LEFTBRACKET => LeftBracket,
        sys::RETROK_BACKSLASH => Backslash,
        sys::RETROK_RIGHTBRACKET => RightBracket,
        sys::RETROK_BACKQUOTE | sys::RETROK_TILDE => Grave,
        sys::RETROK_a => A,
        sys::RETROK_b => B,
        sys::RETROK_c => C,
        sys::RETROK_d => D,
        sys::RETROK_e => E,
        sys::RETROK_f => F,
        sys::RETROK_g => G,
        sys::RETROK_h => H,
        sys::RETROK_i => I,
        sys::RETROK_j => J,
        sys::RETROK_k => K,
        sys::RETROK_l => L,
        sys::RETROK_m => M,
        sys::RETROK_n => N,
        sys::RETROK_o => O,
        sys::RETROK_p => P,
        sys::RETROK_q => Q,
        sys::RETROK_r => R,
        sys::RETROK_s => S,
        sys::RETROK_t => T,
        sys::RETROK_u => U,
        sys::RETROK_v => V,
        sys::RETROK_w => W,
        sys::RETROK_x => X,
        sys::RETROK_y => Y,
        sys::RETROK_z => Z,
        sys::RETROK_DELETE => Delete,
        sys::RETROK_KP0 => Kp0,
        sys::RETROK_KP1 => Kp1,
        sys::RETROK_KP2 => Kp2,
        sys::RETROK_KP3 => Kp3,
        sys::RETROK_KP4 => Kp4,
        sys::RETROK_KP5 => Kp5,
        sys::RETROK_KP6 => Kp6,
        sys::RETROK_KP7 => Kp7,
        sys::RETROK_KP8 => Kp8,
        sys::RETROK_KP9 => Kp9,
        sys::RETROK_KP_PERIOD => KpDecimal,
        sys::RETROK_KP_DIVIDE => KpDivide,
        sys::RETROK_KP_MULTIPLY => KpMultiply,
        sys::RETROK_KP_MINUS => KpSubtract,
        sys::RETROK_KP_PLUS => KpAdd,
        sys::RETROK_KP_ENTER => KpEnter,
        sys::RETROK_KP_EQUALS => KpEqual,
        sys::RETROK_UP => Up,
        sys::RETROK_DOWN => Down,
        sys::RETROK_RIGHT => Right,
        sys::RETROK_LEFT => Left,
        sys::RETROK_INSERT => Insert,
        sys::RETROK_HOME => Home,
        sys::RETROK_END => End,
        sys::RETROK_PAGEUP => PageUp,
        sys::RETROK_PAGEDOWN => PageDown,
        sys::RETROK_F1 => F1,
        sys::RETROK_F2 => F2,
        sys::RETROK_F3 => F3,
        sys::RETROK_F4 => F4,
        sys::RETROK_F5 => F5,
        sys::RETROK_F6 => F6,
        sys::RETROK_F7 => F7,
        sys::RETROK_F8 => F8,
        sys::RETROK_F9 => F9,
        sys::RETROK_F10 => F10,
        sys::RETROK_F11 => F11,
        sys::RETROK_F12 => F12,
        sys::RETROK_NUMLOCK => NumLock,
        sys::RETROK_CAPSLOCK => CapsLock,
        sys::RETROK_SCROLLOCK => ScrollLock,
        sys::RETROK_RSHIFT => RightShift,
        sys::RETROK_LSHIFT => LeftShift,
        sys::RETROK_RCTRL => RightControl,
        sys::RETROK_LCTRL => LeftControl,
        sys::RETROK_RALT => RightAlt,
        sys::RETROK_LALT => LeftAlt,
        sys::RETROK_RMETA | sys::RETROK_RSUPER => RightSuper,
        sys::RETROK_LMETA | sys::RETROK_LSUPER => LeftSuper,
        sys::RETROK_PRINT => PrintScreen,
        sys::RETROK_MENU => Menu,
        _ => return None,
    };
    Some(key)
}

/// Codes that share a host key with another code. Keyboard events for a key
/// are sent under its main code only.
pub fn is_alias_code(code: u32) -> bool {
    matches!(
        code,
        sys::RETROK_CLEAR
            | sys::RETROK_EXCLAIM
            | sys::RETROK_UNDERSCORE
            | sys::RETROK_QUESTION
            | sys::RETROK_TILDE
            | sys::RETROK_LMETA
            | sys::RETROK_RMETA
    )
}

/// `RETROKMOD_*` bits for the modifier keys currently held.
pub fn modifier_mask(key_down: impl Fn(Key) -> bool) -> u16 {
    let mut mods = sys::RETROKMOD_NONE;
    if key_down(Key::LeftShift) || key_down(Key::RightShift) {
        mods |= sys::RETROKMOD_SHIFT;
    }
    if key_down(Key::LeftControl) || key_down(Key::RightControl) {
        mods |= sys::RETROKMOD_CTRL;
    }
    if key_down(Key::LeftAlt) || key_down(Key::RightAlt) {
        mods |= sys::RETROKMOD_ALT;
    }
    mods
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_zero_layout_matches_the_classic_keyboard_mapping() {
        let keys: Vec<_> = JOYPAD_BUTTONS
            .iter()
            .map(|&id| joypad_to_retro_key(id).and_then(retro_key_to_key))
            .collect();
        use Key::*;
        assert_eq!(
            keys,
            [
                Some(Z),
                Some(A),
                Some(RightShift),
                Some(Enter),
                Some(Up),
                Some(Down),
                Some(Left),
                Some(Right),
                Some(X),
                Some(S),
                Some(Q),
                Some(W),
                Some(E),
                Some(R),
                Some(D),
                Some(F),
            ]
        );
    }

    #[test]
    fn each_key_has_exactly_one_main_code() {
        let mut seen = std::collections::HashMap::new();
        for code in sys::RETROK_FIRST..sys::RETROK_LAST {
            if is_alias_code(code) {
                assert!(retro_key_to_key(code).is_some(), "alias {code} is unmapped");
                continue;
            }
            if let Some(key) = retro_key_to_key(code) {
                assert_eq!(seen.insert(key, code), None, "{key:?} has two main codes");
            }
        }
        assert_eq!(seen.get(&Key::Digit1), Some(&sys::RETROK_1));
        assert_eq!(seen.get(&Key::Pause), Some(&sys::RETROK_PAUSE));
        assert_eq!(seen.get(&Key::LeftSuper), Some(&sys::RETROK_LSUPER));
    }

    #[test]
    fn every_joypad_id_has_a_gamepad_button() {
        for id in JOYPAD_BUTTONS {
            assert!(joypad_to_gamepad(id).is_some(), "joypad id {id}");
        }
        assert_eq!(joypad_to_gamepad(16), None);
        assert_eq!(
            joypad_to_gamepad(sys::RETRO_DEVICE_ID_JOYPAD_B),
            Some(GamepadButton::RightFaceDown)
        );
        assert_eq!(
            joypad_to_gamepad(sys::RETRO_DEVICE_ID_JOYPAD_A),
            Some(GamepadButton::RightFaceRight)
        );
    }

    #[test]
    fn symbols_without_a_key_are_unmapped() {
        assert_eq!(retro_key_to_key(sys::RETROK_HASH), None);
        assert_eq!(retro_key_to_key(sys::RETROK_F13), None);
        assert_eq!(retro_key_to_key(sys::RETROK_UNKNOWN), None);
        assert_eq!(retro_key_to_key(sys::RETROK_EXCLAIM), Some(Key::Digit1));
        assert_eq!(retro_key_to_key(sys::RETROK_QUESTION), Some(Key::Slash));
        assert_eq!(retro_key_to_key(sys::RETROK_CLEAR), Some(Key::Pause));
    }

    #[test]
    fn modifiers_combine() {
        let held = [Key::RightShift, Key::LeftAlt];
        let mods = modifier_mask(|key| held.contains(&key));
        assert_eq!(mods, sys::RETROKMOD_SHIFT | sys::RETROKMOD_ALT);
        assert_eq!(modifier_mask(|_| false), sys::RETROKMOD_NONE);
    }
}
