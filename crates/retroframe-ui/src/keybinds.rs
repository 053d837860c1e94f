use log::warn;
use retroframe_core::Key;
use winit::keyboard::KeyCode;

use crate::config::HotkeyConfig;

/// Frontend actions bound to keys. The key still reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hotkey {
    SaveState,
    LoadState,
    ToggleFullscreen,
    Quit,
}

#[derive(Debug, Clone)]
pub struct Hotkeys {
    bindings: Vec<(Key, Hotkey)>,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self::from_config(&HotkeyConfig::default())
    }
}

impl Hotkeys {
    pub fn from_config(config: &HotkeyConfig) -> Self {
        let defaults = HotkeyConfig::default();
        let mut bindings = Vec::new();
        for (name, fallback, hotkey) in [
            (&config.save_state, &defaults.save_state, Hotkey::SaveState),
            (&config.load_state, &defaults.load_state, Hotkey::LoadState),
            (&config.fullscreen, &defaults.fullscreen, Hotkey::ToggleFullscreen),
            (&config.quit, &defaults.quit, Hotkey::Quit),
        ] {
            let key = parse_key(name).or_else(|| {
                warn!("Unknown key '{name}' for {hotkey:?}; using {fallback}");
                parse_key(fallback)
            });
            if let Some(key) = key {
                bindings.push((key, hotkey));
            }
        }
        Self { bindings }
    }

    pub fn action(&self, key: Key) -> Option<Hotkey> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|&(_, hotkey)| hotkey)
    }
}

const KEY_NAMES: &[(&str, Key)] = &[
    ("A", Key::A),
    ("B", Key::B),
    ("C", Key::C),
    ("D", Key::D),
    ("E", Key::E),
    ("F", Key::F),
    ("G", Key::G),
    ("H", Key::H),
    ("I", Key::I),
    ("J", Key::J),
    ("K", Key::K),
    ("L", Key::L),
    ("M", Key::M),
    ("N", Key::N),
    ("O", Key::O),
    ("P", Key::P),
    ("Q", Key::Q),
    ("R", Key::R),
    ("S", Key::S),
    ("T", Key::T),
    ("U", Key::U),
    ("V", Key::V),
    ("W", Key::W),
    ("X", Key::X),
    ("Y", Key::Y),
    ("Z", Key::Z),
    ("0", Key::Digit0),
    ("1", Key::Digit1),
    ("2", Key::Digit2),
    ("3", Key::Digit3),
    ("4", Key::Digit4),
    ("5", Key::Digit5),
    ("6", Key::Digit6),
    ("7", Key::Digit7),
    ("8", Key::Digit8),
    ("9", Key::Digit9),
    ("F1", Key::F1),
    ("F2", Key::F2),
    ("F3", Key::F3),
    ("F4", Key::F4),
    ("F5", Key::F5),
    ("F6", Key::F6),
    ("F7", Key::F7),
    ("F8", Key::F8),
    ("F9", Key::F9),
    ("F10", Key::F10),
    ("F11", Key::F11),
    ("F12", Key::F12),
    ("Escape", Key::Escape),
    ("Space", Key::Space),
    ("Enter", Key::Enter),
    ("Tab", Key::Tab),
    ("Backspace", Key::Backspace),
    ("Insert", Key::Insert),
    ("Delete", Key::Delete),
    ("Home", Key::Home),
    ("End", Key::End),
    ("PageUp", Key::PageUp),
    ("PageDown", Key::PageDown),
    ("Up", Key::Up),
    ("Down", Key::Down),
    ("Left", Key::Left),
    ("Right", Key::Right),
    ("Pause", Key::Pause),
];

/// Key for a config name such as `"F5"` or `"escape"`. Case-insensitive.
pub fn parse_key(name: &str) -> Option<Key> {
    let name = name.trim();
    KEY_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, key)| key)
}

/// Physical winit key to the key the bridge asks about.
pub fn key_from_code(code: KeyCode) -> Option<Key> {
    use KeyCode as C;
    let key = match code {
        C::Quote => Key::Apostrophe,
        C::Comma => Key::Comma,
        C::Minus => Key::Minus,
        C::Period => Key::Period,
        C::Slash => Key::Slash,
        C::Digit0 => Key::Digit0,
        C::Digit1 => Key::Digit1,
        C::Digit2 => Key::Digit2,
        C::Digit3 => Key::Digit3,
        C::Digit4 => Key::Digit4,
        C::Digit5 => Key::Digit5,
        C::Digit6 => Key::Digit6,
        C::Digit7 => Key::Digit7,
        C::Digit8 => Key::Digit8,
        C::Digit9 => Key::Digit9,
        C::Semicolon => Key::Semicolon,
        C::Equal => Key::Equal,
        C::KeyA => Key::A,
        C::KeyB => Key::B,
        C::KeyC => Key::C,
        C::KeyD => Key::D,
        C::KeyE => Key::E,
        C::KeyF => Key::F,
        C::KeyG => Key::G,
        C::KeyH => Key::H,
        C::KeyI => Key::I,
        C::KeyJ => Key::J,
        C::KeyK => Key::K,
        C::KeyL => Key::L,
        C::KeyM => Key::M,
        C::KeyN => Key::N,
        C::KeyO => Key::O,
        C::KeyP => Key::P,
        C::KeyQ => Key::Q,
        C::KeyR => Key::R,
        C::KeyS => Key::S,
        C::KeyT => Key::T,
        C::KeyU => Key::U,
        C::KeyV => Key::V,
        C::KeyW => Key::W,
        C::KeyX => Key::X,
        C::KeyY => Key::Y,
        C::KeyZ => Key::Z,
        C::BracketLeft => Key::LeftBracket,
        C::Backslash => Key::Backslash,
        C::BracketRight => Key::RightBracket,
        C::Backquote => Key::Grave,
        C::Space => Key::Space,
        C::Escape => Key::Escape,
        C::Enter => Key::Enter,
        C::Tab => Key::Tab,
        C::Backspace => Key::Backspace,
        C::Insert => Key::Insert,
        C::Delete => Key::Delete,
        C::ArrowRight => Key::Right,
        C::ArrowLeft => Key::Left,
        C::ArrowDown => Key::Down,
        C::ArrowUp => Key::Up,
        C::PageUp => Key::PageUp,
        C::PageDown => Key::PageDown,
        C::Home => Key::Home,
        C::End => Key::End,
        C::CapsLock => Key::CapsLock,
        C::ScrollLock => Key::ScrollLock,
        C::NumLock => Key::NumLock,
        C::PrintScreen => Key::PrintScreen,
        C::Pause => Key::Pause,
        C::F1 => Key::F1,
        C::F2 => Key::F2,
        C::F3 => Key::F3,
        C::F4 => Key::F4,
        C::F5 => Key::F5,
        C::F6 => Key::F6,
        C::F7 => Key::F7,
        C::F8 => Key::F8,
        C::F9 => Key::F9,
        C::F10 => Key::F10,
        C::F11 => Key::F11,
        C::F12 => Key::F12,
        C::ShiftLeft => Key::LeftShift,
        C::ControlLeft => Key::LeftControl,
        C::AltLeft => Key::LeftAlt,
        C::SuperLeft => Key::LeftSuper,
        C::ShiftRight => Key::RightShift,
        C::ControlRight => Key::RightControl,
        C::AltRight => Key::RightAlt,
        C::SuperRight => Key::RightSuper,
        C::ContextMenu => Key::Menu,
        C::Numpad0 => Key::Kp0,
        C::Numpad1 => Key::Kp1,
        C::Numpad2 => Key::Kp2,
        C::Numpad3 => Key::Kp3,
        C::Numpad4 => Key::Kp4,
        C::Numpad5 => Key::Kp5,
        C::Numpad6 => Key::Kp6,
        C::Numpad7 => Key::Kp7,
        C::Numpad8 => Key::Kp8,
        C::Numpad9 => Key::Kp9,
        C::NumpadDecimal => Key::KpDecimal,
        C::NumpadDivide => Key::KpDivide,
        C::NumpadMultiply => Key::KpMultiply,
        C::NumpadSubtract => Key::KpSubtract,
        C::NumpadAdd => Key::KpAdd,
        C::NumpadEnter => Key::KpEnter,
        C::NumpadEqual => Key::KpEqual,
        _ => return None,
    };
    Some(key)
}
