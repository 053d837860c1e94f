use retroframe_sys as sys;

use crate::host::{Host, MouseButton};
use crate::keymap::{self, JOYPAD_BUTTONS};

/// Full-scale magnitude of libretro pointer coordinates.
pub const POINTER_RANGE: f32 = 0x7fff as f32;

/// Answers `retro_input_state_t` queries from host input state.
///
/// Mouse motion is reported relative to the previous poll, so the last two
/// cursor positions are kept here.
#[derive(Debug, Default)]
pub struct InputState {
    mouse: (f32, f32),
    last_mouse: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called from `retro_input_poll_t`.
    pub fn poll(&mut self, host: &dyn Host) {
        self.last_mouse = self.mouse;
        self.mouse = host.mouse_position();
    }

    /// Value for one (port, device, index, id) query. Anything without a
    /// mapping reads as 0.
    pub fn state(&self, host: &dyn Host, port: u32, device: u32, index: u32, id: u32) -> i16 {
        match device & sys::RETRO_DEVICE_MASK {
            sys::RETRO_DEVICE_JOYPAD => joypad(host, port, id),
            sys::RETRO_DEVICE_MOUSE => self.mouse(host, id),
            sys::RETRO_DEVICE_KEYBOARD => keymap::retro_key_to_key(id)
                .map_or(0, |key| i16::from(host.key_down(key))),
            sys::RETRO_DEVICE_POINTER if index == 0 => self.pointer(host, id),
            _ => 0,
        }
    }

    fn mouse(&self, host: &dyn Host, id: u32) -> i16 {
        match id {
            sys::RETRO_DEVICE_ID_MOUSE_X => delta(self.mouse.0, self.last_mouse.0),
            sys::RETRO_DEVICE_ID_MOUSE_Y => delta(self.mouse.1, self.last_mouse.1),
            sys::RETRO_DEVICE_ID_MOUSE_LEFT => i16::from(host.mouse_button_down(MouseButton::Left)),
            sys::RETRO_DEVICE_ID_MOUSE_RIGHT => {
                i16::from(host.mouse_button_down(MouseButton::Right))
            }
            sys::RETRO_DEVICE_ID_MOUSE_MIDDLE => {
                i16::from(host.mouse_button_down(MouseButton::Middle))
            }
            sys::RETRO_DEVICE_ID_MOUSE_WHEELUP => i16::from(host.mouse_wheel_move() > 0.0),
            sys::RETRO_DEVICE_ID_MOUSE_WHEELDOWN => i16::from(host.mouse_wheel_move() < 0.0),
            _ => 0,
        }
    }

    fn pointer(&self, host: &dyn Host, id: u32) -> i16 {
        let (width, height) = host.screen_size();
        match id {
            sys::RETRO_DEVICE_ID_POINTER_X => normalize(self.mouse.0, width),
            sys::RETRO_DEVICE_ID_POINTER_Y => normalize(self.mouse.1, height),
            sys::RETRO_DEVICE_ID_POINTER_PRESSED | sys::RETRO_DEVICE_ID_POINTER_COUNT => {
                i16::from(host.mouse_button_down(MouseButton::Left))
            }
            _ => 0,
        }
    }
}

fn joypad(host: &dyn Host, port: u32, id: u32) -> i16 {
    if id == sys::RETRO_DEVICE_ID_JOYPAD_MASK {
        return JOYPAD_BUTTONS
            .iter()
            .enumerate()
            .filter(|&(_, &button)| joypad_button(host, port, button))
            .fold(0u16, |mask, (bit, _)| mask | (1u16 << bit)) as i16;
    }
    i16::from(joypad_button(host, port, id))
}

/// Port 0 reads the keyboard; port N reads gamepad N - 1.
fn joypad_button(host: &dyn Host, port: u32, id: u32) -> bool {
    if port == 0 {
        keymap::joypad_to_retro_key(id)
            .and_then(keymap::retro_key_to_key)
            .is_some_and(|key| host.key_down(key))
    } else {
        keymap::joypad_to_gamepad(id).is_some_and(|button| host.gamepad_button_down(port - 1, button))
    }
}

fn delta(current: f32, last: f32) -> i16 {
    (current - last).round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// Maps a window coordinate onto `[-0x7fff, 0x7fff]` across the screen.
fn normalize(position: f32, extent: u32) -> i16 {
    if extent == 0 {
        return 0;
    }
    let unit = (position / extent as f32).clamp(0.0, 1.0);
    ((unit * 2.0 - 1.0) * POINTER_RANGE).round() as i16
}
