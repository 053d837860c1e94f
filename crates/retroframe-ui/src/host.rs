use gilrs::{Button, Gilrs};
use log::{debug, warn};
use retroframe_core::{
    AudioStreamId, GamepadButton, Host, Key, MouseButton, TextureFormat, TextureId,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::audio::AudioOutput;

/// A core texture expanded to RGBA8 for `pixels`.
pub struct Texture {
    pub width: u32,
    pub height: u32,
    format: TextureFormat,
    pub rgba: Vec<u8>,
}

/// RGB565 to RGBA8 with the low bits filled from the high ones.
pub fn expand_rgb565(src: &[u8], dst: &mut [u8]) {
    for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(2)) {
        let px = u16::from_ne_bytes([px[0], px[1]]);
        let r = ((px >> 11) & 0x1f) as u8;
        let g = ((px >> 5) & 0x3f) as u8;
        let b = (px & 0x1f) as u8;
        out[0] = (r << 3) | (r >> 2);
        out[1] = (g << 2) | (g >> 4);
        out[2] = (b << 3) | (b >> 2);
        out[3] = 0xff;
    }
}

/// Window-side state the bridge reads through [`WindowHost`] and the event
/// loop writes to.
pub struct WindowState {
    next_id: u64,
    textures: HashMap<TextureId, Texture>,
    /// Most recently updated texture; this is what gets presented.
    pub presented: Option<TextureId>,
    audio: HashMap<AudioStreamId, AudioOutput>,
    audio_enabled: bool,
    audio_latency_frames: usize,

    keys_down: HashSet<Key>,
    keys_pressed: HashSet<Key>,
    keys_released: HashSet<Key>,
    mouse: (f32, f32),
    mouse_buttons: HashSet<MouseButton>,
    wheel: f32,
    gilrs: Option<Gilrs>,

    pub screen: (u32, u32),
    pub refresh_rate: f32,
}

impl WindowState {
    pub fn new(audio_enabled: bool, audio_latency_frames: usize) -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                warn!("Gamepad support unavailable: {e}");
                None
            }
        };
        Self {
            next_id: 1,
            textures: HashMap::new(),
            presented: None,
            audio: HashMap::new(),
            audio_enabled,
            audio_latency_frames,
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            mouse: (0.0, 0.0),
            mouse_buttons: HashSet::new(),
            wheel: 0.0,
            gilrs,
            screen: (0, 0),
            refresh_rate: 60.0,
        }
    }

    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(&id)
    }

    pub fn key_event(&mut self, key: Key, down: bool) {
        if down {
            if self.keys_down.insert(key) {
                self.keys_pressed.insert(key);
            }
        } else if self.keys_down.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    pub fn mouse_moved(&mut self, x: f32, y: f32) {
        self.mouse = (x, y);
    }

    pub fn mouse_button(&mut self, button: MouseButton, down: bool) {
        if down {
            self.mouse_buttons.insert(button);
        } else {
            self.mouse_buttons.remove(&button);
        }
    }

    pub fn wheel_moved(&mut self, lines: f32) {
        self.wheel += lines;
    }

    /// Drops held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        for key in self.keys_down.drain() {
            self.keys_released.insert(key);
        }
        self.mouse_buttons.clear();
    }

    /// Drains gamepad events so button state is current.
    pub fn poll_gamepads(&mut self) {
        if let Some(gilrs) = self.gilrs.as_mut() {
            while let Some(event) = gilrs.next_event() {
                debug!("Gamepad {:?}: {:?}", event.id, event.event);
            }
        }
    }

    /// Clears per-frame edges once the core has seen them.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.wheel = 0.0;
    }
}

fn gilrs_button(button: GamepadButton) -> Button {
    match button {
        GamepadButton::LeftFaceUp => Button::DPadUp,
        GamepadButton::LeftFaceRight => Button::DPadRight,
        GamepadButton::LeftFaceDown => Button::DPadDown,
        GamepadButton::LeftFaceLeft => Button::DPadLeft,
        GamepadButton::RightFaceUp => Button::North,
        GamepadButton::RightFaceRight => Button::East,
        GamepadButton::RightFaceDown => Button::South,
        GamepadButton::RightFaceLeft => Button::West,
        GamepadButton::LeftTrigger1 => Button::LeftTrigger,
        GamepadButton::LeftTrigger2 => Button::LeftTrigger2,
        GamepadButton::RightTrigger1 => Button::RightTrigger,
        GamepadButton::RightTrigger2 => Button::RightTrigger2,
        GamepadButton::MiddleLeft => Button::Select,
        GamepadButton::MiddleRight => Button::Start,
        GamepadButton::LeftThumb => Button::LeftThumb,
        GamepadButton::RightThumb => Button::RightThumb,
    }
}

/// [`Host`] backed by the window's [`WindowState`].
pub struct WindowHost {
    state: Rc<RefCell<WindowState>>,
}

impl WindowHost {
    pub fn new(state: Rc<RefCell<WindowState>>) -> Self {
        Self { state }
    }
}

impl Host for WindowHost {
    fn create_texture(&mut self, width: u32, height: u32, format: TextureFormat) -> TextureId {
        let mut state = self.state.borrow_mut();
        let id = TextureId(state.next_id);
        state.next_id += 1;
        state.textures.insert(
            id,
            Texture {
                width,
                height,
                format,
                rgba: vec![0; width as usize * height as usize * 4],
            },
        );
        id
    }

    fn update_texture(&mut self, texture: TextureId, pixels: &[u8]) {
        let mut state = self.state.borrow_mut();
        let Some(target) = state.textures.get_mut(&texture) else {
            return;
        };
        match target.format {
            TextureFormat::Rgba8888 => {
                let len = target.rgba.len().min(pixels.len());
                target.rgba[..len].copy_from_slice(&pixels[..len]);
            }
            TextureFormat::Rgb565 => expand_rgb565(pixels, &mut target.rgba),
        }
        state.presented = Some(texture);
    }

    fn release_texture(&mut self, texture: TextureId) {
        let mut state = self.state.borrow_mut();
        state.textures.remove(&texture);
        if state.presented == Some(texture) {
            state.presented = None;
        }
    }

    fn open_audio_stream(&mut self, sample_rate: u32, channels: u16) -> Option<AudioStreamId> {
        let mut state = self.state.borrow_mut();
        if !state.audio_enabled || channels != 2 {
            return None;
        }
        let output = AudioOutput::start(sample_rate, state.audio_latency_frames)?;
        let id = AudioStreamId(state.next_id);
        state.next_id += 1;
        state.audio.insert(id, output);
        Some(id)
    }

    fn audio_stream_processed(&self, stream: AudioStreamId) -> bool {
        self.state
            .borrow()
            .audio
            .get(&stream)
            .is_some_and(AudioOutput::wants_more)
    }

    fn update_audio_stream(&mut self, stream: AudioStreamId, samples: &[i16]) {
        if let Some(output) = self.state.borrow().audio.get(&stream) {
            output.queue(samples);
        }
    }

    fn close_audio_stream(&mut self, stream: AudioStreamId) {
        self.state.borrow_mut().audio.remove(&stream);
    }

    fn key_down(&self, key: Key) -> bool {
        self.state.borrow().keys_down.contains(&key)
    }

    fn key_pressed(&self, key: Key) -> bool {
        self.state.borrow().keys_pressed.contains(&key)
    }

    fn key_released(&self, key: Key) -> bool {
        self.state.borrow().keys_released.contains(&key)
    }

    fn mouse_position(&self) -> (f32, f32) {
        self.state.borrow().mouse
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.state.borrow().mouse_buttons.contains(&button)
    }

    fn mouse_wheel_move(&self) -> f32 {
        self.state.borrow().wheel
    }

    fn gamepad_button_down(&self, gamepad: u32, button: GamepadButton) -> bool {
        let state = self.state.borrow();
        let Some(gilrs) = state.gilrs.as_ref() else {
            return false;
        };
        gilrs
            .gamepads()
            .nth(gamepad as usize)
            .is_some_and(|(_, pad)| pad.is_pressed(gilrs_button(button)))
    }

    fn screen_size(&self) -> (u32, u32) {
        self.state.borrow().screen
    }

    fn monitor_refresh_rate(&self) -> f32 {
        self.state.borrow().refresh_rate
    }
}

/// Host for `--frames` runs: no window, no audio device, no input.
#[derive(Default)]
pub struct HeadlessHost {
    next_id: u64,
}

impl Host for HeadlessHost {
    fn create_texture(&mut self, _width: u32, _height: u32, _format: TextureFormat) -> TextureId {
        self.next_id += 1;
        TextureId(self.next_id)
    }

    fn update_texture(&mut self, _texture: TextureId, _pixels: &[u8]) {}

    fn release_texture(&mut self, _texture: TextureId) {}

    fn open_audio_stream(&mut self, _sample_rate: u32, _channels: u16) -> Option<AudioStreamId> {
        None
    }

    fn audio_stream_processed(&self, _stream: AudioStreamId) -> bool {
        false
    }

    fn update_audio_stream(&mut self, _stream: AudioStreamId, _samples: &[i16]) {}

    fn close_audio_stream(&mut self, _stream: AudioStreamId) {}

    fn key_down(&self, _key: Key) -> bool {
        false
    }

    fn key_pressed(&self, _key: Key) -> bool {
        false
    }

    fn key_released(&self, _key: Key) -> bool {
        false
    }

    fn mouse_position(&self) -> (f32, f32) {
        (0.0, 0.0)
    }

    fn mouse_button_down(&self, _button: MouseButton) -> bool {
        false
    }

    fn mouse_wheel_move(&self) -> f32 {
        0.0
    }

    fn gamepad_button_down(&self, _gamepad: u32, _button: GamepadButton) -> bool {
        false
    }

    fn screen_size(&self) -> (u32, u32) {
        (0, 0)
    }
}
