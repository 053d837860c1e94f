use crate::keymap::Key;

/// Handle to a texture owned by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Handle to an audio stream owned by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AudioStreamId(pub u64);

/// Pixel layout of a host texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    /// 16-bit `RRRRRGGGGGGBBBBB`, native endian.
    Rgb565,
    /// 32-bit, bytes in `R, G, B, A` order.
    Rgba8888,
}

impl TextureFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgb565 => 2,
            TextureFormat::Rgba8888 => 4,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Positional gamepad buttons. "Right face down" is A on Xbox, Cross on
/// PlayStation, B on Nintendo.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    LeftFaceUp,
    LeftFaceRight,
    LeftFaceDown,
    LeftFaceLeft,
    RightFaceUp,
    RightFaceRight,
    RightFaceDown,
    RightFaceLeft,
    LeftTrigger1,
    LeftTrigger2,
    RightTrigger1,
    RightTrigger2,
    /// Select / Back / Share.
    MiddleLeft,
    /// Start / Menu / Options.
    MiddleRight,
    LeftThumb,
    RightThumb,
}

/// Services the bridge needs from the embedding frontend.
///
/// The bridge never touches a window, audio device or input device directly;
/// everything goes through this trait. Input queries describe the state as of
/// the host's most recent event poll. `key_pressed` / `key_released` report
/// edges since the previous frame.
pub trait Host {
    /// Allocates a texture. Its contents are unspecified until the first update.
    fn create_texture(&mut self, width: u32, height: u32, format: TextureFormat) -> TextureId;
    /// Replaces the whole texture with tightly packed pixels in its format.
    fn update_texture(&mut self, texture: TextureId, pixels: &[u8]);
    fn release_texture(&mut self, texture: TextureId);

    /// Opens a 16-bit interleaved stream. `None` means audio is unavailable.
    fn open_audio_stream(&mut self, sample_rate: u32, channels: u16) -> Option<AudioStreamId>;
    /// Whether the stream can take another batch without falling behind.
    fn audio_stream_processed(&self, stream: AudioStreamId) -> bool;
    fn update_audio_stream(&mut self, stream: AudioStreamId, samples: &[i16]);
    fn close_audio_stream(&mut self, stream: AudioStreamId);

    fn key_down(&self, key: Key) -> bool;
    fn key_pressed(&self, key: Key) -> bool;
    fn key_released(&self, key: Key) -> bool;

    /// Cursor position in window pixels.
    fn mouse_position(&self) -> (f32, f32);
    fn mouse_button_down(&self, button: MouseButton) -> bool;
    /// Vertical wheel movement since the previous frame. Positive is up.
    fn mouse_wheel_move(&self) -> f32;

    fn gamepad_button_down(&self, gamepad: u32, button: GamepadButton) -> bool;

    /// Drawable area in pixels.
    fn screen_size(&self) -> (u32, u32);
    fn monitor_refresh_rate(&self) -> f32 {
        60.0
    }
}
