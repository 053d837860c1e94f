use std::ffi::CStr;
use std::os::raw::{c_char, c_int};

use retroframe_sys as sys;

use crate::host::TextureFormat;

/// Longest string copied out of `retro_system_info`, in bytes.
pub const MAX_INFO_STRING: usize = 199;

/// Pixel layout of the frames a core hands to the video callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 0RGB1555. What a core gets until it negotiates something else.
    #[default]
    Rgb1555,
    Xrgb8888,
    Rgb565,
}

impl PixelFormat {
    pub fn from_raw(raw: c_int) -> Option<Self> {
        match raw {
            sys::RETRO_PIXEL_FORMAT_0RGB1555 => Some(PixelFormat::Rgb1555),
            sys::RETRO_PIXEL_FORMAT_XRGB8888 => Some(PixelFormat::Xrgb8888),
            sys::RETRO_PIXEL_FORMAT_RGB565 => Some(PixelFormat::Rgb565),
            _ => None,
        }
    }

    pub fn to_raw(self) -> c_int {
        match self {
            PixelFormat::Rgb1555 => sys::RETRO_PIXEL_FORMAT_0RGB1555,
            PixelFormat::Xrgb8888 => sys::RETRO_PIXEL_FORMAT_XRGB8888,
            PixelFormat::Rgb565 => sys::RETRO_PIXEL_FORMAT_RGB565,
        }
    }

    /// Bytes per source pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb1555 | PixelFormat::Rgb565 => 2,
            PixelFormat::Xrgb8888 => 4,
        }
    }

    /// Layout of the display surface fed from this source format.
    pub fn surface_format(self) -> TextureFormat {
        match self {
            PixelFormat::Rgb1555 | PixelFormat::Rgb565 => TextureFormat::Rgb565,
            PixelFormat::Xrgb8888 => TextureFormat::Rgba8888,
        }
    }
}

/// Static description of a loaded core.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemInfo {
    pub library_name: String,
    pub library_version: String,
    /// `|`-separated list, e.g. `"nes|fds|unf"`.
    pub valid_extensions: String,
    /// The core wants a path instead of an in-memory buffer.
    pub need_fullpath: bool,
    pub block_extract: bool,
}

impl SystemInfo {
    /// # Safety
    ///
    /// Every non-null string pointer in `raw` must point at a NUL-terminated string.
    pub(crate) unsafe fn from_raw(raw: &sys::retro_system_info) -> Self {
        unsafe {
            Self {
                library_name: copy_info_string(raw.library_name),
                library_version: copy_info_string(raw.library_version),
                valid_extensions: copy_info_string(raw.valid_extensions),
                need_fullpath: raw.need_fullpath,
                block_extract: raw.block_extract,
            }
        }
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.valid_extensions
            .split('|')
            .map(str::trim)
            .filter(|ext| !ext.is_empty())
    }
}

unsafe fn copy_info_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    let bytes = unsafe { CStr::from_ptr(ptr) }.to_bytes();
    let bytes = &bytes[..bytes.len().min(MAX_INFO_STRING)];
    String::from_utf8_lossy(bytes).into_owned()
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub base_width: u32,
    pub base_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    /// As reported by the core. Use [`Geometry::display_aspect`] for drawing.
    pub aspect_ratio: f32,
}

impl Geometry {
    /// Display aspect ratio, falling back to the base dimensions when the core
    /// leaves it unset.
    pub fn display_aspect(&self) -> f32 {
        if self.aspect_ratio > 0.0 {
            self.aspect_ratio
        } else if self.base_height > 0 {
            self.base_width as f32 / self.base_height as f32
        } else {
            1.0
        }
    }
}

impl From<sys::retro_game_geometry> for Geometry {
    fn from(raw: sys::retro_game_geometry) -> Self {
        Self {
            base_width: raw.base_width,
            base_height: raw.base_height,
            max_width: raw.max_width,
            max_height: raw.max_height,
            aspect_ratio: raw.aspect_ratio,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Timing {
    pub fps: f64,
    pub sample_rate: f64,
}

impl From<sys::retro_system_timing> for Timing {
    fn from(raw: sys::retro_system_timing) -> Self {
        Self {
            fps: raw.fps,
            sample_rate: raw.sample_rate,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AvInfo {
    pub geometry: Geometry,
    pub timing: Timing,
}

impl AvInfo {
    /// Frame rate the host should pace `run_frame` at. Truncated, at least 1.
    pub fn target_fps(&self) -> u32 {
        if self.timing.fps.is_finite() && self.timing.fps >= 1.0 {
            self.timing.fps as u32
        } else {
            1
        }
    }

    /// Output sample rate in Hz, or `None` when the core reports no audio.
    pub fn sample_rate_hz(&self) -> Option<u32> {
        let rate = self.timing.sample_rate;
        if rate.is_finite() && rate >= 1.0 {
            Some(rate.round() as u32)
        } else {
            None
        }
    }
}

impl From<sys::retro_system_av_info> for AvInfo {
    fn from(raw: sys::retro_system_av_info) -> Self {
        Self {
            geometry: raw.geometry.into(),
            timing: raw.timing.into(),
        }
    }
}
