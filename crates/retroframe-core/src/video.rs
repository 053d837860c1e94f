use log::warn;

use crate::host::{Host, TextureFormat, TextureId};
use crate::system::PixelFormat;

/// Destination rectangle in screen pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Largest rectangle with the given aspect that fits `screen`, centered.
///
/// An aspect of zero or less falls back to the surface's own proportions.
pub fn fit_rect(aspect: f32, surface: (u32, u32), screen: (u32, u32)) -> Rect {
    let (screen_w, screen_h) = (screen.0 as f32, screen.1 as f32);
    let aspect = if aspect > 0.0 {
        aspect
    } else if surface.1 > 0 {
        surface.0 as f32 / surface.1 as f32
    } else {
        1.0
    };

    if screen_w <= 0.0 || screen_h <= 0.0 {
        return Rect::default();
    }

    let (width, height) = if screen_w / screen_h > aspect {
        (screen_h * aspect, screen_h)
    } else {
        (screen_w, screen_w / aspect)
    };

    Rect {
        x: (screen_w - width) / 2.0,
        y: (screen_h - height) / 2.0,
        width,
        height,
    }
}

/// 0RGB1555 to RGB565: red moves up one bit, blue stays, and green's top bit
/// is replicated into the new low green bit.
#[inline]
pub fn rgb1555_to_rgb565(pixel: u16) -> u16 {
    let red_green = (pixel << 1) & ((0x1f << 11) | (0x1f << 6));
    let blue = pixel & 0x1f;
    let green_low = (pixel >> 4) & (1 << 5);
    red_green | blue | green_low
}

/// XRGB8888 to a little-endian RGBA word (bytes `R, G, B, 0xFF`).
#[inline]
pub fn xrgb8888_to_rgba(pixel: u32) -> u32 {
    (0xff << 24) | ((pixel & 0xff) << 16) | (pixel & 0xff00) | ((pixel >> 16) & 0xff)
}

/// Bytes a frame of this shape occupies in the core's buffer. The last row
/// need not carry padding.
///
/// `None` when `pitch` is narrower than one row of pixels.
pub fn frame_len(format: PixelFormat, width: u32, height: u32, pitch: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }
    let row = (width as usize).checked_mul(format.bytes_per_pixel())?;
    if pitch < row {
        return None;
    }
    pitch.checked_mul(height as usize - 1)?.checked_add(row)
}

/// Converts one core frame into the tightly packed surface layout.
///
/// `pitch` is the byte distance between source rows for every format.
/// Returns `false` without touching `dst` when the shapes do not line up.
pub fn convert_frame(
    format: PixelFormat,
    src: &[u8],
    width: u32,
    height: u32,
    pitch: usize,
    dst: &mut [u8],
) -> bool {
    let (width, height) = (width as usize, height as usize);
    let src_row = width * format.bytes_per_pixel();
    let dst_row = width * format.surface_format().bytes_per_pixel();

    if pitch < src_row
        || dst.len() < dst_row * height
        || frame_len(format, width as u32, height as u32, pitch).is_none_or(|len| src.len() < len)
    {
        return false;
    }

    for y in 0..height {
        let src_line = &src[y * pitch..y * pitch + src_row];
        let dst_line = &mut dst[y * dst_row..(y + 1) * dst_row];

        match format {
            PixelFormat::Rgb565 => dst_line.copy_from_slice(src_line),
            PixelFormat::Rgb1555 => {
                for (out, px) in dst_line.chunks_exact_mut(2).zip(src_line.chunks_exact(2)) {
                    let px = u16::from_ne_bytes([px[0], px[1]]);
                    out.copy_from_slice(&rgb1555_to_rgb565(px).to_ne_bytes());
                }
            }
            PixelFormat::Xrgb8888 => {
                for (out, px) in dst_line.chunks_exact_mut(4).zip(src_line.chunks_exact(4)) {
                    let px = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
                    out.copy_from_slice(&xrgb8888_to_rgba(px).to_le_bytes());
                }
            }
        }
    }
    true
}

/// The host texture the core's frames land in, plus its CPU-side copy.
#[derive(Debug)]
pub struct DisplaySurface {
    texture: TextureId,
    width: u32,
    height: u32,
    source_format: PixelFormat,
    pixels: Vec<u8>,
}

impl DisplaySurface {
    /// Allocates a black surface and its host texture.
    pub(crate) fn create(
        host: &mut dyn Host,
        width: u32,
        height: u32,
        source_format: PixelFormat,
    ) -> Self {
        let format = source_format.surface_format();
        let texture = host.create_texture(width, height, format);
        let mut pixels = vec![0u8; width as usize * height as usize * format.bytes_per_pixel()];
        if format == TextureFormat::Rgba8888 {
            for alpha in pixels.iter_mut().skip(3).step_by(4) {
                *alpha = 0xff;
            }
        }
        host.update_texture(texture, &pixels);

        Self {
            texture,
            width,
            height,
            source_format,
            pixels,
        }
    }

    pub(crate) fn release(self, host: &mut dyn Host) {
        host.release_texture(self.texture);
    }

    /// Whether a frame of this shape can be written without recreating.
    pub(crate) fn matches(&self, width: u32, height: u32, format: PixelFormat) -> bool {
        self.width == width && self.height == height && self.source_format == format
    }

    /// Converts a core frame into the surface. `false` if it was rejected.
    pub(crate) fn write_frame(&mut self, frame: &[u8], pitch: usize) -> bool {
        let ok = convert_frame(
            self.source_format,
            frame,
            self.width,
            self.height,
            pitch,
            &mut self.pixels,
        );
        if !ok {
            warn!(
                "Dropping {}x{} frame with pitch {pitch} ({} bytes)",
                self.width,
                self.height,
                frame.len()
            );
        }
        ok
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn source_format(&self) -> PixelFormat {
        self.source_format
    }

    pub fn format(&self) -> TextureFormat {
        self.source_format.surface_format()
    }

    /// Tightly packed pixels in [`DisplaySurface::format`].
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
