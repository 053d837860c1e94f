//! State shared between the lifecycle controller and the libretro callbacks,
//! and the media half of those callbacks (video, audio, input).

use std::collections::HashSet;
use std::ffi::CString;
use std::os::raw::{c_uint, c_void};
use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use retroframe_sys as sys;

use crate::audio::{AUDIO_CHANNELS, AudioSink};
use crate::context;
use crate::error::{RuntimeWarning, WarningCounts};
use crate::frontend::{BridgeConfig, CoreMessage};
use crate::host::Host;
use crate::input::InputState;
use crate::keymap;
use crate::perf::PerfRegistry;
use crate::system::{AvInfo, PixelFormat};
use crate::variables::CoreVariables;
use crate::video::{self, DisplaySurface};

/// Path as an owned C string. Interior NULs fall back to `"."`.
pub(crate) fn path_to_c_string(path: &Path) -> CString {
    CString::new(path.as_os_str().as_encoded_bytes()).unwrap_or_else(|_| {
        warn!("Path {} contains a NUL byte; using \".\"", path.display());
        CString::from(c".")
    })
}

pub(crate) fn text_to_c_string(text: &str) -> CString {
    CString::new(text.replace('\0', "")).unwrap_or_default()
}

/// Everything the callbacks may read or change while a core is executing.
pub(crate) struct Bridge {
    pub(crate) host: Box<dyn Host>,

    pub(crate) system_directory: CString,
    pub(crate) save_directory: CString,
    pub(crate) core_assets_directory: CString,
    pub(crate) username: CString,
    pub(crate) language: u32,
    pub(crate) max_users: u32,
    pub(crate) libretro_path: CString,

    pub(crate) pixel_format: PixelFormat,
    pub(crate) av_info: AvInfo,
    pub(crate) surface: Option<DisplaySurface>,
    /// The next frame recreates the surface even if its shape still matches.
    pub(crate) surface_stale: bool,
    pub(crate) audio: Option<AudioSink>,
    /// The sample rate changed while the core was running.
    pub(crate) audio_stale: bool,
    pub(crate) input: InputState,

    pub(crate) shutdown_requested: bool,
    pub(crate) supports_no_content: bool,
    pub(crate) performance_level: u32,
    pub(crate) keyboard_callback: sys::retro_keyboard_event_t,
    pub(crate) frame_time_callback: Option<sys::retro_frame_time_callback>,
    pub(crate) last_frame_at: Option<Instant>,
    pub(crate) audio_callback: Option<sys::retro_audio_callback>,
    pub(crate) perf: PerfRegistry,
    pub(crate) variables: CoreVariables,
    pub(crate) last_message: Option<CoreMessage>,

    pub(crate) warned_commands: HashSet<u32>,
    pub(crate) warned_missing_frame: bool,
    pub(crate) warnings: WarningCounts,
}

impl Bridge {
    pub(crate) fn new(host: Box<dyn Host>, config: &BridgeConfig) -> Self {
        Self {
            host,
            system_directory: path_to_c_string(&config.system_directory),
            save_directory: path_to_c_string(&config.save_directory),
            core_assets_directory: path_to_c_string(&config.core_assets_directory),
            username: text_to_c_string(&config.username),
            language: config.language,
            max_users: config.max_users,
            libretro_path: CString::default(),
            pixel_format: PixelFormat::default(),
            av_info: AvInfo::default(),
            surface: None,
            surface_stale: false,
            audio: None,
            audio_stale: false,
            input: InputState::new(),
            shutdown_requested: false,
            supports_no_content: false,
            performance_level: 0,
            keyboard_callback: None,
            frame_time_callback: None,
            last_frame_at: None,
            audio_callback: None,
            perf: PerfRegistry::default(),
            variables: CoreVariables::with_overrides(config.variable_overrides.clone()),
            last_message: None,
            warned_commands: HashSet::new(),
            warned_missing_frame: false,
            warnings: WarningCounts::default(),
        }
    }

    /// Forgets everything negotiated with the previous core. Media resources
    /// must already be released.
    pub(crate) fn reset_core_state(&mut self) {
        self.libretro_path = CString::default();
        self.pixel_format = PixelFormat::default();
        self.av_info = AvInfo::default();
        self.surface_stale = false;
        self.audio_stale = false;
        self.input = InputState::new();
        self.shutdown_requested = false;
        self.supports_no_content = false;
        self.performance_level = 0;
        self.keyboard_callback = None;
        self.frame_time_callback = None;
        self.last_frame_at = None;
        self.audio_callback = None;
        self.perf.clear();
        self.variables.clear();
        self.last_message = None;
        self.warned_commands.clear();
        self.warned_missing_frame = false;
    }

    pub(crate) fn warn(&mut self, warning: RuntimeWarning) {
        self.warnings.record(warning);
    }

    // Video

    pub(crate) fn video_refresh(&mut self, frame: Option<&[u8]>, width: u32, height: u32, pitch: usize) {
        let Some(frame) = frame else {
            self.warn(RuntimeWarning::NoVideoData);
            if !self.warned_missing_frame {
                self.warned_missing_frame = true;
                warn!("Core sent a frame without data; keeping the previous frame");
            }
            return;
        };
        if width == 0 || height == 0 {
            return;
        }

        let reusable = !self.surface_stale
            && self
                .surface
                .as_ref()
                .is_some_and(|surface| surface.matches(width, height, self.pixel_format));
        if !reusable {
            self.recreate_surface(width, height);
        }

        if let Some(surface) = self.surface.as_mut()
            && surface.write_frame(frame, pitch)
        {
            self.host.update_texture(surface.texture(), surface.pixels());
        }
    }

    /// Releases the current surface (if any) and allocates a new one.
    pub(crate) fn recreate_surface(&mut self, width: u32, height: u32) {
        self.release_surface();
        if width == 0 || height == 0 {
            return;
        }
        debug!("Display surface {width}x{height} ({:?})", self.pixel_format);
        self.surface = Some(DisplaySurface::create(
            self.host.as_mut(),
            width,
            height,
            self.pixel_format,
        ));
        self.surface_stale = false;
    }

    pub(crate) fn release_surface(&mut self) {
        if let Some(surface) = self.surface.take() {
            surface.release(self.host.as_mut());
        }
    }

    // Audio

    pub(crate) fn audio_batch(&mut self, samples: &[i16]) -> usize {
        let frames = samples.len() / AUDIO_CHANNELS as usize;
        match self.audio.as_mut() {
            Some(sink) => sink.write(self.host.as_mut(), samples),
            None => frames,
        }
    }

    pub(crate) fn recreate_audio(&mut self) {
        self.release_audio();
        self.audio_stale = false;
        match self.av_info.sample_rate_hz() {
            Some(rate) => self.audio = AudioSink::open(self.host.as_mut(), rate),
            None => info!("Core reports no audio sample rate; running silent"),
        }
    }

    pub(crate) fn release_audio(&mut self) {
        if let Some(sink) = self.audio.take() {
            sink.close(self.host.as_mut());
        }
    }

    // Input

    pub(crate) fn input_poll(&mut self) {
        self.input.poll(self.host.as_ref());
    }

    pub(crate) fn input_state(&self, port: u32, device: u32, index: u32, id: u32) -> i16 {
        self.input.state(self.host.as_ref(), port, device, index, id)
    }

    /// Press/release edges for every mapped keyboard code, with modifiers.
    /// Each host key reports under its main code only.
    pub(crate) fn keyboard_events(&self) -> Vec<(bool, u32, u16)> {
        let host = self.host.as_ref();
        let mods = keymap::modifier_mask(|key| host.key_down(key));
        (sys::RETROK_FIRST..sys::RETROK_LAST)
            .filter(|&code| !keymap::is_alias_code(code))
            .filter_map(|code| {
                let key = keymap::retro_key_to_key(code)?;
                if host.key_pressed(key) {
                    Some((true, code, mods))
                } else if host.key_released(key) {
                    Some((false, code, mods))
                } else {
                    None
                }
            })
            .collect()
    }
}

// Trampolines registered with the core.

pub(crate) unsafe extern "C" fn cb_environment(cmd: c_uint, data: *mut c_void) -> bool {
    context::with_bridge(|bridge| unsafe { bridge.environment(cmd, data) }).unwrap_or(false)
}

pub(crate) unsafe extern "C" fn cb_video_refresh(
    data: *const c_void,
    width: c_uint,
    height: c_uint,
    pitch: usize,
) {
    if data == sys::RETRO_HW_FRAME_BUFFER_VALID {
        return;
    }
    context::with_bridge(|bridge| {
        let frame = if data.is_null() {
            None
        } else {
            // A pitch narrower than a row yields an empty frame, which the
            // surface rejects.
            let len = video::frame_len(bridge.pixel_format, width, height, pitch).unwrap_or(0);
            // SAFETY: `len` never exceeds the `height` rows of `pitch` bytes
            // the core guarantees at `data`.
            Some(unsafe { std::slice::from_raw_parts(data.cast::<u8>(), len) })
        };
        bridge.video_refresh(frame, width, height, pitch);
    });
}

pub(crate) unsafe extern "C" fn cb_audio_sample_batch(data: *const i16, frames: usize) -> usize {
    if data.is_null() || frames == 0 {
        return 0;
    }
    let Some(len) = frames.checked_mul(AUDIO_CHANNELS as usize) else {
        return 0;
    };
    // SAFETY: the core passes `frames` interleaved stereo frames.
    let samples = unsafe { std::slice::from_raw_parts(data, len) };
    context::with_bridge(|bridge| bridge.audio_batch(samples)).unwrap_or(frames)
}

pub(crate) unsafe extern "C" fn cb_audio_sample(left: i16, right: i16) {
    let frame = [left, right];
    unsafe { cb_audio_sample_batch(frame.as_ptr(), 1) };
}

pub(crate) unsafe extern "C" fn cb_input_poll() {
    context::with_bridge(|bridge| bridge.input_poll());
}

pub(crate) unsafe extern "C" fn cb_input_state(
    port: c_uint,
    device: c_uint,
    index: c_uint,
    id: c_uint,
) -> i16 {
    context::with_bridge(|bridge| bridge.input_state(port, device, index, id)).unwrap_or(0)
}
