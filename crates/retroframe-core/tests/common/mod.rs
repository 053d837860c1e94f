#![allow(dead_code)]

//! An in-process libretro core and a recording host for driving the bridge.
//!
//! The mock core's state is thread-local. The test harness runs each test on
//! its own thread, so tests never see each other's cores.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::ffi::CStr;
use std::os::raw::{c_char, c_uint, c_void};
use std::path::Path;
use std::ptr;
use std::rc::Rc;

use retroframe_core::{
    AudioStreamId, BridgeConfig, Frontend, GamepadButton, Host, Key, LoadError, MouseButton,
    SymbolSource, TextureFormat, TextureId,
};
use retroframe_sys as sys;

pub const MOCK_CORE_PATH: &str = "mock_libretro.so";

/// Written into row padding so misplaced reads show up.
pub const PADDING_BYTE: u8 = 0xee;

/// How the mock core behaves.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub api_version: c_uint,
    pub support_no_game: bool,
    pub need_fullpath: bool,
    /// Requested with SET_PIXEL_FORMAT from `retro_load_game`.
    pub pixel_format: Option<sys::retro_pixel_format>,
    pub width: u32,
    pub height: u32,
    /// Extra bytes at the end of every row.
    pub row_padding: usize,
    /// Pixel value written to every pixel, little endian, truncated to the format.
    pub fill: u32,
    /// Adds `0x010101 * n` to `fill` for the n-th pixel in row-major order.
    pub gradient: bool,
    pub fps: f64,
    pub sample_rate: f64,
    pub accept_content: bool,
    pub serialize_size: usize,
    /// Frames per `retro_run` sent through the batch callback.
    pub audio_frames: usize,
    pub send_null_frames: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            api_version: sys::RETRO_API_VERSION,
            support_no_game: true,
            need_fullpath: false,
            pixel_format: Some(sys::RETRO_PIXEL_FORMAT_XRGB8888),
            width: 4,
            height: 3,
            row_padding: 0,
            fill: 0x0011_2233,
            gradient: false,
            fps: 60.0,
            sample_rate: 44_100.0,
            accept_content: true,
            serialize_size: 16,
            audio_frames: 8,
            send_null_frames: false,
        }
    }
}

/// What `retro_load_game` was handed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedGame {
    pub path: String,
    pub data: Option<Vec<u8>>,
}

type Hook = Box<dyn FnMut()>;

#[derive(Default)]
struct MockState {
    config: RefCell<MockConfig>,
    calls: RefCell<Vec<&'static str>>,
    environment: Cell<sys::retro_environment_t>,
    video_refresh: Cell<sys::retro_video_refresh_t>,
    audio_sample: Cell<sys::retro_audio_sample_t>,
    audio_sample_batch: Cell<sys::retro_audio_sample_batch_t>,
    input_poll: Cell<sys::retro_input_poll_t>,
    input_state: Cell<sys::retro_input_state_t>,
    frames_run: Cell<u32>,
    loaded: RefCell<Option<LoadedGame>>,
    restored: RefCell<Vec<u8>>,
    audio_accepted: Cell<usize>,
    port_devices: RefCell<Vec<(c_uint, c_uint)>>,
    on_run: RefCell<Option<Hook>>,
}

thread_local! {
    static MOCK: MockState = MockState::default();
}

/// Resets the mock core and sets its behaviour.
pub fn configure(config: MockConfig) {
    MOCK.with(|mock| {
        *mock.config.borrow_mut() = config;
        mock.calls.borrow_mut().clear();
        mock.environment.set(None);
        mock.video_refresh.set(None);
        mock.audio_sample.set(None);
        mock.audio_sample_batch.set(None);
        mock.input_poll.set(None);
        mock.input_state.set(None);
        mock.frames_run.set(0);
        *mock.loaded.borrow_mut() = None;
        mock.restored.borrow_mut().clear();
        mock.audio_accepted.set(0);
        mock.port_devices.borrow_mut().clear();
        *mock.on_run.borrow_mut() = None;
    });
}

/// Runs `hook` inside every `retro_run`, before the frame is produced.
pub fn on_run(hook: impl FnMut() + 'static) {
    MOCK.with(|mock| *mock.on_run.borrow_mut() = Some(Box::new(hook)));
}

pub fn update_config(f: impl FnOnce(&mut MockConfig)) {
    MOCK.with(|mock| f(&mut mock.config.borrow_mut()));
}

/// Entry points the bridge called, in order.
pub fn calls() -> Vec<&'static str> {
    MOCK.with(|mock| mock.calls.borrow().clone())
}

pub fn call_count(name: &str) -> usize {
    MOCK.with(|mock| mock.calls.borrow().iter().filter(|&&call| call == name).count())
}

pub fn frames_run() -> u32 {
    MOCK.with(|mock| mock.frames_run.get())
}

pub fn loaded_game() -> Option<LoadedGame> {
    MOCK.with(|mock| mock.loaded.borrow().clone())
}

pub fn restored_state() -> Vec<u8> {
    MOCK.with(|mock| mock.restored.borrow().clone())
}

/// Frame count returned by the last audio batch call.
pub fn audio_accepted() -> usize {
    MOCK.with(|mock| mock.audio_accepted.get())
}

pub fn port_devices() -> Vec<(c_uint, c_uint)> {
    MOCK.with(|mock| mock.port_devices.borrow().clone())
}

fn config() -> MockConfig {
    MOCK.with(|mock| mock.config.borrow().clone())
}

/// Appends to the call log. Tests use this from their own callbacks.
pub fn record(name: &'static str) {
    MOCK.with(|mock| mock.calls.borrow_mut().push(name));
}

/// Issues an environment call the way a core would.
pub fn env<T>(cmd: c_uint, data: &mut T) -> bool {
    let Some(environment) = MOCK.with(|mock| mock.environment.get()) else {
        return false;
    };
    unsafe { environment(cmd, (data as *mut T).cast()) }
}

pub fn env_null(cmd: c_uint) -> bool {
    let Some(environment) = MOCK.with(|mock| mock.environment.get()) else {
        return false;
    };
    unsafe { environment(cmd, ptr::null_mut()) }
}

/// Queries input the way a core would.
pub fn input_state(port: c_uint, device: c_uint, index: c_uint, id: c_uint) -> i16 {
    let Some(input_state) = MOCK.with(|mock| mock.input_state.get()) else {
        return 0;
    };
    unsafe { input_state(port, device, index, id) }
}

pub fn input_poll() {
    if let Some(input_poll) = MOCK.with(|mock| mock.input_poll.get()) {
        unsafe { input_poll() };
    }
}

pub fn video_refresh(data: *const c_void, width: c_uint, height: c_uint, pitch: usize) {
    if let Some(video_refresh) = MOCK.with(|mock| mock.video_refresh.get()) {
        unsafe { video_refresh(data, width, height, pitch) };
    }
}

pub fn audio_sample(left: i16, right: i16) {
    if let Some(audio_sample) = MOCK.with(|mock| mock.audio_sample.get()) {
        unsafe { audio_sample(left, right) };
    }
}

pub fn audio_batch(samples: &[i16]) -> usize {
    let Some(batch) = MOCK.with(|mock| mock.audio_sample_batch.get()) else {
        return 0;
    };
    unsafe { batch(samples.as_ptr(), samples.len() / 2) }
}

/// Bytes of one frame in the mock's current format and size.
pub fn frame_bytes(config: &MockConfig) -> (Vec<u8>, usize) {
    let format = config.pixel_format.unwrap_or(sys::RETRO_PIXEL_FORMAT_0RGB1555);
    let bpp = if format == sys::RETRO_PIXEL_FORMAT_XRGB8888 { 4 } else { 2 };
    let pitch = config.width as usize * bpp + config.row_padding;
    let mut frame = vec![PADDING_BYTE; pitch * config.height as usize];
    let mut n = 0u32;
    for row in frame.chunks_mut(pitch) {
        for px in row[..config.width as usize * bpp].chunks_mut(bpp) {
            let value = if config.gradient {
                config.fill.wrapping_add(n * 0x0001_0101)
            } else {
                config.fill
            };
            px.copy_from_slice(&value.to_le_bytes()[..bpp]);
            n += 1;
        }
    }
    (frame, pitch)
}

unsafe fn c_str(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// The mock core's exported functions, named after their symbols.
mod entry {
    use super::*;

    pub unsafe extern "C" fn retro_init() {
        record("retro_init");
    }

    pub unsafe extern "C" fn retro_deinit() {
        record("retro_deinit");
    }

    pub unsafe extern "C" fn retro_api_version() -> c_uint {
        config().api_version
    }

    pub unsafe extern "C" fn retro_get_system_info(info: *mut sys::retro_system_info) {
        record("retro_get_system_info");
        let info = unsafe { &mut *info };
        info.library_name = c"MockCore".as_ptr();
        info.library_version = c"1.2.3".as_ptr();
        info.valid_extensions = c"bin|rom".as_ptr();
        info.need_fullpath = config().need_fullpath;
        info.block_extract = false;
    }

    pub unsafe extern "C" fn retro_get_system_av_info(info: *mut sys::retro_system_av_info) {
        record("retro_get_system_av_info");
        let config = config();
        let info = unsafe { &mut *info };
        info.geometry = sys::retro_game_geometry {
            base_width: config.width,
            base_height: config.height,
            max_width: config.width * 2,
            max_height: config.height * 2,
            aspect_ratio: 0.0,
        };
        info.timing = sys::retro_system_timing {
            fps: config.fps,
            sample_rate: config.sample_rate,
        };
    }

    pub unsafe extern "C" fn retro_set_environment(cb: sys::retro_environment_t) {
        record("retro_set_environment");
        MOCK.with(|mock| mock.environment.set(cb));
        let mut no_game = config().support_no_game;
        env(sys::RETRO_ENVIRONMENT_SET_SUPPORT_NO_GAME, &mut no_game);
    }

    pub unsafe extern "C" fn retro_set_video_refresh(cb: sys::retro_video_refresh_t) {
        record("retro_set_video_refresh");
        MOCK.with(|mock| mock.video_refresh.set(cb));
    }

    pub unsafe extern "C" fn retro_set_audio_sample(cb: sys::retro_audio_sample_t) {
        record("retro_set_audio_sample");
        MOCK.with(|mock| mock.audio_sample.set(cb));
    }

    pub unsafe extern "C" fn retro_set_audio_sample_batch(cb: sys::retro_audio_sample_batch_t) {
        record("retro_set_audio_sample_batch");
        MOCK.with(|mock| mock.audio_sample_batch.set(cb));
    }

    pub unsafe extern "C" fn retro_set_input_poll(cb: sys::retro_input_poll_t) {
        record("retro_set_input_poll");
        MOCK.with(|mock| mock.input_poll.set(cb));
    }

    pub unsafe extern "C" fn retro_set_input_state(cb: sys::retro_input_state_t) {
        record("retro_set_input_state");
        MOCK.with(|mock| mock.input_state.set(cb));
    }

    pub unsafe extern "C" fn retro_set_controller_port_device(port: c_uint, device: c_uint) {
        record("retro_set_controller_port_device");
        MOCK.with(|mock| mock.port_devices.borrow_mut().push((port, device)));
    }

    pub unsafe extern "C" fn retro_reset() {
        record("retro_reset");
    }

    pub unsafe extern "C" fn retro_run() {
        record("retro_run");
        MOCK.with(|mock| mock.frames_run.set(mock.frames_run.get() + 1));

        let hook = MOCK.with(|mock| mock.on_run.borrow_mut().take());
        if let Some(mut hook) = hook {
            hook();
            MOCK.with(|mock| *mock.on_run.borrow_mut() = Some(hook));
        }

        input_poll();

        let config = config();
        if config.send_null_frames {
            video_refresh(ptr::null(), config.width, config.height, 0);
        } else {
            let (frame, pitch) = frame_bytes(&config);
            video_refresh(frame.as_ptr().cast(), config.width, config.height, pitch);
        }

        if config.audio_frames > 0 {
            let samples: Vec<i16> = (0..config.audio_frames as i16 * 2).collect();
            let accepted = audio_batch(&samples);
            MOCK.with(|mock| mock.audio_accepted.set(accepted));
        }
    }

    pub unsafe extern "C" fn retro_serialize_size() -> usize {
        config().serialize_size
    }

    pub unsafe extern "C" fn retro_serialize(data: *mut c_void, size: usize) -> bool {
        record("retro_serialize");
        if size < config().serialize_size {
            return false;
        }
        let out = unsafe { std::slice::from_raw_parts_mut(data.cast::<u8>(), size) };
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = i as u8 ^ 0xa5;
        }
        true
    }

    pub unsafe extern "C" fn retro_unserialize(data: *const c_void, size: usize) -> bool {
        record("retro_unserialize");
        if size != config().serialize_size {
            return false;
        }
        let bytes = unsafe { std::slice::from_raw_parts(data.cast::<u8>(), size) };
        MOCK.with(|mock| *mock.restored.borrow_mut() = bytes.to_vec());
        true
    }

    pub unsafe extern "C" fn retro_cheat_reset() {}

    pub unsafe extern "C" fn retro_cheat_set(_index: c_uint, _enabled: bool, _code: *const c_char) {}

    pub unsafe extern "C" fn retro_load_game(game: *const sys::retro_game_info) -> bool {
        record("retro_load_game");
        let config = config();
        if let Some(format) = config.pixel_format {
            let mut format = format;
            env(sys::RETRO_ENVIRONMENT_SET_PIXEL_FORMAT, &mut format);
        }

        let loaded = if game.is_null() {
            LoadedGame {
                path: String::new(),
                data: None,
            }
        } else {
            let game = unsafe { &*game };
            let data = (!game.data.is_null()).then(|| {
                unsafe { std::slice::from_raw_parts(game.data.cast::<u8>(), game.size) }.to_vec()
            });
            LoadedGame {
                path: unsafe { c_str(game.path) },
                data,
            }
        };
        MOCK.with(|mock| *mock.loaded.borrow_mut() = Some(loaded));
        config.accept_content
    }

    pub unsafe extern "C" fn retro_load_game_special(
        _game_type: c_uint,
        _info: *const sys::retro_game_info,
        _num_info: usize,
    ) -> bool {
        false
    }

    pub unsafe extern "C" fn retro_unload_game() {
        record("retro_unload_game");
    }

    pub unsafe extern "C" fn retro_get_region() -> c_uint {
        sys::RETRO_REGION_NTSC
    }

    pub unsafe extern "C" fn retro_get_memory_data(_id: c_uint) -> *mut c_void {
        ptr::null_mut()
    }

    pub unsafe extern "C" fn retro_get_memory_size(_id: c_uint) -> usize {
        0
    }
}

/// Exposes the mock entry points, minus any names listed in `omit`.
pub struct MockLibrary {
    omit: HashSet<String>,
}

impl MockLibrary {
    pub fn new() -> Self {
        Self::without(&[])
    }

    pub fn without(omit: &[&str]) -> Self {
        Self {
            omit: omit.iter().map(|name| (*name).to_owned()).collect(),
        }
    }
}

macro_rules! lookup {
    ($name:expr, $($symbol:ident: $ty:ident,)*) => {{
        $(if $name == stringify!($symbol) {
            return Some(entry::$symbol as sys::$ty as *const c_void);
        })*
        None
    }};
}

impl SymbolSource for MockLibrary {
    fn symbol(&self, name: &str) -> Option<*const c_void> {
        if self.omit.contains(name) {
            return None;
        }
        lookup!(name,
            retro_init: retro_init_fn,
            retro_deinit: retro_deinit_fn,
            retro_api_version: retro_api_version_fn,
            retro_get_system_info: retro_get_system_info_fn,
            retro_get_system_av_info: retro_get_system_av_info_fn,
            retro_set_environment: retro_set_environment_fn,
            retro_set_video_refresh: retro_set_video_refresh_fn,
            retro_set_audio_sample: retro_set_audio_sample_fn,
            retro_set_audio_sample_batch: retro_set_audio_sample_batch_fn,
            retro_set_input_poll: retro_set_input_poll_fn,
            retro_set_input_state: retro_set_input_state_fn,
            retro_set_controller_port_device: retro_set_controller_port_device_fn,
            retro_reset: retro_reset_fn,
            retro_run: retro_run_fn,
            retro_serialize_size: retro_serialize_size_fn,
            retro_serialize: retro_serialize_fn,
            retro_unserialize: retro_unserialize_fn,
            retro_cheat_reset: retro_cheat_reset_fn,
            retro_cheat_set: retro_cheat_set_fn,
            retro_load_game: retro_load_game_fn,
            retro_load_game_special: retro_load_game_special_fn,
            retro_unload_game: retro_unload_game_fn,
            retro_get_region: retro_get_region_fn,
            retro_get_memory_data: retro_get_memory_data_fn,
            retro_get_memory_size: retro_get_memory_size_fn,
        )
    }
}

/// Everything the bridge did to the host, plus the input the host reports.
#[derive(Debug)]
pub struct HostLog {
    next_id: u64,
    pub live_textures: HashMap<TextureId, (u32, u32, TextureFormat)>,
    pub created_textures: Vec<(TextureId, u32, u32, TextureFormat)>,
    pub released_textures: Vec<TextureId>,
    pub uploads: usize,
    pub last_upload: Vec<u8>,
    pub open_streams: HashMap<AudioStreamId, (u32, u16)>,
    pub closed_streams: Vec<AudioStreamId>,
    pub audio_ready: bool,
    pub audio_samples: Vec<i16>,
    pub keys_down: HashSet<Key>,
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
    pub mouse: (f32, f32),
    pub mouse_buttons: HashSet<MouseButton>,
    pub wheel: f32,
    pub gamepad_buttons: HashSet<(u32, GamepadButton)>,
    pub screen: (u32, u32),
    pub refresh_rate: f32,
    /// Misuse of host resources. Panicking would abort inside a C callback.
    pub errors: Vec<String>,
}

impl Default for HostLog {
    fn default() -> Self {
        Self {
            next_id: 1,
            live_textures: HashMap::new(),
            created_textures: Vec::new(),
            released_textures: Vec::new(),
            uploads: 0,
            last_upload: Vec::new(),
            open_streams: HashMap::new(),
            closed_streams: Vec::new(),
            audio_ready: true,
            audio_samples: Vec::new(),
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            mouse: (0.0, 0.0),
            mouse_buttons: HashSet::new(),
            wheel: 0.0,
            gamepad_buttons: HashSet::new(),
            screen: (640, 480),
            refresh_rate: 60.0,
            errors: Vec::new(),
        }
    }
}

pub type SharedLog = Rc<RefCell<HostLog>>;

pub struct RecordingHost {
    log: SharedLog,
}

impl Host for RecordingHost {
    fn create_texture(&mut self, width: u32, height: u32, format: TextureFormat) -> TextureId {
        let mut log = self.log.borrow_mut();
        let id = TextureId(log.next_id);
        log.next_id += 1;
        log.live_textures.insert(id, (width, height, format));
        log.created_textures.push((id, width, height, format));
        id
    }

    fn update_texture(&mut self, texture: TextureId, pixels: &[u8]) {
        let mut log = self.log.borrow_mut();
        if !log.live_textures.contains_key(&texture) {
            log.errors.push(format!("update of released texture {texture:?}"));
        }
        log.uploads += 1;
        log.last_upload = pixels.to_vec();
    }

    fn release_texture(&mut self, texture: TextureId) {
        let mut log = self.log.borrow_mut();
        if log.live_textures.remove(&texture).is_none() {
            log.errors.push(format!("double release of {texture:?}"));
        }
        log.released_textures.push(texture);
    }

    fn open_audio_stream(&mut self, sample_rate: u32, channels: u16) -> Option<AudioStreamId> {
        let mut log = self.log.borrow_mut();
        let id = AudioStreamId(log.next_id);
        log.next_id += 1;
        log.open_streams.insert(id, (sample_rate, channels));
        Some(id)
    }

    fn audio_stream_processed(&self, _stream: AudioStreamId) -> bool {
        self.log.borrow().audio_ready
    }

    fn update_audio_stream(&mut self, _stream: AudioStreamId, samples: &[i16]) {
        self.log.borrow_mut().audio_samples.extend_from_slice(samples);
    }

    fn close_audio_stream(&mut self, stream: AudioStreamId) {
        let mut log = self.log.borrow_mut();
        if log.open_streams.remove(&stream).is_none() {
            log.errors.push(format!("double close of {stream:?}"));
        }
        log.closed_streams.push(stream);
    }

    fn key_down(&self, key: Key) -> bool {
        self.log.borrow().keys_down.contains(&key)
    }

    fn key_pressed(&self, key: Key) -> bool {
        self.log.borrow().keys_pressed.contains(&key)
    }

    fn key_released(&self, key: Key) -> bool {
        self.log.borrow().keys_released.contains(&key)
    }

    fn mouse_position(&self) -> (f32, f32) {
        self.log.borrow().mouse
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.log.borrow().mouse_buttons.contains(&button)
    }

    fn mouse_wheel_move(&self) -> f32 {
        self.log.borrow().wheel
    }

    fn gamepad_button_down(&self, gamepad: u32, button: GamepadButton) -> bool {
        self.log.borrow().gamepad_buttons.contains(&(gamepad, button))
    }

    fn screen_size(&self) -> (u32, u32) {
        self.log.borrow().screen
    }

    fn monitor_refresh_rate(&self) -> f32 {
        self.log.borrow().refresh_rate
    }
}

pub fn recording_host() -> (Box<dyn Host>, SharedLog) {
    let log = SharedLog::default();
    (Box::new(RecordingHost { log: log.clone() }), log)
}

/// A frontend wired to a fresh mock core and recording host. The core is not
/// loaded yet.
pub fn frontend(config: MockConfig) -> (Frontend, SharedLog) {
    frontend_with(config, BridgeConfig::default())
}

pub fn frontend_with(config: MockConfig, bridge: BridgeConfig) -> (Frontend, SharedLog) {
    configure(config);
    let (host, log) = recording_host();
    (Frontend::new(host, bridge), log)
}

pub fn init_mock(frontend: &mut Frontend) -> Result<(), LoadError> {
    frontend.init_core_from(Path::new(MOCK_CORE_PATH), Box::new(MockLibrary::new()))
}

/// Runs one frame and calls `f` from inside the core's `retro_run`, where the
/// bridge accepts callbacks.
pub fn during_frame<R: 'static>(frontend: &mut Frontend, f: impl FnOnce() -> R + 'static) -> R {
    let result = Rc::new(RefCell::new(None));
    let slot = result.clone();
    let mut f = Some(f);
    on_run(move || {
        if let Some(f) = f.take() {
            *slot.borrow_mut() = Some(f());
        }
    });
    assert!(frontend.run_frame(), "no content loaded");
    result.take().expect("retro_run did not run the hook")
}

/// A frontend with the mock core loaded and running without content.
pub fn running(config: MockConfig) -> (Frontend, SharedLog) {
    let (mut frontend, log) = frontend(config);
    init_mock(&mut frontend).expect("mock core loads");
    frontend.load_content(None).expect("mock core starts without content");
    (frontend, log)
}
