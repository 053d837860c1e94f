use std::ffi::{CStr, c_char};
use std::os::raw::{c_int, c_uint, c_void};
use std::ptr;

use log::{debug, info, trace, warn};
use retroframe_sys as sys;

use crate::bridge::Bridge;
use crate::error::RuntimeWarning;
use crate::frontend::CoreMessage;
use crate::logging;
use crate::perf;
use crate::system::{AvInfo, PixelFormat};
use crate::vfs;

/// Commands where the core hands the frontend data or a callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SetCommand {
    Message,
    Shutdown,
    PerformanceLevel,
    PixelFormat,
    InputDescriptors,
    KeyboardCallback,
    Variables,
    SupportNoGame,
    FrameTimeCallback,
    AudioCallback,
    SystemAvInfo,
    Geometry,
}

/// Commands where the frontend fills memory the core provides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GetCommand {
    CanDupe,
    SystemDirectory,
    Variable,
    VariableUpdate,
    LibretroPath,
    InputDeviceCapabilities,
    LogInterface,
    PerfInterface,
    CoreAssetsDirectory,
    SaveDirectory,
    Username,
    Language,
    VfsInterface,
    AudioVideoEnable,
    Fastforwarding,
    TargetRefreshRate,
    InputBitmasks,
    MessageInterfaceVersion,
    InputMaxUsers,
}

/// A decoded `RETRO_ENVIRONMENT_*` id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EnvironmentCommand {
    Set(SetCommand),
    Get(GetCommand),
    /// Anything this frontend does not implement, with its raw id.
    Unsupported(u32),
}

macro_rules! environment_commands {
    ($($group:ident($kind:ident::$variant:ident) = $id:path,)*) => {
        impl EnvironmentCommand {
            /// Every command with a handler, with its numeric id.
            pub const HANDLED: &'static [(u32, EnvironmentCommand)] = &[
                $(($id, EnvironmentCommand::$group($kind::$variant)),)*
            ];

            /// Decodes a raw id. The experimental bit is part of the id.
            pub fn from_raw(cmd: u32) -> Self {
                match cmd {
                    $($id => Self::$group($kind::$variant),)*
                    other => Self::Unsupported(other),
                }
            }

            pub fn raw(self) -> u32 {
                match self {
                    $(Self::$group($kind::$variant) => $id,)*
                    Self::Unsupported(cmd) => cmd,
                }
            }
        }
    };
}

environment_commands! {
    Get(GetCommand::CanDupe) = sys::RETRO_ENVIRONMENT_GET_CAN_DUPE,
    Set(SetCommand::Message) = sys::RETRO_ENVIRONMENT_SET_MESSAGE,
    Set(SetCommand::Shutdown) = sys::RETRO_ENVIRONMENT_SHUTDOWN,
    Set(SetCommand::PerformanceLevel) = sys::RETRO_ENVIRONMENT_SET_PERFORMANCE_LEVEL,
    Get(GetCommand::SystemDirectory) = sys::RETRO_ENVIRONMENT_GET_SYSTEM_DIRECTORY,
    Set(SetCommand::PixelFormat) = sys::RETRO_ENVIRONMENT_SET_PIXEL_FORMAT,
    Set(SetCommand::InputDescriptors) = sys::RETRO_ENVIRONMENT_SET_INPUT_DESCRIPTORS,
    Set(SetCommand::KeyboardCallback) = sys::RETRO_ENVIRONMENT_SET_KEYBOARD_CALLBACK,
    Get(GetCommand::Variable) = sys::RETRO_ENVIRONMENT_GET_VARIABLE,
    Set(SetCommand::Variables) = sys::RETRO_ENVIRONMENT_SET_VARIABLES,
    Get(GetCommand::VariableUpdate) = sys::RETRO_ENVIRONMENT_GET_VARIABLE_UPDATE,
    Set(SetCommand::SupportNoGame) = sys::RETRO_ENVIRONMENT_SET_SUPPORT_NO_GAME,
    Get(GetCommand::LibretroPath) = sys::RETRO_ENVIRONMENT_GET_LIBRETRO_PATH,
    Set(SetCommand::FrameTimeCallback) = sys::RETRO_ENVIRONMENT_SET_FRAME_TIME_CALLBACK,
    Set(SetCommand::AudioCallback) = sys::RETRO_ENVIRONMENT_SET_AUDIO_CALLBACK,
    Get(GetCommand::InputDeviceCapabilities) = sys::RETRO_ENVIRONMENT_GET_INPUT_DEVICE_CAPABILITIES,
    Get(GetCommand::LogInterface) = sys::RETRO_ENVIRONMENT_GET_LOG_INTERFACE,
    Get(GetCommand::PerfInterface) = sys::RETRO_ENVIRONMENT_GET_PERF_INTERFACE,
    Get(GetCommand::CoreAssetsDirectory) = sys::RETRO_ENVIRONMENT_GET_CORE_ASSETS_DIRECTORY,
    Get(GetCommand::SaveDirectory) = sys::RETRO_ENVIRONMENT_GET_SAVE_DIRECTORY,
    Set(SetCommand::SystemAvInfo) = sys::RETRO_ENVIRONMENT_SET_SYSTEM_AV_INFO,
    Set(SetCommand::Geometry) = sys::RETRO_ENVIRONMENT_SET_GEOMETRY,
    Get(GetCommand::Username) = sys::RETRO_ENVIRONMENT_GET_USERNAME,
    Get(GetCommand::Language) = sys::RETRO_ENVIRONMENT_GET_LANGUAGE,
    Get(GetCommand::VfsInterface) = sys::RETRO_ENVIRONMENT_GET_VFS_INTERFACE,
    Get(GetCommand::AudioVideoEnable) = sys::RETRO_ENVIRONMENT_GET_AUDIO_VIDEO_ENABLE,
    Get(GetCommand::Fastforwarding) = sys::RETRO_ENVIRONMENT_GET_FASTFORWARDING,
    Get(GetCommand::TargetRefreshRate) = sys::RETRO_ENVIRONMENT_GET_TARGET_REFRESH_RATE,
    Get(GetCommand::InputBitmasks) = sys::RETRO_ENVIRONMENT_GET_INPUT_BITMASKS,
    Get(GetCommand::MessageInterfaceVersion) = sys::RETRO_ENVIRONMENT_GET_MESSAGE_INTERFACE_VERSION,
    Get(GetCommand::InputMaxUsers) = sys::RETRO_ENVIRONMENT_GET_INPUT_MAX_USERS,
}

impl EnvironmentCommand {
    /// Protocol name of the command, if the id is a known libretro command.
    pub fn name(self) -> Option<&'static str> {
        command_name(self.raw())
    }

    /// Handlers that accept a null payload.
    fn allows_null_data(self) -> bool {
        matches!(
            self,
            Self::Set(SetCommand::Shutdown) | Self::Get(GetCommand::InputBitmasks)
        )
    }
}

/// Protocol name for a raw command id, handled or not.
pub fn command_name(cmd: u32) -> Option<&'static str> {
    let name = match cmd {
        sys::RETRO_ENVIRONMENT_SET_ROTATION => "SET_ROTATION",
        sys::RETRO_ENVIRONMENT_GET_OVERSCAN => "GET_OVERSCAN",
        sys::RETRO_ENVIRONMENT_GET_CAN_DUPE => "GET_CAN_DUPE",
        sys::RETRO_ENVIRONMENT_SET_MESSAGE => "SET_MESSAGE",
        sys::RETRO_ENVIRONMENT_SHUTDOWN => "SHUTDOWN",
        sys::RETRO_ENVIRONMENT_SET_PERFORMANCE_LEVEL => "SET_PERFORMANCE_LEVEL",
        sys::RETRO_ENVIRONMENT_GET_SYSTEM_DIRECTORY => "GET_SYSTEM_DIRECTORY",
        sys::RETRO_ENVIRONMENT_SET_PIXEL_FORMAT => "SET_PIXEL_FORMAT",
        sys::RETRO_ENVIRONMENT_SET_INPUT_DESCRIPTORS => "SET_INPUT_DESCRIPTORS",
        sys::RETRO_ENVIRONMENT_SET_KEYBOARD_CALLBACK => "SET_KEYBOARD_CALLBACK",
        sys::RETRO_ENVIRONMENT_SET_DISK_CONTROL_INTERFACE => "SET_DISK_CONTROL_INTERFACE",
        sys::RETRO_ENVIRONMENT_SET_HW_RENDER => "SET_HW_RENDER",
        sys::RETRO_ENVIRONMENT_GET_VARIABLE => "GET_VARIABLE",
        sys::RETRO_ENVIRONMENT_SET_VARIABLES => "SET_VARIABLES",
        sys::RETRO_ENVIRONMENT_GET_VARIABLE_UPDATE => "GET_VARIABLE_UPDATE",
        sys::RETRO_ENVIRONMENT_SET_SUPPORT_NO_GAME => "SET_SUPPORT_NO_GAME",
        sys::RETRO_ENVIRONMENT_GET_LIBRETRO_PATH => "GET_LIBRETRO_PATH",
        sys::RETRO_ENVIRONMENT_SET_FRAME_TIME_CALLBACK => "SET_FRAME_TIME_CALLBACK",
        sys::RETRO_ENVIRONMENT_SET_AUDIO_CALLBACK => "SET_AUDIO_CALLBACK",
        sys::RETRO_ENVIRONMENT_GET_RUMBLE_INTERFACE => "GET_RUMBLE_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_INPUT_DEVICE_CAPABILITIES => "GET_INPUT_DEVICE_CAPABILITIES",
        sys::RETRO_ENVIRONMENT_GET_SENSOR_INTERFACE => "GET_SENSOR_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_CAMERA_INTERFACE => "GET_CAMERA_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_LOG_INTERFACE => "GET_LOG_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_PERF_INTERFACE => "GET_PERF_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_LOCATION_INTERFACE => "GET_LOCATION_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_CORE_ASSETS_DIRECTORY => "GET_CORE_ASSETS_DIRECTORY",
        sys::RETRO_ENVIRONMENT_GET_SAVE_DIRECTORY => "GET_SAVE_DIRECTORY",
        sys::RETRO_ENVIRONMENT_SET_SYSTEM_AV_INFO => "SET_SYSTEM_AV_INFO",
        sys::RETRO_ENVIRONMENT_SET_PROC_ADDRESS_CALLBACK => "SET_PROC_ADDRESS_CALLBACK",
        sys::RETRO_ENVIRONMENT_SET_SUBSYSTEM_INFO => "SET_SUBSYSTEM_INFO",
        sys::RETRO_ENVIRONMENT_SET_CONTROLLER_INFO => "SET_CONTROLLER_INFO",
        sys::RETRO_ENVIRONMENT_SET_MEMORY_MAPS => "SET_MEMORY_MAPS",
        sys::RETRO_ENVIRONMENT_SET_GEOMETRY => "SET_GEOMETRY",
        sys::RETRO_ENVIRONMENT_GET_USERNAME => "GET_USERNAME",
        sys::RETRO_ENVIRONMENT_GET_LANGUAGE => "GET_LANGUAGE",
        sys::RETRO_ENVIRONMENT_GET_CURRENT_SOFTWARE_FRAMEBUFFER => {
            "GET_CURRENT_SOFTWARE_FRAMEBUFFER"
        }
        sys::RETRO_ENVIRONMENT_GET_HW_RENDER_INTERFACE => "GET_HW_RENDER_INTERFACE",
        sys::RETRO_ENVIRONMENT_SET_SUPPORT_ACHIEVEMENTS => "SET_SUPPORT_ACHIEVEMENTS",
        sys::RETRO_ENVIRONMENT_SET_HW_RENDER_CONTEXT_NEGOTIATION_INTERFACE => {
            "SET_HW_RENDER_CONTEXT_NEGOTIATION_INTERFACE"
        }
        sys::RETRO_ENVIRONMENT_SET_SERIALIZATION_QUIRKS => "SET_SERIALIZATION_QUIRKS",
        sys::RETRO_ENVIRONMENT_SET_HW_SHARED_CONTEXT => "SET_HW_SHARED_CONTEXT",
        sys::RETRO_ENVIRONMENT_GET_VFS_INTERFACE => "GET_VFS_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_LED_INTERFACE => "GET_LED_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_AUDIO_VIDEO_ENABLE => "GET_AUDIO_VIDEO_ENABLE",
        sys::RETRO_ENVIRONMENT_GET_MIDI_INTERFACE => "GET_MIDI_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_FASTFORWARDING => "GET_FASTFORWARDING",
        sys::RETRO_ENVIRONMENT_GET_TARGET_REFRESH_RATE => "GET_TARGET_REFRESH_RATE",
        sys::RETRO_ENVIRONMENT_GET_INPUT_BITMASKS => "GET_INPUT_BITMASKS",
        sys::RETRO_ENVIRONMENT_GET_CORE_OPTIONS_VERSION => "GET_CORE_OPTIONS_VERSION",
        sys::RETRO_ENVIRONMENT_SET_CORE_OPTIONS => "SET_CORE_OPTIONS",
        sys::RETRO_ENVIRONMENT_SET_CORE_OPTIONS_INTL => "SET_CORE_OPTIONS_INTL",
        sys::RETRO_ENVIRONMENT_SET_CORE_OPTIONS_DISPLAY => "SET_CORE_OPTIONS_DISPLAY",
        sys::RETRO_ENVIRONMENT_GET_PREFERRED_HW_RENDER => "GET_PREFERRED_HW_RENDER",
        sys::RETRO_ENVIRONMENT_GET_DISK_CONTROL_INTERFACE_VERSION => {
            "GET_DISK_CONTROL_INTERFACE_VERSION"
        }
        sys::RETRO_ENVIRONMENT_SET_DISK_CONTROL_EXT_INTERFACE => "SET_DISK_CONTROL_EXT_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_MESSAGE_INTERFACE_VERSION => "GET_MESSAGE_INTERFACE_VERSION",
        sys::RETRO_ENVIRONMENT_SET_MESSAGE_EXT => "SET_MESSAGE_EXT",
        sys::RETRO_ENVIRONMENT_GET_INPUT_MAX_USERS => "GET_INPUT_MAX_USERS",
        sys::RETRO_ENVIRONMENT_SET_AUDIO_BUFFER_STATUS_CALLBACK => {
            "SET_AUDIO_BUFFER_STATUS_CALLBACK"
        }
        sys::RETRO_ENVIRONMENT_SET_MINIMUM_AUDIO_LATENCY => "SET_MINIMUM_AUDIO_LATENCY",
        sys::RETRO_ENVIRONMENT_SET_FASTFORWARDING_OVERRIDE => "SET_FASTFORWARDING_OVERRIDE",
        sys::RETRO_ENVIRONMENT_SET_CONTENT_INFO_OVERRIDE => "SET_CONTENT_INFO_OVERRIDE",
        sys::RETRO_ENVIRONMENT_GET_GAME_INFO_EXT => "GET_GAME_INFO_EXT",
        sys::RETRO_ENVIRONMENT_SET_CORE_OPTIONS_V2 => "SET_CORE_OPTIONS_V2",
        sys::RETRO_ENVIRONMENT_SET_CORE_OPTIONS_V2_INTL => "SET_CORE_OPTIONS_V2_INTL",
        sys::RETRO_ENVIRONMENT_SET_CORE_OPTIONS_UPDATE_DISPLAY_CALLBACK => {
            "SET_CORE_OPTIONS_UPDATE_DISPLAY_CALLBACK"
        }
        sys::RETRO_ENVIRONMENT_SET_VARIABLE => "SET_VARIABLE",
        sys::RETRO_ENVIRONMENT_GET_THROTTLE_STATE => "GET_THROTTLE_STATE",
        sys::RETRO_ENVIRONMENT_GET_SAVESTATE_CONTEXT => "GET_SAVESTATE_CONTEXT",
        sys::RETRO_ENVIRONMENT_GET_JIT_CAPABLE => "GET_JIT_CAPABLE",
        sys::RETRO_ENVIRONMENT_GET_MICROPHONE_INTERFACE => "GET_MICROPHONE_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_DEVICE_POWER => "GET_DEVICE_POWER",
        sys::RETRO_ENVIRONMENT_SET_NETPACKET_INTERFACE => "SET_NETPACKET_INTERFACE",
        sys::RETRO_ENVIRONMENT_GET_PLAYLIST_DIRECTORY => "GET_PLAYLIST_DIRECTORY",
        sys::RETRO_ENVIRONMENT_GET_FILE_BROWSER_START_DIRECTORY => {
            "GET_FILE_BROWSER_START_DIRECTORY"
        }
        _ => return None,
    };
    Some(name)
}

/// Device kinds answered by `Bridge::input_state`.
const INPUT_DEVICE_CAPABILITIES: u64 = (1 << sys::RETRO_DEVICE_JOYPAD)
    | (1 << sys::RETRO_DEVICE_MOUSE)
    | (1 << sys::RETRO_DEVICE_KEYBOARD)
    | (1 << sys::RETRO_DEVICE_POINTER);

unsafe fn read<T: Copy>(data: *mut c_void) -> T {
    unsafe { data.cast::<T>().read_unaligned() }
}

unsafe fn write<T>(data: *mut c_void, value: T) {
    unsafe { data.cast::<T>().write_unaligned(value) }
}

unsafe fn lossy(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

impl Bridge {
    /// Handles one environment call from the core.
    ///
    /// # Safety
    ///
    /// `data` must point to the payload type libretro defines for `cmd`.
    pub(crate) unsafe fn environment(&mut self, cmd: u32, data: *mut c_void) -> bool {
        let command = EnvironmentCommand::from_raw(cmd);
        match command {
            EnvironmentCommand::Unsupported(cmd) => {
                self.unsupported(cmd);
                false
            }
            _ if data.is_null() && !command.allows_null_data() => {
                debug!("{command:?} called without a payload");
                false
            }
            EnvironmentCommand::Set(set) => unsafe { self.apply(set, data) },
            EnvironmentCommand::Get(get) => unsafe { self.answer(get, data) },
        }
    }

    fn unsupported(&mut self, cmd: u32) {
        self.warn(RuntimeWarning::UnknownEnvironmentCommand(cmd));
        if self.warned_commands.insert(cmd) {
            match command_name(cmd) {
                Some(name) => warn!("Unsupported environment command {name} ({cmd:#x})"),
                None => warn!("Unknown environment command {cmd:#x}"),
            }
        }
    }

    unsafe fn apply(&mut self, command: SetCommand, data: *mut c_void) -> bool {
        match command {
            SetCommand::Message => {
                let message: sys::retro_message = unsafe { read(data) };
                let text = unsafe { lossy(message.msg) }.unwrap_or_default();
                info!("Core message: {text} ({} frames)", message.frames);
                self.last_message = Some(CoreMessage {
                    text,
                    frames: message.frames,
                });
                true
            }
            SetCommand::Shutdown => {
                info!("Core requested shutdown");
                self.shutdown_requested = true;
                true
            }
            SetCommand::PerformanceLevel => {
                self.performance_level = unsafe { read::<c_uint>(data) };
                debug!("Core performance level {}", self.performance_level);
                true
            }
            SetCommand::PixelFormat => {
                let raw = unsafe { read::<c_int>(data) };
                let Some(format) = PixelFormat::from_raw(raw) else {
                    warn!("Core asked for unknown pixel format {raw}");
                    return false;
                };
                if format != self.pixel_format {
                    self.surface_stale = true;
                }
                info!("Core pixel format {format:?}");
                self.pixel_format = format;
                true
            }
            SetCommand::InputDescriptors => {
                let mut entry = data.cast::<sys::retro_input_descriptor>().cast_const();
                loop {
                    let descriptor = unsafe { entry.read_unaligned() };
                    let Some(description) = (unsafe { lossy(descriptor.description) }) else {
                        break;
                    };
                    debug!(
                        "Input port {} device {} index {} id {}: {description}",
                        descriptor.port, descriptor.device, descriptor.index, descriptor.id
                    );
                    entry = unsafe { entry.add(1) };
                }
                true
            }
            SetCommand::KeyboardCallback => {
                let callback: sys::retro_keyboard_callback = unsafe { read(data) };
                self.keyboard_callback = callback.callback;
                true
            }
            SetCommand::Variables => {
                let mut entry = data.cast::<sys::retro_variable>().cast_const();
                let mut definitions = Vec::new();
                loop {
                    let variable = unsafe { entry.read_unaligned() };
                    let Some(key) = (unsafe { lossy(variable.key) }) else {
                        break;
                    };
                    let definition = unsafe { lossy(variable.value) }.unwrap_or_default();
                    definitions.push((key, definition));
                    entry = unsafe { entry.add(1) };
                }
                let accepted = self
                    .variables
                    .define(definitions.iter().map(|(k, v)| (k.as_str(), v.as_str())));
                info!("Core declared {accepted} option(s)");
                true
            }
            SetCommand::SupportNoGame => {
                self.supports_no_content = unsafe { read::<bool>(data) };
                debug!("Core supports running without content: {}", self.supports_no_content);
                true
            }
            SetCommand::FrameTimeCallback => {
                let callback: sys::retro_frame_time_callback = unsafe { read(data) };
                self.frame_time_callback = callback.callback.is_some().then_some(callback);
                self.last_frame_at = None;
                true
            }
            SetCommand::AudioCallback => {
                let callback: sys::retro_audio_callback = unsafe { read(data) };
                self.audio_callback = callback.callback.is_some().then_some(callback);
                true
            }
            SetCommand::SystemAvInfo => {
                let av_info = AvInfo::from(unsafe { read::<sys::retro_system_av_info>(data) });
                if av_info.sample_rate_hz() != self.av_info.sample_rate_hz() {
                    self.audio_stale = true;
                }
                info!(
                    "Core A/V info: {}x{} @ {:.2} fps, {:.0} Hz",
                    av_info.geometry.base_width,
                    av_info.geometry.base_height,
                    av_info.timing.fps,
                    av_info.timing.sample_rate
                );
                self.av_info = av_info;
                self.surface_stale = true;
                true
            }
            SetCommand::Geometry => {
                let raw: sys::retro_game_geometry = unsafe { read(data) };
                let geometry = &mut self.av_info.geometry;
                geometry.base_width = raw.base_width;
                geometry.base_height = raw.base_height;
                geometry.aspect_ratio = raw.aspect_ratio;
                debug!("Core geometry {}x{}", raw.base_width, raw.base_height);
                self.surface_stale = true;
                true
            }
        }
    }

    unsafe fn answer(&mut self, command: GetCommand, data: *mut c_void) -> bool {
        match command {
            GetCommand::CanDupe => unsafe { write(data, true) },
            GetCommand::SystemDirectory => unsafe { write(data, self.system_directory.as_ptr()) },
            GetCommand::SaveDirectory => unsafe { write(data, self.save_directory.as_ptr()) },
            GetCommand::CoreAssetsDirectory => unsafe {
                write(data, self.core_assets_directory.as_ptr())
            },
            GetCommand::Username => unsafe { write(data, self.username.as_ptr()) },
            GetCommand::LibretroPath => {
                if self.libretro_path.is_empty() {
                    return false;
                }
                unsafe { write(data, self.libretro_path.as_ptr()) }
            }
            GetCommand::Variable => {
                let slot = data.cast::<sys::retro_variable>();
                let variable = unsafe { slot.read_unaligned() };
                let Some(key) = (unsafe { lossy(variable.key) }) else {
                    return false;
                };
                let value = self.variables.get(&key).map_or(ptr::null(), CStr::as_ptr);
                trace!("GET_VARIABLE {key}");
                unsafe {
                    slot.write_unaligned(sys::retro_variable {
                        key: variable.key,
                        value,
                    })
                };
                if value.is_null() {
                    return false;
                }
            }
            GetCommand::VariableUpdate => unsafe { write(data, self.variables.take_updated()) },
            GetCommand::InputDeviceCapabilities => unsafe {
                write(data, INPUT_DEVICE_CAPABILITIES)
            },
            GetCommand::LogInterface => unsafe { write(data, logging::log_interface()) },
            GetCommand::PerfInterface => unsafe { write(data, perf::perf_interface()) },
            GetCommand::Language => unsafe { write::<sys::retro_language>(data, self.language) },
            GetCommand::VfsInterface => {
                let mut info = unsafe { read::<sys::retro_vfs_interface_info>(data) };
                if !vfs::fill_interface_info(&mut info) {
                    return false;
                }
                unsafe { write(data, info) }
            }
            GetCommand::AudioVideoEnable => unsafe {
                write::<c_int>(data, sys::RETRO_AV_ENABLE_VIDEO | sys::RETRO_AV_ENABLE_AUDIO)
            },
            GetCommand::Fastforwarding => unsafe { write(data, false) },
            GetCommand::TargetRefreshRate => unsafe {
                write::<f32>(data, self.host.monitor_refresh_rate())
            },
            // Bitmask queries are answered by `input_state`; the payload is unused.
            GetCommand::InputBitmasks => {}
            GetCommand::MessageInterfaceVersion => unsafe { write::<c_uint>(data, 0) },
            GetCommand::InputMaxUsers => unsafe { write::<c_uint>(data, self.max_users) },
        }
        true
    }
}
