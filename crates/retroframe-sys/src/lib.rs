#![allow(
    non_camel_case_types,
    non_snake_case,
    dead_code,
    clippy::upper_case_acronyms,
    clippy::missing_safety_doc
)]

//! Low-level (unsafe) bindings to the libretro core ABI.
//!
//! This crate mirrors the subset of `libretro.h` a software-rendering frontend
//! needs: the 25 `retro_*` entry points a core exports, the callback types the
//! frontend hands back, the environment command numbers and the payload structs
//! those commands carry. Most consumers should use `retroframe-core` instead of
//! touching these definitions directly.
//!
//! C enums are mirrored as integer aliases plus constants. Their values arrive
//! from foreign code and a Rust enum with an out-of-range discriminant would be
//! undefined behavior.

use core::ffi::c_void;
use std::os::raw::{c_char, c_int, c_uint};

/// The only libretro API revision this frontend speaks.
pub const RETRO_API_VERSION: c_uint = 1;

/// Marks an environment command as experimental (subject to change).
pub const RETRO_ENVIRONMENT_EXPERIMENTAL: c_uint = 0x10000;
/// Marks an environment command as frontend-private.
pub const RETRO_ENVIRONMENT_PRIVATE: c_uint = 0x20000;

// Environment commands (libretro.h, RETRO_ENVIRONMENT_*).
pub const RETRO_ENVIRONMENT_SET_ROTATION: c_uint = 1;
pub const RETRO_ENVIRONMENT_GET_OVERSCAN: c_uint = 2;
pub const RETRO_ENVIRONMENT_GET_CAN_DUPE: c_uint = 3;
pub const RETRO_ENVIRONMENT_SET_MESSAGE: c_uint = 6;
pub const RETRO_ENVIRONMENT_SHUTDOWN: c_uint = 7;
pub const RETRO_ENVIRONMENT_SET_PERFORMANCE_LEVEL: c_uint = 8;
pub const RETRO_ENVIRONMENT_GET_SYSTEM_DIRECTORY: c_uint = 9;
pub const RETRO_ENVIRONMENT_SET_PIXEL_FORMAT: c_uint = 10;
pub const RETRO_ENVIRONMENT_SET_INPUT_DESCRIPTORS: c_uint = 11;
pub const RETRO_ENVIRONMENT_SET_KEYBOARD_CALLBACK: c_uint = 12;
pub const RETRO_ENVIRONMENT_SET_DISK_CONTROL_INTERFACE: c_uint = 13;
pub const RETRO_ENVIRONMENT_SET_HW_RENDER: c_uint = 14;
pub const RETRO_ENVIRONMENT_GET_VARIABLE: c_uint = 15;
pub const RETRO_ENVIRONMENT_SET_VARIABLES: c_uint = 16;
pub const RETRO_ENVIRONMENT_GET_VARIABLE_UPDATE: c_uint = 17;
pub const RETRO_ENVIRONMENT_SET_SUPPORT_NO_GAME: c_uint = 18;
pub const RETRO_ENVIRONMENT_GET_LIBRETRO_PATH: c_uint = 19;
pub const RETRO_ENVIRONMENT_SET_FRAME_TIME_CALLBACK: c_uint = 21;
pub const RETRO_ENVIRONMENT_SET_AUDIO_CALLBACK: c_uint = 22;
pub const RETRO_ENVIRONMENT_GET_RUMBLE_INTERFACE: c_uint = 23;
pub const RETRO_ENVIRONMENT_GET_INPUT_DEVICE_CAPABILITIES: c_uint = 24;
pub const RETRO_ENVIRONMENT_GET_SENSOR_INTERFACE: c_uint = 25 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_CAMERA_INTERFACE: c_uint = 26 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_LOG_INTERFACE: c_uint = 27;
pub const RETRO_ENVIRONMENT_GET_PERF_INTERFACE: c_uint = 28;
pub const RETRO_ENVIRONMENT_GET_LOCATION_INTERFACE: c_uint = 29;
pub const RETRO_ENVIRONMENT_GET_CORE_ASSETS_DIRECTORY: c_uint = 30;
pub const RETRO_ENVIRONMENT_GET_SAVE_DIRECTORY: c_uint = 31;
pub const RETRO_ENVIRONMENT_SET_SYSTEM_AV_INFO: c_uint = 32;
pub const RETRO_ENVIRONMENT_SET_PROC_ADDRESS_CALLBACK: c_uint = 33;
pub const RETRO_ENVIRONMENT_SET_SUBSYSTEM_INFO: c_uint = 34;
pub const RETRO_ENVIRONMENT_SET_CONTROLLER_INFO: c_uint = 35;
pub const RETRO_ENVIRONMENT_SET_MEMORY_MAPS: c_uint = 36 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_SET_GEOMETRY: c_uint = 37;
pub const RETRO_ENVIRONMENT_GET_USERNAME: c_uint = 38;
pub const RETRO_ENVIRONMENT_GET_LANGUAGE: c_uint = 39;
pub const RETRO_ENVIRONMENT_GET_CURRENT_SOFTWARE_FRAMEBUFFER: c_uint =
    40 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_HW_RENDER_INTERFACE: c_uint = 41 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_SET_SUPPORT_ACHIEVEMENTS: c_uint = 42 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_SET_HW_RENDER_CONTEXT_NEGOTIATION_INTERFACE: c_uint =
    43 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_SET_SERIALIZATION_QUIRKS: c_uint = 44;
pub const RETRO_ENVIRONMENT_SET_HW_SHARED_CONTEXT: c_uint = 44 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_VFS_INTERFACE: c_uint = 45 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_LED_INTERFACE: c_uint = 46 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_AUDIO_VIDEO_ENABLE: c_uint = 47 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_MIDI_INTERFACE: c_uint = 48 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_FASTFORWARDING: c_uint = 49 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_TARGET_REFRESH_RATE: c_uint = 50 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_INPUT_BITMASKS: c_uint = 51 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_CORE_OPTIONS_VERSION: c_uint = 52;
pub const RETRO_ENVIRONMENT_SET_CORE_OPTIONS: c_uint = 53;
pub const RETRO_ENVIRONMENT_SET_CORE_OPTIONS_INTL: c_uint = 54;
pub const RETRO_ENVIRONMENT_SET_CORE_OPTIONS_DISPLAY: c_uint = 55;
pub const RETRO_ENVIRONMENT_GET_PREFERRED_HW_RENDER: c_uint = 56;
pub const RETRO_ENVIRONMENT_GET_DISK_CONTROL_INTERFACE_VERSION: c_uint = 57;
pub const RETRO_ENVIRONMENT_SET_DISK_CONTROL_EXT_INTERFACE: c_uint = 58;
pub const RETRO_ENVIRONMENT_GET_MESSAGE_INTERFACE_VERSION: c_uint = 59;
pub const RETRO_ENVIRONMENT_SET_MESSAGE_EXT: c_uint = 60;
pub const RETRO_ENVIRONMENT_GET_INPUT_MAX_USERS: c_uint = 61;
pub const RETRO_ENVIRONMENT_SET_AUDIO_BUFFER_STATUS_CALLBACK: c_uint = 62;
pub const RETRO_ENVIRONMENT_SET_MINIMUM_AUDIO_LATENCY: c_uint = 63;
pub const RETRO_ENVIRONMENT_SET_FASTFORWARDING_OVERRIDE: c_uint = 64;
pub const RETRO_ENVIRONMENT_SET_CONTENT_INFO_OVERRIDE: c_uint = 65;
pub const RETRO_ENVIRONMENT_GET_GAME_INFO_EXT: c_uint = 66;
pub const RETRO_ENVIRONMENT_SET_CORE_OPTIONS_V2: c_uint = 67;
pub const RETRO_ENVIRONMENT_SET_CORE_OPTIONS_V2_INTL: c_uint = 68;
pub const RETRO_ENVIRONMENT_SET_CORE_OPTIONS_UPDATE_DISPLAY_CALLBACK: c_uint = 69;
pub const RETRO_ENVIRONMENT_SET_VARIABLE: c_uint = 70;
pub const RETRO_ENVIRONMENT_GET_THROTTLE_STATE: c_uint = 71 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_SAVESTATE_CONTEXT: c_uint = 72 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_JIT_CAPABLE: c_uint = 74;
pub const RETRO_ENVIRONMENT_GET_MICROPHONE_INTERFACE: c_uint = 75 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_GET_DEVICE_POWER: c_uint = 77 | RETRO_ENVIRONMENT_EXPERIMENTAL;
pub const RETRO_ENVIRONMENT_SET_NETPACKET_INTERFACE: c_uint = 78;
pub const RETRO_ENVIRONMENT_GET_PLAYLIST_DIRECTORY: c_uint = 79;
pub const RETRO_ENVIRONMENT_GET_FILE_BROWSER_START_DIRECTORY: c_uint = 80;

// Input devices (RETRO_DEVICE_*).
pub const RETRO_DEVICE_TYPE_SHIFT: c_uint = 8;
pub const RETRO_DEVICE_MASK: c_uint = (1 << RETRO_DEVICE_TYPE_SHIFT) - 1;
pub const RETRO_DEVICE_NONE: c_uint = 0;
pub const RETRO_DEVICE_JOYPAD: c_uint = 1;
pub const RETRO_DEVICE_MOUSE: c_uint = 2;
pub const RETRO_DEVICE_KEYBOARD: c_uint = 3;
pub const RETRO_DEVICE_LIGHTGUN: c_uint = 4;
pub const RETRO_DEVICE_ANALOG: c_uint = 5;
pub const RETRO_DEVICE_POINTER: c_uint = 6;

// Joypad button ids (RETRO_DEVICE_ID_JOYPAD_*).
pub const RETRO_DEVICE_ID_JOYPAD_B: c_uint = 0;
pub const RETRO_DEVICE_ID_JOYPAD_Y: c_uint = 1;
pub const RETRO_DEVICE_ID_JOYPAD_SELECT: c_uint = 2;
pub const RETRO_DEVICE_ID_JOYPAD_START: c_uint = 3;
pub const RETRO_DEVICE_ID_JOYPAD_UP: c_uint = 4;
pub const RETRO_DEVICE_ID_JOYPAD_DOWN: c_uint = 5;
pub const RETRO_DEVICE_ID_JOYPAD_LEFT: c_uint = 6;
pub const RETRO_DEVICE_ID_JOYPAD_RIGHT: c_uint = 7;
pub const RETRO_DEVICE_ID_JOYPAD_A: c_uint = 8;
pub const RETRO_DEVICE_ID_JOYPAD_X: c_uint = 9;
pub const RETRO_DEVICE_ID_JOYPAD_L: c_uint = 10;
pub const RETRO_DEVICE_ID_JOYPAD_R: c_uint = 11;
pub const RETRO_DEVICE_ID_JOYPAD_L2: c_uint = 12;
pub const RETRO_DEVICE_ID_JOYPAD_R2: c_uint = 13;
pub const RETRO_DEVICE_ID_JOYPAD_L3: c_uint = 14;
pub const RETRO_DEVICE_ID_JOYPAD_R3: c_uint = 15;
/// Query every joypad button at once as a bitmask (needs GET_INPUT_BITMASKS).
pub const RETRO_DEVICE_ID_JOYPAD_MASK: c_uint = 256;

// Mouse ids (RETRO_DEVICE_ID_MOUSE_*).
pub const RETRO_DEVICE_ID_MOUSE_X: c_uint = 0;
pub const RETRO_DEVICE_ID_MOUSE_Y: c_uint = 1;
pub const RETRO_DEVICE_ID_MOUSE_LEFT: c_uint = 2;
pub const RETRO_DEVICE_ID_MOUSE_RIGHT: c_uint = 3;
pub const RETRO_DEVICE_ID_MOUSE_WHEELUP: c_uint = 4;
pub const RETRO_DEVICE_ID_MOUSE_WHEELDOWN: c_uint = 5;
pub const RETRO_DEVICE_ID_MOUSE_MIDDLE: c_uint = 6;
pub const RETRO_DEVICE_ID_MOUSE_HORIZ_WHEELUP: c_uint = 7;
pub const RETRO_DEVICE_ID_MOUSE_HORIZ_WHEELDOWN: c_uint = 8;
pub const RETRO_DEVICE_ID_MOUSE_BUTTON_4: c_uint = 9;
pub const RETRO_DEVICE_ID_MOUSE_BUTTON_5: c_uint = 10;

// Pointer ids (RETRO_DEVICE_ID_POINTER_*).
pub const RETRO_DEVICE_ID_POINTER_X: c_uint = 0;
pub const RETRO_DEVICE_ID_POINTER_Y: c_uint = 1;
pub const RETRO_DEVICE_ID_POINTER_PRESSED: c_uint = 2;
pub const RETRO_DEVICE_ID_POINTER_COUNT: c_uint = 3;

pub const RETRO_REGION_NTSC: c_uint = 0;
pub const RETRO_REGION_PAL: c_uint = 1;

pub const RETRO_MEMORY_SAVE_RAM: c_uint = 0;
pub const RETRO_MEMORY_RTC: c_uint = 1;
pub const RETRO_MEMORY_SYSTEM_RAM: c_uint = 2;
pub const RETRO_MEMORY_VIDEO_RAM: c_uint = 3;

/// Sentinel `data` value for hardware-rendered frames.
pub const RETRO_HW_FRAME_BUFFER_VALID: *const c_void = usize::MAX as *const c_void;

/// `enum retro_pixel_format`.
pub type retro_pixel_format = c_int;
/// 0RGB1555, native endian. The libretro default.
pub const RETRO_PIXEL_FORMAT_0RGB1555: retro_pixel_format = 0;
/// XRGB8888, native endian. The X byte is ignored.
pub const RETRO_PIXEL_FORMAT_XRGB8888: retro_pixel_format = 1;
/// RGB565, native endian.
pub const RETRO_PIXEL_FORMAT_RGB565: retro_pixel_format = 2;
pub const RETRO_PIXEL_FORMAT_UNKNOWN: retro_pixel_format = c_int::MAX;

/// `enum retro_log_level`.
pub type retro_log_level = c_int;
pub const RETRO_LOG_DEBUG: retro_log_level = 0;
pub const RETRO_LOG_INFO: retro_log_level = 1;
pub const RETRO_LOG_WARN: retro_log_level = 2;
pub const RETRO_LOG_ERROR: retro_log_level = 3;

/// `enum retro_language`.
pub type retro_language = c_uint;
pub const RETRO_LANGUAGE_ENGLISH: retro_language = 0;
pub const RETRO_LANGUAGE_JAPANESE: retro_language = 1;
pub const RETRO_LANGUAGE_FRENCH: retro_language = 2;
pub const RETRO_LANGUAGE_SPANISH: retro_language = 3;
pub const RETRO_LANGUAGE_GERMAN: retro_language = 4;
pub const RETRO_LANGUAGE_ITALIAN: retro_language = 5;
pub const RETRO_LANGUAGE_DUTCH: retro_language = 6;
pub const RETRO_LANGUAGE_PORTUGUESE_BRAZIL: retro_language = 7;
pub const RETRO_LANGUAGE_PORTUGUESE_PORTUGAL: retro_language = 8;
pub const RETRO_LANGUAGE_RUSSIAN: retro_language = 9;
pub const RETRO_LANGUAGE_KOREAN: retro_language = 10;
pub const RETRO_LANGUAGE_CHINESE_TRADITIONAL: retro_language = 11;
pub const RETRO_LANGUAGE_CHINESE_SIMPLIFIED: retro_language = 12;
pub const RETRO_LANGUAGE_ESPERANTO: retro_language = 13;
pub const RETRO_LANGUAGE_POLISH: retro_language = 14;
pub const RETRO_LANGUAGE_VIETNAMESE: retro_language = 15;
pub const RETRO_LANGUAGE_ARABIC: retro_language = 16;
pub const RETRO_LANGUAGE_GREEK: retro_language = 17;
pub const RETRO_LANGUAGE_TURKISH: retro_language = 18;

// Bits answered by GET_AUDIO_VIDEO_ENABLE.
pub const RETRO_AV_ENABLE_VIDEO: c_int = 1 << 0;
pub const RETRO_AV_ENABLE_AUDIO: c_int = 1 << 1;
pub const RETRO_AV_ENABLE_FAST_SAVESTATES: c_int = 1 << 2;
pub const RETRO_AV_ENABLE_HARD_DISABLE_AUDIO: c_int = 1 << 3;

// Keyboard codes (enum retro_key). Values follow SDL 1.2.
pub type retro_key = c_uint;
pub const RETROK_UNKNOWN: retro_key = 0;
pub const RETROK_FIRST: retro_key = 0;
pub const RETROK_BACKSPACE: retro_key = 8;
pub const RETROK_TAB: retro_key = 9;
pub const RETROK_CLEAR: retro_key = 12;
pub const RETROK_RETURN: retro_key = 13;
pub const RETROK_PAUSE: retro_key = 19;
pub const RETROK_ESCAPE: retro_key = 27;
pub const RETROK_SPACE: retro_key = 32;
pub const RETROK_EXCLAIM: retro_key = 33;
pub const RETROK_QUOTEDBL: retro_key = 34;
pub const RETROK_HASH: retro_key = 35;
pub const RETROK_DOLLAR: retro_key = 36;
pub const RETROK_AMPERSAND: retro_key = 38;
pub const RETROK_QUOTE: retro_key = 39;
pub const RETROK_LEFTPAREN: retro_key = 40;
pub const RETROK_RIGHTPAREN: retro_key = 41;
pub const RETROK_ASTERISK: retro_key = 42;
pub const RETROK_PLUS: retro_key = 43;
pub const RETROK_COMMA: retro_key = 44;
pub const RETROK_MINUS: retro_key = 45;
pub const RETROK_PERIOD: retro_key = 46;
pub const RETROK_SLASH: retro_key = 47;
pub const RETROK_0: retro_key = 48;
pub const RETROK_1: retro_key = 49;
pub const RETROK_2: retro_key = 50;
pub const RETROK_3: retro_key = 51;
pub const RETROK_4: retro_key = 52;
pub const RETROK_5: retro_key = 53;
pub const RETROK_6: retro_key = 54;
pub const RETROK_7: retro_key = 55;
pub const RETROK_8: retro_key = 56;
pub const RETROK_9: retro_key = 57;
pub const RETROK_COLON: retro_key = 58;
pub const RETROK_SEMICOLON: retro_key = 59;
pub const RETROK_LESS: retro_key = 60;
pub const RETROK_EQUALS: retro_key = 61;
pub const RETROK_GREATER: retro_key = 62;
pub const RETROK_QUESTION: retro_key = 63;
pub const RETROK_AT: retro_key = 64;
pub const RETROK_LEFTBRACKET: retro_key = 91;
pub const RETROK_BACKSLASH: retro_key = 92;
pub const RETROK_RIGHTBRACKET: retro_key = 93;
pub const RETROK_CARET: retro_key = 94;
pub const RETROK_UNDERSCORE: retro_key = 95;
pub const RETROK_BACKQUOTE: retro_key = 96;
pub const RETROK_a: retro_key = 97;
pub const RETROK_b: retro_key = 98;
pub const RETROK_c: retro_key = 99;
pub const RETROK_d: retro_key = 100;
pub const RETROK_e: retro_key = 101;
pub const RETROK_f: retro_key = 102;
pub const RETROK_g: retro_key = 103;
pub const RETROK_h: retro_key = 104;
pub const RETROK_i: retro_key = 105;
pub const RETROK_j: retro_key = 106;
pub const RETROK_k: retro_key = 107;
pub const RETROK_l: retro_key = 108;
pub const RETROK_m: retro_key = 109;
pub const RETROK_n: retro_key = 110;
pub const RETROK_o: retro_key = 111;
pub const RETROK_p: retro_key = 112;
pub const RETROK_q: retro_key = 113;
pub const RETROK_r: retro_key = 114;
pub const RETROK_s: retro_key = 115;
pub const RETROK_t: retro_key = 116;
pub const RETROK_u: retro_key = 117;
pub const RETROK_v: retro_key = 118;
pub const RETROK_w: retro_key = 119;
pub const RETROK_x: retro_key = 120;
pub const RETROK_y: retro_key = 121;
pub const RETROK_z: retro_key = 122;
pub const RETROK_LEFTBRACE: retro_key = 123;
pub const RETROK_BAR: retro_key = 124;
pub const RETROK_RIGHTBRACE: retro_key = 125;
pub const RETROK_TILDE: retro_key = 126;
pub const RETROK_DELETE: retro_key = 127;
pub const RETROK_KP0: retro_key = 256;
pub const RETROK_KP1: retro_key = 257;
pub const RETROK_KP2: retro_key = 258;
pub const RETROK_KP3: retro_key = 259;
pub const RETROK_KP4: retro_key = 260;
pub const RETROK_KP5: retro_key = 261;
pub const RETROK_KP6: retro_key = 262;
pub const RETROK_KP7: retro_key = 263;
pub const RETROK_KP8: retro_key = 264;
pub const RETROK_KP9: retro_key = 265;
pub const RETROK_KP_PERIOD: retro_key = 266;
pub const RETROK_KP_DIVIDE: retro_key = 267;
pub const RETROK_KP_MULTIPLY: retro_key = 268;
pub const RETROK_KP_MINUS: retro_key = 269;
pub const RETROK_KP_PLUS: retro_key = 270;
pub const RETROK_KP_ENTER: retro_key = 271;
pub const RETROK_KP_EQUALS: retro_key = 272;
pub const RETROK_UP: retro_key = 273;
pub const RETROK_DOWN: retro_key = 274;
pub const RETROK_RIGHT: retro_key = 275;
pub const RETROK_LEFT: retro_key = 276;
pub const RETROK_INSERT: retro_key = 277;
pub const RETROK_HOME: retro_key = 278;
pub const RETROK_END: retro_key = 279;
pub const RETROK_PAGEUP: retro_key = 280;
pub const RETROK_PAGEDOWN: retro_key = 281;
pub const RETROK_F1: retro_key = 282;
pub const RETROK_F2: retro_key = 283;
pub const RETROK_F3: retro_key = 284;
pub const RETROK_F4: retro_key = 285;
pub const RETROK_F5: retro_key = 286;
pub const RETROK_F6: retro_key = 287;
pub const RETROK_F7: retro_key = 288;
pub const RETROK_F8: retro_key = 289;
pub const RETROK_F9: retro_key = 290;
pub const RETROK_F10: retro_key = 291;
pub const RETROK_F11: retro_key = 292;
pub const RETROK_F12: retro_key = 293;
pub const RETROK_F13: retro_key = 294;
pub const RETROK_F14: retro_key = 295;
pub const RETROK_F15: retro_key = 296;
pub const RETROK_NUMLOCK: retro_key = 300;
pub const RETROK_CAPSLOCK: retro_key = 301;
pub const RETROK_SCROLLOCK: retro_key = 302;
pub const RETROK_RSHIFT: retro_key = 303;
pub const RETROK_LSHIFT: retro_key = 304;
pub const RETROK_RCTRL: retro_key = 305;
pub const RETROK_LCTRL: retro_key = 306;
pub const RETROK_RALT: retro_key = 307;
pub const RETROK_LALT: retro_key = 308;
pub const RETROK_RMETA: retro_key = 309;
pub const RETROK_LMETA: retro_key = 310;
pub const RETROK_LSUPER: retro_key = 311;
pub const RETROK_RSUPER: retro_key = 312;
pub const RETROK_MODE: retro_key = 313;
pub const RETROK_COMPOSE: retro_key = 314;
pub const RETROK_HELP: retro_key = 315;
pub const RETROK_PRINT: retro_key = 316;
pub const RETROK_SYSREQ: retro_key = 317;
pub const RETROK_BREAK: retro_key = 318;
pub const RETROK_MENU: retro_key = 319;
pub const RETROK_POWER: retro_key = 320;
pub const RETROK_EURO: retro_key = 321;
pub const RETROK_UNDO: retro_key = 322;
pub const RETROK_OEM_102: retro_key = 323;
pub const RETROK_LAST: retro_key = 324;

// Keyboard modifier bits (enum retro_mod).
pub const RETROKMOD_NONE: u16 = 0x0000;
pub const RETROKMOD_SHIFT: u16 = 0x01;
pub const RETROKMOD_CTRL: u16 = 0x02;
pub const RETROKMOD_ALT: u16 = 0x04;
pub const RETROKMOD_META: u16 = 0x08;
pub const RETROKMOD_NUMLOCK: u16 = 0x10;
pub const RETROKMOD_CAPSLOCK: u16 = 0x20;
pub const RETROKMOD_SCROLLOCK: u16 = 0x40;

// VFS (retro_vfs_interface) constants.
pub const RETRO_VFS_FILE_ACCESS_READ: c_uint = 1 << 0;
pub const RETRO_VFS_FILE_ACCESS_WRITE: c_uint = 1 << 1;
pub const RETRO_VFS_FILE_ACCESS_READ_WRITE: c_uint =
    RETRO_VFS_FILE_ACCESS_READ | RETRO_VFS_FILE_ACCESS_WRITE;
pub const RETRO_VFS_FILE_ACCESS_UPDATE_EXISTING: c_uint = 1 << 2;
pub const RETRO_VFS_FILE_ACCESS_HINT_NONE: c_uint = 0;
pub const RETRO_VFS_FILE_ACCESS_HINT_FREQUENT_ACCESS: c_uint = 1 << 0;
pub const RETRO_VFS_SEEK_POSITION_START: c_int = 0;
pub const RETRO_VFS_SEEK_POSITION_CURRENT: c_int = 1;
pub const RETRO_VFS_SEEK_POSITION_END: c_int = 2;
pub const RETRO_VFS_STAT_IS_VALID: c_int = 1 << 0;
pub const RETRO_VFS_STAT_IS_DIRECTORY: c_int = 1 << 1;
pub const RETRO_VFS_STAT_IS_CHARACTER_SPECIAL: c_int = 1 << 2;

/// Newest VFS interface revision this frontend implements.
pub const RETRO_VFS_INTERFACE_VERSION: u32 = 3;

#[repr(C)]
#[derive(Copy, Clone, Debug)]
/// Static core metadata filled in by `retro_get_system_info`.
pub struct retro_system_info {
    pub library_name: *const c_char,
    pub library_version: *const c_char,
    pub valid_extensions: *const c_char,
    pub need_fullpath: bool,
    pub block_extract: bool,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct retro_game_geometry {
    pub base_width: c_uint,
    pub base_height: c_uint,
    pub max_width: c_uint,
    pub max_height: c_uint,
    /// Display aspect ratio. Values <= 0.0 mean `base_width / base_height`.
    pub aspect_ratio: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct retro_system_timing {
    pub fps: f64,
    pub sample_rate: f64,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct retro_system_av_info {
    pub geometry: retro_game_geometry,
    pub timing: retro_system_timing,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
/// Content descriptor passed to `retro_load_game`.
pub struct retro_game_info {
    pub path: *const c_char,
    pub data: *const c_void,
    pub size: usize,
    pub meta: *const c_char,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct retro_message {
    pub msg: *const c_char,
    pub frames: c_uint,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
/// Key/value pair used by GET_VARIABLE and SET_VARIABLES.
///
/// SET_VARIABLES passes an array terminated by an entry whose `key` is null.
pub struct retro_variable {
    pub key: *const c_char,
    pub value: *const c_char,
}

#[repr(C)]
#[derive(Copy, Clone, Debug)]
/// SET_INPUT_DESCRIPTORS entry. Arrays end with a null `description`.
pub struct retro_input_descriptor {
    pub port: c_uint,
    pub device: c_uint,
    pub index: c_uint,
    pub id: c_uint,
    pub description: *const c_char,
}

/// Core log entry point handed out through GET_LOG_INTERFACE.
pub type retro_log_printf_t =
    Option<unsafe extern "C" fn(level: retro_log_level, fmt: *const c_char, ...)>;

#[repr(C)]
#[derive(Copy, Clone)]
pub struct retro_log_callback {
    pub log: retro_log_printf_t,
}

/// Core-side keyboard handler registered through SET_KEYBOARD_CALLBACK.
pub type retro_keyboard_event_t = Option<
    unsafe extern "C" fn(down: bool, keycode: c_uint, character: u32, key_modifiers: u16),
>;

#[repr(C)]
#[derive(Copy, Clone)]
pub struct retro_keyboard_callback {
    pub callback: retro_keyboard_event_t,
}

/// Microseconds.
pub type retro_usec_t = i64;

pub type retro_frame_time_callback_t = Option<unsafe extern "C" fn(usec: retro_usec_t)>;

#[repr(C)]
#[derive(Copy, Clone)]
pub struct retro_frame_time_callback {
    pub callback: retro_frame_time_callback_t,
    /// Frame duration the core assumes when no real measurement exists.
    pub reference: retro_usec_t,
}

pub type retro_audio_callback_t = Option<unsafe extern "C" fn()>;
pub type retro_audio_set_state_callback_t = Option<unsafe extern "C" fn(enabled: bool)>;

#[repr(C)]
#[derive(Copy, Clone)]
pub struct retro_audio_callback {
    pub callback: retro_audio_callback_t,
    pub set_state: retro_audio_set_state_callback_t,
}

pub type retro_perf_tick_t = u64;
pub type retro_time_t = i64;

#[repr(C)]
#[derive(Copy, Clone, Debug)]
/// Core-owned profiling counter. The frontend only updates its fields.
pub struct retro_perf_counter {
    pub ident: *const c_char,
    pub start: retro_perf_tick_t,
    pub total: retro_perf_tick_t,
    pub call_cnt: retro_perf_tick_t,
    pub registered: bool,
}

pub type retro_perf_get_time_usec_t = Option<unsafe extern "C" fn() -> retro_time_t>;
pub type retro_perf_get_counter_t = Option<unsafe extern "C" fn() -> retro_perf_tick_t>;
pub type retro_get_cpu_features_t = Option<unsafe extern "C" fn() -> u64>;
pub type retro_perf_log_t = Option<unsafe extern "C" fn()>;
pub type retro_perf_register_t = Option<unsafe extern "C" fn(counter: *mut retro_perf_counter)>;
pub type retro_perf_start_t = Option<unsafe extern "C" fn(counter: *mut retro_perf_counter)>;
pub type retro_perf_stop_t = Option<unsafe extern "C" fn(counter: *mut retro_perf_counter)>;

#[repr(C)]
#[derive(Copy, Clone)]
pub struct retro_perf_callback {
    pub get_time_usec: retro_perf_get_time_usec_t,
    pub get_cpu_features: retro_get_cpu_features_t,
    pub get_perf_counter: retro_perf_get_counter_t,
    pub perf_register: retro_perf_register_t,
    pub perf_start: retro_perf_start_t,
    pub perf_stop: retro_perf_stop_t,
    pub perf_log: retro_perf_log_t,
}

#[repr(C)]
/// Opaque frontend-defined file handle.
pub struct retro_vfs_file_handle {
    _private: [u8; 0],
}

#[repr(C)]
/// Opaque frontend-defined directory handle.
pub struct retro_vfs_dir_handle {
    _private: [u8; 0],
}

pub type retro_vfs_get_path_t =
    Option<unsafe extern "C" fn(stream: *mut retro_vfs_file_handle) -> *const c_char>;
pub type retro_vfs_open_t = Option<
    unsafe extern "C" fn(
        path: *const c_char,
        mode: c_uint,
        hints: c_uint,
    ) -> *mut retro_vfs_file_handle,
>;
pub type retro_vfs_close_t = Option<unsafe extern "C" fn(stream: *mut retro_vfs_file_handle) -> c_int>;
pub type retro_vfs_size_t = Option<unsafe extern "C" fn(stream: *mut retro_vfs_file_handle) -> i64>;
pub type retro_vfs_truncate_t =
    Option<unsafe extern "C" fn(stream: *mut retro_vfs_file_handle, length: i64) -> i64>;
pub type retro_vfs_tell_t = Option<unsafe extern "C" fn(stream: *mut retro_vfs_file_handle) -> i64>;
pub type retro_vfs_seek_t = Option<
    unsafe extern "C" fn(stream: *mut retro_vfs_file_handle, offset: i64, seek_position: c_int) -> i64,
>;
pub type retro_vfs_read_t = Option<
    unsafe extern "C" fn(stream: *mut retro_vfs_file_handle, s: *mut c_void, len: u64) -> i64,
>;
pub type retro_vfs_write_t = Option<
    unsafe extern "C" fn(stream: *mut retro_vfs_file_handle, s: *const c_void, len: u64) -> i64,
>;
pub type retro_vfs_flush_t = Option<unsafe extern "C" fn(stream: *mut retro_vfs_file_handle) -> c_int>;
pub type retro_vfs_remove_t = Option<unsafe extern "C" fn(path: *const c_char) -> c_int>;
pub type retro_vfs_rename_t =
    Option<unsafe extern "C" fn(old_path: *const c_char, new_path: *const c_char) -> c_int>;
pub type retro_vfs_stat_t = Option<unsafe extern "C" fn(path: *const c_char, size: *mut i32) -> c_int>;
pub type retro_vfs_mkdir_t = Option<unsafe extern "C" fn(dir: *const c_char) -> c_int>;
pub type retro_vfs_opendir_t = Option<
    unsafe extern "C" fn(dir: *const c_char, include_hidden: bool) -> *mut retro_vfs_dir_handle,
>;
pub type retro_vfs_readdir_t = Option<unsafe extern "C" fn(dirstream: *mut retro_vfs_dir_handle) -> bool>;
pub type retro_vfs_dirent_get_name_t =
    Option<unsafe extern "C" fn(dirstream: *mut retro_vfs_dir_handle) -> *const c_char>;
pub type retro_vfs_dirent_is_dir_t =
    Option<unsafe extern "C" fn(dirstream: *mut retro_vfs_dir_handle) -> bool>;
pub type retro_vfs_closedir_t = Option<unsafe extern "C" fn(dirstream: *mut retro_vfs_dir_handle) -> c_int>;

#[repr(C)]
#[derive(Copy, Clone)]
/// VFS function table, revisions 1 through 3 in declaration order.
pub struct retro_vfs_interface {
    pub get_path: retro_vfs_get_path_t,
    pub open: retro_vfs_open_t,
    pub close: retro_vfs_close_t,
    pub size: retro_vfs_size_t,
    pub tell: retro_vfs_tell_t,
    pub seek: retro_vfs_seek_t,
    pub read: retro_vfs_read_t,
    pub write: retro_vfs_write_t,
    pub flush: retro_vfs_flush_t,
    pub remove: retro_vfs_remove_t,
    pub rename: retro_vfs_rename_t,
    pub truncate: retro_vfs_truncate_t,
    pub stat: retro_vfs_stat_t,
    pub mkdir: retro_vfs_mkdir_t,
    pub opendir: retro_vfs_opendir_t,
    pub readdir: retro_vfs_readdir_t,
    pub dirent_get_name: retro_vfs_dirent_get_name_t,
    pub dirent_is_dir: retro_vfs_dirent_is_dir_t,
    pub closedir: retro_vfs_closedir_t,
}

#[repr(C)]
#[derive(Copy, Clone)]
/// GET_VFS_INTERFACE payload. The frontend fills `iface` when it can serve
/// `required_interface_version`.
pub struct retro_vfs_interface_info {
    pub required_interface_version: u32,
    pub iface: *mut retro_vfs_interface,
}

// Callbacks the frontend registers with the core.

/// Environment callback: `cmd` selects the request, `data` is its payload.
pub type retro_environment_t = Option<unsafe extern "C" fn(cmd: c_uint, data: *mut c_void) -> bool>;
/// Video refresh. `data` is null when the core repeats the previous frame.
pub type retro_video_refresh_t =
    Option<unsafe extern "C" fn(data: *const c_void, width: c_uint, height: c_uint, pitch: usize)>;
/// One stereo frame.
pub type retro_audio_sample_t = Option<unsafe extern "C" fn(left: i16, right: i16)>;
/// Interleaved stereo frames. Returns the number of frames consumed.
pub type retro_audio_sample_batch_t =
    Option<unsafe extern "C" fn(data: *const i16, frames: usize) -> usize>;
pub type retro_input_poll_t = Option<unsafe extern "C" fn()>;
pub type retro_input_state_t =
    Option<unsafe extern "C" fn(port: c_uint, device: c_uint, index: c_uint, id: c_uint) -> i16>;

// Entry points exported by a core library. These are bound non-null.

pub type retro_set_environment_fn = unsafe extern "C" fn(cb: retro_environment_t);
pub type retro_set_video_refresh_fn = unsafe extern "C" fn(cb: retro_video_refresh_t);
pub type retro_set_audio_sample_fn = unsafe extern "C" fn(cb: retro_audio_sample_t);
pub type retro_set_audio_sample_batch_fn = unsafe extern "C" fn(cb: retro_audio_sample_batch_t);
pub type retro_set_input_poll_fn = unsafe extern "C" fn(cb: retro_input_poll_t);
pub type retro_set_input_state_fn = unsafe extern "C" fn(cb: retro_input_state_t);
pub type retro_init_fn = unsafe extern "C" fn();
pub type retro_deinit_fn = unsafe extern "C" fn();
pub type retro_api_version_fn = unsafe extern "C" fn() -> c_uint;
pub type retro_get_system_info_fn = unsafe extern "C" fn(info: *mut retro_system_info);
pub type retro_get_system_av_info_fn = unsafe extern "C" fn(info: *mut retro_system_av_info);
pub type retro_set_controller_port_device_fn = unsafe extern "C" fn(port: c_uint, device: c_uint);
pub type retro_reset_fn = unsafe extern "C" fn();
pub type retro_run_fn = unsafe extern "C" fn();
pub type retro_serialize_size_fn = unsafe extern "C" fn() -> usize;
pub type retro_serialize_fn = unsafe extern "C" fn(data: *mut c_void, size: usize) -> bool;
pub type retro_unserialize_fn = unsafe extern "C" fn(data: *const c_void, size: usize) -> bool;
pub type retro_cheat_reset_fn = unsafe extern "C" fn();
pub type retro_cheat_set_fn = unsafe extern "C" fn(index: c_uint, enabled: bool, code: *const c_char);
pub type retro_load_game_fn = unsafe extern "C" fn(game: *const retro_game_info) -> bool;
pub type retro_load_game_special_fn =
    unsafe extern "C" fn(game_type: c_uint, info: *const retro_game_info, num_info: usize) -> bool;
pub type retro_unload_game_fn = unsafe extern "C" fn();
pub type retro_get_region_fn = unsafe extern "C" fn() -> c_uint;
pub type retro_get_memory_data_fn = unsafe extern "C" fn(id: c_uint) -> *mut c_void;
pub type retro_get_memory_size_fn = unsafe extern "C" fn(id: c_uint) -> usize;

/// Receives each formatted core log line from the C shim.
pub type retroframe_log_sink_t = Option<unsafe extern "C" fn(level: retro_log_level, message: *const c_char)>;

unsafe extern "C" {
    /// Install (or clear, with `None`) the sink that receives formatted lines.
    pub fn retroframe_set_log_sink(sink: retroframe_log_sink_t);

    /// `printf`-style logger handed to cores as `retro_log_callback::log`.
    pub fn retroframe_log_printf(level: retro_log_level, fmt: *const c_char, ...);
}
