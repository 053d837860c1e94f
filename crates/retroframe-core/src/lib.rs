//! Host-side bridge for libretro cores.
//!
//! This crate loads a libretro core from a shared library, answers the core's
//! environment queries and shuttles video, audio and input between the core and
//! a frontend. The frontend plugs in through the [`Host`] trait; it never sees
//! raw libretro callbacks. [`Frontend`] is the entry point and owns the whole
//! lifecycle (load core, load content, run frames, close).

/// Audio sink that forwards interleaved stereo batches to the host stream.
pub mod audio;

/// Per-thread pointer to the bridge that libretro callbacks dispatch into.
mod context;

/// Environment command decoding and dispatch.
pub mod environment;

/// Error and warning taxonomy.
pub mod error;

/// Lifecycle controller: the public face of the bridge.
pub mod frontend;

/// Services a frontend provides to the bridge.
pub mod host;

/// Device queries (joypad, mouse, keyboard, pointer) answered from host state.
pub mod input;

/// Libretro keyboard codes and joypad ids mapped to host keys and buttons.
pub mod keymap;

/// Dynamic library loading and entry point binding.
pub mod loader;

/// Bridges the core's printf-style log interface into `log`.
pub mod logging;

/// libretro performance interface.
pub mod perf;

/// Save-state file naming and I/O.
pub mod savestate;

/// Owned copies of the core's system and A/V descriptions.
pub mod system;

/// Core-declared option variables.
pub mod variables;

/// libretro virtual file system backed by `std::fs`.
pub mod vfs;

/// Pixel conversion and the display surface.
pub mod video;

mod bridge;

pub use error::{ContentError, LoadError, RuntimeWarning, StateError};
pub use frontend::{BridgeConfig, CoreMessage, Frontend, LifecycleState};
pub use host::{AudioStreamId, GamepadButton, Host, MouseButton, TextureFormat, TextureId};
pub use keymap::Key;
pub use loader::{CoreApi, CoreHandle, CoreLibrary, SymbolSource};
pub use system::{AvInfo, Geometry, PixelFormat, SystemInfo, Timing};
pub use video::{DisplaySurface, Rect, fit_rect};
