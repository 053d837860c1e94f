use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::ptr;
use std::time::Instant;

use log::{debug, error, info, warn};
use retroframe_sys as sys;

use crate::audio::AudioSink;
use crate::bridge::{self, Bridge};
use crate::context::ActiveBridge;
use crate::error::{ContentError, LoadError, RuntimeWarning, StateError, WarningCounts};
use crate::host::Host;
use crate::loader::{CoreApi, CoreHandle, SymbolSource};
use crate::logging;
use crate::savestate;
use crate::system::{AvInfo, PixelFormat};
use crate::variables::CoreVariables;
use crate::vfs;
use crate::video::DisplaySurface;

/// Where the frontend is in a core's life.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Unloaded,
    CoreLoaded,
    ContentLoaded,
    Running,
    Closing,
}

/// The last on-screen message a core asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreMessage {
    pub text: String,
    /// How many frames the core wants the message shown for.
    pub frames: u32,
}

/// Values the bridge answers environment queries with.
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    pub system_directory: PathBuf,
    pub save_directory: PathBuf,
    pub core_assets_directory: PathBuf,
    pub username: String,
    /// A `RETRO_LANGUAGE_*` id.
    pub language: u32,
    pub max_users: u32,
    /// Core option values chosen by the user, keyed by option name.
    pub variable_overrides: HashMap<String, String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            system_directory: cwd.clone(),
            save_directory: cwd.clone(),
            core_assets_directory: cwd,
            username: "retroframe".to_owned(),
            language: sys::RETRO_LANGUAGE_ENGLISH,
            max_users: 1,
            variable_overrides: HashMap::new(),
        }
    }
}

/// Owns one core at a time and everything the core talks to.
///
/// Every call into the core publishes the bridge for the current thread, so
/// the core's callbacks land here. All methods must be called from the thread
/// that created the frontend.
pub struct Frontend {
    bridge: Box<Bridge>,
    core: Option<CoreHandle>,
    state: LifecycleState,
}

impl Frontend {
    pub fn new(host: Box<dyn Host>, config: BridgeConfig) -> Self {
        logging::install_sink();
        Self {
            bridge: Box::new(Bridge::new(host, &config)),
            core: None,
            state: LifecycleState::Unloaded,
        }
    }

    /// Loads the core at `path` and initializes it. Any core already loaded is
    /// closed first.
    pub fn init_core(&mut self, path: &Path) -> Result<(), LoadError> {
        self.close();
        let core = CoreHandle::load(path)?;
        self.start_core(core);
        Ok(())
    }

    /// Like [`init_core`](Self::init_core) for an already-open symbol source.
    pub fn init_core_from(
        &mut self,
        path: &Path,
        source: Box<dyn SymbolSource>,
    ) -> Result<(), LoadError> {
        self.close();
        let core = CoreHandle::from_source(path, source)?;
        self.start_core(core);
        Ok(())
    }

    fn start_core(&mut self, core: CoreHandle) {
        self.bridge.libretro_path = bridge::path_to_c_string(core.path());
        self.core = Some(core);

        self.with_core(|api| unsafe {
            // The core may negotiate inside set_environment, so it goes first.
            (api.retro_set_environment)(Some(bridge::cb_environment));
            (api.retro_set_video_refresh)(Some(bridge::cb_video_refresh));
            (api.retro_set_audio_sample)(Some(bridge::cb_audio_sample));
            (api.retro_set_audio_sample_batch)(Some(bridge::cb_audio_sample_batch));
            (api.retro_set_input_poll)(Some(bridge::cb_input_poll));
            (api.retro_set_input_state)(Some(bridge::cb_input_state));
            (api.retro_init)();
        });

        self.state = LifecycleState::CoreLoaded;
        debug!("Core initialized");
    }

    /// Hands content to the core. `None` starts a core that runs without
    /// content. On failure the core stays loaded and another file can be tried.
    pub fn load_content(&mut self, path: Option<&Path>) -> Result<(), ContentError> {
        let Some(core) = self.core.as_ref() else {
            return Err(ContentError::NoCore);
        };
        let need_fullpath = core.info().need_fullpath;
        self.unload_content();

        let loaded = match path {
            None => {
                if !self.bridge.supports_no_content {
                    error!("Core needs content to start");
                    return Err(ContentError::ContentRequired);
                }
                let game = sys::retro_game_info {
                    path: c"".as_ptr(),
                    data: ptr::null(),
                    size: 0,
                    meta: c"".as_ptr(),
                };
                self.with_core(|api| unsafe { (api.retro_load_game)(&game) })
            }
            Some(path) => {
                if !path.is_file() {
                    error!("Content not found: {}", path.display());
                    return Err(ContentError::NotFound(path.to_path_buf()));
                }
                let c_path = vfs::to_c_path(path)
                    .ok_or_else(|| ContentError::InvalidPath(path.to_path_buf()))?;

                let data = if need_fullpath {
                    None
                } else {
                    let bytes = fs::read(path).map_err(|source| ContentError::ReadFailed {
                        path: path.to_path_buf(),
                        source,
                    })?;
                    if bytes.is_empty() {
                        return Err(ContentError::Empty(path.to_path_buf()));
                    }
                    Some(bytes)
                };

                let game = sys::retro_game_info {
                    path: c_path.as_ptr(),
                    data: data.as_ref().map_or(ptr::null(), |bytes| bytes.as_ptr().cast()),
                    size: data.as_ref().map_or(0, Vec::len),
                    meta: ptr::null(),
                };
                debug!(
                    "Loading {} ({})",
                    path.display(),
                    if need_fullpath {
                        "by path".to_owned()
                    } else {
                        format!("{} bytes", game.size)
                    }
                );
                let loaded = self.with_core(|api| unsafe { (api.retro_load_game)(&game) });
                drop(data);
                loaded
            }
        };

        if loaded != Some(true) {
            error!("Core rejected the content");
            return Err(ContentError::RejectedByCore(path.map(Path::to_path_buf)));
        }

        self.state = LifecycleState::ContentLoaded;
        self.start_media();
        info!(
            "Content loaded: {}x{} @ {} fps",
            self.bridge.av_info.geometry.base_width,
            self.bridge.av_info.geometry.base_height,
            self.bridge.av_info.target_fps()
        );
        Ok(())
    }

    /// Reads A/V info and recreates the surface and the audio sink from it.
    fn start_media(&mut self) {
        let mut raw = sys::retro_system_av_info::default();
        self.with_core(|api| unsafe { (api.retro_get_system_av_info)(&mut raw) });
        self.bridge.av_info = AvInfo::from(raw);

        let geometry = self.bridge.av_info.geometry;
        self.bridge.recreate_surface(geometry.base_width, geometry.base_height);
        self.bridge.recreate_audio();

        let set_state = self.bridge.audio_callback.and_then(|callback| callback.set_state);
        if let Some(set_state) = set_state {
            self.with_core(|_| unsafe { set_state(true) });
        }
    }

    /// Unloads content, keeping the core loaded. Does nothing without content.
    pub fn unload_content(&mut self) {
        if !self.is_content_loaded() {
            return;
        }
        self.with_core(|api| unsafe { (api.retro_unload_game)() });
        self.state = LifecycleState::CoreLoaded;
        debug!("Content unloaded");
    }

    /// Runs one core frame. Returns `false` without calling the core when no
    /// content is loaded.
    pub fn run_frame(&mut self) -> bool {
        if !self.is_content_loaded() {
            return false;
        }
        self.state = LifecycleState::Running;

        let frame_time_callback = self.bridge.frame_time_callback;
        let frame_time = frame_time_callback.and_then(|frame_time| {
            let callback = frame_time.callback?;
            Some((callback, self.frame_delta(frame_time.reference)))
        });
        let audio_callback = self.bridge.audio_callback.and_then(|callback| callback.callback);
        let keyboard = self
            .bridge
            .keyboard_callback
            .map(|callback| (callback, self.bridge.keyboard_events()));

        self.with_core(|api| unsafe {
            if let Some((callback, usec)) = frame_time {
                callback(usec);
            }
            if let Some(callback) = audio_callback {
                callback();
            }
            if let Some((callback, events)) = keyboard {
                for (down, keycode, modifiers) in events {
                    callback(down, keycode, 0, modifiers);
                }
            }
            (api.retro_run)();
        });

        if self.bridge.audio_stale {
            debug!("Sample rate changed; reopening audio");
            self.bridge.recreate_audio();
        }
        true
    }

    /// Microseconds since the previous frame, or `reference` on the first one.
    fn frame_delta(&mut self, reference: sys::retro_usec_t) -> sys::retro_usec_t {
        let now = Instant::now();
        let delta = match self.bridge.last_frame_at {
            Some(previous) => {
                i64::try_from(now.duration_since(previous).as_micros()).unwrap_or(i64::MAX)
            }
            None => reference,
        };
        self.bridge.last_frame_at = Some(now);
        delta
    }

    /// Soft-resets the running content.
    pub fn reset(&mut self) -> bool {
        if !self.is_content_loaded() {
            return false;
        }
        info!("Resetting core");
        self.with_core(|api| unsafe { (api.retro_reset)() }).is_some()
    }

    /// Tells the core which device type is plugged into `port`.
    pub fn set_controller_port_device(&mut self, port: u32, device: u32) {
        self.with_core(|api| unsafe { (api.retro_set_controller_port_device)(port, device) });
    }

    /// The core's state blob.
    pub fn serialize(&mut self) -> Result<Vec<u8>, StateError> {
        let size = self.serialize_size()?;
        let mut buffer = vec![0u8; size];
        let saved = self
            .with_core(|api| unsafe { (api.retro_serialize)(buffer.as_mut_ptr().cast(), size) });
        if saved != Some(true) {
            return Err(StateError::Failed("save"));
        }
        Ok(buffer)
    }

    /// Restores a blob produced by [`serialize`](Self::serialize).
    pub fn unserialize(&mut self, data: &[u8]) -> Result<(), StateError> {
        self.serialize_size()?;
        let restored = self
            .with_core(|api| unsafe { (api.retro_unserialize)(data.as_ptr().cast(), data.len()) });
        if restored != Some(true) {
            return Err(StateError::Failed("restore"));
        }
        Ok(())
    }

    fn serialize_size(&mut self) -> Result<usize, StateError> {
        if !self.is_content_loaded() {
            return Err(StateError::NoContent);
        }
        let size = self
            .with_core(|api| unsafe { (api.retro_serialize_size)() })
            .unwrap_or(0);
        if size == 0 {
            warn!("Core does not support save states");
            self.bridge.warn(RuntimeWarning::SerializeUnsupported);
            return Err(StateError::Unsupported);
        }
        Ok(size)
    }

    /// Writes `save_<core>.sav` into `dir`.
    pub fn save_state_to_file(&mut self, dir: &Path) -> Result<PathBuf, StateError> {
        let data = self.serialize()?;
        let path = savestate::state_path(dir, self.core_name().unwrap_or_default());
        savestate::write_state(&path, &data)?;
        info!("Saved state to {}", path.display());
        Ok(path)
    }

    /// Restores `save_<core>.sav` from `dir`.
    pub fn load_state_from_file(&mut self, dir: &Path) -> Result<PathBuf, StateError> {
        if !self.is_content_loaded() {
            return Err(StateError::NoContent);
        }
        let path = savestate::state_path(dir, self.core_name().unwrap_or_default());
        let data = savestate::read_state(&path)?;
        self.unserialize(&data)?;
        info!("Loaded state from {}", path.display());
        Ok(path)
    }

    /// Unloads content, deinitializes the core and unmaps it. Safe to call in
    /// any state, any number of times.
    pub fn close(&mut self) {
        if self.core.is_none() {
            return;
        }
        self.unload_content();
        self.state = LifecycleState::Closing;

        let set_state = self.bridge.audio_callback.and_then(|callback| callback.set_state);
        self.with_core(|api| unsafe {
            if let Some(set_state) = set_state {
                set_state(false);
            }
            (api.retro_deinit)();
        });

        self.bridge.release_surface();
        self.bridge.release_audio();
        if let Some(core) = self.core.take() {
            info!("Closed core {}", core.info().library_name);
        }
        self.bridge.reset_core_state();
        self.state = LifecycleState::Unloaded;
    }

    /// Calls into the core with this frontend's bridge published.
    fn with_core<R>(&mut self, f: impl FnOnce(&CoreApi) -> R) -> Option<R> {
        let api = *self.core.as_ref()?.api();
        let _active = ActiveBridge::enter(&mut *self.bridge);
        Some(f(&api))
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn core(&self) -> Option<&CoreHandle> {
        self.core.as_ref()
    }

    pub fn core_name(&self) -> Option<&str> {
        self.core.as_ref().map(|core| core.info().library_name.as_str())
    }

    pub fn core_version(&self) -> Option<&str> {
        self.core
            .as_ref()
            .map(|core| core.info().library_version.as_str())
    }

    pub fn core_extensions(&self) -> Option<&str> {
        self.core
            .as_ref()
            .map(|core| core.info().valid_extensions.as_str())
    }

    /// Whether the loaded core refuses to start without content.
    pub fn needs_content(&self) -> bool {
        self.core.is_some() && !self.bridge.supports_no_content
    }

    pub fn is_core_loaded(&self) -> bool {
        self.core.is_some()
    }

    pub fn is_content_loaded(&self) -> bool {
        matches!(
            self.state,
            LifecycleState::ContentLoaded | LifecycleState::Running
        )
    }

    /// The core asked to be shut down.
    pub fn should_close(&self) -> bool {
        self.bridge.shutdown_requested
    }

    pub fn av_info(&self) -> &AvInfo {
        &self.bridge.av_info
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.bridge.pixel_format
    }

    pub fn surface(&self) -> Option<&DisplaySurface> {
        self.bridge.surface.as_ref()
    }

    pub fn audio(&self) -> Option<&AudioSink> {
        self.bridge.audio.as_ref()
    }

    pub fn last_message(&self) -> Option<&CoreMessage> {
        self.bridge.last_message.as_ref()
    }

    pub fn take_message(&mut self) -> Option<CoreMessage> {
        self.bridge.last_message.take()
    }

    pub fn warnings(&self) -> &WarningCounts {
        &self.bridge.warnings
    }

    pub fn variables(&self) -> &CoreVariables {
        &self.bridge.variables
    }

    /// Core options can be changed between frames; the core sees the change
    /// through GET_VARIABLE_UPDATE.
    pub fn variables_mut(&mut self) -> &mut CoreVariables {
        &mut self.bridge.variables
    }

    pub fn host(&self) -> &dyn Host {
        self.bridge.host.as_ref()
    }

    pub fn host_mut(&mut self) -> &mut dyn Host {
        self.bridge.host.as_mut()
    }
}

impl Drop for Frontend {
    fn drop(&mut self) {
        self.close();
    }
}
