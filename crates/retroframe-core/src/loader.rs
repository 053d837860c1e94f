use std::fmt;
use std::mem::MaybeUninit;
use std::os::raw::c_void;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use retroframe_sys as sys;

use crate::error::LoadError;
use crate::system::SystemInfo;

/// Resolves exported symbols by name.
///
/// Implemented by [`CoreLibrary`] for real shared objects; tests provide their
/// own implementation backed by in-process functions.
pub trait SymbolSource {
    /// Address of `name`, or `None` if it is not exported.
    fn symbol(&self, name: &str) -> Option<*const c_void>;
}

/// A core shared library opened with `libloading`.
pub struct CoreLibrary {
    library: libloading::Library,
}

impl CoreLibrary {
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        // SAFETY: loading a library runs its initializers. Loading arbitrary
        // native code is the point of this type.
        let library = unsafe { libloading::Library::new(path) }.map_err(|source| {
            LoadError::OpenFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self { library })
    }
}

impl SymbolSource for CoreLibrary {
    fn symbol(&self, name: &str) -> Option<*const c_void> {
        // SAFETY: the address is only reinterpreted by `CoreApi::bind`, which
        // knows each entry point's signature.
        let symbol = unsafe { self.library.get::<*const c_void>(name.as_bytes()) }.ok()?;
        let address = *symbol;
        (!address.is_null()).then_some(address)
    }
}

impl fmt::Debug for CoreLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreLibrary").finish_non_exhaustive()
    }
}

fn resolve(source: &dyn SymbolSource, name: &str, missing: &mut Vec<String>) -> Option<*const c_void> {
    let address = source.symbol(name);
    if address.is_none() {
        error!("Core does not export `{name}`");
        missing.push(name.to_owned());
    }
    address
}

macro_rules! core_api {
    ($($name:ident: $ty:ty,)*) => {
        /// Every entry point a libretro core must export, bound to callable
        /// function pointers. Field names are the exported symbol names.
        #[derive(Copy, Clone)]
        pub struct CoreApi {
            $(pub $name: $ty,)*
        }

        impl CoreApi {
            /// Symbol names in binding order.
            pub const SYMBOLS: &'static [&'static str] = &[$(stringify!($name)),*];

            /// Resolves every entry point. Fails with all missing names if any
            /// lookup fails; nothing partially bound escapes.
            pub fn bind(source: &dyn SymbolSource) -> Result<Self, LoadError> {
                let mut missing = Vec::new();
                $(let $name = resolve(source, stringify!($name), &mut missing);)*

                match ($($name,)*) {
                    ($(Some($name),)*) => Ok(Self {
                        // SAFETY: each symbol is a libretro entry point with the
                        // signature declared in `retro_*_fn`.
                        $($name: unsafe { std::mem::transmute::<*const c_void, $ty>($name) },)*
                    }),
                    _ => {
                        let mut missing = missing.into_iter();
                        let name = missing.next().unwrap_or_default();
                        Err(LoadError::MissingSymbol {
                            name,
                            also_missing: missing.collect(),
                        })
                    }
                }
            }
        }
    };
}

core_api! {
    retro_init: sys::retro_init_fn,
    retro_deinit: sys::retro_deinit_fn,
    retro_api_version: sys::retro_api_version_fn,
    retro_get_system_info: sys::retro_get_system_info_fn,
    retro_get_system_av_info: sys::retro_get_system_av_info_fn,
    retro_set_environment: sys::retro_set_environment_fn,
    retro_set_video_refresh: sys::retro_set_video_refresh_fn,
    retro_set_audio_sample: sys::retro_set_audio_sample_fn,
    retro_set_audio_sample_batch: sys::retro_set_audio_sample_batch_fn,
    retro_set_input_poll: sys::retro_set_input_poll_fn,
    retro_set_input_state: sys::retro_set_input_state_fn,
    retro_set_controller_port_device: sys::retro_set_controller_port_device_fn,
    retro_reset: sys::retro_reset_fn,
    retro_run: sys::retro_run_fn,
    retro_serialize_size: sys::retro_serialize_size_fn,
    retro_serialize: sys::retro_serialize_fn,
    retro_unserialize: sys::retro_unserialize_fn,
    retro_cheat_reset: sys::retro_cheat_reset_fn,
    retro_cheat_set: sys::retro_cheat_set_fn,
    retro_load_game: sys::retro_load_game_fn,
    retro_load_game_special: sys::retro_load_game_special_fn,
    retro_unload_game: sys::retro_unload_game_fn,
    retro_get_region: sys::retro_get_region_fn,
    retro_get_memory_data: sys::retro_get_memory_data_fn,
    retro_get_memory_size: sys::retro_get_memory_size_fn,
}

impl fmt::Debug for CoreApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreApi").finish_non_exhaustive()
    }
}

/// A bound, version-checked core and its static metadata.
///
/// Holding a `CoreHandle` keeps the library mapped. Nothing here calls
/// `retro_init`; that belongs to the lifecycle controller.
pub struct CoreHandle {
    api: CoreApi,
    api_version: u32,
    info: SystemInfo,
    path: PathBuf,
    // Dropped last: the function pointers above point into this mapping.
    _source: Box<dyn SymbolSource>,
}

impl CoreHandle {
    /// Opens the shared library at `path` and binds it.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let library = CoreLibrary::open(path)?;
        Self::from_source(path, Box::new(library))
    }

    /// Binds an already-open symbol source, checks the API version and
    /// copies out the system info.
    pub fn from_source(path: &Path, source: Box<dyn SymbolSource>) -> Result<Self, LoadError> {
        let api = CoreApi::bind(source.as_ref())?;

        let api_version = unsafe { (api.retro_api_version)() };
        if api_version != sys::RETRO_API_VERSION {
            error!(
                "{} speaks libretro API {api_version}, expected {}",
                path.display(),
                sys::RETRO_API_VERSION
            );
            return Err(LoadError::IncompatibleVersion {
                found: api_version,
                expected: sys::RETRO_API_VERSION,
            });
        }

        let mut raw = MaybeUninit::<sys::retro_system_info>::zeroed();
        // SAFETY: `raw` is a zeroed (all-null, all-false) system info the core fills in.
        let info = unsafe {
            (api.retro_get_system_info)(raw.as_mut_ptr());
            SystemInfo::from_raw(&raw.assume_init())
        };
        info!(
            "Loaded core {} {} from {}",
            info.library_name,
            info.library_version,
            path.display()
        );
        debug!(
            "Core extensions: {:?}, need_fullpath: {}",
            info.valid_extensions, info.need_fullpath
        );

        Ok(Self {
            api,
            api_version,
            info,
            path: path.to_path_buf(),
            _source: source,
        })
    }

    pub fn api(&self) -> &CoreApi {
        &self.api
    }

    pub fn api_version(&self) -> u32 {
        self.api_version
    }

    pub fn info(&self) -> &SystemInfo {
        &self.info
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for CoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreHandle")
            .field("path", &self.path)
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl SymbolSource for Empty {
        fn symbol(&self, _name: &str) -> Option<*const c_void> {
            None
        }
    }

    #[test]
    fn binding_reports_every_missing_symbol() {
        let Err(LoadError::MissingSymbol { name, also_missing }) = CoreApi::bind(&Empty) else {
            panic!("binding an empty source must fail");
        };
        assert_eq!(name, "retro_init");
        assert_eq!(also_missing.len(), CoreApi::SYMBOLS.len() - 1);
        assert_eq!(CoreApi::SYMBOLS.len(), 25);
    }

    #[test]
    fn missing_files_are_reported_before_opening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_libretro.so");
        assert!(matches!(CoreLibrary::open(&path), Err(LoadError::NotFound(p)) if p == path));
    }

    #[test]
    fn non_libraries_fail_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake_libretro.so");
        std::fs::write(&path, b"not a shared object").unwrap();
        assert!(matches!(
            CoreHandle::load(&path),
            Err(LoadError::OpenFailed { .. })
        ));
    }
}
