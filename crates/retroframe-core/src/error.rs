use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Why a core library could not be brought up.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("core library not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to open core library {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("{}", missing_symbol_message(.name, .also_missing))]
    MissingSymbol {
        name: String,
        also_missing: Vec<String>,
    },

    #[error("core reports libretro API version {found}, expected {expected}")]
    IncompatibleVersion { found: u32, expected: u32 },
}

fn missing_symbol_message(name: &str, also_missing: &[String]) -> String {
    if also_missing.is_empty() {
        format!("core is missing required symbol `{name}`")
    } else {
        format!(
            "core is missing required symbol `{name}` (and {} more)",
            also_missing.len()
        )
    }
}

/// Why content could not be handed to the core.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("no core is loaded")]
    NoCore,

    #[error("core requires content but none was given")]
    ContentRequired,

    #[error("content not found: {0}")]
    NotFound(PathBuf),

    #[error("content path cannot be passed to the core: {0}")]
    InvalidPath(PathBuf),

    #[error("failed to read content {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("content file is empty: {0}")]
    Empty(PathBuf),

    #[error("core rejected content{}", display_path(.0))]
    RejectedByCore(Option<PathBuf>),
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" {}", path.display()),
        None => String::new(),
    }
}

/// Save-state failures.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("no content is loaded")]
    NoContent,

    #[error("core does not support save states")]
    Unsupported,

    #[error("core failed to {0} its state")]
    Failed(&'static str),

    #[error("save-state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Non-fatal conditions observed while the core runs.
///
/// These are logged and counted, never returned through a callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuntimeWarning {
    UnknownEnvironmentCommand(u32),
    NoVideoData,
    SerializeUnsupported,
}

impl fmt::Display for RuntimeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeWarning::UnknownEnvironmentCommand(cmd) => {
                write!(f, "unhandled environment command {cmd}")
            }
            RuntimeWarning::NoVideoData => f.write_str("video refresh without frame data"),
            RuntimeWarning::SerializeUnsupported => f.write_str("core reports serialize size 0"),
        }
    }
}

/// Per-kind counters for [`RuntimeWarning`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WarningCounts {
    pub unknown_environment_commands: u64,
    pub missing_video_frames: u64,
    pub unsupported_serialize: u64,
}

impl WarningCounts {
    pub(crate) fn record(&mut self, warning: RuntimeWarning) {
        let slot = match warning {
            RuntimeWarning::UnknownEnvironmentCommand(_) => &mut self.unknown_environment_commands,
            RuntimeWarning::NoVideoData => &mut self.missing_video_frames,
            RuntimeWarning::SerializeUnsupported => &mut self.unsupported_serialize,
        };
        *slot = slot.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_symbol_reports_first_name_and_count() {
        let err = LoadError::MissingSymbol {
            name: "retro_run".into(),
            also_missing: vec!["retro_reset".into(), "retro_init".into()],
        };
        assert_eq!(
            err.to_string(),
            "core is missing required symbol `retro_run` (and 2 more)"
        );

        let err = LoadError::MissingSymbol {
            name: "retro_run".into(),
            also_missing: Vec::new(),
        };
        assert_eq!(err.to_string(), "core is missing required symbol `retro_run`");
    }

    #[test]
    fn warning_counts_track_each_kind() {
        let mut counts = WarningCounts::default();
        counts.record(RuntimeWarning::NoVideoData);
        counts.record(RuntimeWarning::NoVideoData);
        counts.record(RuntimeWarning::UnknownEnvironmentCommand(99));
        assert_eq!(counts.missing_video_frames, 2);
        assert_eq!(counts.unknown_environment_commands, 1);
        assert_eq!(counts.unsupported_serialize, 0);
    }
}
