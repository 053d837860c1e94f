mod common;

use std::path::Path;

use common::{MockConfig, MockLibrary};
use retroframe_core::{LifecycleState, LoadError};
use retroframe_sys as sys;

#[test]
fn metadata_is_copied_from_the_core() {
    let (mut frontend, _log) = common::frontend(MockConfig::default());
    common::init_mock(&mut frontend).unwrap();

    assert_eq!(frontend.core_name(), Some("MockCore"));
    assert_eq!(frontend.core_version(), Some("1.2.3"));
    assert_eq!(frontend.core_extensions(), Some("bin|rom"));
    let core = frontend.core().unwrap();
    assert_eq!(core.api_version(), sys::RETRO_API_VERSION);
    assert_eq!(core.info().extensions().collect::<Vec<_>>(), ["bin", "rom"]);
    assert_eq!(core.path(), Path::new(common::MOCK_CORE_PATH));
    assert_eq!(frontend.state(), LifecycleState::CoreLoaded);
}

#[test]
fn callbacks_are_registered_before_init() {
    let (mut frontend, _log) = common::frontend(MockConfig::default());
    common::init_mock(&mut frontend).unwrap();

    assert_eq!(
        common::calls(),
        [
            "retro_get_system_info",
            "retro_set_environment",
            "retro_set_video_refresh",
            "retro_set_audio_sample",
            "retro_set_audio_sample_batch",
            "retro_set_input_poll",
            "retro_set_input_state",
            "retro_init",
        ]
    );
    // Negotiated from inside retro_set_environment.
    assert!(!frontend.needs_content());
}

#[test]
fn a_missing_symbol_fails_the_load_and_nothing_runs() {
    let (mut frontend, _log) = common::frontend(MockConfig::default());
    let result = frontend.init_core_from(
        Path::new(common::MOCK_CORE_PATH),
        Box::new(MockLibrary::without(&["retro_run"])),
    );

    let Err(LoadError::MissingSymbol { name, also_missing }) = &result else {
        panic!("expected a missing symbol error, got {result:?}");
    };
    assert_eq!(name, "retro_run");
    assert!(also_missing.is_empty());

    assert!(!frontend.is_core_loaded());
    assert_eq!(frontend.state(), LifecycleState::Unloaded);
    assert!(frontend.load_content(None).is_err());
    assert!(!frontend.run_frame());
    assert!(common::calls().is_empty());
}

#[test]
fn every_missing_symbol_is_reported() {
    let (mut frontend, _log) = common::frontend(MockConfig::default());
    let err = frontend
        .init_core_from(
            Path::new(common::MOCK_CORE_PATH),
            Box::new(MockLibrary::without(&["retro_serialize", "retro_reset"])),
        )
        .unwrap_err();

    let LoadError::MissingSymbol { name, also_missing } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(name, "retro_reset");
    assert_eq!(also_missing, &["retro_serialize"]);
    assert_eq!(
        err.to_string(),
        "core is missing required symbol `retro_reset` (and 1 more)"
    );
}

#[test]
fn an_incompatible_api_version_is_fatal() {
    let (mut frontend, _log) = common::frontend(MockConfig {
        api_version: 2,
        ..MockConfig::default()
    });

    let result = common::init_mock(&mut frontend);
    assert!(matches!(
        result,
        Err(LoadError::IncompatibleVersion { found: 2, expected: 1 })
    ));
    assert!(!frontend.is_core_loaded());
    assert_eq!(common::call_count("retro_init"), 0);
    assert_eq!(common::call_count("retro_set_environment"), 0);
}

#[test]
fn nonexistent_libraries_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent_libretro.so");
    let (mut frontend, _log) = common::frontend(MockConfig::default());

    assert!(matches!(frontend.init_core(&path), Err(LoadError::NotFound(p)) if p == path));
    assert_eq!(frontend.state(), LifecycleState::Unloaded);
}

#[test]
fn loading_a_second_core_closes_the_first() {
    let (mut frontend, _log) = common::frontend(MockConfig::default());
    common::init_mock(&mut frontend).unwrap();
    common::init_mock(&mut frontend).unwrap();

    let calls = common::calls();
    let inits: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter(|(_, call)| **call == "retro_init")
        .map(|(i, _)| i)
        .collect();
    let deinit = calls.iter().position(|call| *call == "retro_deinit").unwrap();
    assert_eq!(inits.len(), 2);
    assert!(inits[0] < deinit && deinit < inits[1]);
    assert_eq!(frontend.state(), LifecycleState::CoreLoaded);
}
