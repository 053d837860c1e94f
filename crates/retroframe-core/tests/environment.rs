mod common;

use std::collections::HashMap;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_uint};
use std::path::PathBuf;
use std::ptr;

use common::MockConfig;
use retroframe_core::{BridgeConfig, CoreMessage, PixelFormat, TextureFormat};
use retroframe_sys as sys;

/// Answers a string query from inside a frame.
fn query_string(frontend: &mut retroframe_core::Frontend, cmd: c_uint) -> Option<String> {
    common::during_frame(frontend, move || {
        let mut value: *const c_char = ptr::null();
        if !common::env(cmd, &mut value) || value.is_null() {
            return None;
        }
        Some(
            unsafe { CStr::from_ptr(value) }
                .to_string_lossy()
                .into_owned(),
        )
    })
}

#[test]
fn directories_and_username_come_from_the_config() {
    let config = BridgeConfig {
        system_directory: PathBuf::from("/srv/bios"),
        save_directory: PathBuf::from("/srv/saves"),
        core_assets_directory: PathBuf::from("/srv/assets"),
        username: "player one".to_owned(),
        ..BridgeConfig::default()
    };
    let (mut frontend, _log) = common::frontend_with(MockConfig::default(), config);
    common::init_mock(&mut frontend).unwrap();
    frontend.load_content(None).unwrap();

    assert_eq!(
        query_string(&mut frontend, sys::RETRO_ENVIRONMENT_GET_SYSTEM_DIRECTORY).as_deref(),
        Some("/srv/bios")
    );
    assert_eq!(
        query_string(&mut frontend, sys::RETRO_ENVIRONMENT_GET_SAVE_DIRECTORY).as_deref(),
        Some("/srv/saves")
    );
    assert_eq!(
        query_string(&mut frontend, sys::RETRO_ENVIRONMENT_GET_CORE_ASSETS_DIRECTORY).as_deref(),
        Some("/srv/assets")
    );
    assert_eq!(
        query_string(&mut frontend, sys::RETRO_ENVIRONMENT_GET_USERNAME).as_deref(),
        Some("player one")
    );
}

#[test]
fn libretro_path_is_the_loaded_core() {
    let (mut frontend, _log) = common::running(MockConfig::default());
    assert_eq!(
        query_string(&mut frontend, sys::RETRO_ENVIRONMENT_GET_LIBRETRO_PATH).as_deref(),
        Some(common::MOCK_CORE_PATH)
    );
}

#[test]
fn unknown_commands_are_refused_and_counted() {
    let (mut frontend, _log) = common::running(MockConfig::default());
    let answers = common::during_frame(&mut frontend, || {
        let mut scratch = [0u8; 64];
        [
            common::env(sys::RETRO_ENVIRONMENT_SET_HW_RENDER, &mut scratch),
            common::env(sys::RETRO_ENVIRONMENT_SET_HW_RENDER, &mut scratch),
            common::env(0x7fff, &mut scratch),
        ]
    });

    assert_eq!(answers, [false, false, false]);
    assert_eq!(frontend.warnings().unknown_environment_commands, 3);
}

#[test]
fn experimental_commands_match_on_the_full_id() {
    let (mut frontend, _log) = common::running(MockConfig::default());
    let (bare, full) = common::during_frame(&mut frontend, || {
        (
            common::env_null(51),
            common::env_null(sys::RETRO_ENVIRONMENT_GET_INPUT_BITMASKS),
        )
    });

    assert!(!bare);
    assert!(full);
    assert_eq!(frontend.warnings().unknown_environment_commands, 1);
}

#[test]
fn missing_payloads_are_refused() {
    let (mut frontend, _log) = common::running(MockConfig::default());
    let answers = common::during_frame(&mut frontend, || {
        [
            common::env_null(sys::RETRO_ENVIRONMENT_GET_SYSTEM_DIRECTORY),
            common::env_null(sys::RETRO_ENVIRONMENT_SET_PIXEL_FORMAT),
            common::env_null(sys::RETRO_ENVIRONMENT_GET_VARIABLE),
        ]
    });

    assert_eq!(answers, [false, false, false]);
    assert_eq!(frontend.warnings().unknown_environment_commands, 0);
}

#[test]
fn unknown_pixel_formats_are_refused() {
    let (mut frontend, _log) = common::running(MockConfig::default());
    let accepted = common::during_frame(&mut frontend, || {
        let mut format = sys::RETRO_PIXEL_FORMAT_UNKNOWN;
        common::env(sys::RETRO_ENVIRONMENT_SET_PIXEL_FORMAT, &mut format)
    });

    assert!(!accepted);
    assert_eq!(frontend.pixel_format(), PixelFormat::Xrgb8888);
}

#[test]
fn changing_pixel_format_replaces_the_texture() {
    let (mut frontend, log) = common::running(MockConfig::default());
    let first = frontend.surface().unwrap().texture();
    assert_eq!(frontend.surface().unwrap().format(), TextureFormat::Rgba8888);

    common::update_config(|config| config.pixel_format = Some(sys::RETRO_PIXEL_FORMAT_RGB565));
    assert!(common::during_frame(&mut frontend, || {
        let mut format = sys::RETRO_PIXEL_FORMAT_RGB565;
        common::env(sys::RETRO_ENVIRONMENT_SET_PIXEL_FORMAT, &mut format)
    }));

    let surface = frontend.surface().unwrap();
    assert_eq!(frontend.pixel_format(), PixelFormat::Rgb565);
    assert_eq!(surface.format(), TextureFormat::Rgb565);
    assert_ne!(surface.texture(), first);

    let log = log.borrow();
    assert_eq!(log.released_textures, [first]);
    assert_eq!(log.live_textures.len(), 1);
    assert!(log.errors.is_empty(), "{:?}", log.errors);
}

/// Declares the mock's options and returns what GET_VARIABLE answers for
/// `mock_speed`, along with the update flag before and after.
fn declare_options(frontend: &mut retroframe_core::Frontend) -> (Option<String>, bool, bool) {
    common::during_frame(frontend, || {
        let mut definitions = [
            sys::retro_variable {
                key: c"mock_speed".as_ptr(),
                value: c"Speed; normal|fast|slow".as_ptr(),
            },
            sys::retro_variable {
                key: c"mock_broken".as_ptr(),
                value: c"No choices here".as_ptr(),
            },
            sys::retro_variable {
                key: ptr::null(),
                value: ptr::null(),
            },
        ];
        common::env(sys::RETRO_ENVIRONMENT_SET_VARIABLES, &mut definitions);

        let mut updated = false;
        common::env(sys::RETRO_ENVIRONMENT_GET_VARIABLE_UPDATE, &mut updated);

        let mut query = sys::retro_variable {
            key: c"mock_speed".as_ptr(),
            value: ptr::null(),
        };
        let value = common::env(sys::RETRO_ENVIRONMENT_GET_VARIABLE, &mut query).then(|| {
            unsafe { CStr::from_ptr(query.value) }
                .to_string_lossy()
                .into_owned()
        });

        let mut updated_again = true;
        common::env(sys::RETRO_ENVIRONMENT_GET_VARIABLE_UPDATE, &mut updated_again);
        (value, updated, updated_again)
    })
}

#[test]
fn core_options_start_at_their_first_choice() {
    let (mut frontend, _log) = common::running(MockConfig::default());
    let (value, updated, updated_again) = declare_options(&mut frontend);

    assert_eq!(value.as_deref(), Some("normal"));
    assert!(updated);
    assert!(!updated_again);

    let variables: Vec<_> = frontend.variables().iter().map(|var| var.key.clone()).collect();
    assert_eq!(variables, ["mock_speed"]);
}

#[test]
fn configured_option_values_are_applied() {
    let config = BridgeConfig {
        variable_overrides: HashMap::from([("mock_speed".to_owned(), "fast".to_owned())]),
        ..BridgeConfig::default()
    };
    let (mut frontend, _log) = common::frontend_with(MockConfig::default(), config);
    common::init_mock(&mut frontend).unwrap();
    frontend.load_content(None).unwrap();

    let (value, _, _) = declare_options(&mut frontend);
    assert_eq!(value.as_deref(), Some("fast"));

    assert!(frontend.variables_mut().set("mock_speed", "slow"));
    assert!(!frontend.variables_mut().set("mock_speed", "warp"));
    let (updated, value) = common::during_frame(&mut frontend, || {
        let mut updated = false;
        common::env(sys::RETRO_ENVIRONMENT_GET_VARIABLE_UPDATE, &mut updated);
        let mut query = sys::retro_variable {
            key: c"mock_speed".as_ptr(),
            value: ptr::null(),
        };
        common::env(sys::RETRO_ENVIRONMENT_GET_VARIABLE, &mut query);
        let value = unsafe { CStr::from_ptr(query.value) }
            .to_string_lossy()
            .into_owned();
        (updated, value)
    });
    assert!(updated);
    assert_eq!(value, "slow");
}

#[test]
fn undeclared_options_have_no_value() {
    let (mut frontend, _log) = common::running(MockConfig::default());
    let (found, value_is_null) = common::during_frame(&mut frontend, || {
        let mut query = sys::retro_variable {
            key: c"nobody_declared_this".as_ptr(),
            value: c"stale".as_ptr(),
        };
        let found = common::env(sys::RETRO_ENVIRONMENT_GET_VARIABLE, &mut query);
        (found, query.value.is_null())
    });
    assert!(!found);
    assert!(value_is_null);
}

#[test]
fn fixed_queries_have_fixed_answers() {
    let (mut frontend, log) = common::running(MockConfig::default());
    log.borrow_mut().refresh_rate = 75.0;

    let answers = common::during_frame(&mut frontend, || {
        let mut can_dupe = false;
        let mut capabilities = 0u64;
        let mut language: sys::retro_language = 99;
        let mut max_users: c_uint = 0;
        let mut av_enable: c_int = 0;
        let mut fastforwarding = true;
        let mut refresh_rate = 0f32;
        let mut message_version: c_uint = 99;
        let handled = [
            common::env(sys::RETRO_ENVIRONMENT_GET_CAN_DUPE, &mut can_dupe),
            common::env(
                sys::RETRO_ENVIRONMENT_GET_INPUT_DEVICE_CAPABILITIES,
                &mut capabilities,
            ),
            common::env(sys::RETRO_ENVIRONMENT_GET_LANGUAGE, &mut language),
            common::env(sys::RETRO_ENVIRONMENT_GET_INPUT_MAX_USERS, &mut max_users),
            common::env(sys::RETRO_ENVIRONMENT_GET_AUDIO_VIDEO_ENABLE, &mut av_enable),
            common::env(sys::RETRO_ENVIRONMENT_GET_FASTFORWARDING, &mut fastforwarding),
            common::env(sys::RETRO_ENVIRONMENT_GET_TARGET_REFRESH_RATE, &mut refresh_rate),
            common::env(
                sys::RETRO_ENVIRONMENT_GET_MESSAGE_INTERFACE_VERSION,
                &mut message_version,
            ),
        ];
        (
            handled,
            can_dupe,
            capabilities,
            language,
            max_users,
            av_enable,
            fastforwarding,
            refresh_rate,
            message_version,
        )
    });

    let (handled, can_dupe, capabilities, language, max_users, av_enable, ff, refresh, version) =
        answers;
    assert_eq!(handled, [true; 8]);
    assert!(can_dupe);
    for device in [
        sys::RETRO_DEVICE_JOYPAD,
        sys::RETRO_DEVICE_MOUSE,
        sys::RETRO_DEVICE_KEYBOARD,
        sys::RETRO_DEVICE_POINTER,
    ] {
        assert_ne!(capabilities & (1 << device), 0, "device {device} missing");
    }
    assert_eq!(language, sys::RETRO_LANGUAGE_ENGLISH);
    assert_eq!(max_users, 1);
    assert_eq!(av_enable, 3);
    assert!(!ff);
    assert_eq!(refresh, 75.0);
    assert_eq!(version, 0);
}

#[test]
fn messages_are_kept_until_taken() {
    let (mut frontend, _log) = common::running(MockConfig::default());
    assert!(common::during_frame(&mut frontend, || {
        let mut message = sys::retro_message {
            msg: c"Insert disc 2".as_ptr(),
            frames: 180,
        };
        common::env(sys::RETRO_ENVIRONMENT_SET_MESSAGE, &mut message)
    }));

    let expected = CoreMessage {
        text: "Insert disc 2".to_owned(),
        frames: 180,
    };
    assert_eq!(frontend.last_message(), Some(&expected));
    assert_eq!(frontend.take_message(), Some(expected));
    assert_eq!(frontend.last_message(), None);
}

#[test]
fn log_and_perf_interfaces_are_provided() {
    let (mut frontend, _log) = common::running(MockConfig::default());
    let (log_ok, has_log, perf_ok, time) = common::during_frame(&mut frontend, || {
        let mut log = sys::retro_log_callback { log: None };
        let log_ok = common::env(sys::RETRO_ENVIRONMENT_GET_LOG_INTERFACE, &mut log);

        // Every field is an optional function pointer, so all-zero is `None`.
        let mut perf: sys::retro_perf_callback = unsafe { std::mem::zeroed() };
        let perf_ok = common::env(sys::RETRO_ENVIRONMENT_GET_PERF_INTERFACE, &mut perf);
        let time = perf.get_time_usec.map(|get_time| unsafe { get_time() });
        (log_ok, log.log.is_some(), perf_ok, time)
    });

    assert!(log_ok && has_log);
    assert!(perf_ok);
    assert!(time.is_some_and(|usec| usec >= 0));
}

#[test]
fn vfs_is_offered_up_to_version_three() {
    let (mut frontend, _log) = common::running(MockConfig::default());
    let (v3, v3_iface, v4) = common::during_frame(&mut frontend, || {
        let mut info = sys::retro_vfs_interface_info {
            required_interface_version: 3,
            iface: ptr::null_mut(),
        };
        let v3 = common::env(sys::RETRO_ENVIRONMENT_GET_VFS_INTERFACE, &mut info);
        let v3_iface = !info.iface.is_null();

        let mut newer = sys::retro_vfs_interface_info {
            required_interface_version: 4,
            iface: ptr::null_mut(),
        };
        let v4 = common::env(sys::RETRO_ENVIRONMENT_GET_VFS_INTERFACE, &mut newer);
        (v3, v3_iface, v4)
    });

    assert!(v3 && v3_iface);
    assert!(!v4);
}

#[test]
fn new_av_info_reopens_audio_and_resizes_video() {
    let (mut frontend, log) = common::running(MockConfig::default());
    let first_stream = frontend.audio().unwrap().stream();

    common::update_config(|config| {
        config.width = 8;
        config.height = 6;
    });
    assert!(common::during_frame(&mut frontend, || {
        let mut av = sys::retro_system_av_info {
            geometry: sys::retro_game_geometry {
                base_width: 8,
                base_height: 6,
                max_width: 8,
                max_height: 6,
                aspect_ratio: 4.0 / 3.0,
            },
            timing: sys::retro_system_timing {
                fps: 60.0,
                sample_rate: 48_000.0,
            },
        };
        common::env(sys::RETRO_ENVIRONMENT_SET_SYSTEM_AV_INFO, &mut av)
    }));

    let audio = frontend.audio().unwrap();
    assert_eq!(audio.sample_rate(), 48_000);
    assert_ne!(audio.stream(), first_stream);

    let surface = frontend.surface().unwrap();
    assert_eq!((surface.width(), surface.height()), (8, 6));
    assert_eq!(frontend.av_info().geometry.base_width, 8);

    let log = log.borrow();
    assert_eq!(log.closed_streams, [first_stream]);
    assert_eq!(log.open_streams.values().collect::<Vec<_>>(), [&(48_000, 2)]);
    assert!(log.errors.is_empty(), "{:?}", log.errors);
}

fn set_geometry(frontend: &mut retroframe_core::Frontend, width: u32, height: u32, aspect: f32) {
    assert!(common::during_frame(frontend, move || {
        let mut geometry = sys::retro_game_geometry {
            base_width: width,
            base_height: height,
            max_width: 0,
            max_height: 0,
            aspect_ratio: aspect,
        };
        common::env(sys::RETRO_ENVIRONMENT_SET_GEOMETRY, &mut geometry)
    }));
}

#[test]
fn geometry_change_recreates_the_surface_on_the_next_frame() {
    let (mut frontend, log) = common::running(MockConfig::default());
    frontend.run_frame();
    let first = frontend.surface().unwrap().texture();

    common::update_config(|config| {
        config.width = 6;
        config.height = 5;
    });
    set_geometry(&mut frontend, 6, 5, 0.0);

    let surface = frontend.surface().unwrap();
    assert_eq!((surface.width(), surface.height()), (6, 5));
    let second = surface.texture();
    assert_ne!(second, first);
    assert_eq!(frontend.av_info().geometry.base_width, 6);
    assert_eq!(frontend.av_info().geometry.base_height, 5);
    assert!(log.borrow().released_textures.contains(&first));

    // Same frame size, new aspect: the surface is still rebuilt.
    set_geometry(&mut frontend, 6, 5, 16.0 / 9.0);

    let surface = frontend.surface().unwrap();
    assert_eq!((surface.width(), surface.height()), (6, 5));
    assert_ne!(surface.texture(), second);
    assert!((frontend.av_info().geometry.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);

    let log = log.borrow();
    assert!(log.released_textures.contains(&second));
    assert_eq!(log.live_textures.len(), 1);
    assert!(log.errors.is_empty(), "{:?}", log.errors);
}
