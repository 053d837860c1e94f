use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::Once;

use log::Level;
use retroframe_sys as sys;

/// `log` target for everything a core prints through its log interface.
pub const CORE_LOG_TARGET: &str = "libretro";

/// Translates a `retro_log_level`. Unknown levels are treated as info.
pub fn level_from_retro(level: sys::retro_log_level) -> Level {
    match level {
        sys::RETRO_LOG_DEBUG => Level::Debug,
        sys::RETRO_LOG_INFO => Level::Info,
        sys::RETRO_LOG_WARN => Level::Warn,
        sys::RETRO_LOG_ERROR => Level::Error,
        _ => Level::Info,
    }
}

/// Emits one line from a core. Trailing line breaks are dropped, and lines
/// that end up empty are skipped.
pub fn forward_core_line(level: sys::retro_log_level, line: &str) {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return;
    }
    log::log!(target: CORE_LOG_TARGET, level_from_retro(level), "{line}");
}

unsafe extern "C" fn cb_log_sink(level: sys::retro_log_level, message: *const c_char) {
    if message.is_null() {
        return;
    }
    let message = unsafe { CStr::from_ptr(message) }.to_string_lossy();
    forward_core_line(level, &message);
}

/// Routes the C printf shim into [`forward_core_line`]. Safe to call repeatedly.
pub(crate) fn install_sink() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| unsafe { sys::retroframe_set_log_sink(Some(cb_log_sink)) });
}

/// The structure handed out for GET_LOG_INTERFACE.
pub(crate) fn log_interface() -> sys::retro_log_callback {
    install_sink();
    sys::retro_log_callback {
        log: Some(sys::retroframe_log_printf),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_translate_with_info_fallback() {
        assert_eq!(level_from_retro(sys::RETRO_LOG_DEBUG), Level::Debug);
        assert_eq!(level_from_retro(sys::RETRO_LOG_INFO), Level::Info);
        assert_eq!(level_from_retro(sys::RETRO_LOG_WARN), Level::Warn);
        assert_eq!(level_from_retro(sys::RETRO_LOG_ERROR), Level::Error);
        assert_eq!(level_from_retro(42), Level::Info);
    }

    #[test]
    fn printf_shim_formats_through_the_sink() {
        let iface = log_interface();
        let printf = iface.log.expect("log interface");
        // No logger is installed in unit tests, so the line is formatted and discarded.
        unsafe { printf(sys::RETRO_LOG_INFO, c"%s %d\n".as_ptr(), c"frame".as_ptr(), 7i32) };
    }
}
