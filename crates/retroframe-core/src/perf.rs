use std::ffi::CStr;
use std::sync::OnceLock;
use std::time::Instant;

use log::info;
use retroframe_sys as sys;

use crate::context;

fn epoch() -> Instant {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    *EPOCH.get_or_init(Instant::now)
}

/// Microseconds on a monotonic clock.
pub fn time_usec() -> i64 {
    i64::try_from(epoch().elapsed().as_micros()).unwrap_or(i64::MAX)
}

/// Tick source for perf counters, in nanoseconds.
pub fn counter_ticks() -> u64 {
    u64::try_from(epoch().elapsed().as_nanos()).unwrap_or(u64::MAX)
}

/// Counters a core registered through the perf interface.
///
/// The counters live in core memory; only their addresses are kept here, and
/// they are forgotten when the core is closed.
#[derive(Debug, Default)]
pub struct PerfRegistry {
    counters: Vec<*mut sys::retro_perf_counter>,
}

impl PerfRegistry {
    pub(crate) fn register(&mut self, counter: *mut sys::retro_perf_counter) {
        if !self.counters.contains(&counter) {
            self.counters.push(counter);
        }
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Logs every registered counter.
    ///
    /// # Safety
    ///
    /// Registered counters must still be alive, i.e. the core is still loaded.
    pub(crate) unsafe fn log_all(&self) {
        for &counter in &self.counters {
            let counter = unsafe { &*counter };
            let ident = if counter.ident.is_null() {
                "<unnamed>".into()
            } else {
                unsafe { CStr::from_ptr(counter.ident) }.to_string_lossy()
            };
            info!(
                "[perf] {ident}: {} ns total over {} calls",
                counter.total, counter.call_cnt
            );
        }
    }

    pub(crate) fn clear(&mut self) {
        self.counters.clear();
    }
}

unsafe extern "C" fn cb_get_time_usec() -> sys::retro_time_t {
    time_usec()
}

unsafe extern "C" fn cb_get_perf_counter() -> sys::retro_perf_tick_t {
    counter_ticks()
}

unsafe extern "C" fn cb_get_cpu_features() -> u64 {
    0
}

unsafe extern "C" fn cb_perf_register(counter: *mut sys::retro_perf_counter) {
    if counter.is_null() {
        return;
    }
    unsafe { (*counter).registered = true };
    context::with_bridge(|bridge| bridge.perf.register(counter));
}

unsafe extern "C" fn cb_perf_start(counter: *mut sys::retro_perf_counter) {
    if counter.is_null() {
        return;
    }
    let counter = unsafe { &mut *counter };
    if counter.registered {
        counter.start = counter_ticks();
    }
}

unsafe extern "C" fn cb_perf_stop(counter: *mut sys::retro_perf_counter) {
    if counter.is_null() {
        return;
    }
    let counter = unsafe { &mut *counter };
    counter.total = counter
        .total
        .wrapping_add(counter_ticks().wrapping_sub(counter.start));
}

unsafe extern "C" fn cb_perf_log() {
    context::with_bridge(|bridge| unsafe { bridge.perf.log_all() });
}

/// The structure handed out for GET_PERF_INTERFACE.
pub(crate) fn perf_interface() -> sys::retro_perf_callback {
    sys::retro_perf_callback {
        get_time_usec: Some(cb_get_time_usec),
        get_cpu_features: Some(cb_get_cpu_features),
        get_perf_counter: Some(cb_get_perf_counter),
        perf_register: Some(cb_perf_register),
        perf_start: Some(cb_perf_start),
        perf_stop: Some(cb_perf_stop),
        perf_log: Some(cb_perf_log),
    }
}
