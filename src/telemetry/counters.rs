use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};

static CONNECT_ATTEMPTS: AtomicU32 = AtomicU32::new(0);
static CONNECT_SUCCESSES: AtomicU32 = AtomicU32::new(0);
static DRIVER_REJECTIONS: AtomicU32 = AtomicU32::new(0);
static LINK_FAILURES: AtomicU32 = AtomicU32::new(0);
static LINK_TIMEOUTS: AtomicU32 = AtomicU32::new(0);
static LINK_LAST_FAILURE_STATUS: AtomicI32 = AtomicI32::new(0);
static LINK_DISCONNECTS: AtomicU32 = AtomicU32::new(0);
static ADDRESS_EVENTS: AtomicU32 = AtomicU32::new(0);
static ADDRESS_TIMEOUTS: AtomicU32 = AtomicU32::new(0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    pub connect_attempts: u32,
    pub connect_successes: u32,
    pub driver_rejections: u32,
    pub link_failures: u32,
    pub link_timeouts: u32,
    pub link_last_failure_status: i32,
    pub link_disconnects: u32,
    pub address_events: u32,
    pub address_timeouts: u32,
}

pub(crate) fn record_connect_attempt() {
    CONNECT_ATTEMPTS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_connect_success() {
    CONNECT_SUCCESSES.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_driver_rejected() {
    DRIVER_REJECTIONS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_link_failure(status: i32) {
    LINK_FAILURES.fetch_add(1, Ordering::Relaxed);
    LINK_LAST_FAILURE_STATUS.store(status, Ordering::Relaxed);
}

pub(crate) fn record_link_timeout() {
    LINK_TIMEOUTS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_link_disconnect() {
    LINK_DISCONNECTS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_address_event() {
    ADDRESS_EVENTS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_address_timeout() {
    ADDRESS_TIMEOUTS.fetch_add(1, Ordering::Relaxed);
}

pub fn snapshot() -> TelemetrySnapshot {
    TelemetrySnapshot {
        connect_attempts: CONNECT_ATTEMPTS.load(Ordering::Relaxed),
        connect_successes: CONNECT_SUCCESSES.load(Ordering::Relaxed),
        driver_rejections: DRIVER_REJECTIONS.load(Ordering::Relaxed),
        link_failures: LINK_FAILURES.load(Ordering::Relaxed),
        link_timeouts: LINK_TIMEOUTS.load(Ordering::Relaxed),
        link_last_failure_status: LINK_LAST_FAILURE_STATUS.load(Ordering::Relaxed),
        link_disconnects: LINK_DISCONNECTS.load(Ordering::Relaxed),
        address_events: ADDRESS_EVENTS.load(Ordering::Relaxed),
        address_timeouts: ADDRESS_TIMEOUTS.load(Ordering::Relaxed),
    }
}
