mod counters;

pub use counters::{snapshot, TelemetrySnapshot};
pub(crate) use counters::{
    record_address_event, record_address_timeout, record_connect_attempt,
    record_connect_success, record_driver_rejected, record_link_disconnect,
    record_link_failure, record_link_timeout,
};
