use embassy_time::Instant;
use log::info;

use super::state::SequencerState;

pub(super) fn emit_net_event(
    from: SequencerState,
    to: SequencerState,
    trigger: &str,
    started_at: Instant,
) {
    let at_ms = started_at.elapsed().as_millis() as u32;
    info!(
        "NET_EVENT {{\"from\":\"{}\",\"to\":\"{}\",\"trigger\":\"{}\",\"at_ms\":{}}}",
        from.as_str(),
        to.as_str(),
        trigger,
        at_ms
    );
}
