use core::fmt::Debug;

use embassy_time::{Duration, Instant};
use log::{info, warn};

use crate::{
    config::{
        SequencerPolicy, ADDRESS_WAIT_MAX_MS, ADDRESS_WAIT_MIN_MS, LINK_WAIT_MAX_MS,
        LINK_WAIT_MIN_MS, LINK_WAIT_UNBOUNDED,
    },
    telemetry,
    types::{ConnectParams, ConnectionRequest, Outcome, OutcomeReason},
};

use super::{
    context::ConnectionContext,
    diag::emit_net_event,
    latch::LatchWait,
    state::{NetStatusSnapshot, SequencerState},
};

/// Network-interface management seam: accepts or rejects a connect request
/// synchronously. The association result arrives later as a link event.
pub trait WifiDriver {
    type Error: Debug;

    fn issue_connect(&mut self, params: &ConnectParams<'_>) -> Result<(), Self::Error>;
}

impl<D: WifiDriver + ?Sized> WifiDriver for &mut D {
    type Error = D::Error;

    fn issue_connect(&mut self, params: &ConnectParams<'_>) -> Result<(), Self::Error> {
        (**self).issue_connect(params)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkWait {
    /// Wait for the driver's link result however long it takes. A driver
    /// that never reports leaves `connect` pending forever.
    Forever,
    Within(Duration),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencerConfig {
    pub link_wait: LinkWait,
    pub address_timeout: Duration,
}

impl SequencerConfig {
    pub fn defaults() -> Self {
        Self::from_policy(SequencerPolicy::defaults())
    }

    pub fn from_policy(policy: SequencerPolicy) -> Self {
        let policy = policy.sanitized();
        let link_wait = if policy.link_wait_timeout_ms == LINK_WAIT_UNBOUNDED {
            LinkWait::Forever
        } else {
            LinkWait::Within(Duration::from_millis(policy.link_wait_timeout_ms as u64))
        };
        Self {
            link_wait,
            address_timeout: Duration::from_millis(policy.address_timeout_ms as u64),
        }
    }

    /// A bounded wait is clamped like the policy value.
    pub fn with_link_wait(mut self, link_wait: LinkWait) -> Self {
        self.link_wait = match link_wait {
            LinkWait::Forever => LinkWait::Forever,
            LinkWait::Within(timeout) => {
                LinkWait::Within(clamp_duration(timeout, LINK_WAIT_MIN_MS, LINK_WAIT_MAX_MS))
            }
        };
        self
    }

    pub fn with_address_timeout(mut self, address_timeout: Duration) -> Self {
        self.address_timeout =
            clamp_duration(address_timeout, ADDRESS_WAIT_MIN_MS, ADDRESS_WAIT_MAX_MS);
        self
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

fn clamp_duration(value: Duration, min_ms: u32, max_ms: u32) -> Duration {
    Duration::from_millis(value.as_millis().clamp(min_ms as u64, max_ms as u64))
}

/// Drives one connection attempt per `connect` call to exactly one outcome:
/// `Idle -> Requesting -> AwaitingLink -> Connected|Failed -> AwaitingAddress -> Done`.
pub struct ConnectionSequencer<'a, D> {
    context: &'a ConnectionContext,
    driver: D,
    config: SequencerConfig,
    state: SequencerState,
    attempt: u32,
}

impl<'a, D: WifiDriver> ConnectionSequencer<'a, D> {
    pub fn new(context: &'a ConnectionContext, driver: D, config: SequencerConfig) -> Self {
        Self {
            context,
            driver,
            config,
            state: SequencerState::Idle,
            attempt: 0,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn status(&self) -> NetStatusSnapshot {
        let link = self.context.link_observation();
        NetStatusSnapshot {
            state: self.state,
            link: link.connected,
            last_status_code: link.last_status_code,
            address: self.context.address_observation().address_acquired,
            attempt: self.attempt,
        }
    }

    /// Runs `connect` to completion on the calling thread by busy-polling it,
    /// so the thread spins for the whole link and address wait. For host
    /// tools and tests; firmware awaits `connect` on its executor.
    pub fn connect_blocking(&mut self, request: &ConnectionRequest) -> Outcome {
        embassy_futures::block_on(self.connect(request))
    }

    pub async fn connect(&mut self, request: &ConnectionRequest) -> Outcome {
        let started_at = Instant::now();
        self.attempt = self.attempt.wrapping_add(1);
        self.state = SequencerState::Idle;
        // Each attempt starts from unset latches and cleared observations so
        // a previous attempt's events cannot satisfy this one.
        self.context.reset();
        telemetry::record_connect_attempt();

        self.transition(SequencerState::Requesting, "connect", started_at);
        info!(
            "net: connecting to ssid={} attempt={}",
            request.ssid_str(),
            self.attempt
        );
        if let Err(err) = self.driver.issue_connect(&request.connect_params()) {
            warn!("net: wifi connection request failed err={:?}", err);
            telemetry::record_driver_rejected();
            return self.fail(OutcomeReason::DriverRejected, "driver_rejected", started_at);
        }

        self.transition(SequencerState::AwaitingLink, "request_accepted", started_at);
        let link_timeout = match self.config.link_wait {
            LinkWait::Forever => None,
            LinkWait::Within(timeout) => Some(timeout),
        };
        if self.context.link_result.wait(link_timeout).await == LatchWait::TimedOut {
            warn!("net: no link result from driver within the link wait");
            telemetry::record_link_timeout();
            return self.fail(OutcomeReason::LinkTimeout, "link_timeout", started_at);
        }

        let link = self.context.link_observation();
        if !link.connected {
            telemetry::record_link_failure(link.last_status_code);
            return self.fail(
                OutcomeReason::LinkFailed(link.last_status_code),
                "link_failed",
                started_at,
            );
        }
        self.transition(SequencerState::Connected, "link_up", started_at);

        self.transition(SequencerState::AwaitingAddress, "await_address", started_at);
        let (outcome, trigger) = match self
            .context
            .ip_acquired
            .wait(Some(self.config.address_timeout))
            .await
        {
            LatchWait::Ready => (Outcome::connected(), "address_acquired"),
            LatchWait::TimedOut => {
                warn!(
                    "net: obtaining an ip address took too long, is the router configured correctly?"
                );
                telemetry::record_address_timeout();
                (Outcome::connected_without_address(), "address_timeout")
            }
        };
        telemetry::record_connect_success();
        self.transition(SequencerState::Done, trigger, started_at);
        info!(
            "net: connect finished success=true reason={}",
            outcome.reason_str()
        );
        outcome
    }

    fn fail(&mut self, reason: OutcomeReason, trigger: &str, started_at: Instant) -> Outcome {
        self.transition(SequencerState::Failed, trigger, started_at);
        self.transition(SequencerState::Done, "terminal", started_at);
        let outcome = Outcome::failed(reason);
        match reason {
            OutcomeReason::LinkFailed(status) => warn!(
                "net: connect finished success=false reason={} status={}",
                reason.as_str(),
                status
            ),
            _ => warn!(
                "net: connect finished success=false reason={}",
                reason.as_str()
            ),
        }
        outcome
    }

    fn transition(&mut self, to: SequencerState, trigger: &str, started_at: Instant) {
        emit_net_event(self.state, to, trigger, started_at);
        self.state = to;
    }
}
