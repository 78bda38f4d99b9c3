#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeReason {
    DriverRejected,
    LinkFailed(i32),
    LinkTimeout,
    AddressTimeoutButConnected,
}

impl OutcomeReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DriverRejected => "driver_rejected",
            Self::LinkFailed(_) => "link_failed",
            Self::LinkTimeout => "link_timeout",
            Self::AddressTimeoutButConnected => "address_timeout_but_connected",
        }
    }
}

/// Result of one `connect` call. `reason` is the failure cause, or a
/// diagnostic annotation on a success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub reason: Option<OutcomeReason>,
}

impl Outcome {
    pub const fn connected() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    pub const fn connected_without_address() -> Self {
        Self {
            success: true,
            reason: Some(OutcomeReason::AddressTimeoutButConnected),
        }
    }

    pub const fn failed(reason: OutcomeReason) -> Self {
        Self {
            success: false,
            reason: Some(reason),
        }
    }

    pub fn reason_str(&self) -> &'static str {
        self.reason.map(OutcomeReason::as_str).unwrap_or("none")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkObservation {
    pub connected: bool,
    pub last_status_code: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddressObservation {
    pub address_acquired: bool,
}
