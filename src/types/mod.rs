mod address;
mod outcome;
mod request;
#[cfg(test)]
mod tests;

pub use address::{AddressSnapshot, Ipv4Slot};
pub use outcome::{AddressObservation, LinkObservation, Outcome, OutcomeReason};
pub use request::{
    Channel, ConnectParams, ConnectionRequest, CredentialsError, FrequencyBand,
    MgmtFrameProtection, SecurityType,
};
