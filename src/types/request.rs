use crate::config::{WIFI_PASSPHRASE_MAX, WIFI_SSID_MAX};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialsError {
    EmptySsid,
    SsidTooLong,
    PassphraseTooLong,
    InvalidPskPassphrase,
}

impl CredentialsError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptySsid => "empty_ssid",
            Self::SsidTooLong => "ssid_too_long",
            Self::PassphraseTooLong => "passphrase_too_long",
            Self::InvalidPskPassphrase => "invalid_psk_passphrase",
        }
    }
}

/// Credentials for one connection attempt. Only constructible with valid
/// lengths, immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectionRequest {
    ssid: [u8; WIFI_SSID_MAX],
    ssid_len: u8,
    passphrase: [u8; WIFI_PASSPHRASE_MAX],
    passphrase_len: u8,
}

impl ConnectionRequest {
    pub fn new(ssid: &[u8], passphrase: &[u8]) -> Result<Self, CredentialsError> {
        if ssid.is_empty() {
            return Err(CredentialsError::EmptySsid);
        }
        if ssid.len() > WIFI_SSID_MAX {
            return Err(CredentialsError::SsidTooLong);
        }
        if passphrase.len() > WIFI_PASSPHRASE_MAX {
            return Err(CredentialsError::PassphraseTooLong);
        }
        let mut request = Self {
            ssid: [0u8; WIFI_SSID_MAX],
            ssid_len: ssid.len() as u8,
            passphrase: [0u8; WIFI_PASSPHRASE_MAX],
            passphrase_len: passphrase.len() as u8,
        };
        request.ssid[..ssid.len()].copy_from_slice(ssid);
        request.passphrase[..passphrase.len()].copy_from_slice(passphrase);
        Ok(request)
    }

    pub fn ssid(&self) -> &[u8] {
        &self.ssid[..self.ssid_len as usize]
    }

    pub fn passphrase(&self) -> &[u8] {
        &self.passphrase[..self.passphrase_len as usize]
    }

    pub fn ssid_str(&self) -> &str {
        core::str::from_utf8(self.ssid()).unwrap_or("<non_utf8>")
    }

    /// Driver-level parameters with the fixed station policy attached.
    pub fn connect_params(&self) -> ConnectParams<'_> {
        ConnectParams {
            ssid: self.ssid(),
            passphrase: self.passphrase(),
            security: SecurityType::Psk,
            channel: Channel::Any,
            band: FrequencyBand::Band2_4GHz,
            mfp: MgmtFrameProtection::Optional,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecurityType {
    Psk,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Any,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrequencyBand {
    Band2_4GHz,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MgmtFrameProtection {
    Optional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectParams<'a> {
    pub ssid: &'a [u8],
    pub passphrase: &'a [u8],
    pub security: SecurityType,
    pub channel: Channel,
    pub band: FrequencyBand,
    pub mfp: MgmtFrameProtection,
}

impl ConnectParams<'_> {
    /// Checks the parameters against what a driver can associate with under
    /// the selected security type.
    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.ssid.is_empty() {
            return Err(CredentialsError::EmptySsid);
        }
        if self.ssid.len() > WIFI_SSID_MAX {
            return Err(CredentialsError::SsidTooLong);
        }
        if self.passphrase.len() > WIFI_PASSPHRASE_MAX {
            return Err(CredentialsError::PassphraseTooLong);
        }
        match self.security {
            SecurityType::Psk if !psk_passphrase_valid(self.passphrase) => {
                Err(CredentialsError::InvalidPskPassphrase)
            }
            SecurityType::Psk => Ok(()),
        }
    }
}

// WPA2-PSK takes an 8..=63 byte passphrase or the raw key as 64 hex digits.
fn psk_passphrase_valid(passphrase: &[u8]) -> bool {
    match passphrase.len() {
        8..=63 => true,
        64 => passphrase.iter().all(u8::is_ascii_hexdigit),
        _ => false,
    }
}
