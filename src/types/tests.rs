use core::net::Ipv4Addr;

use crate::config::{WIFI_PASSPHRASE_MAX, WIFI_SSID_MAX};

use super::*;

#[test]
fn request_keeps_exact_credential_lengths() {
    let request = ConnectionRequest::new(b"TestNet", b"12345678").unwrap();
    assert_eq!(request.ssid(), b"TestNet");
    assert_eq!(request.passphrase(), b"12345678");
    assert_eq!(request.ssid_str(), "TestNet");

    let params = request.connect_params();
    assert_eq!(params.ssid.len(), 7);
    assert_eq!(params.passphrase.len(), 8);
    assert_eq!(params.security, SecurityType::Psk);
    assert_eq!(params.channel, Channel::Any);
    assert_eq!(params.band, FrequencyBand::Band2_4GHz);
    assert_eq!(params.mfp, MgmtFrameProtection::Optional);
}

#[test]
fn psk_params_reject_passphrases_outside_wpa2_rules() {
    let not_hex = [b'g'; 64];
    let cases: [&[u8]; 4] = [b"", b"short", b"1234567", &not_hex];
    for passphrase in cases {
        let request = ConnectionRequest::new(b"Cafe", passphrase).unwrap();
        assert_eq!(
            request.connect_params().validate(),
            Err(CredentialsError::InvalidPskPassphrase),
            "passphrase len {}",
            passphrase.len()
        );
    }
}

#[test]
fn psk_params_accept_passphrase_or_hex_key() {
    let longest = [b'p'; 63];
    let hex_key = [b'a'; 64];
    let cases: [&[u8]; 3] = [b"12345678", &longest, &hex_key];
    for passphrase in cases {
        let request = ConnectionRequest::new(b"Cafe", passphrase).unwrap();
        assert_eq!(request.connect_params().validate(), Ok(()));
    }
}

#[test]
fn hand_built_params_are_length_checked() {
    let request = ConnectionRequest::new(b"Cafe", b"12345678").unwrap();
    let params = request.connect_params();
    let long_ssid = [b's'; WIFI_SSID_MAX + 1];
    assert_eq!(
        ConnectParams { ssid: b"", ..params }.validate(),
        Err(CredentialsError::EmptySsid)
    );
    assert_eq!(
        ConnectParams {
            ssid: &long_ssid,
            ..params
        }
        .validate(),
        Err(CredentialsError::SsidTooLong)
    );
}

#[test]
fn request_rejects_bad_lengths() {
    assert_eq!(
        ConnectionRequest::new(b"", b"12345678"),
        Err(CredentialsError::EmptySsid)
    );
    assert_eq!(
        ConnectionRequest::new(&[b's'; WIFI_SSID_MAX + 1], b""),
        Err(CredentialsError::SsidTooLong)
    );
    assert_eq!(
        ConnectionRequest::new(b"TestNet", &[b'p'; WIFI_PASSPHRASE_MAX + 1]),
        Err(CredentialsError::PassphraseTooLong)
    );
    assert!(ConnectionRequest::new(&[b's'; WIFI_SSID_MAX], &[b'p'; WIFI_PASSPHRASE_MAX]).is_ok());
}

#[test]
fn non_utf8_ssid_is_labelled() {
    let request = ConnectionRequest::new(&[0xFF, 0xFE], b"").unwrap();
    assert_eq!(request.ssid_str(), "<non_utf8>");
}

#[test]
fn outcome_reason_labels() {
    assert_eq!(Outcome::connected().reason_str(), "none");
    assert_eq!(
        Outcome::connected_without_address().reason_str(),
        "address_timeout_but_connected"
    );
    let failed = Outcome::failed(OutcomeReason::LinkFailed(1));
    assert!(!failed.success);
    assert_eq!(failed.reason_str(), "link_failed");
}

#[test]
fn address_snapshot_lists_configured_slots_only() {
    let snapshot = AddressSnapshot::with_ipv4(Ipv4Addr::new(10, 0, 0, 7), 8, None);
    let slots: Vec<_> = snapshot.ipv4_slots().collect();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].address, Ipv4Addr::new(10, 0, 0, 7));
    assert_eq!(AddressSnapshot::empty().ipv4_slots().count(), 0);
}
