use crate::{
    config::{CREDENTIAL_STORE_RECORD_LEN, WIFI_SSID_MAX},
    types::ConnectionRequest,
};

use super::{
    test_flash::{RamFlash, SECTOR},
    CredentialStore, StoreError,
};

fn request(ssid: &str, passphrase: &str) -> ConnectionRequest {
    ConnectionRequest::new(ssid.as_bytes(), passphrase.as_bytes()).unwrap()
}

#[test]
fn erased_flash_has_no_credentials() {
    let mut store = CredentialStore::at_last_sector(RamFlash::erased(4), SECTOR);
    assert_eq!(store.offset(), 3 * SECTOR);
    assert_eq!(store.load(), None);
}

#[test]
fn saved_credentials_load_back() {
    let mut store = CredentialStore::at_last_sector(RamFlash::erased(2), SECTOR);
    let creds = request("TestNet", "12345678");
    assert_eq!(store.save(&creds), Ok(true));
    let loaded = store.load().unwrap();
    assert_eq!(loaded.ssid(), b"TestNet");
    assert_eq!(loaded.passphrase(), b"12345678");
}

#[test]
fn saving_identical_credentials_skips_flash_write() {
    let mut store = CredentialStore::new(RamFlash::erased(1), 0);
    let creds = request("TestNet", "12345678");
    assert_eq!(store.save(&creds), Ok(true));
    assert_eq!(store.save(&creds), Ok(false));
    assert_eq!(store.into_inner().writes, 1);
}

#[test]
fn newer_credentials_replace_older_record() {
    let mut store = CredentialStore::new(RamFlash::erased(1), 0);
    store.save(&request("OldNet", "oldpassword")).unwrap();
    store.save(&request("NewNet", "")).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded.ssid(), b"NewNet");
    assert!(loaded.passphrase().is_empty());
}

#[test]
fn corrupted_record_is_rejected() {
    let mut store = CredentialStore::new(RamFlash::erased(1), 0);
    store.save(&request("TestNet", "12345678")).unwrap();
    let mut flash = store.into_inner();
    flash.bytes[8] ^= 0x01;
    let mut store = CredentialStore::new(flash, 0);
    assert_eq!(store.load(), None);
}

#[test]
fn record_with_wrong_magic_is_rejected() {
    let mut flash = RamFlash::erased(1);
    flash.bytes[..CREDENTIAL_STORE_RECORD_LEN].fill(0);
    let mut store = CredentialStore::new(flash, 0);
    assert_eq!(store.load(), None);
}

#[test]
fn failed_write_is_reported() {
    let mut flash = RamFlash::erased(1);
    flash.fail_writes = true;
    let mut store = CredentialStore::new(flash, 0);
    assert_eq!(
        store.save(&request("TestNet", "12345678")),
        Err(StoreError::Write)
    );
    assert_eq!(store.load(), None);
}

#[test]
fn read_past_capacity_yields_nothing() {
    let mut store = CredentialStore::new(RamFlash::erased(1), SECTOR - 8);
    assert_eq!(store.load(), None);
}

#[test]
fn longest_ssid_fits_record() {
    let ssid = [b'a'; WIFI_SSID_MAX];
    let creds = ConnectionRequest::new(&ssid, &[b'p'; 64]).unwrap();
    let mut store = CredentialStore::new(RamFlash::erased(1), 0);
    store.save(&creds).unwrap();
    assert_eq!(store.load(), Some(creds));
}
