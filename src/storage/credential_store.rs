use embedded_storage::Storage;
use log::{info, warn};

use crate::{
    config::{
        CREDENTIAL_STORE_MAGIC, CREDENTIAL_STORE_RECORD_LEN, CREDENTIAL_STORE_VERSION,
        WIFI_PASSPHRASE_MAX, WIFI_SSID_MAX,
    },
    types::ConnectionRequest,
};

const SSID_LEN_AT: usize = 5;
const PASSPHRASE_LEN_AT: usize = 6;
const SSID_AT: usize = 7;
const PASSPHRASE_AT: usize = SSID_AT + WIFI_SSID_MAX;
const CHECKSUM_AT: usize = CREDENTIAL_STORE_RECORD_LEN - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreError {
    Read,
    Write,
}

impl StoreError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read_failed",
            Self::Write => "write_failed",
        }
    }
}

/// One credential record at a fixed flash offset.
pub struct CredentialStore<S> {
    flash: S,
    offset: u32,
}

impl<S: Storage> CredentialStore<S> {
    pub fn new(flash: S, offset: u32) -> Self {
        Self { flash, offset }
    }

    /// Places the record at the start of the last `sector_size` bytes.
    pub fn at_last_sector(flash: S, sector_size: u32) -> Self {
        let offset = (flash.capacity() as u32).saturating_sub(sector_size);
        Self::new(flash, offset)
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn into_inner(self) -> S {
        self.flash
    }

    pub fn load(&mut self) -> Option<ConnectionRequest> {
        let record = self.load_record()?;
        let ssid_len = record[SSID_LEN_AT] as usize;
        let passphrase_len = record[PASSPHRASE_LEN_AT] as usize;
        if ssid_len > WIFI_SSID_MAX || passphrase_len > WIFI_PASSPHRASE_MAX {
            return None;
        }
        ConnectionRequest::new(
            &record[SSID_AT..SSID_AT + ssid_len],
            &record[PASSPHRASE_AT..PASSPHRASE_AT + passphrase_len],
        )
        .ok()
    }

    /// Returns `Ok(false)` when the stored record already matches.
    pub fn save(&mut self, request: &ConnectionRequest) -> Result<bool, StoreError> {
        if self.load().as_ref() == Some(request) {
            return Ok(false);
        }
        let offset = self.offset;
        let record = encode_record(request);
        self.flash.write(offset, &record).map_err(|_| {
            warn!("storage: {} offset={:#x}", StoreError::Write.as_str(), offset);
            StoreError::Write
        })?;
        info!("storage: credentials saved ssid={}", request.ssid_str());
        Ok(true)
    }

    fn load_record(&mut self) -> Option<[u8; CREDENTIAL_STORE_RECORD_LEN]> {
        let mut record = [0u8; CREDENTIAL_STORE_RECORD_LEN];
        if self.flash.read(self.offset, &mut record).is_err() {
            warn!(
                "storage: {} offset={:#x}",
                StoreError::Read.as_str(),
                self.offset
            );
            return None;
        }
        if record.iter().all(|&byte| byte == 0xFF) {
            return None;
        }
        if u32::from_le_bytes([record[0], record[1], record[2], record[3]])
            != CREDENTIAL_STORE_MAGIC
        {
            return None;
        }
        if record[4] != CREDENTIAL_STORE_VERSION {
            return None;
        }
        if record[CHECKSUM_AT] != checksum8(&record[..CHECKSUM_AT]) {
            return None;
        }
        Some(record)
    }
}

fn encode_record(request: &ConnectionRequest) -> [u8; CREDENTIAL_STORE_RECORD_LEN] {
    let ssid = request.ssid();
    let passphrase = request.passphrase();
    let mut record = [0xFFu8; CREDENTIAL_STORE_RECORD_LEN];
    record[0..4].copy_from_slice(&CREDENTIAL_STORE_MAGIC.to_le_bytes());
    record[4] = CREDENTIAL_STORE_VERSION;
    record[SSID_LEN_AT] = ssid.len() as u8;
    record[PASSPHRASE_LEN_AT] = passphrase.len() as u8;
    record[SSID_AT..SSID_AT + ssid.len()].copy_from_slice(ssid);
    record[PASSPHRASE_AT..PASSPHRASE_AT + passphrase.len()].copy_from_slice(passphrase);
    record[CHECKSUM_AT] = checksum8(&record[..CHECKSUM_AT]);
    record
}

fn checksum8(bytes: &[u8]) -> u8 {
    let mut acc = 0x5Au8;
    for &byte in bytes {
        acc ^= byte.rotate_left(1);
    }
    acc
}
