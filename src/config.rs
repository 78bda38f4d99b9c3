pub const WIFI_SSID_MAX: usize = 32;
pub const WIFI_PASSPHRASE_MAX: usize = 64;

// Drivers report gradations of success, every code at or below this one is a
// successful association.
pub const LINK_STATUS_SUCCESS: i32 = 0;

// 30s: long enough for a few DHCP discover/request rounds on a healthy AP.
pub const ADDRESS_WAIT_DEFAULT_MS: u32 = 30_000;
pub const ADDRESS_WAIT_MIN_MS: u32 = 1_000;
pub const ADDRESS_WAIT_MAX_MS: u32 = 180_000;

// 0 keeps the link-result wait unbounded; the driver is expected to always
// report an association result.
pub const LINK_WAIT_UNBOUNDED: u32 = 0;
pub const LINK_WAIT_MIN_MS: u32 = 2_000;
pub const LINK_WAIT_MAX_MS: u32 = 180_000;

pub const NET_IF_MAX_IPV4_ADDR: usize = 2;
pub const EVENT_BUS_SUBSCRIBERS_MAX: usize = 4;

pub const CREDENTIAL_STORE_MAGIC: u32 = 0x4C4E_4B31;
pub const CREDENTIAL_STORE_VERSION: u8 = 1;
// magic(4) + version(1) + ssid_len(1) + passphrase_len(1) + ssid + passphrase + checksum(1)
pub const CREDENTIAL_STORE_RECORD_LEN: usize =
    4 + 1 + 1 + 1 + WIFI_SSID_MAX + WIFI_PASSPHRASE_MAX + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencerPolicy {
    pub link_wait_timeout_ms: u32,
    pub address_timeout_ms: u32,
}

impl SequencerPolicy {
    pub const fn defaults() -> Self {
        Self {
            link_wait_timeout_ms: LINK_WAIT_UNBOUNDED,
            address_timeout_ms: ADDRESS_WAIT_DEFAULT_MS,
        }
    }

    pub const fn sanitized(self) -> Self {
        let link_wait_timeout_ms = if self.link_wait_timeout_ms == LINK_WAIT_UNBOUNDED {
            LINK_WAIT_UNBOUNDED
        } else {
            clamp_u32(self.link_wait_timeout_ms, LINK_WAIT_MIN_MS, LINK_WAIT_MAX_MS)
        };
        Self {
            link_wait_timeout_ms,
            address_timeout_ms: clamp_u32(
                self.address_timeout_ms,
                ADDRESS_WAIT_MIN_MS,
                ADDRESS_WAIT_MAX_MS,
            ),
        }
    }
}

impl Default for SequencerPolicy {
    fn default() -> Self {
        Self::defaults()
    }
}

const fn clamp_u32(value: u32, min: u32, max: u32) -> u32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Credentials baked in at build time, `LINKUP_WIFI_SSID` first, then the
/// plain `SSID`/`PASSWORD` pair.
pub fn compiled_wifi_credentials() -> Option<(&'static str, &'static str)> {
    let ssid = option_env!("LINKUP_WIFI_SSID").or(option_env!("SSID"))?;
    let passphrase = option_env!("LINKUP_WIFI_PASSPHRASE")
        .or(option_env!("PASSWORD"))
        .unwrap_or("");
    Some((ssid, passphrase))
}
