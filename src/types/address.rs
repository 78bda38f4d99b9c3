use core::net::{Ipv4Addr, Ipv6Addr};

use crate::config::NET_IF_MAX_IPV4_ADDR;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ipv4Slot {
    pub address: Ipv4Addr,
    pub prefix_len: u8,
}

/// Addresses configured on the interface when an address-added event fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressSnapshot {
    pub ipv4: [Option<Ipv4Slot>; NET_IF_MAX_IPV4_ADDR],
    pub gateway: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

impl AddressSnapshot {
    pub const fn empty() -> Self {
        Self {
            ipv4: [None; NET_IF_MAX_IPV4_ADDR],
            gateway: None,
            ipv6: None,
        }
    }

    pub fn with_ipv4(address: Ipv4Addr, prefix_len: u8, gateway: Option<Ipv4Addr>) -> Self {
        let mut snapshot = Self::empty();
        snapshot.ipv4[0] = Some(Ipv4Slot {
            address,
            prefix_len,
        });
        snapshot.gateway = gateway;
        snapshot
    }

    pub fn ipv4_slots(&self) -> impl Iterator<Item = &Ipv4Slot> {
        self.ipv4.iter().flatten()
    }
}

impl Default for AddressSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
