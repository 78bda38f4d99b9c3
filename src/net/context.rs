use core::cell::Cell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use crate::types::{AddressObservation, LinkObservation};

use super::{latch::EventLatch, router::NotificationRouter};

/// Synchronization state shared by one sequencer and its router.
///
/// The router is the only writer of the observations and the only raiser of
/// the latches; the sequencer reads an observation only after the matching
/// latch fired, and resets everything at the start of an attempt.
pub struct ConnectionContext {
    pub(crate) link_result: EventLatch,
    pub(crate) ip_acquired: EventLatch,
    link: Mutex<CriticalSectionRawMutex, Cell<LinkObservation>>,
    address: Mutex<CriticalSectionRawMutex, Cell<AddressObservation>>,
}

impl ConnectionContext {
    pub const fn new() -> Self {
        Self {
            link_result: EventLatch::new(),
            ip_acquired: EventLatch::new(),
            link: Mutex::new(Cell::new(LinkObservation {
                connected: false,
                last_status_code: 0,
            })),
            address: Mutex::new(Cell::new(AddressObservation {
                address_acquired: false,
            })),
        }
    }

    pub fn router(&self) -> NotificationRouter<'_> {
        NotificationRouter::new(self)
    }

    pub fn link_observation(&self) -> LinkObservation {
        self.link.lock(Cell::get)
    }

    pub fn address_observation(&self) -> AddressObservation {
        self.address.lock(Cell::get)
    }

    pub fn link_result(&self) -> &EventLatch {
        &self.link_result
    }

    pub fn ip_acquired(&self) -> &EventLatch {
        &self.ip_acquired
    }

    pub(crate) fn update_link(&self, update: impl FnOnce(&mut LinkObservation)) {
        self.link.lock(|cell| {
            let mut observation = cell.get();
            update(&mut observation);
            cell.set(observation);
        });
    }

    pub(crate) fn mark_address_acquired(&self) {
        self.address.lock(|cell| {
            cell.set(AddressObservation {
                address_acquired: true,
            })
        });
    }

    // Observations first: a stale event racing this reset can then only leave
    // a cleared latch behind, never a raised latch over cleared data.
    pub(crate) fn reset(&self) {
        self.link.lock(|cell| cell.set(LinkObservation::default()));
        self.address
            .lock(|cell| cell.set(AddressObservation::default()));
        self.link_result.reset();
        self.ip_acquired.reset();
    }
}

impl Default for ConnectionContext {
    fn default() -> Self {
        Self::new()
    }
}
