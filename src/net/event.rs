use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use crate::{config::EVENT_BUS_SUBSCRIBERS_MAX, types::AddressSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EventKind {
    LinkConnectResult = 0,
    LinkDisconnectResult = 1,
    Ipv4AddressAdded = 2,
    Ipv6AddressAdded = 3,
}

impl EventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LinkConnectResult => "link_connect_result",
            Self::LinkDisconnectResult => "link_disconnect_result",
            Self::Ipv4AddressAdded => "ipv4_addr_add",
            Self::Ipv6AddressAdded => "ipv6_addr_add",
        }
    }

    const fn bit(self) -> u32 {
        1 << self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventMask(u32);

impl EventMask {
    pub const NONE: Self = Self(0);
    pub const LINK: Self = Self::NONE
        .with(EventKind::LinkConnectResult)
        .with(EventKind::LinkDisconnectResult);
    pub const ADDRESS: Self = Self::NONE
        .with(EventKind::Ipv4AddressAdded)
        .with(EventKind::Ipv6AddressAdded);

    pub const fn with(self, kind: EventKind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub const fn contains(self, kind: EventKind) -> bool {
        self.0 & kind.bit() != 0
    }
}

/// Payloads as delivered by the platform's network-event subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetEvent {
    LinkConnectResult { status: i32 },
    LinkDisconnectResult { reason: u8 },
    Ipv4AddressAdded(AddressSnapshot),
    Ipv6AddressAdded(AddressSnapshot),
}

impl NetEvent {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::LinkConnectResult { .. } => EventKind::LinkConnectResult,
            Self::LinkDisconnectResult { .. } => EventKind::LinkDisconnectResult,
            Self::Ipv4AddressAdded(_) => EventKind::Ipv4AddressAdded,
            Self::Ipv6AddressAdded(_) => EventKind::Ipv6AddressAdded,
        }
    }
}

/// Invoked on the event subsystem's own context; implementations must not block.
pub trait NetEventHandler: Sync {
    fn on_event(&self, event: &NetEvent);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubscribeError {
    Full,
}

impl SubscribeError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "subscriber_table_full",
        }
    }
}

pub trait EventSubscriber<'a> {
    fn subscribe(
        &self,
        kinds: EventMask,
        handler: &'a dyn NetEventHandler,
    ) -> Result<(), SubscribeError>;
}

#[derive(Clone, Copy)]
struct Subscription<'a> {
    kinds: EventMask,
    handler: &'a dyn NetEventHandler,
}

/// In-process fan-out of network events to subscribed handlers.
///
/// Platform glue publishes into the bus from whatever context the radio or
/// IP stack reports on; handlers run synchronously inside `publish`.
pub struct EventBus<'a, const N: usize = EVENT_BUS_SUBSCRIBERS_MAX> {
    subscriptions: Mutex<CriticalSectionRawMutex, RefCell<heapless::Vec<Subscription<'a>, N>>>,
}

impl<'a, const N: usize> EventBus<'a, N> {
    pub const fn new() -> Self {
        Self {
            subscriptions: Mutex::new(RefCell::new(heapless::Vec::new())),
        }
    }

    pub fn publish(&self, event: &NetEvent) -> usize {
        let kind = event.kind();
        // Copy out so handlers run outside the critical section. Same capacity
        // as the table, so collecting cannot overflow.
        let targets = self.subscriptions.lock(|subscriptions| {
            subscriptions
                .borrow()
                .iter()
                .filter(|subscription| subscription.kinds.contains(kind))
                .map(|subscription| subscription.handler)
                .collect::<heapless::Vec<&'a dyn NetEventHandler, N>>()
        });
        for handler in targets.iter() {
            handler.on_event(event);
        }
        targets.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions
            .lock(|subscriptions| subscriptions.borrow().len())
    }
}

impl<'a, const N: usize> Default for EventBus<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> EventSubscriber<'a> for EventBus<'a, N> {
    fn subscribe(
        &self,
        kinds: EventMask,
        handler: &'a dyn NetEventHandler,
    ) -> Result<(), SubscribeError> {
        self.subscriptions.lock(|subscriptions| {
            subscriptions
                .borrow_mut()
                .push(Subscription { kinds, handler })
                .map_err(|_| SubscribeError::Full)
        })
    }
}
