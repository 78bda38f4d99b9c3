use log::{info, warn};

use crate::{config::LINK_STATUS_SUCCESS, telemetry, types::AddressSnapshot};

use super::{
    context::ConnectionContext,
    event::{EventKind, EventMask, EventSubscriber, NetEvent, NetEventHandler, SubscribeError},
};

/// Turns platform network events into observation updates and latch raises.
#[derive(Clone, Copy)]
pub struct NotificationRouter<'a> {
    context: &'a ConnectionContext,
}

impl<'a> NotificationRouter<'a> {
    pub const SUBSCRIPTIONS: [EventMask; 2] = [EventMask::LINK, EventMask::ADDRESS];

    pub fn new(context: &'a ConnectionContext) -> Self {
        Self { context }
    }

    /// Subscribes for link and address events. The router has to outlive
    /// the subscription, hence the `'a` borrow of itself.
    pub fn register<S>(&'a self, subscriber: &S) -> Result<(), SubscribeError>
    where
        S: EventSubscriber<'a> + ?Sized,
    {
        for kinds in Self::SUBSCRIPTIONS {
            subscriber.subscribe(kinds, self)?;
        }
        info!("net: router registered for link and address events");
        Ok(())
    }

    fn handle_link_connect_result(&self, status: i32) {
        let connected = status <= LINK_STATUS_SUCCESS;
        self.context.update_link(|link| {
            link.connected = connected;
            link.last_status_code = status;
        });
        if connected {
            info!("net: wifi is now connected status={}", status);
        } else {
            warn!("net: connecting to wifi failed status={}", status);
        }
        self.context.link_result.raise();
    }

    fn handle_link_disconnect_result(&self, reason: u8) {
        self.context.update_link(|link| link.connected = false);
        telemetry::record_link_disconnect();
        info!("net: wifi disconnected reason={}", reason);
    }

    fn handle_address_added(&self, kind: EventKind, snapshot: &AddressSnapshot) {
        info!("net: ip address acquired ({}), reachable at:", kind.as_str());
        let gateway = snapshot.gateway;
        for slot in snapshot.ipv4_slots() {
            match gateway {
                Some(gateway) => info!(
                    "- IPv4 {}/{} (via gateway {})",
                    slot.address, slot.prefix_len, gateway
                ),
                None => info!("- IPv4 {}/{}", slot.address, slot.prefix_len),
            }
        }
        if let Some(address) = snapshot.ipv6 {
            info!("- IPv6 {}", address);
        }

        self.context.mark_address_acquired();
        telemetry::record_address_event();
        self.context.ip_acquired.raise();
    }
}

impl NetEventHandler for NotificationRouter<'_> {
    fn on_event(&self, event: &NetEvent) {
        match event {
            NetEvent::LinkConnectResult { status } => self.handle_link_connect_result(*status),
            NetEvent::LinkDisconnectResult { reason } => {
                self.handle_link_disconnect_result(*reason)
            }
            NetEvent::Ipv4AddressAdded(snapshot) | NetEvent::Ipv6AddressAdded(snapshot) => {
                self.handle_address_added(event.kind(), snapshot)
            }
        }
    }
}
