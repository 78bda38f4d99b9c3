use embassy_net::Stack;
use linkup::{net::NetEvent, types::AddressSnapshot};
use log::warn;

use super::EVENT_BUS;

// Turns DHCP lease changes on the station interface into address-added events.
#[embassy_executor::task]
pub(crate) async fn address_watch_task(stack: Stack<'static>) {
    loop {
        stack.wait_config_up().await;
        match stack.config_v4() {
            Some(cfg) => {
                let snapshot = AddressSnapshot::with_ipv4(
                    cfg.address.address(),
                    cfg.address.prefix_len(),
                    cfg.gateway,
                );
                EVENT_BUS.publish(&NetEvent::Ipv4AddressAdded(snapshot));
            }
            None => warn!("address: config up without an ipv4 config"),
        }
        stack.wait_config_down().await;
    }
}
