use core::sync::atomic::{AtomicU8, Ordering};

use embassy_net::{Runner, Stack, StackResources};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use esp_hal::rng::Rng;
use esp_radio::wifi::{
    event::{self, EventExt},
    AuthMethod, ClientConfig, Config as WifiRuntimeConfig, InternalWifiError, ModeConfig,
    ScanMethod, WifiController, WifiDevice, WifiError,
};
use linkup::{
    config::LINK_STATUS_SUCCESS,
    net::{NetEvent, WifiDriver},
    types::{ConnectParams, CredentialsError, SecurityType},
};
use log::{info, warn};
use static_cell::StaticCell;

use super::EVENT_BUS;

const WIFI_RX_QUEUE_SIZE: usize = 3;
const WIFI_TX_QUEUE_SIZE: usize = 2;
const WIFI_STATIC_RX_BUF_NUM: u8 = 4;
const WIFI_DYNAMIC_RX_BUF_NUM: u16 = 8;
const WIFI_DYNAMIC_TX_BUF_NUM: u16 = 8;
const WIFI_RX_BA_WIN: u8 = 3;
// Reported when the radio fails the association without a disconnect reason.
const LINK_STATUS_CONNECT_ERROR: i32 = 1;

static CONNECT_REQUESTS: Channel<CriticalSectionRawMutex, ModeConfig, 1> = Channel::new();
static LAST_DISCONNECT_REASON: AtomicU8 = AtomicU8::new(0);

pub(crate) struct RadioRuntime {
    pub(crate) controller: WifiController<'static>,
    pub(crate) net_runner: Runner<'static, WifiDevice<'static>>,
    pub(crate) stack: Stack<'static>,
}

pub(crate) fn setup(
    wifi: esp_hal::peripherals::WIFI<'static>,
) -> Result<RadioRuntime, &'static str> {
    static RADIO_CTRL: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();
    static STACK_RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

    let radio_ctrl = esp_radio::init().map_err(|err| {
        warn!("radio: esp_radio::init err={:?}", err);
        "radio: esp_radio::init failed"
    })?;
    let radio_ctrl = RADIO_CTRL.init(radio_ctrl);
    let (controller, ifaces) =
        esp_radio::wifi::new(radio_ctrl, wifi, wifi_runtime_config()).map_err(|err| match err {
            WifiError::InvalidArguments => "radio: wifi init failed invalid_args",
            WifiError::Unsupported => "radio: wifi init failed unsupported",
            WifiError::NotInitialized => "radio: wifi init failed not_initialized",
            WifiError::InternalError(InternalWifiError::NoMem) => "radio: wifi init failed no_mem",
            _ => "radio: wifi init failed other",
        })?;

    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    let (stack, net_runner) = embassy_net::new(
        ifaces.sta,
        embassy_net::Config::dhcpv4(Default::default()),
        STACK_RESOURCES.init(StackResources::<3>::new()),
        seed,
    );

    Ok(RadioRuntime {
        controller,
        net_runner,
        stack,
    })
}

fn wifi_runtime_config() -> WifiRuntimeConfig {
    WifiRuntimeConfig::default()
        .with_rx_queue_size(WIFI_RX_QUEUE_SIZE)
        .with_tx_queue_size(WIFI_TX_QUEUE_SIZE)
        .with_static_rx_buf_num(WIFI_STATIC_RX_BUF_NUM)
        .with_dynamic_rx_buf_num(WIFI_DYNAMIC_RX_BUF_NUM)
        .with_dynamic_tx_buf_num(WIFI_DYNAMIC_TX_BUF_NUM)
        .with_ampdu_rx_enable(false)
        .with_ampdu_tx_enable(false)
        .with_rx_ba_win(WIFI_RX_BA_WIN)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RadioDriverError {
    InvalidParams(CredentialsError),
    InvalidUtf8,
    Busy,
}

/// Validates and builds the station config up front so malformed parameters
/// are rejected synchronously; the association itself runs on the radio
/// task and reports back through the event bus.
pub(crate) struct RadioDriver;

impl WifiDriver for RadioDriver {
    type Error = RadioDriverError;

    fn issue_connect(&mut self, params: &ConnectParams<'_>) -> Result<(), Self::Error> {
        params.validate().map_err(RadioDriverError::InvalidParams)?;
        let mode = mode_config_from_params(params)?;
        CONNECT_REQUESTS
            .try_send(mode)
            .map_err(|_| RadioDriverError::Busy)
    }
}

#[embassy_executor::task]
pub(crate) async fn radio_task(mut controller: WifiController<'static>) {
    install_link_event_handlers();
    loop {
        let mode = CONNECT_REQUESTS.receive().await;
        let status = connect_station(&mut controller, &mode).await;
        EVENT_BUS.publish(&NetEvent::LinkConnectResult { status });
    }
}

#[embassy_executor::task]
pub(crate) async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}

fn install_link_event_handlers() {
    event::StaConnected::update_handler(|event| {
        info!(
            "radio: event sta_connected channel={} authmode={}",
            event.channel(),
            event.authmode()
        );
    });

    event::StaDisconnected::update_handler(|event| {
        let reason = event.reason();
        LAST_DISCONNECT_REASON.store(reason, Ordering::Relaxed);
        info!(
            "radio: event sta_disconnected reason={} ({})",
            reason,
            disconnect_reason_label(reason)
        );
        EVENT_BUS.publish(&NetEvent::LinkDisconnectResult { reason });
    });
}

async fn connect_station(controller: &mut WifiController<'static>, mode: &ModeConfig) -> i32 {
    if let Err(err) = controller.set_config(mode) {
        warn!("radio: station config err={:?}", err);
        return LINK_STATUS_CONNECT_ERROR;
    }
    if !matches!(controller.is_started(), Ok(true)) {
        if let Err(err) = controller.start_async().await {
            warn!("radio: wifi start err={:?}", err);
            return LINK_STATUS_CONNECT_ERROR;
        }
    }

    LAST_DISCONNECT_REASON.store(0, Ordering::Relaxed);
    match controller.connect_async().await {
        Ok(()) => LINK_STATUS_SUCCESS,
        Err(err) => {
            warn!("radio: wifi connect err={:?}", err);
            match LAST_DISCONNECT_REASON.load(Ordering::Relaxed) {
                0 => LINK_STATUS_CONNECT_ERROR,
                reason => i32::from(reason),
            }
        }
    }
}

// Channel any maps to an all-channel scan; band and management frame
// protection stay at the radio defaults (2.4 GHz only on ESP32, PMF capable).
fn mode_config_from_params(params: &ConnectParams<'_>) -> Result<ModeConfig, RadioDriverError> {
    let ssid = core::str::from_utf8(params.ssid).map_err(|_| RadioDriverError::InvalidUtf8)?;
    let password =
        core::str::from_utf8(params.passphrase).map_err(|_| RadioDriverError::InvalidUtf8)?;
    let auth_method = match params.security {
        SecurityType::Psk => AuthMethod::Wpa2Personal,
    };
    let client = ClientConfig::default()
        .with_ssid(ssid.into())
        .with_password(password.into())
        .with_auth_method(auth_method)
        .with_scan_method(ScanMethod::AllChannels);
    Ok(ModeConfig::Client(client))
}

fn disconnect_reason_label(reason: u8) -> &'static str {
    match reason {
        200 => "beacon_timeout",
        201 => "no_ap_found",
        202 => "auth_fail",
        203 => "assoc_fail",
        204 => "handshake_timeout",
        205 => "connection_fail",
        210 => "no_ap_found_compatible_security",
        211 => "no_ap_found_authmode_threshold",
        212 => "no_ap_found_rssi_threshold",
        _ => "other",
    }
}
