mod address;
mod radio;

use esp_hal::timer::timg::TimerGroup;
use esp_storage::FlashStorage;
use linkup::{
    config::compiled_wifi_credentials,
    net::{
        add_network, ConnectionContext, ConnectionSequencer, EventBus, NotificationRouter,
        SequencerConfig,
    },
    storage::CredentialStore,
    telemetry,
    types::ConnectionRequest,
};
use log::{error, info, warn};
use static_cell::StaticCell;

pub(crate) static EVENT_BUS: EventBus<'static> = EventBus::new();

type FlashCredentialStore = CredentialStore<FlashStorage<'static>>;

pub(crate) fn run() -> ! {
    esp_println::logger::init_logger(log::LevelFilter::Info);
    let peripherals = esp_hal::init(esp_hal::Config::default());
    esp_alloc::heap_allocator!(size: 72 * 1024);
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let flash = FlashStorage::new(peripherals.FLASH).multicore_auto_park();
    let mut store = CredentialStore::at_last_sector(flash, FlashStorage::SECTOR_SIZE);
    let Some(request) = initial_request(&mut store) else {
        error!("linkup: no wifi credentials in flash or build environment");
        halt_forever();
    };

    let radio = match radio::setup(peripherals.WIFI) {
        Ok(radio) => radio,
        Err(err) => {
            error!("{}", err);
            halt_forever();
        }
    };

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(radio::net_task(radio.net_runner));
        spawner.must_spawn(radio::radio_task(radio.controller));
        spawner.must_spawn(address::address_watch_task(radio.stack));
        spawner.must_spawn(connect_task(request, store));
    });
}

fn initial_request(store: &mut FlashCredentialStore) -> Option<ConnectionRequest> {
    if let Some(request) = store.load() {
        info!("linkup: using stored credentials ssid={}", request.ssid_str());
        return Some(request);
    }
    let (ssid, passphrase) = compiled_wifi_credentials()?;
    match ConnectionRequest::new(ssid.as_bytes(), passphrase.as_bytes()) {
        Ok(request) => {
            info!("linkup: using compiled credentials ssid={}", request.ssid_str());
            Some(request)
        }
        Err(err) => {
            warn!("linkup: compiled credentials rejected err={}", err.as_str());
            None
        }
    }
}

#[embassy_executor::task]
async fn connect_task(request: ConnectionRequest, mut store: FlashCredentialStore) {
    static CONTEXT: StaticCell<ConnectionContext> = StaticCell::new();
    static ROUTER: StaticCell<NotificationRouter<'static>> = StaticCell::new();

    let context: &'static ConnectionContext = CONTEXT.init(ConnectionContext::new());
    let router: &'static NotificationRouter<'static> = ROUTER.init(context.router());
    if let Err(err) = router.register(&EVENT_BUS) {
        error!("linkup: router registration failed err={}", err.as_str());
        return;
    }

    let mut sequencer =
        ConnectionSequencer::new(context, radio::RadioDriver, SequencerConfig::defaults());
    let result = add_network(&mut sequencer, &mut store, &request).await;
    if result.outcome.success {
        info!(
            "linkup: network up reason={} saved={:?}",
            result.outcome.reason_str(),
            result.saved
        );
    } else {
        error!(
            "linkup: network bring-up failed reason={}",
            result.outcome.reason_str()
        );
    }

    let counters = telemetry::snapshot();
    info!(
        "linkup: telemetry attempts={} successes={} rejected={} link_failures={} address_timeouts={}",
        counters.connect_attempts,
        counters.connect_successes,
        counters.driver_rejections,
        counters.link_failures,
        counters.address_timeouts
    );
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
