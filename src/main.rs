#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Delay, Duration, Ticker, Timer};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::Backlight, battery::Battery, display::Display, vibration::VibrationMotor,
};
use pinetime_watchface::ui::{
    BatteryState, ClockReading, ConnectivityState, DefaultWatchface, HourMode, TickUnit,
    WatchFace, WatchfaceConfig,
};
use system::{
    bluetooth::{self, Server},
    config::{self, SystemConfig},
    time::{TimeManager, TimeReference},
};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));
// Central European Time, UTC+1
const TIMEZONE: i32 = 3_600;
const HOUR_MODE: HourMode = HourMode::TwentyFourHour;

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryState> = Signal::new();
static CONNECTIVITY: Signal<ThreadModeRawMutex, ConnectivityState> = Signal::new();
static NOTIFY: Signal<ThreadModeRawMutex, u8> = Signal::new();
static BATTERY_LEVEL: Signal<ThreadModeRawMutex, u8> = Signal::new();
static TIME: Signal<ThreadModeRawMutex, ClockReading> = Signal::new();

static BACKLIGHT: StaticCell<Backlight<'static>> = StaticCell::new();
static SERVER: StaticCell<Server> = StaticCell::new();

/// Pulse the vibration motor whenever the watchface asks for it
#[embassy_executor::task(pool_size = 1)]
async fn notify(mut motor: VibrationMotor<'static>) {
    loop {
        let count = NOTIFY.wait().await;
        match count {
            1 => motor.pulse_once(Some(200)).await,
            _ => motor.pulse_times(Some(200), count).await,
        }
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery<'static>) {
    loop {
        if battery.update().await {
            defmt::info!("Battery status updated");
            BATTERY_STATUS.signal(battery.state());
        };

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Keep advertising and report every link change.
#[embassy_executor::task(pool_size = 1)]
async fn update_connectivity(sd: &'static Softdevice, server: &'static Server) {
    loop {
        let link = bluetooth::serve_once(sd, server, &BATTERY_LEVEL, |connected| {
            CONNECTIVITY.signal(connected.into())
        })
        .await;
        if let Err(e) = link {
            defmt::warn!("Advertising failed: {:?}", e);
            Timer::after(Duration::from_secs(1)).await;
        }
    }
}

#[embassy_executor::task(pool_size = 1)]
async fn softdevice(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Own the watchface and draw every event it formats.
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(
    mut display: Display<'static, SPI2>,
    mut face: DefaultWatchface,
    server: &'static Server,
) {
    let mut tick = Ticker::every(Duration::from_millis(100));
    loop {
        if BATTERY_STATUS.signaled() {
            let status = BATTERY_STATUS.wait().await;
            let update = face.on_battery_change(status);
            defmt::info!(
                "Battery status: {} ({}) -> {}",
                status.percent,
                if status.charging {
                    "charging"
                } else {
                    "discharging"
                },
                update.tier,
            );
            bluetooth::set_battery_level(server, status.percent);
            BATTERY_LEVEL.signal(status.percent);
            if let Err(e) = face.show_battery(&mut display) {
                defmt::warn!("Drawing battery failed: {:?}", e);
            }
        }

        if CONNECTIVITY.signaled() {
            let state = CONNECTIVITY.wait().await;
            let update = face.on_connectivity_change(state);
            if let Some(alert) = update.alert {
                NOTIFY.signal(alert.pulses());
            }
            if let Err(e) = face.show_connectivity(&mut display) {
                defmt::warn!("Drawing Bluetooth glyph failed: {:?}", e);
            }
        }

        if TIME.signaled() {
            let reading = TIME.wait().await;
            let strings = face.on_tick(reading);
            defmt::debug!("Current time: {} {}", strings.time, strings.seconds);
            if let Err(e) = face.show_time(&mut display) {
                defmt::warn!("Drawing time failed: {:?}", e);
            }
        }

        tick.next().await;
    }
}

/// Get the current time, signalling on every tick boundary.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(clock: TimeManager, tick: TickUnit) {
    loop {
        let wait_secs = match clock.reading() {
            Some(reading) => {
                TIME.signal(reading);
                tick.secs_until_next(&reading)
            }
            None => {
                defmt::warn!("Clock out of range");
                tick.period_secs()
            }
        };

        // Re-schedule the timer interrupt
        Timer::after(Duration::from_secs(wait_secs)).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(SystemConfig::new());
    config::set_interrupt_priorities();
    defmt::info!("Initializing");

    let face = unwrap!(DefaultWatchface::new(WatchfaceConfig::german_face()));
    let tick = face.config().tick;

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Backlight
    BACKLIGHT.init(unwrap!(Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        2,
    )));

    // Initialize Battery, the first reading is the startup peek
    let battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None)).await;
    BATTERY_STATUS.signal(battery.state());

    // Initialize vibration motor
    let vibration = VibrationMotor::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    // Initialize Bluetooth, nothing is connected at boot
    let sd = Softdevice::enable(&bluetooth::generate_config());
    let server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;
    CONNECTIVITY.signal(ConnectivityState::DISCONNECTED);

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
        &mut Delay,
    ));

    let clock = TimeManager::init(
        unwrap!(TimeReference::from_timestamp(UTC_EPOCH)),
        TIMEZONE,
        HOUR_MODE,
    );

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(softdevice(sd)));
    unwrap!(spawner.spawn(update_connectivity(sd, server)));
    unwrap!(spawner.spawn(update_battery_status(battery)));
    unwrap!(spawner.spawn(update_lcd(display, face, server)));
    unwrap!(spawner.spawn(update_time(clock, tick)));
    unwrap!(spawner.spawn(notify(vibration)));
}
