#![no_std]
#![no_main]

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{AnyPin, Input, Level, Output, OutputDrive, Pin, Pull},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Ticker, Timer};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use pinetime_watchface::{
    peripherals::{
        backlight::Backlight,
        battery::{Battery, BatteryInfo},
        display::Display,
    },
    system::{
        config::{SystemConfig, WatchfaceConfig},
        time::{until_next_minute_us, TimeManager, TimeReference},
    },
    ui::{ClockStyle, DefaultWatchface, DisplayMode, WatchFace, WatchFaceState},
};

// Others
use chrono::{NaiveDateTime, Timelike};

// Include current UTC epoch, local offset and clock style at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryInfo> = Signal::new();
static DISPLAY_MODE: Signal<ThreadModeRawMutex, DisplayMode> = Signal::new();
static TIME: Signal<ThreadModeRawMutex, NaiveDateTime> = Signal::new();

fn watchface_config() -> WatchfaceConfig {
    WatchfaceConfig {
        clock_style: ClockStyle::from_24h(CLOCK_24H),
        utc_offset_secs: UTC_OFFSET,
        ..Default::default()
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery, poll_secs: u32) {
    loop {
        match battery.update().await {
            Ok(true) => {
                // Battery status changed
                defmt::info!("Battery status updated");
                BATTERY_STATUS.signal(battery.info());
            }
            Ok(false) => {}
            Err(e) => defmt::warn!("Battery measurement failed: {}", e),
        }

        // Re-schedule the timer interrupt
        Timer::after(Duration::from_secs(poll_secs.into())).await;
    }
}

/// Follow the display mode with the backlight
#[embassy_executor::task(pool_size = 1)]
async fn update_backlight(
    mut backlight: Backlight<Output<'static, AnyPin>>,
    config: WatchfaceConfig,
) {
    loop {
        let mode = DISPLAY_MODE.wait().await;
        if let Err(e) = backlight.apply(mode, &config) {
            defmt::warn!("Backlight update failed: {}", defmt::Debug2Format(&e));
        }
    }
}

#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut display: Display<SPI2>, mut face: DefaultWatchface) {
    let mut tick = Ticker::every(Duration::from_millis(250));
    let mut time = None;
    let mut battery = None;
    let mut mode = None;

    loop {
        let mut changed = false;

        if BATTERY_STATUS.signaled() {
            let status = BATTERY_STATUS.wait().await;
            defmt::info!(
                "Battery status: {} ({})",
                status.percent,
                if status.charging {
                    "charging"
                } else {
                    "discharging"
                }
            );
            battery = Some(status);
            changed = true;
        }

        if TIME.signaled() {
            let now = TIME.wait().await;
            defmt::info!("Current time: {}:{}", now.time().hour(), now.time().minute());
            time = Some(now);
            changed = true;
        }

        // Nothing can be shown before the first tick
        if let (true, Some(time)) = (changed, time) {
            match face.update(&WatchFaceState { time, battery }) {
                Ok(new_mode) => {
                    if mode != Some(new_mode) {
                        DISPLAY_MODE.signal(new_mode);
                        mode = Some(new_mode);
                    }
                    if let Err(e) = display.render(&face) {
                        defmt::warn!("Rendering failed: {}", e);
                    }
                }
                Err(e) => defmt::warn!("Watchface update failed: {}", e),
            }
        }

        tick.next().await;
    }
}

/// Minute tick: publish the time once on start, then on every minute boundary.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(clock: TimeManager) {
    loop {
        match clock.local_at(Instant::now().as_micros()) {
            Ok(now) => {
                defmt::debug!("Time updated");
                TIME.signal(now);
                Timer::after(Duration::from_micros(until_next_minute_us(now))).await;
            }
            Err(e) => {
                defmt::error!("Clock unavailable: {}", e);
                Timer::after(Duration::from_secs(60)).await;
            }
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    let config = watchface_config();
    unwrap!(config.validate());

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Backlight, dark until the first frame is drawn
    let backlight = unwrap!(Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
        0,
    ));

    // Initialize Battery
    let battery = unwrap!(Battery::init(saadc, Input::new(p.P0_12, Pull::None)).await);
    BATTERY_STATUS.signal(battery.info());

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
    ));

    // Clock starts from the build time
    let reference = unwrap!(TimeReference::from_timestamp(
        UTC_EPOCH,
        Instant::now().as_micros()
    ));
    let clock = TimeManager::new(reference, config.utc_offset_secs);

    let face = DefaultWatchface::new(&config);

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(update_backlight(backlight, config)));
    unwrap!(spawner.spawn(update_battery_status(battery, config.battery_poll_secs)));
    unwrap!(spawner.spawn(update_lcd(display, face)));
    unwrap!(spawner.spawn(update_time(clock)));
}
