//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};
use pinetime_watchface::ui::BatteryState;

/// Battery API
pub struct Battery<'a> {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'a, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'a, P0_12>,
    /// Last reported state
    state: BatteryState,
}

impl<'a> Battery<'a> {
    /// Configure battery settings on boot and take the first reading.
    pub async fn init(adc: Saadc<'a, 1>, charge_pin: Input<'a, P0_12>) -> Self {
        let mut battery = Self {
            adc,
            pin_charge_indication: charge_pin,
            state: BatteryState::new(0, false),
        };
        battery.state = battery.read().await;
        battery
    }

    /// Last reported state. Call `update()` to fetch current data.
    pub fn state(&self) -> BatteryState {
        self.state
    }

    /// Read the hardware and return whether the state changed.
    pub async fn update(&mut self) -> bool {
        let state = self.read().await;
        let changed = state != self.state;
        self.state = state;
        changed
    }

    async fn read(&mut self) -> BatteryState {
        let charging = self.pin_charge_indication.is_low();
        let percent = percent_from_millivolts(self.voltage().await);
        BatteryState::new(percent, charging)
    }

    /// Battery voltage in millivolts
    async fn voltage(&mut self) -> u16 {
        let mut buf = [0; 1];
        self.adc.sample(&mut buf).await;
        // For detailed explanation of formula check https://wiki.pine64.org/wiki/PineTime
        // Use u32 during calculation to prevent overflow
        (buf[0].max(0) as u32 * 2000 / 1241) as u16
    }
}

/// Estimate capacity from fixed data points with linear interpolation in between.
fn percent_from_millivolts(voltage: u16) -> u8 {
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}
