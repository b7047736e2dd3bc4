//! Watchface formatting: clock, battery and Bluetooth state to text and glyphs

pub mod battery;
pub mod clock;
pub mod config;
pub mod connectivity;
mod default_watchface;
pub mod label;

pub use battery::{BatteryLabelStyle, BatteryState, IconTier};
pub use clock::{ClockReading, DateStyle, HourMode, TwelveHourStyle};
pub use config::{ConfigError, TickUnit, WatchfaceConfig};
pub use connectivity::{
    AlertPolicy, ConnectivityIndicator, ConnectivityState, ConnectivityUpdate, HapticAlert,
    Visibility,
};
pub use default_watchface::{BatteryUpdate, DefaultWatchface, DisplayStrings};
pub use label::Label;

/// Events the host delivers to a watchface.
///
/// Each call takes the new raw state and returns what to draw. The watchface
/// keeps no reference to the host.
pub trait WatchFace {
    /// Clock tick, once per second or minute
    fn on_tick(&mut self, reading: ClockReading) -> &DisplayStrings;

    /// Battery state change, and once at startup
    fn on_battery_change(&mut self, state: BatteryState) -> BatteryUpdate<'_>;

    /// Bluetooth link change, and once at startup
    fn on_connectivity_change(&mut self, state: ConnectivityState) -> ConnectivityUpdate;
}

/// Text areas of a watchface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextRegion {
    Time,
    Seconds,
    Date,
    Battery,
}

/// Display primitives offered by the host
#[cfg_attr(test, mockall::automock(type Error = ();))]
pub trait DisplaySink {
    type Error;

    /// Replace the text of a region
    fn set_text(&mut self, region: TextRegion, text: &str) -> Result<(), Self::Error>;

    /// Swap the battery glyph
    fn set_battery_icon(&mut self, tier: IconTier) -> Result<(), Self::Error>;

    /// Show or hide the Bluetooth glyph
    fn set_bluetooth_icon(&mut self, visibility: Visibility) -> Result<(), Self::Error>;
}
