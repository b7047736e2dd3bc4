//! Watchface layout configuration

use core::fmt;

use chrono::Timelike;

use super::{
    battery::BatteryLabelStyle,
    clock::{ClockReading, DateStyle, TwelveHourStyle},
    connectivity::AlertPolicy,
};

/// Granularity of the host's clock tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickUnit {
    Second,
    #[default]
    Minute,
}

impl TickUnit {
    /// Ticker period in seconds
    pub fn period_secs(self) -> u64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
        }
    }

    /// Seconds from `reading` to the next tick boundary.
    ///
    /// Minute ticks land on the start of the next minute, not a fixed
    /// period after boot.
    pub fn secs_until_next(self, reading: &ClockReading) -> u64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60 - reading.time.second().min(59) as u64,
        }
    }
}

/// What a watchface shows and how
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchfaceConfig {
    /// Clock tick granularity
    pub tick: TickUnit,
    /// Show the seconds region
    pub seconds: bool,
    /// Date line, `None` hides it
    pub date: Option<DateStyle>,
    /// Hour layout in 12h mode
    pub twelve_hour: TwelveHourStyle,
    /// Battery percent label
    pub battery_label: BatteryLabelStyle,
    /// Show the battery glyph
    pub battery_icon: bool,
    /// Bluetooth glyph and disconnect alert, `None` ignores the link
    pub bluetooth: Option<AlertPolicy>,
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        Self {
            tick: TickUnit::Minute,
            seconds: false,
            date: Some(DateStyle::Abbreviated),
            twelve_hour: TwelveHourStyle::ZeroPadded,
            battery_label: BatteryLabelStyle::Percent,
            battery_icon: true,
            bluetooth: Some(AlertPolicy::EveryDisconnect),
        }
    }
}

impl WatchfaceConfig {
    /// Big time with seconds below, abbreviated date and a `B NN%` label
    pub fn seconds_face() -> Self {
        Self {
            tick: TickUnit::Second,
            seconds: true,
            date: Some(DateStyle::Abbreviated),
            twelve_hour: TwelveHourStyle::ZeroPadded,
            battery_label: BatteryLabelStyle::Prefixed,
            battery_icon: false,
            bluetooth: None,
        }
    }

    /// Time only
    pub fn minimal_face() -> Self {
        Self {
            tick: TickUnit::Minute,
            seconds: false,
            date: None,
            twelve_hour: TwelveHourStyle::ZeroPadded,
            battery_label: BatteryLabelStyle::Hidden,
            battery_icon: false,
            bluetooth: None,
        }
    }

    /// German date line, unpadded 12h hour, battery glyph and Bluetooth alert
    pub fn german_face() -> Self {
        Self {
            tick: TickUnit::Minute,
            seconds: false,
            date: Some(DateStyle::German),
            twelve_hour: TwelveHourStyle::LeadingZeroStripped,
            battery_label: BatteryLabelStyle::Percent,
            battery_icon: true,
            bluetooth: Some(AlertPolicy::EveryDisconnect),
        }
    }

    /// Check the configuration for combinations the host cannot drive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seconds && self.tick != TickUnit::Second {
            return Err(ConfigError::SecondsNeedSecondTick);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Seconds are shown but the clock only ticks once a minute
    SecondsNeedSecondTick,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecondsNeedSecondTick => {
                f.write_str("seconds region requires a once-per-second tick")
            }
        }
    }
}
