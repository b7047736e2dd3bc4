//! Default watchface

use super::{
    battery::{self, BatteryLabelStyle, BatteryState, IconTier},
    clock::{self, ClockReading},
    config::{ConfigError, WatchfaceConfig},
    connectivity::{ConnectivityIndicator, ConnectivityState, ConnectivityUpdate, Visibility},
    label::Label,
    DisplaySink, TextRegion, WatchFace,
};

/// Time text, `"00:00"`
pub const TIME_LEN: usize = 5;
pub const SECONDS_LEN: usize = 7;
pub const DATE_LEN: usize = 15;
/// Battery text, `"B 100%"` fits
pub const BATTERY_LEN: usize = 7;

/// Text shown in the four regions, overwritten on every update
#[derive(Clone, Debug, Default)]
pub struct DisplayStrings {
    pub time: Label<TIME_LEN>,
    pub seconds: Label<SECONDS_LEN>,
    pub date: Label<DATE_LEN>,
    pub battery: Label<BATTERY_LEN>,
}

/// Result of a battery event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatteryUpdate<'a> {
    pub tier: IconTier,
    /// Empty when the label is hidden
    pub label: &'a str,
}

/// Basic default watchface
pub struct DefaultWatchface {
    config: WatchfaceConfig,
    strings: DisplayStrings,
    battery_tier: Option<IconTier>,
    connectivity: ConnectivityIndicator,
}

impl DefaultWatchface {
    /// Create new watchface from a validated configuration
    pub fn new(config: WatchfaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!("Watchface ticking every {} s", config.tick.period_secs());

        Ok(Self {
            config,
            strings: DisplayStrings::default(),
            battery_tier: None,
            connectivity: ConnectivityIndicator::new(config.bluetooth.unwrap_or_default()),
        })
    }

    pub fn config(&self) -> &WatchfaceConfig {
        &self.config
    }

    pub fn strings(&self) -> &DisplayStrings {
        &self.strings
    }

    /// Last battery tier, `None` before the first battery event
    pub fn battery_tier(&self) -> Option<IconTier> {
        self.battery_tier
    }

    /// Push time, seconds and date to the display.
    pub fn show_time<D: DisplaySink>(&self, display: &mut D) -> Result<(), D::Error> {
        display.set_text(TextRegion::Time, self.strings.time.as_str())?;
        if self.config.seconds {
            display.set_text(TextRegion::Seconds, self.strings.seconds.as_str())?;
        }
        if self.config.date.is_some() {
            display.set_text(TextRegion::Date, self.strings.date.as_str())?;
        }
        Ok(())
    }

    /// Push the battery label and glyph to the display.
    pub fn show_battery<D: DisplaySink>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.config.battery_label != BatteryLabelStyle::Hidden {
            display.set_text(TextRegion::Battery, self.strings.battery.as_str())?;
        }
        if let (true, Some(tier)) = (self.config.battery_icon, self.battery_tier) {
            display.set_battery_icon(tier)?;
        }
        Ok(())
    }

    /// Push the Bluetooth glyph to the display.
    pub fn show_connectivity<D: DisplaySink>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.config.bluetooth.is_none() {
            return Ok(());
        }
        match self.connectivity.visibility() {
            Some(visibility) => display.set_bluetooth_icon(visibility),
            None => Ok(()),
        }
    }
}

impl WatchFace for DefaultWatchface {
    fn on_tick(&mut self, reading: ClockReading) -> &DisplayStrings {
        clock::format_time(&mut self.strings.time, &reading, self.config.twelve_hour);
        if self.config.seconds {
            clock::format_seconds(&mut self.strings.seconds, &reading);
        }
        if let Some(style) = self.config.date {
            clock::format_date(&mut self.strings.date, &reading, style);
        }
        &self.strings
    }

    fn on_battery_change(&mut self, state: BatteryState) -> BatteryUpdate<'_> {
        let tier = IconTier::select(state);
        if self.battery_tier != Some(tier) {
            debug!("Battery tier {} at {}%", tier, state.percent);
        }
        self.battery_tier = Some(tier);
        battery::format_percent(&mut self.strings.battery, state, self.config.battery_label);

        BatteryUpdate {
            tier,
            label: self.strings.battery.as_str(),
        }
    }

    fn on_connectivity_change(&mut self, state: ConnectivityState) -> ConnectivityUpdate {
        if self.config.bluetooth.is_none() {
            return ConnectivityUpdate {
                icon: Visibility::Hidden,
                alert: None,
            };
        }
        let update = self.connectivity.update(state);
        if update.alert.is_some() {
            warn!("Bluetooth disconnected");
        }
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{
        clock::HourMode, connectivity::HapticAlert, MockDisplaySink, TickUnit,
    };
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn at(h: u32, m: u32, s: u32, mode: HourMode) -> ClockReading {
        let time = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap();
        ClockReading::new(time, mode)
    }

    #[test]
    fn seconds_face_fills_all_text() {
        let mut face = DefaultWatchface::new(WatchfaceConfig::seconds_face()).unwrap();
        let strings = face.on_tick(at(13, 5, 9, HourMode::TwentyFourHour));
        assert_eq!(strings.time.as_str(), "13:05");
        assert_eq!(strings.seconds.as_str(), "09");
        assert_eq!(strings.date.as_str(), "Mon 19 Oct");

        let update = face.on_battery_change(BatteryState::new(7, false));
        assert_eq!(update.label, "B 7%");
        assert_eq!(update.tier, IconTier::Empty);
    }

    #[test]
    fn minimal_face_leaves_optional_regions_empty() {
        let mut face = DefaultWatchface::new(WatchfaceConfig::minimal_face()).unwrap();
        let strings = face.on_tick(at(0, 5, 0, HourMode::TwelveHour));
        assert_eq!(strings.time.as_str(), "12:05");
        assert!(strings.seconds.is_empty());
        assert!(strings.date.is_empty());

        assert_eq!(face.on_battery_change(BatteryState::new(80, false)).label, "");
    }

    #[test]
    fn german_face_formats() {
        let mut face = DefaultWatchface::new(WatchfaceConfig::german_face()).unwrap();
        let strings = face.on_tick(at(0, 5, 0, HourMode::TwelveHour));
        assert_eq!(strings.time.as_str(), "0:05");
        assert_eq!(strings.date.as_str(), "Mo 19.10.26");
    }

    #[test]
    fn invalid_config_rejected() {
        let config = WatchfaceConfig {
            seconds: true,
            tick: TickUnit::Minute,
            ..WatchfaceConfig::default()
        };
        assert!(matches!(
            DefaultWatchface::new(config),
            Err(ConfigError::SecondsNeedSecondTick)
        ));
    }

    #[test]
    fn repeated_disconnect_alerts_twice() {
        let mut face = DefaultWatchface::new(WatchfaceConfig::german_face()).unwrap();
        assert_eq!(face.on_connectivity_change(ConnectivityState::CONNECTED).alert, None);
        let first = face.on_connectivity_change(ConnectivityState::DISCONNECTED);
        let second = face.on_connectivity_change(ConnectivityState::DISCONNECTED);
        assert_eq!(first.alert, Some(HapticAlert::DoublePulse));
        assert_eq!(second.alert, Some(HapticAlert::DoublePulse));
    }

    #[test]
    fn bluetooth_disabled_never_alerts() {
        let mut face = DefaultWatchface::new(WatchfaceConfig::seconds_face()).unwrap();
        let update = face.on_connectivity_change(ConnectivityState::DISCONNECTED);
        assert_eq!(update.alert, None);
    }

    #[test]
    fn show_pushes_enabled_regions() {
        let mut face = DefaultWatchface::new(WatchfaceConfig::german_face()).unwrap();
        face.on_tick(at(9, 41, 0, HourMode::TwentyFourHour));
        face.on_battery_change(BatteryState::new(55, false));
        face.on_connectivity_change(ConnectivityState::CONNECTED);

        let mut display = MockDisplaySink::new();
        display
            .expect_set_text()
            .with(eq(TextRegion::Time), eq("09:41"))
            .times(1)
            .returning(|_, _| Ok(()));
        display
            .expect_set_text()
            .with(eq(TextRegion::Date), eq("Mo 19.10.26"))
            .times(1)
            .returning(|_, _| Ok(()));
        display
            .expect_set_text()
            .with(eq(TextRegion::Battery), eq("55%"))
            .times(1)
            .returning(|_, _| Ok(()));
        display
            .expect_set_battery_icon()
            .with(eq(IconTier::Medium))
            .times(1)
            .returning(|_| Ok(()));
        display
            .expect_set_bluetooth_icon()
            .with(eq(Visibility::Visible))
            .times(1)
            .returning(|_| Ok(()));

        face.show_time(&mut display).unwrap();
        face.show_battery(&mut display).unwrap();
        face.show_connectivity(&mut display).unwrap();
    }

    #[test]
    fn show_skips_unknown_state() {
        let face = DefaultWatchface::new(WatchfaceConfig::default()).unwrap();
        let mut display = MockDisplaySink::new();
        display.expect_set_battery_icon().never();
        display.expect_set_bluetooth_icon().never();
        display
            .expect_set_text()
            .with(eq(TextRegion::Battery), eq(""))
            .times(1)
            .returning(|_, _| Ok(()));

        face.show_battery(&mut display).unwrap();
        face.show_connectivity(&mut display).unwrap();
    }

    #[test]
    fn show_propagates_display_errors() {
        let mut face = DefaultWatchface::new(WatchfaceConfig::seconds_face()).unwrap();
        face.on_tick(at(13, 5, 9, HourMode::TwentyFourHour));

        let mut display = MockDisplaySink::new();
        display.expect_set_text().times(1).returning(|_, _| Err(()));
        assert_eq!(face.show_time(&mut display), Err(()));
    }
}
