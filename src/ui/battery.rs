//! Battery icon tiers and the percent label

use super::label::Label;

/// Battery snapshot delivered by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    /// Charge in percent (0–100)
    pub percent: u8,
    /// Charging state
    pub charging: bool,
}

impl BatteryState {
    pub fn new(percent: u8, charging: bool) -> Self {
        Self { percent, charging }
    }
}

/// Battery glyph to show
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IconTier {
    Empty,
    Low,
    MediumLow,
    Medium,
    MediumHigh,
    Full,
    Charging,
}

impl IconTier {
    /// Pick the tier for a battery state. Charging wins over the charge level.
    pub fn select(state: BatteryState) -> Self {
        if state.charging {
            return Self::Charging;
        }
        match state.percent {
            90.. => Self::Full,
            70..=89 => Self::MediumHigh,
            50..=69 => Self::Medium,
            30..=49 => Self::MediumLow,
            10..=29 => Self::Low,
            _ => Self::Empty,
        }
    }

    /// Number of filled segments in a five segment battery glyph.
    pub fn segments(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Low => 1,
            Self::MediumLow => 2,
            Self::Medium => 3,
            Self::MediumHigh => 4,
            Self::Full | Self::Charging => 5,
        }
    }
}

/// Battery percent label layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryLabelStyle {
    /// No label
    Hidden,
    /// `64%`
    #[default]
    Percent,
    /// `B 64%`
    Prefixed,
}

/// Write the percent label for `state` into `label`.
pub fn format_percent<const N: usize>(
    label: &mut Label<N>,
    state: BatteryState,
    style: BatteryLabelStyle,
) {
    match style {
        BatteryLabelStyle::Hidden => label.clear(),
        BatteryLabelStyle::Percent => label.set(format_args!("{}%", state.percent)),
        BatteryLabelStyle::Prefixed => label.set(format_args!("B {}%", state.percent)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn discharging(percent: u8) -> IconTier {
        IconTier::select(BatteryState::new(percent, false))
    }

    #[test]
    fn full_band_and_boundary() {
        for percent in 90..=100 {
            assert_eq!(discharging(percent), IconTier::Full);
        }
        assert_eq!(discharging(89), IconTier::MediumHigh);
    }

    #[test]
    fn empty_band_and_boundary() {
        for percent in 0..=9 {
            assert_eq!(discharging(percent), IconTier::Empty);
        }
        assert_eq!(discharging(10), IconTier::Low);
    }

    #[test]
    fn inner_boundaries() {
        assert_eq!(discharging(29), IconTier::Low);
        assert_eq!(discharging(30), IconTier::MediumLow);
        assert_eq!(discharging(49), IconTier::MediumLow);
        assert_eq!(discharging(50), IconTier::Medium);
        assert_eq!(discharging(69), IconTier::Medium);
        assert_eq!(discharging(70), IconTier::MediumHigh);
    }

    #[test]
    fn charging_overrides_level() {
        assert_eq!(IconTier::select(BatteryState::new(5, true)), IconTier::Charging);
        assert_eq!(IconTier::select(BatteryState::new(100, true)), IconTier::Charging);
    }

    #[test]
    fn percent_labels() {
        let mut label: Label<7> = Label::new();
        format_percent(&mut label, BatteryState::new(7, false), BatteryLabelStyle::Percent);
        assert_eq!(label.as_str(), "7%");
        format_percent(&mut label, BatteryState::new(7, false), BatteryLabelStyle::Prefixed);
        assert_eq!(label.as_str(), "B 7%");
        format_percent(&mut label, BatteryState::new(100, true), BatteryLabelStyle::Prefixed);
        assert_eq!(label.as_str(), "B 100%");
        format_percent(&mut label, BatteryState::new(100, true), BatteryLabelStyle::Hidden);
        assert!(label.is_empty());
    }

    proptest! {
        #[test]
        fn tier_never_charging_while_discharging(percent in 0u8..=100) {
            prop_assert_ne!(discharging(percent), IconTier::Charging);
        }

        #[test]
        fn tier_is_monotonic_in_percent(a in 0u8..=100, b in 0u8..=100) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(discharging(low) <= discharging(high));
        }

        #[test]
        fn charging_always_wins(percent in any::<u8>()) {
            prop_assert_eq!(IconTier::select(BatteryState::new(percent, true)), IconTier::Charging);
        }
    }
}
