//! Time and date formatting

use chrono::{DateTime, Datelike, NaiveDateTime, TimeDelta, Timelike, Weekday};

use super::label::Label;

/// Clock display mode reported by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourMode {
    TwentyFourHour,
    TwelveHour,
}

/// How the hour is written in 12h mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwelveHourStyle {
    /// `hh:MM`, always 5 characters, midnight and noon read `12`
    #[default]
    ZeroPadded,
    /// `h:MM` with the hour taken modulo 12, midnight reads `0:00`
    LeadingZeroStripped,
}

/// Date line layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateStyle {
    /// `Mon 05 Jan`
    #[default]
    Abbreviated,
    /// `Mo 05.01.26`, with hand-made German weekday names
    German,
}

/// Wall-clock reading delivered with every tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockReading {
    pub time: NaiveDateTime,
    pub mode: HourMode,
}

impl ClockReading {
    pub fn new(time: NaiveDateTime, mode: HourMode) -> Self {
        Self { time, mode }
    }

    /// Local reading from a Unix timestamp and a fixed UTC offset in seconds.
    ///
    /// Returns `None` if the result is outside chrono's supported range.
    pub fn from_timestamp(secs: i64, utc_offset: i32, mode: HourMode) -> Option<Self> {
        let utc = DateTime::from_timestamp(secs, 0)?.naive_utc();
        let time = utc.checked_add_signed(TimeDelta::try_seconds(utc_offset as i64)?)?;
        Some(Self { time, mode })
    }
}

/// Write `HH:MM` or its 12h form into `label`.
pub fn format_time<const N: usize>(
    label: &mut Label<N>,
    reading: &ClockReading,
    style: TwelveHourStyle,
) {
    let minute = reading.time.minute();
    match (reading.mode, style) {
        (HourMode::TwentyFourHour, _) => {
            label.set(format_args!("{:02}:{:02}", reading.time.hour(), minute))
        }
        (HourMode::TwelveHour, TwelveHourStyle::ZeroPadded) => {
            let (_, hour) = reading.time.hour12();
            label.set(format_args!("{:02}:{:02}", hour, minute))
        }
        (HourMode::TwelveHour, TwelveHourStyle::LeadingZeroStripped) => {
            label.set(format_args!("{}:{:02}", reading.time.hour() % 12, minute))
        }
    }
}

/// Write the two-digit seconds into `label`.
pub fn format_seconds<const N: usize>(label: &mut Label<N>, reading: &ClockReading) {
    label.set(format_args!("{:02}", reading.time.second()));
}

pub fn format_date<const N: usize>(label: &mut Label<N>, reading: &ClockReading, style: DateStyle) {
    let date = reading.time.date();
    match style {
        DateStyle::Abbreviated => label.set(format_args!(
            "{} {:02} {}",
            abbreviated_weekday(date.weekday()),
            date.day(),
            abbreviated_month(date.month0()),
        )),
        DateStyle::German => label.set(format_args!(
            "{} {:02}.{:02}.{:02}",
            german_weekday(date.weekday().num_days_from_sunday() as i32),
            date.day(),
            date.month(),
            date.year().rem_euclid(100),
        )),
    }
}

/// Two-letter German weekday, Sunday first. Unknown indices read `"??"`.
pub fn german_weekday(index: i32) -> &'static str {
    match index {
        0 => "So",
        1 => "Mo",
        2 => "Di",
        3 => "Mi",
        4 => "Do",
        5 => "Fr",
        6 => "Sa",
        _ => "??",
    }
}

pub fn abbreviated_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Three-letter English month for a zero-based month index.
pub fn abbreviated_month(month0: u32) -> &'static str {
    match month0 {
        0 => "Jan",
        1 => "Feb",
        2 => "Mar",
        3 => "Apr",
        4 => "May",
        5 => "Jun",
        6 => "Jul",
        7 => "Aug",
        8 => "Sep",
        9 => "Oct",
        10 => "Nov",
        11 => "Dec",
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading(h: u32, m: u32, s: u32, mode: HourMode) -> ClockReading {
        let time = NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap();
        ClockReading::new(time, mode)
    }

    #[test]
    fn twenty_four_hour_time_and_seconds() {
        let r = reading(13, 5, 9, HourMode::TwentyFourHour);
        let mut time: Label<5> = Label::new();
        let mut seconds: Label<7> = Label::new();
        format_time(&mut time, &r, TwelveHourStyle::ZeroPadded);
        format_seconds(&mut seconds, &r);
        assert_eq!(time.as_str(), "13:05");
        assert_eq!(seconds.as_str(), "09");
    }

    #[test]
    fn midnight_in_every_mode() {
        let mut time: Label<5> = Label::new();

        format_time(
            &mut time,
            &reading(0, 0, 0, HourMode::TwentyFourHour),
            TwelveHourStyle::ZeroPadded,
        );
        assert_eq!(time.as_str(), "00:00");

        format_time(
            &mut time,
            &reading(0, 5, 0, HourMode::TwelveHour),
            TwelveHourStyle::ZeroPadded,
        );
        assert_eq!(time.as_str(), "12:05");

        format_time(
            &mut time,
            &reading(0, 5, 0, HourMode::TwelveHour),
            TwelveHourStyle::LeadingZeroStripped,
        );
        assert_eq!(time.as_str(), "0:05");
    }

    #[test]
    fn stripped_twelve_hour_afternoon() {
        let mut time: Label<5> = Label::new();
        format_time(
            &mut time,
            &reading(13, 5, 0, HourMode::TwelveHour),
            TwelveHourStyle::LeadingZeroStripped,
        );
        assert_eq!(time.as_str(), "1:05");
        format_time(
            &mut time,
            &reading(9, 41, 0, HourMode::TwelveHour),
            TwelveHourStyle::ZeroPadded,
        );
        assert_eq!(time.as_str(), "09:41");
    }

    #[test]
    fn abbreviated_date() {
        // 2026-01-05 is a Monday
        let mut date: Label<15> = Label::new();
        format_date(
            &mut date,
            &reading(8, 0, 0, HourMode::TwentyFourHour),
            DateStyle::Abbreviated,
        );
        assert_eq!(date.as_str(), "Mon 05 Jan");
    }

    #[test]
    fn german_date() {
        let mut date: Label<15> = Label::new();
        format_date(
            &mut date,
            &reading(8, 0, 0, HourMode::TwentyFourHour),
            DateStyle::German,
        );
        assert_eq!(date.as_str(), "Mo 05.01.26");
    }

    #[test]
    fn german_weekday_is_total() {
        assert_eq!(german_weekday(0), "So");
        assert_eq!(german_weekday(3), "Mi");
        assert_eq!(german_weekday(6), "Sa");
        assert_eq!(german_weekday(7), "??");
        assert_eq!(german_weekday(-1), "??");
        assert_eq!(german_weekday(i32::MAX), "??");
        // Same answer every time
        assert_eq!(german_weekday(3), german_weekday(3));
    }

    #[test]
    fn month_fallback() {
        assert_eq!(abbreviated_month(11), "Dec");
        assert_eq!(abbreviated_month(12), "???");
    }

    #[test]
    fn reading_from_timestamp_applies_offset() {
        // 2024-03-03T23:30:00Z, one hour ahead lands on the next day
        let r = ClockReading::from_timestamp(1_709_508_600, 3_600, HourMode::TwentyFourHour).unwrap();
        assert_eq!(r.time.date(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(r.time.hour(), 0);
        assert_eq!(r.time.minute(), 30);
        assert!(ClockReading::from_timestamp(i64::MAX, 0, HourMode::TwelveHour).is_none());
    }
}
