//! Watchface state formatting for the PineTime
//!
//! Turns raw platform state (wall clock, battery snapshot, Bluetooth link) into
//! the short strings and icon selections a watchface draws. The crate is
//! `no_std` and holds no global state; the firmware binary owns one
//! [`ui::DefaultWatchface`] and feeds it from its event tasks.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod ui;
