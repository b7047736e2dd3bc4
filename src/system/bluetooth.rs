//! Bluetooth module

// Core
use core::mem;

use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};

// BLE
use nrf_softdevice::{
    self,
    ble::{
        advertisement_builder::{
            Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
            ServiceUuid16,
        },
        gatt_server, peripheral,
    },
    raw, Config, Softdevice,
};

pub static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(ServiceList::Complete, &[ServiceUuid16::BATTERY])
    .full_name("PineTime")
    .build();

pub static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_16(ServiceList::Complete, &[ServiceUuid16::BATTERY])
    .build();

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub bas: BatteryService,
}

#[nrf_softdevice::gatt_service(uuid = "180f")]
pub struct BatteryService {
    #[characteristic(uuid = "2a19", read, notify)]
    pub battery_level: u8,
}

pub fn generate_config() -> Config {
    Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: b"PineTime" as *const u8 as _,
            current_len: 8,
            max_len: 8,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Advertise until a central connects, then serve the battery service until
/// the link drops. `on_link` is called with every link change; every level
/// from `battery_levels` is notified to the central while connected.
pub async fn serve_once(
    sd: &Softdevice,
    server: &Server,
    battery_levels: &Signal<ThreadModeRawMutex, u8>,
    mut on_link: impl FnMut(bool),
) -> Result<(), peripheral::AdvertiseError> {
    let config = peripheral::Config::default();
    let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
        adv_data: &ADV_DATA,
        scan_data: &SCAN_DATA,
    };
    let conn = peripheral::advertise_connectable(sd, adv, &config).await?;
    defmt::info!("Bluetooth central connected");
    on_link(true);

    let serve = gatt_server::run(&conn, server, |event| match event {
        ServerEvent::Bas(BatteryServiceEvent::BatteryLevelCccdWrite { notifications }) => {
            defmt::debug!("Battery level notifications: {}", notifications);
        }
    });
    let notify_levels = async {
        loop {
            let level = battery_levels.wait().await;
            if let Err(e) = server.bas.battery_level_notify(&conn, &level) {
                defmt::debug!("Battery level not notified: {:?}", e);
            }
        }
    };

    match select(serve, notify_levels).await {
        Either::First(reason) => {
            defmt::info!("Bluetooth central disconnected: {:?}", reason)
        }
        Either::Second(()) => {}
    }
    on_link(false);

    Ok(())
}

/// Store the current battery level so reads and new connections see it.
pub fn set_battery_level(server: &Server, percent: u8) {
    if let Err(e) = server.bas.battery_level_set(&percent) {
        defmt::warn!("Battery level not stored: {:?}", e);
    }
}
