use crate::config::{SimConfig, SystemType};
use crate::error::SimError;
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("evshare-sim-config-{}-{name}", std::process::id()))
}

#[test]
fn defaults_are_valid() {
    let cfg = SimConfig::default();
    cfg.validate().expect("defaults validate");
    assert_eq!(cfg.seed, 42);
    assert_eq!(cfg.simulation_end_time, 525_600.0);
    assert_eq!(cfg.bin_interval, 60.0);
    assert_eq!(cfg.time_periods.len(), 5);
    assert_eq!(cfg.traffic_zones.len(), 5);
    assert_eq!(cfg.diagonal_shortcuts.len(), 9);
    assert_eq!(cfg.charging_station_positions.len(), 5);
    assert_eq!(cfg.system_type, SystemType::Stationary);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: SimConfig = serde_json::from_str(
        r#"{ "num_cars": 3, "seed": 7, "system_type": "cycle_stationary" }"#,
    )
    .expect("parse");
    assert_eq!(cfg.num_cars, 3);
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.system_type, SystemType::CycleStationary);
    assert_eq!(cfg.max_users, SimConfig::default().max_users);
    assert_eq!(cfg.traffic_zones, SimConfig::default().traffic_zones);
}

#[test]
fn zone_without_rush_multiplier_defaults_to_one() {
    let cfg: SimConfig = serde_json::from_str(
        r#"{ "traffic_zones": [ { "name": "z", "bounds": [0, 0, 10, 10], "base_traffic_factor": 2.0 } ] }"#,
    )
    .expect("parse");
    assert_eq!(cfg.traffic_zones[0].rush_hour_multiplier, 1.0);
    assert_eq!(cfg.traffic_zones[0].description, None);
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        SimConfig {
            bin_interval: 0.0,
            ..SimConfig::default()
        },
        SimConfig {
            car_charging_threshold: 150.0,
            ..SimConfig::default()
        },
        SimConfig {
            confidence_level: 1.0,
            ..SimConfig::default()
        },
        SimConfig {
            user_max_reservation_attempts: 0,
            ..SimConfig::default()
        },
        SimConfig {
            charging_power_min: 80.0,
            charging_power_max: 70.0,
            ..SimConfig::default()
        },
        SimConfig {
            base_user_arrival_rate: -1.0,
            ..SimConfig::default()
        },
    ];
    for cfg in cases {
        assert!(
            matches!(cfg.validate(), Err(SimError::InvalidConfig(_))),
            "expected rejection for {cfg:?}"
        );
    }
}

#[test]
fn zero_arrival_rate_is_allowed() {
    let cfg = SimConfig {
        base_user_arrival_rate: 0.0,
        max_users: 0,
        ..SimConfig::default()
    };
    cfg.validate().expect("valid");
}

#[test]
fn load_from_file_and_fallback() {
    let path = temp_path("ok.json");
    fs::write(&path, r#"{ "num_relocators": 1, "map_width": 40.0 }"#).expect("write");
    let cfg = SimConfig::from_json_file(&path).expect("load");
    assert_eq!(cfg.num_relocators, 1);
    assert_eq!(cfg.map_width, 40.0);
    let _ = fs::remove_file(&path);

    let bad = temp_path("bad.json");
    fs::write(&bad, "{ not json").expect("write");
    assert!(matches!(SimConfig::from_json_file(&bad), Err(SimError::Json(_))));
    assert_eq!(SimConfig::load_or_default(Some(bad.as_path())), SimConfig::default());
    let _ = fs::remove_file(&bad);

    let missing = temp_path("missing.json");
    assert!(matches!(SimConfig::from_json_file(&missing), Err(SimError::Io(_))));
    assert_eq!(SimConfig::load_or_default(None), SimConfig::default());
}
