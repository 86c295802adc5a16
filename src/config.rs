//! Simulation configuration.
//!
//! A single immutable value built once (defaults, optionally overridden by a
//! JSON file) and passed by reference into the road network, the fleet and the
//! statistics engine. Every field has a default, so partial files are fine.

use crate::error::SimError;
use crate::road::Point;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Which post-run analysis the report focuses on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SystemType {
    /// Parameters do not vary with time: detect the transient phase.
    #[default]
    Stationary,
    /// Parameters follow a daily cycle: per-phase confidence intervals.
    CycleStationary,
}

/// One time-of-day period, in minutes from midnight (`start` inclusive, `end` exclusive).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimePeriodSpec {
    pub name: String,
    pub start_minute: f64,
    pub end_minute: f64,
    pub traffic_multiplier: f64,
    pub demand_multiplier: f64,
    #[serde(default)]
    pub rush_hour: bool,
}

/// An axis-aligned traffic zone. `bounds` is `[x1, y1, x2, y2]`, inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrafficZoneSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub bounds: [f64; 4],
    pub base_traffic_factor: f64,
    #[serde(default = "one")]
    pub rush_hour_multiplier: f64,
}

fn one() -> f64 {
    1.0
}

/// Full parameter set of a run. Times are minutes, distances map units,
/// speeds map units per hour, rates events per hour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    pub simulation_end_time: f64,
    pub max_users: u32,
    pub map_width: f64,
    pub map_height: f64,

    pub enable_binning: bool,
    pub bin_interval: f64,
    pub confidence_level: f64,
    pub system_type: SystemType,

    pub num_cars: u32,
    pub car_max_charge: f64,
    pub car_charging_threshold: f64,
    pub car_consumption_base: f64,
    pub car_consumption_variance: f64,

    pub base_user_arrival_rate: f64,
    pub user_reservation_rate: f64,
    pub no_car_retry_rate: f64,
    pub walking_speed: f64,
    pub walking_time_jitter_hours: f64,
    pub driving_speed: f64,
    pub max_pickup_distance: f64,
    pub user_max_reservation_attempts: u32,

    pub num_charging_stations: u32,
    pub charging_power_min: f64,
    pub charging_power_max: f64,
    /// Fixed station positions; random when empty.
    pub charging_station_positions: Vec<Point>,
    /// Stored on each station but not enforced.
    pub station_capacity: u32,

    pub num_relocators: u32,
    pub relocator_speed_min: f64,
    pub relocator_speed_max: f64,
    pub relocation_retry_delay: f64,

    pub road_grid_size: f64,
    pub node_position_variance: f64,
    /// Extra roads between grid indices `[(i1, j1), (i2, j2)]`.
    pub diagonal_shortcuts: Vec<[(usize, usize); 2]>,

    pub time_periods: Vec<TimePeriodSpec>,
    pub traffic_zones: Vec<TrafficZoneSpec>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            simulation_end_time: 525_600.0,
            max_users: 500,
            map_width: 100.0,
            map_height: 100.0,

            enable_binning: true,
            bin_interval: 60.0,
            confidence_level: 0.95,
            system_type: SystemType::Stationary,

            num_cars: 20,
            car_max_charge: 100.0,
            car_charging_threshold: 20.0,
            car_consumption_base: 0.2,
            car_consumption_variance: 0.05,

            base_user_arrival_rate: 0.1,
            user_reservation_rate: 1.0 / 4800.0,
            no_car_retry_rate: 60.0,
            walking_speed: 50.0,
            walking_time_jitter_hours: 0.5,
            driving_speed: 30.0,
            max_pickup_distance: 30.0,
            user_max_reservation_attempts: 3,

            num_charging_stations: 5,
            charging_power_min: 30.0,
            charging_power_max: 70.0,
            charging_station_positions: vec![
                Point::new(20.0, 20.0),
                Point::new(80.0, 20.0),
                Point::new(20.0, 80.0),
                Point::new(80.0, 80.0),
                Point::new(50.0, 50.0),
            ],
            station_capacity: 2,

            num_relocators: 3,
            relocator_speed_min: 50.0,
            relocator_speed_max: 70.0,
            relocation_retry_delay: 5.0,

            road_grid_size: 15.0,
            node_position_variance: 3.0,
            diagonal_shortcuts: default_diagonal_shortcuts(),

            time_periods: default_time_periods(),
            traffic_zones: default_traffic_zones(),
        }
    }
}

/// `(i, j)`–`(i+1, j+1)` for the first 3×3 block of the grid.
pub fn default_diagonal_shortcuts() -> Vec<[(usize, usize); 2]> {
    let mut out = Vec::with_capacity(9);
    for j in 0..3 {
        for i in 0..3 {
            out.push([(i, j), (i + 1, j + 1)]);
        }
    }
    out
}

pub fn default_time_periods() -> Vec<TimePeriodSpec> {
    let p = |name: &str, start: f64, end: f64, traffic: f64, demand: f64, rush: bool| {
        TimePeriodSpec {
            name: name.to_string(),
            start_minute: start,
            end_minute: end,
            traffic_multiplier: traffic,
            demand_multiplier: demand,
            rush_hour: rush,
        }
    };
    vec![
        p("EARLY_MORNING", 0.0, 360.0, 0.5, 0.3, false),
        p("MORNING_RUSH", 360.0, 600.0, 2.0, 2.0, true),
        p("MIDDAY", 600.0, 900.0, 1.0, 1.0, false),
        p("EVENING_RUSH", 900.0, 1140.0, 2.0, 1.8, true),
        p("EVENING", 1140.0, 1440.0, 0.7, 0.6, false),
    ]
}

pub fn default_traffic_zones() -> Vec<TrafficZoneSpec> {
    let z = |name: &str, desc: &str, bounds: [f64; 4], base: f64, rush: f64| TrafficZoneSpec {
        name: name.to_string(),
        description: Some(desc.to_string()),
        bounds,
        base_traffic_factor: base,
        rush_hour_multiplier: rush,
    };
    vec![
        z("center", "Central zone - heavy traffic", [30.0, 30.0, 70.0, 70.0], 2.5, 1.5),
        z("residential_nw", "Northwest residential zone - light traffic", [0.0, 50.0, 30.0, 100.0], 0.7, 1.2),
        z("residential_se", "Southeast residential zone - light traffic", [50.0, 0.0, 100.0, 50.0], 0.7, 1.2),
        z("commercial", "Commercial zone - medium-high traffic", [20.0, 20.0, 80.0, 80.0], 1.8, 1.3),
        z("industrial", "Industrial zone - very light traffic", [0.0, 0.0, 20.0, 20.0], 0.5, 1.4),
    ]
}

impl SimConfig {
    /// Parse a JSON config file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<SimConfig, SimError> {
        let raw = fs::read_to_string(path)?;
        let cfg: SimConfig = serde_json::from_str(&raw)?;
        Ok(cfg)
    }

    /// Load `path` if given; on any failure warn and continue with defaults.
    pub fn load_or_default(path: Option<&Path>) -> SimConfig {
        let Some(path) = path else {
            return SimConfig::default();
        };
        match SimConfig::from_json_file(path) {
            Ok(cfg) => {
                info!(path = %path.display(), "loaded configuration");
                cfg
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to load configuration, using defaults");
                SimConfig::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let bad = |msg: String| Err(SimError::InvalidConfig(msg));

        let positive = [
            ("simulation_end_time", self.simulation_end_time),
            ("map_width", self.map_width),
            ("map_height", self.map_height),
            ("bin_interval", self.bin_interval),
            ("car_max_charge", self.car_max_charge),
            ("walking_speed", self.walking_speed),
            ("driving_speed", self.driving_speed),
            ("road_grid_size", self.road_grid_size),
            ("relocation_retry_delay", self.relocation_retry_delay),
            ("user_reservation_rate", self.user_reservation_rate),
            ("no_car_retry_rate", self.no_car_retry_rate),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return bad(format!("{name} must be a positive number, got {v}"));
            }
        }

        let non_negative = [
            ("base_user_arrival_rate", self.base_user_arrival_rate),
            ("car_charging_threshold", self.car_charging_threshold),
            ("car_consumption_base", self.car_consumption_base),
            ("car_consumption_variance", self.car_consumption_variance),
            ("walking_time_jitter_hours", self.walking_time_jitter_hours),
            ("max_pickup_distance", self.max_pickup_distance),
            ("node_position_variance", self.node_position_variance),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return bad(format!("{name} must be >= 0, got {v}"));
            }
        }

        if self.car_charging_threshold > self.car_max_charge {
            return bad(format!(
                "car_charging_threshold ({}) exceeds car_max_charge ({})",
                self.car_charging_threshold, self.car_max_charge
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return bad(format!("confidence_level must be in (0, 1), got {}", self.confidence_level));
        }
        if self.user_max_reservation_attempts == 0 {
            return bad("user_max_reservation_attempts must be at least 1".to_string());
        }
        if !(self.charging_power_min > 0.0 && self.charging_power_min <= self.charging_power_max) {
            return bad(format!(
                "charging power range [{}, {}] is invalid",
                self.charging_power_min, self.charging_power_max
            ));
        }
        if !(self.relocator_speed_min > 0.0 && self.relocator_speed_min <= self.relocator_speed_max) {
            return bad(format!(
                "relocator speed range [{}, {}] is invalid",
                self.relocator_speed_min, self.relocator_speed_max
            ));
        }
        for p in &self.time_periods {
            if !(p.start_minute < p.end_minute) || p.traffic_multiplier < 0.0 || p.demand_multiplier < 0.0 {
                return bad(format!("time period {} is invalid", p.name));
            }
        }
        for z in &self.traffic_zones {
            let [x1, y1, x2, y2] = z.bounds;
            if x1 > x2 || y1 > y2 || z.base_traffic_factor < 0.0 || z.rush_hour_multiplier < 0.0 {
                return bad(format!("traffic zone {} is invalid", z.name));
            }
        }
        Ok(())
    }
}
