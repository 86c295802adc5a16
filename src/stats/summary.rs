//! 运行摘要
//!
//! 供外部实验脚本消费的汇总指标：原始数值与格式化字符串并存。

use super::bin::TimeBuckets;
use super::engine::StatsEngine;
use crate::error::SimError;
use crate::sim::format_duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub reservation_success_rate: f64,
    pub reservation_success_rate_pct_str: String,
    pub successful_reservations: u64,
    pub failed_reservations: u64,
    pub total_reservations: u64,
    pub average_attempts_before_success: f64,
    pub average_attempts_before_success_str: String,

    pub total_trips: u64,
    pub average_trip_distance: f64,
    pub average_trip_distance_str: String,
    pub total_distance_traveled: f64,
    pub total_distance_traveled_str: String,

    pub in_use_rate: f64,
    pub in_use_rate_pct_str: String,
    pub charging_rate: f64,
    pub charging_rate_pct_str: String,
    pub idle_rate: f64,
    pub idle_rate_pct_str: String,

    pub total_charging_sessions: u64,
    pub average_queue_length: f64,
    pub average_queue_length_str: String,

    pub average_walking_time_minutes: f64,
    pub average_walking_time_str: String,
    pub average_wait_time_minutes: f64,

    pub simulated_minutes: f64,
    pub bins_collected: usize,
}

impl SummaryMetrics {
    /// 由统计引擎与全部车辆的时间桶（在仿真终点求值）构造
    pub fn from_engine(stats: &StatsEngine, car_times: TimeBuckets, simulated_minutes: f64) -> Self {
        let total_time = car_times.total();
        let share = |x: f64| if total_time > 0.0 { x / total_time } else { 0.0 };
        let in_use_rate = share(car_times.in_use);
        let charging_rate = share(car_times.charging);
        let idle_rate = (1.0 - in_use_rate - charging_rate).max(0.0);

        let success_rate = stats.reservation_success_rate();
        let avg_attempts = stats.average_attempts_before_success();
        let avg_trip = stats.average_trip_distance();
        let total_distance = stats.total_trip_distance();
        let avg_queue = stats.average_queue_length();
        let avg_walk = stats.average_walking_time();

        Self {
            reservation_success_rate: success_rate,
            reservation_success_rate_pct_str: pct(success_rate),
            successful_reservations: stats.successful_reservations(),
            failed_reservations: stats.failed_reservations(),
            total_reservations: stats.total_reservations(),
            average_attempts_before_success: avg_attempts,
            average_attempts_before_success_str: format!("{avg_attempts:.2}"),

            total_trips: stats.total_trips(),
            average_trip_distance: avg_trip,
            average_trip_distance_str: format_distance(avg_trip),
            total_distance_traveled: total_distance,
            total_distance_traveled_str: format_distance(total_distance),

            in_use_rate,
            in_use_rate_pct_str: pct(in_use_rate),
            charging_rate,
            charging_rate_pct_str: pct(charging_rate),
            idle_rate,
            idle_rate_pct_str: pct(idle_rate),

            total_charging_sessions: stats.charging_sessions(),
            average_queue_length: avg_queue,
            average_queue_length_str: format!("{avg_queue:.2}"),

            average_walking_time_minutes: avg_walk,
            average_walking_time_str: format_duration(avg_walk),
            average_wait_time_minutes: stats.average_wait_time(),

            simulated_minutes,
            bins_collected: stats.bins().len(),
        }
    }

    /// 单行紧凑 JSON
    pub fn to_json_line(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string(self)?)
    }

    /// 写入格式化的 JSON 文件
    pub fn write_json(&self, path: &Path) -> Result<(), SimError> {
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body)?;
        info!(path = %path.display(), "已写出摘要 JSON");
        Ok(())
    }

    /// 人类可读的指标报告
    pub fn log(&self) {
        info!(
            success_rate = %self.reservation_success_rate_pct_str,
            total_reservations = self.total_reservations,
            avg_walking = %self.average_walking_time_str,
            avg_attempts = %self.average_attempts_before_success_str,
            "预约统计"
        );
        info!(
            total_trips = self.total_trips,
            avg_distance = %self.average_trip_distance_str,
            total_distance = %self.total_distance_traveled_str,
            "行程统计"
        );
        info!(
            in_use = %self.in_use_rate_pct_str,
            charging = %self.charging_rate_pct_str,
            idle = %self.idle_rate_pct_str,
            "车辆利用率"
        );
        info!(
            sessions = self.total_charging_sessions,
            avg_queue = %self.average_queue_length_str,
            "充电统计"
        );
    }
}

/// `0.734` -> `73.4%`
pub fn pct(x: f64) -> String {
    format!("{:.1}%", x * 100.0)
}

/// 不足 1 个单位时以米显示，否则保留两位小数的 km
pub fn format_distance(km: f64) -> String {
    if km.abs() < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{km:.2} km")
    }
}
