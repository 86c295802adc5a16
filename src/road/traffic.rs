//! 交通模型
//!
//! 交通因子由三部分相乘：所在区域的静态因子、一天中时段的倍率，
//! 以及高峰时段内区域额外的高峰倍率。因子越大，有效速度越低。

use super::point::Point;
use crate::config::{SimConfig, TimePeriodSpec, TrafficZoneSpec};
use crate::sim::{MINUTES_PER_DAY, SimTime};

/// 区域的静态交通属性（不在任何区域内时两者均为 1.0）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneFactors {
    pub base: f64,
    pub rush_hour: f64,
}

impl ZoneFactors {
    pub const NEUTRAL: ZoneFactors = ZoneFactors {
        base: 1.0,
        rush_hour: 1.0,
    };

    /// 在给定时段条件下的节点交通因子
    pub fn at(&self, time_multiplier: f64, rush: bool) -> f64 {
        let rush_mult = if rush { self.rush_hour } else { 1.0 };
        self.base * time_multiplier * rush_mult
    }
}

/// 交通区域与时段表
#[derive(Debug, Clone, Default)]
pub struct TrafficModel {
    zones: Vec<TrafficZoneSpec>,
    periods: Vec<TimePeriodSpec>,
}

impl TrafficModel {
    pub fn new(zones: Vec<TrafficZoneSpec>, periods: Vec<TimePeriodSpec>) -> Self {
        Self { zones, periods }
    }

    pub fn from_config(cfg: &SimConfig) -> Self {
        Self::new(cfg.traffic_zones.clone(), cfg.time_periods.clone())
    }

    /// 包含该点的第一个区域（边界包含在内）
    pub fn zone_at(&self, p: Point) -> Option<&TrafficZoneSpec> {
        self.zones.iter().find(|z| {
            let [x1, y1, x2, y2] = z.bounds;
            x1 <= p.x && p.x <= x2 && y1 <= p.y && p.y <= y2
        })
    }

    pub fn zone_factors(&self, p: Point) -> ZoneFactors {
        self.zone_at(p)
            .map(|z| ZoneFactors {
                base: z.base_traffic_factor,
                rush_hour: z.rush_hour_multiplier,
            })
            .unwrap_or(ZoneFactors::NEUTRAL)
    }

    /// 时间所在的时段（按一天内的分钟数判断）
    pub fn period_at(&self, t: SimTime) -> Option<&TimePeriodSpec> {
        let m = t.minute_of_day();
        self.periods
            .iter()
            .find(|p| p.start_minute <= m && m < p.end_minute)
    }

    pub fn time_multiplier(&self, t: SimTime) -> f64 {
        self.period_at(t).map_or(1.0, |p| p.traffic_multiplier)
    }

    pub fn is_rush_hour(&self, t: SimTime) -> bool {
        self.period_at(t).is_some_and(|p| p.rush_hour)
    }

    pub fn demand_multiplier(&self, t: SimTime) -> f64 {
        self.period_at(t).map_or(1.0, |p| p.demand_multiplier)
    }

    /// 某点在某时刻的完整交通因子
    pub fn factor_at(&self, p: Point, t: SimTime) -> f64 {
        self.zone_factors(p)
            .at(self.time_multiplier(t), self.is_rush_hour(t))
    }

    /// `t` 之后最近的一个时段边界（用于在需求为零的时段跳过等待）
    pub fn next_period_boundary(&self, t: SimTime) -> SimTime {
        let m = t.minute_of_day();
        let day_start = t.minutes() - m;
        let next = self
            .periods
            .iter()
            .flat_map(|p| [p.start_minute, p.end_minute])
            .filter(|&b| b > m && b <= MINUTES_PER_DAY)
            .fold(MINUTES_PER_DAY, f64::min);
        SimTime(day_start + next)
    }
}
