//! 充电站
//!
//! 充电站只记录正在充电的车辆列表；`capacity` 仅保存，不限制列表长度。

use super::car::Car;
use super::id::{CarId, StationId};
use crate::road::Point;
use crate::sim::SimTime;
use crate::stats::StatsEngine;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ChargingStation {
    pub id: StationId,
    pub location: Point,
    /// 充电功率（电量 / 小时）
    pub charging_power: f64,
    pub capacity: u32,
    charging: Vec<CarId>,
}

impl ChargingStation {
    pub fn new(id: StationId, location: Point, charging_power: f64, capacity: u32) -> Self {
        Self {
            id,
            location,
            charging_power,
            capacity,
            charging: Vec::new(),
        }
    }

    pub fn charging_cars(&self) -> &[CarId] {
        &self.charging
    }

    pub fn queue_len(&self) -> usize {
        self.charging.len()
    }

    pub fn is_charging(&self, car: CarId) -> bool {
        self.charging.contains(&car)
    }

    /// 车辆入列并开始充电；已在列表中时返回 `false`
    pub fn start_charging(&mut self, car: &mut Car, now: SimTime, stats: &mut StatsEngine) -> bool {
        if self.is_charging(car.id) {
            return false;
        }
        self.charging.push(car.id);
        car.start_charging(now);
        stats.record_charging_session();
        stats.record_queue_length(self.charging.len());
        info!(car = %car.id, station = %self.id, at = %now, queue = self.charging.len(), "🔌 开始充电");
        true
    }

    /// 车辆出列并结束充电；不在列表中时返回 `false`
    pub fn stop_charging(&mut self, car: &mut Car, now: SimTime, stats: &mut StatsEngine) -> bool {
        let Some(pos) = self.charging.iter().position(|&c| c == car.id) else {
            return false;
        };
        self.charging.remove(pos);
        car.stop_charging(now);
        stats.record_queue_length(self.charging.len());
        info!(car = %car.id, station = %self.id, at = %now, "充电完成");
        true
    }

    /// 把车充满所需的时间（小时）
    pub fn charging_duration_hours(&self, car: &Car) -> f64 {
        if self.charging_power <= 0.0 {
            return 0.0;
        }
        (car.max_charge() - car.charge_level()).max(0.0) / self.charging_power
    }
}
