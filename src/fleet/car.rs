//! 车辆
//!
//! 车辆状态机与时间记账。每次状态切换前，先把自上次切换以来的时间记入当前
//! 状态对应的时间桶；因此任何时刻三个时间桶加上未结算的区间都等于车辆存在的时长。

use super::id::CarId;
use crate::road::Point;
use crate::sim::SimTime;
use crate::stats::TimeBuckets;
use rand::Rng;
use std::fmt;
use tracing::{debug, info, warn};

/// 车辆状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarStatus {
    Available,
    Reserved,
    InUse,
    Charging,
    Discharged,
    NeedsCharging,
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CarStatus::Available => "available",
            CarStatus::Reserved => "reserved",
            CarStatus::InUse => "in_use",
            CarStatus::Charging => "charging",
            CarStatus::Discharged => "discharged",
            CarStatus::NeedsCharging => "needs_charging",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Idle,
    InUse,
    Charging,
}

impl CarStatus {
    // 预约状态只是取车前的过渡，计入使用时间
    fn bucket(self) -> Bucket {
        match self {
            CarStatus::Available | CarStatus::NeedsCharging | CarStatus::Discharged => Bucket::Idle,
            CarStatus::Reserved | CarStatus::InUse => Bucket::InUse,
            CarStatus::Charging => Bucket::Charging,
        }
    }
}

/// 共享电动车
#[derive(Debug, Clone)]
pub struct Car {
    pub id: CarId,
    pub location: Point,
    charge_level: f64,
    max_charge: f64,
    charging_threshold: f64,
    status: CarStatus,
    times: TimeBuckets,
    last_state_change: SimTime,
    created_at: SimTime,
    total_distance: f64,
}

impl Car {
    /// 满电、可用的新车
    pub fn new(id: CarId, location: Point, max_charge: f64, charging_threshold: f64, now: SimTime) -> Self {
        Self {
            id,
            location,
            charge_level: max_charge,
            max_charge,
            charging_threshold,
            status: CarStatus::Available,
            times: TimeBuckets::default(),
            last_state_change: now,
            created_at: now,
            total_distance: 0.0,
        }
    }

    pub fn status(&self) -> CarStatus {
        self.status
    }

    pub fn charge_level(&self) -> f64 {
        self.charge_level
    }

    pub fn max_charge(&self) -> f64 {
        self.max_charge
    }

    pub fn charging_threshold(&self) -> f64 {
        self.charging_threshold
    }

    pub fn charge_percentage(&self) -> f64 {
        self.charge_level / self.max_charge * 100.0
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn created_at(&self) -> SimTime {
        self.created_at
    }

    pub fn last_state_change(&self) -> SimTime {
        self.last_state_change
    }

    /// 状态可用且电量高于充电阈值
    pub fn is_available(&self) -> bool {
        self.status == CarStatus::Available && self.charge_level > self.charging_threshold
    }

    /// 电量不高于阈值，需要送去充电
    pub fn needs_charging(&self) -> bool {
        matches!(self.status, CarStatus::NeedsCharging | CarStatus::Discharged)
    }

    /// 已结算的时间桶
    pub fn settled_times(&self) -> TimeBuckets {
        self.times
    }

    /// 截至 `now` 的时间桶（含尚未结算的当前区间）
    pub fn time_buckets(&self, now: SimTime) -> TimeBuckets {
        let mut t = self.times;
        Self::credit(&mut t, self.status.bucket(), now.since(self.last_state_change));
        t
    }

    fn credit(t: &mut TimeBuckets, bucket: Bucket, dt: f64) {
        match bucket {
            Bucket::Idle => t.idle += dt,
            Bucket::InUse => t.in_use += dt,
            Bucket::Charging => t.charging += dt,
        }
    }

    // 结算到 now 并切换状态
    fn transition(&mut self, now: SimTime, next: CarStatus) {
        let dt = now.since(self.last_state_change);
        Self::credit(&mut self.times, self.status.bucket(), dt);
        self.last_state_change = self.last_state_change.max(now);
        debug!(car = %self.id, from = %self.status, to = %next, "车辆状态切换");
        self.status = next;
    }

    pub fn update_location(&mut self, p: Point) {
        self.location = p;
    }

    /// available → reserved
    pub fn reserve(&mut self, now: SimTime) {
        if self.status != CarStatus::Available {
            warn!(car = %self.id, status = %self.status, "预约了非空闲车辆");
        }
        self.transition(now, CarStatus::Reserved);
    }

    /// → in_use；从 reserved 出发时不结算，预约区间随后计入使用时间
    pub fn start_use(&mut self, now: SimTime) {
        if self.status == CarStatus::Reserved {
            debug!(car = %self.id, "车辆开始使用");
            self.status = CarStatus::InUse;
        } else {
            self.transition(now, CarStatus::InUse);
        }
    }

    /// → available
    pub fn free_up(&mut self, now: SimTime) {
        self.transition(now, CarStatus::Available);
    }

    /// → charging
    pub fn start_charging(&mut self, now: SimTime) {
        self.transition(now, CarStatus::Charging);
    }

    /// charging → available
    pub fn stop_charging(&mut self, now: SimTime) {
        self.transition(now, CarStatus::Available);
    }

    /// 行驶 `distance` 后按单位耗电 `rate` 扣减电量，返回本次耗电量
    pub fn update_charge(&mut self, distance: f64, rate: f64, now: SimTime) -> f64 {
        let consumption = distance * rate;
        self.charge_level -= consumption;
        self.total_distance += distance;

        if self.charge_level <= 0.0 {
            self.charge_level = 0.0;
            self.transition(now, CarStatus::Discharged);
            warn!(car = %self.id, at = %now, "🪫 车辆电量耗尽");
        } else if self.charge_level <= self.charging_threshold && self.status == CarStatus::Available {
            self.transition(now, CarStatus::NeedsCharging);
            info!(car = %self.id, at = %now, charge = self.charge_level, "车辆需要充电");
        }
        consumption
    }

    /// 充入 `amount` 电量（截断到上限）；耗尽的车有电后恢复可用
    pub fn charge(&mut self, amount: f64, now: SimTime) {
        self.charge_level = (self.charge_level + amount.max(0.0)).min(self.max_charge);
        if self.charge_level > 0.0 && self.status == CarStatus::Discharged {
            self.transition(now, CarStatus::Available);
            info!(car = %self.id, at = %now, "车辆已充电，恢复可用");
        }
    }
}

/// 单位距离耗电：`base ± U(variance)`，不为负
pub fn sample_consumption_rate<R: Rng>(base: f64, variance: f64, rng: &mut R) -> f64 {
    let jitter = if variance > 0.0 { rng.gen_range(-variance..=variance) } else { 0.0 };
    (base + jitter).max(0.0)
}
