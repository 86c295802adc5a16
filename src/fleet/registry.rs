//! 实体仓库
//!
//! 持有全部车辆、充电站、调度员与用户，由仿真世界独占并传给事件处理器。

use super::car::Car;
use super::error::FleetError;
use super::id::{CarId, RelocatorId, StationId, UserId};
use super::relocator::{RelocationTask, Relocator};
use super::station::ChargingStation;
use super::user::User;
use crate::config::SimConfig;
use crate::road::Point;
use crate::sim::SimTime;
use crate::stats::{StatsEngine, TimeBuckets};
use rand::Rng;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct Fleet {
    cars: Vec<Car>,
    stations: Vec<ChargingStation>,
    relocators: Vec<Relocator>,
    users: Vec<User>,
}

/// 地图上均匀分布的随机点
pub(crate) fn random_point<R: Rng>(cfg: &SimConfig, rng: &mut R) -> Point {
    Point::new(
        rng.gen_range(0.0..=cfg.map_width),
        rng.gen_range(0.0..=cfg.map_height),
    )
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按配置在时刻 `now` 初始化车辆、充电站与调度员
    pub fn generate<R: Rng>(cfg: &SimConfig, rng: &mut R, now: SimTime) -> Self {
        let mut fleet = Fleet::new();

        for _ in 0..cfg.num_cars {
            let p = random_point(cfg, rng);
            fleet.add_car(p, cfg.car_max_charge, cfg.car_charging_threshold, now);
        }

        let positions: Vec<Point> = if cfg.charging_station_positions.is_empty() {
            (0..cfg.num_charging_stations)
                .map(|_| random_point(cfg, rng))
                .collect()
        } else {
            cfg.charging_station_positions
                .iter()
                .take(cfg.num_charging_stations as usize)
                .copied()
                .collect()
        };
        for p in positions {
            let power = rng.gen_range(cfg.charging_power_min..=cfg.charging_power_max);
            fleet.add_station(p, power, cfg.station_capacity);
        }

        for _ in 0..cfg.num_relocators {
            let speed = rng.gen_range(cfg.relocator_speed_min..=cfg.relocator_speed_max);
            let p = random_point(cfg, rng);
            fleet.add_relocator(speed, p);
        }

        info!(
            cars = fleet.cars.len(),
            stations = fleet.stations.len(),
            relocators = fleet.relocators.len(),
            "🚗 车队初始化完成"
        );
        fleet
    }

    pub fn add_car(&mut self, location: Point, max_charge: f64, threshold: f64, now: SimTime) -> CarId {
        let id = CarId(self.cars.len());
        self.cars.push(Car::new(id, location, max_charge, threshold, now));
        id
    }

    pub fn add_station(&mut self, location: Point, power: f64, capacity: u32) -> StationId {
        let id = StationId(self.stations.len());
        self.stations.push(ChargingStation::new(id, location, power, capacity));
        id
    }

    pub fn add_relocator(&mut self, speed: f64, location: Point) -> RelocatorId {
        let id = RelocatorId(self.relocators.len());
        self.relocators.push(Relocator::new(id, speed, location));
        id
    }

    pub fn add_user(&mut self, now: SimTime) -> UserId {
        let id = UserId(self.users.len());
        self.users.push(User::new(id, now));
        id
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn stations(&self) -> &[ChargingStation] {
        &self.stations
    }

    pub fn relocators(&self) -> &[Relocator] {
        &self.relocators
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn car(&self, id: CarId) -> &Car {
        &self.cars[id.0]
    }

    pub fn car_mut(&mut self, id: CarId) -> &mut Car {
        &mut self.cars[id.0]
    }

    pub fn station(&self, id: StationId) -> &ChargingStation {
        &self.stations[id.0]
    }

    pub fn relocator(&self, id: RelocatorId) -> &Relocator {
        &self.relocators[id.0]
    }

    pub fn relocator_mut(&mut self, id: RelocatorId) -> &mut Relocator {
        &mut self.relocators[id.0]
    }

    pub fn user(&self, id: UserId) -> &User {
        &self.users[id.0]
    }

    pub fn user_mut(&mut self, id: UserId) -> &mut User {
        &mut self.users[id.0]
    }

    /// 直线距离最近的可用车辆
    pub fn nearest_available_car(&self, p: Point) -> Option<CarId> {
        self.cars
            .iter()
            .filter(|c| c.is_available())
            .min_by(|a, b| a.location.distance(&p).total_cmp(&b.location.distance(&p)))
            .map(|c| c.id)
    }

    /// 直线距离最近的充电站
    pub fn nearest_station(&self, p: Point) -> Option<StationId> {
        self.stations
            .iter()
            .min_by(|a, b| a.location.distance(&p).total_cmp(&b.location.distance(&p)))
            .map(|s| s.id)
    }

    /// 第一个空闲的调度员
    pub fn available_relocator(&self) -> Option<RelocatorId> {
        self.relocators.iter().find(|r| r.is_available()).map(|r| r.id)
    }

    /// 车辆当前所在的充电站列表
    pub fn charging_station_of(&self, car: CarId) -> Option<StationId> {
        self.stations.iter().find(|s| s.is_charging(car)).map(|s| s.id)
    }

    /// 正在搬运该车的调度员
    pub fn relocator_carrying(&self, car: CarId) -> Option<RelocatorId> {
        self.relocators
            .iter()
            .find(|r| r.task().is_some_and(|t| t.car == car))
            .map(|r| r.id)
    }

    /// 在充电站开始充电；车辆已在某个充电站列表中时拒绝
    pub fn start_charging(
        &mut self,
        car: CarId,
        station: StationId,
        now: SimTime,
        stats: &mut StatsEngine,
    ) -> Result<(), FleetError> {
        if let Some(existing) = self.charging_station_of(car) {
            return Err(FleetError::AlreadyCharging { car, station: existing });
        }
        self.stations[station.0].start_charging(&mut self.cars[car.0], now, stats);
        Ok(())
    }

    /// 结束充电；车辆不在该站列表中时返回 `false`
    pub fn stop_charging(&mut self, car: CarId, station: StationId, now: SimTime, stats: &mut StatsEngine) -> bool {
        self.stations[station.0].stop_charging(&mut self.cars[car.0], now, stats)
    }

    /// 调度员接受搬运任务
    pub fn assign_relocation(
        &mut self,
        relocator: RelocatorId,
        car: CarId,
        destination: Point,
    ) -> Result<(), FleetError> {
        self.relocators[relocator.0].assign_task(&self.cars[car.0], destination)
    }

    /// 调度员完成搬运；任务不是该车时返回 `None`
    pub fn complete_relocation(&mut self, relocator: RelocatorId, car: CarId) -> Option<RelocationTask> {
        self.relocators[relocator.0].complete_task(&mut self.cars[car.0])
    }

    /// 全部车辆截至 `now` 的时间桶之和
    pub fn car_time_totals(&self, now: SimTime) -> TimeBuckets {
        self.cars.iter().map(|c| c.time_buckets(now)).sum()
    }
}
