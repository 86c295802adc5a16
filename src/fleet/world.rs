//! 车队仿真世界
//!
//! 持有配置、路网、实体仓库、统计引擎与随机源；`handle` 中的 `match` 即事件处理表。

use super::event::FleetEvent;
use super::registry::{Fleet, random_point};
use crate::config::SimConfig;
use crate::road::{Point, RoadNetwork};
use crate::sim::{SimTime, Simulator, World};
use crate::stats::StatsEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp};
use tracing::trace;

pub struct FleetWorld {
    pub cfg: SimConfig,
    pub road: RoadNetwork,
    pub fleet: Fleet,
    pub stats: StatsEngine,
    pub(crate) rng: StdRng,
}

impl FleetWorld {
    /// 以 `cfg.seed` 为种子生成路网与车队
    pub fn new(cfg: SimConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let road = RoadNetwork::generate(&cfg, &mut rng);
        let fleet = Fleet::generate(&cfg, &mut rng, SimTime::ZERO);
        Self::from_parts(cfg, road, fleet, rng)
    }

    /// 用给定的路网与车队组装（测试中手工搭建场景）
    pub fn from_parts(cfg: SimConfig, road: RoadNetwork, fleet: Fleet, rng: StdRng) -> Self {
        Self {
            cfg,
            road,
            fleet,
            stats: StatsEngine::new(),
            rng,
        }
    }

    /// 调度初始事件：t=0 的首个用户注册，以及首个 bin 收集
    pub fn schedule_initial(&self, sim: &mut Simulator<FleetEvent>) {
        sim.schedule(SimTime::ZERO, FleetEvent::UserSubscription);
        if self.cfg.enable_binning {
            sim.schedule(SimTime::from_minutes(self.cfg.bin_interval), FleetEvent::BinCollection);
        }
    }

    /// 速率为 `rate_per_hour` 的指数延迟（分钟）；速率非正时为无穷大
    pub(crate) fn exp_delay_minutes(&mut self, rate_per_hour: f64) -> f64 {
        match Exp::new(rate_per_hour) {
            Ok(exp) if rate_per_hour > 0.0 => 60.0 * exp.sample(&mut self.rng),
            _ => f64::INFINITY,
        }
    }

    pub(crate) fn random_location(&mut self) -> Point {
        random_point(&self.cfg, &mut self.rng)
    }
}

impl World<FleetEvent> for FleetWorld {
    fn handle(&mut self, ev: FleetEvent, sim: &mut Simulator<FleetEvent>) {
        trace!(kind = ev.kind(), at = %sim.now(), "处理事件");
        match ev {
            FleetEvent::UserSubscription => self.on_user_subscription(sim),
            FleetEvent::Reservation { user, location } => self.on_reservation(sim, user, location),
            FleetEvent::Pickup { user, car, location } => self.on_pickup(sim, user, car, location),
            FleetEvent::Dropoff { user, car, start, end } => self.on_dropoff(sim, user, car, start, end),
            FleetEvent::RelocateCar { car } => self.on_relocate_car(sim, car),
            FleetEvent::ArriveAtStation { car, station, relocator } => {
                self.on_arrive_at_station(sim, car, station, relocator)
            }
            FleetEvent::ChargingComplete { car, station } => self.on_charging_complete(sim, car, station),
            FleetEvent::BinCollection => self.on_bin_collection(sim),
        }
    }
}
