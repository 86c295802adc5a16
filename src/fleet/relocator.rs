//! 调度员
//!
//! 调度员把需要充电的车开到充电站。忙碌与否由是否持有任务决定。

use super::car::Car;
use super::error::FleetError;
use super::id::{CarId, RelocatorId};
use crate::road::{Point, RoadNetwork};
use crate::sim::SimTime;

/// 一次搬运任务
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelocationTask {
    pub car: CarId,
    pub destination: Point,
    pub start_location: Point,
}

#[derive(Debug, Clone)]
pub struct Relocator {
    pub id: RelocatorId,
    /// 基础速度（单位 / 小时）
    pub speed: f64,
    pub location: Point,
    task: Option<RelocationTask>,
}

impl Relocator {
    pub fn new(id: RelocatorId, speed: f64, location: Point) -> Self {
        Self {
            id,
            speed,
            location,
            task: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }

    pub fn is_available(&self) -> bool {
        !self.is_busy()
    }

    pub fn task(&self) -> Option<&RelocationTask> {
        self.task.as_ref()
    }

    /// 接受把 `car` 送往 `destination` 的任务
    pub fn assign_task(&mut self, car: &Car, destination: Point) -> Result<(), FleetError> {
        if self.is_busy() {
            return Err(FleetError::RelocatorBusy(self.id));
        }
        self.task = Some(RelocationTask {
            car: car.id,
            destination,
            start_location: car.location,
        });
        Ok(())
    }

    /// 完成任务：车与调度员都到达目的地，返回已完成的任务
    pub fn complete_task(&mut self, car: &mut Car) -> Option<RelocationTask> {
        let task = self.task.take_if(|t| t.car == car.id)?;
        car.update_location(task.destination);
        self.location = task.destination;
        Some(task)
    }

    /// 以自身速度在时刻 `now` 从 `from` 到 `to` 的通行时间（小时）
    pub fn travel_time_hours(&self, road: &RoadNetwork, from: Point, to: Point, now: SimTime) -> f64 {
        road.route_time(from, to, self.speed, now)
    }
}
