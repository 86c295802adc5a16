//! 车队事件
//!
//! 仿真中的全部事件种类及其载荷。事件一旦调度必然执行，处理器自行检查实体状态是否已过期。

use super::id::{CarId, RelocatorId, StationId, UserId};
use crate::road::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum FleetEvent {
    /// 新用户注册（泊松到达，受时段需求倍率调制）
    UserSubscription,
    /// 用户在 `location` 尝试预约
    Reservation { user: UserId, location: Point },
    /// 用户步行到达并取车
    Pickup { user: UserId, car: CarId, location: Point },
    /// 行程结束还车
    Dropoff {
        user: UserId,
        car: CarId,
        start: Point,
        end: Point,
    },
    /// 为低电量车辆安排调度员
    RelocateCar { car: CarId },
    /// 调度员把车送到充电站
    ArriveAtStation {
        car: CarId,
        station: StationId,
        relocator: RelocatorId,
    },
    /// 充电完成
    ChargingComplete { car: CarId, station: StationId },
    /// 周期性收集统计 bin
    BinCollection,
}

impl FleetEvent {
    /// 用于日志的事件名
    pub fn kind(&self) -> &'static str {
        match self {
            FleetEvent::UserSubscription => "user_subscription",
            FleetEvent::Reservation { .. } => "reservation",
            FleetEvent::Pickup { .. } => "pickup",
            FleetEvent::Dropoff { .. } => "dropoff",
            FleetEvent::RelocateCar { .. } => "relocate_car",
            FleetEvent::ArriveAtStation { .. } => "arrive_at_station",
            FleetEvent::ChargingComplete { .. } => "charging_complete",
            FleetEvent::BinCollection => "bin_collection",
        }
    }
}
