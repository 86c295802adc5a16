//! 车队模块
//!
//! 此模块包含车队仿真的实体（车辆、充电站、调度员、用户）、实体仓库、
//! 事件类型、事件处理器以及把它们组合起来的仿真世界。

// 子模块声明
mod car;
mod error;
mod event;
mod handlers;
mod id;
mod registry;
mod relocator;
mod station;
mod user;
mod world;

// 重新导出公共接口
pub use car::{Car, CarStatus, sample_consumption_rate};
pub use error::FleetError;
pub use event::FleetEvent;
pub use id::{CarId, RelocatorId, StationId, UserId};
pub use registry::Fleet;
pub use relocator::{RelocationTask, Relocator};
pub use station::ChargingStation;
pub use user::User;
pub use world::FleetWorld;
