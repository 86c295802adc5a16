//! 仿真核心模块
//!
//! 此模块包含事件驱动仿真的核心组件，如仿真时间、调度事件、世界和仿真器。

// 子模块声明
mod scheduled_event;
mod simulator;
mod time;
mod world;

// 重新导出公共接口
pub use scheduled_event::ScheduledEvent;
pub use simulator::Simulator;
pub use time::{MINUTES_PER_DAY, SimTime, format_duration};
pub use world::World;
