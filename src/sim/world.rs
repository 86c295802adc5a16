//! 世界 trait
//!
//! 定义仿真世界接口。

use super::simulator::Simulator;

/// 仿真世界：由业务层实现（例如车队、路网与统计）。
///
/// 每个弹出的事件都交给 `handle`，即显式的事件分发表。
pub trait World<E> {
    fn handle(&mut self, ev: E, sim: &mut Simulator<E>);
    fn on_tick(&mut self, _sim: &mut Simulator<E>) {}
}
