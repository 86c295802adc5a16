//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间与未来事件集（FES）。

use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use tracing::{debug, info, trace};

/// 事件驱动仿真器：维护当前时间与事件队列。
///
/// 没有取消原语：一旦调度，事件总会执行（除非主循环先结束）。
#[derive(Debug)]
pub struct Simulator<E> {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent<E>>,
    executed: u64,
}

impl<E> Default for Simulator<E> {
    fn default() -> Self {
        Self {
            now: SimTime::ZERO,
            next_seq: 0,
            q: BinaryHeap::new(),
            executed: 0,
        }
    }
}

impl<E: Debug> Simulator<E> {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 队列中尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// 已执行的事件总数
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// 下一个事件的时间（不弹出）
    pub fn next_event_time(&self) -> Option<SimTime> {
        self.q.peek().map(|e| e.at)
    }

    /// 调度事件在指定时间执行（不校验 `at >= now`）。
    #[tracing::instrument(level = "trace", skip(self, ev), fields(schedule_at = %at.minutes()))]
    pub fn schedule(&mut self, at: SimTime, ev: E) {
        let seq = self.next_seq;
        trace!(now = self.now.minutes(), seq, event = ?ev, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent { at, seq, ev });
    }

    /// 在当前时间之后 `delay_minutes` 分钟调度事件。
    pub fn schedule_in(&mut self, delay_minutes: f64, ev: E) {
        let at = self.now + delay_minutes;
        self.schedule(at, ev);
    }

    /// 弹出时间最小的事件并推进当前时间；队列为空时返回 `None`。
    pub fn pop_next(&mut self) -> Option<ScheduledEvent<E>> {
        let item = self.q.pop()?;
        self.now = item.at;
        Some(item)
    }

    /// 运行直到事件队列为空或到达 `until`（包含恰好在 `until` 的事件）。
    pub fn run_until<W: World<E> + ?Sized>(&mut self, until: SimTime, world: &mut W) {
        while let Some(at) = self.next_event_time() {
            if at > until {
                break;
            }
            let Some(item) = self.pop_next() else {
                break;
            };
            self.dispatch(item, world);
        }
        self.now = self.now.max(until);
        debug!(now = self.now.minutes(), remaining_queue = self.q.len(), "run_until 结束");
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run<W: World<E> + ?Sized>(&mut self, world: &mut W) {
        info!("▶️  开始运行仿真");
        debug!(now = self.now.minutes(), queue_size = self.q.len(), "初始状态");

        let start = self.executed;
        while let Some(item) = self.pop_next() {
            self.dispatch(item, world);
        }

        info!(
            total_events = self.executed - start,
            final_time = self.now.minutes(),
            "✅ 仿真完成"
        );
    }

    fn dispatch<W: World<E> + ?Sized>(&mut self, item: ScheduledEvent<E>, world: &mut W) {
        self.executed += 1;
        trace!(
            event_num = self.executed,
            now = self.now.minutes(),
            seq = item.seq,
            remaining_queue = self.q.len(),
            "执行事件"
        );
        world.handle(item.ev, self);
        world.on_tick(self);
    }
}
