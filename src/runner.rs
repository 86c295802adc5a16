//! 仿真运行入口
//!
//! `Simulation` 持有事件调度器与车队世界；`run` 完成 校验 → 构建 → 运行 → 统计 的全过程。

use crate::config::SimConfig;
use crate::error::SimError;
use crate::fleet::{FleetEvent, FleetWorld};
use crate::sim::{SimTime, Simulator};
use crate::stats::{AnalysisReport, SummaryMetrics};
use tracing::info;

pub struct Simulation {
    sim: Simulator<FleetEvent>,
    world: FleetWorld,
}

impl Simulation {
    /// 校验配置并构建路网、车队与初始事件
    pub fn new(cfg: SimConfig) -> Result<Self, SimError> {
        cfg.validate()?;
        Ok(Self::with_world(FleetWorld::new(cfg)))
    }

    /// 使用已组装好的世界（不再校验配置）
    pub fn with_world(world: FleetWorld) -> Self {
        let mut sim = Simulator::default();
        world.schedule_initial(&mut sim);
        Self { sim, world }
    }

    pub fn world(&self) -> &FleetWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut FleetWorld {
        &mut self.world
    }

    pub fn simulator(&self) -> &Simulator<FleetEvent> {
        &self.sim
    }

    pub fn now(&self) -> SimTime {
        self.sim.now()
    }

    /// 执行所有时间不晚于 `until` 的事件
    pub fn run_until(&mut self, until: SimTime) {
        self.sim.run_until(until, &mut self.world);
    }

    /// 运行到配置的终点，补齐最后一个 bin，输出分析报告并返回摘要
    #[tracing::instrument(skip(self), fields(seed = self.world.cfg.seed, until = self.world.cfg.simulation_end_time))]
    pub fn run_to_end(&mut self) -> SummaryMetrics {
        let end = SimTime::from_minutes(self.world.cfg.simulation_end_time);
        info!(end = %end, "▶️  开始运行车队仿真");
        self.run_until(end);
        info!(
            events = self.sim.executed(),
            pending = self.sim.pending(),
            users = self.world.fleet.users().len(),
            "✅ 车队仿真完成"
        );
        self.finish()
    }

    /// 在当前时间结束：补齐 bin，记录报告，构造摘要
    pub fn finish(&mut self) -> SummaryMetrics {
        let now = self.sim.now();
        let car_times = self.world.fleet.car_time_totals(now);
        if self.world.cfg.enable_binning {
            self.world.stats.flush(now.minutes(), car_times);
        }

        let summary = SummaryMetrics::from_engine(&self.world.stats, car_times, now.minutes());
        summary.log();
        if self.world.cfg.enable_binning {
            AnalysisReport::analyze(self.world.stats.bins(), &self.world.cfg).log();
        }
        summary
    }

    /// 当前 bin 序列上的分析报告
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport::analyze(self.world.stats.bins(), &self.world.cfg)
    }
}

/// 以给定配置运行一次完整仿真
pub fn run(cfg: &SimConfig) -> Result<SummaryMetrics, SimError> {
    let mut simulation = Simulation::new(cfg.clone())?;
    Ok(simulation.run_to_end())
}
