//! 事件处理器
//!
//! 每个文件为 `FleetWorld` 实现一组相关事件的处理：
//! 注册、预约、行程（取车/还车）、调度搬运、充电与统计分箱。

mod binning;
mod charging;
mod relocation;
mod reservation;
mod subscription;
mod trip;
