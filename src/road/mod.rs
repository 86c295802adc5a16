//! 路网模块
//!
//! 此模块包含道路网络的组成部分：坐标、节点标识、交通模型、网格路网与路由。

// 子模块声明
mod id;
mod network;
mod point;
mod routing;
mod traffic;

// 重新导出公共接口
pub use id::NodeId;
pub use network::{NetworkSummary, RoadEdge, RoadNetwork, RoadNode};
pub use point::Point;
pub use routing::Path;
pub use traffic::{TrafficModel, ZoneFactors};
