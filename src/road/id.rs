//! 标识符类型
//!
//! 定义路网节点的唯一标识符。

/// 路网节点标识符（即节点在路网中的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);
