use super::id::{CarId, RelocatorId, StationId};
use thiserror::Error;

/// 实体状态转换被拒绝
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    #[error("{0} is already busy with a relocation task")]
    RelocatorBusy(RelocatorId),

    #[error("{car} is already charging at {station}")]
    AlreadyCharging { car: CarId, station: StationId },
}
