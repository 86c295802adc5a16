pub mod config;
pub mod error;
pub mod fleet;
pub mod road;
pub mod runner;
pub mod sim;
pub mod stats;

pub use config::SimConfig;
pub use error::SimError;
pub use runner::{Simulation, run};
pub use stats::SummaryMetrics;

#[cfg(test)]
mod test;
