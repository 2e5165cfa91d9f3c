//! Risk management module
//!
//! Position sizing, protective exits, entry limits, and advisory signals

mod exits;
mod limits;
mod signals;
mod sizing;
mod types;

pub use exits::ExitCalculator;
pub use limits::EntryGate;
pub use signals::RiskSignalEvaluator;
pub use sizing::SizeCalculator;
pub use types::{EngineError, RejectReason};
