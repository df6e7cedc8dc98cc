pub mod result;
pub mod simulator;
pub mod stats;

pub use result::*;
pub use simulator::*;
pub use stats::*;
