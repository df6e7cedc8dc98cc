pub mod groups;
pub mod knockout;
pub mod league_phase;
pub mod live;
pub mod qualification;
pub mod tournament;

pub use groups::*;
pub use knockout::*;
pub use league_phase::*;
pub use live::*;
pub use qualification::*;
pub use tournament::*;
