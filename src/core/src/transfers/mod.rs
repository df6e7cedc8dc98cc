pub mod error;
pub mod history;
pub mod negotiation;
pub mod offer;
pub mod pipeline;
pub mod window;

pub use error::*;
pub use history::*;
pub use negotiation::*;
pub use offer::*;
pub use pipeline::*;
pub use window::*;
