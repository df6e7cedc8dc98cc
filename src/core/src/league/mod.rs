pub mod background;
pub mod lifecycle;
pub mod promotion;
pub mod schedule;
pub mod season;
pub mod store;
pub mod table;

pub use background::*;
pub use lifecycle::*;
pub use promotion::*;
pub use schedule::*;
pub use season::*;
pub use store::*;
pub use table::*;
