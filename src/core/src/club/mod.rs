pub mod club;
pub mod finance;
pub mod player;
pub mod registry;
pub mod staff;
pub mod strength;
pub mod tactics;
pub mod world;

pub use club::*;
pub use finance::*;
pub use player::*;
pub use registry::*;
pub use staff::*;
pub use strength::*;
pub use tactics::*;
pub use world::*;
