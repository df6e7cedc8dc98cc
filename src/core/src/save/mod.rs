//! Career save document. A save is always read through
//! [`SaveMigration::migrate`], which upgrades older layouts to the current
//! [`SAVE_VERSION`] once before deserializing.

mod error;
mod format;
mod migration;

pub use error::*;
pub use format::*;
pub use migration::*;
