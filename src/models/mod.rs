//! Action Network record types.

mod donation;
mod person;
mod record;
mod tag;

pub use donation::*;
pub use person::*;
pub use record::*;
pub use tag::*;
