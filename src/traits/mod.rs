//! Trait definitions for Action Network operations.
//!
//! Each record type implements the operations its endpoint supports. The
//! default implementations resolve the endpoint through the client's link
//! index, so no URL is ever hardcoded.

mod create;
mod get;
mod list;
mod resource;
mod update;

pub use create::Create;
pub use get::Get;
pub use list::List;
pub use resource::Resource;
pub use update::Update;
