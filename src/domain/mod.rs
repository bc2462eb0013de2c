//! Domain value objects and types.
//!
//! Resource classes and item include levels are closed sets. Representing them
//! as enums keeps cache keys and invalidation aligned with what the backend serves.

pub mod errors;
pub mod include;
pub mod resource;

pub use errors::ParseError;
pub use include::ItemInclude;
pub use resource::Resource;
