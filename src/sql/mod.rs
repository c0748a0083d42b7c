//! Predicate tree and parameterized SQL assembly.

pub mod builder;
pub mod params;
pub mod predicate;

pub use builder::QueryBuf;
pub use params::BindValue;
pub use predicate::{Condition, Predicate};
