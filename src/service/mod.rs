//! Domain operations and the resource-operation dispatcher.

pub mod car;
pub mod dispatch;
pub mod password;
pub mod user;

pub use dispatch::{try_create, try_delete, try_read, try_update, Outcome};
