//! HTTP handlers per entity.

pub mod car;
pub mod user;

use crate::error::{ApiError, Issue};
use uuid::Uuid;

/// Path ids must be valid UUIDs before anything is dispatched.
pub(crate) fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id)
        .map_err(|_| ApiError::Validation(vec![Issue::field("id", "must be a valid UUID")]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_path_id_is_a_validation_failure() {
        assert!(parse_id("not-a-uuid").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
