//! Values bound to PostgreSQL queries.
//!
//! Statements are assembled as text with `$n` placeholders, so parameters
//! travel as one homogeneous list. Every value is sent as text; columns
//! whose type is not text get an explicit SQL cast from the builder
//! (`$n::boolean`, `$n::uuid`, ...), converted server-side.

use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    Bool(bool),
    I64(i64),
    Text(String),
    Uuid(uuid::Uuid),
}

impl BindValue {
    fn as_text(&self) -> Option<String> {
        match self {
            BindValue::Null => None,
            BindValue::Bool(b) => Some(b.to_string()),
            BindValue::I64(n) => Some(n.to_string()),
            BindValue::Text(s) => Some(s.clone()),
            BindValue::Uuid(u) => Some(u.to_string()),
        }
    }
}

impl<'q> Encode<'q, Postgres> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self.as_text() {
            None => <Option<&str> as Encode<Postgres>>::encode_by_ref(&None, buf),
            Some(s) => <&str as Encode<Postgres>>::encode_by_ref(&s.as_str(), buf),
        }
    }
}

impl sqlx::Type<Postgres> for BindValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_render_as_postgres_text() {
        assert_eq!(BindValue::Bool(true).as_text().as_deref(), Some("true"));
        assert_eq!(BindValue::I64(-3).as_text().as_deref(), Some("-3"));
        assert_eq!(BindValue::Null.as_text(), None);
    }
}
