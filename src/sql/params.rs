//! Values bound to PostgreSQL statements.

use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A value that can be bound to a PostgreSQL query. Placeholders are cast to the
/// column type in SQL, so `Null` needs no type of its own.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i32),
    Text(String),
    Bool(bool),
}

impl From<i32> for SqlValue {
    fn from(n: i32) -> Self {
        SqlValue::Int(n)
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Bool(b)
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<Option<String>> for SqlValue {
    fn from(s: Option<String>) -> Self {
        s.map(SqlValue::Text).unwrap_or(SqlValue::Null)
    }
}

impl<'q> Encode<'q, Postgres> for SqlValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            SqlValue::Null => IsNull::Yes,
            SqlValue::Int(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            SqlValue::Text(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf)?,
            SqlValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf)?,
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        match self {
            SqlValue::Null => None,
            SqlValue::Int(_) => Some(<i32 as Type<Postgres>>::type_info()),
            SqlValue::Text(_) => Some(<String as Type<Postgres>>::type_info()),
            SqlValue::Bool(_) => Some(<bool as Type<Postgres>>::type_info()),
        }
    }
}

impl Type<Postgres> for SqlValue {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }
}
