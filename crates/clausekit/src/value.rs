//! Positional argument values.
//!
//! Arguments are carried as a closed sum type so a single [`Query`](crate::Query)
//! can hold strings, integers, timestamps etc. side by side and hand them to
//! any [`Executor`](crate::Executor) without knowing the backend.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A SQL-bindable scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
}

impl Value {
    /// Short type name, used in bind error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Timestamp(_) => "timestamp",
            Value::Uuid(_) => "uuid",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    String => Text,
    &str => Text,
    Vec<u8> => Bytes,
    &[u8] => Bytes,
    DateTime<Utc> => Timestamp,
    Uuid => Uuid,
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "postgres")]
mod pg {
    use super::Value;
    use bytes::BytesMut;
    use chrono::{DateTime, Utc};
    use std::error::Error;
    use tokio_postgres::types::{IsNull, ToSql, Type, WrongType, to_sql_checked};
    use uuid::Uuid;

    /// Encode `v` only if its own `ToSql` impl accepts `ty`.
    fn encode<T: ToSql>(
        v: &T,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        if !T::accepts(ty) {
            return Err(Box::new(WrongType::new::<T>(ty.clone())));
        }
        v.to_sql(ty, out)
    }

    impl ToSql for Value {
        fn to_sql(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            match self {
                Value::Null => Ok(IsNull::Yes),
                Value::Bool(v) => encode(v, ty, out),
                // Postgres infers the narrowest declared type for `$n`
                Value::Int(v) if *ty == Type::INT2 => encode(&i16::try_from(*v)?, ty, out),
                Value::Int(v) if *ty == Type::INT4 => encode(&i32::try_from(*v)?, ty, out),
                Value::Int(v) => encode(v, ty, out),
                Value::Float(v) if *ty == Type::FLOAT4 => encode(&(*v as f32), ty, out),
                Value::Float(v) => encode(v, ty, out),
                Value::Text(v) => encode(v, ty, out),
                Value::Bytes(v) => encode(v, ty, out),
                Value::Timestamp(v) => encode::<DateTime<Utc>>(v, ty, out),
                Value::Uuid(v) => encode::<Uuid>(v, ty, out),
            }
        }

        // Per-variant checks happen in `to_sql`; NULL binds to any type.
        fn accepts(_ty: &Type) -> bool {
            true
        }

        to_sql_checked!();
    }
}
