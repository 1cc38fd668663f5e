//! Driver-neutral statement parameters.

use chrono::{DateTime, Utc};

/// A bind parameter for a SQL statement.
///
/// Handles translate these into their driver's native value type; callers
/// never construct driver-specific values directly.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// SQL NULL.
    Null,
    /// 64-bit integer.
    Integer(i64),
    /// 64-bit float.
    Real(f64),
    /// UTF-8 text.
    Text(String),
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for SqlParam {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<Utc>> for SqlParam {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Text(v.to_rfc3339())
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_primitives() {
        assert_eq!(SqlParam::from(42i64), SqlParam::Integer(42));
        assert_eq!(SqlParam::from(true), SqlParam::Integer(1));
        assert_eq!(SqlParam::from(false), SqlParam::Integer(0));
        assert_eq!(SqlParam::from("hello"), SqlParam::Text("hello".to_string()));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(SqlParam::from(None::<i64>), SqlParam::Null);
        assert_eq!(SqlParam::from(Some(7i64)), SqlParam::Integer(7));
    }

    #[test]
    fn test_from_datetime() {
        let now = Utc::now();
        match SqlParam::from(now) {
            SqlParam::Text(s) => assert!(s.contains('T')),
            other => panic!("Expected Text, got {:?}", other),
        }
    }
}
