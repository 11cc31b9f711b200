use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

/// A value a record exposes for ordering.
///
/// Keys of the same kind compare by value (floats by total order, text by
/// byte order). Keys of different kinds compare by kind, with `Null` first.
#[derive(Debug, Clone)]
pub enum SortKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Bool(_) => 1,
            SortKey::Int(_) => 2,
            SortKey::Float(_) => 3,
            SortKey::Text(_) => 4,
            SortKey::Date(_) => 5,
            SortKey::Timestamp(_) => 6,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Null, SortKey::Null) => Ordering::Equal,
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Timestamp(a), SortKey::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

macro_rules! int_key {
    ($($ty:ty),*) => {
        $(impl From<$ty> for SortKey {
            fn from(value: $ty) -> Self {
                SortKey::Int(i64::from(value))
            }
        })*
    };
}

int_key!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for SortKey {
    fn from(value: u64) -> Self {
        SortKey::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for SortKey {
    fn from(value: usize) -> Self {
        SortKey::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for SortKey {
    fn from(value: bool) -> Self {
        SortKey::Bool(value)
    }
}

impl From<f32> for SortKey {
    fn from(value: f32) -> Self {
        SortKey::Float(f64::from(value))
    }
}

impl From<f64> for SortKey {
    fn from(value: f64) -> Self {
        SortKey::Float(value)
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::Text(value)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::Text(value.to_string())
    }
}

impl From<NaiveDate> for SortKey {
    fn from(value: NaiveDate) -> Self {
        SortKey::Date(value)
    }
}

impl From<DateTime<Utc>> for SortKey {
    fn from(value: DateTime<Utc>) -> Self {
        SortKey::Timestamp(value)
    }
}

impl<K: Into<SortKey>> From<Option<K>> for SortKey {
    fn from(value: Option<K>) -> Self {
        value.map_or(SortKey::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sorts_first() {
        assert!(SortKey::Null < SortKey::Int(i64::MIN));
        assert!(SortKey::from(None::<i32>) < SortKey::from("a"));
    }

    #[test]
    fn floats_have_total_order() {
        assert!(SortKey::Float(f64::NAN) > SortKey::Float(f64::INFINITY));
        assert_eq!(SortKey::Float(1.5), SortKey::from(1.5f64));
    }

    #[test]
    fn text_compares_by_bytes() {
        assert!(SortKey::from("Zeta") < SortKey::from("alpha"));
        assert_eq!(SortKey::from(String::from("x")), SortKey::from("x"));
    }
}
