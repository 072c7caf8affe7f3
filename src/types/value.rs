// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Typed values produced by row conversion.

use crate::conversion::temporal::{format_date, format_timestamp, format_timestamp_with_zone};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

/// One decoded output row, positionally aligned with its column descriptors.
pub type Row = Vec<Value>;

/// A decoded Athena value.
///
/// Pass-through types (json, array, map, struct, varbinary, ...) are
/// carried as [`Value::Text`] without validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    Text(String),
    Timestamp(NaiveDateTime),
    TimestampWithZone(ZonedTimestamp),
    Date(NaiveDate),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::SmallInt(_) => "smallint",
            Value::Integer(_) => "integer",
            Value::BigInt(_) => "bigint",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Text(_) => "varchar",
            Value::Timestamp(_) => "timestamp",
            Value::TimestampWithZone(_) => "timestamp with time zone",
            Value::Date(_) => "date",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Widens any integer variant to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::SmallInt(v) => Some(i64::from(*v)),
            Value::Integer(v) => Some(i64::from(*v)),
            Value::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Widens either floating point variant to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::SmallInt(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::BigInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Timestamp(v) => f.write_str(&format_timestamp(v)),
            Value::TimestampWithZone(v) => f.write_str(&format_timestamp_with_zone(v)),
            Value::Date(v) => f.write_str(&format_date(v)),
        }
    }
}

/// A `timestamp with time zone` value.
///
/// Athena reports the zone as an abbreviation. The abbreviation is kept
/// verbatim next to the resolved instant so the value formats back to the
/// text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedTimestamp {
    pub instant: DateTime<FixedOffset>,
    pub zone: String,
}

impl ZonedTimestamp {
    pub fn new(instant: DateTime<FixedOffset>, zone: impl Into<String>) -> Self {
        Self {
            instant,
            zone: zone.into(),
        }
    }

    /// Wall-clock time as written in the source text.
    pub fn local(&self) -> NaiveDateTime {
        self.instant.naive_local()
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.instant.with_timezone(&Utc)
    }
}
