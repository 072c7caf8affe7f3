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

//! Canonical type tags for Athena declared type names.

use std::fmt;

/// Prefix of a parameterized decimal type name such as `decimal(10,2)`.
const DECIMAL_PREFIX: &str = "decimal(";

/// Canonicalizes a declared type name for dispatch.
///
/// `decimal(p,s)` collapses to `decimal`: decimals decode to `f64`, so
/// precision and scale do not affect the result. Every other name is
/// returned unchanged.
pub fn normalize_type_name(type_name: &str) -> &str {
    if type_name.starts_with(DECIMAL_PREFIX) {
        "decimal"
    } else {
        type_name
    }
}

/// Decoding rule selected for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    SmallInt,
    Integer,
    BigInt,
    Boolean,
    Float,
    Double,
    Decimal,
    Varchar,
    Timestamp,
    TimestampWithZone,
    Date,
    Json,
    Char,
    Varbinary,
    Row,
    Binary,
    Struct,
    IntervalYearToMonth,
    IntervalDayToSecond,
    IpAddress,
    Array,
    Map,
    Unknown,
}

/// Athena type names and the tag each one decodes with.
static TYPE_NAMES: &[(&str, TypeTag)] = &[
    ("smallint", TypeTag::SmallInt),
    ("integer", TypeTag::Integer),
    ("int", TypeTag::Integer),
    ("bigint", TypeTag::BigInt),
    ("boolean", TypeTag::Boolean),
    ("float", TypeTag::Float),
    ("double", TypeTag::Double),
    ("decimal", TypeTag::Decimal),
    ("varchar", TypeTag::Varchar),
    ("string", TypeTag::Varchar),
    ("timestamp", TypeTag::Timestamp),
    ("timestamp with time zone", TypeTag::TimestampWithZone),
    ("date", TypeTag::Date),
    ("json", TypeTag::Json),
    ("char", TypeTag::Char),
    ("varbinary", TypeTag::Varbinary),
    ("row", TypeTag::Row),
    ("binary", TypeTag::Binary),
    ("struct", TypeTag::Struct),
    ("interval year to month", TypeTag::IntervalYearToMonth),
    ("interval day to second", TypeTag::IntervalDayToSecond),
    ("ipaddress", TypeTag::IpAddress),
    ("array", TypeTag::Array),
    ("map", TypeTag::Map),
    ("unknown", TypeTag::Unknown),
];

impl TypeTag {
    /// Looks up the tag for a declared type name, after normalization.
    ///
    /// Returns `None` for names with no decoding rule.
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        let canonical = normalize_type_name(type_name);
        TYPE_NAMES
            .iter()
            .find(|(name, _)| *name == canonical)
            .map(|(_, tag)| *tag)
    }

    /// Canonical Athena spelling of the tag.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::SmallInt => "smallint",
            TypeTag::Integer => "integer",
            TypeTag::BigInt => "bigint",
            TypeTag::Boolean => "boolean",
            TypeTag::Float => "float",
            TypeTag::Double => "double",
            TypeTag::Decimal => "decimal",
            TypeTag::Varchar => "varchar",
            TypeTag::Timestamp => "timestamp",
            TypeTag::TimestampWithZone => "timestamp with time zone",
            TypeTag::Date => "date",
            TypeTag::Json => "json",
            TypeTag::Char => "char",
            TypeTag::Varbinary => "varbinary",
            TypeTag::Row => "row",
            TypeTag::Binary => "binary",
            TypeTag::Struct => "struct",
            TypeTag::IntervalYearToMonth => "interval year to month",
            TypeTag::IntervalDayToSecond => "interval day to second",
            TypeTag::IpAddress => "ipaddress",
            TypeTag::Array => "array",
            TypeTag::Map => "map",
            TypeTag::Unknown => "unknown",
        }
    }

    /// True for tags whose values are handed to the caller as unparsed text.
    pub fn is_text(self) -> bool {
        !matches!(
            self,
            TypeTag::SmallInt
                | TypeTag::Integer
                | TypeTag::BigInt
                | TypeTag::Boolean
                | TypeTag::Float
                | TypeTag::Double
                | TypeTag::Decimal
                | TypeTag::Timestamp
                | TypeTag::TimestampWithZone
                | TypeTag::Date
        )
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
