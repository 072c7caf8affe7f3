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

//! Athena type → Arrow/XDBC type mapping.
//!
//! Arrow types follow the representation chosen by the value decoder:
//! decimals are `Float64`, and every pass-through type is `Utf8`.

use crate::config::UnknownTypePolicy;
use crate::conversion::type_tag::TypeTag;
use crate::error::{Error, Result};
use crate::types::athena::ColumnInfo;
use arrow_schema::{DataType, Field, Schema, TimeUnit};
use std::collections::HashMap;

/// Field metadata key holding the declared Athena type name.
pub const ATHENA_TYPE_METADATA_KEY: &str = "ATHENA:type";

/// Map an Athena type name to the Arrow type its decoded values fill.
///
/// Returns `None` for type names with no decoding rule.
pub fn athena_type_to_arrow(type_name: &str) -> Option<DataType> {
    let tag = TypeTag::from_type_name(type_name)?;
    Some(match tag {
        TypeTag::SmallInt => DataType::Int16,
        TypeTag::Integer => DataType::Int32,
        TypeTag::BigInt => DataType::Int64,
        TypeTag::Boolean => DataType::Boolean,
        TypeTag::Float => DataType::Float32,
        TypeTag::Double | TypeTag::Decimal => DataType::Float64,
        TypeTag::Timestamp => DataType::Timestamp(TimeUnit::Microsecond, None),
        TypeTag::TimestampWithZone => {
            DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
        }
        TypeTag::Date => DataType::Date32,
        _ => DataType::Utf8,
    })
}

/// Map an Athena type name to its XDBC/JDBC type code.
pub fn athena_type_to_xdbc(type_name: &str) -> i16 {
    match TypeTag::from_type_name(type_name) {
        Some(TypeTag::Boolean) => 16,                      // JDBC BOOLEAN
        Some(TypeTag::SmallInt) => 5,                      // JDBC SMALLINT
        Some(TypeTag::Integer) => 4,                       // JDBC INTEGER
        Some(TypeTag::BigInt) => -5,                       // JDBC BIGINT
        Some(TypeTag::Float) => 7,                         // JDBC REAL
        Some(TypeTag::Double) => 8,                        // JDBC DOUBLE
        Some(TypeTag::Decimal) => 3,                       // JDBC DECIMAL
        Some(TypeTag::Char) => 1,                          // JDBC CHAR
        Some(TypeTag::Varchar) => 12,                      // JDBC VARCHAR
        Some(TypeTag::Binary | TypeTag::Varbinary) => -3,  // JDBC VARBINARY
        Some(TypeTag::Date) => 91,                         // JDBC DATE
        Some(TypeTag::Timestamp) => 93,                    // JDBC TIMESTAMP
        Some(TypeTag::TimestampWithZone) => 2014,          // JDBC TIMESTAMP_WITH_TIMEZONE
        Some(TypeTag::Array) => 2003,                      // JDBC ARRAY
        Some(TypeTag::Row | TypeTag::Struct) => 2002,      // JDBC STRUCT
        Some(TypeTag::Map) => 2000,                        // JDBC JAVA_OBJECT
        Some(TypeTag::Unknown) => 0,                       // JDBC NULL
        _ => 1111,                                         // JDBC OTHER
    }
}

/// Build the Arrow schema for a result set.
///
/// Unknown column types are rejected, or mapped to `Utf8` when the policy
/// passes them through as text.
pub fn result_schema(columns: &[ColumnInfo], policy: UnknownTypePolicy) -> Result<Schema> {
    let fields = columns
        .iter()
        .map(|column| {
            let data_type = match (athena_type_to_arrow(&column.type_name), policy) {
                (Some(dt), _) => dt,
                (None, UnknownTypePolicy::RawText) => DataType::Utf8,
                (None, UnknownTypePolicy::Error) => {
                    return Err(Error::UnsupportedType {
                        type_name: column.type_name.clone(),
                        value: String::new(),
                    })
                }
            };
            let metadata = HashMap::from([(
                ATHENA_TYPE_METADATA_KEY.to_string(),
                column.type_name.clone(),
            )]);
            Ok(Field::new(&column.name, data_type, column.is_nullable()).with_metadata(metadata))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Schema::new(fields))
}
