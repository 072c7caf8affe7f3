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

//! Scalar decoding of Athena result text into typed values.

use crate::config::UnknownTypePolicy;
use crate::conversion::temporal::{parse_date, parse_timestamp, parse_timestamp_with_zone};
use crate::conversion::type_tag::{normalize_type_name, TypeTag};
use crate::error::{Error, ParseFailure, Result};
use crate::types::value::Value;
use std::str::FromStr;

/// Decodes `raw` according to the declared `type_name`.
///
/// A missing value is [`Value::Null`] for every type. Unrecognized type
/// names fail with [`Error::UnsupportedType`].
pub fn decode_value(type_name: &str, raw: Option<&str>) -> Result<Value> {
    decode_value_with(type_name, raw, UnknownTypePolicy::Error)
}

/// Like [`decode_value`], with an explicit policy for unrecognized types.
pub fn decode_value_with(
    type_name: &str,
    raw: Option<&str>,
    policy: UnknownTypePolicy,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };

    match TypeTag::from_type_name(type_name) {
        Some(tag) => decode_tagged(tag, raw),
        None => match policy {
            UnknownTypePolicy::Error => Err(Error::UnsupportedType {
                type_name: normalize_type_name(type_name).to_string(),
                value: raw.to_string(),
            }),
            UnknownTypePolicy::RawText => {
                tracing::warn!("Passing through value of unknown type `{}` as text", type_name);
                Ok(Value::Text(raw.to_string()))
            }
        },
    }
}

/// Decodes a present literal with an already resolved tag.
pub fn decode_tagged(tag: TypeTag, raw: &str) -> Result<Value> {
    let name = tag.name();
    match tag {
        TypeTag::SmallInt => parse_int::<i16>(name, raw).map(Value::SmallInt),
        TypeTag::Integer => parse_int::<i32>(name, raw).map(Value::Integer),
        TypeTag::BigInt => parse_int::<i64>(name, raw).map(Value::BigInt),
        TypeTag::Boolean => match raw {
            "true" => Ok(Value::Boolean(true)),
            "false" => Ok(Value::Boolean(false)),
            _ => Err(Error::conversion(name, raw, ParseFailure::Boolean)),
        },
        TypeTag::Float => parse_float::<f32>(name, raw).map(Value::Float),
        TypeTag::Double | TypeTag::Decimal => parse_float::<f64>(name, raw).map(Value::Double),
        TypeTag::Timestamp => parse_timestamp(raw)
            .map(Value::Timestamp)
            .map_err(|e| Error::conversion(name, raw, e)),
        TypeTag::TimestampWithZone => parse_timestamp_with_zone(raw)
            .map(Value::TimestampWithZone)
            .map_err(|e| Error::conversion(name, raw, e)),
        TypeTag::Date => parse_date(raw)
            .map(Value::Date)
            .map_err(|e| Error::conversion(name, raw, e)),
        // Binary digits, JSON documents and structured values are handed
        // over unvalidated; interpreting them is up to the caller.
        _ => Ok(Value::Text(raw.to_string())),
    }
}

fn parse_int<T>(type_tag: &str, raw: &str) -> Result<T>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    raw.parse::<T>()
        .map_err(|e| Error::conversion(type_tag, raw, e))
}

trait Float: FromStr<Err = std::num::ParseFloatError> {
    fn is_infinite(&self) -> bool;
}

impl Float for f32 {
    fn is_infinite(&self) -> bool {
        f32::is_infinite(*self)
    }
}

impl Float for f64 {
    fn is_infinite(&self) -> bool {
        f64::is_infinite(*self)
    }
}

/// Parses a float, rejecting finite literals that overflow the target width.
fn parse_float<T: Float>(type_tag: &str, raw: &str) -> Result<T> {
    let value = raw
        .parse::<T>()
        .map_err(|e| Error::conversion(type_tag, raw, e))?;
    if value.is_infinite() && !is_infinity_literal(raw) {
        return Err(Error::conversion(type_tag, raw, ParseFailure::OutOfRange));
    }
    Ok(value)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const ALL_TYPES: &[&str] = &[
        "smallint",
        "integer",
        "int",
        "bigint",
        "boolean",
        "float",
        "double",
        "decimal",
        "decimal(10,2)",
        "varchar",
        "string",
        "timestamp",
        "timestamp with time zone",
        "date",
        "json",
        "char",
        "varbinary",
        "row",
        "binary",
        "struct",
        "interval year to month",
        "interval day to second",
        "ipaddress",
        "array",
        "map",
        "unknown",
    ];

    fn decode(type_name: &str, raw: &str) -> Result<Value> {
        decode_value(type_name, Some(raw))
    }

    #[test]
    fn test_null_for_every_type() {
        for type_name in ALL_TYPES.iter().chain(&["not_a_type"]) {
            assert_eq!(decode_value(type_name, None).unwrap(), Value::Null);
        }
    }

    #[test]
    fn test_integers() {
        assert_eq!(decode("smallint", "-32768").unwrap(), Value::SmallInt(-32768));
        assert_eq!(decode("integer", "42").unwrap(), Value::Integer(42));
        assert_eq!(decode("int", "+7").unwrap(), Value::Integer(7));
        assert_eq!(decode("bigint", "42").unwrap(), Value::BigInt(42));
        assert_eq!(
            decode("bigint", "-9223372036854775808").unwrap(),
            Value::BigInt(i64::MIN)
        );
    }

    #[test]
    fn test_integer_out_of_range_is_recoverable() {
        let err = decode("smallint", "99999").unwrap_err();
        assert!(!err.is_fatal());
        match err {
            Error::Conversion {
                type_tag,
                value,
                source: ParseFailure::Int(_),
            } => {
                assert_eq!(type_tag, "smallint");
                assert_eq!(value, "99999");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(decode("integer", "2147483648").is_err());
        assert!(decode("bigint", "9223372036854775808").is_err());
    }

    #[test]
    fn test_integer_rejects_non_numeric() {
        for raw in ["", "abc", "1.5", " 1", "1_000", "0x10"] {
            assert!(decode("integer", raw).is_err(), "{raw:?}");
        }
    }

    #[test]
    fn test_boolean() {
        assert_eq!(decode("boolean", "true").unwrap(), Value::Boolean(true));
        assert_eq!(decode("boolean", "false").unwrap(), Value::Boolean(false));
        for raw in ["yes", "TRUE", "1", ""] {
            let err = decode("boolean", raw).unwrap_err();
            assert!(matches!(
                err,
                Error::Conversion {
                    source: ParseFailure::Boolean,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_floats() {
        assert_eq!(decode("float", "1.5").unwrap(), Value::Float(1.5));
        assert_eq!(decode("double", "-2.25").unwrap(), Value::Double(-2.25));
        assert_eq!(decode("double", "1e300").unwrap(), Value::Double(1e300));
        assert_eq!(
            decode("float", "Infinity").unwrap(),
            Value::Float(f32::INFINITY)
        );
        assert_eq!(
            decode("double", "-Infinity").unwrap(),
            Value::Double(f64::NEG_INFINITY)
        );
        match decode("double", "NaN").unwrap() {
            Value::Double(v) => assert!(v.is_nan()),
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_float_overflow_is_error() {
        let err = decode("float", "1e40").unwrap_err();
        assert!(matches!(
            err,
            Error::Conversion {
                source: ParseFailure::OutOfRange,
                ..
            }
        ));
        assert!(decode("double", "1e400").is_err());
        assert!(decode("double", "abc").is_err());
    }

    #[test]
    fn test_decimal_with_and_without_params() {
        let bare = decode("decimal", "12345.67").unwrap();
        let parameterized = decode("decimal(10,2)", "12345.67").unwrap();
        assert_eq!(bare, Value::Double(12345.67));
        assert_eq!(bare, parameterized);
        assert!(decode("decimal(10,2)", "12,5").is_err());
    }

    #[test]
    fn test_text_types_pass_through() {
        assert_eq!(
            decode("varchar", "hello").unwrap(),
            Value::Text("hello".into())
        );
        assert_eq!(decode("string", "").unwrap(), Value::Text(String::new()));
        assert_eq!(
            decode("json", "{not json").unwrap(),
            Value::Text("{not json".into())
        );
        assert_eq!(
            decode("binary", "0102").unwrap(),
            Value::Text("0102".into())
        );
        assert_eq!(
            decode("array", "[1, 2, 3]").unwrap(),
            Value::Text("[1, 2, 3]".into())
        );
        assert_eq!(
            decode("interval day to second", "2 00:00:00.000").unwrap(),
            Value::Text("2 00:00:00.000".into())
        );
    }

    #[test]
    fn test_temporal() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap();
        assert_eq!(decode("date", "2021-03-04").unwrap(), Value::Date(date));
        assert_eq!(
            decode("timestamp", "2021-03-04 05:06:07.890").unwrap(),
            Value::Timestamp(date.and_hms_milli_opt(5, 6, 7, 890).unwrap())
        );
        match decode("timestamp with time zone", "2021-03-04 05:06:07.890 UTC").unwrap() {
            Value::TimestampWithZone(zoned) => {
                assert_eq!(zoned.zone, "UTC");
                assert_eq!(zoned.local(), date.and_hms_milli_opt(5, 6, 7, 890).unwrap());
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_temporal_errors_carry_diagnostic() {
        let err = decode("date", "03/04/2021").unwrap_err();
        match &err {
            Error::Conversion {
                type_tag,
                source: ParseFailure::Temporal(_),
                ..
            } => assert_eq!(type_tag, "date"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());

        let err = decode("timestamp with time zone", "2021-03-04 05:06:07 Mars/Base").unwrap_err();
        assert!(matches!(
            err,
            Error::Conversion {
                source: ParseFailure::TimeZone(_),
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_temporal_literals_are_recoverable() {
        let cases = [
            ("date", "21-3-4"),
            ("date", "2021-3-4"),
            ("date", "+2021-03-04"),
            ("date", " 2021-03-04"),
            ("timestamp", "2021-03-04 5:6:7"),
            ("timestamp", "2021-03-04 23:59:60"),
            ("timestamp with time zone", "2021-3-4 05:06:07.000 UTC"),
        ];
        for (type_name, raw) in cases {
            let err = decode(type_name, raw).unwrap_err();
            assert!(!err.is_fatal(), "{type_name} {raw:?}");
            assert!(
                matches!(err, Error::Conversion { ref value, .. } if value == raw),
                "{type_name} {raw:?}"
            );
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = decode("hyperloglog", "AgwBAIA").unwrap_err();
        assert!(err.is_fatal());
        match err {
            Error::UnsupportedType { type_name, value } => {
                assert_eq!(type_name, "hyperloglog");
                assert_eq!(value, "AgwBAIA");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_as_raw_text() {
        assert_eq!(
            decode_value_with("hyperloglog", Some("AgwBAIA"), UnknownTypePolicy::RawText)
                .unwrap(),
            Value::Text("AgwBAIA".into())
        );
        assert_eq!(
            decode_value_with("varchar(10)", None, UnknownTypePolicy::RawText).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_every_known_type_accepts_a_valid_literal() {
        let samples = [
            ("smallint", "1"),
            ("integer", "1"),
            ("int", "1"),
            ("bigint", "1"),
            ("boolean", "true"),
            ("float", "1"),
            ("double", "1"),
            ("decimal", "1"),
            ("decimal(10,2)", "1.00"),
            ("timestamp", "2020-01-01 00:00:00.000"),
            ("timestamp with time zone", "2020-01-01 00:00:00.000 UTC"),
            ("date", "2020-01-01"),
        ];
        for (type_name, raw) in samples {
            assert!(decode(type_name, raw).is_ok(), "{type_name}");
        }
        for type_name in ALL_TYPES {
            let tag = TypeTag::from_type_name(type_name).unwrap();
            if tag.is_text() {
                assert_eq!(decode(type_name, "x").unwrap(), Value::Text("x".into()));
            }
        }
    }
}
