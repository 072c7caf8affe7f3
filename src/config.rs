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

//! Converter configuration.
//!
//! Options are set with string keys and ADBC option values, the same way the
//! driver's `Database` accepts them:
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `athena.conversion.unknown_type` | `error` | `error` fails the result set on an unrecognized column type, `text` passes the raw literal through |
//! | `athena.log_level` | unset | `off`, `error`, `warn`, `info`, `debug` or `trace` |
//! | `athena.log_file` | unset | Append logs to this file instead of stderr |

use crate::error::{Error, Result};
use crate::logging::LogConfig;
use adbc_core::options::OptionValue;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

pub const OPTION_UNKNOWN_TYPE: &str = "athena.conversion.unknown_type";
pub const OPTION_LOG_LEVEL: &str = "athena.log_level";
pub const OPTION_LOG_FILE: &str = "athena.log_file";

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// What to do with a column whose declared type has no decoding rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTypePolicy {
    /// Return [`Error::UnsupportedType`].
    #[default]
    Error,
    /// Hand the literal to the caller as text.
    RawText,
}

impl UnknownTypePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            UnknownTypePolicy::Error => "error",
            UnknownTypePolicy::RawText => "text",
        }
    }
}

impl FromStr for UnknownTypePolicy {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(UnknownTypePolicy::Error),
            "text" => Ok(UnknownTypePolicy::RawText),
            _ => Err(()),
        }
    }
}

impl fmt::Display for UnknownTypePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for [`RowConverter`](crate::conversion::RowConverter).
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    pub unknown_type_policy: UnknownTypePolicy,
    pub log: LogConfig,
}

impl ConverterConfig {
    pub fn with_unknown_type_policy(mut self, policy: UnknownTypePolicy) -> Self {
        self.unknown_type_policy = policy;
        self
    }

    pub fn set_option(&mut self, key: &str, value: OptionValue) -> Result<()> {
        match key {
            OPTION_UNKNOWN_TYPE => {
                let policy = string_option(&value)
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| invalid_option(key, &value))?;
                self.unknown_type_policy = policy;
                Ok(())
            }
            OPTION_LOG_LEVEL => {
                let level = string_option(&value)
                    .filter(|s| LOG_LEVELS.contains(&s.to_ascii_lowercase().as_str()))
                    .and_then(|s| s.parse::<LevelFilter>().ok())
                    .ok_or_else(|| invalid_option(key, &value))?;
                self.log.level = Some(level);
                Ok(())
            }
            OPTION_LOG_FILE => {
                let path = string_option(&value).ok_or_else(|| invalid_option(key, &value))?;
                self.log.file = Some(PathBuf::from(path));
                Ok(())
            }
            _ => Err(Error::UnknownOption(key.to_string())),
        }
    }

    pub fn get_option(&self, key: &str) -> Result<String> {
        match key {
            OPTION_UNKNOWN_TYPE => Ok(self.unknown_type_policy.to_string()),
            OPTION_LOG_LEVEL => self
                .log
                .level
                .map(|level| level.to_string().to_ascii_lowercase())
                .ok_or_else(|| Error::UnknownOption(key.to_string())),
            OPTION_LOG_FILE => self
                .log
                .file
                .as_ref()
                .map(|path| path.display().to_string())
                .ok_or_else(|| Error::UnknownOption(key.to_string())),
            _ => Err(Error::UnknownOption(key.to_string())),
        }
    }
}

fn string_option(value: &OptionValue) -> Option<&str> {
    match value {
        OptionValue::String(s) => Some(s.as_str()),
        _ => None,
    }
}

fn invalid_option(key: &str, value: &OptionValue) -> Error {
    Error::InvalidOption {
        key: key.to_string(),
        value: format!("{:?}", value),
    }
}
