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

//! Logging configuration for the Athena value conversion layer.
//!
//! Initializes a `tracing-subscriber` with file or stderr output.
//!
//! ## Configuration priority
//!
//! 1. `athena.log_level` / `athena.log_file` converter options (highest)
//! 2. `RUST_LOG` environment variable
//! 3. Default: `warn`
//!
//! ```bash
//! RUST_LOG=athena_adbc=trace ./my_adbc_app
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::Targets,
    fmt::{self, time::SystemTime, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::error::{Error, Result};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

const CRATE_TARGET: &str = "athena_adbc";

/// Logging settings carried by [`ConverterConfig`](crate::config::ConverterConfig).
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Maximum level for this crate's events. `None` defers to `RUST_LOG`.
    pub level: Option<LevelFilter>,
    /// Log file path. If unset, logs go to stderr.
    pub file: Option<PathBuf>,
}

/// Initialize the tracing subscriber.
///
/// The log file is opened on every call, so an unwritable path is reported
/// to each caller as [`Error::LogFile`] and leaves logging uninitialized.
/// The subscriber itself is installed at most once per process; a
/// subscriber installed by the host application takes precedence.
pub(crate) fn init_logging(config: &LogConfig) -> Result<()> {
    if config.level == Some(LevelFilter::OFF) {
        return Ok(());
    }

    let writer = match config.file {
        Some(ref path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| Error::LogFile {
                    path: path.display().to_string(),
                    source,
                })?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    let ansi = config.file.is_none();

    LOGGING_INITIALIZED.get_or_init(|| {
        let (targets, env_filter) = match config.level {
            Some(level) => (Some(Targets::new().with_target(CRATE_TARGET, level)), None),
            None => {
                let filter = EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(format!("{CRATE_TARGET}=warn")));
                (None, Some(filter))
            }
        };

        // Err means the host already installed a global subscriber.
        let _ = tracing_subscriber::registry()
            .with(targets)
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(false)
                    .with_ansi(ansi)
                    .with_timer(SystemTime),
            )
            .try_init();
    });
    Ok(())
}
