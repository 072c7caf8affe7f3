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

//! Type-directed conversion of Athena result text.
//!
//! - `type_tag`: canonical tags for declared type names
//! - `temporal`: fixed date/time layouts
//! - `decode`: single value decoding
//! - `row`: the three row adapters

pub mod decode;
pub mod row;
pub mod temporal;
pub mod type_tag;

pub use decode::{decode_tagged, decode_value, decode_value_with};
pub use row::{convert_row, convert_row_from_csv, convert_row_from_table_info, RowConverter};
pub use type_tag::{normalize_type_name, TypeTag};
