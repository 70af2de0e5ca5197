// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::{db, demo};
use anyhow::Result;
use std::path::PathBuf;

/// Create the schema in the database file. `--demo` seeds the file itself
/// rather than an in-memory copy; tables that already hold rows are left alone.
pub fn handle(sub: &clap::ArgMatches) -> Result<PathBuf> {
    let path = db::db_path()?;
    let mut conn = db::open_at(&path)?;
    if sub.get_flag("demo") {
        demo::seed(&mut conn)?;
    }
    Ok(path)
}
