//! Seeder naming rules.
//!
//! Seeder names carry a sortable prefix, either a zero-padded three digit
//! sequence (`001_users`) or a `YYYYMMDDHHMMSS` timestamp
//! (`20240115093000_users`). Files are named `seed_<prefix>_<name>.rs` so
//! they are valid module names.

use crate::error::{Result, ScaffoldError};
use chrono::NaiveDateTime;
use std::path::Path;

/// Prefix of generated seeder files.
pub const FILE_PREFIX: &str = "seed_";

const SEQUENCE_LEN: usize = 3;
/// Highest sequence number that still fits the three digit prefix.
pub const MAX_SEQUENCE: u32 = 999;
const TIMESTAMP_LEN: usize = 14;
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Strip extension, file prefix and any sequence or timestamp prefix, then
/// normalize to a snake_case identifier.
///
/// `"seed_001_users.rs"`, `"001_users"` and `"Users"` all clean to `"users"`.
pub fn clean_seeder_name(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_suffix(".rs").unwrap_or(name);
    let name = name.strip_prefix(FILE_PREFIX).unwrap_or(name);

    let name = match name.split_once('_') {
        Some((first, rest))
            if (first.len() == SEQUENCE_LEN || first.len() == TIMESTAMP_LEN)
                && is_numeric(first) =>
        {
            rest
        }
        _ => name,
    };

    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Convert a snake_case name into the seeder struct name.
///
/// `"user_roles"` becomes `"UserRolesSeeder"`. Names starting with a digit
/// take the suffix as a prefix instead (`"2fa_codes"` becomes
/// `"Seeder2faCodes"`) so the result is always an identifier.
pub fn struct_name(name: &str) -> String {
    let mut result: String = name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert_str(0, "Seeder");
    } else {
        result.push_str("Seeder");
    }
    result
}

/// Timestamp prefix for a point in time.
pub fn timestamp_prefix(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Sequence prefix for a number.
pub fn sequence_prefix(n: u32) -> String {
    format!("{:03}", n)
}

/// Extract the sequence number from a generated file name.
///
/// Only `seed_NNN_*.rs` files count; timestamp-prefixed files do not.
pub fn sequence_number(file_name: &str) -> Option<u32> {
    let stem = file_name.strip_suffix(".rs")?;
    let rest = stem.strip_prefix(FILE_PREFIX)?;
    let (digits, _) = rest.split_once('_')?;
    if digits.len() == SEQUENCE_LEN && is_numeric(digits) {
        digits.parse().ok()
    } else {
        None
    }
}

/// Next free sequence number in `dir`: one past the highest existing one.
///
/// A missing directory starts at 1. Fails once `MAX_SEQUENCE` is taken, since
/// a four digit prefix would no longer sort after the existing files.
pub fn next_sequential_number(dir: &Path) -> Result<u32> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(1),
        Err(e) => return Err(ScaffoldError::io(dir, e)),
    };

    let mut max = 0;
    for entry in entries {
        let entry = entry.map_err(|e| ScaffoldError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| ScaffoldError::io(entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }

        if let Some(n) = entry.file_name().to_str().and_then(sequence_number) {
            max = max.max(n);
        }
    }

    if max >= MAX_SEQUENCE {
        return Err(ScaffoldError::SequenceExhausted {
            dir: dir.to_path_buf(),
            max: MAX_SEQUENCE,
        });
    }
    Ok(max + 1)
}
