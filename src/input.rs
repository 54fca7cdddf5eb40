//! Common routines for reading the line-oriented input files.
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Read a text file into owned lines, without line terminators
pub fn read_lines(file_path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    Ok(contents.lines().map(str::to_string).collect())
}

/// Value part of a `key = value` header line, trimmed
///
/// The key itself is not checked.
pub fn header_value(lines: &[String], index: usize) -> Result<&str> {
    let line = lines
        .get(index)
        .ok_or_else(|| anyhow!("Missing header line {}", index + 1))?;
    let (_, value) = line
        .split_once('=')
        .ok_or_else(|| anyhow!("Line {} is not of the form `key = value`: {:?}", index + 1, line))?;
    Ok(value.trim())
}

/// Parse the value of a `key = value` header line
pub fn header_int<T>(lines: &[String], index: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = header_value(lines, index)?;
    value
        .parse()
        .with_context(|| format!("Line {}: invalid integer {:?}", index + 1, value))
}
