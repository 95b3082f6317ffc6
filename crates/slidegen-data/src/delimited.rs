//! Delimited text data source.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{DataError, Result};

/// Options for delimited parsing
#[derive(Debug, Clone)]
pub struct DelimitedOptions {
    /// Field delimiter (default: semicolon)
    pub delimiter: u8,
    /// Lines starting with this byte are skipped (default: `#`)
    pub comment: Option<u8>,
    /// Whether to trim whitespace from fields
    pub trim: bool,
    /// Whether to allow rows with differing column counts
    pub flexible: bool,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            comment: Some(b'#'),
            trim: true,
            flexible: false,
        }
    }
}

impl DelimitedOptions {
    /// Create options for comma-separated values
    pub fn comma() -> Self {
        Self {
            delimiter: b',',
            ..Default::default()
        }
    }

    /// Create options for tab-separated values
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    fn reader<R: Read>(&self, input: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .comment(self.comment)
            .has_headers(false)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            // Column counts are checked after whitespace-only lines are dropped
            .flexible(true)
            .from_reader(input)
    }
}

/// A delimited file on disk
pub struct DelimitedSource {
    /// Path to the file
    path: String,
    /// Parsing options
    options: DelimitedOptions,
}

impl DelimitedSource {
    /// Create a new source with default (semicolon) options
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(path, DelimitedOptions::default())
    }

    /// Create a new source with custom options
    pub fn with_options(path: impl AsRef<Path>, options: DelimitedOptions) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();

        if !path.as_ref().is_file() {
            return Err(DataError::FileNotFound(path_str));
        }

        Ok(Self {
            path: path_str,
            options,
        })
    }

    /// Path of the underlying file
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Read all records as strings
    pub fn read_all(&self) -> Result<Vec<Vec<String>>> {
        let file = File::open(&self.path)?;
        read_records(BufReader::new(file), &self.options)
    }

    /// Read all records and parse the requested columns as numbers
    ///
    /// Returns one vector per requested column. Rows are numbered from 1 in
    /// errors, counting only data rows.
    pub fn read_numeric_columns(&self, columns: &[usize]) -> Result<Vec<Vec<f64>>> {
        numeric_columns(&self.read_all()?, columns)
    }
}

/// Parse records from any reader
pub fn read_records<R: Read>(input: R, options: &DelimitedOptions) -> Result<Vec<Vec<String>>> {
    let mut reader = options.reader(input);
    let mut result: Vec<Vec<String>> = Vec::new();

    for record in reader.records() {
        let record = record?;
        // A lone empty field is what a whitespace-only line trims down to
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }

        if let Some(first) = result.first() {
            if !options.flexible && first.len() != record.len() {
                return Err(DataError::Malformed(format!(
                    "record {} has {} fields, but the first record has {}",
                    result.len() + 1,
                    record.len(),
                    first.len()
                )));
            }
        }

        result.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(result)
}

/// Parse the requested columns of string records as numbers
pub fn numeric_columns(rows: &[Vec<String>], columns: &[usize]) -> Result<Vec<Vec<f64>>> {
    let needed = columns.iter().max().map_or(0, |max| max + 1);
    let mut result = vec![Vec::with_capacity(rows.len()); columns.len()];

    for (i, row) in rows.iter().enumerate() {
        if row.len() < needed {
            return Err(DataError::TooFewColumns {
                row: i + 1,
                found: row.len(),
            });
        }

        for (out, &column) in result.iter_mut().zip(columns) {
            let cell = &row[column];
            let value = cell.parse::<f64>().map_err(|_| DataError::NotNumeric {
                row: i + 1,
                column,
                value: cell.clone(),
            })?;
            out.push(value);
        }
    }

    Ok(result)
}
