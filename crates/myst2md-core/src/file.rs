//! File-level conversion
//!
//! The whole document is converted in memory before the output file is
//! touched, so a failed read never leaves a partial output behind.

use crate::pipeline::{Variant, convert};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while converting a file
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to read: {}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write: {}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Result type for file conversion
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Sizes of a completed conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub input_bytes: usize,
    pub output_bytes: usize,
}

/// Convert `input` and write the result to `output`, replacing any existing file
pub fn convert_file(input: &Path, output: &Path, variant: Variant) -> Result<ConvertSummary> {
    let content = fs::read_to_string(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let converted = convert(&content, variant);

    fs::write(output, &converted).map_err(|source| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        ?variant,
        "Converted document"
    );

    Ok(ConvertSummary {
        input_bytes: content.len(),
        output_bytes: converted.len(),
    })
}
