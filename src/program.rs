use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("failed to read program from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid value '{text}' at position {index}")]
    InvalidValue { index: usize, text: String },
    #[error("program is empty")]
    Empty,
}

/// Parse comma-separated Intcode text, e.g. `"1,0,0,0,99"`.
///
/// Whitespace around values is ignored, as is a trailing comma or newline.
pub fn parse(text: &str) -> Result<Vec<i64>, ProgramError> {
    let mut tokens: Vec<&str> = text.split(',').map(str::trim).collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    if tokens.is_empty() {
        return Err(ProgramError::Empty);
    }

    tokens
        .iter()
        .enumerate()
        .map(|(index, t)| {
            t.parse::<i64>().map_err(|_| ProgramError::InvalidValue {
                index,
                text: t.to_string(),
            })
        })
        .collect()
}

/// Read and parse a program file.
pub fn load(path: &Path) -> Result<Vec<i64>, ProgramError> {
    let text = fs::read_to_string(path).map_err(|source| ProgramError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}
