use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::error::LoadError;

/// Where the program text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Code given directly, e.g. on the command line.
    Inline(String),
    /// Entire contents of a file.
    File(PathBuf),
    /// Standard input, read until end of stream.
    Stdin,
}

/// Acquire the complete program text before any preprocessing happens.
///
/// Files and stdin are decoded lossily: anything that is not valid UTF-8 can
/// only be commentary, which the preprocessor discards anyway.
pub fn load(source: &SourceSpec) -> Result<String, LoadError> {
    match source {
        SourceSpec::Inline(code) => Ok(code.clone()),
        SourceSpec::File(path) => {
            log::debug!("loading program from {}", path.display());
            let bytes = fs::read(path).map_err(|source| LoadError::File {
                path: path.clone(),
                source,
            })?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        SourceSpec::Stdin => {
            log::debug!("loading program from stdin");
            load_from_reader(io::stdin().lock()).map_err(|source| LoadError::Stdin { source })
        }
    }
}

fn load_from_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
