use std::fmt;
use std::path::PathBuf;

/// Which side of a loop was left without a partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketKind::Open => write!(f, "'['"),
            BracketKind::Close => write!(f, "']'"),
        }
    }
}

/// The program text could not be turned into a runnable program.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Loops were not balanced.
    ///
    /// `position` indexes the filtered instruction stream; `offset` is the
    /// char index into the raw source, with `line`/`column` (1-based) for humans.
    #[error("Unmatched bracket {kind} at line {line}, column {column}")]
    UnmatchedBracket {
        kind: BracketKind,
        position: usize,
        offset: usize,
        line: usize,
        column: usize,
    },
}

/// Errors raised while a program is executing.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Reading program input or writing program output failed.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: std::io::Error,
    },

    /// Execution aborted due to step limit.
    #[error("Execution aborted: step limit exceeded ({limit})")]
    StepLimitExceeded { limit: usize },

    /// Execution aborted due to cooperative cancellation (e.g. ctrl+c)
    #[error("Execution aborted: cancelled")]
    Canceled,
}

/// The program source could not be acquired.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read program file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read program from stdin: {source}")]
    Stdin {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open input file {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A setting from the environment or config file had an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid end-of-input behavior '{0}' (expected 'zero' or 'unchanged')")]
    InvalidEof(String),

    #[error("invalid step limit '{value}' from {origin}")]
    InvalidMaxSteps { value: String, origin: &'static str },
}

/// Any failure between acquiring a program and finishing its run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Run(#[from] RunError),
}
