//! A small Brainfuck interpreter with a growable, non-wrapping tape.
//!
//! Features and behaviors:
//! - The tape starts as a single zero cell and grows to the right on demand.
//! - Cells are unsigned and never wrap: `-` at zero and `<` at cell 0 are no-ops.
//! - Output `.` writes the low byte of the current cell.
//! - Input `,` reads a single byte; at end of input the cell is set to 0 (or
//!   left unchanged, see [`EofBehavior`]).
//! - Any character outside `><+-.,[]` is a comment.
//! - Unmatched brackets are rejected before anything runs.
//!
//! Quick start:
//!
//! ```
//! use tape_bf::{Interpreter, Program};
//!
//! // Classic "Hello World!" in Brainfuck
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let program = Program::parse(code).expect("brackets are balanced");
//! let mut out = Vec::new();
//! Interpreter::new(&program, std::io::empty(), &mut out)
//!     .run()
//!     .expect("program should run");
//! assert_eq!(out, b"Hello World!\n");
//! ```

pub mod cli_util;
pub mod commands;
pub mod config;
pub mod error;
pub mod instruction;
pub mod interpreter;
pub mod loader;
pub mod program;
pub mod tape;

pub use config::Config;
pub use error::{BracketKind, ConfigError, Error, LoadError, ParseError, RunError};
pub use instruction::Instruction;
pub use interpreter::{EofBehavior, Interpreter, StepControl};
pub use loader::SourceSpec;
pub use program::Program;
pub use tape::{Cell, Tape};
