//! Subcommands of the `bf` binary. Each returns the process exit code.

pub mod check;
pub mod run;
