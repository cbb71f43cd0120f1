use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::cli_util::print_error;
use crate::config::{Config, Overrides};
use crate::error::Error;
use crate::loader;
use crate::program::Program;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Read Brainfuck code from PATH instead of positional "<code>" (fallback BF_FILE or GM_BF_FILE, then stdin)
    #[arg(short = 'f', long = "file", value_name = "PATH", conflicts_with = "code")]
    pub file: Option<PathBuf>,

    /// Concatenated Brainfuck code parts; put code starting with '-' after `--`
    #[arg(value_name = "code", num_args = 0..)]
    pub code: Vec<String>,
}

/// Validate a program without running it. On success the comment-free
/// program goes to stdout and a one-line summary to stderr.
pub fn run(program: &str, args: CheckArgs) -> i32 {
    let mut source = String::new();
    match check(args, &mut source) {
        Ok(parsed) => {
            println!("{parsed}");
            let _ = io::stdout().flush();
            eprintln!(
                "{program}: ok ({} instructions, {} loops)",
                parsed.len(),
                parsed.loop_count()
            );
            0
        }
        Err(err) => {
            print_error(Some(program), &source, &err);
            1
        }
    }
}

fn check(args: CheckArgs, source: &mut String) -> Result<Program, Error> {
    let overrides = Overrides {
        file: args.file,
        code: args.code,
        ..Overrides::default()
    };
    let config = Config::resolve(overrides)?;
    *source = loader::load(&config.source)?;
    Ok(Program::parse(source)?)
}
