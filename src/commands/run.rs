use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Args;

use crate::cli_util::print_error;
use crate::config::{Config, Overrides};
use crate::error::{Error, LoadError, RunError};
use crate::interpreter::{EofBehavior, Interpreter, StepControl};
use crate::loader;
use crate::program::Program;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Read Brainfuck code from PATH instead of positional "<code>" (fallback BF_FILE or GM_BF_FILE, then stdin)
    #[arg(short = 'f', long = "file", value_name = "PATH", conflicts_with = "code")]
    pub file: Option<PathBuf>,

    /// Feed `,` from PATH instead of stdin
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Maximum interpreter steps before abort (fallback BF_MAX_STEPS; default unlimited)
    #[arg(long = "max-steps", value_name = "N")]
    pub max_steps: Option<usize>,

    /// What `,` stores at end of input: zero or unchanged (fallback BF_EOF; default zero)
    #[arg(long = "eof", value_name = "MODE")]
    pub eof: Option<EofBehavior>,

    /// Print a step-by-step table of operations instead of the program's output
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Concatenated Brainfuck code parts; put code starting with '-' after `--`
    #[arg(value_name = "code", num_args = 0..)]
    pub code: Vec<String>,
}

impl From<RunArgs> for Overrides {
    fn from(args: RunArgs) -> Self {
        Overrides {
            file: args.file,
            code: args.code,
            input: args.input,
            max_steps: args.max_steps,
            eof: args.eof,
            debug: args.debug,
        }
    }
}

/// Entry point for `bf run` (and bare `bf`). Returns the process exit code.
pub fn run(program: &str, args: RunArgs) -> i32 {
    let mut source = String::new();
    match execute(args, &mut source) {
        Ok(()) => 0,
        Err(err) => {
            print_error(Some(program), &source, &err);
            1
        }
    }
}

fn execute(args: RunArgs, source: &mut String) -> Result<(), Error> {
    let config = Config::resolve(args.into())?;
    *source = loader::load(&config.source)?;
    let parsed = Program::parse(source)?;

    // ctrl+c raises the cancel flag so buffered output still gets flushed.
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
        log::warn!("failed to set ctrl+c handler: {e}");
    }
    let control = StepControl::new(config.max_steps, cancel);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let result = match &config.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| LoadError::Input {
                path: path.clone(),
                source,
            })?;
            interpret(&parsed, BufReader::new(file), &mut out, &config, control)
        }
        None => interpret(&parsed, io::stdin().lock(), &mut out, &config, control),
    };

    // Whatever ran before a failure is still delivered.
    let flushed = out.flush().map_err(|source| RunError::Io {
        ip: parsed.len(),
        source,
    });
    result?;
    flushed?;
    Ok(())
}

fn interpret<R: Read, W: Write>(
    program: &Program,
    input: R,
    output: W,
    config: &Config,
    control: StepControl,
) -> Result<(), RunError> {
    let mut interp = Interpreter::new(program, input, output).with_eof_behavior(config.eof);
    let result = if config.debug {
        interp.run_debug_with_control(control)
    } else {
        interp.run_with_control(control)
    };
    log::info!("executed {} steps", interp.steps());
    result
}
