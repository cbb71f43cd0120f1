use std::env;
use std::path::Path;

use clap::{Parser, Subcommand};
use tape_bf::commands::{check, run};

/// Run Brainfuck programs on a growable, non-wrapping tape.
///
/// Without a subcommand, `bf` behaves like `bf run`: the program comes from
/// --file, positional code, the file named by BF_FILE (or GM_BF_FILE), or stdin
/// (in that order).
#[derive(Parser, Debug)]
#[command(name = "bf", version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: run::RunArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a Brainfuck program
    Run(run::RunArgs),
    /// Check a program for balanced brackets and print it without comments
    Check(check::CheckArgs),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Program name for error prefixes, e.g. "bf: Parse error: ..."
    let program = env::args()
        .next()
        .as_deref()
        .and_then(|p| Path::new(p).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("bf"));

    let cli = Cli::parse();

    let code = match cli.command {
        Some(Command::Run(args)) => run::run(&program, args),
        Some(Command::Check(args)) => check::run(&program, args),
        None => run::run(&program, cli.run),
    };

    std::process::exit(code);
}
