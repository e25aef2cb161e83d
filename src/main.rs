use std::{
    fs,
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use kab::{ast::dump::AsString, error::Error, interpreter::executor::core::Executor};
use tracing::{Level, info};

/// kab runs Kab scripts: typed variables, nested blocks, arithmetic and string
/// output.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells kab to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Writes the syntax tree next to the input file (`.kab-ast`), or to
    /// stderr for inline scripts.
    #[arg(short, long)]
    ast: bool,

    /// Writes the symbol tables with their final values next to the input
    /// file (`.kab-symbols`), or to stderr for inline scripts.
    #[arg(short, long)]
    symbols: bool,

    /// Raises log verbosity; repeat for more (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level)
                             .with_target(false)
                             .with_writer(io::stderr)
                             .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the script and writes the requested dumps.
///
/// Returns `Ok(false)` when the script reported errors.
fn run(args: &Args) -> Result<bool> {
    let script = if args.file {
        fs::read_to_string(&args.contents).with_context(|| {
                                              format!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                                      args.contents)
                                          })?
    } else {
        args.contents.clone()
    };

    let outcome = kab::parse(&kab::lines(&script));
    let mut program = outcome.program;
    let mut errors = outcome.errors;

    if errors.is_empty() {
        let mut executor = Executor::new(io::stdout().lock());
        executor.execute(&mut program);
        errors.extend(executor.into_errors().into_iter().map(Error::from));
    }

    if args.ast {
        write_dump(args, "kab-ast", &program.as_string(&program.scopes, ""))?;
    }
    if args.symbols {
        write_dump(args, "kab-symbols", &program.scopes.dump())?;
    }

    for e in &errors {
        eprintln!("{e}");
    }

    Ok(errors.is_empty())
}

fn write_dump(args: &Args, extension: &str, dump: &str) -> Result<()> {
    if !args.file {
        writeln!(io::stderr(), "{dump}")?;
        return Ok(());
    }

    let path = Path::new(&args.contents).with_extension(extension);
    fs::write(&path, format!("{dump}\n")).with_context(|| {
                                               format!("Failed to write '{}'", path.display())
                                           })?;
    info!(path = %path.display(), "wrote dump");

    Ok(())
}
