//! LS-8 emulator CLI.
//!
//! This binary is the single entry point for running LS-8 programs. It performs:
//! 1. **Argument parsing:** One required program path plus run options.
//! 2. **Configuration:** Optional JSON config, overridden by command-line flags.
//! 3. **Execution:** Loads the image, runs the machine, and maps the outcome to an exit code.
//! 4. **Listing:** `--disassemble` prints the program instead of running it.
//!
//! Program output (PRN) goes to stdout; logs and error reports go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ls8_core::config::Config;
use ls8_core::isa::decode;
use ls8_core::isa::disasm::disassemble_image;
use ls8_core::sim::loader;
use ls8_core::{LoadError, Machine, State};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Process exit statuses, distinct per failure class so harnesses can tell
/// a bad invocation from a bad program.
mod exit {
    /// The program halted normally (or was listed).
    pub const OK: u8 = 0;
    /// The machine faulted.
    pub const FAULT: u8 = 1;
    /// The program file does not exist.
    pub const FILE_NOT_FOUND: u8 = 2;
    /// The program file could not be read or is not a valid image.
    pub const INVALID_IMAGE: u8 = 3;
    /// The step budget ran out before HALT.
    pub const STEP_LIMIT: u8 = 4;
    /// Bad arguments or configuration (`EX_USAGE`).
    pub const USAGE: u8 = 64;
}

#[derive(Parser, Debug)]
#[command(
    name = "ls8",
    author,
    version,
    about = "LS-8 emulator",
    long_about = "Run an LS-8 program image.\n\nThe image holds one byte per line as a binary literal; `#` starts a comment.\n\nExamples:\n  ls8 programs/print8.ls8\n  ls8 --max-steps 1000 programs/call.ls8\n  ls8 --disassemble programs/stack.ls8"
)]
struct Cli {
    /// Program image to run.
    program: PathBuf,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many instructions (overrides the config file).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_steps: Option<u64>,

    /// Log every executed instruction with the register state.
    #[arg(long)]
    trace: bool,

    /// Print a disassembly listing instead of running.
    #[arg(short, long)]
    disassemble: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Loads the config file, if any, and applies command-line overrides.
    fn config(&self) -> Result<Config, ls8_core::common::ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if self.max_steps.is_some() {
            config.run.max_steps = self.max_steps;
        }
        config.run.trace |= self.trace;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Nowhere left to report a failed write to; the exit status still says why.
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { exit::USAGE } else { exit::OK });
        }
    };

    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(exit::USAGE);
        }
    };

    init_tracing(cli.verbose, config.run.trace);

    ExitCode::from(run(&cli, &config, io::stdout().lock()))
}

/// Installs the stderr log subscriber. `RUST_LOG` wins unless `--trace` was given.
fn init_tracing(verbose: u8, trace: bool) {
    let level = match (trace, verbose) {
        (true, _) | (false, 2..) => "trace",
        (false, 1) => "debug",
        (false, 0) => "warn",
    };
    let filter = if trace {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    // Fails only if a global subscriber is already set, which then keeps logging.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Loads and runs (or lists) the program, writing program output to `out`.
///
/// # Returns
///
/// The process exit status.
fn run<W: Write>(cli: &Cli, config: &Config, mut out: W) -> u8 {
    let image = match loader::load_image(&cli.program) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: {e}");
            return match e {
                LoadError::FileNotFound { .. } => exit::FILE_NOT_FOUND,
                LoadError::Io { .. } | LoadError::InvalidImageFormat { .. } => {
                    exit::INVALID_IMAGE
                }
            };
        }
    };

    if cli.disassemble {
        for line in disassemble_image(&image) {
            let bytes: Vec<String> = line.bytes.iter().map(|b| format!("{b:08b}")).collect();
            if let Err(e) = writeln!(out, "{:02X}: {:<26} {}", line.addr, bytes.join(" "), line.text)
            {
                eprintln!("error: {e}");
                return exit::FAULT;
            }
        }
        return exit::OK;
    }

    let mut machine = Machine::with_output(config, out);
    if let Err(fault) = machine.load(&image) {
        eprintln!("error: {fault}");
        return exit::FAULT;
    }
    info!(program = %cli.program.display(), bytes = image.len(), "running");

    let result = match config.run.max_steps {
        Some(budget) => machine.run_for(budget),
        None => machine.run().map(|()| State::Halted),
    };
    debug!(stats = %machine.stats(), "run finished");

    match result {
        Ok(State::Halted) => exit::OK,
        Ok(_) => {
            eprintln!(
                "error: step budget of {} exhausted at pc {:#04x}",
                config.run.max_steps.unwrap_or_default(),
                machine.pc()
            );
            exit::STEP_LIMIT
        }
        Err(fault) => {
            eprintln!("error: {fault}");
            if let Some(inst) = fault.pc().and_then(|pc| decode(machine.memory(), pc).ok()) {
                eprintln!("  instruction: {inst}");
            }
            eprintln!("  registers: {}", machine.registers());
            exit::FAULT
        }
    }
}
