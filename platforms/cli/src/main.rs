use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tursim::{
    Execution, Machine, MachineLoader, ProgramCatalog, RunResult, TuringMachineError,
    DEFAULT_MAX_STEPS,
};

/// Runs a single-tape Turing machine on an input string.
///
/// The final tape is written verbatim to the output file (or stdout), and the
/// verdict is printed on stdout as `1` (accepted) or `0` (rejected).
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tursim-cli -p machines/replace-a.json -i input.txt -o output.txt
  echo 1011 | tursim-cli -b 'Binary increment'")]
struct Cli {
    /// The machine definition file to execute (.json or .tm)
    #[clap(short, long, conflicts_with = "builtin", required_unless_present_any = ["builtin", "list"])]
    program: Option<PathBuf>,

    /// The name of a built-in machine to execute
    #[clap(short, long)]
    builtin: Option<String>,

    /// File holding the input string. Read from stdin when omitted and stdin is piped
    #[clap(short, long)]
    input: Option<PathBuf>,

    /// File to write the final tape to. Printed to stdout when omitted
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of steps before the run is cut off
    #[clap(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Print each step of the execution to stderr
    #[clap(short = 'd', long)]
    debug: bool,

    /// List the built-in machines and exit
    #[clap(short, long)]
    list: bool,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if cli.list {
        list_programs();
        return;
    }

    match execute(&cli) {
        Ok(result) => println!("{}", u8::from(result.accepted)),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn list_programs() {
    for index in 0..ProgramCatalog::len() {
        if let Ok(info) = ProgramCatalog::info(index) {
            println!(
                "{}: {} ({} states, {} transitions)",
                info.index, info.name, info.state_count, info.transition_count
            );
        }
    }
}

/// Loads the machine, runs it, and writes the final tape.
fn execute(cli: &Cli) -> Result<RunResult, TuringMachineError> {
    let loaded;
    let machine: &Machine = match (&cli.program, &cli.builtin) {
        (Some(path), _) => {
            loaded = MachineLoader::load_machine(path)?;
            &loaded
        }
        (None, Some(name)) => ProgramCatalog::get_by_name(name)?,
        (None, None) => {
            return Err(TuringMachineError::FileError(
                "No machine given, use --program or --builtin".to_string(),
            ))
        }
    };

    let input = read_input(cli.input.as_deref())?;
    info!(
        machine = machine.display_name(),
        input_len = input.chars().count(),
        max_steps = cli.max_steps,
        "running machine"
    );

    let execution = Execution::new(machine, &input)?;
    let result = if cli.debug {
        eprintln!("{}", execution.configuration());
        let result = execution.run_with(cli.max_steps, |config| eprintln!("{}", config))?;
        eprintln!("\nMachine halted: {}", result.halt);
        result
    } else {
        execution.run(cli.max_steps)?
    };

    write_output(cli.output.as_deref(), &result.tape)?;

    Ok(result)
}

/// Reads the input from a file, from piped stdin, or falls back to the empty string.
fn read_input(path: Option<&Path>) -> Result<String, TuringMachineError> {
    if let Some(path) = path {
        MachineLoader::read_input(path)
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read from stdin: {}", e))
        })?;
        Ok(buffer.trim().to_string())
    } else {
        Ok(String::new())
    }
}

/// Writes the tape verbatim to `path`, or prints it on its own line to stdout.
fn write_output(path: Option<&Path>, tape: &str) -> Result<(), TuringMachineError> {
    match path {
        Some(path) => fs::write(path, tape).map_err(|e| {
            TuringMachineError::FileError(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            ))
        }),
        None => {
            println!("{}", tape);
            Ok(())
        }
    }
}
