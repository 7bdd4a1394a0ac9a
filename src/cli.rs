//! Command-line interface for the protection log tools.

use lexopt::prelude::*;
use std::path::{Path, PathBuf};

/// Command-line arguments.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
    pub config_file: Option<PathBuf>,
    pub debug: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    GenerateLog {
        sim: PathBuf,
        result: ResultTarget,
        hour: Option<usize>,
    },
    ParseLog {
        log: PathBuf,
        result: ResultTarget,
        format: OutputFormat,
    },
}

/// Where a command's output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultTarget {
    Stdout,
    File(PathBuf),
}

impl ResultTarget {
    /// An empty path or `std` means stdout.
    pub fn from_flag(value: &str) -> Self {
        match value.trim() {
            "" | "std" => ResultTarget::Stdout,
            path => ResultTarget::File(PathBuf::from(path)),
        }
    }

    pub fn deliver(&self, text: &str) -> std::io::Result<()> {
        match self {
            ResultTarget::Stdout => {
                println!("{}", text);
                Ok(())
            }
            ResultTarget::File(path) => {
                std::fs::write(path, text)?;
                println!("Successfully wrote result to {}", path.display());
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown format '{}'", other)),
        }
    }
}

pub const GENERATE_LOG: &str = "generate_log";
pub const PARSE_LOG: &str = "parse_log";

pub fn parse_args() -> Result<CliArgs, lexopt::Error> {
    parse_from(lexopt::Parser::from_env())
}

/// Parse arguments from any lexopt parser; `parse_args` uses the process
/// arguments.
pub fn parse_from(mut args: lexopt::Parser) -> Result<CliArgs, lexopt::Error> {
    let mut subcommand: Option<String> = None;
    let mut sim = None;
    let mut log = None;
    let mut result = ResultTarget::Stdout;
    let mut hour = None;
    let mut format = OutputFormat::default();
    let mut config_file = None;
    let mut debug = false;
    let mut quiet = false;

    while let Some(arg) = args.next()? {
        match arg {
            Value(val) if subcommand.is_none() => subcommand = Some(val.string()?),
            Long("sim") => sim = Some(PathBuf::from(args.value()?.string()?)),
            Long("log") => log = Some(PathBuf::from(args.value()?.string()?)),
            Long("result") | Short('r') => {
                result = ResultTarget::from_flag(&args.value()?.string()?);
            }
            Long("hour") => {
                let value: usize = args.value()?.parse()?;
                hour = (value > 0).then_some(value);
            }
            Long("format") | Short('f') => {
                format = args.value()?.parse()?;
            }
            Long("config") => config_file = Some(PathBuf::from(args.value()?.string()?)),
            Long("debug") => debug = true,
            Long("quiet") | Short('q') => quiet = true,
            Long("help") | Short('h') => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    let command = match subcommand.as_deref() {
        Some(GENERATE_LOG) => match sim {
            Some(sim) => Command::GenerateLog { sim, result, hour },
            None => {
                print_generate_usage();
                std::process::exit(1);
            }
        },
        Some(PARSE_LOG) => match log {
            Some(log) => Command::ParseLog {
                log,
                result,
                format,
            },
            None => {
                print_parse_usage();
                std::process::exit(1);
            }
        },
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_help();
            std::process::exit(1);
        }
        None => {
            print_help();
            std::process::exit(1);
        }
    };

    Ok(CliArgs {
        command,
        config_file,
        debug,
        quiet,
    })
}

/// `.json` sims are read as in-memory sheets, anything else as a workbook.
pub fn is_json_sim(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn print_generate_usage() {
    println!("Usage of od-tools {}:", GENERATE_LOG);
    println!("    --sim <FILE>       Path to the sim file (.xlsm, .xlsx or .json)");
    println!("    --result <FILE>    Path to the result file; \"\" or \"std\" prints to stdout");
    println!("    --hour <N>         Only log the given protection hour");
    println!("Example:");
    println!("    od-tools {} --sim sim.xlsm --result sim.txt\n", GENERATE_LOG);
}

fn print_parse_usage() {
    println!("Usage of od-tools {}:", PARSE_LOG);
    println!("    --log <FILE>       Path to the txt log file");
    println!("    --result <FILE>    Path to the result file; \"\" or \"std\" prints to stdout");
    println!("    --format <FMT>     json (default) or yaml");
    println!("    --debug            Enable debug logging");
    println!("Example:");
    println!("    od-tools {} --log sim.txt\n", PARSE_LOG);
}

fn print_help() {
    println!("\nOpenDominion protection log tools\n");
    println!("USAGE:");
    println!("    od-tools <COMMAND> [OPTIONS]\n");

    println!("COMMANDS:");
    println!("    {}     Generate a protection log from a sim file", GENERATE_LOG);
    println!("    {}        Parse a protection log into structured actions\n", PARSE_LOG);

    print_generate_usage();
    print_parse_usage();

    println!("GLOBAL OPTIONS:");
    println!("    --config <FILE>    Load settings from a JSON or YAML file");
    println!("    --debug            Enable debug output");
    println!("    -q, --quiet        Suppress non-essential output");
    println!("    -h, --help         Print help information");
}
