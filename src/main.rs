use log::{error, info};
use od_tools::builder::LogBuilder;
use od_tools::cli::{self, CliArgs, Command, OutputFormat, ResultTarget};
use od_tools::grid::{GridSource, MemoryGrid};
use od_tools::parser::{NarrativeParser, ParserConfig};
use od_tools::scanner::LineScanner;
use od_tools::settings::Settings;
use od_tools::xlsx::XlsxGrid;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::parse_args()?;
    init_logging(&args);

    let settings = match &args.config_file {
        Some(path) => Settings::load_from_file(path)?,
        None => Settings::default(),
    };
    if args.debug {
        info!("{}", settings);
    }

    let completed = match &args.command {
        Command::GenerateLog { sim, result, hour } => {
            info!("Generating log for sim file: {}", sim.display());
            if cli::is_json_sim(sim) {
                generate_log(MemoryGrid::load_from_file(sim)?, settings, result, *hour)?
            } else {
                generate_log(XlsxGrid::open(sim)?, settings, result, *hour)?
            }
        }
        Command::ParseLog {
            log,
            result,
            format,
        } => parse_log(log, &settings, &args, result, *format)?,
    };

    if !completed {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(args: &CliArgs) {
    let level = if args.debug {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn generate_log<G: GridSource>(
    grid: G,
    settings: Settings,
    result: &ResultTarget,
    hour: Option<usize>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let generated = LogBuilder::new(grid, settings).run(hour);
    result.deliver(&generated.text)?;

    if let Some(err) = &generated.failure {
        error!("Log generation stopped: {}", err);
    }
    Ok(generated.is_complete())
}

fn parse_log(
    log: &Path,
    settings: &Settings,
    args: &CliArgs,
    result: &ResultTarget,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut scanner = LineScanner::open(log)?;
    let parser = NarrativeParser::new(ParserConfig::from_settings(settings, args.debug));
    let outcome = parser.parse(&mut scanner);

    let rendered = match format {
        OutputFormat::Json => outcome.log.to_json()?,
        OutputFormat::Yaml => outcome.log.to_yaml()?,
    };
    result.deliver(&rendered)?;

    if let Some(err) = &outcome.failure {
        error!("Log parsing stopped: {}", err);
    }
    Ok(outcome.is_complete())
}
