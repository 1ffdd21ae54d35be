use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::{debug, info, LevelFilter};
use medi_hl7::{json, HL7Error, Message};

pub mod config;

use config::{Config, LineEndings, CONFIG_FILE};

#[derive(Debug, Parser)]
#[command(
    name = "medihl7",
    version,
    author = "MediLang Team",
    about = "Decode HL7v2 messages and look up values by path",
    long_about = "medihl7 decodes an HL7v2 message using the delimiters declared in its MSH header.\n\n\
        EXAMPLES:\n\
        \n  medihl7 render adt.hl7 --line-endings lf     Print the message one segment per line\n\
        \n  medihl7 json adt.hl7 -o adt.json             Write the decoded tree as JSON\n\
        \n  medihl7 get adt.hl7 -l PID.3 -l PID.5.1      Print values by path\n\
        \n  cat adt.hl7 | medihl7 get -l PID-3-4-1        Read the message from stdin",
    after_help = "For more information, visit: https://github.com/MediLang/medi"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./medihl7.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the message in canonical delimited form
    Render(RenderArgs),
    /// Print the decoded message tree as JSON
    Json(JsonArgs),
    /// Print the value at one or more path addresses
    #[command(
        long_about = "Print the value at one or more path addresses, one per line.\n\n\
            An address is a segment name followed by positions, separated by '.' or '-':\n\
            \n  PID         the whole segment\
            \n  PID.3       field 3 with all of its repeats\
            \n  PID.3.4     component 4 of the first repeat\
            \n  PID.3.4.2   subcomponent 2 of that component"
    )]
    Get(GetArgs),
}

#[derive(Debug, Args, Clone)]
struct IoArgs {
    /// Input HL7 file (reads from stdin if not provided or '-')
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write output to FILE instead of stdout
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
struct RenderArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Segment terminator (overrides the config file)
    #[arg(long, value_enum)]
    line_endings: Option<LineEndings>,
}

#[derive(Debug, Args, Clone)]
struct JsonArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Emit compact JSON (overrides the config file)
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Args, Clone)]
struct GetArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Path address to look up, e.g. PID.3.4.1 (repeatable)
    #[arg(short = 'l', long = "location", value_name = "ADDRESS", required = true)]
    locations: Vec<String>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<Config, i32> {
    let (config_path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILE), false),
    };
    if !config_path.exists() {
        if explicit {
            eprintln!("error: '{}' not found", config_path.display());
            return Err(2);
        }
        return Ok(Config::default());
    }

    let text = match fs::read_to_string(&config_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: failed to read '{}': {e}", config_path.display());
            return Err(2);
        }
    };

    match config::parse_config(&text) {
        Ok(c) => {
            info!("loaded {}: {c}", config_path.display());
            Ok(c)
        }
        Err(e) => {
            eprintln!("error: invalid '{}': {e}", config_path.display());
            Err(2)
        }
    }
}

fn read_input(input: &Option<PathBuf>) -> Result<Vec<u8>, String> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            fs::read(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| format!("failed to read from stdin: {e}"))?;
            Ok(buf)
        }
    }
}

fn write_output(out: &Option<PathBuf>, text: &str) -> Result<(), String> {
    match out {
        Some(path) => {
            fs::write(path, text).map_err(|e| format!("failed to write '{}': {e}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| format!("failed to write to stdout: {e}"))
        }
    }
}

fn load_message(io: &IoArgs) -> Result<Message, i32> {
    let raw = match read_input(&io.input) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(2);
        }
    };
    debug!("read {} byte(s)", raw.len());

    Message::from_bytes(&raw).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

fn emit(io: &IoArgs, text: &str) -> i32 {
    match write_output(&io.out, text) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            2
        }
    }
}

fn render_with(message: &Message, line_endings: LineEndings) -> String {
    let eol = line_endings.as_str();
    message
        .segments()
        .iter()
        .map(|segment| format!("{segment}{eol}"))
        .collect()
}

fn run_render(config: &Config, args: &RenderArgs) -> i32 {
    let message = match load_message(&args.io) {
        Ok(m) => m,
        Err(rc) => return rc,
    };
    let line_endings = args.line_endings.unwrap_or(config.output.line_endings);
    emit(&args.io, &render_with(&message, line_endings))
}

fn run_json(config: &Config, args: &JsonArgs) -> i32 {
    let message = match load_message(&args.io) {
        Ok(m) => m,
        Err(rc) => return rc,
    };
    let rendered = if config.output.pretty && !args.compact {
        json::to_json_pretty(&message)
    } else {
        json::to_json(&message)
    };
    match rendered {
        Ok(mut text) => {
            text.push('\n');
            emit(&args.io, &text)
        }
        Err(e) => {
            eprintln!("error: failed to serialize message: {e}");
            1
        }
    }
}

fn lookup_all(message: &Message, locations: &[String]) -> Result<String, HL7Error> {
    let mut out = String::new();
    for location in locations {
        let value = message.get_value(location)?;
        out.push_str(&value);
        out.push('\n');
    }
    Ok(out)
}

fn run_get(args: &GetArgs) -> i32 {
    let message = match load_message(&args.io) {
        Ok(m) => m,
        Err(rc) => return rc,
    };
    match lookup_all(&message, &args.locations) {
        Ok(text) => emit(&args.io, &text),
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

fn run(cli: Cli) -> i32 {
    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(rc) => return rc,
    };

    match cli.command {
        Command::Render(args) => run_render(&config, &args),
        Command::Json(args) => run_json(&config, &args),
        Command::Get(args) => run_get(&args),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    std::process::exit(run(cli));
}
