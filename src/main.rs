//! Purpose: `file-client` CLI entry point.
//! Role: Binary crate root; parses args, builds `ClientConfig`, runs one command.
//! Invariants: Client errors are printed where they are created, never again here.
//! Invariants: Other errors are emitted on stderr (text on a TTY, JSON otherwise).
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::io::{self, IsTerminal};

use clap::{ArgAction, Parser, Subcommand, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use file_client::api::{
    ClientConfig, DEFAULT_BACKEND, DEFAULT_BASE_URL, DEFAULT_RPC_ENDPOINT, DEFAULT_STDOUT_MARKER,
    Error, ErrorKind, Sink, to_exit_code,
};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod command_dispatch;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome { exit_code });
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `file-client --help`."));
            }
        },
    };

    init_tracing(cli.verbose);

    let config = ClientConfig::new()
        .with_backend(cli.backend)
        .with_rpc_endpoint(cli.grpc_server)
        .with_base_url(cli.base_url)
        .with_output(Sink::parse(&cli.output));

    command_dispatch::dispatch_command(cli.command, &config)
}

#[derive(Parser)]
#[command(
    name = "file-client",
    version,
    about = "CLI application which retrieves and prints data from one of the described backends.",
    after_help = r#"EXAMPLES
  $ file-client --backend rest read 3a7abf7f-2907-44e4-bc52-1b7d8b0e0c3e
  $ file-client --backend rest --base-url http://files:8000/ stat 3a7abf7f-2907-44e4-bc52-1b7d8b0e0c3e
  $ file-client --backend rest --output report.pdf read 3a7abf7f-2907-44e4-bc52-1b7d8b0e0c3e"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        value_name = "KIND",
        default_value = DEFAULT_BACKEND,
        help = "Set a backend to be used, choices are rpc (alias grpc) and rest"
    )]
    backend: String,
    #[arg(
        long,
        visible_alias = "rpc-endpoint",
        value_name = "NETLOC",
        default_value = DEFAULT_RPC_ENDPOINT,
        help = "Set a host and port of the RPC server"
    )]
    grpc_server: String,
    #[arg(
        long,
        value_name = "URL",
        default_value = DEFAULT_BASE_URL,
        help = "Set a base URL for a REST server"
    )]
    base_url: String,
    #[arg(
        short,
        long,
        value_name = "OUTPUT",
        default_value = DEFAULT_STDOUT_MARKER,
        help = "Set the file where to store the output; - is stdout"
    )]
    output: String,
    #[arg(short, long, action = ArgAction::Count, help = "Log more detail to stderr (-v, -vv)")]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Outputs the file content.")]
    Read {
        #[arg(value_name = "ID")]
        id: String,
    },
    #[command(about = "Prints the file metadata in a human-readable manner.")]
    Stat {
        #[arg(value_name = "ID")]
        id: String,
    },
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn emit_error(err: &Error) {
    if err.kind().is_client() {
        return;
    }
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }
    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Generic\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    match err.message() {
        Some(message) => message.to_string(),
        None => err.kind().header().to_string(),
    }
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(path) = err.path() {
        lines.push(format!("path: {}", path.display()));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
