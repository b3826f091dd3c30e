// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod cart_actions;
mod checkout_actions;
mod config;
mod helpers;
mod logging;

pub use config::{load_cart_config, validate_cart_config, CartConfig};

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use khitat_core::{
    resolve_khitat_config_path, resolve_khitat_data_dir, ConfigPathScope, ExitCode, MachineError,
};
use khitat_model::{CheckoutMethod, Locale, ProjectId};
use logging::LogFlags;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

const KHITAT_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "khitat", version)]
#[command(about = "Khitat donation cart and checkout CLI")]
#[command(help_template = KHITAT_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  KHITAT_LOG_LEVEL  Log verbosity override\n  KHITAT_DATA_DIR   Cart data directory\n  KHITAT_CONFIG     Config file path"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true, default_value_t = false)]
    trace: bool,
    #[arg(long = "log-json", global = true, default_value_t = false)]
    log_json: bool,
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long = "print-config-paths", default_value_t = false)]
    print_config_paths: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the donation cart
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },
    /// Transfer instructions and order submission
    Checkout {
        #[command(subcommand)]
        command: CheckoutCommand,
    },
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
    Version,
}

#[derive(Subcommand)]
enum CartCommand {
    List,
    Add {
        #[arg(long)]
        project_id: String,
        #[arg(long)]
        slug: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        image_url: String,
        #[arg(long)]
        amount: u64,
        #[arg(long, default_value = khitat_model::DEFAULT_CURRENCY)]
        currency: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Add the base donation for a catalog project
    Donate {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        slug: String,
        /// Index into the project's price list
        #[arg(long, default_value_t = 0)]
        price: usize,
    },
    /// Add a labelled add-on donation for a catalog project
    Addon {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        slug: String,
        /// One of the project's fixed offers, e.g. `waleemah`
        #[arg(long, conflicts_with_all = ["amount", "label", "description"])]
        offer: Option<String>,
        #[arg(long, value_parser = parse_locale, default_value = "en")]
        locale: Locale,
        #[arg(long, required_unless_present = "offer")]
        amount: Option<u64>,
        #[arg(long, required_unless_present = "offer")]
        label: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List the fixed add-on offers of a catalog project
    Offers {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        slug: String,
    },
    Remove {
        #[arg(value_parser = parse_project_id)]
        project_id: ProjectId,
    },
    RemoveAt {
        index: usize,
    },
    Update {
        #[arg(value_parser = parse_project_id)]
        project_id: ProjectId,
        amount: u64,
    },
    Increase {
        #[arg(value_parser = parse_project_id)]
        project_id: ProjectId,
    },
    Decrease {
        #[arg(value_parser = parse_project_id)]
        project_id: ProjectId,
    },
    Clear,
}

#[derive(Subcommand)]
enum CheckoutCommand {
    Instructions {
        #[arg(long, value_parser = parse_method)]
        method: CheckoutMethod,
        #[arg(long, value_parser = parse_locale, default_value = "en")]
        locale: Locale,
    },
    /// Print a fresh transfer code
    Code,
    Submit {
        #[arg(long, value_parser = parse_method)]
        method: CheckoutMethod,
        /// Reuse a code from an earlier failed attempt
        #[arg(long)]
        code: Option<String>,
    },
}

fn parse_project_id(input: &str) -> Result<ProjectId, String> {
    ProjectId::parse(input).map_err(|e| e.to_string())
}

fn parse_method(input: &str) -> Result<CheckoutMethod, String> {
    CheckoutMethod::parse(input).map_err(|e| e.to_string())
}

fn parse_locale(input: &str) -> Result<Locale, String> {
    Locale::parse(input).map_err(|e| e.to_string())
}

#[derive(Clone, Copy)]
struct OutputMode {
    json: bool,
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code as u8)
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError {
                    exit_code: ExitCode::Usage,
                    machine: MachineError::new("usage_error", "invalid command line arguments")
                        .with_detail("error", &err.to_string()),
                });
            }
        },
    };
    let output_mode = OutputMode { json: cli.json };
    logging::init_tracing(LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
        trace: cli.trace,
        json: cli.log_json,
    })
    .map_err(CliError::internal)?;

    if cli.print_config_paths {
        return emit_config_paths(output_mode).map_err(CliError::internal);
    }

    let command = cli.command.ok_or_else(|| CliError {
        exit_code: ExitCode::Usage,
        machine: MachineError::new("usage_error", "missing command; see --help"),
    })?;

    match command {
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
        Commands::Version => helpers::emit_ok(
            output_mode,
            json!({"name": "khitat", "version": env!("CARGO_PKG_VERSION")}),
        )
        .map_err(CliError::internal),
        Commands::Cart { command } => {
            let config = load_cart_config(cli.config.as_deref(), cli.data_dir)
                .map_err(CliError::config)?;
            cart_actions::run_cart_command(command, &config, output_mode)
        }
        Commands::Checkout { command } => {
            let config = load_cart_config(cli.config.as_deref(), cli.data_dir)
                .map_err(CliError::config)?;
            checkout_actions::run_checkout_command(command, &config, output_mode)
        }
    }
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}

fn emit_config_paths(output_mode: OutputMode) -> Result<(), String> {
    helpers::emit_ok(
        output_mode,
        json!({
            "workspace_config": resolve_khitat_config_path(ConfigPathScope::Workspace),
            "user_config": resolve_khitat_config_path(ConfigPathScope::User),
            "data_dir": resolve_khitat_data_dir(),
        }),
    )
}

#[derive(Debug)]
struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    fn internal(message: String) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message),
        }
    }

    fn dependency(code: &str, message: String) -> Self {
        Self {
            exit_code: ExitCode::DependencyFailure,
            machine: MachineError::new(code, &message),
        }
    }

    fn validation(code: &str, message: String) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            machine: MachineError::new(code, &message),
        }
    }

    fn config(message: String) -> Self {
        Self::validation("config_error", message)
    }
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine);
    }
}
