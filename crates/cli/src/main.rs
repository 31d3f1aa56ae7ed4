mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use binstubs_lib::Naming;
use binstubs_lib::config::{Config, bin_dir};
use binstubs_lib::inventory::{GitCli, GitRemotes, HerokuApi};

use cmd::{CreateRequest, Session, cmd_all, cmd_clean, cmd_create, cmd_list, cmd_remotes, cmd_setup};
use output::{OutputFormat, print_error};

/// binstubs - Per-environment shell wrappers for platform apps
#[derive(Parser)]
#[command(name = "binstubs")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Directory holding the binstubs (default: bin)
  #[arg(short, long, global = true, value_name = "DIR")]
  directory: Option<PathBuf>,

  /// Name binstubs after the full app name
  #[arg(short, long, global = true)]
  full: bool,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Create binstubs for an app family (the default command)
  Create(CreateArgs),

  /// List binstubs in a directory
  List {
    /// Directory to list instead of --directory
    dir: Option<PathBuf>,
  },

  /// Delete every binstub in the directory
  Clean,

  /// Create a binstub for each Git remote pointing at an app
  Remotes,

  /// Create a binstub named after every app
  All {
    /// Only include apps starting with this prefix
    prefix: Option<String>,
  },

  /// Create binstubs and a Git remote for each of them
  Setup(CreateArgs),
}

#[derive(Args, Default)]
struct CreateArgs {
  /// App family basename, or the app when --as is given
  basename: Option<String>,

  /// App whose family to use
  #[arg(short, long)]
  app: Option<String>,

  /// Create a single binstub with this name
  #[arg(long = "as", value_name = "STUB")]
  as_name: Option<String>,
}

impl From<CreateArgs> for CreateRequest {
  fn from(args: CreateArgs) -> Self {
    Self {
      basename: args.basename,
      app: args.app,
      as_name: args.as_name,
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .without_time()
    .with_writer(std::io::stderr)
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{e:#}"));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
  let config = Config::from_env(cwd);

  let session = Session {
    dir: bin_dir(cli.directory.as_deref()),
    naming: Naming::from_full_flag(cli.full),
    output: cli.output,
    config,
  };

  debug!(dir = %session.dir.display(), cwd = %session.config.cwd.display(), "starting");

  let apps = HerokuApi::from_config(&session.config);
  let remotes = GitRemotes::new(&session.config.cwd, session.config.host.as_str());

  match cli.command.unwrap_or_else(|| Commands::Create(CreateArgs::default())) {
    Commands::Create(args) => cmd_create(&args.into(), &session, &apps, &remotes),
    Commands::List { dir } => cmd_list(&session, dir.as_deref()),
    Commands::Clean => cmd_clean(&session),
    Commands::Remotes => cmd_remotes(&session, &remotes),
    Commands::All { prefix } => cmd_all(&session, &apps, prefix.as_deref()),
    Commands::Setup(args) => {
      let binder = GitCli::new(&session.config.cwd);
      cmd_setup(&args.into(), &session, &apps, &remotes, &binder)
    }
  }
}
