use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotisage::{
    cli,
    config::{self, Config},
    error,
    types::{FieldPolicy, TimeRange},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API and store the access token
    Auth(AuthOptions),

    /// Fetch listening statistics and render them as a PDF
    Stats(StatsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Seconds to wait for the authorization callback
    #[clap(long, default_value_t = 120)]
    pub timeout: u64,

    /// Where to write the access token
    #[clap(long)]
    pub token_file: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    /// Path of the rendered PDF
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Where to read the access token from
    #[clap(long)]
    pub token_file: Option<PathBuf>,

    /// Time window for top artists and tracks
    #[clap(long, value_enum, default_value_t = TimeRange::Medium)]
    pub time_range: TimeRange,

    /// Fail when a response lacks its expected list instead of rendering it empty
    #[clap(long)]
    pub strict: bool,

    /// Authorize first and pass the token along without reading the token file
    #[clap(long)]
    pub login: bool,

    /// Seconds to wait for the authorization callback when --login is set
    #[clap(long, default_value_t = 120)]
    pub timeout: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(opt) => {
            let mut config = load_config();
            if let Some(path) = opt.token_file {
                config.token_path = path;
            }
            cli::auth(Arc::new(config), Duration::from_secs(opt.timeout)).await
        }
        Command::Stats(opt) => {
            let mut config = load_config();
            if let Some(path) = opt.output {
                config.output_path = path;
            }
            if let Some(path) = opt.token_file {
                config.token_path = path;
            }
            config.time_range = opt.time_range;
            if opt.strict {
                config.field_policy = FieldPolicy::FailFast;
            }
            cli::stats(
                Arc::new(config),
                opt.login,
                Duration::from_secs(opt.timeout),
            )
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
