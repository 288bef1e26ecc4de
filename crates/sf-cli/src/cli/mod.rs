//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use sf_core::config::Settings;
use sf_core::login::LoginRequest;

mod commands;

#[derive(Parser)]
#[command(name = "sf")]
#[command(version)]
#[command(about = "Manage developer sessions for Salesforce and Heroku environments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in to a Salesforce org or Heroku account
    ///
    /// Opens the login URL in a browser. To log in to a provider other than
    /// the default, pass its domain or login URL, e.g. `--login-url heroku.com`.
    Login(LoginArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Work with remote environments
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },

    /// Work with projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Generate project resources
    Generate {
        #[command(subcommand)]
        command: GenerateCommands,
    },

    /// Run test suites
    Test {
        #[command(subcommand)]
        command: TestCommands,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct LoginArgs {
    /// Set an alias for the environment
    #[arg(long)]
    alias: Option<String>,

    /// Browser to open SSO with (e.g. "firefox", "safari")
    #[arg(long)]
    browser: Option<String>,

    /// OAuth client ID (sometimes called the consumer key)
    #[arg(short = 'i', long = "client-id")]
    client_id: Option<String>,

    /// Duration of the token in seconds, if supported by the auth provider
    #[arg(long = "expires-in", value_name = "SECONDS")]
    expires_in: Option<u64>,

    /// Login URL of the auth provider [default: https://login.salesforce.com]
    #[arg(short = 'r', long = "login-url", value_name = "URL")]
    login_url: Option<String>,

    /// Print the result payload as JSON
    #[arg(long)]
    json: bool,
}

impl LoginArgs {
    fn into_request(self, settings: &Settings) -> LoginRequest {
        LoginRequest {
            login_url: self
                .login_url
                .unwrap_or_else(|| settings.login_url.clone()),
            alias: self.alias,
            browser: self.browser,
            client_id: self.client_id,
            expires_in: self.expires_in,
        }
    }
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// List the configs
    List,
}

#[derive(clap::Subcommand)]
enum EnvCommands {
    /// Environment logs
    Log {
        #[command(subcommand)]
        command: EnvLogCommands,
    },
    /// Environment variables
    Var {
        #[command(subcommand)]
        command: EnvVarCommands,
    },
}

#[derive(clap::Subcommand)]
enum EnvLogCommands {
    /// List env logs
    List,
}

#[derive(clap::Subcommand)]
enum EnvVarCommands {
    /// List environment variables from a remote environment
    List,
    /// Unset an environment variable from a remote environment
    Unset,
}

#[derive(clap::Subcommand)]
enum ProjectCommands {
    /// Deploy project resources
    Deploy {
        #[command(subcommand)]
        command: DeployCommands,
    },
}

#[derive(clap::Subcommand)]
enum DeployCommands {
    /// Deploy a function
    Functions,
}

#[derive(clap::Subcommand)]
enum GenerateCommands {
    /// Analytics resources
    Analytics {
        #[command(subcommand)]
        command: AnalyticsCommands,
    },
}

#[derive(clap::Subcommand)]
enum AnalyticsCommands {
    /// Create an analytics template
    Template,
}

#[derive(clap::Subcommand)]
enum TestCommands {
    /// Run the function testing suite
    Function,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    dispatch(cli)
}

fn dispatch(cli: Cli) -> Result<()> {
    let settings = Settings::load().context("load config")?;

    match cli.command {
        Commands::Login(args) => {
            let json = args.json;
            let request = args.into_request(&settings);
            commands::auth::login(&request, &settings, json)
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::List => {
                commands::config::list();
                Ok(())
            }
        },

        Commands::Env { command } => {
            match command {
                EnvCommands::Log { command } => match command {
                    EnvLogCommands::List => commands::env::log_list(),
                },
                EnvCommands::Var { command } => match command {
                    EnvVarCommands::List => commands::env::var_list(),
                    EnvVarCommands::Unset => commands::env::var_unset(),
                },
            }
            Ok(())
        }

        Commands::Project { command } => {
            match command {
                ProjectCommands::Deploy { command } => match command {
                    DeployCommands::Functions => commands::functions::deploy(),
                },
            }
            Ok(())
        }

        Commands::Generate { command } => {
            match command {
                GenerateCommands::Analytics { command } => match command {
                    AnalyticsCommands::Template => commands::generate::analytics_template(),
                },
            }
            Ok(())
        }

        Commands::Test { command } => {
            match command {
                TestCommands::Function => commands::functions::test(),
            }
            Ok(())
        }
    }
}
