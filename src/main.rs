use std::io::Read;

use clap::{Parser, Subcommand};

use gh_contrib::commands;
use gh_contrib::config::{default_since, GhConfigFile, RunConfig};
use gh_contrib::credentials::{resolve_token, GhCliTokenFetcher};
use gh_contrib::github::GitHubClient;
use gh_contrib::summarize::AzureAiSummarizer;

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_FETCH: i32 = 2;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Weekly contribution histogram for an author
    Graph {
        /// Author login (defaults to the authenticated user)
        username: Option<String>,
    },
    /// Pull requests authored by a user, as CSV
    Pulls { username: String },
    /// Issues authored by a user, as CSV
    Issues { username: String },
    /// All pull requests and issues by a user, as CSV
    All { username: String },
    /// Summarize PR/issue bodies from an argument or stdin
    Summarize { text: Option<String> },
}

#[derive(Parser, Debug)]
#[command(name = "gh-contrib")]
#[command(about = "Report GitHub issue and pull request contributions by author", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Only include results created since this date (default: 30 days ago)
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    since: Option<String>,

    /// Print only item bodies instead of CSV
    #[arg(long, global = true)]
    body_only: bool,

    /// Override the configured organization
    #[arg(long, global = true, value_name = "NAME")]
    org: Option<String>,

    /// Override the configured or default AI model
    #[arg(long, global = true, value_name = "NAME")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();

    let cfg = RunConfig {
        since: cli.since.unwrap_or_else(default_since),
        debug: cli.debug,
        body_only: cli.body_only,
        org_override: cli.org,
        model_override: cli.model,
    };

    let gh_config = GhConfigFile::locate();

    if cfg.debug {
        eprintln!("Debug mode enabled");
        eprintln!("Since: {}", cfg.since);
    }

    let result = match cli.command {
        Commands::Summarize { text } => {
            let input = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
                        eprintln!("Error reading from stdin: {e}");
                        std::process::exit(EXIT_FETCH);
                    }
                    buffer
                }
            };
            let model = cfg.effective_model(&gh_config);
            if cfg.debug {
                eprintln!("Using AI model: {model}");
            }
            let summarizer =
                AzureAiSummarizer::new(reqwest::Client::new(), GhCliTokenFetcher, model);
            commands::run_summarize(&summarizer, &input).await
        }
        command => {
            let token = match resolve_token() {
                Ok(token) => token,
                Err(e) => {
                    eprintln!("Error resolving GitHub token: {e:#}");
                    std::process::exit(EXIT_AUTH);
                }
            };
            let client = match GitHubClient::new(&token) {
                Ok(client) => client,
                Err(e) => {
                    eprintln!("Error initializing GitHub client: {e:#}");
                    std::process::exit(EXIT_AUTH);
                }
            };

            match command {
                Commands::Graph { username } => {
                    commands::run_graph(&client, username, &cfg, &gh_config).await
                }
                Commands::Pulls { username } => {
                    commands::run_pulls(&client, &username, &cfg, &gh_config).await
                }
                Commands::Issues { username } => {
                    commands::run_issues(&client, &username, &cfg, &gh_config).await
                }
                Commands::All { username } => {
                    commands::run_all(&client, &username, &cfg, &gh_config).await
                }
                Commands::Summarize { .. } => unreachable!("handled above"),
            }
        }
    };

    match result {
        Ok(out) => {
            print!("{out}");
            std::process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(EXIT_FETCH);
        }
    }
}
