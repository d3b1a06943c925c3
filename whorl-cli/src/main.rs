use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use whorl_core::output::{get_formatter, to_json, OutputFormat};
use whorl_core::{ContentItem, Grammar, WhoisClient};

#[derive(Parser)]
#[command(name = "whorl")]
#[command(about = "WHOIS lookups parsed into structured records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (human or json)
    #[arg(short, long, default_value = "human")]
    format: String,

    /// Include the raw response in JSON output
    #[arg(long)]
    raw: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the WHOIS server for a domain and parse its answer
    Lookup {
        /// Domain name to look up
        domain: String,
        /// Query this server instead of the one the TLD table names
        #[arg(short, long)]
        server: Option<String>,
        /// Network timeout in seconds
        #[arg(short, long, default_value_t = 10)]
        timeout: u64,
        /// Do not follow registrar referrals
        #[arg(long)]
        no_referrals: bool,
    },
    /// Parse a saved WHOIS response from a file
    Parse {
        /// File holding the raw response
        file: PathBuf,
        /// Grammar of the response (flat or indented)
        #[arg(short, long, default_value = "flat")]
        grammar: String,
    },
    /// Show the header/content sections of a saved outline-style response
    Outline {
        /// File holding the raw response
        file: PathBuf,
    },
    /// Show which WHOIS server and grammar a domain maps to
    Server {
        /// Domain name to resolve
        domain: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format: OutputFormat = cli.format.parse().unwrap_or_default();

    if let Err(e) = execute_command(cli.command, output_format, cli.raw).await {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
    Ok(())
}

async fn execute_command(
    command: Commands,
    output_format: OutputFormat,
    include_raw: bool,
) -> anyhow::Result<()> {
    let formatter = get_formatter(output_format, include_raw);

    match command {
        Commands::Lookup {
            domain,
            server,
            timeout,
            no_referrals,
        } => {
            let mut client = WhoisClient::new().with_timeout(Duration::from_secs(timeout));
            if no_referrals {
                client = client.with_referral_depth(0);
            }
            let record = match server {
                Some(server) => client.lookup_with_server(&domain, &server).await?,
                None => client.lookup(&domain).await?,
            };
            println!("{}", formatter.format_record(&record));
        }
        Commands::Parse { file, grammar } => {
            let grammar: Grammar = grammar.parse().map_err(anyhow::Error::msg)?;
            let content = std::fs::read_to_string(&file)?;
            let record = grammar.parse(&content);
            println!("{}", formatter.format_record(&record));
        }
        Commands::Outline { file } => {
            let content = std::fs::read_to_string(&file)?;
            let sections = whorl_core::outline::sections(content.lines());
            match output_format {
                OutputFormat::Json => println!("{}", to_json(&sections, true)?),
                OutputFormat::Human => {
                    for section in &sections {
                        println!("{}:", section.header);
                        for item in &section.items {
                            match item {
                                ContentItem::Text(text) => println!("    {}", text),
                                ContentItem::Pair(key, value) => {
                                    println!("    {} = {}", key, value)
                                }
                            }
                        }
                    }
                }
            }
        }
        Commands::Server { domain } => {
            let domain = whorl_core::normalize_domain(&domain)?;
            let server = whorl_core::servers::whois_server_for(&domain)?;
            let grammar = Grammar::for_server(server);
            match output_format {
                OutputFormat::Json => println!(
                    "{}",
                    to_json(
                        &serde_json::json!({
                            "domain": domain,
                            "server": server,
                            "grammar": grammar,
                        }),
                        true
                    )?
                ),
                OutputFormat::Human => println!("{} {} ({:?})", domain, server, grammar),
            }
        }
    }

    Ok(())
}
