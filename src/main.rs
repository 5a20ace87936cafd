use std::io::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, warn};

use fi_mcp_probe::{
    pretty, read_local, resolve, tools, AttemptOutcome, McpStream, ProbeClient, Result, Session,
    ToolCallRequest, TEST_PHONE_NUMBERS,
};

/// Probe client for the Fi money MCP dev server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server address (host:port)
    #[arg(long, default_value = "localhost:8080")]
    server: String,

    /// Opaque session identifier sent at login and with every call
    #[arg(long, default_value = "probe_session_1")]
    session_id: String,

    /// Test phone number credential
    #[arg(long, default_value = "1111111111")]
    phone_number: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the server's response
    Login,
    /// Log in, then try every candidate encoding for one tool call
    Probe {
        /// Tool to invoke (name or menu number)
        #[arg(default_value = "fetch_net_worth")]
        tool: String,
    },
    /// Log in and drive tool calls over the streaming WebSocket
    Stream,
    /// Serve tool replies from the local test data directory
    Local {
        /// Test data directory
        #[arg(long, default_value = "test_data_dir")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    if let Err(e) = run(cli).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    print_phone_numbers();
    let session = Session::new(cli.session_id, cli.phone_number);

    match cli.command {
        Command::Login => {
            let mut client = ProbeClient::new(&cli.server, session);
            let body = client.login().await?;
            println!("\nLogin completed with status: 200 OK");
            if !body.is_empty() {
                println!("Response Body: {body}");
            }
            println!(
                "\nNow try tool calls with `fi-mcp-probe probe` using session id '{}'",
                client.session().session_id()
            );
        }

        Command::Probe { tool } => {
            let name = resolve(&tool)?;
            let mut client = ProbeClient::new(&cli.server, session);
            client.login().await?;
            println!("Login successful!");

            let attempts = client.probe_tool(&ToolCallRequest::new(name)).await?;
            for attempt in &attempts {
                println!("\n--- candidate: {} ---", attempt.candidate);
                match &attempt.outcome {
                    AttemptOutcome::Reply { status, body } => {
                        println!("Status: {status}");
                        println!("Response: {body}");
                    }
                    AttemptOutcome::Failed(e) => println!("Error: {e}"),
                }
            }
        }

        Command::Stream => {
            let mut client = ProbeClient::new(&cli.server, session);
            client.login().await?;
            println!("Login successful!");

            let session_id = client.session().session_id().to_string();
            let mut stream = McpStream::connect(&cli.server, &session_id).await?;

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            print_menu();
            loop {
                prompt()?;
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        println!("\nInterrupted, closing connection...");
                        stream.close().await?;
                        break;
                    }
                    line = lines.next_line() => {
                        let Some(line) = line? else {
                            stream.close().await?;
                            break;
                        };
                        let input = line.trim();
                        if input.is_empty() {
                            continue;
                        }
                        if input == "exit" {
                            stream.close().await?;
                            break;
                        }
                        match resolve(input) {
                            Ok(name) => {
                                if let Err(e) = stream.call_tool(&ToolCallRequest::new(name)).await {
                                    warn!(error = %e, "tool call failed");
                                }
                            }
                            Err(e) => println!("{e}"),
                        }
                    }
                }
            }
        }

        Command::Local { data_dir } => {
            let mut client = ProbeClient::new(&cli.server, session);
            client.login().await?;
            println!("Login successful!");

            let phone_number = client.session().phone_number().to_string();
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            print_menu();
            loop {
                prompt()?;
                let Some(line) = lines.next_line().await? else {
                    break;
                };
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if input == "exit" {
                    break;
                }
                let name = match resolve(input) {
                    Ok(name) => name,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                match read_local(&data_dir, &phone_number, name) {
                    Ok(bytes) => {
                        let text = String::from_utf8_lossy(&bytes);
                        println!("Response:\n{}", pretty(&text));
                    }
                    Err(e) => println!("Error: {e}"),
                }
            }
        }
    }

    Ok(())
}

fn print_phone_numbers() {
    println!("Available test phone numbers:");
    for (i, number) in TEST_PHONE_NUMBERS.iter().enumerate() {
        println!("{}. {}", i + 1, number);
    }
}

fn print_menu() {
    println!("\nAvailable commands:");
    for (i, def) in tools().iter().enumerate() {
        println!("{}. {}", i + 1, def.name);
    }
    println!("Type 'exit' to quit");
}

fn prompt() -> Result<()> {
    print!("\n> ");
    std::io::stdout().flush()?;
    Ok(())
}
