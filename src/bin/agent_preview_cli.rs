//! agent-preview-cli - send prompts to the agent builder backend from a terminal
//!
//! Usage:
//!   agent-preview-cli send --email <email> [--base-url <url>] <prompt...>
//!   agent-preview-cli send-csv --email <email> --csv <path> [--base-url <url>] <prompt...>
//!   agent-preview-cli check-email <email>
//!   agent-preview-cli check-prompt <prompt...>

use agent_preview_client::validation::validate_submission;
use agent_preview_client::{
    is_valid_email, is_valid_prompt, CsvAttachment, PromptClient, PromptClientBuilder,
    PromptResponse, MAX_PROMPT_CHARS,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "send" => cmd_send(&args[2..]).await,
        "send-csv" => cmd_send_csv(&args[2..]).await,
        "check-email" => cmd_check_email(&args[2..]),
        "check-prompt" => cmd_check_prompt(&args[2..]),
        "version" | "--version" | "-V" => cmd_version(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"agent-preview-cli - agent builder prompt client

USAGE:
    agent-preview-cli <COMMAND> [OPTIONS]

COMMANDS:
    send --email <email> [--base-url <url>] <prompt...>
                                Send a prompt and print the agent reply
    send-csv --email <email> --csv <path> [--base-url <url>] <prompt...>
                                Send a prompt with a CSV file as context
    check-email <email>         Check an email address locally
    check-prompt <prompt...>    Check a prompt locally
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    AGENT_PREVIEW_BASE_URL            Backend base URL (default http://localhost:8080)
    AGENT_PREVIEW_HTTP_TIMEOUT_SECS   Request timeout in seconds (default: none)
    AGENT_PREVIEW_PROXY_URL           Proxy for all requests
    RUST_LOG                          Log filter, e.g. agent_preview_client=debug"#
    );
}

fn cmd_version() {
    println!("agent-preview-cli {}", env!("CARGO_PKG_VERSION"));
}

/// Flags and positional words of a send command.
#[derive(Debug, Default)]
struct SendArgs {
    email: Option<String>,
    base_url: Option<String>,
    csv: Option<PathBuf>,
    prompt: Vec<String>,
}

fn parse_send_args(args: &[String]) -> SendArgs {
    let mut parsed = SendArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--email" => parsed.email = iter.next().cloned(),
            "--base-url" => parsed.base_url = iter.next().cloned(),
            "--csv" => parsed.csv = iter.next().map(PathBuf::from),
            _ => parsed.prompt.push(arg.clone()),
        }
    }
    parsed
}

fn build_client(base_url: Option<&str>) -> PromptClient {
    let mut builder = PromptClientBuilder::from_env();
    if let Some(url) = base_url {
        builder = builder.base_url(url);
    }
    builder.build().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

/// Runs the same local checks as the chat preview, exiting on the first failure.
fn checked_submission(parsed: &SendArgs) -> (String, String) {
    let prompt = parsed.prompt.join(" ");
    let email = parsed.email.clone().unwrap_or_default();
    if let Err(e) = validate_submission(&prompt, &email) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    (prompt, email)
}

fn print_reply(result: agent_preview_client::Result<PromptResponse>) {
    match result {
        Ok(reply) => {
            println!("{}", reply.content_or_empty());
            println!();
            println!(
                "  id: {}  model: {}  created: {}",
                reply.id.as_deref().unwrap_or("-"),
                reply.model_id.as_deref().unwrap_or("-"),
                reply
                    .created_at
                    .as_ref()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn cmd_send(args: &[String]) {
    let parsed = parse_send_args(args);
    let (prompt, email) = checked_submission(&parsed);
    let client = build_client(parsed.base_url.as_deref());
    print_reply(client.send_prompt(&prompt, &email).await);
}

async fn cmd_send_csv(args: &[String]) {
    let parsed = parse_send_args(args);
    let Some(path) = parsed.csv.clone() else {
        eprintln!("Usage: agent-preview-cli send-csv --email <email> --csv <path> <prompt...>");
        std::process::exit(1);
    };
    let (prompt, email) = checked_submission(&parsed);

    let bytes = std::fs::read(&path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {e}", path.display());
        std::process::exit(1);
    });
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data.csv".to_string());

    let client = build_client(parsed.base_url.as_deref());
    print_reply(
        client
            .send_prompt_with_csv(&prompt, &email, CsvAttachment::new(file_name, bytes))
            .await,
    );
}

fn cmd_check_email(args: &[String]) {
    let Some(email) = args.first() else {
        eprintln!("Usage: agent-preview-cli check-email <email>");
        std::process::exit(1);
    };
    if is_valid_email(email) {
        println!("valid");
    } else {
        println!("invalid");
        std::process::exit(1);
    }
}

fn cmd_check_prompt(args: &[String]) {
    let prompt = args.join(" ");
    let len = prompt.trim().chars().count();
    if is_valid_prompt(&prompt) {
        println!("valid ({len}/{MAX_PROMPT_CHARS} characters)");
    } else {
        println!("invalid ({len} characters, expected 1..={MAX_PROMPT_CHARS})");
        std::process::exit(1);
    }
}
