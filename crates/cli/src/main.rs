use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use translateai_agents::TranslatorAgent;
use translateai_core::{normalize_text, TranslationResponse, DEFAULT_TARGET_LANGUAGE};
use translateai_ml::load_scorer;
use translateai_observability::{init_tracing, AppMetrics};
use translateai_translation::{build_provider, ProviderKind, DEFAULT_GOOGLE_ENDPOINT};

#[derive(Debug, Parser)]
#[command(name = "translateai")]
#[command(about = "TranslateAI text cleaning, sentiment and translation CLI")]
struct Cli {
    #[arg(long, env = "TRANSLATEAI_SENTIMENT_LEXICON")]
    lexicon: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the normalized form of TEXT.
    Clean { text: String },
    /// Print the sentiment polarity of TEXT after normalization.
    Score { text: String },
    /// Run the full pipeline and print the response JSON.
    Translate {
        text: String,
        #[command(flatten)]
        provider: ProviderArgs,
    },
    /// Read lines from stdin and translate each one.
    Interactive {
        #[command(flatten)]
        provider: ProviderArgs,
    },
}

#[derive(Debug, clap::Args)]
struct ProviderArgs {
    #[arg(long, default_value = DEFAULT_TARGET_LANGUAGE)]
    target: String,
    #[arg(long, env = "TRANSLATEAI_PROVIDER", default_value = "google")]
    provider: String,
    #[arg(long, env = "TRANSLATEAI_PROVIDER_URL", default_value = DEFAULT_GOOGLE_ENDPOINT)]
    provider_url: String,
    #[arg(long, env = "TRANSLATEAI_PROVIDER_TIMEOUT_SECONDS", default_value_t = 8)]
    timeout_seconds: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("translateai_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Clean { text } => println!("{}", normalize_text(&text)),
        Command::Score { text } => {
            let scorer = load_scorer(cli.lexicon.as_deref());
            println!("{}", scorer.score(&normalize_text(&text)));
        }
        Command::Translate { text, provider } => {
            let agent = build_agent(cli.lexicon.as_deref(), &provider)?;
            let result = agent.run_inference(&text, &provider.target).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&TranslationResponse::from(result))?
            );
        }
        Command::Interactive { provider } => {
            let agent = build_agent(cli.lexicon.as_deref(), &provider)?;
            run_interactive(agent, &provider.target).await?;
        }
    }

    Ok(())
}

async fn run_interactive(agent: TranslatorAgent, target: &str) -> Result<()> {
    println!("TranslateAI interactive mode ({target}). type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }
        if message.is_empty() {
            continue;
        }

        let result = agent.run_inference(message, target).await;
        println!("{}", result.translation);
        println!("  sentiment: {:+.3}\n", result.sentiment_score);
    }

    Ok(())
}

fn build_agent(lexicon: Option<&std::path::Path>, args: &ProviderArgs) -> Result<TranslatorAgent> {
    let kind = args
        .provider
        .parse::<ProviderKind>()
        .context("invalid --provider value")?;
    let timeout = Duration::from_secs(args.timeout_seconds.max(1));
    let provider = build_provider(kind, &args.provider_url, timeout)?;

    Ok(
        TranslatorAgent::new(load_scorer(lexicon), provider, AppMetrics::shared())
            .with_provider_timeout(timeout),
    )
}
