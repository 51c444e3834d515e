//! skald: stream a chat completion to stdout.
//!
//! Reads the API key from the environment (or a `.env` file), builds the
//! model factory, and prints the streamed completion for a single prompt.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use skald_llm::request;
use skald_llm::stream::StreamEvent;
use skald_models::ModelFactory;
use tokio_stream::StreamExt;

#[derive(Parser, Debug)]
#[command(name = "skald")]
#[command(about = "Stream a completion from the configured language model")]
struct Cli {
    /// Prompt text sent as the user message.
    prompt: String,

    /// Model identifier to request. Informational: the factory serves its
    /// pinned model.
    #[arg(long, env = "SKALD_MODEL", default_value = "deepseek-chat")]
    model: String,

    /// System prompt prepended to the conversation.
    #[arg(long)]
    system: Option<String>,

    /// Sampling temperature.
    #[arg(long)]
    temperature: Option<f32>,

    /// Cap on generated tokens.
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Print token usage to stderr after the completion.
    #[arg(long)]
    usage: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let factory = ModelFactory::from_env()?;
    let model = factory.create_model(&cli.model)?;

    let mut req = request();
    if let Some(system) = &cli.system {
        req.system(system);
    }
    req.user(&cli.prompt);
    if let Some(t) = cli.temperature {
        req.temperature(t);
    }
    if let Some(n) = cli.max_tokens {
        req.max_tokens(n);
    }

    let mut events = model.generate(req).events();
    let mut stdout = std::io::stdout();

    while let Some(event) = events.next().await {
        match event? {
            StreamEvent::TextDelta(delta) => {
                write!(stdout, "{delta}")?;
                stdout.flush()?;
            }
            // Reasoning stays off the transcript; it is visible via tracing.
            StreamEvent::ReasoningDelta(_) => {}
            StreamEvent::Finish { usage, .. } => {
                writeln!(stdout)?;
                if cli.usage
                    && let Some(usage) = usage
                {
                    eprintln!(
                        "tokens: {} in, {} out",
                        usage.input_tokens, usage.output_tokens
                    );
                }
            }
            StreamEvent::Error(message) => return Err(message.into()),
        }
    }

    Ok(())
}
