//! Shopping assistant CLI - main entry point.
//!
//! One invocation runs one conversational turn: read a query, drive the
//! remote run to completion (executing catalog functions locally when
//! requested), and print the assistant's reply. The conversation thread
//! persists across invocations.

mod config;
mod driver;
mod error;
mod session;

use crate::config::Config;
use crate::driver::{DriverError, RunDriver};
use crate::error::AppResult;
use anyhow::Context;
use assistants_client::{
    AssistantsClient, CreateAssistantRequest, FunctionDefinitionApi, ToolDefinition,
};
use catalog::Catalog;
use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::watch;
use tools::{builtin, ToolExecutor, ToolRegistry};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    init_logging(&config.bot.log_level);

    info!("Starting shopping assistant...");

    let catalog = Arc::new(Catalog::seed());
    let registry = Arc::new(builtin::full_registry(catalog.clone()));
    let executor = Arc::new(ToolExecutor::new(registry.clone()));
    info!(
        functions = registry.len(),
        products = catalog.len(),
        "Catalog functions registered"
    );

    let client = Arc::new(
        AssistantsClient::new(
            &config.openai.api_key,
            &config.openai.base_url,
            config.openai.timeout,
        )
        .context("Failed to create assistant service client")?,
    );

    let assistant_id = resolve_assistant(&client, &registry, &config).await?;
    let thread_id = session::resolve_thread(&client, Path::new(&config.bot.thread_file)).await?;

    print!("Enter your query: ");
    std::io::stdout().flush()?;
    let mut query = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut query)
        .await?;
    let query = query.trim();
    if query.is_empty() {
        println!("Nothing to ask.");
        return Ok(());
    }

    // Ctrl-C raises the cancellation signal; the driver stops polling and
    // reports a cancelled outcome instead of submitting further outputs.
    let (cancel_tx, mut cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let driver = RunDriver::new(client, executor, &config.run);
    match driver
        .run_turn(&thread_id, &assistant_id, query, &mut cancel_rx)
        .await
    {
        Ok(reply) => {
            println!("\n{}", reply);
            Ok(())
        }
        Err(DriverError::Cancelled) => {
            println!("\nRun cancelled.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Use the configured assistant, or register a new one advertising the
/// current function set. Only the thread id is persisted, so the fresh
/// assistant id is logged for the operator to pin in the environment.
async fn resolve_assistant(
    client: &AssistantsClient,
    registry: &ToolRegistry,
    config: &Config,
) -> AppResult<String> {
    if let Some(id) = &config.openai.assistant_id {
        let assistant = client.retrieve_assistant(id).await?;
        info!(assistant_id = %assistant.id, model = %assistant.model, "Using configured assistant");
        return Ok(assistant.id);
    }

    let request = CreateAssistantRequest {
        model: config.openai.model.clone(),
        name: "ShopBot".into(),
        instructions: config.bot.instructions.clone(),
        tools: advertised_tools(registry),
    };
    let assistant = client.create_assistant(&request).await?;
    info!(
        assistant_id = %assistant.id,
        "Registered new assistant; set OPENAI__ASSISTANT_ID to reuse it"
    );
    Ok(assistant.id)
}

/// The registry's definitions in the service's wire shape. Advertisement and
/// dispatch share one source, so the two cannot disagree.
fn advertised_tools(registry: &ToolRegistry) -> Vec<ToolDefinition> {
    registry
        .definitions()
        .into_iter()
        .map(|def| ToolDefinition {
            tool_type: def.tool_type,
            function: FunctionDefinitionApi {
                name: def.function.name,
                description: def.function.description,
                parameters: def.function.parameters,
            },
        })
        .collect()
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
