//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Remote assistant service configuration
    pub openai: OpenAiConfig,

    /// Run polling configuration
    #[serde(default)]
    pub run: RunConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API key
    pub api_key: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used when registering a new assistant
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Existing assistant to drive; when unset, one is registered at startup
    #[serde(default)]
    pub assistant_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Initial delay between run status polls
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Cap for the exponential poll backoff
    #[serde(default = "default_max_poll_interval", with = "humantime_serde")]
    pub max_poll_interval: Duration,

    /// Overall deadline for one run to complete
    #[serde(default = "default_max_wait", with = "humantime_serde")]
    pub max_wait: Duration,

    /// Consecutive transient poll failures tolerated before giving up
    #[serde(default = "default_max_transient_failures")]
    pub max_transient_failures: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Instructions used when registering a new assistant
    #[serde(default = "default_instructions")]
    pub instructions: String,

    /// File holding the persisted conversation-thread id
    #[serde(default = "default_thread_file")]
    pub thread_file: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
            max_poll_interval: default_max_poll_interval(),
            max_wait: default_max_wait(),
            max_transient_failures: default_max_transient_failures(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            instructions: default_instructions(),
            thread_file: default_thread_file(),
            log_level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_model() -> String {
    "gpt-4o".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_max_poll_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_max_wait() -> Duration {
    Duration::from_secs(120)
}

fn default_max_transient_failures() -> u32 {
    3
}

fn default_instructions() -> String {
    r#"You are an AI assistant for an e-commerce platform, helping shoppers with a small product catalog.

## Available functions
Answer catalog questions with the provided functions rather than guessing:
- get_product_info / get_product_price / check_stock for a single product by name
- get_all_products / get_products_in_stock / count_available_products for listings
- find_closest_product when the user's phrasing does not match a name exactly
- filter_products_by_price_range for budget questions
- get_recommendations for similar products (the list may be empty)

## Guidelines
- Be concise and factual; never invent products, prices, or stock levels
- If a lookup reports that a product was not found, say so and suggest find_closest_product
- Prices are in USD"#
        .into()
}

fn default_thread_file() -> String {
    "thread_id.txt".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Keep strings as strings; ids and keys must not be
                    // parsed as numbers.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
