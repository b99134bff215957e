//! Application configuration management.

use serde::Deserialize;

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Idempotency guard configuration.
    #[serde(default)]
    pub idempotency: IdempotencyConfig,
    /// Chart-of-accounts codes the engines post against.
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Idempotency guard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IdempotencyConfig {
    /// Trailing window (seconds) in which a keyless request is treated as a
    /// replay of a matching earlier one.
    #[serde(default = "default_replay_window_secs")]
    pub replay_window_secs: i64,
    /// Maximum stored length of a caller-supplied idempotency key.
    #[serde(default = "default_key_max_len")]
    pub key_max_len: usize,
}

fn default_replay_window_secs() -> i64 {
    10
}

fn default_key_max_len() -> usize {
    64
}

impl Default for IdempotencyConfig {
    fn default() -> Self {
        Self {
            replay_window_secs: default_replay_window_secs(),
            key_max_len: default_key_max_len(),
        }
    }
}

/// Well-known account codes used by the posting flows.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    /// Cash on hand (asset).
    #[serde(default = "default_cash")]
    pub cash: String,
    /// Bank account (asset).
    #[serde(default = "default_bank")]
    pub bank: String,
    /// Accounts receivable (asset).
    #[serde(default = "default_accounts_receivable")]
    pub accounts_receivable: String,
    /// Fee revenue (revenue).
    #[serde(default = "default_fee_revenue")]
    pub fee_revenue: String,
    /// Student credit balances (liability).
    #[serde(default = "default_student_credit")]
    pub student_credit: String,
}

fn default_cash() -> String {
    "1000".to_string()
}

fn default_bank() -> String {
    "1010".to_string()
}

fn default_accounts_receivable() -> String {
    "1100".to_string()
}

fn default_fee_revenue() -> String {
    "4000".to_string()
}

fn default_student_credit() -> String {
    "2100".to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            cash: default_cash(),
            bank: default_bank(),
            accounts_receivable: default_accounts_receivable(),
            fee_revenue: default_fee_revenue(),
            student_credit: default_student_credit(),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            idempotency: IdempotencyConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from config files and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BURSAR").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
