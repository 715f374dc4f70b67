use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub site: SiteConfig,
    pub payment: PaymentConfig,
    pub booking_rules: BookingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Origin the payment provider redirects back to, without trailing slash.
    pub origin: String,
    pub default_locale: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    pub publishable_key: String,
    /// Hosted page URL template; `{CHECKOUT_SESSION_ID}` is substituted with
    /// the real session id.
    pub hosted_page_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    /// How long the backend honors a preBookCode. Stated contract is ~30 minutes.
    pub prebook_lock_seconds: u64,
    #[serde(default = "default_expiry_warning")]
    pub expiry_warning_seconds: u64,
    #[serde(default = "default_customer_country")]
    pub customer_country: String,
}

fn default_expiry_warning() -> u64 {
    300
}

fn default_customer_country() -> String {
    "US".to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file that shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of VOYRA)
            // Eg. `VOYRA__API__BASE_URL=...` would set `api.base_url`
            .add_source(config::Environment::with_prefix("VOYRA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
