//! Application configuration structs
//!
//! Loads configuration from environment variables and config files.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub listing_policy: ListingPolicyConfig,
    pub benefit: BenefitConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_token_expiry")]
    pub token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Listing lifecycle policy knobs
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPolicyConfig {
    /// Minimum image count required before a car listing can be submitted
    #[serde(default = "default_min_images_for_car")]
    pub min_images_for_car: i64,
    /// When true, car listings require a paid LISTING_FEE before submission
    #[serde(default)]
    pub require_payment_for_car_listing: bool,
    /// Flat listing fee, in fils
    #[serde(default = "default_listing_fee_fils")]
    pub listing_fee_fils: i64,
    /// Days an approved listing stays live before expiring
    #[serde(default = "default_listing_lifetime_days")]
    pub listing_lifetime_days: i64,
    /// Day-of-life at which expiry warnings begin
    #[serde(default = "default_expiry_warning_start_days")]
    pub expiry_warning_start_days: i64,
    /// Days between successive expiry warnings
    #[serde(default = "default_expiry_warning_interval_days")]
    pub expiry_warning_interval_days: i64,
    /// Days before subscription end at which the renewal warning fires
    #[serde(default = "default_subscription_warning_days")]
    pub subscription_warning_days: i64,
}

impl Default for ListingPolicyConfig {
    fn default() -> Self {
        Self {
            min_images_for_car: default_min_images_for_car(),
            require_payment_for_car_listing: false,
            listing_fee_fils: default_listing_fee_fils(),
            listing_lifetime_days: default_listing_lifetime_days(),
            expiry_warning_start_days: default_expiry_warning_start_days(),
            expiry_warning_interval_days: default_expiry_warning_interval_days(),
            subscription_warning_days: default_subscription_warning_days(),
        }
    }
}

/// Bank transfer details shown to payers
#[derive(Debug, Clone, Deserialize)]
pub struct BenefitConfig {
    pub iban: String,
    pub account_name: String,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "souq-backend".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_token_expiry() -> i64 {
    86400 // 24 hours
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_min_images_for_car() -> i64 {
    3
}

fn default_listing_fee_fils() -> i64 {
    3000 // 3 BHD
}

fn default_listing_lifetime_days() -> i64 {
    35
}

fn default_expiry_warning_start_days() -> i64 {
    20
}

fn default_expiry_warning_interval_days() -> i64 {
    5
}

fn default_subscription_warning_days() -> i64 {
    3
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("API_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?,
                token_expiry: env::var("JWT_TOKEN_EXPIRY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_token_expiry),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: env::var("RATE_LIMIT_REQUESTS_PER_SECOND")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_requests_per_second),
                burst: env::var("RATE_LIMIT_BURST")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            listing_policy: ListingPolicyConfig {
                min_images_for_car: env::var("MIN_IMAGES_FOR_CAR")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_images_for_car),
                require_payment_for_car_listing: env::var("REQUIRE_PAYMENT_FOR_CAR_LISTING")
                    .ok()
                    .map(|s| s == "true" || s == "1")
                    .unwrap_or(false),
                listing_fee_fils: env::var("LISTING_FEE_FILS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_listing_fee_fils),
                listing_lifetime_days: env::var("LISTING_LIFETIME_DAYS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_listing_lifetime_days),
                expiry_warning_start_days: env::var("EXPIRY_WARNING_START_DAYS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_expiry_warning_start_days),
                expiry_warning_interval_days: env::var("EXPIRY_WARNING_INTERVAL_DAYS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_expiry_warning_interval_days),
                subscription_warning_days: env::var("SUBSCRIPTION_WARNING_DAYS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_subscription_warning_days),
            },
            benefit: BenefitConfig {
                iban: env::var("BENEFIT_IBAN").map_err(|_| ConfigError::MissingVar("BENEFIT_IBAN"))?,
                account_name: env::var("BENEFIT_ACCOUNT_NAME")
                    .map_err(|_| ConfigError::MissingVar("BENEFIT_ACCOUNT_NAME"))?,
            },
            snowflake: SnowflakeConfig {
                worker_id: env::var("WORKER_ID")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
