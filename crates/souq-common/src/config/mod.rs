//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BenefitConfig, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, ListingPolicyConfig, RateLimitConfig, ServerConfig, SnowflakeConfig,
};
