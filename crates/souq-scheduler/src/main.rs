//! Daily maintenance worker
//!
//! Runs the expiry and warning sweeps once per day at midnight UTC:
//! listing expiry, expiry warnings, subscription expiry, and renewal
//! warnings. Expiry is idempotent and warnings are deduplicated in the
//! database, so an extra run after a restart is harmless.
//!
//! Run with:
//! ```bash
//! cargo run -p souq-scheduler
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use souq_common::{try_init_tracing, AppConfig, JwtService};
use souq_core::SnowflakeGenerator;
use souq_db::{
    create_pool, DatabaseConfig, PgAuditLogRepository, PgFavoriteRepository, PgListingRepository,
    PgMediaRepository, PgNotificationRepository, PgPackageRepository, PgPaymentRepository,
    PgSubscriptionRepository, PgUserRepository,
};
use souq_service::{LogPushSender, ServiceContext, ServiceContextBuilder, SweeperService};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if !try_init_tracing() {
        eprintln!("Warning: tracing subscriber was already initialized");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Scheduler failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting Souq maintenance scheduler...");

    let config = AppConfig::from_env()?;
    let ctx = build_context(&config).await?;

    loop {
        let wait = until_next_midnight(Utc::now());
        info!(seconds = wait.as_secs(), "Sleeping until next sweep");
        tokio::time::sleep(wait).await;

        let now = Utc::now();
        let sweeper = SweeperService::new(&ctx);
        match sweeper.run(now).await {
            Ok(report) => info!(
                listings_expired = report.listings_expired,
                expiry_warnings_sent = report.expiry_warnings_sent,
                subscriptions_expired = report.subscriptions_expired,
                subscription_warnings_sent = report.subscription_warnings_sent,
                "Daily sweep completed"
            ),
            // Keep the loop alive; the next run picks up whatever was missed
            Err(e) => error!(error = %e, "Daily sweep failed"),
        }
    }
}

/// Wire the full service context from configuration
async fn build_context(config: &AppConfig) -> anyhow::Result<ServiceContext> {
    info!("Connecting to PostgreSQL...");
    let db_config = DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config).await?;
    info!("PostgreSQL connection established");

    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.token_expiry));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let ctx = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .listing_repo(Arc::new(PgListingRepository::new(pool.clone())))
        .media_repo(Arc::new(PgMediaRepository::new(pool.clone())))
        .favorite_repo(Arc::new(PgFavoriteRepository::new(pool.clone())))
        .payment_repo(Arc::new(PgPaymentRepository::new(pool.clone())))
        .subscription_repo(Arc::new(PgSubscriptionRepository::new(pool.clone())))
        .package_repo(Arc::new(PgPackageRepository::new(pool.clone())))
        .audit_log_repo(Arc::new(PgAuditLogRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool)))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .push_sender(Arc::new(LogPushSender))
        .listing_policy(config.listing_policy.clone())
        .benefit(config.benefit.clone())
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build service context: {e}"))?;

    Ok(ctx)
}

/// Duration until the next midnight UTC
fn until_next_midnight(now: DateTime<Utc>) -> Duration {
    let tomorrow = (now + chrono::Duration::days(1)).date_naive();
    let next = tomorrow.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    (next - now).to_std().unwrap_or(Duration::from_secs(60))
}
