//! Postgres harness backed by testcontainers.
//!
//! One container is shared across the test binary; migrations run once.

use anyhow::{Context, Result};
use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

pub struct TestHarness {
    pub db_pool: PgPool,
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;
        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;
        Ok(Self { db_pool })
    }
}
