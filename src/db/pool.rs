use super::{Db, DbResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio_postgres::NoTls;

const MAX_POOL_SIZE: usize = 4;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);

/// Parses the database URL. A `connect_timeout` given in the URL wins over the default, so an
/// unreachable server fails the command instead of hanging it.
pub(crate) fn pg_config(url: &str) -> DbResult<tokio_postgres::Config> {
    let mut cfg = tokio_postgres::Config::from_str(url)?;
    if cfg.get_connect_timeout().is_none() {
        cfg.connect_timeout(DEFAULT_CONNECT_TIMEOUT);
    }
    Ok(cfg)
}

impl Db {
    pub fn new(url: &str) -> DbResult<Self> {
        let mgr = Manager::from_config(
            pg_config(url)?,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        // A single command run only ever checks out one client at a time
        let pool = Pool::builder(mgr)
            .max_size(MAX_POOL_SIZE)
            .wait_timeout(Some(CHECKOUT_TIMEOUT))
            .create_timeout(Some(CHECKOUT_TIMEOUT))
            .runtime(Runtime::Tokio1)
            .build()?;

        Ok(Self { pool })
    }

    /// Builds the pool and brings the schema up to date. The first connection is made here, so
    /// an unreachable server shows up as the error of this call.
    pub async fn connect(url: &str) -> DbResult<Arc<Self>> {
        let db = Self::new(url)?;
        db.init().await?;
        tracing::debug!("database ready");
        Ok(Arc::new(db))
    }
}
