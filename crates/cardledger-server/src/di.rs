//! Dependency injection module using Shaku.

use cardledger_config::DatabaseConfig;
use cardledger_core::{module, LedgerResult};
use cardledger_repository::{
    DatabasePool, DatabasePoolParameters, MySqlBalanceHistoryRepository, MySqlCreditCardRepository,
    MySqlUserRepository,
};
use cardledger_service::{CardServiceImpl, UserServiceImpl};
use std::sync::Arc;

// Application module wiring the full stack:
// - Database pool and MySQL repositories
// - Business services (user, card)
module! {
    pub AppModule {
        components = [
            DatabasePool,
            MySqlUserRepository,
            MySqlCreditCardRepository,
            MySqlBalanceHistoryRepository,
            UserServiceImpl,
            CardServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the application module with all dependencies.
pub async fn build_module(db_config: &DatabaseConfig) -> LedgerResult<Arc<AppModule>> {
    // Create database pool (async operation)
    let db_pool = DatabasePool::connect(db_config).await?;

    // Build the module with parameters
    let module = AppModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .build();

    Ok(Arc::new(module))
}
