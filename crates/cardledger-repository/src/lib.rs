//! # Cardledger Repository
//!
//! Data access layer for Cardledger:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn CreditCardRepository>
//!      / Arc<dyn BalanceHistoryRepository>
//! MySql*Repository            (SQLx / MySQL implementations)
//!   ↓
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
