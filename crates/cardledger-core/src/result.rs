//! Result type aliases for Cardledger.

use crate::LedgerError;

/// A specialized `Result` type for Cardledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// A boxed future returning a `LedgerResult`.
pub type BoxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = LedgerResult<T>> + Send + 'a>>;
