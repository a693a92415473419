//! User service trait definition.

use crate::dto::{CreateUserRequest, UserListResponse, UserResponse};
use async_trait::async_trait;
use cardledger_core::{Interface, LedgerResult, PageRequest, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, request: CreateUserRequest) -> LedgerResult<UserResponse>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> LedgerResult<UserResponse>;

    /// Lists all users with pagination.
    async fn list_users(&self, page: PageRequest) -> LedgerResult<UserListResponse>;

    /// Deletes a user and, via storage cascade, their cards and histories.
    async fn delete_user(&self, id: UserId) -> LedgerResult<()>;
}
