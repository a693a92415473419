//! User service implementation.

use crate::dto::{CreateUserRequest, UserListResponse, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use cardledger_core::{rules, LedgerError, LedgerResult, PageRequest, User, UserId, ValidateExt};
use cardledger_repository::UserRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// User service implementation.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, request: CreateUserRequest) -> LedgerResult<UserResponse> {
        debug!("Creating user: {}", request.email);

        request.validate_request()?;
        rules::not_blank(&request.name)
            .map_err(|_| LedgerError::validation("Name must not be blank"))?;

        if self.user_repository.exists_by_email(&request.email).await? {
            return Err(LedgerError::Conflict(format!(
                "Email '{}' already exists",
                request.email
            )));
        }

        let user = User::new(request.name, request.email);
        let saved_user = self.user_repository.save(&user).await?;

        info!("User created: {}", saved_user.id);
        Ok(UserResponse::from(saved_user))
    }

    async fn get_user(&self, id: UserId) -> LedgerResult<UserResponse> {
        debug!("Getting user: {}", id);

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| LedgerError::not_found("User", id))?;

        Ok(UserResponse::from(user))
    }

    async fn list_users(&self, page: PageRequest) -> LedgerResult<UserListResponse> {
        debug!("Listing users, page: {}, size: {}", page.page, page.size);

        let users = self.user_repository.find_all(page).await?;
        Ok(UserListResponse::from(users))
    }

    async fn delete_user(&self, id: UserId) -> LedgerResult<()> {
        debug!("Deleting user: {}", id);

        let deleted = self.user_repository.delete(id).await?;

        if !deleted {
            return Err(LedgerError::not_found("User", id));
        }

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}
