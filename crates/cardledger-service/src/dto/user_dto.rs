//! User-related DTOs.

use cardledger_core::{Page, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// User response DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// User list response with pagination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<Page<User>> for UserListResponse {
    fn from(page: Page<User>) -> Self {
        Self {
            page: page.info.page,
            size: page.info.size,
            total_elements: page.info.total_elements,
            total_pages: page.info.total_pages,
            users: page.content.into_iter().map(UserResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_user_request_valid() {
        let request = CreateUserRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_user_request_invalid_email() {
        let request = CreateUserRequest {
            name: "Jane Doe".to_string(),
            email: "not-an-email".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_user_request_blank_name() {
        let request = CreateUserRequest {
            name: String::new(),
            email: "jane@example.com".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_user_response_from_user() {
        let user = User::new("Jane".to_string(), "jane@example.com".to_string());
        let response: UserResponse = user.clone().into();

        assert_eq!(response.id, user.id);
        assert_eq!(response.name, user.name);
        assert_eq!(response.email, user.email);
    }

    #[test]
    fn test_user_list_response_from_page() {
        let users = vec![
            User::new("A".to_string(), "a@example.com".to_string()),
            User::new("B".to_string(), "b@example.com".to_string()),
        ];
        let page = Page::new(users, 0, 20, 2);
        let response = UserListResponse::from(page);

        assert_eq!(response.users.len(), 2);
        assert_eq!(response.total_elements, 2);
        assert_eq!(response.total_pages, 1);
    }

    #[test]
    fn test_dto_serialization() {
        let request = CreateUserRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
        };

        let json = serde_json::to_string(&request).unwrap();
        let parsed: CreateUserRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.name, request.name);
        assert_eq!(parsed.email, request.email);
    }
}
