//! Service implementations.

mod card_service_impl;
mod user_service_impl;

pub use card_service_impl::CardServiceImpl;
pub use user_service_impl::UserServiceImpl;
