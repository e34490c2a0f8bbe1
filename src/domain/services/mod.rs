pub mod auth_service;
pub mod membership;
pub mod phone;
pub mod reminder;
