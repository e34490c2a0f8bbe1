pub mod auth;
pub mod entry;
pub mod member;
pub mod payment;
pub mod plan;
pub mod promo;
