pub mod admin;
pub mod auth;
pub mod checkin;
pub mod health;
pub mod member;
pub mod payment;
pub mod promo;
