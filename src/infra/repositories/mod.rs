pub mod sqlite_member_repo;
pub mod sqlite_entry_repo;
pub mod sqlite_payment_repo;
pub mod sqlite_promo_repo;
pub mod sqlite_auth_repo;

pub mod postgres_member_repo;
pub mod postgres_entry_repo;
pub mod postgres_payment_repo;
pub mod postgres_promo_repo;
pub mod postgres_auth_repo;
