pub mod auth;
pub mod id;
pub mod list;
pub mod message;
pub mod property;
pub mod reservation;
pub mod review;
pub mod role;
pub mod transaction;
pub mod user;
