pub mod auth;
pub mod health;
pub mod message;
pub mod property;
pub mod reservation;
pub mod review;
pub mod transaction;
pub mod user;
