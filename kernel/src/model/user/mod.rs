use crate::model::{id::UserId, role::Role};

pub mod event;

#[derive(Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

#[derive(Debug)]
pub struct PropertyOwner {
    pub owner_id: UserId,
    pub owner_name: String,
    pub email: String,
}

#[derive(Debug)]
pub struct ReservationClient {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

#[derive(Debug)]
pub struct ChatParty {
    pub user_id: UserId,
    pub user_name: String,
}

#[derive(Debug)]
pub struct ReviewClient {
    pub user_id: UserId,
    pub user_name: String,
}
