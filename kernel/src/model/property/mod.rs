use crate::model::{id::PropertyId, user::PropertyOwner};

pub mod event;

#[derive(Debug)]
pub struct Property {
    pub property_id: PropertyId,
    pub property_name: String,
    pub description: String,
    pub location: String,
    pub price_per_night: i64,
    pub deposit_amount: i64,
    pub max_guests: i32,
    pub amenities: Vec<String>,
    pub image_urls: Vec<String>,
    pub is_available: bool,
    pub owner: PropertyOwner,
}
