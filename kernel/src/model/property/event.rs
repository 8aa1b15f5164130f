use crate::model::id::{PropertyId, UserId};

pub struct CreateProperty {
    pub owner_id: UserId,
    pub property_name: String,
    pub description: String,
    pub location: String,
    pub price_per_night: i64,
    pub deposit_amount: i64,
    pub max_guests: i32,
    pub amenities: Vec<String>,
    pub image_urls: Vec<String>,
    pub is_available: bool,
}

#[derive(Debug)]
pub struct UpdateProperty {
    pub property_id: PropertyId,
    pub requested_user: UserId,
    pub property_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price_per_night: Option<i64>,
    pub deposit_amount: Option<i64>,
    pub max_guests: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub image_urls: Option<Vec<String>>,
    pub is_available: Option<bool>,
}

#[derive(Debug)]
pub struct DeleteProperty {
    pub property_id: PropertyId,
    pub requested_user: UserId,
}
