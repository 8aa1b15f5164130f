use kernel::model::{
    id::{PropertyId, UserId},
    property::Property,
    user::PropertyOwner,
};

#[derive(sqlx::FromRow)]
pub struct PropertyRow {
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
    pub owner_id: UserId,
    pub owner_name: String,
    pub owner_email: String,
}

impl From<PropertyRow> for Property {
    fn from(value: PropertyRow) -> Self {
        let PropertyRow {
            property_id,
            property_name,
            description,
            location,
            price_per_night,
            deposit_amount,
            max_guests,
            amenities,
            image_urls,
            is_available,
            owner_id,
            owner_name,
            owner_email,
        } = value;
        Property {
            property_id,
            property_name,
            description,
            location,
            price_per_night,
            deposit_amount,
            max_guests,
            amenities,
            image_urls,
            is_available,
            owner: PropertyOwner {
                owner_id,
                owner_name,
                email: owner_email,
            },
        }
    }
}
