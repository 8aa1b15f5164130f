use std::collections::BTreeSet;

use chrono::NaiveDate;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{PropertyId, UserId},
    list::{PaginatedList, PropertyListOptions},
    property::{
        event::{CreateProperty, UpdateProperty},
        Property,
    },
    user::PropertyOwner,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    #[garde(length(min = 1))]
    pub property_name: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(length(min = 1))]
    pub location: String,
    #[garde(range(min = 1))]
    pub price_per_night: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub deposit_amount: i64,
    #[garde(range(min = 1))]
    pub max_guests: i32,
    #[garde(skip)]
    #[serde(default)]
    pub amenities: Vec<String>,
    #[garde(skip)]
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[garde(skip)]
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

#[derive(new)]
pub struct CreatePropertyRequestWithOwnerId(UserId, CreatePropertyRequest);

impl From<CreatePropertyRequestWithOwnerId> for CreateProperty {
    fn from(value: CreatePropertyRequestWithOwnerId) -> Self {
        let CreatePropertyRequestWithOwnerId(
            owner_id,
            CreatePropertyRequest {
                property_name,
                description,
                location,
                price_per_night,
                deposit_amount,
                max_guests,
                amenities,
                image_urls,
                is_available,
            },
        ) = value;
        CreateProperty {
            owner_id,
            property_name,
            description,
            location,
            price_per_night,
            deposit_amount,
            max_guests,
            amenities,
            image_urls,
            is_available,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequest {
    #[garde(inner(length(min = 1)))]
    pub property_name: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(inner(length(min = 1)))]
    pub location: Option<String>,
    #[garde(inner(range(min = 1)))]
    pub price_per_night: Option<i64>,
    #[garde(inner(range(min = 0)))]
    pub deposit_amount: Option<i64>,
    #[garde(inner(range(min = 1)))]
    pub max_guests: Option<i32>,
    #[garde(skip)]
    pub amenities: Option<Vec<String>>,
    #[garde(skip)]
    pub image_urls: Option<Vec<String>>,
    #[garde(skip)]
    pub is_available: Option<bool>,
}

#[derive(new)]
pub struct UpdatePropertyRequestWithIds(PropertyId, UserId, UpdatePropertyRequest);

impl From<UpdatePropertyRequestWithIds> for UpdateProperty {
    fn from(value: UpdatePropertyRequestWithIds) -> Self {
        let UpdatePropertyRequestWithIds(
            property_id,
            requested_user,
            UpdatePropertyRequest {
                property_name,
                description,
                location,
                price_per_night,
                deposit_amount,
                max_guests,
                amenities,
                image_urls,
                is_available,
            },
        ) = value;
        UpdateProperty {
            property_id,
            requested_user,
            property_name,
            description,
            location,
            price_per_night,
            deposit_amount,
            max_guests,
            amenities,
            image_urls,
            is_available,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListQuery {
    #[garde(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
    #[garde(skip)]
    pub available: Option<bool>,
}

const DEFAULT_LIMIT: i64 = 20;
const fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl From<PropertyListQuery> for PropertyListOptions {
    fn from(value: PropertyListQuery) -> Self {
        let PropertyListQuery {
            limit,
            offset,
            available,
        } = value;
        Self {
            limit,
            offset,
            available,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
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
    pub owner: PropertyOwnerResponse,
}

impl From<Property> for PropertyResponse {
    fn from(value: Property) -> Self {
        let Property {
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
            owner,
        } = value;
        Self {
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
            owner: owner.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOwnerResponse {
    pub owner_id: UserId,
    pub owner_name: String,
    pub email: String,
}

impl From<PropertyOwner> for PropertyOwnerResponse {
    fn from(value: PropertyOwner) -> Self {
        let PropertyOwner {
            owner_id,
            owner_name,
            email,
        } = value;
        Self {
            owner_id,
            owner_name,
            email,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedPropertyResponse {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<PropertyResponse>,
}

impl From<PaginatedList<Property>> for PaginatedPropertyResponse {
    fn from(value: PaginatedList<Property>) -> Self {
        let PaginatedList {
            total,
            limit,
            offset,
            items,
        } = value;
        Self {
            total,
            limit,
            offset,
            items: items.into_iter().map(PropertyResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedDatesResponse {
    pub property_id: PropertyId,
    pub dates: Vec<NaiveDate>,
}

impl BlockedDatesResponse {
    pub fn new(property_id: PropertyId, dates: BTreeSet<NaiveDate>) -> Self {
        Self {
            property_id,
            dates: dates.into_iter().collect(),
        }
    }
}
