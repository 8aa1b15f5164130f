use crate::model::{
    id::PropertyId,
    list::{PaginatedList, PropertyListOptions},
    property::{
        event::{CreateProperty, DeleteProperty, UpdateProperty},
        Property,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, event: CreateProperty) -> AppResult<PropertyId>;
    async fn find_all(&self, options: PropertyListOptions) -> AppResult<PaginatedList<Property>>;
    async fn find_by_id(&self, property_id: PropertyId) -> AppResult<Option<Property>>;
    async fn update(&self, event: UpdateProperty) -> AppResult<()>;
    async fn delete(&self, event: DeleteProperty) -> AppResult<()>;
}
