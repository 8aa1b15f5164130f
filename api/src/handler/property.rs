use crate::{
    extractor::AuthorizedUser,
    model::property::{
        BlockedDatesResponse, CreatePropertyRequest, CreatePropertyRequestWithOwnerId,
        PaginatedPropertyResponse, PropertyListQuery, PropertyResponse, UpdatePropertyRequest,
        UpdatePropertyRequestWithIds,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::PropertyId,
    property::event::DeleteProperty,
    reservation::blocked_dates,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_property(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreatePropertyRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if !user.is_owner() {
        return Err(AppError::ForbiddenOperation(
            "only owners may create listings".into(),
        ));
    }
    req.validate(&())?;

    let create = CreatePropertyRequestWithOwnerId::new(user.id(), req);
    let property_id = registry.property_repository().create(create.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "propertyId": property_id })),
    ))
}

pub async fn show_property_list(
    _user: AuthorizedUser,
    Query(query): Query<PropertyListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedPropertyResponse>> {
    query.validate(&())?;

    registry
        .property_repository()
        .find_all(query.into())
        .await
        .map(PaginatedPropertyResponse::from)
        .map(Json)
}

pub async fn show_property(
    _user: AuthorizedUser,
    Path(property_id): Path<PropertyId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PropertyResponse>> {
    registry
        .property_repository()
        .find_by_id(property_id)
        .await
        .and_then(|property| match property {
            Some(property) => Ok(Json(property.into())),
            None => Err(AppError::EntityNotFound("property not found".into())),
        })
}

pub async fn update_property(
    user: AuthorizedUser,
    Path(property_id): Path<PropertyId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdatePropertyRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update = UpdatePropertyRequestWithIds::new(property_id, user.id(), req);
    registry
        .property_repository()
        .update(update.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_property(
    user: AuthorizedUser,
    Path(property_id): Path<PropertyId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let delete = DeleteProperty {
        property_id,
        requested_user: user.id(),
    };
    registry
        .property_repository()
        .delete(delete)
        .await
        .map(|_| StatusCode::OK)
}

// The booking calendar asks for every date that is already taken;
// the set is rebuilt from the active reservations on demand.
pub async fn show_blocked_dates(
    _user: AuthorizedUser,
    Path(property_id): Path<PropertyId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BlockedDatesResponse>> {
    let reservations = registry
        .reservation_repository()
        .find_active_by_property_id(property_id)
        .await?;
    let dates = blocked_dates(reservations.iter());
    Ok(Json(BlockedDatesResponse::new(property_id, dates)))
}
