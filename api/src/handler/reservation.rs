use crate::{
    extractor::AuthorizedUser,
    model::reservation::{
        CreateReservationRequest, ReservationResponse, ReservationsResponse,
        UpdateReservationStatusRequest,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::{PropertyId, ReservationId},
    reservation::event::{CreateReservation, ReleaseDeposit, UpdateReservationStatus},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn reserve_property(
    user: AuthorizedUser,
    Path(property_id): Path<PropertyId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if !user.is_client() {
        return Err(AppError::ForbiddenOperation(
            "only clients may book listings".into(),
        ));
    }
    req.validate(&())?;

    let create = CreateReservation::new(
        property_id,
        user.id(),
        req.check_in,
        req.check_out,
        req.guest_count,
    );
    let reservation_id = registry.reservation_repository().create(create).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "reservationId": reservation_id })),
    ))
}

// Clients see their own bookings, owners the bookings on their listings.
pub async fn show_reservation_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    let reservations = if user.is_owner() {
        registry
            .reservation_repository()
            .find_by_owner_id(user.id())
            .await?
    } else {
        registry
            .reservation_repository()
            .find_by_client_id(user.id())
            .await?
    };
    Ok(Json(reservations.into()))
}

pub async fn show_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("reservation not found".into()))?;

    if !reservation.is_party(user.id()) {
        return Err(AppError::ForbiddenOperation(
            "only the booking parties may view this reservation".into(),
        ));
    }
    Ok(Json(reservation.into()))
}

pub async fn update_reservation_status(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationStatusRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update = UpdateReservationStatus::new(reservation_id, user.id(), req.status);
    registry
        .reservation_repository()
        .update_status(update)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn release_deposit(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let release = ReleaseDeposit::new(reservation_id, user.id());
    registry
        .reservation_repository()
        .release_deposit(release)
        .await
        .map(|_| StatusCode::OK)
}
