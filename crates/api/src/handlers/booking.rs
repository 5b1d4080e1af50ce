//! Booking handlers: seat reservation, listing, ticket detail, and
//! cancellation, plus the nested payments sub-resource.
//!
//! Seat conflicts are resolved by the database: the unique constraint on
//! (schedule_id, seat_label) is the final arbiter, so two concurrent
//! requests for the same seat can never both succeed regardless of what
//! the pre-checks here observed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vexe_core::booking as booking_rules;
use vexe_core::error::CoreError;
use vexe_core::localtime::{format_local, FormatPattern};
use vexe_core::pagination::{clamp_limit, clamp_offset};
use vexe_core::schedule as schedule_rules;
use vexe_core::seating::is_valid_seat_label;
use vexe_core::types::{DbId, StatusId, Timestamp};
use vexe_db::models::booking::{Booking, CreateBooking};
use vexe_db::models::payment::{CreatePayment, CreatePaymentRequest, Payment, PAYMENT_METHODS};
use vexe_db::models::status::PaymentStatus;
use vexe_db::repositories::{BookingRepo, PaymentRepo, ScheduleRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /bookings`.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub schedule_id: DbId,
    pub seat_labels: Vec<String>,
}

/// Query parameters for `GET /bookings`.
#[derive(Debug, Deserialize)]
pub struct BookingListParams {
    /// Staff only: list every booking instead of the caller's own.
    #[serde(default)]
    pub all: bool,
    /// Staff only: passenger manifest for one schedule.
    pub schedule_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Ticket detail returned by `GET /bookings/{id}`.
#[derive(Debug, Serialize)]
pub struct TicketView {
    pub id: DbId,
    pub code: String,
    pub user_id: DbId,
    pub schedule_id: DbId,
    pub seat_labels: Vec<String>,
    pub seat_count: i32,
    pub total_price: i64,
    pub status_id: StatusId,
    pub status: &'static str,
    pub origin_province: String,
    pub destination_province: String,
    pub plate_number: String,
    pub departure_at: Timestamp,
    pub arrival_at: Timestamp,
    /// `Thứ Tư, 15/01/2025` in Vietnam local time.
    pub departure_day: String,
    /// `HH:mm` in Vietnam local time.
    pub departure_time: String,
    /// `dd/MM/yyyy HH:mm:ss` in Vietnam local time.
    pub booked_at_display: String,
    pub booked_at: Timestamp,
    pub cancelled_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    if input.seat_labels.is_empty() {
        return Err(AppError::BadRequest(
            "At least one seat label is required".into(),
        ));
    }
    let mut deduped = input.seat_labels.clone();
    deduped.sort();
    deduped.dedup();
    if deduped.len() != input.seat_labels.len() {
        return Err(AppError::BadRequest("Duplicate seat labels".into()));
    }

    let schedule = ScheduleRepo::find_detail(&state.pool, input.schedule_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id: input.schedule_id,
        }))?;

    if schedule.status_id != schedule_rules::STATUS_SCHEDULED {
        return Err(AppError::Core(CoreError::Conflict(
            "Schedule is not open for booking".into(),
        )));
    }
    if schedule.departure_at <= Utc::now() {
        return Err(AppError::Core(CoreError::Conflict(
            "Schedule has already departed".into(),
        )));
    }

    for label in &input.seat_labels {
        if !is_valid_seat_label(&schedule.seat_kind, schedule.seat_count, label) {
            return Err(AppError::BadRequest(format!("Unknown seat label: {label}")));
        }
    }

    // Advisory pre-check; the unique constraint catches races.
    let taken = ScheduleRepo::taken_seats(&state.pool, input.schedule_id).await?;
    if let Some(conflict) = input.seat_labels.iter().find(|l| taken.contains(l)) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Seat already taken: {conflict}"
        ))));
    }

    let seat_count = input.seat_labels.len() as i64;
    let booking = BookingRepo::create(
        &state.pool,
        &CreateBooking {
            code: booking_rules::generate_booking_code(),
            user_id: auth_user.user_id,
            schedule_id: input.schedule_id,
            seat_labels: input.seat_labels,
            total_price: schedule.price * seat_count,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/v1/bookings
///
/// Customers see their own bookings. Staff may pass `?all=true` for the
/// full list or `?schedule_id=` for one trip's manifest.
pub async fn list_bookings(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<BookingListParams>,
) -> AppResult<Json<DataResponse<Vec<Booking>>>> {
    let limit = clamp_limit(params.limit);
    let offset = clamp_offset(params.offset);

    let data = if let Some(schedule_id) = params.schedule_id {
        if !auth_user.is_staff() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff access required".into(),
            )));
        }
        BookingRepo::list_for_schedule(&state.pool, schedule_id).await?
    } else if params.all {
        if !auth_user.is_staff() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff access required".into(),
            )));
        }
        BookingRepo::list(&state.pool, limit, offset).await?
    } else {
        BookingRepo::list_for_user(&state.pool, auth_user.user_id, limit, offset).await?
    };

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TicketView>> {
    let booking = find_accessible_booking(&state, &auth_user, id).await?;

    let schedule = ScheduleRepo::find_detail(&state.pool, booking.schedule_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id: booking.schedule_id,
        }))?;
    let seats = BookingRepo::seats_for_booking(&state.pool, booking.id).await?;

    Ok(Json(TicketView {
        id: booking.id,
        code: booking.code,
        user_id: booking.user_id,
        schedule_id: booking.schedule_id,
        seat_labels: seats.into_iter().map(|s| s.seat_label).collect(),
        seat_count: booking.seat_count,
        total_price: booking.total_price,
        status_id: booking.status_id,
        status: booking_rules::status_name(booking.status_id),
        origin_province: schedule.origin_province,
        destination_province: schedule.destination_province,
        plate_number: schedule.plate_number,
        departure_day: format_local(schedule.departure_at, FormatPattern::LongDate),
        departure_time: format_local(schedule.departure_at, FormatPattern::TimeOnly),
        booked_at_display: format_local(booking.booked_at, FormatPattern::FullDateTime),
        departure_at: schedule.departure_at,
        arrival_at: schedule.arrival_at,
        booked_at: booking.booked_at,
        cancelled_at: booking.cancelled_at,
    }))
}

/// POST /api/v1/bookings/{id}/cancel
///
/// Frees the held seats. Refused once the trip has departed, even for a
/// booking still in a cancellable state.
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Booking>> {
    let booking = find_accessible_booking(&state, &auth_user, id).await?;

    booking_rules::validate_transition(booking.status_id, booking_rules::STATUS_CANCELLED)
        .map_err(|msg| AppError::Core(CoreError::Conflict(msg)))?;

    let schedule = ScheduleRepo::find_by_id(&state.pool, booking.schedule_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id: booking.schedule_id,
        }))?;
    if schedule.departure_at <= Utc::now() {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot cancel after departure".into(),
        )));
    }

    let cancelled = BookingRepo::cancel(&state.pool, booking.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    Ok(Json(cancelled))
}

// ---------------------------------------------------------------------------
// Nested payments
// ---------------------------------------------------------------------------

/// POST /api/v1/bookings/{id}/payments
///
/// Creates a Pending payment covering the booking total. A booking can
/// hold at most one live (non-failed) payment.
pub async fn create_payment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreatePaymentRequest>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    if !PAYMENT_METHODS.contains(&input.method.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown payment method: {}",
            input.method
        )));
    }

    let booking = find_accessible_booking(&state, &auth_user, id).await?;

    if booking.status_id != booking_rules::STATUS_PENDING {
        return Err(AppError::Core(CoreError::Conflict(
            "Booking is not awaiting payment".into(),
        )));
    }

    let existing = PaymentRepo::list_for_booking(&state.pool, booking.id).await?;
    if existing
        .iter()
        .any(|p| p.status_id != PaymentStatus::Failed.id())
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Booking already has an active payment".into(),
        )));
    }

    let payment = PaymentRepo::create(
        &state.pool,
        &CreatePayment {
            booking_id: booking.id,
            payment_ref: booking_rules::generate_payment_ref(),
            amount: booking.total_price,
            method: input.method,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /api/v1/bookings/{id}/payments
pub async fn list_payments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Payment>>>> {
    let booking = find_accessible_booking(&state, &auth_user, id).await?;
    let data = PaymentRepo::list_for_booking(&state.pool, booking.id).await?;
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a booking the caller may act on: the owner, or any staff member.
/// A foreign booking id is reported as missing, not forbidden, so ids
/// cannot be probed.
async fn find_accessible_booking(
    state: &AppState,
    auth_user: &AuthUser,
    id: DbId,
) -> AppResult<Booking> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    if booking.user_id != auth_user.user_id && !auth_user.is_staff() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }));
    }
    Ok(booking)
}
