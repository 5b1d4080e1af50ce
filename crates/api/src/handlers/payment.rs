//! Payment settlement handlers, staff-only.
//!
//! Both transitions are guarded single-statement updates in the
//! repository, so two staff members confirming the same payment cannot
//! both succeed.

use axum::extract::{Path, State};
use axum::Json;
use vexe_core::booking as booking_rules;
use vexe_core::error::CoreError;
use vexe_core::types::DbId;
use vexe_db::models::payment::Payment;
use vexe_db::models::status::PaymentStatus;
use vexe_db::repositories::{BookingRepo, PaymentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// POST /api/v1/payments/{id}/confirm
///
/// Pending -> Paid with `paid_at` stamped, then the booking moves
/// Pending -> Confirmed.
pub async fn confirm_payment(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Payment>> {
    let existing = PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id,
        }))?;

    let payment = PaymentRepo::transition(
        &state.pool,
        id,
        PaymentStatus::Pending.id(),
        PaymentStatus::Paid.id(),
        true,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Payment is not pending".into(),
        ))
    })?;

    // Confirm the booking. If it already left Pending (e.g. cancelled in
    // the meantime) the guarded update is a no-op and the payment stays
    // Paid for staff to reconcile.
    let confirmed = BookingRepo::set_status_guarded(
        &state.pool,
        existing.booking_id,
        booking_rules::STATUS_PENDING,
        booking_rules::STATUS_CONFIRMED,
    )
    .await?;
    if !confirmed {
        tracing::warn!(
            payment_id = id,
            booking_id = existing.booking_id,
            "Payment confirmed but booking was no longer pending"
        );
    }

    Ok(Json(payment))
}

/// POST /api/v1/payments/{id}/fail
///
/// Pending -> Failed. The booking stays Pending so the customer can try
/// another payment.
pub async fn fail_payment(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Payment>> {
    PaymentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Payment",
            id,
        }))?;

    let payment = PaymentRepo::transition(
        &state.pool,
        id,
        PaymentStatus::Pending.id(),
        PaymentStatus::Failed.id(),
        false,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Payment is not pending".into(),
        ))
    })?;

    Ok(Json(payment))
}
