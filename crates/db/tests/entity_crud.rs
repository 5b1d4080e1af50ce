//! Integration tests for the repository layer against a real database:
//! - Catalog CRUD and unique constraint violations
//! - Login bookkeeping and session lifecycle
//! - Pattern generation idempotency
//! - Local-day schedule search on UTC bounds
//! - Booking seat holds, conflicts, and cancellation
//! - Payment status transitions and progress sweeps

use chrono::{NaiveDate, TimeZone, Utc};
use sqlx::PgPool;
use vexe_core::localtime;
use vexe_db::models::booking::CreateBooking;
use vexe_db::models::bus::CreateBus;
use vexe_db::models::driver::CreateDriver;
use vexe_db::models::payment::CreatePayment;
use vexe_db::models::province::{CreateProvince, UpdateProvince};
use vexe_db::models::route::CreateRoute;
use vexe_db::models::schedule::{CreateSchedule, ScheduleFilter};
use vexe_db::models::schedule_pattern::CreateSchedulePattern;
use vexe_db::models::session::CreateSession;
use vexe_db::models::status::{BookingStatus, PaymentStatus, ScheduleStatus};
use vexe_db::models::stop::CreateStop;
use vexe_db::models::user::CreateUser;
use vexe_db::repositories::{
    BookingRepo, BusRepo, DriverRepo, PaymentRepo, ProvinceRepo, RouteRepo, SchedulePatternRepo,
    ScheduleRepo, SessionRepo, StopRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_province(name: &str, code: &str) -> CreateProvince {
    CreateProvince {
        name: name.to_string(),
        code: code.to_string(),
    }
}

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$stub".to_string(),
        role_id: 3,
    }
}

/// Build the province/route/bus/driver fixture most tests need.
async fn seed_catalog(pool: &PgPool) -> (i64, i64, i64) {
    let origin = ProvinceRepo::create(pool, &new_province("Hà Nội", "HN"))
        .await
        .unwrap();
    let destination = ProvinceRepo::create(pool, &new_province("Hải Phòng", "HP"))
        .await
        .unwrap();
    let route = RouteRepo::create(
        pool,
        &CreateRoute {
            origin_province_id: origin.id,
            destination_province_id: destination.id,
            distance_km: 120,
            duration_minutes: 150,
        },
    )
    .await
    .unwrap();
    let bus = BusRepo::create(
        pool,
        &CreateBus {
            plate_number: "29B-12345".to_string(),
            model: Some("Thaco TB85".to_string()),
            seat_kind: "seater".to_string(),
            seat_count: 29,
        },
    )
    .await
    .unwrap();
    let driver = DriverRepo::create(
        pool,
        &CreateDriver {
            full_name: "Nguyễn Văn An".to_string(),
            phone: "0912345678".to_string(),
            license_no: "D123456".to_string(),
        },
    )
    .await
    .unwrap();
    (route.id, bus.id, driver.id)
}

fn new_schedule(route_id: i64, bus_id: i64, driver_id: i64, departure: &str) -> CreateSchedule {
    let departure_at = departure.parse().unwrap();
    CreateSchedule {
        pattern_id: None,
        route_id,
        bus_id,
        driver_id,
        departure_at,
        arrival_at: departure_at + chrono::Duration::minutes(150),
        price: 150_000,
    }
}

// ---------------------------------------------------------------------------
// Test: Province CRUD and unique name
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_province_crud(pool: PgPool) {
    let created = ProvinceRepo::create(&pool, &new_province("Đà Nẵng", "DN"))
        .await
        .unwrap();
    assert_eq!(created.name, "Đà Nẵng");

    let fetched = ProvinceRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(fetched.unwrap().code, "DN");

    let updated = ProvinceRepo::update(
        &pool,
        created.id,
        &UpdateProvince {
            name: None,
            code: Some("DNG".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "Đà Nẵng");
    assert_eq!(updated.code, "DNG");

    let duplicate = ProvinceRepo::create(&pool, &new_province("Đà Nẵng", "XX")).await;
    assert!(duplicate.is_err(), "duplicate province name should fail");

    assert!(ProvinceRepo::delete(&pool, created.id).await.unwrap());
    assert!(ProvinceRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: Route constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_route_constraints(pool: PgPool) {
    let origin = ProvinceRepo::create(&pool, &new_province("Huế", "HUE"))
        .await
        .unwrap();
    let destination = ProvinceRepo::create(&pool, &new_province("Quảng Nam", "QNA"))
        .await
        .unwrap();

    // Same province at both ends violates the check constraint.
    let self_loop = RouteRepo::create(
        &pool,
        &CreateRoute {
            origin_province_id: origin.id,
            destination_province_id: origin.id,
            distance_km: 1,
            duration_minutes: 10,
        },
    )
    .await;
    assert!(self_loop.is_err(), "self-loop route should fail");

    let input = CreateRoute {
        origin_province_id: origin.id,
        destination_province_id: destination.id,
        distance_km: 100,
        duration_minutes: 120,
    };
    RouteRepo::create(&pool, &input).await.unwrap();
    let duplicate = RouteRepo::create(&pool, &input).await;
    assert!(duplicate.is_err(), "duplicate province pair should fail");
}

// ---------------------------------------------------------------------------
// Test: Stop sequence uniqueness per route
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_stop_sequence_unique_per_route(pool: PgPool) {
    let (route_id, _, _) = seed_catalog(&pool).await;

    let stop = CreateStop {
        name: "Bến xe Giáp Bát".to_string(),
        address: None,
        sequence_index: 0,
        is_pickup: None,
        is_dropoff: None,
    };
    let created = StopRepo::create(&pool, route_id, &stop).await.unwrap();
    assert!(created.is_pickup, "pickup should default to true");

    let duplicate = StopRepo::create(&pool, route_id, &stop).await;
    assert!(duplicate.is_err(), "duplicate sequence index should fail");

    let second = CreateStop {
        sequence_index: 1,
        name: "Trạm Phố Nối".to_string(),
        ..stop
    };
    StopRepo::create(&pool, route_id, &second).await.unwrap();

    let stops = StopRepo::list_for_route(&pool, route_id).await.unwrap();
    assert_eq!(stops.len(), 2);
    assert!(stops[0].sequence_index < stops[1].sequence_index);
}

// ---------------------------------------------------------------------------
// Test: Login bookkeeping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_login_bookkeeping(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("lockme")).await.unwrap();
    assert_eq!(user.failed_login_count, 0);

    assert_eq!(UserRepo::increment_failed_login(&pool, user.id).await.unwrap(), 1);
    assert_eq!(UserRepo::increment_failed_login(&pool, user.id).await.unwrap(), 2);

    let until = Utc::now() + chrono::Duration::minutes(15);
    UserRepo::lock_account(&pool, user.id, until).await.unwrap();
    let locked = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(locked.locked_until.is_some());

    UserRepo::record_successful_login(&pool, user.id).await.unwrap();
    let reset = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reset.failed_login_count, 0);
    assert!(reset.locked_until.is_none());
    assert!(reset.last_login_at.is_some());
}

// ---------------------------------------------------------------------------
// Test: Session lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_session_lifecycle(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("sessioner")).await.unwrap();

    let session = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "abc123".to_string(),
            expires_at: Utc::now() + chrono::Duration::days(7),
        },
    )
    .await
    .unwrap();

    let found = SessionRepo::find_by_refresh_token_hash(&pool, "abc123")
        .await
        .unwrap();
    assert_eq!(found.unwrap().id, session.id);

    assert!(SessionRepo::revoke(&pool, session.id).await.unwrap());
    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "abc123")
        .await
        .unwrap()
        .is_none());

    // Revoked sessions are swept by cleanup.
    assert_eq!(SessionRepo::cleanup_expired(&pool).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Test: Pattern generation idempotency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_schedule_generation_idempotent(pool: PgPool) {
    let (route_id, bus_id, driver_id) = seed_catalog(&pool).await;
    let pattern = SchedulePatternRepo::create(
        &pool,
        &CreateSchedulePattern {
            route_id,
            bus_id,
            driver_id,
            departure_time: "08:00:00".parse().unwrap(),
            duration_minutes: 150,
            days_of_week: 0b0111_1111,
            price: 150_000,
        },
    )
    .await
    .unwrap();

    let input = CreateSchedule {
        pattern_id: Some(pattern.id),
        ..new_schedule(route_id, bus_id, driver_id, "2026-04-06T01:00:00Z")
    };
    assert!(ScheduleRepo::insert_generated(&pool, &input).await.unwrap());
    // Same (pattern, departure) pair again: skipped, not an error.
    assert!(!ScheduleRepo::insert_generated(&pool, &input).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: Local-day search boundaries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_schedule_search_local_day_bounds(pool: PgPool) {
    let (route_id, bus_id, driver_id) = seed_catalog(&pool).await;

    // 2026-04-05 00:30 and 23:30 Vietnam time fall on that local day;
    // 2026-04-06 00:30 does not, even though its UTC instant
    // (2026-04-05T17:30Z) still carries the 5th as its UTC date.
    for departure in [
        "2026-04-04T17:30:00Z",
        "2026-04-05T16:30:00Z",
        "2026-04-05T17:30:00Z",
    ] {
        ScheduleRepo::create(&pool, &new_schedule(route_id, bus_id, driver_id, departure))
            .await
            .unwrap();
    }

    let day = NaiveDate::from_ymd_opt(2026, 4, 5).unwrap();
    let filter = ScheduleFilter {
        departure_between: Some(localtime::local_day_range(day).unwrap()),
        ..Default::default()
    };
    let rows = ScheduleRepo::search(&pool, &filter, 20, 0).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].departure_at,
        Utc.with_ymd_and_hms(2026, 4, 4, 17, 30, 0).unwrap()
    );
    assert_eq!(rows[0].origin_province, "Hà Nội");
    assert_eq!(rows[0].seat_count, 29);
    assert_eq!(rows[0].booked_seats, 0);
}

// ---------------------------------------------------------------------------
// Test: Booking seat holds and conflicts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_booking_seat_conflict_rolls_back(pool: PgPool) {
    let (route_id, bus_id, driver_id) = seed_catalog(&pool).await;
    let schedule =
        ScheduleRepo::create(&pool, &new_schedule(route_id, bus_id, driver_id, "2026-04-06T01:00:00Z"))
            .await
            .unwrap();
    let user = UserRepo::create(&pool, &new_user("booker")).await.unwrap();

    let first = BookingRepo::create(
        &pool,
        &CreateBooking {
            code: "VXAAAA0001".to_string(),
            user_id: user.id,
            schedule_id: schedule.id,
            seat_labels: vec!["01".to_string(), "02".to_string()],
            total_price: 300_000,
        },
    )
    .await
    .unwrap();
    assert_eq!(first.seat_count, 2);
    assert_eq!(first.status_id, BookingStatus::Pending.id());

    // Overlapping seat: the whole second booking must roll back.
    let conflict = BookingRepo::create(
        &pool,
        &CreateBooking {
            code: "VXAAAA0002".to_string(),
            user_id: user.id,
            schedule_id: schedule.id,
            seat_labels: vec!["02".to_string(), "03".to_string()],
            total_price: 300_000,
        },
    )
    .await;
    assert!(conflict.is_err(), "overlapping seat should fail");
    assert!(BookingRepo::find_by_code(&pool, "VXAAAA0002")
        .await
        .unwrap()
        .is_none());

    let taken = ScheduleRepo::taken_seats(&pool, schedule.id).await.unwrap();
    assert_eq!(taken, vec!["01", "02"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_booking_cancel_frees_seats(pool: PgPool) {
    let (route_id, bus_id, driver_id) = seed_catalog(&pool).await;
    let schedule =
        ScheduleRepo::create(&pool, &new_schedule(route_id, bus_id, driver_id, "2026-04-06T01:00:00Z"))
            .await
            .unwrap();
    let user = UserRepo::create(&pool, &new_user("canceller")).await.unwrap();

    let booking = BookingRepo::create(
        &pool,
        &CreateBooking {
            code: "VXBBBB0001".to_string(),
            user_id: user.id,
            schedule_id: schedule.id,
            seat_labels: vec!["05".to_string()],
            total_price: 150_000,
        },
    )
    .await
    .unwrap();

    let cancelled = BookingRepo::cancel(&pool, booking.id).await.unwrap().unwrap();
    assert_eq!(cancelled.status_id, BookingStatus::Cancelled.id());
    assert!(cancelled.cancelled_at.is_some());
    assert!(ScheduleRepo::taken_seats(&pool, schedule.id)
        .await
        .unwrap()
        .is_empty());

    // The freed seat is bookable again.
    BookingRepo::create(
        &pool,
        &CreateBooking {
            code: "VXBBBB0002".to_string(),
            user_id: user.id,
            schedule_id: schedule.id,
            seat_labels: vec!["05".to_string()],
            total_price: 150_000,
        },
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Test: Payment transitions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_payment_transition_guard(pool: PgPool) {
    let (route_id, bus_id, driver_id) = seed_catalog(&pool).await;
    let schedule =
        ScheduleRepo::create(&pool, &new_schedule(route_id, bus_id, driver_id, "2026-04-06T01:00:00Z"))
            .await
            .unwrap();
    let user = UserRepo::create(&pool, &new_user("payer")).await.unwrap();
    let booking = BookingRepo::create(
        &pool,
        &CreateBooking {
            code: "VXCCCC0001".to_string(),
            user_id: user.id,
            schedule_id: schedule.id,
            seat_labels: vec!["01".to_string()],
            total_price: 150_000,
        },
    )
    .await
    .unwrap();

    let payment = PaymentRepo::create(
        &pool,
        &CreatePayment {
            booking_id: booking.id,
            payment_ref: "PM0000000001".to_string(),
            amount: 150_000,
            method: "cash".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(payment.status_id, PaymentStatus::Pending.id());
    assert!(payment.paid_at.is_none());

    let paid = PaymentRepo::transition(
        &pool,
        payment.id,
        PaymentStatus::Pending.id(),
        PaymentStatus::Paid.id(),
        true,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(paid.status_id, PaymentStatus::Paid.id());
    assert!(paid.paid_at.is_some());

    // A second confirmation finds no Pending row to move.
    let replay = PaymentRepo::transition(
        &pool,
        payment.id,
        PaymentStatus::Pending.id(),
        PaymentStatus::Paid.id(),
        true,
    )
    .await
    .unwrap();
    assert!(replay.is_none());
}

// ---------------------------------------------------------------------------
// Test: Progress sweeps
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_schedule_progress_sweeps(pool: PgPool) {
    let (route_id, bus_id, driver_id) = seed_catalog(&pool).await;

    // En route at the sweep instant.
    let en_route =
        ScheduleRepo::create(&pool, &new_schedule(route_id, bus_id, driver_id, "2026-04-06T01:00:00Z"))
            .await
            .unwrap();
    // Already arrived; straight to Completed even though no Departed
    // sweep ever saw it.
    let arrived =
        ScheduleRepo::create(&pool, &new_schedule(route_id, bus_id, driver_id, "2026-04-05T01:00:00Z"))
            .await
            .unwrap();
    // Still in the future; untouched.
    let future =
        ScheduleRepo::create(&pool, &new_schedule(route_id, bus_id, driver_id, "2026-04-07T01:00:00Z"))
            .await
            .unwrap();
    // Cancelled before the sweep; never progresses, even past arrival.
    let cancelled =
        ScheduleRepo::create(&pool, &new_schedule(route_id, bus_id, driver_id, "2026-04-04T01:00:00Z"))
            .await
            .unwrap();
    ScheduleRepo::set_status(&pool, cancelled.id, ScheduleStatus::Cancelled.id())
        .await
        .unwrap();

    let now = Utc.with_ymd_and_hms(2026, 4, 6, 2, 0, 0).unwrap();
    let completed = ScheduleRepo::mark_completed(&pool, now).await.unwrap();
    assert_eq!(completed, vec![arrived.id]);
    let departed = ScheduleRepo::mark_departed(&pool, now).await.unwrap();
    assert_eq!(departed, vec![en_route.id]);

    let untouched = ScheduleRepo::find_by_id(&pool, future.id).await.unwrap().unwrap();
    assert_eq!(untouched.status_id, ScheduleStatus::Scheduled.id());
    let still_cancelled = ScheduleRepo::find_by_id(&pool, cancelled.id).await.unwrap().unwrap();
    assert_eq!(still_cancelled.status_id, ScheduleStatus::Cancelled.id());

    // Confirmed bookings on completed schedules are closed out.
    let user = UserRepo::create(&pool, &new_user("rider")).await.unwrap();
    let booking = BookingRepo::create(
        &pool,
        &CreateBooking {
            code: "VXDDDD0001".to_string(),
            user_id: user.id,
            schedule_id: arrived.id,
            seat_labels: vec!["01".to_string()],
            total_price: 150_000,
        },
    )
    .await
    .unwrap();
    BookingRepo::set_status(&pool, booking.id, BookingStatus::Confirmed.id())
        .await
        .unwrap();

    let closed = BookingRepo::complete_for_schedules(&pool, &completed).await.unwrap();
    assert_eq!(closed, 1);
    let done = BookingRepo::find_by_id(&pool, booking.id).await.unwrap().unwrap();
    assert_eq!(done.status_id, BookingStatus::Completed.id());
}
