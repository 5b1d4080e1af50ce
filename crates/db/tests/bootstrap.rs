use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify seed data.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    vexe_db::health_check(&pool).await.unwrap();

    // Lookup tables must carry their seed rows.
    let tables = [
        "roles",
        "booking_statuses",
        "schedule_statuses",
        "payment_statuses",
    ];
    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 > 0, "{table} should have seed data, got 0 rows");
    }
}

/// Role seed order drives the ids the auth layer assumes.
#[sqlx::test(migrations = "./migrations")]
async fn test_role_seed_order(pool: PgPool) {
    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    let names: Vec<(i64, &str)> = rows.iter().map(|(id, n)| (*id, n.as_str())).collect();
    assert_eq!(names, vec![(1, "admin"), (2, "staff"), (3, "customer")]);
}

/// Status seed order must match the ids the state machines use.
#[sqlx::test(migrations = "./migrations")]
async fn test_status_seed_order(pool: PgPool) {
    let booking: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM booking_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(
        booking.iter().map(|(i, n)| (*i, n.as_str())).collect::<Vec<_>>(),
        vec![(1, "Pending"), (2, "Confirmed"), (3, "Completed"), (4, "Cancelled")]
    );

    let schedule: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM schedule_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(
        schedule.iter().map(|(i, n)| (*i, n.as_str())).collect::<Vec<_>>(),
        vec![(1, "Scheduled"), (2, "Departed"), (3, "Completed"), (4, "Cancelled")]
    );

    let payment: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM payment_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(
        payment.iter().map(|(i, n)| (*i, n.as_str())).collect::<Vec<_>>(),
        vec![(1, "Pending"), (2, "Paid"), (3, "Failed"), (4, "Refunded")]
    );
}
