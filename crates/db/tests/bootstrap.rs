use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    lucrum_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "training_videos",
        "training_questions",
        "user_training_progress",
        "library_items",
        "referral_clicks",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Order numbers must be positive and unique.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_order_constraints(pool: PgPool) {
    sqlx::query("INSERT INTO training_videos (title, video_url, order_number) VALUES ('a', 'u', 1)")
        .execute(&pool)
        .await
        .unwrap();

    let duplicate = sqlx::query(
        "INSERT INTO training_videos (title, video_url, order_number) VALUES ('b', 'u', 1)",
    )
    .execute(&pool)
    .await;
    assert!(duplicate.is_err(), "duplicate order_number should be rejected");

    let zero = sqlx::query(
        "INSERT INTO training_videos (title, video_url, order_number) VALUES ('c', 'u', 0)",
    )
    .execute(&pool)
    .await;
    assert!(zero.is_err(), "order_number 0 should be rejected");
}
