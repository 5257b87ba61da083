use sqlx::PgPool;

/// Connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    studio_db::health_check(&pool).await.unwrap();

    let tables = [
        "profiles",
        "projects",
        "proposals",
        "contracts",
        "payments",
        "invoices",
        "tasks",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Status columns reject values outside their enum.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_check_constraints(pool: PgPool) {
    let owner: (uuid::Uuid,) = sqlx::query_as(
        "INSERT INTO profiles (email, role) VALUES ('owner@studio.test', 'admin') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let err = sqlx::query(
        "INSERT INTO projects (title, deadline, status, created_by)
         VALUES ('Bad', '2026-01-01', 'shipped', $1)",
    )
    .bind(owner.0)
    .execute(&pool)
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("ck_projects_status"));
}
