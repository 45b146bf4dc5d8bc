//! Database bootstrap: create the database if missing and the `faculty` / `student` tables.

use crate::config::AppConfig;
use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const SCHOOL_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS faculty (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        color TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS student (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        faculty_id BIGINT REFERENCES faculty (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS student_faculty_id_idx ON student (faculty_id)",
];

/// Connect a pool sized from config, creating the database and tables first if needed.
pub async fn connect(config: &AppConfig) -> Result<PgPool, AppError> {
    ensure_database_exists(&config.database_url).await?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    ensure_school_tables(&pool).await?;
    Ok(pool)
}

/// Create `faculty` and `student` if they do not exist. Existing tables are left untouched.
pub async fn ensure_school_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in SCHOOL_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!("school tables ready");
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if absent.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres{}", base, query), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
