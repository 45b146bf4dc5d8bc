//! PostgreSQL store over a `PgPool`.

use super::{FacultyRepository, RepositoryResult, SchoolRepository, StudentRepository};
use crate::model::{Faculty, Student};
use async_trait::async_trait;
use sqlx::PgPool;

const STUDENT_COLUMNS: &str = "id, name, age, faculty_id";
const FACULTY_COLUMNS: &str = "id, name, color";

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        PgRepository { pool }
    }

    async fn students_where(&self, clause: &str, bind: StudentFilter<'_>) -> RepositoryResult<Vec<Student>> {
        let sql = format!("SELECT {} FROM student {} ORDER BY id", STUDENT_COLUMNS, clause);
        tracing::debug!(sql = %sql, "query");
        let query = sqlx::query_as::<_, Student>(&sql);
        let query = match bind {
            StudentFilter::None => query,
            StudentFilter::Int(n) => query.bind(n),
            StudentFilter::IntRange(lo, hi) => query.bind(lo).bind(hi),
            StudentFilter::BigInt(n) => query.bind(n),
            StudentFilter::Text(s) => query.bind(s),
        };
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn faculties_where(&self, clause: &str, value: Option<&str>) -> RepositoryResult<Vec<Faculty>> {
        let sql = format!("SELECT {} FROM faculty {} ORDER BY id", FACULTY_COLUMNS, clause);
        tracing::debug!(sql = %sql, "query");
        let mut query = sqlx::query_as::<_, Faculty>(&sql);
        if let Some(v) = value {
            query = query.bind(v);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

/// Parameter shapes used by the student list queries.
enum StudentFilter<'a> {
    None,
    Int(i32),
    IntRange(i32, i32),
    BigInt(i64),
    Text(&'a str),
}

#[async_trait]
impl StudentRepository for PgRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Student>> {
        let sql = format!("SELECT {} FROM student WHERE id = $1", STUDENT_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM student WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn insert(&self, student: &Student) -> RepositoryResult<Student> {
        let sql = format!(
            "INSERT INTO student (name, age, faculty_id) VALUES ($1, $2, $3) RETURNING {}",
            STUDENT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(&student.name)
            .bind(student.age)
            .bind(student.faculty_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, student: &Student) -> RepositoryResult<Option<Student>> {
        let sql = format!(
            "UPDATE student SET name = $2, age = $3, faculty_id = $4 WHERE id = $1 RETURNING {}",
            STUDENT_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .bind(&student.name)
            .bind(student.age)
            .bind(student.faculty_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM student WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Student>> {
        self.students_where("", StudentFilter::None).await
    }

    async fn find_all_by_age(&self, age: i32) -> RepositoryResult<Vec<Student>> {
        self.students_where("WHERE age = $1", StudentFilter::Int(age)).await
    }

    async fn find_by_age_between(&self, min_age: i32, max_age: i32) -> RepositoryResult<Vec<Student>> {
        self.students_where("WHERE age BETWEEN $1 AND $2", StudentFilter::IntRange(min_age, max_age))
            .await
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Student>> {
        let found = self.students_where("WHERE name = $1", StudentFilter::Text(name)).await?;
        Ok(found.into_iter().next())
    }

    async fn find_all_by_faculty_id(&self, faculty_id: i64) -> RepositoryResult<Vec<Student>> {
        self.students_where("WHERE faculty_id = $1", StudentFilter::BigInt(faculty_id))
            .await
    }

    async fn count_all_students(&self) -> RepositoryResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM student")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    async fn get_average_age(&self) -> RepositoryResult<f64> {
        let avg: (f64,) = sqlx::query_as("SELECT COALESCE(AVG(age), 0)::float8 FROM student")
            .fetch_one(&self.pool)
            .await?;
        Ok(avg.0)
    }

    async fn get_five_latest_students(&self) -> RepositoryResult<Vec<Student>> {
        let sql = format!("SELECT {} FROM student ORDER BY id DESC LIMIT 5", STUDENT_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Student>(&sql).fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl FacultyRepository for PgRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Faculty>> {
        let sql = format!("SELECT {} FROM faculty WHERE id = $1", FACULTY_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Faculty>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM faculty WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn insert(&self, faculty: &Faculty) -> RepositoryResult<Faculty> {
        let sql = format!(
            "INSERT INTO faculty (name, color) VALUES ($1, $2) RETURNING {}",
            FACULTY_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Faculty>(&sql)
            .bind(&faculty.name)
            .bind(&faculty.color)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, faculty: &Faculty) -> RepositoryResult<Option<Faculty>> {
        let sql = format!(
            "UPDATE faculty SET name = $2, color = $3 WHERE id = $1 RETURNING {}",
            FACULTY_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Faculty>(&sql)
            .bind(id)
            .bind(&faculty.name)
            .bind(&faculty.color)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM faculty WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Faculty>> {
        self.faculties_where("", None).await
    }

    async fn find_all_by_color_ignore_case(&self, color: &str) -> RepositoryResult<Vec<Faculty>> {
        self.faculties_where("WHERE LOWER(color) = LOWER($1)", Some(color)).await
    }

    async fn find_all_by_name_ignore_case(&self, name: &str) -> RepositoryResult<Vec<Faculty>> {
        self.faculties_where("WHERE LOWER(name) = LOWER($1)", Some(name)).await
    }

    async fn find_by_name_ignore_case(&self, name: &str) -> RepositoryResult<Option<Faculty>> {
        let found = self.find_all_by_name_ignore_case(name).await?;
        Ok(found.into_iter().next())
    }
}

#[async_trait]
impl SchoolRepository for PgRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(sqlx::query("SELECT 1").fetch_optional(&self.pool).await.is_ok())
    }
}
