//! In-memory store for tests and local runs without PostgreSQL.
//!
//! Mirrors the PostgreSQL behavior the services rely on: ids are assigned from a counter,
//! lists come back ordered by id, and the student -> faculty reference is enforced like
//! the foreign key in the real schema.

use super::{FacultyRepository, RepositoryError, RepositoryResult, SchoolRepository, StudentRepository};
use crate::model::{Faculty, Student};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryRepository {
    data: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    students: BTreeMap<i64, Student>,
    faculties: BTreeMap<i64, Faculty>,
    last_student_id: i64,
    last_faculty_id: i64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn students_matching<F>(&self, pred: F) -> Vec<Student>
    where
        F: Fn(&Student) -> bool,
    {
        let data = self.data.read().await;
        data.students.values().filter(|&s| pred(s)).cloned().collect()
    }

    async fn faculties_matching<F>(&self, pred: F) -> Vec<Faculty>
    where
        F: Fn(&Faculty) -> bool,
    {
        let data = self.data.read().await;
        data.faculties.values().filter(|&f| pred(f)).cloned().collect()
    }
}

impl Tables {
    fn check_faculty_ref(&self, student: &Student) -> RepositoryResult<()> {
        match student.faculty_id {
            Some(fid) if !self.faculties.contains_key(&fid) => Err(RepositoryError::Constraint(format!(
                "student.faculty_id references missing faculty {}",
                fid
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl StudentRepository for InMemoryRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Student>> {
        Ok(self.data.read().await.students.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool> {
        Ok(self.data.read().await.students.contains_key(&id))
    }

    async fn insert(&self, student: &Student) -> RepositoryResult<Student> {
        let mut data = self.data.write().await;
        data.check_faculty_ref(student)?;
        data.last_student_id += 1;
        let id = data.last_student_id;
        let stored = Student {
            id: Some(id),
            ..student.clone()
        };
        data.students.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i64, student: &Student) -> RepositoryResult<Option<Student>> {
        let mut data = self.data.write().await;
        if !data.students.contains_key(&id) {
            return Ok(None);
        }
        data.check_faculty_ref(student)?;
        let stored = Student {
            id: Some(id),
            ..student.clone()
        };
        data.students.insert(id, stored.clone());
        Ok(Some(stored))
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        self.data.write().await.students.remove(&id);
        Ok(())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Student>> {
        Ok(self.students_matching(|_| true).await)
    }

    async fn find_all_by_age(&self, age: i32) -> RepositoryResult<Vec<Student>> {
        Ok(self.students_matching(|s| s.age == age).await)
    }

    async fn find_by_age_between(&self, min_age: i32, max_age: i32) -> RepositoryResult<Vec<Student>> {
        Ok(self
            .students_matching(|s| s.age >= min_age && s.age <= max_age)
            .await)
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Student>> {
        Ok(self.students_matching(|s| s.name == name).await.into_iter().next())
    }

    async fn find_all_by_faculty_id(&self, faculty_id: i64) -> RepositoryResult<Vec<Student>> {
        Ok(self
            .students_matching(|s| s.faculty_id == Some(faculty_id))
            .await)
    }

    async fn count_all_students(&self) -> RepositoryResult<i64> {
        Ok(self.data.read().await.students.len() as i64)
    }

    async fn get_average_age(&self) -> RepositoryResult<f64> {
        let data = self.data.read().await;
        if data.students.is_empty() {
            return Ok(0.0);
        }
        let total: i64 = data.students.values().map(|s| i64::from(s.age)).sum();
        Ok(total as f64 / data.students.len() as f64)
    }

    async fn get_five_latest_students(&self) -> RepositoryResult<Vec<Student>> {
        let data = self.data.read().await;
        Ok(data.students.values().rev().take(5).cloned().collect())
    }
}

#[async_trait]
impl FacultyRepository for InMemoryRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Faculty>> {
        Ok(self.data.read().await.faculties.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> RepositoryResult<bool> {
        Ok(self.data.read().await.faculties.contains_key(&id))
    }

    async fn insert(&self, faculty: &Faculty) -> RepositoryResult<Faculty> {
        let mut data = self.data.write().await;
        data.last_faculty_id += 1;
        let id = data.last_faculty_id;
        let stored = Faculty {
            id: Some(id),
            ..faculty.clone()
        };
        data.faculties.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i64, faculty: &Faculty) -> RepositoryResult<Option<Faculty>> {
        let mut data = self.data.write().await;
        let Some(row) = data.faculties.get_mut(&id) else {
            return Ok(None);
        };
        *row = Faculty {
            id: Some(id),
            ..faculty.clone()
        };
        Ok(Some(row.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        let mut data = self.data.write().await;
        if data.students.values().any(|s| s.faculty_id == Some(id)) {
            return Err(RepositoryError::Constraint(format!(
                "faculty {} is still referenced by students",
                id
            )));
        }
        data.faculties.remove(&id);
        Ok(())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Faculty>> {
        Ok(self.faculties_matching(|_| true).await)
    }

    async fn find_all_by_color_ignore_case(&self, color: &str) -> RepositoryResult<Vec<Faculty>> {
        let color = color.to_lowercase();
        Ok(self
            .faculties_matching(|f| f.color.to_lowercase() == color)
            .await)
    }

    async fn find_all_by_name_ignore_case(&self, name: &str) -> RepositoryResult<Vec<Faculty>> {
        let name = name.to_lowercase();
        Ok(self
            .faculties_matching(|f| f.name.to_lowercase() == name)
            .await)
    }

    async fn find_by_name_ignore_case(&self, name: &str) -> RepositoryResult<Option<Faculty>> {
        Ok(self.find_all_by_name_ignore_case(name).await?.into_iter().next())
    }
}

#[async_trait]
impl SchoolRepository for InMemoryRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
