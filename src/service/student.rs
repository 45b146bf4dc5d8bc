//! Student operations.

use crate::error::{AppError, LookupKey};
use crate::model::{Faculty, Student};
use crate::repository::{FacultyRepository, StudentRepository};
use std::sync::Arc;

/// Upper bound of the 1..=n sum served by `/student/step_4`.
pub const GAUSS_UPPER_BOUND: i64 = 1_000_000;

#[derive(Clone)]
pub struct StudentService {
    students: Arc<dyn StudentRepository>,
    faculties: Arc<dyn FacultyRepository>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentRepository>, faculties: Arc<dyn FacultyRepository>) -> Self {
        StudentService { students, faculties }
    }

    /// Persist a new student. Any client-supplied id is discarded.
    pub async fn create_student(&self, mut student: Student) -> Result<Student, AppError> {
        student.id = None;
        tracing::info!("creating student");
        Ok(self.students.insert(&student).await?)
    }

    pub async fn get_student(&self, id: i64) -> Result<Option<Student>, AppError> {
        let student = self.students.find_by_id(id).await?;
        match &student {
            Some(_) => tracing::info!(id, "found student"),
            None => tracing::warn!(id, "student not found"),
        }
        Ok(student)
    }

    pub async fn get_all_students(&self) -> Result<Vec<Student>, AppError> {
        tracing::debug!("getting all students");
        Ok(self.students.find_all().await?)
    }

    /// Replace an existing student. Fails with `StudentNotFound` when the id is unknown.
    pub async fn update_student(&self, student: Student) -> Result<Student, AppError> {
        let id = student
            .id
            .ok_or_else(|| AppError::BadRequest("student id is required for update".into()))?;
        tracing::info!(id, "updating student");
        self.students.update(id, &student).await?.ok_or_else(|| {
            tracing::error!(id, "student not found");
            AppError::StudentNotFound(LookupKey::Id(id))
        })
    }

    pub async fn delete_student(&self, id: i64) -> Result<(), AppError> {
        tracing::debug!(id, "deleting student");
        Ok(self.students.delete_by_id(id).await?)
    }

    /// Students of exactly `age`; empty without touching the store when `age <= 0`.
    pub async fn find_student_by_age(&self, age: i32) -> Result<Vec<Student>, AppError> {
        if age <= 0 {
            tracing::warn!(age, "rejecting non-positive age filter");
            return Ok(Vec::new());
        }
        tracing::debug!(age, "finding students by age");
        Ok(self.students.find_all_by_age(age).await?)
    }

    /// Students aged within `[min_age, max_age]`; empty unless `min_age > 0 && max_age > min_age`.
    pub async fn find_by_age_between(&self, min_age: i32, max_age: i32) -> Result<Vec<Student>, AppError> {
        if min_age <= 0 || max_age <= min_age {
            tracing::warn!(min_age, max_age, "rejecting invalid age range");
            return Ok(Vec::new());
        }
        tracing::info!(min_age, max_age, "finding students by age between");
        Ok(self.students.find_by_age_between(min_age, max_age).await?)
    }

    /// Faculty of the first student (lowest id) named exactly `name`.
    ///
    /// `None` when no student has that name or the student has no faculty.
    pub async fn find_faculty_by_student_name(&self, name: &str) -> Result<Option<Faculty>, AppError> {
        tracing::info!(name, "finding faculty by student name");
        let Some(student) = self.students.find_by_name(name).await? else {
            tracing::warn!(name, "no student with that name");
            return Ok(None);
        };
        match student.faculty_id {
            Some(fid) => Ok(self.faculties.find_by_id(fid).await?),
            None => Ok(None),
        }
    }

    pub async fn count_all_students(&self) -> Result<i64, AppError> {
        tracing::info!("counting all students");
        Ok(self.students.count_all_students().await?)
    }

    pub async fn get_average_age(&self) -> Result<f64, AppError> {
        tracing::debug!("getting average age");
        Ok(self.students.get_average_age().await?)
    }

    pub async fn get_five_latest_students(&self) -> Result<Vec<Student>, AppError> {
        tracing::info!("getting five latest students");
        Ok(self.students.get_five_latest_students().await?)
    }

    /// Uppercased first names starting with `letter` (case-sensitive), sorted, duplicates kept.
    pub async fn get_all_names_begin_with_letter(&self, letter: &str) -> Result<Vec<String>, AppError> {
        tracing::info!(letter, "getting first names by initial letter");
        let students = self.students.find_all().await?;
        Ok(first_names_starting_with(&students, letter))
    }

    /// Mean age computed in-process over every student; 0.0 when there are none.
    pub async fn get_average_age_with_find_all(&self) -> Result<f64, AppError> {
        tracing::info!("computing average age over all students");
        let students = self.students.find_all().await?;
        Ok(mean_age(&students))
    }

    pub fn calculate_example(&self) -> i64 {
        let sum = gauss_sum(GAUSS_UPPER_BOUND);
        tracing::debug!(sum, "calculated closed-form sum");
        sum
    }
}

fn first_names_starting_with(students: &[Student], letter: &str) -> Vec<String> {
    let mut names: Vec<String> = students
        .iter()
        .filter_map(Student::first_name)
        .filter(|name| name.starts_with(letter))
        .map(str::to_uppercase)
        .collect();
    names.sort();
    names
}

fn mean_age(students: &[Student]) -> f64 {
    if students.is_empty() {
        return 0.0;
    }
    let total: i64 = students.iter().map(|s| i64::from(s.age)).sum();
    total as f64 / students.len() as f64
}

/// Sum of 1..=n.
fn gauss_sum(n: i64) -> i64 {
    n * (n + 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    fn service() -> (StudentService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        (StudentService::new(repo.clone(), repo.clone()), repo)
    }

    async fn seed(svc: &StudentService, names: &[(&str, i32)]) -> Vec<Student> {
        let mut out = Vec::new();
        for (name, age) in names {
            out.push(svc.create_student(Student::new(*name, *age)).await.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn create_ignores_client_id() {
        let (svc, _) = service();
        let mut s = Student::new("Гарри Поттер", 11);
        s.id = Some(500);
        let created = svc.create_student(s).await.unwrap();
        assert_eq!(created.id, Some(1));
        assert_eq!(created.name, "Гарри Поттер");
    }

    #[tokio::test]
    async fn update_unknown_student_fails_with_its_id() {
        let (svc, _) = service();
        let mut s = Student::new("Невилл Долгопупс", 11);
        s.id = Some(77);
        let err = svc.update_student(s).await.unwrap_err();
        assert!(matches!(err, AppError::StudentNotFound(LookupKey::Id(77))));
    }

    #[tokio::test]
    async fn update_after_delete_does_not_resurrect() {
        let (svc, _) = service();
        let created = seed(&svc, &[("Седрик Диггори", 17)]).await.remove(0);
        let id = created.id.unwrap();
        svc.delete_student(id).await.unwrap();

        let err = svc.update_student(created).await.unwrap_err();
        assert!(matches!(err, AppError::StudentNotFound(LookupKey::Id(n)) if n == id));
        assert_eq!(svc.get_student(id).await.unwrap(), None);

        let next = seed(&svc, &[("Чжоу Чанг", 16)]).await.remove(0);
        assert_eq!(next.id, Some(id + 1));
    }

    #[tokio::test]
    async fn update_without_id_is_bad_request() {
        let (svc, _) = service();
        let err = svc.update_student(Student::new("Рон Уизли", 11)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn update_persists_all_fields() {
        let (svc, repo) = service();
        let faculty = FacultyRepository::insert(repo.as_ref(), &crate::model::Faculty::new("Гриффиндор", "Красный"))
            .await
            .unwrap();
        let created = seed(&svc, &[("Рон Уизли", 11)]).await.remove(0);

        let replacement = Student {
            id: created.id,
            name: "Рональд Уизли".into(),
            age: 12,
            faculty_id: faculty.id,
        };
        let updated = svc.update_student(replacement.clone()).await.unwrap();
        assert_eq!(updated, replacement);
        assert_eq!(svc.get_student(created.id.unwrap()).await.unwrap(), Some(replacement));
    }

    #[tokio::test]
    async fn age_filters_reject_invalid_input() {
        let (svc, _) = service();
        seed(
            &svc,
            &[
                ("Гарри Поттер", 11),
                ("Гермиона Грейнджер", 12),
                ("Призрак", 0),
                ("Полтергейст", -3),
            ],
        )
        .await;

        assert!(svc.find_student_by_age(0).await.unwrap().is_empty());
        assert!(svc.find_student_by_age(-3).await.unwrap().is_empty());
        assert_eq!(svc.find_student_by_age(11).await.unwrap().len(), 1);

        assert!(svc.find_by_age_between(0, 12).await.unwrap().is_empty());
        assert!(svc.find_by_age_between(-3, 12).await.unwrap().is_empty());
        assert!(svc.find_by_age_between(12, 12).await.unwrap().is_empty());
        assert!(svc.find_by_age_between(12, 11).await.unwrap().is_empty());
        assert_eq!(svc.find_by_age_between(11, 12).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn names_beginning_with_letter_are_uppercased_and_sorted() {
        let (svc, _) = service();
        seed(
            &svc,
            &[("Гермиона Грейнджер", 12), ("Рон Уизли", 11), ("Гарри Поттер", 11)],
        )
        .await;

        let names = svc.get_all_names_begin_with_letter("Г").await.unwrap();
        assert_eq!(names, vec!["ГАРРИ".to_string(), "ГЕРМИОНА".to_string()]);
        assert!(svc.get_all_names_begin_with_letter("г").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn names_keep_duplicates() {
        let (svc, _) = service();
        seed(&svc, &[("Фред Уизли", 13), ("Фред Другой", 14)]).await;
        assert_eq!(
            svc.get_all_names_begin_with_letter("Ф").await.unwrap(),
            vec!["ФРЕД".to_string(), "ФРЕД".to_string()]
        );
    }

    #[tokio::test]
    async fn averages_agree_and_default_to_zero() {
        let (svc, _) = service();
        assert_eq!(svc.get_average_age_with_find_all().await.unwrap(), 0.0);
        assert_eq!(svc.get_average_age().await.unwrap(), 0.0);

        seed(&svc, &[("a", 11), ("b", 12)]).await;
        assert_eq!(svc.get_average_age_with_find_all().await.unwrap(), 11.5);
        assert_eq!(svc.get_average_age().await.unwrap(), 11.5);
        assert_eq!(svc.count_all_students().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn faculty_by_student_name_uses_first_match() {
        let (svc, repo) = service();
        let griffindor = FacultyRepository::insert(repo.as_ref(), &crate::model::Faculty::new("Гриффиндор", "Красный"))
            .await
            .unwrap();
        let slytherin = FacultyRepository::insert(repo.as_ref(), &crate::model::Faculty::new("Слизерин", "Зеленый"))
            .await
            .unwrap();
        svc.create_student(Student::new("Том", 11).with_faculty(slytherin.id.unwrap()))
            .await
            .unwrap();
        svc.create_student(Student::new("Том", 12).with_faculty(griffindor.id.unwrap()))
            .await
            .unwrap();
        svc.create_student(Student::new("Без факультета", 12)).await.unwrap();

        assert_eq!(svc.find_faculty_by_student_name("Том").await.unwrap(), Some(slytherin));
        assert_eq!(svc.find_faculty_by_student_name("Без факультета").await.unwrap(), None);
        assert_eq!(svc.find_faculty_by_student_name("Никто").await.unwrap(), None);
    }

    #[test]
    fn calculate_example_is_gauss_sum() {
        let (svc, _) = service();
        assert_eq!(svc.calculate_example(), 500_000_500_000);
        assert_eq!(gauss_sum(10), (1..=10).sum::<i64>());
    }
}
