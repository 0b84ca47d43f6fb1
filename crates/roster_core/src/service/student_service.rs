//! Student use-case service.

use crate::dto::check;
use crate::dto::student::{CreateStudentDto, UpdateStudentDto};
use crate::model::student::{Student, StudentSummary};
use crate::repo::student_repo::{NewStudent, StudentChanges, StudentListQuery, StudentRepository};
use crate::service::{logged, require_id, require_id_and_check, ServiceResult};

pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Enrolls an existing user into an existing class.
    pub fn create(&self, dto: &CreateStudentDto) -> ServiceResult<StudentSummary> {
        logged("student_create", || {
            check(dto)?;
            let student = NewStudent {
                user_id: require_id("userId", &dto.user_id)?,
                class_id: require_id("classId", &dto.class_id)?,
            };
            Ok(self.repo.create(&student)?)
        })
    }

    pub fn find_all(&self, query: &StudentListQuery) -> ServiceResult<Vec<Student>> {
        logged("student_list", || Ok(self.repo.find_all(query)?))
    }

    pub fn find_by_pk(&self, id: &str) -> ServiceResult<Option<Student>> {
        logged("student_get", || {
            let id = require_id("id", id)?;
            Ok(self.repo.find(id)?)
        })
    }

    /// Moves a student to another class.
    ///
    /// Returns the number of changed rows, or `None` when the student is unknown.
    pub fn find_and_update_by_id(
        &self,
        id: &str,
        dto: &UpdateStudentDto,
    ) -> ServiceResult<Option<usize>> {
        logged("student_update", || {
            let id = require_id_and_check("id", id, dto)?;
            let changes = StudentChanges {
                class_id: Some(require_id("classId", &dto.class_id)?),
            };
            Ok(self.repo.find_and_update_by_id(id, &changes)?)
        })
    }

    pub fn delete(&self, id: &str) -> ServiceResult<bool> {
        logged("student_delete", || {
            let id = require_id("id", id)?;
            Ok(self.repo.delete(id)?)
        })
    }
}
