//! Staff use-case service.

use crate::dto::check;
use crate::dto::staff::{CreateStaffDto, UpdateStaffDto};
use crate::model::staff::{Staff, StaffSummary};
use crate::repo::staff_repo::{
    NewStaff, StaffChanges, StaffFilter, StaffListQuery, StaffRepository,
};
use crate::service::{logged, require_id, require_id_and_check, ServiceResult};

pub struct StaffService<R: StaffRepository> {
    repo: R,
}

impl<R: StaffRepository> StaffService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers an existing user as staff, optionally assigned to a class.
    pub fn create(&self, dto: &CreateStaffDto) -> ServiceResult<StaffSummary> {
        logged("staff_create", || {
            check(dto)?;
            let class_id = match dto.class_id.as_deref() {
                Some(raw) => Some(require_id("classId", raw)?),
                None => None,
            };
            let staff = NewStaff {
                user_id: require_id("userId", &dto.user_id)?,
                class_id,
            };
            Ok(self.repo.create(&staff)?)
        })
    }

    pub fn find_all(&self, query: &StaffListQuery) -> ServiceResult<Vec<Staff>> {
        logged("staff_list", || Ok(self.repo.find_all(query)?))
    }

    pub fn find_by_pk(&self, id: &str) -> ServiceResult<Option<Staff>> {
        logged("staff_get", || {
            let id = require_id("id", id)?;
            Ok(self.repo.find(id)?)
        })
    }

    /// Reassigns a staff member and returns the updated snapshot.
    pub fn find_and_update_by_id(
        &self,
        id: &str,
        dto: &UpdateStaffDto,
    ) -> ServiceResult<Option<Staff>> {
        logged("staff_update", || {
            let id = require_id_and_check("id", id, dto)?;
            let changes = StaffChanges {
                class_id: Some(require_id("classId", &dto.class_id)?),
            };
            Ok(self.repo.find_and_update_by_id(id, &changes)?)
        })
    }

    pub fn delete(&self, id: &str) -> ServiceResult<bool> {
        logged("staff_delete", || {
            let id = require_id("id", id)?;
            Ok(self.repo.delete(&StaffFilter::ById(id))?)
        })
    }
}
