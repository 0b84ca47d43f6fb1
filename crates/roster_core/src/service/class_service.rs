//! Class use-case service.

use crate::dto::check;
use crate::dto::class::{CreateClassDto, UpdateClassDto};
use crate::model::associations::dependents_of;
use crate::model::class::{Class, ClassSummary};
use crate::repo::class_repo::{
    ClassChanges, ClassFilter, ClassListQuery, ClassRepository, NewClass,
};
use crate::service::{logged, require_id, require_id_and_check, ServiceResult};
use log::debug;

pub struct ClassService<R: ClassRepository> {
    repo: R,
}

impl<R: ClassRepository> ClassService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create(&self, dto: &CreateClassDto) -> ServiceResult<ClassSummary> {
        logged("class_create", || {
            check(dto)?;
            Ok(self.repo.create(&NewClass {
                name: dto.name.clone(),
            })?)
        })
    }

    pub fn find_all(&self, query: &ClassListQuery) -> ServiceResult<Vec<Class>> {
        logged("class_list", || Ok(self.repo.find_all(query)?))
    }

    pub fn find_by_pk(&self, id: &str) -> ServiceResult<Option<Class>> {
        logged("class_get", || {
            let id = require_id("id", id)?;
            Ok(self.repo.find(id)?)
        })
    }

    /// Renames a class and returns the updated snapshot, `None` when unknown.
    pub fn find_and_update_by_id(
        &self,
        id: &str,
        dto: &UpdateClassDto,
    ) -> ServiceResult<Option<Class>> {
        logged("class_update", || {
            let id = require_id_and_check("id", id, dto)?;
            let changes = ClassChanges {
                name: Some(dto.name.clone()),
            };
            Ok(self.repo.find_and_update_by_id(id, &changes)?)
        })
    }

    /// Deletes a class together with its enrolled students and assigned staff.
    pub fn delete(&self, id: &str) -> ServiceResult<bool> {
        logged("class_delete", || {
            let id = require_id("id", id)?;
            let deleted = self.repo.delete(&ClassFilter::ById(id))?;
            if deleted {
                let cascaded: Vec<_> = dependents_of(Class::TABLE).map(|a| a.child).collect();
                debug!(
                    "event=class_delete module=service cascade={}",
                    cascaded.join(",")
                );
            }
            Ok(deleted)
        })
    }
}
