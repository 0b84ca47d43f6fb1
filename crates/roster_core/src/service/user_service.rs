//! User use-case service.
//!
//! # Invariants
//! - `age`, when supplied, lies in `0..=25`.
//! - Deleting a user also removes its student and staff rows.

use crate::dto::check;
use crate::dto::user::{CreateUserDto, UpdateUserDto};
use crate::model::associations::dependents_of;
use crate::model::user::{User, UserSummary};
use crate::repo::user_repo::{NewUser, UserChanges, UserListQuery, UserRepository};
use crate::service::{logged, require_id, require_id_and_check, ServiceResult};
use log::debug;

/// Use-case service wrapper for user CRUD operations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new user.
    pub fn create(&self, dto: &CreateUserDto) -> ServiceResult<UserSummary> {
        logged("user_create", || {
            check(dto)?;
            Ok(self.repo.create(&NewUser {
                first_name: dto.first_name.clone(),
                last_name: dto.last_name.clone(),
                age: dto.age,
            })?)
        })
    }

    pub fn find_all(&self, query: &UserListQuery) -> ServiceResult<Vec<User>> {
        logged("user_list", || Ok(self.repo.find_all(query)?))
    }

    pub fn find_by_pk(&self, id: &str) -> ServiceResult<Option<User>> {
        logged("user_get", || {
            let id = require_id("id", id)?;
            Ok(self.repo.find(id)?)
        })
    }

    /// Applies a partial update.
    ///
    /// Returns the number of changed rows, or `None` when the user is unknown.
    pub fn find_and_update_by_id(
        &self,
        id: &str,
        dto: &UpdateUserDto,
    ) -> ServiceResult<Option<usize>> {
        logged("user_update", || {
            let id = require_id_and_check("id", id, dto)?;
            let changes = UserChanges {
                first_name: dto.first_name.clone(),
                last_name: dto.last_name.clone(),
                age: dto.age,
            };
            Ok(self.repo.find_and_update_by_id(id, &changes)?)
        })
    }

    pub fn delete(&self, id: &str) -> ServiceResult<bool> {
        logged("user_delete", || {
            let id = require_id("id", id)?;
            let deleted = self.repo.delete(id)?;
            if deleted {
                let cascaded: Vec<_> = dependents_of(User::TABLE).map(|a| a.child).collect();
                debug!(
                    "event=user_delete module=service cascade={}",
                    cascaded.join(",")
                );
            }
            Ok(deleted)
        })
    }
}
