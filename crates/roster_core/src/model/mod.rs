//! Domain records for users, classes, students and staff.
//!
//! # Responsibility
//! - Define the plain snapshot shapes returned by repositories.
//! - Declare the relations between records (`associations`).
//!
//! # Invariants
//! - Every record is identified by a UUID generated by core on creation.
//! - Records are detached copies; mutating one never touches storage.

pub mod associations;
pub mod class;
pub mod staff;
pub mod student;
pub mod user;
