//! HR vertical slice: employees, departments, jobs and user accounts.
//!
//! Every entity module exposes the same five operations (`create`, `get`,
//! `list`, `update`, `delete`) over any sea-orm connection. The database is
//! the only source of truth: nothing is cached, and uniqueness and
//! referential integrity are enforced by its indexes and foreign keys, with
//! violations surfacing as [`HrError::Conflict`].

pub mod department;
pub mod employee;
mod error;
pub mod input;
pub mod job;
pub mod password;
pub mod seed;
pub mod user;

pub use error::{HrError, HrResult};
pub use input::{MAX_PAGE_SIZE, Page};
