//! sea-orm entities for the staffing schema.
//!
//! Each module maps one table. Relations are declared for explicit joins
//! only; nothing here loads related rows on its own.

pub mod department;
pub mod employee;
pub mod job;
pub mod user;

pub mod prelude {
    pub use super::department::Entity as Department;
    pub use super::employee::Entity as Employee;
    pub use super::job::Entity as Job;
    pub use super::user::Entity as User;
}
