//! Instance loading.
//!
//! Turns problem files into validated [`ProjectInstance`](crate::models::ProjectInstance)s.
//! The core algorithms never touch the file system.

pub mod dzn;
