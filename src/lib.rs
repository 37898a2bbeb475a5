pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{Database, JsonStore};
pub use crate::config::AppConfig;
pub use crate::core::{BonusCalculator, EmployeeRegistry, EmployeeSubject};
pub use crate::domain::{Company, Department, Employee, EmployeeRef, Project, ProjectStatus, Worker};
pub use crate::utils::error::{Result, StaffingError};
