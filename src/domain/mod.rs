// Domain layer: entities, serialized records and capability traits.

pub mod company;
pub mod department;
pub mod employee;
pub mod model;
pub mod ports;
pub mod project;

pub use crate::domain::company::Company;
pub use crate::domain::department::Department;
pub use crate::domain::employee::{
    Developer, Employee, EmployeeRef, EmployeeType, Manager, Salesperson, Seniority, Staff,
};
pub use crate::domain::model::{BonusParams, EmployeeParams};
pub use crate::domain::ports::{BonusStrategy, EmployeeFactory, Observer, Worker};
pub use crate::domain::project::{Project, ProjectStatus};
