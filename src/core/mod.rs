pub mod bonus;
pub mod notification;
pub mod registry;

pub use crate::core::bonus::{BonusCalculator, PerformanceBonus, ProjectBonus, SeniorityBonus};
pub use crate::core::notification::{EmailNotifier, EmployeeSubject, NotificationLog, Subject};
pub use crate::core::registry::EmployeeRegistry;
