use crate::domain::employee::{Employee, EmployeeType};
use crate::domain::model::{BonusParams, EmployeeParams};
use crate::utils::error::Result;

/// Capability surface shared by every employee variant.
pub trait Worker {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn department(&self) -> &str;
    fn base_salary(&self) -> f64;
    fn calculate_salary(&self) -> f64;
    fn employee_type(&self) -> EmployeeType;
    /// Human-readable description including the computed salary.
    fn info(&self) -> String;
}

/// Creation strategy registered under a type tag.
pub trait EmployeeFactory {
    fn create_employee(&self, params: &EmployeeParams) -> Result<Employee>;
}

impl<F> EmployeeFactory for F
where
    F: Fn(&EmployeeParams) -> Result<Employee>,
{
    fn create_employee(&self, params: &EmployeeParams) -> Result<Employee> {
        self(params)
    }
}

pub trait BonusStrategy {
    fn name(&self) -> &str;
    fn calculate_bonus(&self, employee: &dyn Worker, params: &BonusParams) -> Result<f64>;
}

/// Receives broadcasts from a [`Subject`](crate::core::notification::Subject).
pub trait Observer {
    fn update(&self, event_type: &str, data: &serde_json::Value);
}
