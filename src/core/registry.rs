//! Factory-method registry keyed by lower-cased type tag.

use crate::domain::employee::{Developer, Employee, EmployeeType, Manager, Salesperson, Staff};
use crate::domain::model::EmployeeParams;
use crate::domain::ports::EmployeeFactory;
use crate::utils::error::{Result, StaffingError};
use std::collections::BTreeMap;

/// Tag that always builds the base variant; it cannot be re-registered.
pub const BASE_EMPLOYEE_TAG: &str = "employee";

pub struct ManagerFactory;

impl EmployeeFactory for ManagerFactory {
    fn create_employee(&self, params: &EmployeeParams) -> Result<Employee> {
        Ok(Manager::from_params(params)?.into())
    }
}

pub struct DeveloperFactory;

impl EmployeeFactory for DeveloperFactory {
    fn create_employee(&self, params: &EmployeeParams) -> Result<Employee> {
        Ok(Developer::from_params(params)?.into())
    }
}

pub struct SalespersonFactory;

impl EmployeeFactory for SalespersonFactory {
    fn create_employee(&self, params: &EmployeeParams) -> Result<Employee> {
        Ok(Salesperson::from_params(params)?.into())
    }
}

/// Owned by whoever needs dynamic construction; there is no global instance.
pub struct EmployeeRegistry {
    factories: BTreeMap<String, Box<dyn EmployeeFactory>>,
}

impl EmployeeRegistry {
    /// A registry with no factories; only the reserved base tag resolves.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.insert("manager", Box::new(ManagerFactory));
        registry.insert("developer", Box::new(DeveloperFactory));
        registry.insert("salesperson", Box::new(SalespersonFactory));
        registry
    }

    /// Registers (or replaces) the factory for `tag`.
    pub fn register(&mut self, tag: &str, factory: impl EmployeeFactory + 'static) -> Result<()> {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            return Err(StaffingError::validation("type", "type tag cannot be empty"));
        }
        if tag == BASE_EMPLOYEE_TAG {
            return Err(StaffingError::validation(
                "type",
                format!("'{}' is reserved for the base variant", BASE_EMPLOYEE_TAG),
            ));
        }
        tracing::debug!("Registered employee factory '{}'", tag);
        self.insert(&tag, Box::new(factory));
        Ok(())
    }

    pub fn create_employee(&self, employee_type: &str, params: &EmployeeParams) -> Result<Employee> {
        let tag = employee_type.trim().to_lowercase();
        if tag == BASE_EMPLOYEE_TAG {
            return Employee::from_params(EmployeeType::Employee, params);
        }
        match self.factories.get(&tag) {
            Some(factory) => factory.create_employee(params),
            None => Err(StaffingError::validation(
                "type",
                format!(
                    "unknown employee type '{}'. Registered types: {}",
                    employee_type,
                    self.registered_types().join(", ")
                ),
            )),
        }
    }

    /// Registered tags in sorted order, followed by the reserved base tag.
    pub fn registered_types(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.factories.keys().cloned().collect();
        tags.push(BASE_EMPLOYEE_TAG.to_string());
        tags
    }

    pub fn is_registered(&self, employee_type: &str) -> bool {
        let tag = employee_type.trim().to_lowercase();
        tag == BASE_EMPLOYEE_TAG || self.factories.contains_key(&tag)
    }

    fn insert(&mut self, tag: &str, factory: Box<dyn EmployeeFactory>) {
        self.factories.insert(tag.to_string(), factory);
    }
}

impl Default for EmployeeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Convenience factory for the base variant, usable under a custom tag.
pub fn staff_factory(params: &EmployeeParams) -> Result<Employee> {
    Ok(Staff::from_params(params)?.into())
}
