use crate::domain::employee::{Employee, EmployeeRef};
use crate::domain::model::DepartmentRecord;
use crate::domain::ports::Worker;
use crate::utils::error::{Result, StaffingError};
use crate::utils::validation::validate_non_empty_string;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// Ordered, id-unique owner of employees. Not `Clone`: a copy would share
/// the same employee handles and break single ownership.
#[derive(Debug)]
pub struct Department {
    name: String,
    employees: Vec<EmployeeRef>,
}

impl Department {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_non_empty_string("department.name", &name)?;
        Ok(Self {
            name,
            employees: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_non_empty_string("department.name", &name)?;
        self.name = name;
        Ok(())
    }

    /// Takes ownership of `employee`. Fails if an employee with the same id is present.
    pub fn add_employee(&mut self, employee: EmployeeRef) -> Result<()> {
        let id = employee.borrow().id();
        if self.contains_id(id) {
            return Err(StaffingError::DuplicateId {
                entity: "employee",
                id: id.to_string(),
            });
        }
        tracing::debug!("Department '{}': added employee {}", self.name, id);
        self.employees.push(employee);
        Ok(())
    }

    /// Wraps a freshly built employee in a shared handle and adds it.
    pub fn hire(&mut self, employee: impl Into<Employee>) -> Result<EmployeeRef> {
        let handle = employee.into().into_shared();
        self.add_employee(handle.clone())?;
        Ok(handle)
    }

    pub fn remove_employee(&mut self, employee_id: i64) -> Result<EmployeeRef> {
        let position = self
            .position_of(employee_id)
            .ok_or(StaffingError::EmployeeNotFound { id: employee_id })?;
        tracing::debug!("Department '{}': removed employee {}", self.name, employee_id);
        Ok(self.employees.remove(position))
    }

    /// Copy of the member list; pushing to it never touches the department.
    pub fn employees(&self) -> Vec<EmployeeRef> {
        self.employees.clone()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EmployeeRef> {
        self.employees.get(index)
    }

    pub fn contains(&self, employee: &Employee) -> bool {
        self.contains_id(employee.id())
    }

    pub fn contains_id(&self, employee_id: i64) -> bool {
        self.position_of(employee_id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmployeeRef> {
        self.employees.iter()
    }

    pub fn find_employee_by_id(&self, employee_id: i64) -> Option<EmployeeRef> {
        self.position_of(employee_id)
            .map(|position| self.employees[position].clone())
    }

    pub fn calculate_total_salary(&self) -> f64 {
        self.employees
            .iter()
            .map(|employee| employee.borrow().calculate_salary())
            .sum()
    }

    /// Head count per variant tag.
    pub fn employee_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for employee in &self.employees {
            let tag = employee.borrow().employee_type().as_str().to_string();
            *counts.entry(tag).or_insert(0) += 1;
        }
        counts
    }

    pub fn to_record(&self) -> DepartmentRecord {
        DepartmentRecord {
            name: self.name.clone(),
            employees: self
                .employees
                .iter()
                .map(|employee| employee.borrow().to_record())
                .collect(),
        }
    }

    /// Rebuilds the department in record order. A repeated id is an error, not a skip.
    pub fn from_record(record: &DepartmentRecord) -> Result<Self> {
        let mut department = Self::new(record.name.clone())?;
        for employee_record in &record.employees {
            department.hire(Employee::from_record(employee_record)?)?;
        }
        Ok(department)
    }

    fn position_of(&self, employee_id: i64) -> Option<usize> {
        self.employees
            .iter()
            .position(|employee| employee.borrow().id() == employee_id)
    }
}

impl Index<usize> for Department {
    type Output = EmployeeRef;

    fn index(&self, index: usize) -> &EmployeeRef {
        &self.employees[index]
    }
}

impl<'a> IntoIterator for &'a Department {
    type Item = &'a EmployeeRef;
    type IntoIter = std::slice::Iter<'a, EmployeeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.employees.iter()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Department '{}' (employees: {})", self.name, self.len())
    }
}
