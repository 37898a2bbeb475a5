//! Employee variants and the closed [`Employee`] sum type.
//!
//! Every variant embeds a [`Staff`] block with the shared fields. Setters
//! validate before writing, so a rejected value never leaves a partially
//! updated employee behind.

use crate::domain::model::{EmployeeParams, EmployeeRecord};
use crate::domain::ports::Worker;
use crate::utils::error::{Result, StaffingError};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_positive_id, validate_range,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::rc::Rc;
use std::str::FromStr;

/// Shared handle: departments own it, project teams hold clones of it.
pub type EmployeeRef = Rc<RefCell<Employee>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmployeeType {
    Employee,
    Manager,
    Developer,
    Salesperson,
}

impl EmployeeType {
    pub const ALL: [EmployeeType; 4] = [
        EmployeeType::Employee,
        EmployeeType::Manager,
        EmployeeType::Developer,
        EmployeeType::Salesperson,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeType::Employee => "Employee",
            EmployeeType::Manager => "Manager",
            EmployeeType::Developer => "Developer",
            EmployeeType::Salesperson => "Salesperson",
        }
    }
}

impl fmt::Display for EmployeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeType {
    type Err = StaffingError;

    fn from_str(value: &str) -> Result<Self> {
        EmployeeType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| {
                StaffingError::validation(
                    "type",
                    format!(
                        "unknown employee type '{}', expected one of: {}",
                        value,
                        EmployeeType::ALL.map(|kind| kind.as_str()).join(", ")
                    ),
                )
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    #[default]
    Junior,
    Middle,
    Senior,
}

impl Seniority {
    pub fn multiplier(&self) -> f64 {
        match self {
            Seniority::Junior => 1.0,
            Seniority::Middle => 1.5,
            Seniority::Senior => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Middle => "middle",
            Seniority::Senior => "senior",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Seniority {
    type Err = StaffingError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "junior" => Ok(Seniority::Junior),
            "middle" => Ok(Seniority::Middle),
            "senior" => Ok(Seniority::Senior),
            other => Err(StaffingError::validation(
                "seniority_level",
                format!("must be one of: junior, middle, senior, got '{}'", other),
            )),
        }
    }
}

/// The base variant, and the shared block every other variant embeds.
#[derive(Debug, Clone)]
pub struct Staff {
    id: i64,
    name: String,
    department: String,
    base_salary: f64,
}

impl Staff {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        department: impl Into<String>,
        base_salary: f64,
    ) -> Result<Self> {
        let name = name.into();
        let department = department.into();
        validate_positive_id("id", id)?;
        validate_non_empty_string("name", &name)?;
        validate_non_empty_string("department", &department)?;
        validate_non_negative("base_salary", base_salary)?;

        Ok(Self {
            id,
            name,
            department,
            base_salary,
        })
    }

    pub fn from_params(params: &EmployeeParams) -> Result<Self> {
        Self::new(
            params.id,
            params.name.clone(),
            params.department.clone(),
            params.base_salary,
        )
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_non_empty_string("name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_department(&mut self, department: impl Into<String>) -> Result<()> {
        let department = department.into();
        validate_non_empty_string("department", &department)?;
        self.department = department;
        Ok(())
    }

    pub fn set_base_salary(&mut self, base_salary: f64) -> Result<()> {
        validate_non_negative("base_salary", base_salary)?;
        self.base_salary = base_salary;
        Ok(())
    }

    fn fields(&self) -> String {
        format!(
            "id: {}, name: {}, department: {}, base salary: {}",
            self.id, self.name, self.department, self.base_salary
        )
    }

    fn record(&self, employee_type: EmployeeType) -> EmployeeRecord {
        EmployeeRecord {
            employee_type: employee_type.as_str().to_string(),
            id: self.id,
            name: self.name.clone(),
            department: self.department.clone(),
            base_salary: self.base_salary,
            bonus: None,
            tech_stack: None,
            seniority_level: None,
            commission_rate: None,
            sales_volume: None,
        }
    }
}

impl Worker for Staff {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn department(&self) -> &str {
        &self.department
    }

    fn base_salary(&self) -> f64 {
        self.base_salary
    }

    fn calculate_salary(&self) -> f64 {
        self.base_salary
    }

    fn employee_type(&self) -> EmployeeType {
        EmployeeType::Employee
    }

    fn info(&self) -> String {
        format!(
            "Employee [{}, final salary: {}]",
            self.fields(),
            self.calculate_salary()
        )
    }
}

/// Base salary plus a fixed bonus.
#[derive(Debug, Clone)]
pub struct Manager {
    staff: Staff,
    bonus: f64,
}

impl Manager {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        department: impl Into<String>,
        base_salary: f64,
        bonus: f64,
    ) -> Result<Self> {
        let staff = Staff::new(id, name, department, base_salary)?;
        validate_non_negative("bonus", bonus)?;
        Ok(Self { staff, bonus })
    }

    pub fn from_params(params: &EmployeeParams) -> Result<Self> {
        let staff = Staff::from_params(params)?;
        let bonus = params.bonus.unwrap_or(0.0);
        validate_non_negative("bonus", bonus)?;
        Ok(Self { staff, bonus })
    }

    pub fn bonus(&self) -> f64 {
        self.bonus
    }

    pub fn set_bonus(&mut self, bonus: f64) -> Result<()> {
        validate_non_negative("bonus", bonus)?;
        self.bonus = bonus;
        Ok(())
    }
}

impl Worker for Manager {
    fn id(&self) -> i64 {
        self.staff.id
    }

    fn name(&self) -> &str {
        &self.staff.name
    }

    fn department(&self) -> &str {
        &self.staff.department
    }

    fn base_salary(&self) -> f64 {
        self.staff.base_salary
    }

    fn calculate_salary(&self) -> f64 {
        self.staff.base_salary + self.bonus
    }

    fn employee_type(&self) -> EmployeeType {
        EmployeeType::Manager
    }

    fn info(&self) -> String {
        format!(
            "Manager [{}, bonus: {}, final salary: {}]",
            self.staff.fields(),
            self.bonus,
            self.calculate_salary()
        )
    }
}

/// Base salary scaled by the seniority multiplier.
#[derive(Debug, Clone)]
pub struct Developer {
    staff: Staff,
    tech_stack: Vec<String>,
    seniority: Seniority,
}

impl Developer {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        department: impl Into<String>,
        base_salary: f64,
        tech_stack: Vec<String>,
        seniority: Seniority,
    ) -> Result<Self> {
        let staff = Staff::new(id, name, department, base_salary)?;
        let mut developer = Self {
            staff,
            tech_stack: Vec::with_capacity(tech_stack.len()),
            seniority,
        };
        for skill in &tech_stack {
            validate_non_empty_string("tech_stack", skill)?;
        }
        for skill in tech_stack {
            developer.push_skill(skill);
        }
        Ok(developer)
    }

    pub fn from_params(params: &EmployeeParams) -> Result<Self> {
        let seniority = match params.seniority_level.as_deref() {
            Some(level) => level.parse()?,
            None => Seniority::Junior,
        };
        let staff = Staff::from_params(params)?;
        Self::new(
            staff.id,
            staff.name,
            staff.department,
            staff.base_salary,
            params.tech_stack.clone(),
            seniority,
        )
    }

    pub fn tech_stack(&self) -> &[String] {
        &self.tech_stack
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.tech_stack.iter().map(String::as_str)
    }

    /// Appends a skill; a skill already in the stack is ignored.
    pub fn add_skill(&mut self, skill: impl Into<String>) -> Result<()> {
        let skill = skill.into();
        validate_non_empty_string("tech_stack", &skill)?;
        self.push_skill(skill);
        Ok(())
    }

    pub fn seniority_level(&self) -> Seniority {
        self.seniority
    }

    pub fn set_seniority_level(&mut self, seniority: Seniority) {
        self.seniority = seniority;
    }

    fn push_skill(&mut self, skill: String) {
        if !self.tech_stack.contains(&skill) {
            self.tech_stack.push(skill);
        }
    }
}

impl Worker for Developer {
    fn id(&self) -> i64 {
        self.staff.id
    }

    fn name(&self) -> &str {
        &self.staff.name
    }

    fn department(&self) -> &str {
        &self.staff.department
    }

    fn base_salary(&self) -> f64 {
        self.staff.base_salary
    }

    fn calculate_salary(&self) -> f64 {
        self.staff.base_salary * self.seniority.multiplier()
    }

    fn employee_type(&self) -> EmployeeType {
        EmployeeType::Developer
    }

    fn info(&self) -> String {
        format!(
            "Developer [{}, seniority: {}, tech stack: [{}], final salary: {}]",
            self.staff.fields(),
            self.seniority,
            self.tech_stack.join(", "),
            self.calculate_salary()
        )
    }
}

/// Base salary plus commission on accumulated sales.
#[derive(Debug, Clone)]
pub struct Salesperson {
    staff: Staff,
    commission_rate: f64,
    sales_volume: f64,
}

impl Salesperson {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        department: impl Into<String>,
        base_salary: f64,
        commission_rate: f64,
        sales_volume: f64,
    ) -> Result<Self> {
        let staff = Staff::new(id, name, department, base_salary)?;
        validate_range("commission_rate", commission_rate, 0.0, 1.0)?;
        validate_non_negative("sales_volume", sales_volume)?;
        Ok(Self {
            staff,
            commission_rate,
            sales_volume,
        })
    }

    pub fn from_params(params: &EmployeeParams) -> Result<Self> {
        let staff = Staff::from_params(params)?;
        Self::new(
            staff.id,
            staff.name,
            staff.department,
            staff.base_salary,
            params.commission_rate.unwrap_or(0.0),
            params.sales_volume.unwrap_or(0.0),
        )
    }

    pub fn commission_rate(&self) -> f64 {
        self.commission_rate
    }

    pub fn set_commission_rate(&mut self, rate: f64) -> Result<()> {
        validate_range("commission_rate", rate, 0.0, 1.0)?;
        self.commission_rate = rate;
        Ok(())
    }

    pub fn sales_volume(&self) -> f64 {
        self.sales_volume
    }

    pub fn set_sales_volume(&mut self, volume: f64) -> Result<()> {
        validate_non_negative("sales_volume", volume)?;
        self.sales_volume = volume;
        Ok(())
    }

    pub fn add_sales(&mut self, amount: f64) -> Result<()> {
        validate_non_negative("new_sales", amount)?;
        let total = self.sales_volume + amount;
        validate_non_negative("sales_volume", total)?;
        self.sales_volume = total;
        Ok(())
    }
}

impl Worker for Salesperson {
    fn id(&self) -> i64 {
        self.staff.id
    }

    fn name(&self) -> &str {
        &self.staff.name
    }

    fn department(&self) -> &str {
        &self.staff.department
    }

    fn base_salary(&self) -> f64 {
        self.staff.base_salary
    }

    fn calculate_salary(&self) -> f64 {
        self.staff.base_salary + self.sales_volume * self.commission_rate
    }

    fn employee_type(&self) -> EmployeeType {
        EmployeeType::Salesperson
    }

    fn info(&self) -> String {
        format!(
            "Salesperson [{}, commission rate: {}, sales volume: {}, final salary: {}]",
            self.staff.fields(),
            self.commission_rate,
            self.sales_volume,
            self.calculate_salary()
        )
    }
}

#[derive(Debug, Clone)]
pub enum Employee {
    Staff(Staff),
    Manager(Manager),
    Developer(Developer),
    Salesperson(Salesperson),
}

impl Employee {
    /// Builds the variant selected by `kind`. Adding a variant means adding an arm here.
    pub fn from_params(kind: EmployeeType, params: &EmployeeParams) -> Result<Self> {
        Ok(match kind {
            EmployeeType::Employee => Employee::Staff(Staff::from_params(params)?),
            EmployeeType::Manager => Employee::Manager(Manager::from_params(params)?),
            EmployeeType::Developer => Employee::Developer(Developer::from_params(params)?),
            EmployeeType::Salesperson => {
                Employee::Salesperson(Salesperson::from_params(params)?)
            }
        })
    }

    pub fn from_record(record: &EmployeeRecord) -> Result<Self> {
        let kind: EmployeeType = record.employee_type.parse()?;
        Self::from_params(kind, &record.params())
    }

    pub fn to_record(&self) -> EmployeeRecord {
        match self {
            Employee::Staff(staff) => staff.record(EmployeeType::Employee),
            Employee::Manager(manager) => EmployeeRecord {
                bonus: Some(manager.bonus),
                ..manager.staff.record(EmployeeType::Manager)
            },
            Employee::Developer(developer) => EmployeeRecord {
                tech_stack: Some(developer.tech_stack.clone()),
                seniority_level: Some(developer.seniority.as_str().to_string()),
                ..developer.staff.record(EmployeeType::Developer)
            },
            Employee::Salesperson(salesperson) => EmployeeRecord {
                commission_rate: Some(salesperson.commission_rate),
                sales_volume: Some(salesperson.sales_volume),
                ..salesperson.staff.record(EmployeeType::Salesperson)
            },
        }
    }

    pub fn into_shared(self) -> EmployeeRef {
        Rc::new(RefCell::new(self))
    }

    fn staff(&self) -> &Staff {
        match self {
            Employee::Staff(staff) => staff,
            Employee::Manager(manager) => &manager.staff,
            Employee::Developer(developer) => &developer.staff,
            Employee::Salesperson(salesperson) => &salesperson.staff,
        }
    }

    fn staff_mut(&mut self) -> &mut Staff {
        match self {
            Employee::Staff(staff) => staff,
            Employee::Manager(manager) => &mut manager.staff,
            Employee::Developer(developer) => &mut developer.staff,
            Employee::Salesperson(salesperson) => &mut salesperson.staff,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.staff_mut().set_name(name)
    }

    pub fn set_department(&mut self, department: impl Into<String>) -> Result<()> {
        self.staff_mut().set_department(department)
    }

    pub fn set_base_salary(&mut self, base_salary: f64) -> Result<()> {
        self.staff_mut().set_base_salary(base_salary)
    }

    pub fn as_manager_mut(&mut self) -> Option<&mut Manager> {
        match self {
            Employee::Manager(manager) => Some(manager),
            _ => None,
        }
    }

    pub fn as_developer(&self) -> Option<&Developer> {
        match self {
            Employee::Developer(developer) => Some(developer),
            _ => None,
        }
    }

    pub fn as_developer_mut(&mut self) -> Option<&mut Developer> {
        match self {
            Employee::Developer(developer) => Some(developer),
            _ => None,
        }
    }

    pub fn as_salesperson_mut(&mut self) -> Option<&mut Salesperson> {
        match self {
            Employee::Salesperson(salesperson) => Some(salesperson),
            _ => None,
        }
    }

    fn worker(&self) -> &dyn Worker {
        match self {
            Employee::Staff(staff) => staff,
            Employee::Manager(manager) => manager,
            Employee::Developer(developer) => developer,
            Employee::Salesperson(salesperson) => salesperson,
        }
    }
}

impl Worker for Employee {
    fn id(&self) -> i64 {
        self.staff().id
    }

    fn name(&self) -> &str {
        &self.staff().name
    }

    fn department(&self) -> &str {
        &self.staff().department
    }

    fn base_salary(&self) -> f64 {
        self.staff().base_salary
    }

    fn calculate_salary(&self) -> f64 {
        self.worker().calculate_salary()
    }

    fn employee_type(&self) -> EmployeeType {
        self.worker().employee_type()
    }

    fn info(&self) -> String {
        self.worker().info()
    }
}

impl From<Staff> for Employee {
    fn from(staff: Staff) -> Self {
        Employee::Staff(staff)
    }
}

impl From<Manager> for Employee {
    fn from(manager: Manager) -> Self {
        Employee::Manager(manager)
    }
}

impl From<Developer> for Employee {
    fn from(developer: Developer) -> Self {
        Employee::Developer(developer)
    }
}

impl From<Salesperson> for Employee {
    fn from(salesperson: Salesperson) -> Self {
        Employee::Salesperson(salesperson)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.employee_type(), self.staff().fields())
    }
}

/// Identity is the id alone, across variants.
impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Ordering follows the computed salary, not the id.
impl PartialOrd for Employee {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.calculate_salary().partial_cmp(&other.calculate_salary())
    }
}

impl Add for &Employee {
    type Output = f64;

    fn add(self, other: &Employee) -> f64 {
        self.calculate_salary() + other.calculate_salary()
    }
}

impl Add<&Employee> for f64 {
    type Output = f64;

    fn add(self, employee: &Employee) -> f64 {
        self + employee.calculate_salary()
    }
}

impl<'a> Sum<&'a Employee> for f64 {
    fn sum<I: Iterator<Item = &'a Employee>>(iter: I) -> f64 {
        iter.fold(0.0, |total, employee| total + employee)
    }
}
