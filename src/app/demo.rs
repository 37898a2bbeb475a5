use crate::core::bonus::BonusCalculator;
use crate::core::registry::EmployeeRegistry;
use crate::domain::company::Company;
use crate::domain::department::Department;
use crate::domain::model::{BonusParams, EmployeeParams};
use crate::domain::ports::Worker;
use crate::domain::project::Project;
use crate::utils::error::{Result, StaffingError};

/// Builds a small company with three departments and three projects.
/// Employee 2 sits on two teams and is reported as overloaded.
pub fn build_demo_company(name: &str) -> Result<Company> {
    let registry = EmployeeRegistry::with_defaults();
    let mut company = Company::new(name)?;

    for department in ["Management", "Development", "Sales"] {
        company.add_department(Department::new(department)?)?;
    }

    let hires = [
        (
            "manager",
            EmployeeParams::new(1, "Alice Johnson", "Management", 7000.0).with_bonus(2000.0),
        ),
        (
            "developer",
            EmployeeParams::new(2, "Bob Smith", "Development", 5000.0)
                .with_tech_stack(["Rust", "Python"])
                .with_seniority_level("senior"),
        ),
        (
            "developer",
            EmployeeParams::new(3, "Carol White", "Development", 4500.0)
                .with_tech_stack(["TypeScript"])
                .with_seniority_level("middle"),
        ),
        (
            "employee",
            EmployeeParams::new(4, "Dave Brown", "Development", 3000.0),
        ),
        (
            "salesperson",
            EmployeeParams::new(5, "Eve Davis", "Sales", 4000.0)
                .with_commission_rate(0.1)
                .with_sales_volume(50000.0),
        ),
    ];

    for (tag, params) in &hires {
        let employee = registry.create_employee(tag, params)?;
        company
            .department_mut(&params.department)
            .ok_or_else(|| StaffingError::DepartmentNotFound {
                name: params.department.clone(),
            })?
            .hire(employee)?;
    }

    company.add_project(Project::new(
        1,
        "AI Platform",
        "Recommendation engine",
        "2025-12-31",
        "active",
    )?)?;
    company.add_project(Project::new(
        2,
        "CRM Upgrade",
        "Move sales pipeline to the new CRM",
        "2026-03-31",
        "planning",
    )?)?;
    company.add_project(Project::new(
        3,
        "Legacy Migration",
        "Retire the old billing system",
        "2024-11-30",
        "completed",
    )?)?;

    for (employee_id, project_id) in [(2, 1), (3, 1), (1, 2), (2, 2), (5, 2), (4, 3)] {
        company.assign_employee_to_project(employee_id, project_id)?;
    }

    tracing::debug!("Built demo company: {}", company);
    Ok(company)
}

/// Bonus per employee under the calculator's current strategy, in department order.
pub fn bonus_report(
    company: &Company,
    calculator: &BonusCalculator,
    params: &BonusParams,
) -> Result<Vec<(String, f64)>> {
    company
        .all_employees()
        .iter()
        .map(|handle| {
            let employee = handle.borrow();
            let bonus = calculator.calculate(&*employee, params)?;
            Ok((employee.name().to_string(), bonus))
        })
        .collect()
}
