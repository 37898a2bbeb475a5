use crate::domain::company::Company;
use crate::domain::ports::Worker;
use crate::utils::error::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

const EMPLOYEE_HEADERS: [&str; 6] = [
    "ID",
    "Name",
    "Department",
    "Type",
    "BaseSalary",
    "FinalSalary",
];
const PROJECT_HEADERS: [&str; 6] = [
    "ProjectID",
    "Name",
    "Status",
    "Deadline",
    "TeamSize",
    "TeamBudget",
];

#[derive(Debug, Serialize)]
struct EmployeeRow<'a> {
    id: i64,
    name: &'a str,
    department: &'a str,
    employee_type: &'static str,
    base_salary: f64,
    final_salary: f64,
}

#[derive(Debug, Serialize)]
struct ProjectRow<'a> {
    project_id: i64,
    name: &'a str,
    status: &'static str,
    deadline: String,
    team_size: usize,
    team_budget: f64,
}

/// One row per employee, departments in insertion order.
pub fn write_employees_csv<W: Write>(company: &Company, writer: W) -> Result<usize> {
    let mut csv_writer = report_writer(writer, &EMPLOYEE_HEADERS)?;
    let mut rows = 0;

    for department in company.departments() {
        for handle in department {
            let employee = handle.borrow();
            csv_writer.serialize(EmployeeRow {
                id: employee.id(),
                name: employee.name(),
                department: employee.department(),
                employee_type: employee.employee_type().as_str(),
                base_salary: employee.base_salary(),
                final_salary: employee.calculate_salary(),
            })?;
            rows += 1;
        }
    }

    csv_writer.flush()?;
    Ok(rows)
}

pub fn write_projects_csv<W: Write>(company: &Company, writer: W) -> Result<usize> {
    let mut csv_writer = report_writer(writer, &PROJECT_HEADERS)?;

    for project in company.projects() {
        csv_writer.serialize(ProjectRow {
            project_id: project.project_id(),
            name: project.name(),
            status: project.status().as_str(),
            deadline: project.deadline().format("%Y-%m-%d").to_string(),
            team_size: project.team_size(),
            team_budget: project.calculate_total_salary(),
        })?;
    }

    csv_writer.flush()?;
    Ok(company.projects().len())
}

pub fn export_employees_csv(company: &Company, path: impl AsRef<Path>) -> Result<usize> {
    let file = create_file(path.as_ref())?;
    let rows = write_employees_csv(company, file)?;
    tracing::info!(
        "Exported {} employee row(s) to {}",
        rows,
        path.as_ref().display()
    );
    Ok(rows)
}

pub fn export_projects_csv(company: &Company, path: impl AsRef<Path>) -> Result<usize> {
    let file = create_file(path.as_ref())?;
    let rows = write_projects_csv(company, file)?;
    tracing::info!(
        "Exported {} project row(s) to {}",
        rows,
        path.as_ref().display()
    );
    Ok(rows)
}

/// The header row is written up front so that empty reports still carry it.
fn report_writer<W: Write>(writer: W, headers: &[&str]) -> Result<csv::Writer<W>> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(headers)?;
    Ok(csv_writer)
}

fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::department::Department;
    use crate::domain::employee::{Manager, Staff};
    use crate::domain::project::Project;

    fn company() -> Company {
        let mut company = Company::new("Acme").unwrap();
        let mut department = Department::new("IT").unwrap();
        department
            .hire(Manager::new(1, "Alice", "IT", 70000.0, 20000.0).unwrap())
            .unwrap();
        department
            .hire(Staff::new(2, "Bob", "IT", 40000.0).unwrap())
            .unwrap();
        company.add_department(department).unwrap();
        company
            .add_project(Project::new(10, "Apollo", "", "2025-06-30", "active").unwrap())
            .unwrap();
        company.assign_employee_to_project(1, 10).unwrap();
        company
    }

    #[test]
    fn test_employees_csv_header_and_rows() {
        let mut buffer = Vec::new();
        let rows = write_employees_csv(&company(), &mut buffer).unwrap();
        assert_eq!(rows, 2);

        let content = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "ID,Name,Department,Type,BaseSalary,FinalSalary");
        assert!(lines[1].starts_with("1,Alice,IT,Manager,"));
        assert!(lines[2].starts_with("2,Bob,IT,Employee,"));
    }

    #[test]
    fn test_projects_csv_header_and_rows() {
        let mut buffer = Vec::new();
        write_projects_csv(&company(), &mut buffer).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["ProjectID", "Name", "Status", "Deadline", "TeamSize", "TeamBudget"]
        );

        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "10");
        assert_eq!(&record[2], "active");
        assert_eq!(&record[3], "2025-06-30");
        assert_eq!(&record[4], "1");
        assert_eq!(record[5].parse::<f64>().unwrap(), 90000.0);
    }

    #[test]
    fn test_empty_company_keeps_header() {
        let mut buffer = Vec::new();
        let rows = write_projects_csv(&Company::new("Empty").unwrap(), &mut buffer).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "ProjectID,Name,Status,Deadline,TeamSize,TeamBudget\n"
        );
    }
}
