//! Company aggregate: departments own employees, projects borrow them.
//!
//! Cross-cutting queries (lookup, transfer, overload detection) and the
//! whole-graph record conversion live here because only the company sees
//! both sides of the ownership split.

use crate::domain::department::Department;
use crate::domain::employee::EmployeeRef;
use crate::domain::model::{BudgetAnalysis, CompanyRecord, DepartmentStats};
use crate::domain::ports::Worker;
use crate::domain::project::{Project, ProjectStatus};
use crate::utils::error::{Result, StaffingError};
use crate::utils::validation::validate_non_empty_string;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug)]
pub struct Company {
    name: String,
    departments: Vec<Department>,
    projects: Vec<Project>,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_non_empty_string("company.name", &name)?;
        Ok(Self {
            name,
            departments: Vec::new(),
            projects: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_department(&mut self, department: Department) -> Result<()> {
        if self.department_index(department.name()).is_some() {
            return Err(StaffingError::DuplicateId {
                entity: "department",
                id: department.name().to_string(),
            });
        }
        tracing::debug!("Company '{}': added {}", self.name, department);
        self.departments.push(department);
        Ok(())
    }

    /// Removes an empty department. Departments that still own employees are kept.
    pub fn remove_department(&mut self, name: &str) -> Result<Department> {
        let index = self
            .department_index(name)
            .ok_or_else(|| StaffingError::DepartmentNotFound {
                name: name.to_string(),
            })?;
        if !self.departments[index].is_empty() {
            return Err(StaffingError::illegal_state(format!(
                "department '{}' still has {} employee(s)",
                name,
                self.departments[index].len()
            )));
        }
        tracing::debug!("Company '{}': removed department '{}'", self.name, name);
        Ok(self.departments.remove(index))
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn department(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|dept| dept.name() == name)
    }

    pub fn department_mut(&mut self, name: &str) -> Option<&mut Department> {
        self.departments.iter_mut().find(|dept| dept.name() == name)
    }

    pub fn add_project(&mut self, project: Project) -> Result<()> {
        if self.project(project.project_id()).is_some() {
            return Err(StaffingError::DuplicateId {
                entity: "project",
                id: project.project_id().to_string(),
            });
        }
        tracing::debug!("Company '{}': added {}", self.name, project);
        self.projects.push(project);
        Ok(())
    }

    /// Removes a project whose team is empty.
    pub fn remove_project(&mut self, project_id: i64) -> Result<Project> {
        let index = self
            .projects
            .iter()
            .position(|project| project.project_id() == project_id)
            .ok_or(StaffingError::ProjectNotFound { id: project_id })?;
        if self.projects[index].team_size() > 0 {
            return Err(StaffingError::illegal_state(format!(
                "project '{}' still has a team of {}",
                self.projects[index].name(),
                self.projects[index].team_size()
            )));
        }
        tracing::debug!("Company '{}': removed project {}", self.name, project_id);
        Ok(self.projects.remove(index))
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, project_id: i64) -> Option<&Project> {
        self.projects
            .iter()
            .find(|project| project.project_id() == project_id)
    }

    pub fn project_mut(&mut self, project_id: i64) -> Option<&mut Project> {
        self.projects
            .iter_mut()
            .find(|project| project.project_id() == project_id)
    }

    /// Every department's employees, in department then insertion order.
    pub fn all_employees(&self) -> Vec<EmployeeRef> {
        self.departments
            .iter()
            .flat_map(|dept| dept.iter().cloned())
            .collect()
    }

    pub fn find_employee_by_id(&self, employee_id: i64) -> Option<EmployeeRef> {
        self.departments
            .iter()
            .find_map(|dept| dept.find_employee_by_id(employee_id))
    }

    pub fn calculate_total_monthly_cost(&self) -> f64 {
        self.departments
            .iter()
            .map(Department::calculate_total_salary)
            .sum()
    }

    pub fn projects_by_status(&self, status: ProjectStatus) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|project| project.status() == status)
            .collect()
    }

    /// Moves an employee between departments. Every check runs before the move.
    pub fn transfer_employee(
        &mut self,
        employee_id: i64,
        from_department: &str,
        to_department: &str,
    ) -> Result<()> {
        let source = self.department_index(from_department).ok_or_else(|| {
            StaffingError::DepartmentNotFound {
                name: from_department.to_string(),
            }
        })?;
        let target = self.department_index(to_department).ok_or_else(|| {
            StaffingError::DepartmentNotFound {
                name: to_department.to_string(),
            }
        })?;

        if !self.departments[source].contains_id(employee_id) {
            return Err(StaffingError::EmployeeNotFound { id: employee_id });
        }
        if source != target && self.departments[target].contains_id(employee_id) {
            return Err(StaffingError::DuplicateId {
                entity: "employee",
                id: employee_id.to_string(),
            });
        }

        let employee = self.departments[source].remove_employee(employee_id)?;
        self.departments[target].add_employee(employee)?;
        tracing::info!(
            "Transferred employee {} from '{}' to '{}'",
            employee_id,
            from_department,
            to_department
        );
        Ok(())
    }

    pub fn assign_employee_to_project(&mut self, employee_id: i64, project_id: i64) -> Result<()> {
        let employee = self
            .find_employee_by_id(employee_id)
            .ok_or(StaffingError::EmployeeNotFound { id: employee_id })?;
        let project = self
            .project_mut(project_id)
            .ok_or(StaffingError::ProjectNotFound { id: project_id })?;
        project.add_team_member(employee)
    }

    /// Employees appearing on more than one project team, in first-seen order.
    pub fn find_overloaded_employees(&self) -> Vec<EmployeeRef> {
        let mut counts: HashMap<i64, usize> = HashMap::new();
        let mut first_seen: Vec<EmployeeRef> = Vec::new();

        for project in &self.projects {
            for member in project.team() {
                let id = member.borrow().id();
                let count = counts.entry(id).or_insert(0);
                if *count == 0 {
                    first_seen.push(member.clone());
                }
                *count += 1;
            }
        }

        first_seen
            .into_iter()
            .filter(|member| counts.get(&member.borrow().id()).copied().unwrap_or(0) > 1)
            .collect()
    }

    /// True while the employee sits on fewer than two project teams.
    pub fn check_employee_availability(&self, employee_id: i64) -> bool {
        let assignments = self
            .projects
            .iter()
            .filter(|project| project.find_team_member(employee_id).is_some())
            .count();
        assignments < 2
    }

    pub fn department_stats(&self) -> Vec<DepartmentStats> {
        self.departments
            .iter()
            .map(|dept| DepartmentStats {
                name: dept.name().to_string(),
                employee_count: dept.len(),
                total_salary: dept.calculate_total_salary(),
                employee_types: dept.employee_counts(),
            })
            .collect()
    }

    pub fn project_budget_analysis(&self) -> BudgetAnalysis {
        let mut analysis = BudgetAnalysis {
            total_projects: self.projects.len(),
            ..BudgetAnalysis::default()
        };

        for project in &self.projects {
            let budget = project.calculate_total_salary();
            let bucket = analysis
                .by_status
                .entry(project.status().as_str().to_string())
                .or_default();
            bucket.count += 1;
            bucket.total_budget += budget;
            analysis.total_budget += budget;
        }

        analysis
    }

    pub fn to_record(&self) -> Result<CompanyRecord> {
        Ok(CompanyRecord {
            name: self.name.clone(),
            departments: self.departments.iter().map(Department::to_record).collect(),
            projects: self
                .projects
                .iter()
                .map(Project::to_record)
                .collect::<Result<Vec<_>>>()?,
        })
    }

    /// Rebuilds the graph outward-in: departments first, then projects, then
    /// team links resolved by id against the loaded departments. Team ids that
    /// no department knows are skipped.
    pub fn from_record(record: &CompanyRecord) -> Result<Self> {
        let mut company = Self::new(record.name.clone())?;

        for department_record in &record.departments {
            company.add_department(Department::from_record(department_record)?)?;
        }

        for project_record in &record.projects {
            company.add_project(Project::from_record(project_record)?)?;

            for employee_id in project_record.team_ids() {
                match company.assign_employee_to_project(employee_id, project_record.project_id) {
                    Ok(()) => {}
                    Err(StaffingError::EmployeeNotFound { id }) => {
                        tracing::warn!(
                            "Project {}: team member {} not found in any department, skipping",
                            project_record.project_id,
                            id
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        tracing::debug!(
            "Loaded company '{}' with {} department(s) and {} project(s)",
            company.name,
            company.departments.len(),
            company.projects.len()
        );
        Ok(company)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_record()?)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let record: CompanyRecord = serde_json::from_str(content)?;
        Self::from_record(&record)
    }

    fn department_index(&self, name: &str) -> Option<usize> {
        self.departments.iter().position(|dept| dept.name() == name)
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Company '{}' (departments: {}, projects: {})",
            self.name,
            self.departments.len(),
            self.projects.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::{Developer, Manager, Salesperson, Seniority, Staff};

    fn company() -> Company {
        let mut company = Company::new("Acme").unwrap();

        let mut it = Department::new("IT").unwrap();
        it.hire(Manager::new(1, "Alice", "IT", 70000.0, 20000.0).unwrap())
            .unwrap();
        it.hire(Developer::new(7, "Bob", "IT", 50000.0, vec![], Seniority::Senior).unwrap())
            .unwrap();
        company.add_department(it).unwrap();

        let mut sales = Department::new("Sales").unwrap();
        sales
            .hire(Salesperson::new(9, "Carol", "Sales", 40000.0, 0.15, 100000.0).unwrap())
            .unwrap();
        company.add_department(sales).unwrap();

        company.add_department(Department::new("HR").unwrap()).unwrap();

        for (id, status) in [(1, "active"), (2, "planning"), (3, "active")] {
            company
                .add_project(
                    Project::new(id, format!("Project {}", id), "", "2025-12-31", status).unwrap(),
                )
                .unwrap();
        }
        company
    }

    #[test]
    fn test_duplicate_department_and_project_rejected() {
        let mut company = company();
        assert!(matches!(
            company.add_department(Department::new("IT").unwrap()),
            Err(StaffingError::DuplicateId { entity: "department", .. })
        ));
        assert!(matches!(
            company.add_project(Project::new(2, "Again", "", "2025-01-01", "active").unwrap()),
            Err(StaffingError::DuplicateId { entity: "project", .. })
        ));
        assert_eq!(company.projects().len(), 3);
    }

    #[test]
    fn test_remove_department_requires_empty() {
        let mut company = company();
        assert!(matches!(
            company.remove_department("IT"),
            Err(StaffingError::IllegalState { .. })
        ));
        assert!(matches!(
            company.remove_department("Legal"),
            Err(StaffingError::DepartmentNotFound { .. })
        ));
        company.remove_department("HR").unwrap();
        assert_eq!(company.departments().len(), 2);
    }

    #[test]
    fn test_remove_project_requires_empty_team() {
        let mut company = company();
        company.assign_employee_to_project(1, 1).unwrap();

        assert!(matches!(
            company.remove_project(1),
            Err(StaffingError::IllegalState { .. })
        ));
        assert!(matches!(
            company.remove_project(42),
            Err(StaffingError::ProjectNotFound { id: 42 })
        ));
        company.remove_project(2).unwrap();
        assert!(company.project(2).is_none());
    }

    #[test]
    fn test_lookup_and_monthly_cost() {
        let company = company();
        assert_eq!(company.all_employees().len(), 3);
        assert_eq!(
            company.find_employee_by_id(9).unwrap().borrow().name(),
            "Carol"
        );
        assert!(company.find_employee_by_id(100).is_none());
        // 90000 + 100000 + 55000
        assert_eq!(company.calculate_total_monthly_cost(), 245000.0);
    }

    #[test]
    fn test_projects_by_status() {
        let company = company();
        let active: Vec<i64> = company
            .projects_by_status(ProjectStatus::Active)
            .iter()
            .map(|p| p.project_id())
            .collect();
        assert_eq!(active, vec![1, 3]);
        assert!(company
            .projects_by_status(ProjectStatus::Cancelled)
            .is_empty());
    }

    #[test]
    fn test_transfer_keeps_project_links() {
        let mut company = company();
        company.assign_employee_to_project(7, 1).unwrap();

        company.transfer_employee(7, "IT", "HR").unwrap();
        assert!(!company.department("IT").unwrap().contains_id(7));
        assert!(company.department("HR").unwrap().contains_id(7));
        assert_eq!(company.project(1).unwrap().team_ids(), vec![7]);
    }

    #[test]
    fn test_transfer_failures_do_not_mutate() {
        let mut company = company();
        assert!(matches!(
            company.transfer_employee(7, "IT", "Legal"),
            Err(StaffingError::DepartmentNotFound { .. })
        ));
        assert!(matches!(
            company.transfer_employee(9, "IT", "HR"),
            Err(StaffingError::EmployeeNotFound { id: 9 })
        ));

        company
            .department_mut("HR")
            .unwrap()
            .hire(Staff::new(7, "Twin", "HR", 1.0).unwrap())
            .unwrap();
        assert!(matches!(
            company.transfer_employee(7, "IT", "HR"),
            Err(StaffingError::DuplicateId { .. })
        ));
        assert!(company.department("IT").unwrap().contains_id(7));
    }

    #[test]
    fn test_assign_requires_existing_employee_and_project() {
        let mut company = company();
        assert!(matches!(
            company.assign_employee_to_project(100, 1),
            Err(StaffingError::EmployeeNotFound { id: 100 })
        ));
        assert!(matches!(
            company.assign_employee_to_project(1, 100),
            Err(StaffingError::ProjectNotFound { id: 100 })
        ));
        company.assign_employee_to_project(1, 1).unwrap();
        assert!(matches!(
            company.assign_employee_to_project(1, 1),
            Err(StaffingError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_overload_detection() {
        let mut company = company();
        company.assign_employee_to_project(7, 1).unwrap();
        company.assign_employee_to_project(7, 3).unwrap();
        company.assign_employee_to_project(9, 2).unwrap();

        let overloaded = company.find_overloaded_employees();
        assert_eq!(overloaded.len(), 1);
        assert_eq!(overloaded[0].borrow().id(), 7);

        assert!(!company.check_employee_availability(7));
        assert!(company.check_employee_availability(9));
        assert!(company.check_employee_availability(1));
    }

    #[test]
    fn test_department_stats() {
        let company = company();
        let stats = company.department_stats();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].name, "IT");
        assert_eq!(stats[0].employee_count, 2);
        assert_eq!(stats[0].total_salary, 190000.0);
        assert_eq!(stats[0].employee_types.get("Developer"), Some(&1));
        assert_eq!(stats[2].employee_count, 0);
    }

    #[test]
    fn test_project_budget_analysis() {
        let mut company = company();
        company.assign_employee_to_project(1, 1).unwrap();
        company.assign_employee_to_project(7, 3).unwrap();
        company.assign_employee_to_project(9, 2).unwrap();

        let analysis = company.project_budget_analysis();
        assert_eq!(analysis.total_projects, 3);
        assert_eq!(analysis.by_status["active"].count, 2);
        assert_eq!(analysis.by_status["active"].total_budget, 190000.0);
        assert_eq!(analysis.by_status["planning"].total_budget, 55000.0);
        assert_eq!(analysis.total_budget, 245000.0);
    }

    #[test]
    fn test_from_record_skips_unknown_team_members() {
        let mut company = company();
        company.assign_employee_to_project(7, 1).unwrap();
        let mut record = company.to_record().unwrap();
        record.projects[0]
            .team
            .push(serde_json::json!({"id": 555, "name": "Ghost"}));

        let restored = Company::from_record(&record).unwrap();
        assert_eq!(restored.project(1).unwrap().team_ids(), vec![7]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            company().to_string(),
            "Company 'Acme' (departments: 3, projects: 3)"
        );
    }
}
