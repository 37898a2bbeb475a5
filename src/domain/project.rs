use crate::domain::employee::EmployeeRef;
use crate::domain::model::ProjectRecord;
use crate::domain::ports::Worker;
use crate::utils::error::{Result, StaffingError};
use crate::utils::validation::{validate_non_empty_string, validate_positive_id};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Any status may follow any other; only membership in this set is enforced.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::Active,
        ProjectStatus::Completed,
        ProjectStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = StaffingError;

    fn from_str(value: &str) -> Result<Self> {
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| StaffingError::InvalidStatus {
                value: value.to_string(),
                allowed: ProjectStatus::ALL
                    .iter()
                    .map(|status| status.as_str().to_string())
                    .collect(),
            })
    }
}

pub fn parse_deadline(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DEADLINE_FORMAT).map_err(|e| {
        StaffingError::validation(
            "deadline",
            format!("expected YYYY-MM-DD, got '{}': {}", value, e),
        )
    })
}

/// A project borrows employees into its team; it never owns them.
#[derive(Debug, Clone)]
pub struct Project {
    project_id: i64,
    name: String,
    description: String,
    deadline: NaiveDate,
    status: ProjectStatus,
    team: Vec<EmployeeRef>,
}

impl Project {
    pub fn new(
        project_id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        deadline: &str,
        status: &str,
    ) -> Result<Self> {
        let name = name.into();
        validate_positive_id("project_id", project_id)?;
        validate_non_empty_string("project.name", &name)?;
        let deadline = parse_deadline(deadline)?;
        let status = status.parse()?;

        Ok(Self {
            project_id,
            name,
            description: description.into(),
            deadline,
            status,
            team: Vec::new(),
        })
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn change_status(&mut self, new_status: &str) -> Result<()> {
        let status = new_status.parse()?;
        self.set_status(status);
        Ok(())
    }

    pub fn set_status(&mut self, status: ProjectStatus) {
        tracing::debug!(
            "Project {}: status {} -> {}",
            self.project_id,
            self.status,
            status
        );
        self.status = status;
    }

    pub fn add_team_member(&mut self, employee: EmployeeRef) -> Result<()> {
        let id = employee.borrow().id();
        if self.find_team_member(id).is_some() {
            return Err(StaffingError::DuplicateId {
                entity: "team member",
                id: id.to_string(),
            });
        }
        tracing::debug!("Project {}: added team member {}", self.project_id, id);
        self.team.push(employee);
        Ok(())
    }

    pub fn remove_team_member(&mut self, employee_id: i64) -> Result<EmployeeRef> {
        let position = self
            .team
            .iter()
            .position(|member| member.borrow().id() == employee_id)
            .ok_or(StaffingError::EmployeeNotFound { id: employee_id })?;
        tracing::debug!(
            "Project {}: removed team member {}",
            self.project_id,
            employee_id
        );
        Ok(self.team.remove(position))
    }

    pub fn team(&self) -> Vec<EmployeeRef> {
        self.team.clone()
    }

    pub fn team_size(&self) -> usize {
        self.team.len()
    }

    pub fn team_ids(&self) -> Vec<i64> {
        self.team.iter().map(|member| member.borrow().id()).collect()
    }

    pub fn find_team_member(&self, employee_id: i64) -> Option<EmployeeRef> {
        self.team
            .iter()
            .find(|member| member.borrow().id() == employee_id)
            .cloned()
    }

    /// Sum of the team's computed salaries, regardless of department membership.
    pub fn calculate_total_salary(&self) -> f64 {
        self.team
            .iter()
            .map(|member| member.borrow().calculate_salary())
            .sum()
    }

    pub fn project_info(&self) -> String {
        format!(
            "Project [id: {}, name: {}, description: {}, deadline: {}, status: {}, team size: {}, team budget: {}]",
            self.project_id,
            self.name,
            self.description,
            self.deadline.format(DEADLINE_FORMAT),
            self.status,
            self.team_size(),
            self.calculate_total_salary()
        )
    }

    pub fn to_record(&self) -> Result<ProjectRecord> {
        let team = self
            .team
            .iter()
            .map(|member| serde_json::to_value(member.borrow().to_record()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ProjectRecord {
            project_id: self.project_id,
            name: self.name.clone(),
            description: self.description.clone(),
            deadline: self.deadline.format(DEADLINE_FORMAT).to_string(),
            status: self.status.as_str().to_string(),
            team,
        })
    }

    /// Restores scalar fields only. Team entries are relinked by the owning company.
    pub fn from_record(record: &ProjectRecord) -> Result<Self> {
        Self::new(
            record.project_id,
            record.name.clone(),
            record.description.clone(),
            &record.deadline,
            &record.status,
        )
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Project '{}' (id: {}, status: {})",
            self.name, self.project_id, self.status
        )
    }
}
