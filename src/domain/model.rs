use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_employee_type() -> String {
    "Employee".to_string()
}

fn default_project_status() -> String {
    "planning".to_string()
}

/// Flat serialized form of one employee; `type` selects the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "type", default = "default_employee_type")]
    pub employee_type: String,
    pub id: i64,
    pub name: String,
    pub department: String,
    pub base_salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_volume: Option<f64>,
}

impl EmployeeRecord {
    pub fn params(&self) -> EmployeeParams {
        EmployeeParams {
            id: self.id,
            name: self.name.clone(),
            department: self.department.clone(),
            base_salary: self.base_salary,
            bonus: self.bonus,
            tech_stack: self.tech_stack.clone().unwrap_or_default(),
            seniority_level: self.seniority_level.clone(),
            commission_rate: self.commission_rate,
            sales_volume: self.sales_volume,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRecord {
    pub name: String,
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
}

/// Team entries are kept loosely typed: only `id` is read back on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub project_id: i64,
    pub name: String,
    pub description: String,
    pub deadline: String,
    #[serde(default = "default_project_status")]
    pub status: String,
    #[serde(default)]
    pub team: Vec<serde_json::Value>,
}

impl ProjectRecord {
    /// Ids referenced by the team entries, skipping entries without a usable id.
    pub fn team_ids(&self) -> Vec<i64> {
        self.team
            .iter()
            .filter_map(|member| member.get("id").and_then(|id| id.as_i64()))
            .filter(|id| *id != 0)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    #[serde(default)]
    pub departments: Vec<DepartmentRecord>,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

/// Named construction parameters shared by the record loader and the registry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmployeeParams {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub base_salary: f64,
    pub bonus: Option<f64>,
    pub tech_stack: Vec<String>,
    pub seniority_level: Option<String>,
    pub commission_rate: Option<f64>,
    pub sales_volume: Option<f64>,
}

impl EmployeeParams {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        department: impl Into<String>,
        base_salary: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            department: department.into(),
            base_salary,
            ..Self::default()
        }
    }

    pub fn with_bonus(mut self, bonus: f64) -> Self {
        self.bonus = Some(bonus);
        self
    }

    pub fn with_tech_stack<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tech_stack = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seniority_level(mut self, level: impl Into<String>) -> Self {
        self.seniority_level = Some(level.into());
        self
    }

    pub fn with_commission_rate(mut self, rate: f64) -> Self {
        self.commission_rate = Some(rate);
        self
    }

    pub fn with_sales_volume(mut self, volume: f64) -> Self {
        self.sales_volume = Some(volume);
        self
    }
}

/// Named inputs for bonus strategies. Each strategy reads only its own fields.
#[derive(Debug, Clone, PartialEq)]
pub struct BonusParams {
    pub performance_rating: f64,
    pub years_of_service: i64,
    pub project_count: i64,
    pub completed_projects: i64,
}

impl Default for BonusParams {
    fn default() -> Self {
        Self {
            performance_rating: 1.0,
            years_of_service: 0,
            project_count: 0,
            completed_projects: 0,
        }
    }
}

impl BonusParams {
    pub fn performance(rating: f64) -> Self {
        Self {
            performance_rating: rating,
            ..Self::default()
        }
    }

    pub fn seniority(years_of_service: i64) -> Self {
        Self {
            years_of_service,
            ..Self::default()
        }
    }

    pub fn projects(project_count: i64, completed_projects: i64) -> Self {
        Self {
            project_count,
            completed_projects,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStats {
    pub name: String,
    pub employee_count: usize,
    pub total_salary: f64,
    pub employee_types: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusBudget {
    pub count: usize,
    pub total_budget: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BudgetAnalysis {
    pub total_projects: usize,
    pub by_status: BTreeMap<String, StatusBudget>,
    pub total_budget: f64,
}
