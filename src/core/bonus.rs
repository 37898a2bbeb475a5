use crate::domain::model::BonusParams;
use crate::domain::ports::{BonusStrategy, Worker};
use crate::utils::error::{Result, StaffingError};
use crate::utils::validation::validate_range;

/// 10% of base salary scaled by a rating in [0, 2].
pub struct PerformanceBonus;

impl BonusStrategy for PerformanceBonus {
    fn name(&self) -> &str {
        "performance"
    }

    fn calculate_bonus(&self, employee: &dyn Worker, params: &BonusParams) -> Result<f64> {
        validate_range("performance_rating", params.performance_rating, 0.0, 2.0)?;
        Ok(employee.base_salary() * 0.1 * params.performance_rating)
    }
}

/// 5% of base salary per year of service, capped at 50%.
pub struct SeniorityBonus;

impl BonusStrategy for SeniorityBonus {
    fn name(&self) -> &str {
        "seniority"
    }

    fn calculate_bonus(&self, employee: &dyn Worker, params: &BonusParams) -> Result<f64> {
        if params.years_of_service < 0 {
            return Err(StaffingError::validation(
                "years_of_service",
                "years of service cannot be negative",
            ));
        }
        let percentage = (params.years_of_service as f64 * 0.05).min(0.5);
        Ok(employee.base_salary() * percentage)
    }
}

/// 3% of base salary per project plus 5% per completed project.
pub struct ProjectBonus;

impl BonusStrategy for ProjectBonus {
    fn name(&self) -> &str {
        "project"
    }

    fn calculate_bonus(&self, employee: &dyn Worker, params: &BonusParams) -> Result<f64> {
        if params.project_count < 0 || params.completed_projects < 0 {
            return Err(StaffingError::validation(
                "project_count",
                "project counts cannot be negative",
            ));
        }
        if params.completed_projects > params.project_count {
            return Err(StaffingError::validation(
                "completed_projects",
                format!(
                    "completed projects ({}) cannot exceed total projects ({})",
                    params.completed_projects, params.project_count
                ),
            ));
        }

        let base = employee.base_salary();
        let participation = base * 0.03 * params.project_count as f64;
        let completion = base * 0.05 * params.completed_projects as f64;
        Ok(participation + completion)
    }
}

/// Holds one active strategy that can be swapped at runtime.
#[derive(Default)]
pub struct BonusCalculator {
    strategy: Option<Box<dyn BonusStrategy>>,
}

impl BonusCalculator {
    pub fn new(strategy: impl BonusStrategy + 'static) -> Self {
        Self {
            strategy: Some(Box::new(strategy)),
        }
    }

    pub fn set_strategy(&mut self, strategy: impl BonusStrategy + 'static) {
        tracing::debug!("Bonus strategy set to '{}'", strategy.name());
        self.strategy = Some(Box::new(strategy));
    }

    pub fn strategy_name(&self) -> Option<&str> {
        self.strategy.as_deref().map(|strategy| strategy.name())
    }

    pub fn calculate(&self, employee: &dyn Worker, params: &BonusParams) -> Result<f64> {
        let strategy = self
            .strategy
            .as_deref()
            .ok_or_else(|| StaffingError::illegal_state("no bonus strategy set"))?;
        strategy.calculate_bonus(employee, params)
    }
}
