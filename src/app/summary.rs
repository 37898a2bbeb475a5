use crate::domain::company::Company;
use crate::domain::ports::Worker;

/// Plain-text overview printed by the `summary` command.
pub fn render_summary(company: &Company) -> String {
    let mut lines = vec![company.to_string(), "Departments:".to_string()];

    for stats in company.department_stats() {
        let types = stats
            .employee_types
            .iter()
            .map(|(kind, count)| format!("{} x{}", kind, count))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "  - {}: {} employee(s), total salary {:.2} [{}]",
            stats.name, stats.employee_count, stats.total_salary, types
        ));
    }

    lines.push("Projects:".to_string());
    for project in company.projects() {
        lines.push(format!("  - {}", project.project_info()));
    }

    let analysis = company.project_budget_analysis();
    lines.push(format!(
        "Project budget: {:.2} across {} project(s)",
        analysis.total_budget, analysis.total_projects
    ));
    for (status, bucket) in &analysis.by_status {
        lines.push(format!(
            "  - {}: {} project(s), {:.2}",
            status, bucket.count, bucket.total_budget
        ));
    }

    lines.push(format!(
        "Monthly cost: {:.2}",
        company.calculate_total_monthly_cost()
    ));

    let overloaded = company
        .find_overloaded_employees()
        .iter()
        .map(|handle| {
            let employee = handle.borrow();
            format!("{} (id {})", employee.name(), employee.id())
        })
        .collect::<Vec<_>>();
    lines.push(if overloaded.is_empty() {
        "Overloaded employees: none".to_string()
    } else {
        format!("Overloaded employees: {}", overloaded.join(", "))
    });

    lines.join("\n")
}
