//! Ordering helpers for sorting employee lists with `sort_by`.

use crate::domain::ports::Worker;
use std::cmp::Ordering;

pub fn compare_by_name<W: Worker + ?Sized>(left: &W, right: &W) -> Ordering {
    left.name().cmp(right.name())
}

/// Orders by computed salary; NaN-free salaries are guaranteed by validation.
pub fn compare_by_salary<W: Worker + ?Sized>(left: &W, right: &W) -> Ordering {
    left.calculate_salary().total_cmp(&right.calculate_salary())
}

pub fn compare_by_department_and_name<W: Worker + ?Sized>(left: &W, right: &W) -> Ordering {
    left.department()
        .cmp(right.department())
        .then_with(|| compare_by_name(left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::{Developer, Employee, Manager, Seniority, Staff};

    fn staff() -> Vec<Employee> {
        vec![
            Employee::Staff(Staff::new(3, "Carol", "Sales", 30000.0).unwrap()),
            Employee::Manager(Manager::new(1, "Alice", "IT", 70000.0, 20000.0).unwrap()),
            Employee::Developer(
                Developer::new(2, "Bob", "IT", 50000.0, vec![], Seniority::Middle).unwrap(),
            ),
        ]
    }

    #[test]
    fn test_sort_by_name() {
        let mut employees = staff();
        employees.sort_by(|a, b| compare_by_name(a, b));
        let names: Vec<&str> = employees.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_sort_by_salary() {
        let mut employees = staff();
        employees.sort_by(|a, b| compare_by_salary(a, b));
        let ids: Vec<i64> = employees.iter().map(|e| e.id()).collect();
        // 30000, 75000, 90000
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_by_department_then_name() {
        let mut employees = staff();
        employees.sort_by(|a, b| compare_by_department_and_name(a, b));
        let names: Vec<&str> = employees.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(employees[2].department(), "Sales");
    }
}
