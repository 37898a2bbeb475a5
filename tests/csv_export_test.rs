use staffing::adapters::csv_export::{export_employees_csv, export_projects_csv};
use staffing::app::demo::build_demo_company;
use tempfile::TempDir;

#[test]
fn test_export_reports_to_files() {
    let temp_dir = TempDir::new().unwrap();
    let company = build_demo_company("Acme").unwrap();

    let employees_path = temp_dir.path().join("reports/employees.csv");
    let projects_path = temp_dir.path().join("reports/projects.csv");
    assert_eq!(export_employees_csv(&company, &employees_path).unwrap(), 5);
    assert_eq!(export_projects_csv(&company, &projects_path).unwrap(), 3);

    let mut reader = csv::Reader::from_path(&employees_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(&rows[1][1], "Bob Smith");
    assert_eq!(&rows[1][2], "Development");
    assert_eq!(&rows[1][3], "Developer");
    assert_eq!(rows[1][4].parse::<f64>().unwrap(), 5000.0);
    assert_eq!(rows[1][5].parse::<f64>().unwrap(), 10000.0);

    let mut reader = csv::Reader::from_path(&projects_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&rows[1][1], "CRM Upgrade");
    assert_eq!(&rows[1][2], "planning");
    assert_eq!(&rows[1][3], "2026-03-31");
    assert_eq!(&rows[1][4], "3");
    assert_eq!(rows[1][5].parse::<f64>().unwrap(), 28000.0);
}

#[test]
fn test_export_reflects_live_mutations() {
    let temp_dir = TempDir::new().unwrap();
    let company = build_demo_company("Acme").unwrap();
    company
        .find_employee_by_id(4)
        .unwrap()
        .borrow_mut()
        .set_base_salary(3500.0)
        .unwrap();

    let projects_path = temp_dir.path().join("projects.csv");
    export_projects_csv(&company, &projects_path).unwrap();

    let content = std::fs::read_to_string(&projects_path).unwrap();
    let last = content.lines().last().unwrap();
    assert!(last.starts_with("3,Legacy Migration,completed,2024-11-30,1,3500"));
}
