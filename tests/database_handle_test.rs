use staffing::{Database, StaffingError};
use tempfile::TempDir;

#[test]
fn test_handles_share_state_across_close() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("company.db");
    let database = Database::open(&path).unwrap();
    let injected = database.clone();

    injected
        .with_connection(|conn| {
            conn.execute(
                "INSERT INTO employees (id, name, department, base_salary, employee_type) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![1, "Alice", "IT", 5000.0, "Employee"],
            )
        })
        .unwrap();

    database.close().unwrap();
    assert!(!injected.is_open());

    let name: String = injected
        .with_connection(|conn| {
            conn.query_row("SELECT name FROM employees WHERE id = 1", [], |row| row.get(0))
        })
        .unwrap();
    assert_eq!(name, "Alice");
    assert!(database.is_open());
    assert_eq!(database.path(), Some(path.as_path()));
}

#[test]
fn test_sql_errors_surface_as_database_errors() {
    let database = Database::in_memory().unwrap();
    let result = database.with_connection(|conn| conn.execute("SELECT * FROM missing", []));
    assert!(matches!(result, Err(StaffingError::DatabaseError(_))));
}

#[test]
fn test_open_in_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = Database::open(temp_dir.path().join("no/such/dir/company.db"));
    assert!(result.is_err());
}
