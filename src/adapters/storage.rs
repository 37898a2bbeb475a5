use crate::domain::company::Company;
use crate::domain::department::Department;
use crate::domain::model::DepartmentRecord;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads and writes pretty-printed JSON documents under one base directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    base_path: PathBuf,
}

impl JsonStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn save_company(&self, company: &Company, file_name: &str) -> Result<PathBuf> {
        let content = company.to_json_string()?;
        let path = self.write_file(file_name, content.as_bytes())?;
        tracing::info!("Saved company '{}' to {}", company.name(), path.display());
        Ok(path)
    }

    pub fn load_company(&self, file_name: &str) -> Result<Company> {
        let content = self.read_file(file_name)?;
        let company = Company::from_json_str(&content)?;
        tracing::info!(
            "Loaded company '{}' ({} departments, {} projects)",
            company.name(),
            company.departments().len(),
            company.projects().len()
        );
        Ok(company)
    }

    pub fn save_department(&self, department: &Department, file_name: &str) -> Result<PathBuf> {
        let content = serde_json::to_string_pretty(&department.to_record())?;
        let path = self.write_file(file_name, content.as_bytes())?;
        tracing::info!("Saved department '{}' to {}", department.name(), path.display());
        Ok(path)
    }

    pub fn load_department(&self, file_name: &str) -> Result<Department> {
        let content = self.read_file(file_name)?;
        let record: DepartmentRecord = serde_json::from_str(&content)?;
        let department = Department::from_record(&record)?;
        tracing::info!(
            "Loaded department '{}' ({} employees)",
            department.name(),
            department.len()
        );
        Ok(department)
    }

    fn read_file(&self, file_name: &str) -> Result<String> {
        let full_path = self.base_path.join(file_name);
        Ok(fs::read_to_string(full_path)?)
    }

    fn write_file(&self, file_name: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = self.base_path.join(file_name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path)
    }
}
