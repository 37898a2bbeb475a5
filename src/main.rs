use anyhow::Context;
use clap::Parser;
use staffing::adapters::csv_export::{export_employees_csv, export_projects_csv};
use staffing::app::demo::{bonus_report, build_demo_company};
use staffing::app::summary::render_summary;
use staffing::config::toml_config::LoggingSection;
use staffing::config::Command;
use staffing::core::bonus::PerformanceBonus;
use staffing::core::notification::{EmployeeSubject, NotificationLog};
use staffing::domain::model::BonusParams;
use staffing::domain::ports::Observer;
use staffing::utils::error::ErrorCategory;
use staffing::utils::{logger, validation::Validate};
use staffing::{AppConfig, BonusCalculator, CliConfig, Company, Database, StaffingError};
use std::path::{Path, PathBuf};
use std::rc::Rc;

fn main() {
    let cli = CliConfig::parse();
    let config = cli.app_config();

    // 初始化日誌：設定檔載入失敗時仍以命令列旗標啟動
    let logging = match &config {
        Ok(config) => config.logging.clone(),
        Err(_) => LoggingSection {
            verbose: cli.verbose,
            json: cli.json_logs,
            filter: None,
        },
    };
    logger::init_logger(&logging);

    tracing::info!("Starting staffing CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli, config) {
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn run(cli: &CliConfig, config: staffing::Result<AppConfig>) -> anyhow::Result<()> {
    cli.validate().context("invalid command line")?;
    let config = config.context("failed to load configuration")?;

    match &cli.command {
        Command::Summary { input } => {
            let path = input.clone().unwrap_or_else(|| config.company_path());
            let company = load_company(&path)?;
            println!("{}", render_summary(&company));
        }
        Command::Export { input, output_dir } => {
            let path = input.clone().unwrap_or_else(|| config.company_path());
            let company = load_company(&path)?;
            let (employees_csv, projects_csv) = report_paths(&config, output_dir.as_deref());

            let employee_rows = export_employees_csv(&company, &employees_csv)?;
            let project_rows = export_projects_csv(&company, &projects_csv)?;
            println!("✅ Reports written");
            println!("📁 {} ({} rows)", employees_csv.display(), employee_rows);
            println!("📁 {} ({} rows)", projects_csv.display(), project_rows);
        }
        Command::Demo { output } => run_demo(&config, output.as_deref())?,
    }

    Ok(())
}

fn run_demo(config: &AppConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let company = build_demo_company(&config.company.name)?;

    let calculator = BonusCalculator::new(PerformanceBonus);
    for (name, bonus) in bonus_report(&company, &calculator, &BonusParams::performance(1.2))? {
        println!(
            "💰 {} bonus ({}): {:.2}",
            name,
            calculator.strategy_name().unwrap_or_default(),
            bonus
        );
    }

    // 加薪示範：觀察者記錄薪資變動
    let log = Rc::new(NotificationLog::new());
    if let Some(handle) = company.find_employee_by_id(3) {
        let mut subject = EmployeeSubject::new(handle);
        let observer: Rc<dyn Observer> = log.clone();
        subject.attach(observer);
        subject.update_base_salary(5000.0)?;
    }
    for notification in log.notifications() {
        println!(
            "🔔 [{}] {}: {}",
            notification.timestamp, notification.event_type, notification.data["message"]
        );
    }

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.company_path());
    save_company(&company, &path)?;

    std::fs::create_dir_all(config.data_dir())?;
    let database = Database::open(config.database_path())
        .with_context(|| format!("failed to open {}", config.database_path().display()))?;
    tracing::info!("Database tables: {:?}", database.table_names()?);
    database.close()?;

    println!("✅ Demo company '{}' saved", company.name());
    println!("📁 Output saved to: {}", path.display());
    Ok(())
}

fn load_company(path: &Path) -> anyhow::Result<Company> {
    let store = staffing::JsonStore::new(parent_dir(path));
    store
        .load_company(&file_name(path))
        .with_context(|| format!("failed to load company from {}", path.display()))
}

fn save_company(company: &Company, path: &Path) -> anyhow::Result<()> {
    let store = staffing::JsonStore::new(parent_dir(path));
    store
        .save_company(company, &file_name(path))
        .with_context(|| format!("failed to save company to {}", path.display()))?;
    Ok(())
}

fn report_paths(config: &AppConfig, output_dir: Option<&Path>) -> (PathBuf, PathBuf) {
    match output_dir {
        Some(dir) => (
            dir.join(&config.storage.employees_csv),
            dir.join(&config.storage.projects_csv),
        ),
        None => (config.employees_csv_path(), config.projects_csv_path()),
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

// 根據錯誤類別決定退出碼
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<StaffingError>().map(StaffingError::category) {
        Some(ErrorCategory::Validation) | Some(ErrorCategory::InvalidStatus) => 2,
        Some(ErrorCategory::NotFound) | Some(ErrorCategory::Duplicate) => 3,
        Some(ErrorCategory::IllegalState) => 4,
        Some(ErrorCategory::Configuration) => 5,
        Some(ErrorCategory::Io) | None => 1,
    }
}
