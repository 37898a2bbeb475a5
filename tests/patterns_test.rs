use staffing::core::bonus::{PerformanceBonus, ProjectBonus, SeniorityBonus};
use staffing::core::notification::{
    EmailNotifier, NotificationLog, DEPARTMENT_CHANGED, SALARY_CHANGED,
};
use staffing::domain::model::{BonusParams, EmployeeParams};
use staffing::core::registry::{DeveloperFactory, EmployeeRegistry};
use staffing::domain::ports::{EmployeeFactory, Observer};
use staffing::{BonusCalculator, Department, EmployeeSubject, StaffingError, Worker};
use std::rc::Rc;

#[test]
fn test_registry_builds_hired_employees() {
    let registry = EmployeeRegistry::with_defaults();
    let mut department = Department::new("Sales").unwrap();

    let params = EmployeeParams::new(8, "Frank", "Sales", 3000.0)
        .with_commission_rate(0.05)
        .with_sales_volume(20000.0);
    let handle = department
        .hire(registry.create_employee("Salesperson", &params).unwrap())
        .unwrap();

    assert_eq!(handle.borrow().calculate_salary(), 4000.0);
    assert_eq!(department.calculate_total_salary(), 4000.0);
    assert!(registry.create_employee("contractor", &params).is_err());
}

#[test]
fn test_custom_factory_is_picked_up_by_tag() {
    let mut registry = EmployeeRegistry::with_defaults();
    registry
        .register("architect", |params: &EmployeeParams| {
            let params = params.clone().with_seniority_level("senior");
            DeveloperFactory.create_employee(&params)
        })
        .unwrap();

    let architect = registry
        .create_employee("ARCHITECT", &EmployeeParams::new(9, "Grace", "IT", 8000.0))
        .unwrap();
    assert_eq!(architect.calculate_salary(), 16000.0);
    assert_eq!(
        registry.registered_types(),
        vec!["architect", "developer", "manager", "salesperson", "employee"]
    );
}

#[test]
fn test_swapping_strategies_on_one_employee() {
    let registry = EmployeeRegistry::with_defaults();
    let employee = registry
        .create_employee("employee", &EmployeeParams::new(1, "Ann", "IT", 40000.0))
        .unwrap();
    let params = BonusParams {
        performance_rating: 1.5,
        years_of_service: 12,
        project_count: 2,
        completed_projects: 1,
    };

    let mut calculator = BonusCalculator::new(PerformanceBonus);
    assert!((calculator.calculate(&employee, &params).unwrap() - 6000.0).abs() < 1e-6);

    calculator.set_strategy(SeniorityBonus);
    assert!((calculator.calculate(&employee, &params).unwrap() - 20000.0).abs() < 1e-6);

    calculator.set_strategy(ProjectBonus);
    assert!((calculator.calculate(&employee, &params).unwrap() - 4400.0).abs() < 1e-6);

    let bad = BonusParams::projects(1, 3);
    assert!(matches!(
        calculator.calculate(&employee, &bad),
        Err(StaffingError::ValidationError { .. })
    ));
}

#[test]
fn test_observers_follow_attach_and_detach() {
    let mut department = Department::new("IT").unwrap();
    let handle = department
        .hire(
            EmployeeRegistry::with_defaults()
                .create_employee(
                    "manager",
                    &EmployeeParams::new(4, "Hank", "IT", 5000.0).with_bonus(1000.0),
                )
                .unwrap(),
        )
        .unwrap();

    let log = Rc::new(NotificationLog::new());
    let email = Rc::new(EmailNotifier::new("ceo@example.com"));
    let log_handle: Rc<dyn Observer> = log.clone();
    let email_handle: Rc<dyn Observer> = email.clone();

    let mut subject = EmployeeSubject::new(handle.clone());
    subject.attach(log_handle.clone());
    subject.attach(email_handle.clone());
    subject.attach(log_handle.clone());

    subject.update_base_salary(5500.0).unwrap();
    subject.detach(&email_handle);
    subject.update_department("Research").unwrap();

    assert_eq!(log.len(), 2);
    assert_eq!(log.notifications_by_type(SALARY_CHANGED).len(), 1);
    assert_eq!(log.notifications_by_type(DEPARTMENT_CHANGED)[0].data["old_value"], "IT");
    assert_eq!(email.sent_emails().len(), 1);

    // the department sees the mutation through the shared handle
    assert_eq!(department.calculate_total_salary(), 6500.0);
}
