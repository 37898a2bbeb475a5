//! Synchronous change notification.
//!
//! A [`Subject`] keeps observers in attachment order and calls each one
//! in turn on `notify`. Observers are shared handles, compared by address.

use crate::domain::employee::EmployeeRef;
use crate::domain::ports::{Observer, Worker};
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

pub const SALARY_CHANGED: &str = "salary_changed";
pub const DEPARTMENT_CHANGED: &str = "department_changed";
pub const STATUS_CHANGED: &str = "status_changed";

#[derive(Default)]
pub struct Subject {
    observers: Vec<Rc<dyn Observer>>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaching an observer twice is a no-op.
    pub fn attach(&mut self, observer: Rc<dyn Observer>) {
        if !self.is_attached(&observer) {
            self.observers.push(observer);
        }
    }

    /// Detaching an observer that is not attached is a no-op.
    pub fn detach(&mut self, observer: &Rc<dyn Observer>) {
        self.observers
            .retain(|attached| !same_observer(attached, observer));
    }

    pub fn is_attached(&self, observer: &Rc<dyn Observer>) -> bool {
        self.observers
            .iter()
            .any(|attached| same_observer(attached, observer))
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn notify(&self, event_type: &str, data: &serde_json::Value) {
        tracing::debug!(
            "Broadcasting '{}' to {} observer(s)",
            event_type,
            self.observers.len()
        );
        for observer in &self.observers {
            observer.update(event_type, data);
        }
    }
}

fn same_observer(left: &Rc<dyn Observer>, right: &Rc<dyn Observer>) -> bool {
    std::ptr::eq(
        Rc::as_ptr(left) as *const (),
        Rc::as_ptr(right) as *const (),
    )
}

/// Subject bound to one employee; events carry its id and name.
pub struct EmployeeSubject {
    employee: EmployeeRef,
    subject: Subject,
}

impl EmployeeSubject {
    pub fn new(employee: EmployeeRef) -> Self {
        Self {
            employee,
            subject: Subject::new(),
        }
    }

    pub fn employee(&self) -> &EmployeeRef {
        &self.employee
    }

    pub fn attach(&mut self, observer: Rc<dyn Observer>) {
        self.subject.attach(observer);
    }

    pub fn detach(&mut self, observer: &Rc<dyn Observer>) {
        self.subject.detach(observer);
    }

    pub fn notify(&self, event_type: &str, data: &serde_json::Value) {
        self.subject.notify(event_type, data);
    }

    pub fn notify_salary_change(&self, old_salary: f64, new_salary: f64) {
        let (id, name) = self.identity();
        self.notify(
            SALARY_CHANGED,
            &json!({
                "employee_id": id,
                "employee_name": name,
                "old_value": old_salary,
                "new_value": new_salary,
                "message": format!("Salary of {} changed", name),
            }),
        );
    }

    pub fn notify_department_change(&self, old_department: &str, new_department: &str) {
        let (id, name) = self.identity();
        self.notify(
            DEPARTMENT_CHANGED,
            &json!({
                "employee_id": id,
                "employee_name": name,
                "old_value": old_department,
                "new_value": new_department,
                "message": format!("{} moved to department {}", name, new_department),
            }),
        );
    }

    pub fn notify_status_change(&self, status: &str) {
        let (id, name) = self.identity();
        self.notify(
            STATUS_CHANGED,
            &json!({
                "employee_id": id,
                "employee_name": name,
                "new_value": status,
                "message": format!("Status of {} changed to {}", name, status),
            }),
        );
    }

    /// Sets the base salary and reports the computed salary before and after.
    pub fn update_base_salary(&self, base_salary: f64) -> Result<()> {
        let old_salary = self.employee.borrow().calculate_salary();
        self.employee.borrow_mut().set_base_salary(base_salary)?;
        let new_salary = self.employee.borrow().calculate_salary();
        self.notify_salary_change(old_salary, new_salary);
        Ok(())
    }

    /// Rewrites the informational department field and reports the move.
    pub fn update_department(&self, department: &str) -> Result<()> {
        let old_department = self.employee.borrow().department().to_string();
        self.employee.borrow_mut().set_department(department)?;
        self.notify_department_change(&old_department, department);
        Ok(())
    }

    fn identity(&self) -> (i64, String) {
        let employee = self.employee.borrow();
        (employee.id(), employee.name().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub event_type: String,
    pub data: serde_json::Value,
    pub timestamp: String,
}

/// Keeps every delivered event with a local timestamp.
#[derive(Default)]
pub struct NotificationLog {
    notifications: RefCell<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    pub fn notifications_by_type(&self, event_type: &str) -> Vec<Notification> {
        self.notifications
            .borrow()
            .iter()
            .filter(|n| n.event_type == event_type)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notifications.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.notifications.borrow_mut().clear();
    }
}

impl Observer for NotificationLog {
    fn update(&self, event_type: &str, data: &serde_json::Value) {
        let notification = Notification {
            event_type: event_type.to_string(),
            data: data.clone(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        tracing::info!(
            event = event_type,
            employee_id = ?data.get("employee_id"),
            "Notification: {}",
            data.get("message").and_then(|m| m.as_str()).unwrap_or(event_type)
        );
        self.notifications.borrow_mut().push(notification);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub event_type: String,
}

/// Composes one email per event. Nothing is actually sent.
pub struct EmailNotifier {
    email: String,
    sent: RefCell<Vec<EmailMessage>>,
}

impl EmailNotifier {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.borrow().clone()
    }
}

impl Observer for EmailNotifier {
    fn update(&self, event_type: &str, data: &serde_json::Value) {
        let message = EmailMessage {
            to: self.email.clone(),
            subject: format!("Notification: {}", event_type),
            body: format!("Event: {}\nData: {}", event_type, data),
            event_type: event_type.to_string(),
        };
        tracing::info!("Email to {}: {}", self.email, event_type);
        self.sent.borrow_mut().push(message);
    }
}
