use serde::Serialize;

/// Current state of an employee, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EmployeeStatus {
    OnVacation,
    Absent { reason: String },
    Working,
    Inactive,
}

impl EmployeeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EmployeeStatus::OnVacation => "On vacation",
            EmployeeStatus::Absent { .. } => "Absent",
            EmployeeStatus::Working => "Working",
            EmployeeStatus::Inactive => "Inactive",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EmployeeStatus::OnVacation => "🏝️",
            EmployeeStatus::Absent { .. } => "🟠",
            EmployeeStatus::Working => "🟢",
            EmployeeStatus::Inactive => "🔴",
        }
    }

    /// Label plus reason for absences, e.g. "Absent (Sick leave)".
    pub fn describe(&self) -> String {
        match self {
            EmployeeStatus::Absent { reason } => format!("{} ({})", self.label(), reason),
            other => other.label().to_string(),
        }
    }
}
