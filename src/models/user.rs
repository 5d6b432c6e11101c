use super::vacation::VacationRange;
use serde::Serialize;

pub const DEFAULT_WEEKLY_HOURS: f64 = 40.0;
pub const DEFAULT_WORKING_DAYS: u32 = 5;
pub const DEFAULT_VACATION_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Employee,
    Admin,
}

impl Role {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Admin => "ADMIN",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "EMPLOYEE" => Some(Role::Employee),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Helper: parse a role typed on the command line (any case)
    pub fn from_code(code: &str) -> Option<Self> {
        Role::from_db_str(&code.to_uppercase())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub company_id: Option<String>,
    pub vacations: Vec<VacationRange>,
    pub weekly_hours: f64,
    pub working_days_per_week: u32,
    pub total_vacation_days: u32,
    pub is_deleted: bool,
    pub deleted_at: Option<String>,
}

impl User {
    /// New employee profile with the default quotas.
    pub fn new(id: &str, name: &str, email: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            role: Role::Employee,
            company_id: None,
            vacations: Vec::new(),
            weekly_hours: DEFAULT_WEEKLY_HOURS,
            working_days_per_week: DEFAULT_WORKING_DAYS,
            total_vacation_days: DEFAULT_VACATION_DAYS,
            is_deleted: false,
            deleted_at: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
