use chrono::NaiveDate;
use serde::Serialize;

/// Reasons offered by the absence form. Anything else is stored verbatim.
pub const PREDEFINED_REASONS: [&str; 5] = [
    "Sick leave",
    "Medical appointment",
    "Personal matters",
    "Training",
    "Other",
];

/// Predefined reason values that mean "see custom reason".
const OTHER_REASONS: [&str; 2] = ["other", "otro"];

pub fn is_other_reason(reason: &str) -> bool {
    OTHER_REASONS.contains(&reason.trim().to_lowercase().as_str())
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Absence {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    pub predefined_reason: String,
    pub custom_reason: Option<String>,
    pub created_at: String,
}

impl Absence {
    pub fn new(
        user_id: &str,
        date: NaiveDate,
        predefined_reason: &str,
        custom_reason: Option<&str>,
    ) -> Self {
        Self {
            id: 0,
            user_id: user_id.to_string(),
            date,
            predefined_reason: predefined_reason.to_string(),
            custom_reason: custom_reason
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }

    /// Text shown to the user: the custom reason replaces the "Other" sentinel.
    pub fn display_reason(&self) -> String {
        match &self.custom_reason {
            Some(custom) if is_other_reason(&self.predefined_reason) => custom.clone(),
            _ => self.predefined_reason.clone(),
        }
    }
}
