use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub created_at: String,
    pub created_by: Option<String>,
}

impl Company {
    pub fn new(id: &str, name: &str, tax_id: &str, created_by: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.trim().to_string(),
            tax_id: tax_id.trim().to_uppercase(),
            created_at: chrono::Local::now().to_rfc3339(),
            created_by: created_by.map(str::to_string),
        }
    }
}
