use crate::errors::{AppError, AppResult};
use crate::models::company::Company;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_company(row: &Row) -> rusqlite::Result<Company> {
    Ok(Company {
        id: row.get("id")?,
        name: row.get("name")?,
        tax_id: row.get("tax_id")?,
        created_at: row.get("created_at")?,
        created_by: row.get("created_by")?,
    })
}

pub fn insert_company(conn: &Connection, c: &Company) -> AppResult<()> {
    if c.name.is_empty() {
        return Err(AppError::InvalidValue("company name cannot be empty".into()));
    }
    conn.execute(
        "INSERT INTO companies (id, name, tax_id, created_at, created_by)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![c.id, c.name, c.tax_id, c.created_at, c.created_by],
    )?;
    Ok(())
}

pub fn load_company(conn: &Connection, id: &str) -> AppResult<Option<Company>> {
    Ok(conn
        .query_row("SELECT * FROM companies WHERE id = ?1", [id], map_company)
        .optional()?)
}

pub fn load_companies(conn: &Connection) -> AppResult<Vec<Company>> {
    let mut stmt = conn.prepare("SELECT * FROM companies ORDER BY name COLLATE NOCASE ASC")?;
    let rows = stmt.query_map([], map_company)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Attach a user to a company, or detach it with `None`.
pub fn assign_company(conn: &Connection, user_id: &str, company_id: Option<&str>) -> AppResult<()> {
    if let Some(cid) = company_id
        && load_company(conn, cid)?.is_none()
    {
        return Err(AppError::CompanyNotFound(cid.to_string()));
    }

    let changed = conn.execute(
        "UPDATE users SET company_id = ?1 WHERE id = ?2",
        params![company_id, user_id],
    )?;
    if changed == 0 {
        return Err(AppError::UserNotFound(user_id.to_string()));
    }
    Ok(())
}
