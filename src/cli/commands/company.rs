use crate::cli::parser::{CompanyAction, Commands};
use crate::config::Config;
use crate::db::companies::{assign_company, insert_company, load_companies, load_company};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users::require_user;
use crate::errors::{AppError, AppResult};
use crate::models::company::Company;
use crate::ui::messages::{success, warning};
use crate::utils::table::Table;

/// Handle `company add|list|assign`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Company { action } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match action {
            CompanyAction::Add {
                id,
                name,
                tax_id,
                created_by,
            } => {
                if load_company(&pool.conn, id)?.is_some() {
                    return Err(AppError::InvalidValue(format!("company '{}' already exists", id)));
                }
                if let Some(admin_id) = created_by {
                    let admin = require_user(&pool.conn, admin_id)?;
                    if !admin.is_admin() {
                        return Err(AppError::InvalidRole(format!(
                            "{} is not an administrator",
                            admin.id
                        )));
                    }
                }

                let company = Company::new(id, name, tax_id, created_by.as_deref());
                insert_company(&pool.conn, &company)?;

                if let Err(e) = ttlog(&pool.conn, "company_add", id, &company.name) {
                    warning(format!("Failed to write internal log: {}", e));
                }
                success(format!("Company {} ({}) created.", company.name, company.id));
            }

            CompanyAction::List => {
                let companies = load_companies(&pool.conn)?;
                if companies.is_empty() {
                    println!("No companies found.");
                    return Ok(());
                }

                let mut table = Table::new(&["ID", "Name", "Tax ID", "Created by", "Created at"]);
                for c in companies {
                    table.add_row(vec![
                        c.id,
                        c.name,
                        c.tax_id,
                        c.created_by.unwrap_or_else(|| "-".to_string()),
                        c.created_at,
                    ]);
                }
                print!("{}", table.render());
            }

            CompanyAction::Assign { user, company } => {
                assign_company(&pool.conn, user, company.as_deref())?;

                let msg = match company {
                    Some(c) => format!("{} assigned to {}", user, c),
                    None => format!("{} detached from its company", user),
                };
                if let Err(e) = ttlog(&pool.conn, "company_assign", user, &msg) {
                    warning(format!("Failed to write internal log: {}", e));
                }
                success(msg);
            }
        }
    }
    Ok(())
}
