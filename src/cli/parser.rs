use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rClockIn
#[derive(Parser)]
#[command(
    name = "rclockin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee attendance CLI: record clock-in/clock-out scans, vacations and absences, and report worked hours",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Manage employees and administrators
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage companies
    Company {
        #[command(subcommand)]
        action: CompanyAction,
    },

    /// Plan, edit or remove vacation ranges
    Vacation {
        #[command(subcommand)]
        action: VacationAction,
    },

    /// Declare, list or remove absences
    Absence {
        #[command(subcommand)]
        action: AbsenceAction,
    },

    /// Register a scan: the first scan of the day is IN, the second OUT
    Scan {
        /// User id
        user: String,

        /// Scanned location code (defaults to the configured location)
        location: Option<String>,

        /// Record the scan at this RFC 3339 timestamp instead of now
        #[arg(long = "at", value_name = "TIMESTAMP")]
        at: Option<String>,
    },

    /// Show the day-by-day history of a user (scans and absences)
    History {
        user: String,

        #[arg(long, help = "Only show days inside this range")]
        range: Option<String>,
    },

    /// Show the current status of one user or of every active user
    Status {
        user: Option<String>,

        #[arg(long = "date", help = "Evaluate as of this date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Weekly hours against the quota
    Week {
        user: String,

        #[arg(long = "date", help = "Evaluate the week containing this date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Detailed or monthly attendance report of one user
    Report {
        user: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range (START:END, open ends allowed)"
        )]
        range: Option<String>,

        #[arg(long, help = "Group by month instead of listing days")]
        monthly: bool,

        #[arg(long, value_name = "FILE", help = "Also write the report as PDF")]
        pdf: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export raw scans
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, help = "Only export scans of this user")]
        user: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a new user
    Add {
        id: String,
        name: String,
        email: String,

        #[arg(long, help = "Create the user as administrator")]
        admin: bool,

        #[arg(long)]
        company: Option<String>,

        #[arg(long = "weekly-hours")]
        weekly_hours: Option<f64>,

        #[arg(long = "working-days")]
        working_days: Option<u32>,

        #[arg(long = "vacation-days")]
        vacation_days: Option<u32>,
    },

    /// List users
    List {
        #[arg(long, help = "Include soft-deleted users")]
        all: bool,

        #[arg(long)]
        company: Option<String>,
    },

    /// Show one user with status, weekly hours and vacations
    Show { id: String },

    /// Update profile fields
    Set {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, help = "EMPLOYEE or ADMIN")]
        role: Option<String>,

        #[arg(long = "weekly-hours")]
        weekly_hours: Option<f64>,

        #[arg(long = "working-days")]
        working_days: Option<u32>,

        #[arg(long = "vacation-days")]
        vacation_days: Option<u32>,
    },

    /// Delete a user (soft by default)
    Delete {
        id: String,

        #[arg(long, help = "Also erase scans, absences and vacations")]
        hard: bool,
    },
}

#[derive(Subcommand)]
pub enum CompanyAction {
    /// Create a company
    Add {
        id: String,
        name: String,

        #[arg(long = "tax-id", default_value = "")]
        tax_id: String,

        #[arg(long = "by", help = "Id of the administrator creating it")]
        created_by: Option<String>,
    },

    /// List companies
    List,

    /// Assign a user to a company (omit the company to detach)
    Assign {
        user: String,
        company: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum VacationAction {
    /// Add an inclusive vacation range
    Add {
        user: String,
        start: String,
        end: String,
    },

    /// Change the dates of a vacation range
    Edit {
        user: String,
        id: String,
        start: String,
        end: String,
    },

    /// Remove a vacation range
    Remove { user: String, id: String },

    /// List the vacation ranges of a user with the allowance summary
    List { user: String },
}

#[derive(Subcommand)]
pub enum AbsenceAction {
    /// Declare an absence
    Add {
        user: String,
        date: String,
        reason: String,

        #[arg(long, help = "Free text, used when the reason is \"Other\"")]
        custom: Option<String>,
    },

    /// List absences
    List {
        #[arg(long)]
        user: Option<String>,

        #[arg(long)]
        date: Option<String>,
    },

    /// Remove an absence by id
    Remove { id: i64 },
}
