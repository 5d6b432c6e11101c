use crate::core::calculator::{leave, monthly, weekly};
use crate::core::status::employee_status;
use crate::models::absence::Absence;
use crate::models::event::Event;
use crate::models::stats::EmployeeOverview;
use crate::models::user::User;
use chrono::NaiveDate;

pub struct Core;

impl Core {
    /// Status, weekly quota, current month and vacation allowance of one
    /// employee, all evaluated for `today`.
    pub fn build_overview(
        user: &User,
        events: &[Event],
        absences: &[Absence],
        today: NaiveDate,
    ) -> EmployeeOverview {
        let on_vacation = leave::is_on_vacation(&user.vacations, today);

        EmployeeOverview {
            user_id: user.id.clone(),
            name: user.name.clone(),
            status: employee_status(user, events, absences, today),
            weekly: weekly::weekly_stats(user, events, on_vacation, absences, today),
            month: monthly::current_month_stats(&user.id, events, today),
            vacations: leave::vacation_summary(user),
        }
    }
}
