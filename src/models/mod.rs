pub mod absence;
pub mod company;
pub mod day_group;
pub mod event;
pub mod event_type;
pub mod stats;
pub mod status;
pub mod user;
pub mod vacation;
