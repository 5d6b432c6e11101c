pub mod absence;
pub mod company;
pub mod config;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod report;
pub mod scan;
pub mod status;
pub mod user;
pub mod vacation;
pub mod week;
