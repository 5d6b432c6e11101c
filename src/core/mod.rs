pub mod calculator;
pub mod logic;
pub mod report;
pub mod scan;
pub mod status;
