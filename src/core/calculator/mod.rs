pub mod duration;
pub mod grouping;
pub mod leave;
pub mod monthly;
pub mod weekly;
