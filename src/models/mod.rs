pub mod action_plan;
pub mod parameter;
pub mod reading;
pub mod report;
pub mod station;
pub mod user;
pub mod zone;
