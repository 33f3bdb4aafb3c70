pub mod aggregation;
pub mod attendance;
pub mod employee;
pub mod filter;
pub mod hierarchy;
pub mod organization;
pub mod role;
