pub mod aggregator;
pub mod chart_series;
pub mod drill_down;
pub mod employee_rows;
pub mod filter_payload;

mod filter_payload_tests;
mod projection_tests;
