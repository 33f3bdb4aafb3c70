pub mod cache;
pub mod client;
pub mod context;
pub mod error;
pub mod tracker;

mod upstream_tests;
