// Integration test modules
#[path = "../common/mod.rs"]
pub mod common;

pub mod assignment_flow_tests;
pub mod config_tests;
pub mod evaluation_flow_tests;
