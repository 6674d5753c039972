pub mod common;

pub mod capability_tests;
pub mod manager_tests;
pub mod resolver_tests;
