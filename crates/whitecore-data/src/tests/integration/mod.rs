pub mod application_tests;
pub mod scenario_tests;
