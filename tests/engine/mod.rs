mod batch_tests;
mod link_properties;
mod resolution_tests;
mod scanner_scenarios;
