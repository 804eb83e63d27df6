mod account_tests;
mod auth_flow_tests;
mod browse_tests;
mod posting_tests;
