//! Integration tests

mod cli_test;
mod e2e_test;
mod render_test;
mod valuation_test;
