//! Command handlers - extracted from main.rs for testability

pub mod baseline;
pub mod check;

pub use baseline::execute_baseline;
pub use check::{
    execute_check, exit_status, load_table, EXIT_INPUT_ERROR, EXIT_MISMATCH, EXIT_PASSED,
};
