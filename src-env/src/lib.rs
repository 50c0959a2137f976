//! Environment helpers shared by the benchmark crates

pub mod constants;
pub mod env_utils;

pub use env_utils::{EnvError, get_data_generated_dir, get_mixint_dir, get_output_dir};
