//! Configuration sources: the global TOML file and process environment.

pub mod environment;
pub mod global_file;
