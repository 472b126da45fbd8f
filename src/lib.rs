pub mod config;
pub mod document;
pub mod file;
