pub mod account;
pub(crate) mod command_adapter;
pub mod command_runner;
pub mod config;
pub mod diagnostics;
pub mod doctor;
pub mod filter;
pub mod github;
pub mod oversized;
pub mod paths;
pub mod picker;
pub mod repository;
#[cfg(test)]
pub(crate) mod test_support;
pub mod time;
