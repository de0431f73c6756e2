pub mod action_log;
pub mod config;
pub mod driver;
pub mod extract;
pub mod form;
pub mod formatter;
pub mod navigator;
pub mod parser;
pub mod runner;
pub mod session;
pub mod site;
pub mod wait;

pub use quill_common::error;
pub use quill_common::protocol;
