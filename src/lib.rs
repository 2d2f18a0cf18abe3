pub mod config;
pub mod dataset;
pub mod history;
pub mod output;
pub mod scoring;
