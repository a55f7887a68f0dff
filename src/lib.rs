pub mod config;
pub mod output;
pub mod provider;
pub mod scoring;
