pub mod config;
pub mod fetcher;
pub mod league;
pub mod metrics;
pub mod normalizer;
pub mod output;
pub mod rate_limit;
pub mod runner;
pub mod tables;
pub mod types;
