pub mod commands;
pub mod config;
pub mod credentials;
pub mod github;
pub mod graph;
pub mod output;
pub mod summarize;
