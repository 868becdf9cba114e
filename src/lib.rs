pub mod answer_engine;
pub mod api;
pub mod config;
pub mod data_models;
pub mod errors;
pub mod llm;
pub mod rate_limiter;
pub mod search;
