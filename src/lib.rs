pub mod clustering;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod records;
pub mod upload;
