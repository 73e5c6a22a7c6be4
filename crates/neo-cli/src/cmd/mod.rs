pub mod config;
pub mod plot;
pub mod serve;
