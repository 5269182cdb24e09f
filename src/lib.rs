pub mod config;
pub mod cycle;
pub mod fetch;
pub mod process;
pub mod render;
pub mod resolve;
