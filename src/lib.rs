pub mod config;
pub mod error;
pub mod features;
pub mod helper;
pub mod modules;
pub mod pipeline;
pub mod utils;
