pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod logging;
pub mod shutdown;
