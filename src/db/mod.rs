pub mod connection;
pub mod error;
pub mod filters;
pub mod job_repository;
pub mod migrations;
pub mod models;
pub mod sql;
