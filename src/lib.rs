pub mod config;
pub mod db;
pub mod error;
pub mod factory;
pub mod models;
pub mod operations;
