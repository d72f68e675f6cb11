pub mod auth;
pub mod config;
pub mod pdf;
pub mod repositories;
pub mod storage;
