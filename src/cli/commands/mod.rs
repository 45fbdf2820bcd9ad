pub mod compare;
pub mod config;
pub mod db;
pub mod export;
pub mod fetch;
pub mod init;
pub mod log;
pub mod report;
pub mod sheets;
pub mod show;
pub mod status;
pub mod summary;
pub mod upload;
