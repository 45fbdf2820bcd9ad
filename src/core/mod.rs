pub mod allocation;
pub mod compare;
pub mod dashboard;
pub mod explorer;
pub mod ingest;
pub mod log;
pub mod normalize;
