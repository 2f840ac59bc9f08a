pub mod app;
pub mod conf;
pub mod event;
pub mod finalize;
pub mod ingest;
pub mod jq;
pub mod step;
pub mod transform;
