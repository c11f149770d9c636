pub mod carrier;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod normalizer;
pub mod providers;
pub mod registry;
pub mod storage;
pub mod telemetry;
pub mod transport;
