mod icons;
mod logging;
mod persistence;
mod service;

pub use service::run_service;
