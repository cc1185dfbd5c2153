//! HTTP Routes

pub mod health;
pub mod metrics;
pub mod options;
pub mod predict;
