//! HTTP clients for the MLflow-style model registry and tracking server.

pub mod client;
pub mod tracking;

pub use client::{ModelVersion, RegistryClient, RegistryError};
pub use tracking::TrackingClient;
