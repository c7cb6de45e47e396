//! Clients - HTTP Clients for External APIs
//!
//! This module contains the HTTP client for the pickup/drop service API.

pub mod pickup_api_client;

pub use pickup_api_client::PickupApiClient;
