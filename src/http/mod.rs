//! HTTP client layer — `DashboardHttp`, one request per call.

pub mod client;

pub use client::DashboardHttp;
