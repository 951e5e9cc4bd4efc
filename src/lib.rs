//! `Airsight` - Air-quality forecast dashboard core
//!
//! This library covers the forecast-to-visualization pipeline: request
//! lifecycle management, numeric risk classification, and transformation of
//! a raw forecast series into aligned, chart-ready data series.

pub mod chart;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod risk;
pub mod web;

// Re-export core types for public API
pub use chart::{ChartDataset, ChartSeriesSet, DashboardView, assemble};
pub use client::{ForecastApiClient, ForecastProvider};
pub use config::AirsightConfig;
pub use controller::ForecastController;
pub use error::AirsightError;
pub use models::{City, ForecastPoint, ForecastSeries, RequestState};
pub use risk::{RiskCategory, SensitivityGroup, classify};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AirsightError>;
