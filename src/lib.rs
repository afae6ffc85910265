//! function-chart: sampling and coordinate-mapping engine for expression charts.
//!
//! The crate turns a chart configuration (a nested JSON object owned by the
//! host dashboard) plus a snapshot of live signal values into a deterministic,
//! backend-agnostic render description. It also provides the path-addressed
//! configuration patching used by the accompanying editor form.

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod expr;
pub mod render;
pub mod telemetry;

pub use api::{ChartBuilder, ChartEngine, ChartScene};
pub use config::{ChartConfig, ConfigEditor, ConfigPath, SeriesSpec};
pub use error::{ChartError, ChartResult};
pub use expr::{EvalError, Expression, evaluate};
