use nalgebra::DVector;

#[cfg(feature = "std")]
use tracing::{debug, error, trace, warn};
#[cfg(feature = "std")]
use tracing_appender::non_blocking::WorkerGuard;
#[cfg(feature = "std")]
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

#[cfg(feature = "std")]
pub mod tracer;
#[cfg(feature = "std")]
pub use tracer::*;

pub mod number;
pub use number::*;

pub mod error;
pub use error::*;

pub mod config;
pub use config::*;

pub mod types;
pub use types::*;

pub mod piecewise;
pub use piecewise::*;

pub mod huber;
pub use huber::*;

pub mod input_data;
pub use input_data::*;

pub mod output_data;
pub use output_data::*;

pub mod oracle;
pub use oracle::*;

pub mod separation;
pub use separation::*;

pub mod propagator;
pub use propagator::*;

pub mod solver;
pub use solver::*;

pub mod fast;
pub use fast::*;

pub mod objective;

#[cfg(feature = "std")]
pub mod generators;

#[cfg(feature = "bench-cli")]
pub mod report;
