mod auth_extractor;
mod tracing_layer;
mod metrics_layer;
mod validation;

pub use auth_extractor::*;
pub use tracing_layer::*;
pub use metrics_layer::*;
pub use validation::*;
