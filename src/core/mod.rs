mod engine;
mod error;
mod types;

pub use engine::{monthly_payment, project, summarize};
pub use error::InputError;
pub use types::{Assumptions, Leader, Projection, ProjectionSummary, YearRow};
