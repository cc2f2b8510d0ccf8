pub mod constant;
pub mod environment;

pub use constant::{Constant, FormMode};
pub use environment::{Environment, EnvironmentOption};
