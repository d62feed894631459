pub mod loader;
pub mod run;
pub mod schema;

pub use loader::{discover, load_from_path, load_from_str, ConfigError, CONFIG_ENV};
pub use run::{CliOverrides, Mode, RunConfig};
pub use schema::{Settings, ValidationError, ValidationIssue};
