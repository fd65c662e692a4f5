pub mod config;
pub mod constants;
pub mod errors;
pub mod retry;
pub mod types;
pub mod utils;

pub use config::{EnvLoader, RouterConfig};
pub use errors::{ConfigError, RouterError, RouterResult};
pub use retry::{with_retry, RetryPolicy};
pub use types::*;
