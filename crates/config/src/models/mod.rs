pub mod app_config;
pub mod logging;
pub mod remote;

pub use app_config::*;
pub use logging::*;
pub use remote::*;
