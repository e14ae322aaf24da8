pub mod configuration_store;
pub mod environment_port;
pub mod parameter_client;

pub use configuration_store::*;
pub use environment_port::*;
pub use parameter_client::*;
