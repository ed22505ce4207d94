mod integration_client;

pub use integration_client::*;
