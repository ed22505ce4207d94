pub mod action;
pub mod configuration;
pub mod connection;
pub mod error;
pub mod identity;
pub mod record;
pub mod schema;
pub mod store;

pub use action::*;
pub use configuration::*;
pub use connection::*;
pub use error::*;
pub use identity::*;
pub use record::*;
pub use store::*;
