mod integration;
mod record_store;
mod store;

pub use integration::*;
pub use record_store::*;
pub use store::*;
