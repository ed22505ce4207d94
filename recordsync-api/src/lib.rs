pub mod config;
pub mod logic;
pub mod middleware;
pub mod router;
pub mod server;
