pub mod actions;
pub mod database;
pub mod integration;
