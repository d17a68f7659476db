//! rental-api - in-memory CRUD REST API for rental property records

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod property;
