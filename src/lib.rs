pub mod config;
pub mod environment;
pub mod errors;
pub mod home;
pub mod homes;
pub mod info;
pub mod log;
pub mod routes;
pub mod seed;
pub mod store;
pub mod urls;
