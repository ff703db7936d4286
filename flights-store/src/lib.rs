pub mod app_config;
pub mod database;
pub mod gateway;
pub mod scan;
mod statements;

pub use database::DbClient;
pub use gateway::PostgresGateway;
