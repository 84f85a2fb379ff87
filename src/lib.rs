pub mod app;
pub mod config;
pub mod db;
pub mod foods;
pub mod goals;
pub mod logs;
pub mod nutrition;
pub mod routes;
pub mod sources;
pub mod state;
