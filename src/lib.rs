pub mod activity_log;
pub mod articles;
pub mod auth_api;
pub mod authors;
pub mod config;
pub mod datetime;
pub mod db;
pub mod enrich;
pub mod error;
pub mod members;
pub mod middleware;
pub mod orm;
pub mod pagination;
pub mod posts;
pub mod taxonomy;
pub mod web;
