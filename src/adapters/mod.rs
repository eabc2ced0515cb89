pub mod api_handler;
pub mod etl_registry;
pub mod health_handler;
pub mod query_store;
pub mod ui_handler;
