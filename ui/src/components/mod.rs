pub mod etl_modal;
pub mod etl_tables;
pub mod notifications;
pub mod sql_lab;
