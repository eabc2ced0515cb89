pub mod etl_service;

pub use etl_service::EtlService;
