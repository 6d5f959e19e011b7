pub mod metrics_dto;
