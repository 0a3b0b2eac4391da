//! Ingestion routine - provider fetch, CSV encoding and staging.

mod ingestion_model;
mod ingestion_service;
mod ingestion_traits;


pub use ingestion_model::{
    FundamentalsSummary, IngestionConfig, IngestionSummary, TickerOutcome, TickerStatus,
};
pub use ingestion_service::{Clock, IngestionService};
pub use ingestion_traits::IngestionServiceTrait;
