pub mod candidates;
pub mod charts;
pub mod config;
pub mod manifest;
pub mod metrics;
pub mod pipeline;
pub mod profile;
pub mod ranking;
pub mod render_context;
pub mod season_dataset;
pub mod stats;
pub mod table_export;
pub mod transfers;
pub mod workbook_export;
