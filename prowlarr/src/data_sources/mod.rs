//! Data source implementations

pub mod data_source_tag;

pub use data_source_tag::TagDataSource;
