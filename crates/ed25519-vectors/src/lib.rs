pub mod logger;
pub mod report_builder;
pub mod vectors;
