pub mod csv_parser;
pub mod dataset_store;
