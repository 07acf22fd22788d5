// home library desk

pub mod barcode;
pub mod config;
pub mod desk;
pub mod error;
pub mod forms;
pub mod mapper;
pub mod routes;
pub mod sheet;
pub mod types;
pub mod views;

pub use config::Config;
pub use desk::Desk;
pub use error::SheetError;
pub use sheet::SheetClient;
