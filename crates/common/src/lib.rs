pub mod config;
pub mod error;
pub mod source;
pub mod table;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use source::PriceSource;
pub use table::Table;
pub use types::*;
