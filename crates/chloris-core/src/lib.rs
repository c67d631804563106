pub mod error;
pub mod units;
pub mod crops;
pub mod climate;
pub mod psychrometrics;
pub mod nutrients;
pub mod economics;
pub mod phenology;
pub mod genetics;
pub mod pathology;
pub mod results;
pub mod oracle;
pub mod export;
pub mod settings;

pub use error::{ChlorisError, Result};
