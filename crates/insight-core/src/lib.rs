pub mod error;
pub mod links;
pub mod signals;
pub mod ticker;
pub mod types;

pub use error::*;
pub use signals::{CapitalFlowReading, FlowDirection, GaugeZone, PriceDirection};
pub use ticker::{Ticker, DEFAULT_TICKER};
pub use types::*;
