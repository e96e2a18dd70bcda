pub mod soil;
pub mod trade;

pub use soil::{CountryMean, SoilRow, SoilTable};
pub use trade::{PartnerSummary, TradeRow, TradeTable};
