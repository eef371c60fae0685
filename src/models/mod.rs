pub mod chain;
pub mod price;
pub mod token;
pub mod volume;

pub use chain::Chain;
pub use price::{PriceMap, PriceQuotes, FALLBACK_PRICE};
pub use token::{TokenCatalog, TokenInfo};
pub use volume::{ChainVolume, DailyVolumeRecord, HistoricalVolume, VolumeRecord, VolumeSummary};
