use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VolumeError;

/// Bridge chains tracked by the Hop subgraphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Xdai,
    Polygon,
    Optimism,
    Arbitrum,
    Mainnet,
}

impl Chain {
    pub const ALL: [Chain; 5] = [
        Chain::Xdai,
        Chain::Polygon,
        Chain::Optimism,
        Chain::Arbitrum,
        Chain::Mainnet,
    ];

    /// Name used in the subgraph path (`hop-{name}`)
    pub fn subgraph_name(&self) -> &'static str {
        match self {
            Chain::Xdai => "xdai",
            Chain::Polygon => "polygon",
            Chain::Optimism => "optimism",
            Chain::Arbitrum => "arbitrum",
            Chain::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.subgraph_name())
    }
}

impl FromStr for Chain {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xdai" | "gnosis" => Ok(Chain::Xdai),
            "polygon" => Ok(Chain::Polygon),
            "optimism" => Ok(Chain::Optimism),
            "arbitrum" => Ok(Chain::Arbitrum),
            "mainnet" | "ethereum" => Ok(Chain::Mainnet),
            other => Err(VolumeError::Config(format!("Unknown chain '{}'", other))),
        }
    }
}
