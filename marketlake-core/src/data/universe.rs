//! Universe configuration: region-organized ticker lists plus benchmark indices.
//!
//! The universe is stored as a TOML file: a flat `indices` list and a
//! `[regions]` table mapping each region to its member tickers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The complete universe configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    /// Indices, benchmarks and commodities fetched for the index growth table.
    pub indices: Vec<String>,
    pub regions: BTreeMap<String, Vec<String>>,
}

impl Universe {
    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read universe file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse universe TOML: {e}"))
    }

    /// Get all tickers across all regions.
    pub fn all_tickers(&self) -> Vec<&str> {
        self.regions
            .values()
            .flat_map(|tickers| tickers.iter().map(|t| t.as_str()))
            .collect()
    }

    /// Get tickers for a specific region.
    pub fn region_tickers(&self, region: &str) -> Option<&[String]> {
        self.regions.get(region).map(|v| v.as_slice())
    }

    /// Get the list of region names.
    pub fn region_names(&self) -> Vec<&str> {
        self.regions.keys().map(|s| s.as_str()).collect()
    }

    pub fn index_symbols(&self) -> Vec<&str> {
        self.indices.iter().map(|s| s.as_str()).collect()
    }

    /// Total number of tickers.
    pub fn ticker_count(&self) -> usize {
        self.regions.values().map(|v| v.len()).sum()
    }

    /// Default universe: large caps from the US, China, India and Germany.
    pub fn default_global() -> Self {
        let mut regions = BTreeMap::new();

        regions.insert(
            "USA".into(),
            to_owned(&[
                "AAPL", "MSFT", "GOOGL", "META", "AMZN", "TSLA", "NVDA", "INTC", "AMD", "CSCO",
                "JPM", "BAC", "GS", "WFC", "MS", "JNJ", "PFE", "MRK", "UNH", "ABT", "HD", "NKE",
                "MCD", "SBUX", "LOW", "PG", "KO", "PEP", "WMT", "COST", "GE", "CAT", "BA", "UPS",
                "DE", "XOM", "CVX", "NEE", "DUK", "SLB", "NFLX", "PYPL", "ADBE", "CRM", "TMUS",
                "ORCL", "IBM", "QCOM", "INTU", "TXN",
            ]),
        );

        regions.insert(
            "CHINA".into(),
            to_owned(&[
                "BABA", "JD", "PDD", "BIDU", "NTES", "TCEHY", "NIO", "XPEV", "LI", "EDU", "TAL",
                "BILI", "ZTO", "YUMC", "BEKE", "HTHT", "WB", "CAN", "VIOT", "DAO", "VIPS", "MOMO",
                "HKD", "CHWY", "IQ", "HUYA", "DOYU", "KWEB",
            ]),
        );

        regions.insert(
            "INDIA".into(),
            to_owned(&[
                "RELIANCE.NS", "TCS.NS", "INFY.NS", "HDFCBANK.NS", "ICICIBANK.NS", "LT.NS",
                "SBIN.NS", "BHARTIARTL.NS", "ITC.NS", "HINDUNILVR.NS", "AXISBANK.NS",
                "ASIANPAINT.NS", "BAJFINANCE.NS", "HCLTECH.NS", "WIPRO.NS", "KOTAKBANK.NS",
                "MARUTI.NS", "SUNPHARMA.NS", "ULTRACEMCO.NS", "TITAN.NS", "TECHM.NS",
                "POWERGRID.NS", "NTPC.NS", "NESTLEIND.NS", "ONGC.NS", "TATAMOTORS.NS",
                "TATASTEEL.NS", "JSWSTEEL.NS", "ADANIENT.NS", "ADANIGREEN.NS", "ADANIPORTS.NS",
                "COALINDIA.NS", "BAJAJ-AUTO.NS", "EICHERMOT.NS", "GRASIM.NS", "HDFCLIFE.NS",
                "HEROMOTOCO.NS", "BPCL.NS", "BRITANNIA.NS", "DIVISLAB.NS", "IOC.NS",
                "HAVELLS.NS", "CIPLA.NS", "TATAELXSI.NS", "INDUSINDBK.NS", "DLF.NS",
                "PIDILITIND.NS", "M&M.NS", "GAIL.NS", "SHREECEM.NS", "HINDALCO.NS",
                "ICICIPRULI.NS",
            ]),
        );

        regions.insert(
            "GERMANY".into(),
            to_owned(&[
                "ADS.DE", "ALV.DE", "BAS.DE", "BAYN.DE", "BMW.DE", "CBK.DE", "CON.DE", "DBK.DE",
                "DB1.DE", "DTE.DE", "EOAN.DE", "FME.DE", "FRE.DE", "HEI.DE", "HEN3.DE", "IFX.DE",
                "LIN.DE", "MRK.DE", "MTX.DE", "MUV2.DE", "RWE.DE", "SAP.DE", "SIE.DE", "VOW3.DE",
                "VNA.DE", "1COV.DE", "ZAL.DE", "BVB.DE", "SY1.DE", "FIE.DE", "RRTL.DE", "PSM.DE",
                "SDF.DE", "HFG.DE",
            ]),
        );

        let indices = to_owned(&[
            "^GDAXI", "^GSPC", "^DJI", "EPI", "^VIX", "GC=F", "CL=F", "BZ=F", "BTC-USD",
        ]);

        Self { indices, regions }
    }

    /// Serialize the universe to TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("serialize universe: {e}"))
    }
}

fn to_owned(tickers: &[&str]) -> Vec<String> {
    tickers.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_universe_has_regions() {
        let u = Universe::default_global();
        assert_eq!(u.region_names(), vec!["CHINA", "GERMANY", "INDIA", "USA"]);
        assert!(u.ticker_count() > 150);
        assert_eq!(u.indices.len(), 9);
    }

    #[test]
    fn toml_roundtrip() {
        let u = Universe::default_global();
        let toml_str = u.to_toml().unwrap();
        let parsed = Universe::from_toml(&toml_str).unwrap();
        assert_eq!(u, parsed);
    }

    #[test]
    fn all_tickers_flattens() {
        let u = Universe::default_global();
        let all = u.all_tickers();
        assert!(all.contains(&"AAPL"));
        assert!(all.contains(&"SAP.DE"));
        assert!(all.contains(&"M&M.NS"));
    }

    #[test]
    fn region_lookup() {
        let u = Universe::default_global();
        let india = u.region_tickers("INDIA").unwrap();
        assert!(india.contains(&"TCS.NS".to_string()));
        assert!(u.region_tickers("MARS").is_none());
    }

    #[test]
    fn parses_hand_written_toml() {
        let u = Universe::from_toml(
            r#"
indices = ["^GSPC"]

[regions]
USA = ["AAPL", "MSFT"]
"#,
        )
        .unwrap();
        assert_eq!(u.index_symbols(), vec!["^GSPC"]);
        assert_eq!(u.ticker_count(), 2);
    }
}
