//! Ledger configuration

use nftl_common::{NftlError, Result};
use serde::{Deserialize, Serialize};

/// Default number of provisioned simnet wallets (`wallet_1` .. `wallet_9`)
pub const DEFAULT_WALLETS: usize = 9;

/// Registry and simnet configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Reject repayment of a loan that is already `REPAID`
    pub strict_repayment: bool,
    /// Block height settings
    pub height: HeightSettings,
    /// Number of `wallet_N` accounts the simnet provisions
    pub wallets: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            strict_repayment: false,
            height: HeightSettings::default(),
            wallets: DEFAULT_WALLETS,
        }
    }
}

/// Where block height comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightSourceKind {
    WallClock,
    Manual,
}

impl std::str::FromStr for HeightSourceKind {
    type Err = NftlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wall_clock" | "wallclock" => Ok(HeightSourceKind::WallClock),
            "manual" => Ok(HeightSourceKind::Manual),
            other => Err(NftlError::Config(format!("unknown height source: {other}"))),
        }
    }
}

/// Block height settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightSettings {
    pub source: HeightSourceKind,
    /// Starting height for the manual source
    pub initial_height: u64,
}

impl Default for HeightSettings {
    fn default() -> Self {
        Self {
            source: HeightSourceKind::WallClock,
            initial_height: 0,
        }
    }
}

impl LedgerConfig {
    /// Load configuration from `.env` and `NFTL_*` environment variables
    pub fn load() -> Result<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, starting from defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(val) = lookup("NFTL_STRICT_REPAYMENT") {
            cfg.strict_repayment = parse_bool("NFTL_STRICT_REPAYMENT", &val)?;
        }
        if let Some(val) = lookup("NFTL_HEIGHT_SOURCE") {
            cfg.height.source = val.parse()?;
        }
        if let Some(val) = lookup("NFTL_INITIAL_HEIGHT") {
            cfg.height.initial_height = parse_num("NFTL_INITIAL_HEIGHT", &val)?;
        }
        if let Some(val) = lookup("NFTL_WALLETS") {
            cfg.wallets = parse_num("NFTL_WALLETS", &val)?;
        }

        Ok(cfg)
    }
}

fn parse_bool(key: &str, val: &str) -> Result<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(NftlError::Config(format!("{key}: expected a boolean, got {val:?}"))),
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, val: &str) -> Result<T> {
    val.trim()
        .parse()
        .map_err(|_| NftlError::Config(format!("{key}: expected a number, got {val:?}")))
}
