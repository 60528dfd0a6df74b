//! # NFTL Ledger
//!
//! In-memory loan lifecycle tracking for NFT-collateralized lending.
//!
//! ## Components
//!
//! - **LoanRegistry**: create, repay and read loans
//! - **Height sources**: wall-clock or manually driven block height
//! - **Simnet**: named accounts plus a controllable chain height
//! - **Config**: `.env` / `NFTL_*` driven settings

pub mod config;
pub mod height;
pub mod registry;
pub mod simnet;

pub use config::{HeightSettings, HeightSourceKind, LedgerConfig};
pub use height::{BlockHeightSource, ManualHeight, WallClockHeight};
pub use registry::LoanRegistry;
pub use simnet::Simnet;
