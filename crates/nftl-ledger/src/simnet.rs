//! Simnet - simulated chain environment for lending scenarios
//!
//! Provisions named accounts (`deployer`, `wallet_1`, `wallet_2`, ...) with
//! deterministic addresses and exposes a block height that only moves
//! when blocks are mined.

use tracing::debug;

use crate::config::{HeightSettings, HeightSourceKind, LedgerConfig};
use crate::height::{BlockHeightSource, ManualHeight};
use crate::registry::LoanRegistry;

/// Name of the account that would deploy the lending contract
pub const DEPLOYER: &str = "deployer";

/// Testnet-style address prefix
const ADDRESS_PREFIX: &str = "ST";

/// Address bytes taken from the name digest
const ADDRESS_BYTES: usize = 20;

/// One provisioned account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimAccount {
    pub name: String,
    pub address: String,
}

/// Simulated network with named accounts and a manual block height
#[derive(Debug)]
pub struct Simnet {
    accounts: Vec<SimAccount>,
    height: ManualHeight,
    config: LedgerConfig,
}

impl Simnet {
    /// Provision `deployer` plus `wallet_1..=wallet_{wallets}` at height 0
    pub fn new(wallets: usize) -> Self {
        let config = LedgerConfig {
            wallets,
            height: HeightSettings {
                source: HeightSourceKind::Manual,
                initial_height: 0,
            },
            ..LedgerConfig::default()
        };
        Self::from_config(config)
    }

    /// Provision accounts and starting height from `config`
    ///
    /// The simnet always drives height manually; a wall-clock setting
    /// starts it at the current Unix second instead of `initial_height`.
    pub fn from_config(config: LedgerConfig) -> Self {
        let start = match config.height.source {
            HeightSourceKind::Manual => config.height.initial_height,
            HeightSourceKind::WallClock => crate::height::WallClockHeight.block_height(),
        };

        let accounts = std::iter::once(DEPLOYER.to_string())
            .chain((1..=config.wallets).map(|n| format!("wallet_{n}")))
            .map(|name| SimAccount {
                address: derive_address(&name),
                name,
            })
            .collect::<Vec<_>>();

        debug!(accounts = accounts.len(), start_height = start, "Simnet provisioned");

        Self {
            accounts,
            height: ManualHeight::new(start),
            config,
        }
    }

    /// Address of the named account
    pub fn account(&self, name: &str) -> Option<&str> {
        self.accounts
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.address.as_str())
    }

    /// All accounts in provisioning order
    pub fn accounts(&self) -> &[SimAccount] {
        &self.accounts
    }

    pub fn block_height(&self) -> u64 {
        self.height.block_height()
    }

    /// Mine one block, returning the new height
    pub fn mine_block(&self) -> u64 {
        self.height.advance(1)
    }

    /// Mine `count` empty blocks, returning the new height
    pub fn mine_empty_blocks(&self, count: u64) -> u64 {
        self.height.advance(count)
    }

    /// Fresh registry stamped with this simnet's height
    pub fn registry(&self) -> LoanRegistry<&ManualHeight> {
        LoanRegistry::with_config(&self.config, &self.height)
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}

fn derive_address(name: &str) -> String {
    let digest = blake3::hash(name.as_bytes());
    let encoded = bs58::encode(&digest.as_bytes()[..ADDRESS_BYTES]).into_string();
    format!("{ADDRESS_PREFIX}{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_accounts_provisioned() {
        let simnet = Simnet::new(2);
        let names: Vec<&str> = simnet.accounts().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["deployer", "wallet_1", "wallet_2"]);

        let w1 = simnet.account("wallet_1").unwrap();
        let w2 = simnet.account("wallet_2").unwrap();
        assert!(w1.starts_with("ST"));
        assert_ne!(w1, w2);
        assert!(simnet.account("wallet_3").is_none());
    }

    #[test]
    fn test_addresses_are_deterministic() {
        let a = Simnet::new(1);
        let b = Simnet::new(5);
        assert_eq!(a.account("wallet_1"), b.account("wallet_1"));
    }

    #[test]
    fn test_mining_moves_height() {
        let simnet = Simnet::new(1);
        assert_eq!(simnet.block_height(), 0);
        assert_eq!(simnet.mine_block(), 1);
        assert_eq!(simnet.mine_empty_blocks(9), 10);
    }

    #[test]
    fn test_registry_follows_simnet_height() {
        let simnet = Simnet::new(1);
        let user = simnet.account("wallet_1").unwrap();
        let mut registry = simnet.registry();

        simnet.mine_empty_blocks(25);
        let id = registry.create_loan(user, 7, dec!(50), 10).unwrap();

        let loan = registry.get_loan(id).unwrap();
        assert_eq!(loan.start_block, 25);
        assert_eq!(loan.maturity_block(), 35);
    }

    #[test]
    fn test_from_config_manual_start() {
        let mut config = LedgerConfig::default();
        config.height.source = HeightSourceKind::Manual;
        config.height.initial_height = 500;
        config.wallets = 0;

        let simnet = Simnet::from_config(config);
        assert_eq!(simnet.block_height(), 500);
        assert_eq!(simnet.accounts().len(), 1);
    }
}
