//! Synth Keys - query key registry
//!
//! Canonical cache keys for synth rates, wallet balances, collateral
//! positions, trades and market data. Independent call sites that address
//! the same resource build identical keys; different resources never
//! collide.
//!
//! ```
//! use synth_keys::{NetworkId, QueryKeys, WalletAddress};
//!
//! let keys = QueryKeys::new();
//! let key = keys
//!     .wallet_balances()
//!     .synths(&WalletAddress::new("0xABC"), NetworkId::MAINNET);
//!
//! assert_eq!(key.to_json().unwrap(), r#"["walletBalances","synths","0xABC",1]"#);
//! ```

pub mod catalog;
pub mod error;
pub mod key;
pub mod registry;
pub mod types;

pub use catalog::{CatalogEntry, ConstantLeaf, KeyBuilder, Leaf, Param, ParamKind};
pub use error::{KeyError, Result};
pub use key::{KeyToken, QueryKey};
pub use registry::{DEFAULT_LIST_DELIMITER, QueryKeys, QueryKeysBuilder, RegistryConfig};
pub use types::{CurrencyKey, LoanId, NetworkId, Period, WalletAddress};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
