//! The query key registry.
//!
//! [`QueryKeys`] is built once at startup and handed by reference to every
//! consumer that needs to address cached data. It is immutable, `Copy` and
//! safe to share across threads; every builder is a pure function of its
//! arguments and the registry's list delimiter.

mod namespaces;

pub use namespaces::{
    CoinGecko, CoinMarketCap, Collateral, Convert, Network, Rates, Synths, SystemStatus,
    TokenLists, Trades, WalletBalances,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{KeyError, Result};
use crate::key::{DISPLAY_SEPARATOR, KeyToken};

/// Delimiter used to flatten list parameters into a single token.
pub const DEFAULT_LIST_DELIMITER: char = '|';

/// Characters that appear inside identifiers or the display form of a key
/// and therefore cannot delimit lists.
const RESERVED_DELIMITERS: &[char] = &['_', '-', '.', DISPLAY_SEPARATOR];

/// Serializable registry settings, for embedding in application config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Delimiter for list-valued parameters.
    #[serde(default = "default_list_delimiter")]
    pub list_delimiter: char,
}

fn default_list_delimiter() -> char {
    DEFAULT_LIST_DELIMITER
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            list_delimiter: DEFAULT_LIST_DELIMITER,
        }
    }
}

/// Registry of query key builders.
///
/// # Examples
///
/// ```
/// use synth_keys::{CurrencyKey, Period, QueryKeys};
///
/// let keys = QueryKeys::new();
/// let key = keys
///     .rates()
///     .historical_rates(&CurrencyKey::new("sBTC"), &Period::new("1M"));
///
/// assert_eq!(key.to_json().unwrap(), r#"["rates","historicalRates","sBTC","1M"]"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryKeys {
    list_delimiter: char,
}

impl QueryKeys {
    /// Creates a registry with the default list delimiter.
    pub fn new() -> Self {
        Self {
            list_delimiter: DEFAULT_LIST_DELIMITER,
        }
    }

    /// Creates a builder for a registry with custom settings.
    pub fn builder() -> QueryKeysBuilder {
        QueryKeysBuilder::default()
    }

    /// Creates a registry from deserialized settings.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        Self::builder().list_delimiter(config.list_delimiter).build()
    }

    /// Returns the delimiter used to join list parameters.
    pub fn list_delimiter(&self) -> char {
        self.list_delimiter
    }

    /// Rate keys.
    pub fn rates(&self) -> Rates {
        Rates
    }

    /// Network keys.
    pub fn network(&self) -> Network {
        Network
    }

    /// Wallet balance keys.
    pub fn wallet_balances(&self) -> WalletBalances {
        WalletBalances
    }

    /// Synth status keys.
    pub fn synths(&self) -> Synths {
        Synths
    }

    /// Collateral short keys.
    pub fn collateral(&self) -> Collateral {
        Collateral
    }

    /// Trade history keys.
    pub fn trades(&self) -> Trades {
        Trades
    }

    /// System status keys.
    pub fn system_status(&self) -> SystemStatus {
        SystemStatus
    }

    /// 1inch conversion keys.
    pub fn convert(&self) -> Convert {
        Convert
    }

    /// Token list keys.
    pub fn token_lists(&self) -> TokenLists {
        TokenLists
    }

    /// CoinMarketCap keys.
    pub fn cmc(&self) -> CoinMarketCap<'_> {
        CoinMarketCap::new(self)
    }

    /// CoinGecko keys.
    pub fn coin_gecko(&self) -> CoinGecko<'_> {
        CoinGecko::new(self)
    }

    /// Joins list elements into one order-preserving token.
    ///
    /// The empty list yields the empty string. Elements are not escaped: an
    /// element containing the delimiter makes the token ambiguous, which is
    /// logged but still returned.
    pub(crate) fn join_list<S: AsRef<str>>(&self, leaf: &'static str, items: &[S]) -> KeyToken {
        let mut joined = String::new();
        for (i, item) in items.iter().enumerate() {
            let item = item.as_ref();
            if item.contains(self.list_delimiter) {
                warn!(
                    leaf = leaf,
                    item = %item,
                    delimiter = %self.list_delimiter,
                    "List element contains the list delimiter; key may collide"
                );
            }
            if i > 0 {
                joined.push(self.list_delimiter);
            }
            joined.push_str(item);
        }
        KeyToken::Text(joined)
    }
}

impl Default for QueryKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`QueryKeys`].
#[derive(Debug, Clone)]
pub struct QueryKeysBuilder {
    list_delimiter: char,
}

impl Default for QueryKeysBuilder {
    fn default() -> Self {
        Self {
            list_delimiter: DEFAULT_LIST_DELIMITER,
        }
    }
}

impl QueryKeysBuilder {
    /// Sets the list delimiter.
    pub fn list_delimiter(mut self, delimiter: char) -> Self {
        self.list_delimiter = delimiter;
        self
    }

    /// Validates the settings and builds the registry.
    pub fn build(self) -> Result<QueryKeys> {
        let delimiter = self.list_delimiter;

        if !delimiter.is_ascii_punctuation() {
            return Err(KeyError::invalid_delimiter(
                delimiter,
                "must be an ASCII punctuation character",
            ));
        }
        if RESERVED_DELIMITERS.contains(&delimiter) {
            return Err(KeyError::invalid_delimiter(
                delimiter,
                "reserved for identifiers or the key display form",
            ));
        }

        debug!(list_delimiter = %delimiter, "Query key registry built");

        Ok(QueryKeys {
            list_delimiter: delimiter,
        })
    }
}
