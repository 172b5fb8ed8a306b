//! Parameter newtypes accepted by the key builders.
//!
//! None of these validate their contents. A malformed value produces a key
//! that never matches cached data, which the cache treats as a miss.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! text_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps the given value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

text_newtype!(
    /// Currency identifier such as `sBTC`, `sUSD` or `ETH`.
    ///
    /// # Example
    ///
    /// ```
    /// use synth_keys::CurrencyKey;
    ///
    /// let key = CurrencyKey::new("sBTC");
    /// assert_eq!(key.as_str(), "sBTC");
    /// ```
    CurrencyKey
);

text_newtype!(
    /// Time window for historical queries.
    ///
    /// Any label is accepted. The associated constructors cover the periods
    /// the charts request.
    Period
);

text_newtype!(
    /// Wallet address, passed through verbatim (no checksum normalization).
    WalletAddress
);

text_newtype!(
    /// Identifier of a collateralized short loan.
    LoanId
);

impl Period {
    pub fn one_hour() -> Self {
        Self::new("ONE_HOUR")
    }

    pub fn four_hours() -> Self {
        Self::new("FOUR_HOURS")
    }

    pub fn one_day() -> Self {
        Self::new("ONE_DAY")
    }

    pub fn one_week() -> Self {
        Self::new("ONE_WEEK")
    }

    pub fn one_month() -> Self {
        Self::new("ONE_MONTH")
    }
}

/// Chain identifier. Encoded as a numeric key token.
///
/// # Example
///
/// ```
/// use synth_keys::NetworkId;
///
/// assert_eq!(NetworkId::MAINNET.get(), 1);
/// assert_eq!(NetworkId::from(10), NetworkId::OPTIMISM);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(u64);

impl NetworkId {
    pub const MAINNET: NetworkId = NetworkId(1);
    pub const OPTIMISM: NetworkId = NetworkId(10);
    pub const KOVAN: NetworkId = NetworkId(42);

    /// Wraps a raw chain id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw chain id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for NetworkId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
