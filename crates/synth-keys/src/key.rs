//! Query key values.
//!
//! A [`QueryKey`] is the ordered token sequence a cache uses to address one
//! cached resource instance. Two keys are equal only if their tokens are
//! equal element-wise.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Separator used by the `Display` form of a key.
pub const DISPLAY_SEPARATOR: char = ':';

/// A single primitive token of a query key.
///
/// Serializes untagged, so text tokens become JSON strings and numeric
/// tokens become JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyToken {
    /// Text token (category names, identifiers, joined lists)
    Text(String),
    /// Numeric token (network ids)
    Number(u64),
}

impl KeyToken {
    /// Returns the token as a str if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KeyToken::Text(s) => Some(s),
            KeyToken::Number(_) => None,
        }
    }

    /// Returns the token as a u64 if it is numeric.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            KeyToken::Number(n) => Some(*n),
            KeyToken::Text(_) => None,
        }
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Text(s) => f.write_str(s),
            KeyToken::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for KeyToken {
    fn from(s: &str) -> Self {
        KeyToken::Text(s.to_string())
    }
}

impl From<String> for KeyToken {
    fn from(s: String) -> Self {
        KeyToken::Text(s)
    }
}

impl From<u64> for KeyToken {
    fn from(n: u64) -> Self {
        KeyToken::Number(n)
    }
}

/// Ordered token sequence that uniquely addresses a cached resource.
///
/// # Examples
///
/// ```
/// use synth_keys::QueryKey;
///
/// let key = QueryKey::new(["rates", "historicalRates"]).with("sBTC").with("1M");
/// assert_eq!(key.to_json().unwrap(), r#"["rates","historicalRates","sBTC","1M"]"#);
/// assert_eq!(key.to_string(), "rates:historicalRates:sBTC:1M");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey(Vec<KeyToken>);

impl QueryKey {
    /// Creates a key from anything that converts into tokens.
    pub fn new<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<KeyToken>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// Creates a key from an existing token vector.
    pub fn from_tokens(tokens: Vec<KeyToken>) -> Self {
        Self(tokens)
    }

    /// Appends a token, consuming and returning the key.
    pub fn with(mut self, token: impl Into<KeyToken>) -> Self {
        self.0.push(token.into());
        self
    }

    /// Returns the first token, which names the key's category.
    pub fn category(&self) -> Option<&KeyToken> {
        self.0.first()
    }

    /// Returns the tokens in order.
    pub fn tokens(&self) -> &[KeyToken] {
        &self.0
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the key has no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `prefix` matches the leading tokens of this key.
    ///
    /// An empty prefix matches every key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Serializes the key as a JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a key from a JSON array.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", DISPLAY_SEPARATOR)?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl From<Vec<KeyToken>> for QueryKey {
    fn from(tokens: Vec<KeyToken>) -> Self {
        Self(tokens)
    }
}
