//! Name-addressable view of every registry leaf.
//!
//! The typed namespace methods are the primary API. The catalog exposes the
//! same leaves as a tagged union ([`Leaf::Constant`] or [`Leaf::Builder`]) so
//! that tooling can enumerate them, resolve them from untyped parameters, and
//! check that no two leaves produce the same key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KeyError, Result};
use crate::key::QueryKey;
use crate::registry::QueryKeys;
use crate::types::{CurrencyKey, LoanId, NetworkId, Period, WalletAddress};

use ParamKind::{List, Number, Text};

/// Kind of a builder parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Text,
    Number,
    List,
}

/// Untyped builder argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Text(String),
    Number(u64),
    List(Vec<String>),
}

impl Param {
    /// Returns the kind of this argument.
    pub fn kind(&self) -> ParamKind {
        match self {
            Param::Text(_) => ParamKind::Text,
            Param::Number(_) => ParamKind::Number,
            Param::List(_) => ParamKind::List,
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Param::Text(s) => Some(s),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<u64> {
        match self {
            Param::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn as_list(&self) -> Option<&[String]> {
        match self {
            Param::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Text(s.to_string())
    }
}

impl From<u64> for Param {
    fn from(n: u64) -> Self {
        Param::Number(n)
    }
}

impl From<Vec<String>> for Param {
    fn from(items: Vec<String>) -> Self {
        Param::List(items)
    }
}

type BuildFn = fn(&QueryKeys, &[Param]) -> Option<QueryKey>;

/// A builder leaf bound to a registry.
#[derive(Clone, Copy)]
pub struct KeyBuilder {
    namespace: &'static str,
    name: &'static str,
    params: &'static [ParamKind],
    build: BuildFn,
    keys: QueryKeys,
}

impl KeyBuilder {
    /// Declared parameter kinds, in call order.
    pub fn params(&self) -> &'static [ParamKind] {
        self.params
    }

    /// Builds the key after checking arity and parameter kinds.
    pub fn call(&self, args: &[Param]) -> Result<QueryKey> {
        let leaf = qualified(self.namespace, self.name);

        if args.len() != self.params.len() {
            return Err(KeyError::arity_mismatch(leaf, self.params.len(), args.len()));
        }
        for (index, (expected, arg)) in self.params.iter().zip(args).enumerate() {
            if arg.kind() != *expected {
                return Err(KeyError::param_kind_mismatch(
                    leaf,
                    index,
                    *expected,
                    arg.kind(),
                ));
            }
        }

        (self.build)(&self.keys, args).ok_or_else(|| KeyError::unresolved(leaf))
    }
}

impl fmt::Debug for KeyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBuilder")
            .field("leaf", &qualified(self.namespace, self.name))
            .field("params", &self.params)
            .finish()
    }
}

/// A constant leaf and the name it is registered under.
#[derive(Debug, Clone)]
pub struct ConstantLeaf {
    namespace: &'static str,
    name: &'static str,
    key: QueryKey,
}

impl ConstantLeaf {
    /// The fixed key.
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Returns the key. Any argument is an arity error.
    pub fn call(&self, args: &[Param]) -> Result<QueryKey> {
        if !args.is_empty() {
            return Err(KeyError::arity_mismatch(
                qualified(self.namespace, self.name),
                0,
                args.len(),
            ));
        }
        Ok(self.key.clone())
    }
}

/// A registry leaf: a constant key or a key builder.
#[derive(Debug, Clone)]
pub enum Leaf {
    Constant(ConstantLeaf),
    Builder(KeyBuilder),
}

impl Leaf {
    /// Resolves the leaf to a key. Constants accept no parameters.
    pub fn resolve(&self, args: &[Param]) -> Result<QueryKey> {
        match self {
            Leaf::Constant(constant) => constant.call(args),
            Leaf::Builder(builder) => builder.call(args),
        }
    }

    /// Returns true for constant leaves.
    pub fn is_constant(&self) -> bool {
        matches!(self, Leaf::Constant(_))
    }
}

/// One entry of the catalog.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub namespace: &'static str,
    pub name: &'static str,
    pub leaf: Leaf,
}

impl CatalogEntry {
    /// `Namespace.Leaf` form of the entry's name.
    pub fn qualified_name(&self) -> String {
        qualified(self.namespace, self.name)
    }
}

fn qualified(namespace: &str, name: &str) -> String {
    format!("{}.{}", namespace, name)
}

enum Shape {
    Constant(fn(&QueryKeys) -> QueryKey),
    Builder(&'static [ParamKind], BuildFn),
}

struct Definition {
    namespace: &'static str,
    name: &'static str,
    shape: Shape,
}

const fn constant(
    namespace: &'static str,
    name: &'static str,
    build: fn(&QueryKeys) -> QueryKey,
) -> Definition {
    Definition {
        namespace,
        name,
        shape: Shape::Constant(build),
    }
}

const fn builder(
    namespace: &'static str,
    name: &'static str,
    params: &'static [ParamKind],
    build: BuildFn,
) -> Definition {
    Definition {
        namespace,
        name,
        shape: Shape::Builder(params, build),
    }
}

fn currency(args: &[Param], i: usize) -> Option<CurrencyKey> {
    args.get(i)?.as_text().map(CurrencyKey::from)
}

fn period(args: &[Param], i: usize) -> Option<Period> {
    args.get(i)?.as_text().map(Period::from)
}

fn wallet(args: &[Param], i: usize) -> Option<WalletAddress> {
    args.get(i)?.as_text().map(WalletAddress::from)
}

fn loan(args: &[Param], i: usize) -> Option<LoanId> {
    args.get(i)?.as_text().map(LoanId::from)
}

fn network(args: &[Param], i: usize) -> Option<NetworkId> {
    args.get(i)?.as_number().map(NetworkId::from)
}

fn list(args: &[Param], i: usize) -> Option<&[String]> {
    args.get(i)?.as_list()
}

fn definitions() -> Vec<Definition> {
    vec![
        builder("Rates", "HistoricalVolume", &[Text], |k, a| {
            Some(k.rates().historical_volume(&period(a, 0)?))
        }),
        builder("Rates", "HistoricalRates", &[Text, Text], |k, a| {
            Some(k.rates().historical_rates(&currency(a, 0)?, &period(a, 1)?))
        }),
        builder("Rates", "MarketCap", &[Text], |k, a| {
            Some(k.rates().market_cap(&currency(a, 0)?))
        }),
        constant("Rates", "ExchangeRates", |k| k.rates().exchange_rates()),
        builder("Rates", "SynthExchanges", &[Text], |k, a| {
            Some(k.rates().synth_exchanges(&period(a, 0)?))
        }),
        constant("Network", "EthGasPrice", |k| k.network().eth_gas_price()),
        builder("WalletBalances", "Synths", &[Text, Number], |k, a| {
            Some(k.wallet_balances().synths(&wallet(a, 0)?, network(a, 1)?))
        }),
        builder("WalletBalances", "ETH", &[Text, Number], |k, a| {
            Some(k.wallet_balances().eth(&wallet(a, 0)?, network(a, 1)?))
        }),
        builder("WalletBalances", "Tokens", &[Text, Number], |k, a| {
            Some(k.wallet_balances().tokens(&wallet(a, 0)?, network(a, 1)?))
        }),
        constant("Synths", "FrozenSynths", |k| k.synths().frozen_synths()),
        builder("Synths", "Suspension", &[Text], |k, a| {
            Some(k.synths().suspension(&currency(a, 0)?))
        }),
        builder("Synths", "FeeReclaimPeriod", &[Text], |k, a| {
            Some(k.synths().fee_reclaim_period(&currency(a, 0)?))
        }),
        builder("Synths", "ExchangeFeeRate", &[Text, Text], |k, a| {
            Some(
                k.synths()
                    .exchange_fee_rate(&currency(a, 0)?, &currency(a, 1)?),
            )
        }),
        builder("Collateral", "ShortHistory", &[Text], |k, a| {
            Some(k.collateral().short_history(&wallet(a, 0)?))
        }),
        constant("Collateral", "ShortContractInfo", |k| {
            k.collateral().short_contract_info()
        }),
        builder("Collateral", "ShortPosition", &[Text], |k, a| {
            Some(k.collateral().short_position(&loan(a, 0)?))
        }),
        builder("Collateral", "ShortPositionPnL", &[Text], |k, a| {
            Some(k.collateral().short_position_pnl(&loan(a, 0)?))
        }),
        builder("Collateral", "ShortRewards", &[Text], |k, a| {
            Some(k.collateral().short_rewards(&currency(a, 0)?))
        }),
        builder("Collateral", "ShortRate", &[Text], |k, a| {
            Some(k.collateral().short_rate(&currency(a, 0)?))
        }),
        builder("Collateral", "ShortStats", &[Text], |k, a| {
            Some(k.collateral().short_stats(&currency(a, 0)?))
        }),
        constant("Trades", "AllTrades", |k| k.trades().all_trades()),
        builder("Trades", "WalletTrades", &[Text], |k, a| {
            Some(k.trades().wallet_trades(&wallet(a, 0)?))
        }),
        constant("SystemStatus", "IsUpgrading", |k| {
            k.system_status().is_upgrading()
        }),
        builder("Convert", "Quote1Inch", &[Text, Text, Text, Number], |k, a| {
            Some(k.convert().quote_1inch(
                &currency(a, 0)?,
                &currency(a, 1)?,
                a.get(2)?.as_text()?,
                network(a, 3)?,
            ))
        }),
        constant("Convert", "ApproveAddress1Inch", |k| {
            k.convert().approve_address_1inch()
        }),
        constant("TokenLists", "Synthetix", |k| k.token_lists().synthetix()),
        constant("TokenLists", "Zapper", |k| k.token_lists().zapper()),
        builder("CMC", "Quotes", &[List], |k, a| {
            let currencies: Vec<CurrencyKey> =
                list(a, 0)?.iter().map(|s| CurrencyKey::new(s.as_str())).collect();
            Some(k.cmc().quotes(&currencies))
        }),
        constant("CoinGecko", "CoinList", |k| k.coin_gecko().coin_list()),
        builder("CoinGecko", "TokenPrices", &[List], |k, a| {
            Some(k.coin_gecko().token_prices(list(a, 0)?))
        }),
        builder("CoinGecko", "Prices", &[List], |k, a| {
            Some(k.coin_gecko().prices(list(a, 0)?))
        }),
    ]
}

impl QueryKeys {
    /// Returns every leaf of the registry, grouped by namespace in
    /// declaration order.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        definitions()
            .into_iter()
            .map(|def| self.bind(def))
            .collect()
    }

    /// Looks up one leaf by namespace and name.
    pub fn leaf(&self, namespace: &str, name: &str) -> Result<Leaf> {
        definitions()
            .into_iter()
            .find(|def| def.namespace == namespace && def.name == name)
            .map(|def| self.bind(def).leaf)
            .ok_or_else(|| KeyError::unknown_leaf(namespace, name))
    }

    fn bind(&self, def: Definition) -> CatalogEntry {
        let leaf = match def.shape {
            Shape::Constant(build) => Leaf::Constant(ConstantLeaf {
                namespace: def.namespace,
                name: def.name,
                key: build(self),
            }),
            Shape::Builder(params, build) => Leaf::Builder(KeyBuilder {
                namespace: def.namespace,
                name: def.name,
                params,
                build,
                keys: *self,
            }),
        };

        CatalogEntry {
            namespace: def.namespace,
            name: def.name,
            leaf,
        }
    }
}
