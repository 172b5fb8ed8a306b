//! Key builders grouped by namespace.
//!
//! Every namespace owns its leading tokens; no two namespaces emit keys that
//! start with the same token. Constant leaves are exposed as methods that
//! return the same key on every call.

use crate::key::QueryKey;
use crate::registry::QueryKeys;
use crate::types::{CurrencyKey, LoanId, NetworkId, Period, WalletAddress};

/// Historical and current rate data.
#[derive(Debug, Clone, Copy)]
pub struct Rates;

impl Rates {
    /// Traded volume over `period`.
    pub fn historical_volume(&self, period: &Period) -> QueryKey {
        QueryKey::new(["rates", "historicalVolume", period.as_str()])
    }

    /// Rate history of `currency` over `period`.
    pub fn historical_rates(&self, currency: &CurrencyKey, period: &Period) -> QueryKey {
        QueryKey::new([
            "rates",
            "historicalRates",
            currency.as_str(),
            period.as_str(),
        ])
    }

    /// Market capitalization. Lives under its own `marketCap` category.
    pub fn market_cap(&self, currency: &CurrencyKey) -> QueryKey {
        QueryKey::new(["marketCap", currency.as_str()])
    }

    /// Current rates for every synth.
    pub fn exchange_rates(&self) -> QueryKey {
        QueryKey::new(["rates", "exchangeRates"])
    }

    /// Synth exchanges over `period`.
    pub fn synth_exchanges(&self, period: &Period) -> QueryKey {
        QueryKey::new(["rates", "synthExchanges", period.as_str()])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Network;

impl Network {
    /// Current gas price.
    pub fn eth_gas_price(&self) -> QueryKey {
        QueryKey::new(["network", "ethGasPrice"])
    }
}

/// Per-wallet balances. The network id is appended as a numeric token.
#[derive(Debug, Clone, Copy)]
pub struct WalletBalances;

impl WalletBalances {
    /// Synth balances of `wallet` on `network`.
    pub fn synths(&self, wallet: &WalletAddress, network: NetworkId) -> QueryKey {
        Self::balance("synths", wallet, network)
    }

    /// ETH balance of `wallet` on `network`.
    pub fn eth(&self, wallet: &WalletAddress, network: NetworkId) -> QueryKey {
        Self::balance("ETH", wallet, network)
    }

    /// ERC-20 token balances of `wallet` on `network`.
    pub fn tokens(&self, wallet: &WalletAddress, network: NetworkId) -> QueryKey {
        Self::balance("tokens", wallet, network)
    }

    fn balance(kind: &str, wallet: &WalletAddress, network: NetworkId) -> QueryKey {
        QueryKey::new(["walletBalances", kind, wallet.as_str()]).with(network.get())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Synths;

impl Synths {
    /// Synths currently frozen.
    pub fn frozen_synths(&self) -> QueryKey {
        QueryKey::new(["synths", "frozenSynths"])
    }

    /// Suspension status of `currency`.
    pub fn suspension(&self, currency: &CurrencyKey) -> QueryKey {
        QueryKey::new(["synths", "suspension", currency.as_str()])
    }

    /// Fee reclaim window for `currency`.
    pub fn fee_reclaim_period(&self, currency: &CurrencyKey) -> QueryKey {
        QueryKey::new(["synths", "feeReclaimPeriod", currency.as_str()])
    }

    /// Fee rate for exchanging `quote` into `base`. Direction matters.
    pub fn exchange_fee_rate(&self, quote: &CurrencyKey, base: &CurrencyKey) -> QueryKey {
        QueryKey::new([
            "synths",
            "exchangeFeeRate",
            quote.as_str(),
            base.as_str(),
        ])
    }
}

/// Collateralized short positions.
#[derive(Debug, Clone, Copy)]
pub struct Collateral;

impl Collateral {
    /// Short history of `wallet`.
    pub fn short_history(&self, wallet: &WalletAddress) -> QueryKey {
        QueryKey::new(["collateral", "short", "history", wallet.as_str()])
    }

    /// Short collateral contract parameters.
    pub fn short_contract_info(&self) -> QueryKey {
        QueryKey::new(["collateral", "short", "contractInfo"])
    }

    /// Short position for `loan`.
    pub fn short_position(&self, loan: &LoanId) -> QueryKey {
        QueryKey::new(["collateral", "short", "position", loan.as_str()])
    }

    /// Profit and loss of the short position for `loan`.
    pub fn short_position_pnl(&self, loan: &LoanId) -> QueryKey {
        QueryKey::new(["collateral", "short", "position", "pnl", loan.as_str()])
    }

    /// Short rewards for `currency`.
    pub fn short_rewards(&self, currency: &CurrencyKey) -> QueryKey {
        QueryKey::new(["collateral", "short", "rewards", currency.as_str()])
    }

    /// Borrow rate for shorting `currency`.
    pub fn short_rate(&self, currency: &CurrencyKey) -> QueryKey {
        QueryKey::new(["collateral", "short", "rate", currency.as_str()])
    }

    /// Aggregate short stats for `currency`.
    pub fn short_stats(&self, currency: &CurrencyKey) -> QueryKey {
        QueryKey::new(["collateral", "short", "stats", currency.as_str()])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Trades;

impl Trades {
    /// Every recent trade.
    pub fn all_trades(&self) -> QueryKey {
        QueryKey::new(["trades", "allTrades"])
    }

    /// Trades made by `wallet`.
    pub fn wallet_trades(&self, wallet: &WalletAddress) -> QueryKey {
        QueryKey::new(["trades", "walletTrades", wallet.as_str()])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SystemStatus;

impl SystemStatus {
    /// Whether the system is being upgraded.
    pub fn is_upgrading(&self) -> QueryKey {
        QueryKey::new(["systemStatus", "isUpgrading"])
    }
}

/// 1inch conversion quotes.
#[derive(Debug, Clone, Copy)]
pub struct Convert;

impl Convert {
    /// Quote for converting `amount` of `quote` into `base`.
    ///
    /// `amount` is a decimal string and is kept verbatim, so `"1"` and
    /// `"1.0"` address different entries.
    pub fn quote_1inch(
        &self,
        quote: &CurrencyKey,
        base: &CurrencyKey,
        amount: &str,
        network: NetworkId,
    ) -> QueryKey {
        QueryKey::new(["convert", "1inch", quote.as_str(), base.as_str(), amount])
            .with(network.get())
    }

    /// Address the 1inch router asks to approve.
    pub fn approve_address_1inch(&self) -> QueryKey {
        QueryKey::new(["convert", "1inch", "approve", "address"])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TokenLists;

impl TokenLists {
    /// The Synthetix token list.
    pub fn synthetix(&self) -> QueryKey {
        QueryKey::new(["tokenLists", "synthetix"])
    }

    /// The Zapper token list.
    pub fn zapper(&self) -> QueryKey {
        QueryKey::new(["tokenLists", "zapper"])
    }
}

/// CoinMarketCap quotes. List parameters are joined with the registry delimiter.
#[derive(Debug, Clone, Copy)]
pub struct CoinMarketCap<'a> {
    keys: &'a QueryKeys,
}

impl<'a> CoinMarketCap<'a> {
    pub(crate) fn new(keys: &'a QueryKeys) -> Self {
        Self { keys }
    }

    /// Quotes for `currencies`, in the given order.
    pub fn quotes(&self, currencies: &[CurrencyKey]) -> QueryKey {
        let ids: Vec<&str> = currencies.iter().map(CurrencyKey::as_str).collect();
        QueryKey::new(["cmc", "quotes"]).with(self.keys.join_list("CMC.Quotes", &ids))
    }
}

/// CoinGecko listings and prices.
#[derive(Debug, Clone, Copy)]
pub struct CoinGecko<'a> {
    keys: &'a QueryKeys,
}

impl<'a> CoinGecko<'a> {
    pub(crate) fn new(keys: &'a QueryKeys) -> Self {
        Self { keys }
    }

    /// Every coin CoinGecko lists.
    pub fn coin_list(&self) -> QueryKey {
        QueryKey::new(["cg", "coinList"])
    }

    /// Prices by token contract address.
    pub fn token_prices<S: AsRef<str>>(&self, token_addresses: &[S]) -> QueryKey {
        QueryKey::new(["cg", "prices"])
            .with(self.keys.join_list("CoinGecko.TokenPrices", token_addresses))
    }

    /// Prices by CoinGecko coin id.
    pub fn prices<S: AsRef<str>>(&self, price_ids: &[S]) -> QueryKey {
        QueryKey::new(["cg", "priceIds"]).with(self.keys.join_list("CoinGecko.Prices", price_ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> QueryKeys {
        QueryKeys::new()
    }

    #[test]
    fn test_historical_rates_shape() {
        let key = keys()
            .rates()
            .historical_rates(&"sBTC".into(), &"1M".into());

        assert_eq!(key, QueryKey::new(["rates", "historicalRates", "sBTC", "1M"]));
    }

    #[test]
    fn test_wallet_balances_numeric_network() {
        let key = keys()
            .wallet_balances()
            .synths(&"0xABC".into(), NetworkId::MAINNET);

        assert_eq!(
            key,
            QueryKey::new(["walletBalances", "synths", "0xABC"]).with(1u64)
        );
    }

    #[test]
    fn test_eth_balance_category_token() {
        let key = keys().wallet_balances().eth(&"0xABC".into(), NetworkId::KOVAN);
        assert_eq!(key.to_string(), "walletBalances:ETH:0xABC:42");
    }

    #[test]
    fn test_exchange_fee_rate_is_directional() {
        let synths = keys().synths();
        let forward = synths.exchange_fee_rate(&"sUSD".into(), &"sBTC".into());
        let reverse = synths.exchange_fee_rate(&"sBTC".into(), &"sUSD".into());

        assert_ne!(forward, reverse);
    }

    #[test]
    fn test_short_position_and_pnl_differ() {
        let collateral = keys().collateral();
        let position = collateral.short_position(&"7".into());
        let pnl = collateral.short_position_pnl(&"7".into());

        assert_ne!(position, pnl);
        assert_eq!(pnl.len(), 5);
    }

    #[test]
    fn test_quote_1inch_shape() {
        let key = keys().convert().quote_1inch(
            &"sUSD".into(),
            &"ETH".into(),
            "100.5",
            NetworkId::MAINNET,
        );

        assert_eq!(
            key.to_json().unwrap(),
            r#"["convert","1inch","sUSD","ETH","100.5",1]"#
        );
    }

    #[test]
    fn test_cmc_quotes_join() {
        let key = keys()
            .cmc()
            .quotes(&[CurrencyKey::new("sBTC"), CurrencyKey::new("sETH")]);

        assert_eq!(key, QueryKey::new(["cmc", "quotes", "sBTC|sETH"]));
    }

    #[test]
    fn test_custom_delimiter_is_used() {
        let keys = QueryKeys::builder().list_delimiter(',').build().unwrap();
        let key = keys.coin_gecko().prices(&["bitcoin", "ethereum"]);

        assert_eq!(key, QueryKey::new(["cg", "priceIds", "bitcoin,ethereum"]));
    }

    #[test]
    fn test_token_prices_and_prices_do_not_collide() {
        let keys = keys();
        let cg = keys.coin_gecko();
        assert_ne!(cg.token_prices(&["0x1"]), cg.prices(&["0x1"]));
    }
}
