//! End-to-end flows: build keys with the registry, cache results, invalidate.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use common::Balances;
use synth_cache::QueryCache;
use synth_keys::{CurrencyKey, NetworkId, QueryKey, QueryKeys, WalletAddress};

async fn fetch_balances(
    cache: &QueryCache<Balances>,
    keys: &QueryKeys,
    wallet: &WalletAddress,
    calls: &Arc<AtomicU32>,
) -> Arc<Balances> {
    let calls = Arc::clone(calls);
    let owner = wallet.to_string();

    cache
        .get_or_fetch(
            keys.wallet_balances().synths(wallet, NetworkId::MAINNET),
            || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(Balances {
                    wallet: owner,
                    total_usd: 1_000,
                })
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn wallet_balances_refetch_after_prefix_invalidation() {
    let keys = QueryKeys::new();
    let cache = common::cache::<Balances>();
    let wallet = WalletAddress::new("0xABC");
    let calls = Arc::new(AtomicU32::new(0));

    let first = fetch_balances(&cache, &keys, &wallet, &calls).await;
    let second = fetch_balances(&cache, &keys, &wallet, &calls).await;

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let result = cache
        .invalidate_prefix(&QueryKey::new(["walletBalances"]))
        .await;
    assert_eq!(result.count, 1);

    fetch_balances(&cache, &keys, &wallet, &calls).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn malformed_address_is_a_miss_not_an_error() {
    let keys = QueryKeys::new();
    let cache = common::cache::<Balances>();

    let key = keys
        .wallet_balances()
        .synths(&WalletAddress::new("not-an-address"), NetworkId::MAINNET);

    assert!(cache.get(&key).await.is_none());
    assert_eq!(cache.metrics().misses(), 1);
}

#[tokio::test]
async fn different_networks_are_separate_entries() {
    let keys = QueryKeys::new();
    let cache = common::cache::<u64>();
    let wallet = WalletAddress::new("0xABC");

    cache
        .insert(keys.wallet_balances().eth(&wallet, NetworkId::MAINNET), 1)
        .await;

    assert!(
        cache
            .get(&keys.wallet_balances().eth(&wallet, NetworkId::OPTIMISM))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn list_keys_are_order_sensitive_in_cache() {
    let keys = QueryKeys::new();
    let cache = common::cache::<u64>();

    cache
        .insert(
            keys.cmc()
                .quotes(&[CurrencyKey::new("sBTC"), CurrencyKey::new("sETH")]),
            1,
        )
        .await;

    let reordered = keys
        .cmc()
        .quotes(&[CurrencyKey::new("sETH"), CurrencyKey::new("sBTC")]);
    assert!(cache.get(&reordered).await.is_none());
}

#[tokio::test]
async fn decoded_keys_address_the_same_entry() {
    let keys = QueryKeys::new();
    let cache = common::cache::<u64>();

    cache.insert(keys.coin_gecko().token_prices::<&str>(&[]), 7).await;

    let decoded = QueryKey::from_json(r#"["cg","prices",""]"#).unwrap();
    assert_eq!(cache.get(&decoded).await.as_deref(), Some(&7));
}

#[tokio::test]
async fn invalidate_all_clears_everything() {
    let keys = QueryKeys::new();
    let cache = common::cache::<u64>();

    cache.insert(keys.trades().all_trades(), 1).await;
    cache.insert(keys.token_lists().synthetix(), 2).await;
    cache.run_pending_tasks().await;
    assert_eq!(cache.entry_count(), 2);

    cache.invalidate_all();
    cache.run_pending_tasks().await;

    assert_eq!(cache.entry_count(), 0);
    assert!(cache.get(&keys.trades().all_trades()).await.is_none());
}
