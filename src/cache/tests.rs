use std::time::Duration;

use super::{CacheKey, QueryKind, ResolverCache};

fn key(name: &str) -> CacheKey {
    CacheKey::new(QueryKind::Mx, name)
}

#[test]
fn key_renders_kind_and_normalized_name() {
    let key = CacheKey::new(QueryKind::Txt, "_dmarc.Example.COM.");
    assert_eq!(key.to_string(), "TXT:_dmarc.example.com");
    assert_eq!(CacheKey::new(QueryKind::Aaaa, "a.b").to_string(), "AAAA:a.b");
}

#[tokio::test(start_paused = true)]
async fn entry_is_served_until_ttl_elapses() {
    let cache = ResolverCache::new(Duration::from_secs(600), 10);
    cache.set(key("example.com"), 7u32, Duration::from_millis(1_000));

    tokio::time::advance(Duration::from_millis(999)).await;
    assert_eq!(cache.get(&key("example.com")), Some(7));

    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(cache.get(&key("example.com")), None);
    assert!(cache.is_empty(), "expired entry should be evicted lazily");
}

#[tokio::test(start_paused = true)]
async fn insert_uses_default_ttl() {
    let cache = ResolverCache::new(Duration::from_millis(50), 10);
    cache.insert(key("example.com"), "v");
    tokio::time::advance(Duration::from_millis(49)).await;
    assert_eq!(cache.get(&key("example.com")), Some("v"));
    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(cache.get(&key("example.com")), None);
}

#[test]
fn third_insert_evicts_least_recently_touched() {
    let cache = ResolverCache::new(Duration::from_secs(60), 2);
    cache.insert(key("a.test"), 1);
    cache.insert(key("b.test"), 2);
    cache.insert(key("c.test"), 3);

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(&key("a.test")), None);
    assert_eq!(cache.get(&key("b.test")), Some(2));
    assert_eq!(cache.get(&key("c.test")), Some(3));
}

#[test]
fn get_refreshes_recency() {
    let cache = ResolverCache::new(Duration::from_secs(60), 2);
    cache.insert(key("a.test"), 1);
    cache.insert(key("b.test"), 2);
    assert_eq!(cache.get(&key("a.test")), Some(1));
    cache.insert(key("c.test"), 3);

    assert_eq!(cache.get(&key("a.test")), Some(1));
    assert_eq!(cache.get(&key("b.test")), None);
}

#[test]
fn overwrite_keeps_single_entry_and_refreshes_position() {
    let cache = ResolverCache::new(Duration::from_secs(60), 2);
    cache.insert(key("a.test"), 1);
    cache.insert(key("b.test"), 2);
    cache.insert(key("a.test"), 10);
    assert_eq!(cache.len(), 2);

    cache.insert(key("c.test"), 3);
    assert_eq!(cache.get(&key("a.test")), Some(10));
    assert_eq!(cache.get(&key("b.test")), None);
}

#[test]
fn kinds_do_not_collide() {
    let cache = ResolverCache::new(Duration::from_secs(60), 10);
    cache.insert(CacheKey::new(QueryKind::A, "example.com"), "a");
    cache.insert(CacheKey::new(QueryKind::Aaaa, "example.com"), "aaaa");
    assert_eq!(
        cache.get(&CacheKey::new(QueryKind::A, "EXAMPLE.com")),
        Some("a")
    );
    assert_eq!(
        cache.get(&CacheKey::new(QueryKind::Aaaa, "example.com")),
        Some("aaaa")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_respect_capacity() {
    let cache = std::sync::Arc::new(ResolverCache::new(Duration::from_secs(60), 8));
    let handles: Vec<_> = (0..64)
        .map(|i| {
            let cache = std::sync::Arc::clone(&cache);
            tokio::spawn(async move {
                cache.insert(key(&format!("host{i}.test")), i);
                cache.get(&key(&format!("host{}.test", i / 2)));
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(cache.len(), 8);
}
