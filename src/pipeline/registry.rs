use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::dns::DnsCache;
use crate::ratelimit::RateLimiter;

use super::options::CacheOptions;

/// Long-lived shared state handed to a [`Validator`](super::Validator): one
/// DNS cache per cache sizing and one SMTP rate limiter per per-minute limit.
/// Callers asking with the same configuration get the same instance.
#[derive(Default)]
pub struct ResourceRegistry {
    caches: Mutex<HashMap<CacheOptions, Arc<DnsCache>>>,
    limiters: Mutex<HashMap<usize, Arc<RateLimiter>>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dns_cache(&self, options: &CacheOptions) -> Arc<DnsCache> {
        let mut caches = self.caches.lock();
        Arc::clone(caches.entry(*options).or_insert_with(|| {
            debug!(
                ttl_ms = options.dns_ttl_ms,
                max_entries = options.max_entries,
                "new dns cache"
            );
            Arc::new(DnsCache::new(options.ttl(), options.max_entries))
        }))
    }

    pub fn limiter(&self, per_minute: usize) -> Arc<RateLimiter> {
        let mut limiters = self.limiters.lock();
        Arc::clone(limiters.entry(per_minute).or_insert_with(|| {
            debug!(per_minute, "new smtp rate limiter");
            Arc::new(RateLimiter::per_minute(per_minute))
        }))
    }

    pub fn cache_count(&self) -> usize {
        self.caches.lock().len()
    }

    pub fn limiter_count(&self) -> usize {
        self.limiters.lock().len()
    }
}

impl fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("caches", &self.cache_count())
            .field("limiters", &self.limiter_count())
            .finish()
    }
}
