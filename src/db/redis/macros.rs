/// Read-through caching over [`Cache`](crate::db::Cache).
///
/// Returns the cached value for `$key` when present. Otherwise awaits
/// `$block`, queues the result for a background write with `$ttl` seconds to
/// live, and returns it. Errors from the cache read or the block are
/// propagated with `?`, so the macro must be used inside a function returning
/// `AppResult`.
///
/// # Example
/// ```rust,ignore
/// let embedding: Vec<f32> = cached!(self.cache, CacheKey::ImageEmbedding(url.to_string()), TTL, async {
///     self.request_embedding(url).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await? {
            tracing::debug!(key = %$key, "Cache hit");
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
