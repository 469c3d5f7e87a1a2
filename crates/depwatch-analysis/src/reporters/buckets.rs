//! Message buckets: records grouped by exact message, deduplicated by call site.

use depwatch_core::types::{Deprecation, MethodRef};
use rustc_hash::FxHashMap;

/// Label for records whose test method could not be resolved.
pub const UNKNOWN_CALL_SITE: &str = "(unknown)";

/// One distinct call site inside a bucket.
#[derive(Debug, Clone)]
pub struct CallSite<'a> {
    /// First record seen for this call site.
    pub representative: &'a Deprecation,
    /// Occurrences from this call site.
    pub count: usize,
}

impl CallSite<'_> {
    pub fn method(&self) -> Option<&MethodRef> {
        self.representative.method()
    }

    /// `Class::method`, or `(unknown)`.
    pub fn label(&self) -> String {
        self.representative
            .method_full_name()
            .unwrap_or_else(|| UNKNOWN_CALL_SITE.to_string())
    }
}

/// All occurrences of one message.
#[derive(Debug, Clone)]
pub struct MessageBucket<'a> {
    pub message: &'a str,
    /// Total occurrences, repeated call sites included.
    pub count: usize,
    /// Distinct call sites in discovery order.
    pub call_sites: Vec<CallSite<'a>>,
}

type SiteKey<'a> = Option<(&'a str, &'a str)>;

/// Group records by message, ordered by descending occurrence count.
/// Equal counts keep discovery order.
pub fn bucket_by_message<'a, I>(records: I) -> Vec<MessageBucket<'a>>
where
    I: IntoIterator<Item = &'a Deprecation>,
{
    let mut buckets: Vec<MessageBucket<'a>> = Vec::new();
    let mut by_message: FxHashMap<&'a str, usize> = FxHashMap::default();
    let mut by_site: Vec<FxHashMap<SiteKey<'a>, usize>> = Vec::new();

    for record in records {
        let idx = *by_message.entry(record.message()).or_insert_with(|| {
            buckets.push(MessageBucket {
                message: record.message(),
                count: 0,
                call_sites: Vec::new(),
            });
            by_site.push(FxHashMap::default());
            buckets.len() - 1
        });

        let bucket = &mut buckets[idx];
        bucket.count += 1;

        let key = record.method().map(MethodRef::call_site_key);
        match by_site[idx].get(&key) {
            Some(&site) => bucket.call_sites[site].count += 1,
            None => {
                by_site[idx].insert(key, bucket.call_sites.len());
                bucket.call_sites.push(CallSite {
                    representative: record,
                    count: 1,
                });
            }
        }
    }

    // Vec::sort_by is stable.
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}
