//! The incremental pagination engine.
//!
//! Walks a cursor-paginated listing newest-first and collects only records
//! the caller does not already know about.

use serde::de::DeserializeOwned;

use crate::client::{LedgerClient, Page};
use crate::error::ClientError;

use super::LedgerRecord;

/// Parent resource scope for a nested listing, e.g. transactions under one
/// account.
#[derive(Debug, Clone, Copy)]
pub struct ListingScope<'a> {
    pub collection: &'a str,
    pub id: &'a str,
}

pub(crate) fn listing_path(resource: &str, scope: Option<ListingScope<'_>>) -> String {
    match scope {
        Some(scope) => format!("/v2/{}/{}/{}", scope.collection, scope.id, resource),
        None => format!("/v2/{resource}"),
    }
}

/// Fetch every record of a paginated listing that is absent from `known`.
///
/// The cursor is followed only while every record on the current page is
/// new: pages arrive newest-first, so the first already-known record means
/// everything older is known too and the remaining pages are skipped. The
/// walk also ends whenever a page carries no cursor.
///
/// Known-ness is checked by a linear scan over `known`; dataset sizes here
/// are small enough that an index would not pay for itself.
pub async fn fetch_new_records<T, K>(
    client: &LedgerClient,
    resource: &str,
    scope: Option<ListingScope<'_>>,
    known: &[K],
) -> Result<Vec<T>, ClientError>
where
    T: DeserializeOwned + LedgerRecord,
    K: LedgerRecord,
{
    let mut found = Vec::new();
    let mut next = Some(listing_path(resource, scope));

    while let Some(path) = next {
        let page: Page<T> = client.get(&path).await?;
        let page_len = page.data.len();

        let mut fresh: Vec<T> = page
            .data
            .into_iter()
            .filter(|record| !known.iter().any(|k| k.record_id() == record.record_id()))
            .collect();
        let all_new = fresh.len() == page_len;
        found.append(&mut fresh);

        next = if all_new {
            page.pagination.and_then(|p| p.next_uri)
        } else {
            None
        };
    }

    Ok(found)
}
