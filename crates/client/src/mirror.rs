//! Cache-backed mirror of the remote bookmark store.
//!
//! Read-through access to the four mirrored resources. The interactive
//! path reads with Trust or Check and only touches the network when a
//! resource has no usable cache at all; the background path re-fetches
//! everything with Force. Fetch failures degrade to whatever is available
//! (stale, partial or empty), never to a hard error.

use serde::Serialize;
use serde::de::DeserializeOwned;

use droplet_core::cache::{FileCache, ReadPolicy};
use droplet_core::models::{Bookmark, Collection, ResourceKind, Tag};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::pages::fetch_all;

pub struct Mirror {
    cache: FileCache,
    client: ApiClient,
    page_size: usize,
}

impl Mirror {
    pub fn new(cache: FileCache, client: ApiClient, page_size: usize) -> Self {
        Self { cache, client, page_size }
    }

    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// The full bookmark set. A cache miss aggregates every remote page;
    /// only a complete aggregation is persisted, so a transport failure
    /// mid-pagination never overwrites a good cache with a partial one.
    pub async fn bookmarks(&self, policy: ReadPolicy) -> Vec<Bookmark> {
        if let Some(items) = self.cache.read(ResourceKind::Bookmarks, policy) {
            return items;
        }

        let aggregation = fetch_all(&self.client, self.page_size).await;
        if aggregation.complete {
            self.persist(ResourceKind::Bookmarks, &aggregation.items);
        }
        aggregation.items
    }

    pub async fn collections_top(&self, policy: ReadPolicy) -> Vec<Collection> {
        self.cached_list(ResourceKind::CollectionsTop, policy, self.client.collections_top()).await
    }

    pub async fn collections_sub(&self, policy: ReadPolicy) -> Vec<Collection> {
        self.cached_list(ResourceKind::CollectionsSub, policy, self.client.collections_sub()).await
    }

    pub async fn tags(&self, policy: ReadPolicy) -> Vec<Tag> {
        self.cached_list(ResourceKind::Tags, policy, self.client.tags()).await
    }

    /// Re-fetch all four resources unconditionally. The remote interface
    /// has no "changed since" query, so refresh is always a full replace.
    pub async fn refresh_all(&self) {
        self.bookmarks(ReadPolicy::Force).await;
        self.collections_top(ReadPolicy::Force).await;
        self.collections_sub(ReadPolicy::Force).await;
        self.tags(ReadPolicy::Force).await;
    }

    async fn cached_list<T>(
        &self,
        kind: ResourceKind,
        policy: ReadPolicy,
        fetch: impl Future<Output = Result<Vec<T>, ApiError>>,
    ) -> Vec<T>
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(items) = self.cache.read(kind, policy) {
            return items;
        }

        match fetch.await {
            Ok(items) => {
                self.persist(kind, &items);
                items
            }
            Err(err) => {
                tracing::warn!(kind = %kind, error = %err, "fetch failed, serving empty list");
                Vec::new()
            }
        }
    }

    fn persist<T: Serialize>(&self, kind: ResourceKind, items: &[T]) {
        if let Err(err) = self.cache.write(kind, items) {
            tracing::warn!(kind = %kind, error = %err, "failed to persist cache");
        }
    }
}
