//! Batched actor-id resolution against the member directory.
//!
//! Listings collect every actor id they are about to render, resolve them
//! with a single upstream call, then look profiles up locally while building
//! the response. Ids the directory does not know render as null rather than
//! failing the listing.

use crate::auth_api::{MemberLookup, MemberProfile};
use crate::error::ApiError;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Default)]
pub struct MemberDirectory {
    members: HashMap<i64, MemberProfile>,
}

impl MemberDirectory {
    /// Resolve the distinct ids in `ids` with at most one upstream call.
    /// An empty id set resolves locally without touching the network.
    pub async fn resolve(
        lookup: &dyn MemberLookup,
        ids: impl IntoIterator<Item = Option<i64>>,
    ) -> Result<Self, ApiError> {
        let distinct: BTreeSet<i64> = ids.into_iter().flatten().collect();
        if distinct.is_empty() {
            return Ok(Self::default());
        }

        let wanted: Vec<i64> = distinct.into_iter().collect();
        let members = lookup
            .member_batch(&wanted)
            .await?
            .into_iter()
            .map(|m| (m.user_id, m))
            .collect();

        Ok(Self { members })
    }

    /// Profile JSON for an actor column, or null when the column is unset
    /// or the directory has no profile for the id.
    pub fn actor(&self, id: Option<i64>) -> Value {
        match id.and_then(|id| self.members.get(&id)) {
            Some(member) => match serde_json::to_value(member) {
                Ok(value) => value,
                Err(_) => Value::Null,
            },
            None => Value::Null,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticLookup {
        calls: AtomicUsize,
        members: Vec<MemberProfile>,
    }

    #[async_trait]
    impl MemberLookup for StaticLookup {
        async fn member_batch(&self, _ids: &[i64]) -> Result<Vec<MemberProfile>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.members.clone())
        }
    }

    #[actix_rt::test]
    async fn empty_id_set_skips_the_upstream_call() {
        let lookup = StaticLookup {
            calls: AtomicUsize::new(0),
            members: vec![],
        };

        let directory = MemberDirectory::resolve(&lookup, [None, None]).await.unwrap();
        assert!(directory.is_empty());
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_rt::test]
    async fn unknown_actor_renders_null() {
        let lookup = StaticLookup {
            calls: AtomicUsize::new(0),
            members: vec![],
        };

        let directory = MemberDirectory::resolve(&lookup, [Some(42)]).await.unwrap();
        assert_eq!(directory.actor(Some(42)), Value::Null);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }
}
