use crate::{ArenaError, Challenge};
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize)]
pub struct ActiveMatch {
    pub challenge: Challenge,
    pub started_at: DateTime<Utc>,
}

/// Matches currently in flight, keyed by match id.
#[derive(Debug, Clone, Default)]
pub struct MatchRegistry {
    matches: Arc<RwLock<HashMap<String, ActiveMatch>>>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, challenge: Challenge) -> Result<(), ArenaError> {
        let mut matches = self.matches.write().await;

        if matches.contains_key(&challenge.match_id) {
            return Err(ArenaError::DuplicateMatch(challenge.match_id));
        }

        matches.insert(
            challenge.match_id.clone(),
            ActiveMatch {
                challenge,
                started_at: Utc::now(),
            },
        );

        Ok(())
    }

    pub async fn remove(&self, match_id: &str) -> Option<ActiveMatch> {
        self.matches.write().await.remove(match_id)
    }

    pub async fn contains(&self, match_id: &str) -> bool {
        self.matches.read().await.contains_key(match_id)
    }

    /// Oldest first.
    pub async fn list(&self) -> Vec<ActiveMatch> {
        let mut matches: Vec<ActiveMatch> = self.matches.read().await.values().cloned().collect();
        matches.sort_by_key(|active| active.started_at);
        matches
    }

    /// Empties the registry. Callers refund whatever comes back.
    pub async fn cancel_all(&self) -> Vec<ActiveMatch> {
        let drained: Vec<ActiveMatch> = self.matches.write().await.drain().map(|(_, m)| m).collect();

        if !drained.is_empty() {
            info!("cancelled {} active matches", drained.len());
        }

        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(match_id: &str) -> Challenge {
        Challenge::new(match_id, (1001, "hawks_captain", 1), (1002, "rhino_rider", 2), 100)
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates() {
        let registry = MatchRegistry::new();

        registry.register(challenge("a")).await.unwrap();
        assert!(registry.contains("a").await);
        assert!(matches!(
            registry.register(challenge("a")).await,
            Err(ArenaError::DuplicateMatch(id)) if id == "a"
        ));
        assert_eq!(registry.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_and_cancel_all() {
        let registry = MatchRegistry::new();

        for id in ["a", "b", "c"] {
            registry.register(challenge(id)).await.unwrap();
        }

        assert_eq!(registry.remove("b").await.unwrap().challenge.match_id, "b");
        assert!(registry.remove("b").await.is_none());

        let mut cancelled: Vec<String> = registry
            .cancel_all()
            .await
            .into_iter()
            .map(|active| active.challenge.match_id)
            .collect();
        cancelled.sort();

        assert_eq!(cancelled, vec!["a", "c"]);
        assert!(registry.list().await.is_empty());
    }
}
