//! Dashboard access gate.
//!
//! Access is one-way: once granted it is never revoked. A failed grant never
//! fails the calling request; the next progress fetch retries it.

use std::time::Duration;

use crate::store::{bounded, ProgressStore, Trainee};

/// Grant dashboard access when training is complete.
///
/// Returns the trainee's access flag after the attempt. Already-granted
/// trainees are returned as-is without touching the store.
pub async fn ensure_dashboard_access<S>(
    store: &S,
    store_timeout: Duration,
    trainee: &Trainee,
    all_complete: bool,
) -> bool
where
    S: ProgressStore + ?Sized,
{
    if trainee.has_dashboard_access {
        return true;
    }
    if !all_complete {
        return false;
    }

    match bounded(
        store_timeout,
        "grant_dashboard_access",
        store.grant_dashboard_access(trainee.id),
    )
    .await
    {
        Ok(true) => {
            tracing::info!(user_id = trainee.id, "Training complete, dashboard access granted");
            true
        }
        Ok(false) => {
            tracing::debug!(user_id = trainee.id, "Dashboard access was already granted");
            true
        }
        Err(e) => {
            tracing::warn!(
                user_id = trainee.id,
                error = %e,
                "Failed to grant dashboard access, will retry on next fetch"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::InMemoryProgressStore;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn incomplete_training_does_not_grant() {
        let store = InMemoryProgressStore::new(Vec::new());
        let trainee = store.add_trainee(1);

        assert!(!ensure_dashboard_access(&store, TIMEOUT, &trainee, false).await);
        assert_eq!(store.grant_count(), 0);
    }

    #[tokio::test]
    async fn complete_training_grants_once() {
        let store = InMemoryProgressStore::new(Vec::new());
        let trainee = store.add_trainee(1);

        assert!(ensure_dashboard_access(&store, TIMEOUT, &trainee, true).await);
        assert_eq!(store.grant_count(), 1);

        // A stale snapshot still reports no access; the store call is a no-op.
        assert!(ensure_dashboard_access(&store, TIMEOUT, &trainee, true).await);
        assert_eq!(store.grant_count(), 1);
    }

    #[tokio::test]
    async fn granted_access_is_never_revoked() {
        let store = InMemoryProgressStore::new(Vec::new());
        let trainee = Trainee {
            id: 1,
            has_dashboard_access: true,
        };

        assert!(ensure_dashboard_access(&store, TIMEOUT, &trainee, false).await);
    }

    #[tokio::test]
    async fn grant_failure_is_not_fatal() {
        let store = InMemoryProgressStore::new(Vec::new());
        let trainee = store.add_trainee(1);
        store.fail_grants(true);

        assert!(!ensure_dashboard_access(&store, TIMEOUT, &trainee, true).await);
        assert!(!store.trainee(1).unwrap().has_dashboard_access);

        store.fail_grants(false);
        assert!(ensure_dashboard_access(&store, TIMEOUT, &trainee, true).await);
        assert!(store.trainee(1).unwrap().has_dashboard_access);
    }
}
