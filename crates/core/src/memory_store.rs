//! In-process [`ProgressStore`] used by tests and local tooling.
//!
//! The whole state sits behind one mutex, so every call is atomic, which is
//! the same guarantee the PostgreSQL upsert gives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::CoreError;
use crate::store::{ProgressRecord, ProgressStore, Trainee, Video};
use crate::types::DbId;

#[derive(Default)]
struct State {
    catalog: Vec<Video>,
    trainees: HashMap<DbId, Trainee>,
    records: HashMap<(DbId, DbId), ProgressRecord>,
    grant_count: usize,
    fail_grants: bool,
    unavailable: bool,
    latency: Option<Duration>,
}

/// A cloneable in-memory store. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryProgressStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryProgressStore {
    pub fn new(catalog: Vec<Video>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                catalog,
                ..State::default()
            })),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, CoreError> {
        self.state
            .lock()
            .map_err(|_| CoreError::Internal("in-memory store mutex poisoned".into()))
    }

    fn lock_unchecked(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Register a user without dashboard access.
    pub fn add_trainee(&self, user_id: DbId) -> Trainee {
        let trainee = Trainee {
            id: user_id,
            has_dashboard_access: false,
        };
        self.lock_unchecked().trainees.insert(user_id, trainee);
        trainee
    }

    pub fn trainee(&self, user_id: DbId) -> Option<Trainee> {
        self.lock_unchecked().trainees.get(&user_id).copied()
    }

    pub fn record(&self, user_id: DbId, video_id: DbId) -> Option<ProgressRecord> {
        self.lock_unchecked().records.get(&(user_id, video_id)).cloned()
    }

    /// How many times dashboard access actually flipped to granted.
    pub fn grant_count(&self) -> usize {
        self.lock_unchecked().grant_count
    }

    /// Make `grant_dashboard_access` fail with `StorageUnavailable`.
    pub fn fail_grants(&self, fail: bool) {
        self.lock_unchecked().fail_grants = fail;
    }

    /// Make every call fail with `StorageUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock_unchecked().unavailable = unavailable;
    }

    /// Delay every call by `latency` before it touches the state.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.lock_unchecked().latency = latency;
    }

    async fn enter(&self) -> Result<(), CoreError> {
        let (latency, unavailable) = {
            let state = self.lock()?;
            (state.latency, state.unavailable)
        };
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
        if unavailable {
            return Err(CoreError::StorageUnavailable("in-memory store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn find_trainee(&self, user_id: DbId) -> Result<Option<Trainee>, CoreError> {
        self.enter().await?;
        Ok(self.lock()?.trainees.get(&user_id).copied())
    }

    async fn catalog(&self) -> Result<Vec<Video>, CoreError> {
        self.enter().await?;
        Ok(self.lock()?.catalog.clone())
    }

    async fn progress_for_user(&self, user_id: DbId) -> Result<Vec<ProgressRecord>, CoreError> {
        self.enter().await?;
        let state = self.lock()?;
        let mut records: Vec<ProgressRecord> = state
            .records
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.video_id);
        Ok(records)
    }

    async fn upsert_progress(
        &self,
        user_id: DbId,
        video_id: DbId,
        watched: bool,
        questions_completed: i32,
    ) -> Result<ProgressRecord, CoreError> {
        self.enter().await?;
        let mut state = self.lock()?;
        let now = Utc::now();

        let record = state
            .records
            .entry((user_id, video_id))
            .and_modify(|existing| {
                let merged_watched = existing.watched || watched;
                let merged_count = existing.questions_completed.max(questions_completed);
                if merged_watched != existing.watched || merged_count != existing.questions_completed {
                    existing.watched = merged_watched;
                    existing.questions_completed = merged_count;
                    existing.updated_at = now;
                }
            })
            .or_insert_with(|| ProgressRecord {
                user_id,
                video_id,
                watched,
                questions_completed,
                created_at: now,
                updated_at: now,
            });

        Ok(record.clone())
    }

    async fn grant_dashboard_access(&self, user_id: DbId) -> Result<bool, CoreError> {
        self.enter().await?;
        let mut state = self.lock()?;
        if state.fail_grants {
            return Err(CoreError::StorageUnavailable("grant rejected".into()));
        }

        let trainee = state.trainees.get_mut(&user_id).ok_or(CoreError::NotFound {
            entity: "user",
            id: user_id,
        })?;
        if trainee.has_dashboard_access {
            return Ok(false);
        }
        trainee.has_dashboard_access = true;
        state.grant_count += 1;
        Ok(true)
    }
}
