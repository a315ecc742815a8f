use async_trait::async_trait;

use super::domain::{Cake, CakeDraft};
use crate::errors::ServiceError;

/// Repository abstraction for cake persistence.
#[async_trait]
pub trait CakeRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Cake>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Cake>, ServiceError>;
    /// Insert when `draft.id` is `None` or unknown, otherwise replace. Returns the persisted state.
    async fn save(&self, draft: CakeDraft) -> Result<Cake, ServiceError>;
    async fn delete(&self, cake: Cake) -> Result<(), ServiceError>;
}

/// In-process repository. Backs the `memory` storage mode and the tests,
/// which read back the recorded `save`/`delete` calls.
pub mod memory {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    #[derive(Default)]
    struct State {
        rows: Vec<Cake>,   // insertion order
        last_id: i64,
        saved: Vec<CakeDraft>,
        deleted: Vec<Cake>,
        failure: Option<String>,
    }

    #[derive(Default)]
    pub struct InMemoryCakeRepository {
        state: Mutex<State>,
    }

    impl InMemoryCakeRepository {
        /// Seed with existing rows, kept in the given order.
        pub fn with_cakes(cakes: impl IntoIterator<Item = Cake>) -> Self {
            let rows: Vec<Cake> = cakes.into_iter().collect();
            let last_id = rows.iter().map(|c| c.id).max().unwrap_or(0);
            Self { state: Mutex::new(State { rows, last_id, ..Default::default() }) }
        }

        /// Make the next insert receive `id`.
        pub fn next_id(self, id: i64) -> Self {
            self.lock().last_id = id - 1;
            self
        }

        /// Every call fails with `ServiceError::Db(reason)`.
        pub fn unavailable(reason: impl Into<String>) -> Self {
            Self { state: Mutex::new(State { failure: Some(reason.into()), ..Default::default() }) }
        }

        pub fn snapshot(&self) -> Vec<Cake> { self.lock().rows.clone() }

        pub fn saved(&self) -> Vec<CakeDraft> { self.lock().saved.clone() }

        pub fn deleted(&self) -> Vec<Cake> { self.lock().deleted.clone() }

        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn checked(&self) -> Result<MutexGuard<'_, State>, ServiceError> {
            let state = self.lock();
            match &state.failure {
                Some(reason) => Err(ServiceError::Db(reason.clone())),
                None => Ok(state),
            }
        }
    }

    #[async_trait]
    impl CakeRepository for InMemoryCakeRepository {
        async fn find_all(&self) -> Result<Vec<Cake>, ServiceError> {
            Ok(self.checked()?.rows.clone())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Cake>, ServiceError> {
            Ok(self.checked()?.rows.iter().find(|c| c.id == id).cloned())
        }

        async fn save(&self, draft: CakeDraft) -> Result<Cake, ServiceError> {
            let mut state = self.checked()?;
            state.saved.push(draft.clone());
            let id = match draft.id {
                Some(id) => id,
                None => state.last_id + 1,
            };
            state.last_id = state.last_id.max(id);
            let cake = Cake { id, title: draft.title, description: draft.description };
            match state.rows.iter_mut().find(|c| c.id == id) {
                Some(existing) => *existing = cake.clone(),
                None => state.rows.push(cake.clone()),
            }
            Ok(cake)
        }

        async fn delete(&self, cake: Cake) -> Result<(), ServiceError> {
            let mut state = self.checked()?;
            state.rows.retain(|c| c.id != cake.id);
            state.deleted.push(cake);
            Ok(())
        }
    }

}
