use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{CakeDraft, CakeResponse, CakesResponse, CreateCakeRequest, UpdateCakeRequest};
use super::repository::CakeRepository;
use crate::errors::ServiceError;

/// Cake business service independent of web framework.
///
/// Holds nothing but the repository handle; every call re-reads the store.
pub struct CakeService<R: CakeRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CakeRepository + ?Sized> CakeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All cakes sorted by title (byte-wise, ascending). Equal titles keep store order.
    ///
    /// # Examples
    /// ```
    /// use service::cake::{CakeService, domain::Cake, repository::memory::InMemoryCakeRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(InMemoryCakeRepository::with_cakes([
    ///     Cake { id: 2, title: "Vanilla Cake".into(), description: "Tasty vanilla cake".into() },
    ///     Cake { id: 1, title: "Chocolate Cake".into(), description: "Delicious chocolate cake".into() },
    /// ]));
    /// let svc = CakeService::new(repo);
    /// let all = tokio_test::block_on(svc.list()).unwrap();
    /// assert_eq!(all.cakes[0].title, "Chocolate Cake");
    /// assert_eq!(all.cakes[1].title, "Vanilla Cake");
    /// ```
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<CakesResponse, ServiceError> {
        let mut cakes = self.repo.find_all().await?;
        cakes.sort_by(|a, b| a.title.cmp(&b.title));
        debug!(count = cakes.len(), "cakes listed");
        Ok(CakesResponse { cakes: cakes.into_iter().map(CakeResponse::from).collect() })
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<CakeResponse, ServiceError> {
        let cake = self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        Ok(cake.into())
    }

    /// Persist a new cake; the id comes from the store.
    ///
    /// # Examples
    /// ```
    /// use service::cake::{CakeService, domain::CreateCakeRequest, repository::memory::InMemoryCakeRepository};
    /// use std::sync::Arc;
    /// let svc = CakeService::new(Arc::new(InMemoryCakeRepository::default().next_id(3)));
    /// let req = CreateCakeRequest { title: "Red Velvet Cake".into(), description: "Delicious Red Velvet Cake".into() };
    /// let created = tokio_test::block_on(svc.create(req)).unwrap();
    /// assert_eq!(created.id, 3);
    /// ```
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(&self, request: CreateCakeRequest) -> Result<CakeResponse, ServiceError> {
        let saved = self.repo.save(CakeDraft::new(request.title, request.description)).await?;
        info!(cake_id = saved.id, "cake_created");
        Ok(saved.into())
    }

    /// Replace title and description of an existing cake.
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: UpdateCakeRequest) -> Result<CakeResponse, ServiceError> {
        let existing = self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        let mut draft = CakeDraft::from(existing);
        draft.title = request.title;
        draft.description = request.description;
        let saved = self.repo.save(draft).await?;
        info!(cake_id = saved.id, "cake_updated");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.repo.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
        self.repo.delete(existing).await?;
        info!(cake_id = id, "cake_deleted");
        Ok(())
    }
}

fn not_found(id: i64) -> ServiceError {
    debug!(cake_id = id, "cake not found");
    ServiceError::NotFound
}
