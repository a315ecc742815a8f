use serde::{Deserialize, Serialize};

/// Persisted cake as returned by the store. `id` is assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cake {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Value handed to `CakeRepository::save`.
///
/// `id: None` asks the store to insert and assign an id; `Some(id)` replaces
/// the mutable fields of that record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CakeDraft {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
}

impl CakeDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { id: None, title: title.into(), description: description.into() }
    }
}

impl From<Cake> for CakeDraft {
    fn from(c: Cake) -> Self {
        Self { id: Some(c.id), title: c.title, description: c.description }
    }
}

/// Create input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCakeRequest {
    pub title: String,
    pub description: String,
}

/// Update input; both fields replace the stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCakeRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CakeResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
}

impl From<Cake> for CakeResponse {
    fn from(c: Cake) -> Self {
        Self { id: c.id, title: c.title, description: c.description }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CakesResponse {
    pub cakes: Vec<CakeResponse>,
}
