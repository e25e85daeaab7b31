//! File-backed recipe store.
//!
//! All recipes live in a single JSON document (`recipes.json`) shaped as
//! `{ "recipes": [...] }`. Every mutation is a whole-file
//! read/modify/serialize/write cycle funneled through a single-writer mutex,
//! so interleaved requests cannot lose each other's updates. Writes go to a
//! temp file and are renamed into place; a failed write leaves the previous
//! contents intact.

use crate::models::{NewRecipe, Recipe, RecipePatch};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

/// Name of the store file inside the data directory.
pub const STORE_FILE: &str = "recipes.json";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access the recipe store: {0}")]
    Io(#[from] std::io::Error),

    #[error("recipe store is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("recipe id {0} already exists")]
    DuplicateId(String),
}

/// On-disk document shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    recipes: Vec<Recipe>,
}

/// Repository owning the recipe store file. Constructed once at startup and
/// handed to the endpoint layer through the shared application state.
#[derive(Debug)]
pub struct RecipeRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecipeRepository {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(STORE_FILE),
            write_lock: Mutex::new(()),
        }
    }

    /// Load every recipe. A missing store file is an empty list; anything
    /// unparseable is a hard error rather than a silent reset.
    async fn load(&self) -> Result<Vec<Recipe>, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let file: StoreFile = serde_json::from_str(&raw)?;
        Ok(file.recipes)
    }

    /// Rewrite the whole store file. The data directory is created on first
    /// write, and the new contents only replace the old via rename.
    async fn persist(&self, recipes: Vec<Recipe>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(&StoreFile { recipes })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// All recipes in on-disk (append) order, optionally narrowed to those
    /// where the search term appears in the title, description, or any
    /// ingredient (case-insensitive substring match).
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.load().await?;
        match search {
            Some(term) if !term.is_empty() => {
                let needle = term.to_lowercase();
                Ok(recipes
                    .into_iter()
                    .filter(|r| matches_search(r, &needle))
                    .collect())
            }
            _ => Ok(recipes),
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let recipes = self.load().await?;
        Ok(recipes.into_iter().find(|r| r.id == id))
    }

    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.load().await?;
        Ok(recipes
            .into_iter()
            .filter(|r| r.author_id == author_id)
            .collect())
    }

    /// Append a new recipe. A fresh id is generated unless the client supplied
    /// one; a supplied id that is already taken is rejected so an existing
    /// record can never be shadowed. Both timestamps are set to now.
    pub async fn insert(&self, new: NewRecipe) -> Result<Recipe, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut recipes = self.load().await?;

        let id = match new.id.filter(|id| !id.is_empty()) {
            Some(id) => {
                if recipes.iter().any(|r| r.id == id) {
                    return Err(StoreError::DuplicateId(id));
                }
                id
            }
            None => generate_id(&recipes),
        };

        let now = Utc::now();
        let recipe = Recipe {
            id,
            title: new.title,
            description: new.description,
            ingredients: new.ingredients,
            instructions: new.instructions,
            image: new.image,
            cooking_time: new.cooking_time,
            servings: new.servings,
            difficulty: new.difficulty,
            author_id: new.author_id,
            created_at: now,
            updated_at: now,
        };

        recipes.push(recipe.clone());
        self.persist(recipes).await?;
        Ok(recipe)
    }

    /// Shallow-merge the supplied fields over the stored record and refresh
    /// `updatedAt`. Returns `None` when no record has the given id.
    pub async fn update(
        &self,
        id: &str,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut recipes = self.load().await?;

        let Some(recipe) = recipes.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        recipe.apply(patch);
        recipe.updated_at = Utc::now();
        let updated = recipe.clone();

        self.persist(recipes).await?;
        Ok(Some(updated))
    }

    /// Remove the record if present. The store is persisted either way, so
    /// deleting an unknown id is an idempotent no-op. Returns whether a
    /// record was actually removed.
    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut recipes = self.load().await?;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        let removed = recipes.len() != before;
        self.persist(recipes).await?;
        Ok(removed)
    }

    /// Point the record's `image` field at an uploaded file.
    pub async fn set_image(
        &self,
        id: &str,
        image_url: &str,
    ) -> Result<Option<Recipe>, StoreError> {
        self.update(
            id,
            RecipePatch {
                image: Some(image_url.to_string()),
                ..Default::default()
            },
        )
        .await
    }
}

fn matches_search(recipe: &Recipe, needle: &str) -> bool {
    recipe.title.to_lowercase().contains(needle)
        || recipe.description.to_lowercase().contains(needle)
        || recipe
            .ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(needle))
}

/// Generate a 9-character lowercase base36 id not already present in the
/// store.
fn generate_id(existing: &[Recipe]) -> String {
    let mut rng = rand::rng();
    loop {
        let id: String = (0..ID_LEN)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect();
        if !existing.iter().any(|r| r.id == id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use tempfile::TempDir;

    fn repo() -> (RecipeRepository, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (RecipeRepository::new(dir.path().join("data")), dir)
    }

    fn soup() -> NewRecipe {
        NewRecipe {
            id: None,
            title: "Soup".to_string(),
            description: "Warm".to_string(),
            ingredients: vec!["water".to_string(), "salt".to_string()],
            instructions: "Boil".to_string(),
            image: None,
            cooking_time: 10,
            servings: 2,
            difficulty: Difficulty::Easy,
            author_id: "1".to_string(),
        }
    }

    #[test]
    fn test_generated_id_shape() {
        let id = generate_id(&[]);
        assert_eq!(id.len(), 9);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_matches_search_checks_all_text_fields() {
        let mut recipe = Recipe {
            id: "x".to_string(),
            title: "Carbonara".to_string(),
            description: "Roman pasta".to_string(),
            ingredients: vec!["Pecorino Romano".to_string()],
            instructions: "".to_string(),
            image: None,
            cooking_time: 20,
            servings: 4,
            difficulty: Difficulty::Medium,
            author_id: "1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(matches_search(&recipe, "carbo"));
        assert!(matches_search(&recipe, "roman pasta"));
        assert!(matches_search(&recipe, "pecorino"));
        assert!(!matches_search(&recipe, "chicken"));

        recipe.ingredients.clear();
        assert!(!matches_search(&recipe, "pecorino"));
    }

    #[tokio::test]
    async fn test_missing_store_file_is_empty_list() {
        let (repo, _dir) = repo();
        assert!(repo.list(None).await.unwrap().is_empty());
        assert!(repo.get_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_then_get_round_trips() {
        let (repo, _dir) = repo();
        let created = repo.insert(soup()).await.unwrap();
        assert_eq!(created.created_at, created.updated_at);

        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_insert_generates_distinct_ids() {
        let (repo, _dir) = repo();
        let a = repo.insert(soup()).await.unwrap();
        let b = repo.insert(soup()).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_insert_keeps_supplied_id_but_rejects_duplicates() {
        let (repo, _dir) = repo();
        let mut new = soup();
        new.id = Some("custom-id1".to_string());
        let created = repo.insert(new.clone()).await.unwrap();
        assert_eq!(created.id, "custom-id1");

        let err = repo.insert(new).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id == "custom-id1"));

        // The rejected insert must not have touched the store
        assert_eq!(repo.list(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_and_advances_updated_at() {
        let (repo, _dir) = repo();
        let created = repo.insert(soup()).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                RecipePatch {
                    servings: Some(4),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.servings, 4);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.ingredients, created.ingredients);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let (repo, _dir) = repo();
        repo.insert(soup()).await.unwrap();
        let result = repo.update("missing01", RecipePatch::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (repo, _dir) = repo();
        let created = repo.insert(soup()).await.unwrap();

        assert!(repo.remove(&created.id).await.unwrap());
        assert!(repo.get_by_id(&created.id).await.unwrap().is_none());

        // Second delete is a successful no-op
        assert!(!repo.remove(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_preserves_append_order() {
        let (repo, _dir) = repo();
        let mut first = soup();
        first.title = "First".to_string();
        let mut second = soup();
        second.title = "Second".to_string();

        repo.insert(first).await.unwrap();
        repo.insert(second).await.unwrap();

        let titles: Vec<String> = repo
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_search_filters_case_insensitively() {
        let (repo, _dir) = repo();
        let mut salad = soup();
        salad.title = "Greek Salad".to_string();
        salad.ingredients = vec!["Feta".to_string(), "olives".to_string()];
        repo.insert(soup()).await.unwrap();
        repo.insert(salad).await.unwrap();

        let hits = repo.list(Some("FETA")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Greek Salad");

        // Empty term behaves like no term
        assert_eq!(repo.list(Some("")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_by_author() {
        let (repo, _dir) = repo();
        let mut other = soup();
        other.author_id = "2".to_string();
        repo.insert(soup()).await.unwrap();
        repo.insert(other).await.unwrap();

        let mine = repo.list_by_author("1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].author_id, "1");
        assert!(repo.list_by_author("99").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_store_is_an_error_not_a_reset() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(data_dir.join(STORE_FILE), "{not json").unwrap();

        let repo = RecipeRepository::new(&data_dir);
        let err = repo.list(None).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));

        // The broken file must still be there, untouched
        let raw = std::fs::read_to_string(data_dir.join(STORE_FILE)).unwrap();
        assert_eq!(raw, "{not json");
    }
}
