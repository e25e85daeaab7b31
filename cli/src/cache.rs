//! Local mirror of the server's recipe list.
//!
//! The cache is seeded exactly once, from data bundled into the binary, and is
//! only invalidated by an explicit `refresh` after a successful server fetch.
//! Offline reads sort newest-first by creation time, unlike the server's
//! append-order listing.

use crate::types::Recipe;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const BUNDLED_SEED: &str = include_str!("../data/seed_recipes.json");

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    recipes: Vec<Recipe>,
}

pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write the bundled seed data, but only if no cache file exists yet.
    pub fn ensure_seeded(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        let seed: CacheFile =
            serde_json::from_str(BUNDLED_SEED).context("bundled seed data is invalid")?;
        self.write(&seed)
    }

    /// Replace the cached list wholesale with a fresh server result.
    pub fn refresh(&self, recipes: &[Recipe]) -> Result<()> {
        self.write(&CacheFile {
            recipes: recipes.to_vec(),
        })
    }

    /// Cached recipes, newest first, optionally narrowed by a
    /// case-insensitive search over title and description.
    pub fn list(&self, search: Option<&str>) -> Result<Vec<Recipe>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read cache at {}", self.path.display()))?;
        let file: CacheFile = serde_json::from_str(&raw)
            .with_context(|| format!("cache at {} is corrupt", self.path.display()))?;

        let mut recipes = file.recipes;
        if let Some(term) = search.filter(|t| !t.is_empty()) {
            let needle = term.to_lowercase();
            recipes.retain(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.description.to_lowercase().contains(&needle)
            });
        }
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }

    fn write(&self, file: &CacheFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, body)
            .with_context(|| format!("failed to write cache at {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn recipe(id: &str, title: &str, created_year: i32) -> Recipe {
        let at = Utc.with_ymd_and_hms(created_year, 1, 1, 0, 0, 0).unwrap();
        Recipe {
            id: id.to_string(),
            title: title.to_string(),
            description: "".to_string(),
            ingredients: vec![],
            instructions: "".to_string(),
            image: None,
            cooking_time: 10,
            servings: 2,
            difficulty: "easy".to_string(),
            author_id: "1".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_seeds_only_once() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path().join("cache.json"));

        cache.ensure_seeded().unwrap();
        let seeded = cache.list(None).unwrap();
        assert!(!seeded.is_empty(), "bundled seed should hold recipes");

        // A later refresh replaces the seed, and ensure_seeded leaves it alone
        cache.refresh(&[recipe("a1", "Toast", 2024)]).unwrap();
        cache.ensure_seeded().unwrap();
        let after = cache.list(None).unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].title, "Toast");
    }

    #[test]
    fn test_list_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path().join("cache.json"));
        cache
            .refresh(&[
                recipe("a1", "Old", 2020),
                recipe("b2", "New", 2024),
                recipe("c3", "Middle", 2022),
            ])
            .unwrap();

        let titles: Vec<String> = cache
            .list(None)
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["New", "Middle", "Old"]);
    }

    #[test]
    fn test_list_filters_title_and_description() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path().join("cache.json"));
        let mut described = recipe("a1", "Plain", 2023);
        described.description = "Smoky flavor".to_string();
        cache
            .refresh(&[described, recipe("b2", "Smoothie", 2024)])
            .unwrap();

        let hits = cache.list(Some("SMO")).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(cache.list(Some("pizza")).unwrap().is_empty());
    }

    #[test]
    fn test_bundled_seed_parses() {
        let file: CacheFile = serde_json::from_str(BUNDLED_SEED).unwrap();
        assert!(!file.recipes.is_empty());
    }
}
