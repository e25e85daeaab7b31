use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Difficulty rating of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A stored recipe, as persisted in the recipe store and returned on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ingredient lines in display order.
    pub ingredients: Vec<String>,
    pub instructions: String,
    /// Relative path under /uploads, or a client-local URI while an upload is pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Cooking time in minutes.
    pub cooking_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a recipe. The server fills in `id` (unless the client
/// supplies one) and both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(default)]
    pub image: Option<String>,
    pub cooking_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub author_id: String,
}

/// Partial update payload. Fields left out of the request body keep their
/// stored value. `id` and `createdAt` are deliberately absent so a request
/// can never rewrite them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub image: Option<String>,
    pub cooking_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub author_id: Option<String>,
}

impl Recipe {
    /// Shallow-merge the supplied fields over this record. Timestamps are the
    /// store's responsibility and are not touched here.
    pub fn apply(&mut self, patch: RecipePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(ingredients) = patch.ingredients {
            self.ingredients = ingredients;
        }
        if let Some(instructions) = patch.instructions {
            self.instructions = instructions;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        if let Some(cooking_time) = patch.cooking_time {
            self.cooking_time = cooking_time;
        }
        if let Some(servings) = patch.servings {
            self.servings = servings;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(author_id) = patch.author_id {
            self.author_id = author_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Recipe {
        Recipe {
            id: "abc123def".to_string(),
            title: "Soup".to_string(),
            description: "Warm".to_string(),
            ingredients: vec!["water".to_string(), "salt".to_string()],
            instructions: "Boil".to_string(),
            image: None,
            cooking_time: 10,
            servings: 2,
            difficulty: Difficulty::Easy,
            author_id: "1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_retains_omitted_fields() {
        let mut recipe = sample();
        let created_at = recipe.created_at;

        recipe.apply(RecipePatch {
            servings: Some(4),
            ..Default::default()
        });

        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.title, "Soup");
        assert_eq!(recipe.ingredients, vec!["water", "salt"]);
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.created_at, created_at);
    }

    #[test]
    fn test_apply_replaces_ingredient_list_wholesale() {
        let mut recipe = sample();
        recipe.apply(RecipePatch {
            ingredients: Some(vec!["stock".to_string()]),
            ..Default::default()
        });
        assert_eq!(recipe.ingredients, vec!["stock"]);
    }

    #[test]
    fn test_recipe_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("cookingTime").is_some());
        assert!(json.get("authorId").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["difficulty"], "easy");
        // No image set, so the key is omitted entirely
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_difficulty_round_trips_lowercase() {
        for (value, text) in [
            (Difficulty::Easy, "\"easy\""),
            (Difficulty::Medium, "\"medium\""),
            (Difficulty::Hard, "\"hard\""),
        ] {
            assert_eq!(serde_json::to_string(&value).unwrap(), text);
            let back: Difficulty = serde_json::from_str(text).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn test_patch_deserializes_partial_body() {
        let patch: RecipePatch = serde_json::from_str(r#"{"servings":4}"#).unwrap();
        assert_eq!(patch.servings, Some(4));
        assert!(patch.title.is_none());
        assert!(patch.ingredients.is_none());
    }
}
