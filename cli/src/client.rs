//! HTTP client for the cookbook server.

use crate::types::{NewRecipe, Recipe, RecipePatch, UploadImageResponse};
use anyhow::{bail, Context, Result};
use std::path::Path;

pub struct Client {
    base: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(server: &str) -> Self {
        Self {
            base: server.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn ping(&self) -> Result<String> {
        let response = self
            .http
            .get(format!("{}/", self.base))
            .send()
            .await
            .with_context(|| format!("could not reach {}", self.base))?;
        if !response.status().is_success() {
            bail!("server returned {}", response.status());
        }
        Ok(response.text().await?)
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Recipe>> {
        let mut request = self.http.get(format!("{}/recipes", self.base));
        if let Some(term) = search {
            request = request.query(&[("search", term)]);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            bail!("failed to list recipes: {}", response.status());
        }
        Ok(response.json().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Recipe> {
        let response = self
            .http
            .get(format!("{}/recipes/{}", self.base, id))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            bail!("recipe {} not found", id);
        }
        if !response.status().is_success() {
            bail!("failed to fetch recipe: {}", response.status());
        }
        Ok(response.json().await?)
    }

    pub async fn create(&self, recipe: &NewRecipe) -> Result<Recipe> {
        let response = self
            .http
            .post(format!("{}/recipes", self.base))
            .json(recipe)
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("failed to create recipe: {}", response.status());
        }
        Ok(response.json().await?)
    }

    pub async fn update(&self, id: &str, patch: &RecipePatch) -> Result<Recipe> {
        let response = self
            .http
            .put(format!("{}/recipes/{}", self.base, id))
            .json(patch)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            bail!("recipe {} not found", id);
        }
        if !response.status().is_success() {
            bail!("failed to update recipe: {}", response.status());
        }
        Ok(response.json().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .http
            .delete(format!("{}/recipes/{}", self.base, id))
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("failed to delete recipe: {}", response.status());
        }
        Ok(())
    }

    pub async fn upload_image(&self, id: &str, path: &Path) -> Result<UploadImageResponse> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("recipe.jpg")
            .to_string();
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime_for(path))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .http
            .post(format!("{}/recipes/{}/image", self.base, id))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("image upload failed: {}", response.status());
        }
        Ok(response.json().await?)
    }

    /// The full create flow: create the record, upload the pending image, then
    /// persist the returned URL on the record with a follow-up update.
    pub async fn create_with_image(
        &self,
        recipe: NewRecipe,
        image: Option<&Path>,
    ) -> Result<Recipe> {
        let created = self.create(&recipe).await?;
        let Some(path) = image else {
            return Ok(created);
        };

        let uploaded = self.upload_image(&created.id, path).await?;
        self.update(
            &created.id,
            &RecipePatch {
                image: Some(uploaded.image_url),
                ..Default::default()
            },
        )
        .await
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for(Path::new("a/photo.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("photo.jpg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("noextension")), "image/jpeg");
    }
}
