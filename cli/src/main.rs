mod cache;
mod client;
mod seed;
mod types;

use anyhow::Result;
use cache::LocalCache;
use clap::{Parser, Subcommand};
use client::Client;
use std::path::PathBuf;
use types::{NewRecipe, Recipe, RecipePatch};

#[derive(Parser)]
#[command(name = "cookbook")]
#[command(about = "Cookbook CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is up
    Ping {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
    /// List recipes
    List {
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
        /// Case-insensitive search term
        #[arg(long)]
        search: Option<String>,
        /// Read the local cache instead of the server (newest first)
        #[arg(long)]
        offline: bool,
        /// Path of the local cache file
        #[arg(long, default_value = ".cookbook-cache.json")]
        cache: PathBuf,
    },
    /// Show one recipe in full
    Show {
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
        id: String,
    },
    /// Create a recipe, optionally uploading a cover image
    Create {
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Repeat for each ingredient line, in display order
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        #[arg(long)]
        instructions: String,
        /// Cooking time in minutes
        #[arg(long, default_value_t = 30)]
        cooking_time: u32,
        #[arg(long, default_value_t = 2)]
        servings: u32,
        #[arg(long, default_value = "easy", value_parser = ["easy", "medium", "hard"])]
        difficulty: String,
        #[arg(long, default_value = "1")]
        author: String,
        /// Local image file to upload once the recipe exists
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Update fields of an existing recipe
    Update {
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        #[arg(long)]
        instructions: Option<String>,
        #[arg(long)]
        cooking_time: Option<u32>,
        #[arg(long)]
        servings: Option<u32>,
        #[arg(long, value_parser = ["easy", "medium", "hard"])]
        difficulty: Option<String>,
    },
    /// Delete a recipe
    Delete {
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
        id: String,
    },
    /// Populate a server with sample recipes
    Seed {
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
}

fn print_summary(recipe: &Recipe) {
    println!(
        "{}  {} ({}, {} min, serves {})",
        recipe.id, recipe.title, recipe.difficulty, recipe.cooking_time, recipe.servings
    );
}

fn print_full(recipe: &Recipe) {
    println!("{} — {}", recipe.id, recipe.title);
    println!("  {}", recipe.description);
    println!(
        "  {} | {} min | serves {} | by {}",
        recipe.difficulty, recipe.cooking_time, recipe.servings, recipe.author_id
    );
    if let Some(image) = &recipe.image {
        println!("  image: {}", image);
    }
    println!("  ingredients:");
    for ingredient in &recipe.ingredients {
        println!("    - {}", ingredient);
    }
    println!("  instructions:\n{}", recipe.instructions);
    println!(
        "  created {} / updated {}",
        recipe.created_at, recipe.updated_at
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ping { server } => {
            let message = Client::new(&server).ping().await?;
            println!("{}", message);
        }
        Commands::List {
            server,
            search,
            offline,
            cache,
        } => {
            let cache = LocalCache::new(cache);
            cache.ensure_seeded()?;

            let recipes = if offline {
                cache.list(search.as_deref())?
            } else {
                let recipes = Client::new(&server).list(search.as_deref()).await?;
                // Keep the mirror current for later offline reads
                cache.refresh(&recipes)?;
                recipes
            };

            for recipe in &recipes {
                print_summary(recipe);
            }
            println!("{} recipes", recipes.len());
        }
        Commands::Show { server, id } => {
            let recipe = Client::new(&server).get(&id).await?;
            print_full(&recipe);
        }
        Commands::Create {
            server,
            title,
            description,
            ingredients,
            instructions,
            cooking_time,
            servings,
            difficulty,
            author,
            image,
        } => {
            let recipe = Client::new(&server)
                .create_with_image(
                    NewRecipe {
                        title,
                        description,
                        ingredients,
                        instructions,
                        image: None,
                        cooking_time,
                        servings,
                        difficulty,
                        author_id: author,
                    },
                    image.as_deref(),
                )
                .await?;
            print_full(&recipe);
        }
        Commands::Update {
            server,
            id,
            title,
            description,
            ingredients,
            instructions,
            cooking_time,
            servings,
            difficulty,
        } => {
            let patch = RecipePatch {
                title,
                description,
                ingredients: if ingredients.is_empty() {
                    None
                } else {
                    Some(ingredients)
                },
                instructions,
                image: None,
                cooking_time,
                servings,
                difficulty,
            };
            let recipe = Client::new(&server).update(&id, &patch).await?;
            print_full(&recipe);
        }
        Commands::Delete { server, id } => {
            Client::new(&server).delete(&id).await?;
            println!("Deleted {}", id);
        }
        Commands::Seed { server } => {
            seed::run(&server).await?;
        }
    }

    Ok(())
}
