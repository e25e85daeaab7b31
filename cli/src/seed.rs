//! Sample recipes for populating a fresh server.

use crate::client::Client;
use crate::types::NewRecipe;
use anyhow::Result;

struct SeedRecipe {
    title: &'static str,
    description: &'static str,
    ingredients: &'static [&'static str],
    instructions: &'static str,
    cooking_time: u32,
    servings: u32,
    difficulty: &'static str,
}

const SAMPLE_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        title: "Classic Spaghetti Carbonara",
        description: "A rich and creamy Italian pasta dish with eggs, cheese, and pancetta.",
        ingredients: &[
            "400 g spaghetti",
            "200 g pancetta or guanciale",
            "4 large eggs",
            "100 g Pecorino Romano, freshly grated",
            "2 tsp black pepper, freshly ground",
        ],
        instructions: "1. Bring a large pot of salted water to boil and cook spaghetti until al dente.
2. While pasta cooks, cut pancetta into small cubes and fry until crispy.
3. In a bowl, whisk together eggs, grated Pecorino Romano, and black pepper.
4. When pasta is done, reserve 1 cup pasta water, then drain.
5. Working quickly, add hot pasta to the pancetta pan (off heat).
6. Pour egg mixture over pasta and toss vigorously to create a creamy sauce.
7. Add pasta water as needed to reach desired consistency.",
        cooking_time: 25,
        servings: 4,
        difficulty: "medium",
    },
    SeedRecipe {
        title: "Banana Bread",
        description: "Moist and delicious banana bread, perfect for using up overripe bananas.",
        ingredients: &[
            "3 large ripe bananas",
            "1/3 cup melted butter",
            "3/4 cup sugar",
            "1 large egg",
            "1 tsp vanilla extract",
            "1 tsp baking soda",
            "1.5 cups all-purpose flour",
        ],
        instructions: "1. Preheat oven to 350F (175C). Grease a 9x5 inch loaf pan.
2. Mash bananas in a large bowl until smooth.
3. Mix in melted butter, then sugar, egg, and vanilla.
4. Stir in baking soda and salt, then fold in flour until just combined.
5. Bake for 55-65 minutes until a toothpick comes out clean.",
        cooking_time: 70,
        servings: 8,
        difficulty: "easy",
    },
    SeedRecipe {
        title: "Thai Green Curry",
        description: "Aromatic and creamy Thai curry with vegetables and your choice of protein.",
        ingredients: &[
            "2 tbsp green curry paste",
            "400 ml coconut milk",
            "500 g chicken thighs, sliced",
            "1 eggplant, cubed",
            "1 red bell pepper",
            "handful of thai basil",
        ],
        instructions: "1. Heat oil in a wok over medium-high heat.
2. Add green curry paste and fry for 1 minute until fragrant.
3. Add coconut milk and bring to a simmer.
4. Add chicken and cook through, then add the vegetables.
5. Simmer until tender and finish with thai basil.",
        cooking_time: 40,
        servings: 4,
        difficulty: "medium",
    },
    SeedRecipe {
        title: "Greek Salad",
        description: "Fresh and crunchy salad with feta, olives, and a simple oregano dressing.",
        ingredients: &[
            "4 ripe tomatoes",
            "1 cucumber",
            "1 red onion",
            "200 g feta",
            "handful of kalamata olives",
            "olive oil and dried oregano",
        ],
        instructions: "1. Cut the tomatoes and cucumber into chunks and slice the onion thinly.
2. Toss with olives and a generous glug of olive oil.
3. Top with a slab of feta, sprinkle with oregano, and serve.",
        cooking_time: 15,
        servings: 2,
        difficulty: "easy",
    },
];

/// Create every sample recipe against the given server.
pub async fn run(server: &str) -> Result<()> {
    let client = Client::new(server);

    for sample in SAMPLE_RECIPES {
        let recipe = client
            .create(&NewRecipe {
                title: sample.title.to_string(),
                description: sample.description.to_string(),
                ingredients: sample.ingredients.iter().map(|s| s.to_string()).collect(),
                instructions: sample.instructions.to_string(),
                image: None,
                cooking_time: sample.cooking_time,
                servings: sample.servings,
                difficulty: sample.difficulty.to_string(),
                author_id: "1".to_string(),
            })
            .await?;
        println!("Created {} ({})", recipe.title, recipe.id);
    }

    println!("Seeded {} recipes", SAMPLE_RECIPES.len());
    Ok(())
}
