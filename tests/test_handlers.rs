use cooklang_scrape::{default_registry, scrape_document, Document, HowToItem, ScrapeError};

async fn scrape_fixture(url: &str, html: &str) -> cooklang_scrape::Result<cooklang_scrape::Recipe> {
    let registry = default_registry();
    let doc = Document::parse(html);
    scrape_document(&registry, url, &doc).await
}

#[tokio::test]
async fn test_allrecipes_scattered_blocks() {
    let html = "<html><head>
        <meta property=\"og:image\" content=\"https://images.example.com/chili.jpg\">
        <script type=\"application/ld+json\">{\"@type\":\"Organization\",\"name\":\"Allrecipes\"}</script>
        <script type=\"application/ld+json\">{\"@type\": [\"Recipe\"],
            \"name\": \"Boilermaker Tailgate Chili\",
            \"description\": \"A spicy,
 beefy chili.\",
            \"recipeYield\": \"8 servings\",
            \"recipeIngredient\": [\"2 pounds ground beef\", \"1 onion, chopped\"],
            \"recipeInstructions\": [{\"@type\": \"HowToStep\", \"text\": \"Brown the beef.\"}],
            \"totalTime\": \"PT2H30M\"}</script>
        </head><body></body></html>";

    let recipe = scrape_fixture("https://www.allrecipes.com/recipe/78299/chili/", html)
        .await
        .unwrap();

    assert_eq!(recipe.name, "Boilermaker Tailgate Chili");
    assert_eq!(recipe.description, "A spicy, beefy chili.");
    assert_eq!(recipe.recipe_yield, 8);
    assert_eq!(recipe.total_time, "PT2H30M");
    assert_eq!(recipe.image, "https://images.example.com/chili.jpg");
    assert_eq!(recipe.url, "https://www.allrecipes.com/recipe/78299/chili/");
    assert_eq!(recipe.instructions, vec![HowToItem::step("Brown the beef.")]);
}

#[tokio::test]
async fn test_bbcgoodfood_graph() {
    let html = r#"<html><head><script type="application/ld+json">
        {"@context": "https://schema.org", "@graph": [
            {"@type": "WebPage", "name": "Page"},
            {"@type": "Recipe", "name": "Easy pancakes", "url": "https://www.bbcgoodfood.com/recipes/easy-pancakes",
             "recipeYield": 12, "datePublished": "2012-05-02T12:00:00+01:00",
             "nutrition": {"@type": "NutritionInformation", "calories": "61 calories", "sugarContent": "0.4 grams sugar"}}
        ]}
        </script></head></html>"#;

    let recipe = scrape_fixture("https://www.bbcgoodfood.com/recipes/easy-pancakes?ref=x", html)
        .await
        .unwrap();

    assert_eq!(recipe.name, "Easy pancakes");
    assert_eq!(recipe.recipe_yield, 12);
    assert_eq!(recipe.url, "https://www.bbcgoodfood.com/recipes/easy-pancakes");
    assert_eq!(recipe.date_published, "2012-05-02T12:00:00+01:00");
    assert_eq!(recipe.nutrition.calories, "61 calories");
    assert_eq!(recipe.nutrition.sugar_content, "0.4 grams sugar");
}

#[tokio::test]
async fn test_bbcgoodfood_without_structured_data() {
    let err = scrape_fixture("https://www.bbcgoodfood.com/howto", "<html></html>")
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::NoRecipe));
}

#[tokio::test]
async fn test_seriouseats_array() {
    let html = r#"<html><head><script type="application/ld+json">
        [{"@type": "Recipe", "name": "The Food Lab's Chocolate Chip Cookies",
          "recipeYield": ["24", "24 cookies"], "cookingMethod": ["Baking"]}]
        </script></head></html>"#;

    let recipe = scrape_fixture("https://www.seriouseats.com/cookies", html)
        .await
        .unwrap();
    assert_eq!(recipe.name, "The Food Lab's Chocolate Chip Cookies");
    assert_eq!(recipe.recipe_yield, 24);
    assert_eq!(recipe.cooking_method, "Baking");
}

#[tokio::test]
async fn test_seriouseats_article_without_recipe() {
    let html = r#"<html><head><script type="application/ld+json">
        [{"@type": "Article", "headline": "Knife skills"}]
        </script></head></html>"#;

    let url = "https://www.seriouseats.com/knife-skills";
    let recipe = scrape_fixture(url, html).await.unwrap();
    assert_eq!(recipe.name, "");
    assert_eq!(recipe.url, url);
}

#[tokio::test]
async fn test_nytimes_single_object_with_day_dates() {
    let html = r#"<html><head><script type="application/ld+json">
        {"@context": "http://schema.org", "@type": "Recipe", "name": "Bolognese",
         "datePublished": "2019-11-05T12:00:00.000Z", "recipeYield": "6 to 8 servings",
         "recipeCuisine": "italian", "keywords": "pasta, sauce"}
        </script></head></html>"#;

    let recipe = scrape_fixture("https://cooking.nytimes.com/recipes/1015819", html)
        .await
        .unwrap();

    assert_eq!(recipe.name, "Bolognese");
    assert_eq!(recipe.date_published, "2019-11-05");
    assert_eq!(recipe.recipe_yield, 6);
    assert_eq!(recipe.cuisine, "italian");
    assert_eq!(recipe.keywords, "pasta, sauce");
}

#[tokio::test]
async fn test_nytimes_rejects_non_recipe() {
    let html = r#"<script type="application/ld+json">{"@type":"NewsArticle","headline":"x"}</script>"#;
    let err = scrape_fixture("https://cooking.nytimes.com/article/x", html)
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::NotARecipe(ref t) if t == "NewsArticle"));
}

const SIMPLY_RECIPES: &str = r#"
<html><head><meta property="og:image" content="https://example.com/og.jpg"></head>
<body>
  <ul><li class="mntl-breadcrumbs__item">Recipes</li><li class="mntl-breadcrumbs__item">Dinner</li></ul>
  <h1 class="heading__title">Perfect Roast Chicken</h1>
  <p class="heading__subtitle">Crispy skin &amp; juicy meat.</p>
  <div class="mntl-attribution__item-date">Updated March 8, 2023</div>
  <div class="prep-time project-meta__prep-time"><span class="meta-text__label">Prep:</span><span class="meta-text__data">15 mins</span></div>
  <div class="cook-time project-meta__cook-time"><span class="meta-text__data">1 hr 10 mins</span></div>
  <div class="recipe-serving project-meta__recipe-serving"><span class="meta-text__data">4 to 6</span></div>
  <ul>
    <li class="structured-ingredients__list-item">1 whole chicken</li>
    <li class="structured-ingredients__list-item">  2 tablespoons   butter </li>
  </ul>
  <ol>
    <li class="comp mntl-sc-block-group--LI"><p>Preheat the oven.</p></li>
    <li class="comp mntl-sc-block-group--LI"><p>Season the chicken.</p><p>Roast it.</p></li>
  </ol>
</body></html>
"#;

#[tokio::test]
async fn test_simplyrecipes_dom_fields() {
    let recipe = scrape_fixture("https://www.simplyrecipes.com/roast-chicken", SIMPLY_RECIPES)
        .await
        .unwrap();

    assert_eq!(recipe.kind, "Recipe");
    assert_eq!(recipe.name, "Perfect Roast Chicken");
    assert_eq!(recipe.description, "Crispy skin & juicy meat.");
    assert_eq!(recipe.image, "https://example.com/og.jpg");
    assert_eq!(recipe.recipe_yield, 4);
    assert_eq!(recipe.prep_time, "PT15M");
    assert_eq!(recipe.cook_time, "PT1H10M");
    assert_eq!(recipe.total_time, "");
    assert_eq!(recipe.date_modified, "March 8, 2023");
    assert_eq!(recipe.category, "Dinner");
    assert_eq!(
        recipe.ingredients,
        vec!["1 whole chicken", "2 tablespoons butter"]
    );
    assert_eq!(
        recipe.instructions,
        vec![
            HowToItem::step("Preheat the oven."),
            HowToItem::step("Season the chicken. Roast it."),
        ]
    );
}

#[tokio::test]
async fn test_simplyrecipes_bare_page_is_empty_not_error() {
    let url = "https://www.simplyrecipes.com/404";
    let recipe = scrape_fixture(url, "<html><body><p>Not found</p></body></html>")
        .await
        .unwrap();
    assert_eq!(recipe.name, "");
    assert!(recipe.ingredients.is_empty());
    assert_eq!(recipe.recipe_yield, 0);
    assert_eq!(recipe.url, url);
}

#[tokio::test]
async fn test_giallozafferano_falls_back_to_microdata() {
    let html = r#"<html><body>
        <script type="application/ld+json">{"@type":"WebSite","name":"GialloZafferano"}</script>
        <div itemscope itemtype="https://schema.org/Recipe">
          <h1 itemprop="name">Spaghetti alla Carbonara</h1>
          <span itemprop="recipeYield">Dosi per: 4 persone</span>
          <span itemprop="recipeIngredient">Spaghetti 320 g</span>
          <span itemprop="recipeIngredient">Guanciale 150 g</span>
        </div>
    </body></html>"#;

    let recipe = scrape_fixture("https://blog.giallozafferano.it/carbonara", html)
        .await
        .unwrap();
    assert_eq!(recipe.name, "Spaghetti alla Carbonara");
    assert_eq!(recipe.recipe_yield, 4);
    assert_eq!(recipe.ingredients, vec!["Spaghetti 320 g", "Guanciale 150 g"]);
}
