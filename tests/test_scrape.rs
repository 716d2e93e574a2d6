use async_trait::async_trait;
use cooklang_scrape::strategies::from_scattered;
use cooklang_scrape::{
    host_key, Document, Handler, Recipe, Registry, RequestFetcher, ScrapeError, Scraper,
};

fn create_recipe_html(json_ld: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Recipe Page</title>
            <script type="application/ld+json">
                {json_ld}
            </script>
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#
    )
}

struct JsonLdPage;

#[async_trait(?Send)]
impl Handler for JsonLdPage {
    async fn scrape(&self, doc: &Document) -> cooklang_scrape::Result<Recipe> {
        from_scattered(doc)
    }
}

/// mockito serves from a bare IP, so register under whatever key that
/// resolves to.
fn scraper_for(server_url: &str) -> Scraper {
    let mut registry = Registry::new();
    registry.register(host_key(server_url), JsonLdPage);
    Scraper::new(registry, RequestFetcher::new(None).unwrap())
}

#[tokio::test]
async fn test_recipe_page_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let json_ld = r#"
    {
        "@context": "https://schema.org",
        "@type": "Recipe",
        "name": "Easy Black Bean Soup",
        "image": "https://example.com/blackbean.jpg",
        "keywords": ["black bean soup", "vegetarian", "easy"],
        "prepTime": "PT10M",
        "cookTime": "PT30M",
        "totalTime": "PT40M",
        "recipeYield": "6",
        "recipeCategory": "Soup",
        "recipeCuisine": "Mexican",
        "recipeIngredient": [
            "2 cans black beans",
            "1 onion, diced",
            "4 cups vegetable broth"
        ],
        "recipeInstructions": [
            "Sauté onion until soft.",
            "Add beans and broth, simmer for 20 minutes."
        ]
    }
    "#;

    let _m = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(create_recipe_html(json_ld))
        .create_async()
        .await;

    let url = format!("{}/recipe", server.url());
    let recipe = scraper_for(&server.url()).scrape(&url).await.unwrap();

    assert_eq!(recipe.kind, "Recipe");
    assert_eq!(recipe.name, "Easy Black Bean Soup");
    assert_eq!(recipe.url, url);
    assert_eq!(recipe.recipe_yield, 6);
    assert_eq!(recipe.total_time, "PT40M");
    assert_eq!(recipe.keywords, "black bean soup, vegetarian, easy");
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.instructions[0].text, "Sauté onion until soft.");
}

#[tokio::test]
async fn test_recipe_with_array_fields_and_empty_strings() {
    let mut server = mockito::Server::new_async().await;
    let json_ld = r#"
    {
        "@context": "https://schema.org",
        "@type": "Recipe",
        "cookTime": "PT30M",
        "datePublished": "2024-09-07T12:17:45-04:00",
        "description": "",
        "image": [
            "https://example.com/image1.jpg",
            "https://example.com/image2.jpg"
        ],
        "keywords": "",
        "name": "Shahi Paneer",
        "prepTime": "",
        "recipeCategory": ["All", "All Things Indian"],
        "recipeCuisine": [],
        "recipeIngredient": ["300g paneer", "4 roma tomatoes", "2 red onion"],
        "recipeInstructions": [
            {"@type": "HowToStep", "text": "Chop vegetables"},
            {"@type": "HowToStep", "text": "Cook paneer"}
        ]
    }
    "#;

    let _m = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(create_recipe_html(json_ld))
        .create_async()
        .await;

    let url = format!("{}/recipe", server.url());
    let recipe = scraper_for(&server.url()).scrape(&url).await.unwrap();

    assert_eq!(recipe.name, "Shahi Paneer");
    assert_eq!(recipe.description, "");
    assert_eq!(recipe.image, "https://example.com/image1.jpg");
    assert_eq!(recipe.prep_time, "");
    assert_eq!(recipe.cook_time, "PT30M");
    // Native date format is kept as published
    assert_eq!(recipe.date_published, "2024-09-07T12:17:45-04:00");
    assert_eq!(recipe.category, "All");
    assert_eq!(recipe.cuisine, "");
    assert_eq!(recipe.keywords, "");
    assert_eq!(
        recipe.ingredients,
        vec!["300g paneer", "4 roma tomatoes", "2 red onion"]
    );
    assert_eq!(recipe.instructions.len(), 2);
}

#[tokio::test]
async fn test_non_2xx_page_is_still_handed_to_the_handler() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/soft-404")
        .with_status(404)
        .with_body(create_recipe_html(
            r#"{"@type":"Recipe","name":"Still here"}"#,
        ))
        .create_async()
        .await;

    let url = format!("{}/soft-404", server.url());
    let recipe = scraper_for(&server.url()).scrape(&url).await.unwrap();
    assert_eq!(recipe.name, "Still here");
}

#[tokio::test]
async fn test_page_without_recipe_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/about")
        .with_status(200)
        .with_body(create_recipe_html(r#"{"@type":"AboutPage"}"#))
        .create_async()
        .await;

    let url = format!("{}/about", server.url());
    let err = scraper_for(&server.url()).scrape(&url).await.unwrap_err();
    assert!(matches!(err, ScrapeError::NoRecipe));
}

#[tokio::test]
async fn test_lowercase_type_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_body(create_recipe_html(r#"{"@type":"recipe","name":"Almost"}"#))
        .create_async()
        .await;

    let url = format!("{}/recipe", server.url());
    let err = scraper_for(&server.url()).scrape(&url).await.unwrap_err();
    assert!(matches!(err, ScrapeError::NoRecipe));
}

#[tokio::test]
async fn test_unreachable_host_is_a_fetch_error() {
    let scraper = Scraper::new(Registry::new(), RequestFetcher::new(None).unwrap());
    let err = scraper.scrape("http://127.0.0.1:1/recipe").await.unwrap_err();
    assert!(matches!(err, ScrapeError::Fetch { .. }));
}

#[tokio::test]
async fn test_unregistered_host_names_its_key() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_body(create_recipe_html(r#"{"@type":"Recipe","name":"Orphan"}"#))
        .create_async()
        .await;

    let scraper = Scraper::new(Registry::new(), RequestFetcher::new(None).unwrap());
    let url = format!("{}/recipe", server.url());
    let err = scraper.scrape(&url).await.unwrap_err();

    assert!(err.is_unsupported_site());
    assert!(err.to_string().contains(&format!("{:?}", host_key(&url))));
}

#[tokio::test]
async fn test_scrape_is_send() {
    fn assert_send<T: Send>(_: &T) {}
    let scraper = Scraper::new(Registry::new(), RequestFetcher::new(None).unwrap());
    let future = scraper.scrape("http://127.0.0.1:1/recipe");
    assert_send(&future);
}
