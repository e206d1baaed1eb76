use std::time::Duration;

use mockito::Matcher;

use dream_travels_api::services::activity_sources::ActivitySource;
use dream_travels_api::services::blog_scraper::{BlogScraper, BlogSite};

const UNREACHABLE: &str = "http://127.0.0.1:9";

const SEARCH_PAGE: &str = r#"
    <html><body>
      <h2 class="entry-title"><a href="/paris-in-three-days/">Paris in Three Days</a></h2>
      <h2 class="entry-title"><a href="/lisbon-food-tour/">A Lisbon Food Tour</a></h2>
    </body></html>
"#;

const ARTICLE: &str = r#"
    <html><body><article>
      <p>On your first morning, visit the Louvre Museum before the crowds arrive. Plan for 3 hours there.</p>
      <p>Make sure you book your museum tickets online the day before.</p>
      <p>For dinner we loved to eat at Chez Janou in the Marais.</p>
    </article></body></html>
"#;

#[actix_rt::test]
async fn test_scrapes_activities_restaurants_and_tips() {
    let mut server = mockito::Server::new_async().await;
    let search = server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("s".into(), "Paris".into()))
        .with_status(200)
        .with_body(SEARCH_PAGE)
        .create_async()
        .await;
    let article = server
        .mock("GET", "/paris-in-three-days/")
        .with_status(200)
        .with_body(ARTICLE)
        .expect(1)
        .create_async()
        .await;

    let sites = vec![
        BlogSite::new("mockblog", &server.url()).unwrap(),
        BlogSite::new("offline", UNREACHABLE).unwrap(),
    ];
    let scraper = BlogScraper::with_sites(Duration::from_secs(2), sites).unwrap();

    let bundle = scraper.fetch("Paris", &[]).await.unwrap();

    let activity = bundle
        .activities
        .iter()
        .find(|a| a.name.as_deref().is_some_and(|n| n.contains("Louvre")))
        .expect("Louvre activity scraped");
    assert_eq!(activity.source.as_deref(), Some("mockblog"));
    assert!(activity
        .source_url
        .as_deref()
        .is_some_and(|u| u.ends_with("/paris-in-three-days/")));
    assert!(activity.location.is_some());

    assert!(bundle.restaurants.iter().any(|r| r.name.contains("Chez Janou")));
    assert!(bundle.local_tips.iter().any(|t| t.starts_with("Make sure")));

    search.assert_async().await;
    article.assert_async().await;
}

#[actix_rt::test]
async fn test_all_blogs_failing_is_an_error() {
    let sites = vec![BlogSite::new("offline", UNREACHABLE).unwrap()];
    let scraper = BlogScraper::with_sites(Duration::from_secs(1), sites).unwrap();

    assert!(scraper.fetch("Paris", &[]).await.is_err());
}
