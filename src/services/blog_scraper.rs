//! Travel Blog Scraper
//!
//! Searches a fixed set of travel blogs for articles about a destination and
//! pulls activities, restaurants and local tips out of the article text with
//! simple phrase patterns. Scraped activities have no real coordinates, so
//! they are placed near the destination centre with a small offset derived
//! from the activity name. That keeps them clustered with the catalog
//! activities for the same city and stable between runs.

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use regex::Regex;
use scraper::{Html, Selector};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::AppError;
use crate::models::activity::{Coordinates, RawActivity, Restaurant};
use crate::services::activity_sources::{ActivitySource, SourceBundle};
use crate::services::destination_catalog;

const MAX_ARTICLES_PER_BLOG: usize = 3;
const MAX_ACTIVITIES_PER_ARTICLE: usize = 20;
const MAX_RESTAURANTS_PER_ARTICLE: usize = 10;
const MAX_TIPS_PER_ARTICLE: usize = 8;
const MAX_CONCURRENT_FETCHES: usize = 4;
// Roughly one kilometre either way.
const LOCATION_JITTER_DEGREES: f64 = 0.01;

const DEFAULT_BLOGS: [(&str, &str); 3] = [
    ("awanderlustforlife", "https://www.awanderlustforlife.com"),
    ("toeuropeandbeyond", "https://www.toeuropeandbeyond.com"),
    ("nomadicmatt", "https://www.nomadicmatt.com"),
];

static ACTIVITY_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:visit|go to|check out|explore|try|experience)\s+([^,.;:!?\n]{10,50})")
        .expect("activity pattern is valid")
});

static EAT_AT_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\beat at\s+([^,.;:!?\n]{4,30})").expect("restaurant pattern is valid")
});

static NAMED_RESTAURANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][\w'&]+(?:\s+[A-Z][\w'&]+){0,2})\s+(?:[Rr]estaurant|[Cc]af[eé]|[Bb]istro|[Tt]rattoria)\b")
        .expect("named restaurant pattern is valid")
});

static DURATION_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*(?:-\s*\d+(?:\.\d+)?\s*)?(?:hours?|minutes?|mins?)\b|\b(?:half|full)[ -]day\b")
        .expect("duration phrase pattern is valid")
});

const TIP_MARKERS: [&str; 6] = ["tip", "avoid", "make sure", "remember", "don't forget", "note:"];
const CUISINES: [&str; 10] = [
    "italian", "mexican", "chinese", "japanese", "thai", "french", "indian", "greek",
    "american", "local",
];

#[derive(Debug, Clone)]
pub struct BlogSite {
    pub name: String,
    pub base_url: Url,
}

impl BlogSite {
    pub fn new(name: impl Into<String>, base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Internal(format!("invalid blog url {}: {}", base_url, e)))?;
        Ok(Self {
            name: name.into(),
            base_url,
        })
    }

    fn search_url(&self, destination: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("/");
        url.query_pairs_mut().clear().append_pair("s", destination);
        url
    }
}

pub fn default_blogs() -> Result<Vec<BlogSite>, AppError> {
    DEFAULT_BLOGS
        .iter()
        .map(|(name, url)| BlogSite::new(*name, url))
        .collect()
}

pub struct BlogScraper {
    client: reqwest::Client,
    sites: Vec<BlogSite>,
    max_articles: usize,
    // shared across sites
    permits: Semaphore,
}

impl BlogScraper {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        Self::with_sites(timeout, default_blogs()?)
    }

    pub fn with_sites(timeout: Duration, sites: Vec<BlogSite>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("DreamTravels/0.1 (travel itinerary planner)")
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build blog client: {}", e)))?;

        Ok(Self {
            client,
            sites,
            max_articles: MAX_ARTICLES_PER_BLOG,
            permits: Semaphore::new(MAX_CONCURRENT_FETCHES),
        })
    }

    async fn get_html(&self, url: Url) -> Result<String, AppError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| AppError::Internal(format!("blog fetch permits closed: {}", e)))?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(
                url.host_str().unwrap_or("blog"),
                format!("HTTP {} for {}", status, url),
            ));
        }
        Ok(response.text().await?)
    }

    async fn scrape_site(
        &self,
        site: &BlogSite,
        destination: &str,
    ) -> Result<SourceBundle, AppError> {
        let search_page = self.get_html(site.search_url(destination)).await?;
        let links =
            extract_article_links(&search_page, &site.base_url, destination, self.max_articles)?;
        debug!("{} has {} articles for {}", site.name, links.len(), destination);

        let pages = join_all(links.iter().map(|link| self.get_html(link.clone()))).await;

        let mut bundle = SourceBundle::default();
        for (link, page) in links.iter().zip(pages) {
            let html = match page {
                Ok(html) => html,
                Err(e) => {
                    debug!("Skipping article {}: {}", link, e);
                    continue;
                }
            };
            let text = article_text(&html)?;
            bundle.activities.extend(extract_activities(
                &text,
                destination,
                &site.name,
                link.as_str(),
            ));
            bundle.restaurants.extend(extract_restaurants(&text, link.as_str()));
            bundle.local_tips.extend(extract_tips(&text));
        }

        Ok(bundle)
    }
}

#[async_trait]
impl ActivitySource for BlogScraper {
    fn name(&self) -> &str {
        "travel-blogs"
    }

    async fn fetch(
        &self,
        destination: &str,
        _interests: &[String],
    ) -> Result<SourceBundle, AppError> {
        let results = join_all(
            self.sites
                .iter()
                .map(|site| self.scrape_site(site, destination)),
        )
        .await;

        let mut bundle = SourceBundle::default();
        let mut failures = 0;
        for (site, result) in self.sites.iter().zip(results) {
            match result {
                Ok(found) => bundle.merge(found),
                Err(e) => {
                    failures += 1;
                    warn!("Blog {} failed for {}: {}", site.name, destination, e);
                }
            }
        }

        if !self.sites.is_empty() && failures == self.sites.len() {
            return Err(AppError::upstream(
                "travel-blogs",
                format!("all {} blogs failed", failures),
            ));
        }

        info!(
            "Scraped {} activities, {} restaurants and {} tips for {}",
            bundle.activities.len(),
            bundle.restaurants.len(),
            bundle.local_tips.len(),
            destination
        );
        Ok(bundle)
    }
}

fn selector(css: &str) -> Result<Selector, AppError> {
    Selector::parse(css).map_err(|e| AppError::Internal(format!("bad selector {}: {}", css, e)))
}

/// Article links on a search results page whose title mentions the
/// destination.
pub fn extract_article_links(
    html: &str,
    base: &Url,
    destination: &str,
    limit: usize,
) -> Result<Vec<Url>, AppError> {
    let document = Html::parse_document(html);
    let links = selector(".entry-title a, .post-title a, .article-title a, h2 a, h3 a, article a")?;

    let destination = destination.to_lowercase();
    let words: Vec<&str> = destination
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2)
        .collect();

    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for element in document.select(&links) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let title = element.text().collect::<String>().to_lowercase();
        let relevant = title.contains(&destination) || words.iter().any(|w| title.contains(w));
        if !relevant {
            continue;
        }
        let Ok(url) = base.join(href) else {
            continue;
        };
        if url.scheme().starts_with("http") && seen.insert(url.to_string()) {
            found.push(url);
            if found.len() >= limit {
                break;
            }
        }
    }

    Ok(found)
}

/// Main article text, one block per paragraph or list item.
pub fn article_text(html: &str) -> Result<String, AppError> {
    let document = Html::parse_document(html);
    let blocks = selector("p, li, h2, h3")?;

    let mut content = None;
    for css in [".entry-content", ".post-content", ".article-content", "article", "main", "body"] {
        let container = selector(css)?;
        if let Some(element) = document.select(&container).next() {
            content = Some(element);
            break;
        }
    }
    let Some(content) = content else {
        return Ok(String::new());
    };

    let text = content
        .select(&blocks)
        .map(|block| {
            block
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(text)
}

fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| matches!(c, '.' | '!' | '?' | '\n'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(0xcbf29ce484222325, |hash, b| {
        (hash ^ b as u64).wrapping_mul(0x100000001b3)
    })
}

/// A point near the destination centre, stable for a given activity name.
pub fn approximate_location(destination: &str, name: &str) -> Option<Coordinates> {
    let centre = destination_catalog::find_destination(destination)?.coordinates;
    let hash = fnv1a(&name.to_lowercase());
    let unit = |bits: u64| (bits & 0xffff) as f64 / 65535.0 - 0.5;

    Some(Coordinates {
        lat: centre.lat + unit(hash) * 2.0 * LOCATION_JITTER_DEGREES,
        lng: centre.lng + unit(hash >> 16) * 2.0 * LOCATION_JITTER_DEGREES,
    })
}

pub fn extract_activities(
    text: &str,
    destination: &str,
    blog: &str,
    source_url: &str,
) -> Vec<RawActivity> {
    let mut seen = HashSet::new();
    let mut activities = Vec::new();

    for sentence in sentences(text) {
        if sentence.chars().count() <= 20 {
            continue;
        }
        let Some(caps) = ACTIVITY_PHRASE.captures(sentence) else {
            continue;
        };
        let Some(phrase) = caps.get(1) else {
            continue;
        };
        let name = title_case(phrase.as_str().trim());
        if !seen.insert(name.to_lowercase()) {
            continue;
        }

        activities.push(RawActivity {
            location: approximate_location(destination, &name),
            name: Some(name),
            category: None,
            description: Some(truncate_chars(sentence, 200)),
            address: None,
            estimated_duration: DURATION_PHRASE
                .find(sentence)
                .map(|m| m.as_str().to_string()),
            best_time: None,
            solo_female_notes: None,
            source: Some(blog.to_string()),
            source_url: Some(source_url.to_string()),
        });
        if activities.len() >= MAX_ACTIVITIES_PER_ARTICLE {
            break;
        }
    }

    activities
}

fn price_range(context: &str) -> Option<String> {
    let context = context.to_lowercase();
    let tier = if ["cheap", "budget", "affordable"].iter().any(|w| context.contains(w)) {
        "budget"
    } else if ["expensive", "luxury", "high-end"].iter().any(|w| context.contains(w)) {
        "luxury"
    } else if ["moderate", "mid-range"].iter().any(|w| context.contains(w)) {
        "mid-range"
    } else {
        return None;
    };
    Some(tier.to_string())
}

fn cuisine(context: &str) -> Option<String> {
    let context = context.to_lowercase();
    CUISINES
        .iter()
        .find(|c| context.contains(*c))
        .map(|c| title_case(c))
}

pub fn extract_restaurants(text: &str, source_url: &str) -> Vec<Restaurant> {
    let mut seen = HashSet::new();
    let mut restaurants = Vec::new();

    for sentence in sentences(text) {
        let names = EAT_AT_PHRASE
            .captures_iter(sentence)
            .chain(NAMED_RESTAURANT.captures_iter(sentence))
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()));

        for name in names {
            if name.chars().count() < 4 || !seen.insert(name.to_lowercase()) {
                continue;
            }
            restaurants.push(Restaurant {
                name: title_case(&name),
                description: truncate_chars(sentence, 200),
                cuisine_type: cuisine(sentence),
                price_range: price_range(sentence),
                source_url: Some(source_url.to_string()),
            });
        }
        if restaurants.len() >= MAX_RESTAURANTS_PER_ARTICLE {
            restaurants.truncate(MAX_RESTAURANTS_PER_ARTICLE);
            break;
        }
    }

    restaurants
}

pub fn extract_tips(text: &str) -> Vec<String> {
    sentences(text)
        .filter(|s| (20..=200).contains(&s.chars().count()))
        .filter(|s| {
            let lower = s.to_lowercase();
            TIP_MARKERS.iter().any(|m| lower.contains(m))
        })
        .map(str::to_string)
        .take(MAX_TIPS_PER_ARTICLE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"
        <html><body>
          <h2 class="entry-title"><a href="/paris-travel-guide/">The Ultimate Paris Travel Guide</a></h2>
          <h2 class="entry-title"><a href="https://example.com/rome/">Three Days in Rome</a></h2>
          <h3><a href="/best-of-paris">Best of Paris for First Timers</a></h3>
          <h3><a href="/best-of-paris">Best of Paris for First Timers</a></h3>
        </body></html>
    "#;

    const ARTICLE: &str = r#"
        <html><body>
          <nav><p>Subscribe to our newsletter</p></nav>
          <div class="entry-content">
            <p>On your first morning, visit the Musée de l'Orangerie early, it takes about 2 hours and the Monet rooms are worth it.</p>
            <p>In the afternoon explore the Canal Saint-Martin neighbourhood on foot.</p>
            <p>For dinner, eat at Le Petit Cler, a cheap local favourite. Bouillon Chartier Restaurant serves classic French dishes.</p>
            <ul><li>Top tip: buy the museum pass before you arrive to skip the ticket lines.</li></ul>
            <p>Avoid the restaurants right next to the big monuments.</p>
          </div>
        </body></html>
    "#;

    #[test]
    fn finds_relevant_article_links() {
        let base = Url::parse("https://blog.example.com").unwrap();
        let links = extract_article_links(SEARCH_PAGE, &base, "Paris", 3).unwrap();
        let links: Vec<String> = links.iter().map(Url::to_string).collect();
        assert_eq!(
            links,
            vec![
                "https://blog.example.com/paris-travel-guide/".to_string(),
                "https://blog.example.com/best-of-paris".to_string(),
            ]
        );
    }

    #[test]
    fn article_text_prefers_content_container() {
        let text = article_text(ARTICLE).unwrap();
        assert!(text.contains("Musée de l'Orangerie"));
        assert!(!text.contains("newsletter"));
    }

    #[test]
    fn extracts_activities_with_durations() {
        let text = article_text(ARTICLE).unwrap();
        let activities = extract_activities(&text, "Paris", "blog", "https://blog.example.com/a");
        let names: Vec<&str> = activities.iter().filter_map(|a| a.name.as_deref()).collect();
        assert!(names.contains(&"The Musée De L'Orangerie Early"));
        assert!(names.contains(&"The Canal Saint-Martin Neighbourhood On Foot"));

        let orangerie = &activities[0];
        assert_eq!(orangerie.estimated_duration.as_deref(), Some("2 hours"));
        assert_eq!(orangerie.source.as_deref(), Some("blog"));
        assert!(orangerie.location.is_some());
    }

    #[test]
    fn extracts_restaurants_and_tips() {
        let text = article_text(ARTICLE).unwrap();
        let restaurants = extract_restaurants(&text, "https://blog.example.com/a");
        let names: Vec<&str> = restaurants.iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"Le Petit Cler"));
        assert!(names.contains(&"Bouillon Chartier"));

        let petit = restaurants.iter().find(|r| r.name == "Le Petit Cler").unwrap();
        assert_eq!(petit.price_range.as_deref(), Some("budget"));
        assert_eq!(petit.cuisine_type.as_deref(), Some("Local"));

        let tips = extract_tips(&text);
        assert_eq!(tips.len(), 2);
        assert!(tips[0].starts_with("Top tip"));
    }

    #[test]
    fn approximate_location_is_stable_and_near_centre() {
        let a = approximate_location("Paris", "Canal Walk").unwrap();
        let b = approximate_location("paris", "canal walk").unwrap();
        assert_eq!(a, b);
        assert!((a.lat - 48.8566).abs() <= LOCATION_JITTER_DEGREES);
        assert!((a.lng - 2.3522).abs() <= LOCATION_JITTER_DEGREES);
        assert!(approximate_location("Atlantis", "Anything").is_none());
    }
}
