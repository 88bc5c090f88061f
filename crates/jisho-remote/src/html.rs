use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use jisho_core::{LookupError, LookupMetadata, RemoteLookup};
use jisho_types::{Entry, JapaneseForm, Sense};
use scraper::{ElementRef, Html, Selector};

use crate::{build_client, check_status, transport_error};

/// One result block from the search page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedEntry {
    /// Readings over the kanji of `text`
    pub furigana: Vec<String>,
    pub text: String,
    pub meanings: Vec<Meaning>,
    pub is_common: bool,
    /// e.g. "JLPT N5"
    pub jlpt: Option<String>,
    /// e.g. "Wanikani level 5"
    pub wanikani_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meaning {
    pub definition: String,
    pub part_of_speech: String,
}

struct Selectors {
    block: Selector,
    representation: Selector,
    furigana: Selector,
    text: Selector,
    meanings: Selector,
    definition: Selector,
    meaning: Selector,
    status_tag: Selector,
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css}: {e}"))
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    block: selector(".concept_light.clearfix"),
    representation: selector(".concept_light-representation"),
    furigana: selector(".furigana .kanji"),
    text: selector(".text"),
    meanings: selector(".meanings-wrapper"),
    definition: selector(".meaning-definition"),
    meaning: selector(".meaning-meaning"),
    status_tag: selector(".concept_light-status .concept_light-tag"),
});

/// Scrapes the HTML search results page
#[derive(Clone)]
pub struct JishoScraper {
    client: reqwest::Client,
    base_url: String,
}

impl JishoScraper {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    fn search_url(&self, query: &str, page: u32) -> Result<reqwest::Url, LookupError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| LookupError::Network(format!("Invalid base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| LookupError::Network(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .push("search")
            .push(query);

        if page > 1 {
            url.query_pairs_mut()
                .append_pair("page", &page.to_string());
        }

        Ok(url)
    }

    /// Fetch the raw result blocks without normalizing them
    pub async fn scrape(&self, query: &str, page: u32) -> Result<Vec<ScrapedEntry>, LookupError> {
        let url = self.search_url(query, page)?;
        tracing::debug!("Scraping {}", url);

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        check_status(&response)?;

        let body = response.text().await.map_err(transport_error)?;
        Ok(parse_search_html(&body))
    }
}

#[async_trait]
impl RemoteLookup for JishoScraper {
    async fn fetch(&self, query: &str, page: u32) -> Result<Vec<Entry>, LookupError> {
        let scraped = self.scrape(query, page).await?;
        Ok(scraped.into_iter().map(Entry::from).collect())
    }

    fn metadata(&self) -> LookupMetadata {
        LookupMetadata {
            name: "jisho-html".to_string(),
            base_url: self.base_url.clone(),
        }
    }
}

/// Extract every word block that has a representation
pub fn parse_search_html(html: &str) -> Vec<ScrapedEntry> {
    let document = Html::parse_document(html);
    let selectors = &*SELECTORS;

    document
        .select(&selectors.block)
        .filter(|block| block.select(&selectors.representation).next().is_some())
        .map(|block| scrape_block(block, selectors))
        .collect()
}

fn scrape_block(block: ElementRef<'_>, selectors: &Selectors) -> ScrapedEntry {
    let status_tags: Vec<ElementRef<'_>> = block.select(&selectors.status_tag).collect();
    let labelled = |needle: &str| {
        status_tags
            .iter()
            .map(|tag| element_text(*tag))
            .find(|text| text.contains(needle))
    };

    ScrapedEntry {
        furigana: block
            .select(&selectors.furigana)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect(),
        text: block
            .select(&selectors.text)
            .next()
            .map(element_text)
            .unwrap_or_default(),
        meanings: block
            .select(&selectors.meanings)
            .next()
            .map(|wrapper| scrape_meanings(wrapper, selectors))
            .unwrap_or_default(),
        is_common: status_tags
            .iter()
            .any(|tag| has_class(*tag, "concept_light-common")),
        jlpt: labelled("JLPT"),
        wanikani_level: labelled("Wanikani"),
    }
}

/// Part-of-speech headers apply to the meanings that follow them
fn scrape_meanings(wrapper: ElementRef<'_>, selectors: &Selectors) -> Vec<Meaning> {
    let mut meanings = Vec::new();
    let mut part_of_speech = String::new();

    for child in wrapper.children().filter_map(ElementRef::wrap) {
        if has_class(child, "meaning-tags") {
            part_of_speech = element_text(child);
        } else if has_class(child, "meaning-wrapper") {
            let definition = child
                .select(&selectors.definition)
                .next()
                .and_then(|def| def.select(&selectors.meaning).next())
                .map(element_text)
                .unwrap_or_default();

            if !definition.is_empty() {
                meanings.push(Meaning {
                    definition,
                    part_of_speech: part_of_speech.clone(),
                });
            }
        }
    }

    meanings
}

fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Text content with whitespace collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || c == '々'
}

/// Rebuild the full reading from the furigana tokens and the kana in `text`
///
/// Tokens sit either over each kanji or over each run of kanji.
fn reading_from_furigana(text: &str, furigana: &[String]) -> String {
    let kanji_count = text.chars().filter(|&c| is_kanji(c)).count();
    let per_char = furigana.len() == kanji_count;
    let mut tokens = furigana.iter();
    let mut reading = String::new();
    let mut in_run = false;

    for c in text.chars() {
        if is_kanji(c) {
            if per_char || !in_run {
                if let Some(token) = tokens.next() {
                    reading.push_str(token);
                }
            }
            in_run = true;
        } else {
            reading.push(c);
            in_run = false;
        }
    }

    reading.extend(tokens.map(String::as_str));
    reading
}

impl From<ScrapedEntry> for Entry {
    fn from(scraped: ScrapedEntry) -> Self {
        let japanese = if scraped.furigana.is_empty() {
            JapaneseForm {
                word: None,
                reading: scraped.text.clone(),
            }
        } else {
            JapaneseForm {
                word: Some(scraped.text.clone()),
                reading: reading_from_furigana(&scraped.text, &scraped.furigana),
            }
        };

        // "JLPT N5" -> "jlpt-n5", matching the API's tags
        let jlpt = scraped
            .jlpt
            .map(|label| label.to_lowercase().replace(' ', "-"))
            .into_iter()
            .collect();

        let tags = scraped
            .wanikani_level
            .and_then(|label| {
                let level: String = label.chars().filter(char::is_ascii_digit).collect();
                (!level.is_empty()).then(|| format!("wanikani{level}"))
            })
            .into_iter()
            .collect();

        let senses = scraped
            .meanings
            .into_iter()
            .map(|meaning| Sense {
                english_definitions: vec![meaning.definition],
                parts_of_speech: meaning
                    .part_of_speech
                    .split(", ")
                    .filter(|pos| !pos.is_empty())
                    .map(str::to_string)
                    .collect(),
                ..Sense::default()
            })
            .collect();

        Entry {
            slug: scraped.text,
            is_common: scraped.is_common,
            tags,
            jlpt,
            japanese: vec![japanese],
            senses,
        }
    }
}
