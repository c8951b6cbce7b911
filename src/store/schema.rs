use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// Storage slot holding the whole library. The format is versioned by name
/// only; a layout change needs a new key.
pub const STORAGE_KEY: &str = "safety_flashcards_v1";

pub const DEFAULT_CATEGORIES: [&str; 3] = ["산업안전보건법", "산업안전일반", "기업진단지도"];

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub term: String,
    /// `data:` URL of the card image. Older saves call this `imageDataUrl`.
    #[serde(default, alias = "imageDataUrl")]
    pub image: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Card {
    pub fn new(id: String, term: &str, image: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            term: term.trim().to_string(),
            image: Some(image),
            created_at,
        }
    }
}

/// Card id in the form `<unix millis>-<random hex>`.
pub fn generate_card_id<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> String {
    // 52 random bits, the same entropy a float mantissa would carry.
    let suffix: u64 = rng.r#gen::<u64>() >> 12;
    format!("{}-{suffix:x}", now.timestamp_millis())
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored data is not a JSON object")]
    NotAnObject,
}

/// Category to ordered card list. Top-level keys that are not configured
/// categories are kept verbatim so a save never drops foreign data.
#[derive(Clone, Debug, PartialEq)]
pub struct Library {
    cards: BTreeMap<Category, Vec<Card>>,
    extra: Map<String, Value>,
}

impl Library {
    pub fn empty(categories: &[Category]) -> Self {
        Self {
            cards: categories.iter().map(|c| (c.clone(), Vec::new())).collect(),
            extra: Map::new(),
        }
    }

    /// Parse persisted text. Known categories whose value is not an array
    /// start empty. Malformed entries inside an array are skipped, so one bad
    /// record never costs the rest of the data.
    pub fn parse(raw: &str, categories: &[Category]) -> Result<Self, SchemaError> {
        let Value::Object(mut object) = serde_json::from_str::<Value>(raw)? else {
            return Err(SchemaError::NotAnObject);
        };

        let mut cards = BTreeMap::new();
        for category in categories {
            let list = match object.remove(category.as_str()) {
                Some(Value::Array(items)) => parse_cards(category, items),
                _ => Vec::new(),
            };
            cards.insert(category.clone(), list);
        }

        Ok(Self {
            cards,
            extra: object,
        })
    }

    pub fn cards(&self, category: &Category) -> &[Card] {
        self.cards.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self, category: &Category) -> usize {
        self.cards(category).len()
    }

    pub fn total_cards(&self) -> usize {
        self.cards.values().map(Vec::len).sum()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.cards.values().flatten().any(|card| card.id == id)
    }

    pub fn push(&mut self, category: &Category, card: Card) {
        self.cards.entry(category.clone()).or_default().push(card);
    }

    /// Remove the card with `id` from `category`, keeping the order of the rest.
    pub fn remove(&mut self, category: &Category, id: &str) -> Option<Card> {
        let list = self.cards.get_mut(category)?;
        let pos = list.iter().position(|card| card.id == id)?;
        Some(list.remove(pos))
    }

    pub fn extra_keys(&self) -> impl Iterator<Item = &str> {
        self.extra.keys().map(String::as_str)
    }
}

fn parse_cards(category: &Category, items: Vec<Value>) -> Vec<Card> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Card>(item) {
            Ok(card) => Some(card),
            Err(e) => {
                warn!(category = %category, index, error = %e, "skipping malformed card");
                None
            }
        })
        .collect()
}

impl Serialize for Library {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cards.len() + self.extra.len()))?;
        for (key, value) in &self.extra {
            if !self.cards.contains_key(key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        for (category, list) in &self.cards {
            map.serialize_entry(category, list)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn categories() -> Vec<Category> {
        DEFAULT_CATEGORIES.iter().map(|c| Category::new(*c)).collect()
    }

    fn card(id: &str, term: &str) -> Card {
        Card::new(
            id.to_string(),
            term,
            "data:image/png;base64,iVBORw0KGgo=".to_string(),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn empty_library_has_every_category() {
        let lib = Library::empty(&categories());
        for category in categories() {
            assert!(lib.cards(&category).is_empty());
        }
        assert_eq!(lib.total_cards(), 0);
    }

    #[test]
    fn parse_replaces_non_array_categories_and_keeps_extra_keys() {
        let raw = r#"{"산업안전보건법": "oops", "산업안전일반": null, "notes": {"a": 1}}"#;
        let lib = Library::parse(raw, &categories()).unwrap();
        assert_eq!(lib.len(&Category::new("산업안전보건법")), 0);
        assert_eq!(lib.len(&Category::new("산업안전일반")), 0);
        assert_eq!(lib.len(&Category::new("기업진단지도")), 0);
        assert_eq!(lib.extra_keys().collect::<Vec<_>>(), vec!["notes"]);

        let written = serde_json::to_value(&lib).unwrap();
        assert_eq!(written["notes"]["a"], 1);
        assert!(written["산업안전보건법"].as_array().unwrap().is_empty());
    }

    #[test]
    fn parse_reads_legacy_image_field() {
        let raw = r#"{"기업진단지도": [{
            "id": "1700000000000-abc",
            "term": "안전난간",
            "imageDataUrl": "data:image/png;base64,AAAA",
            "createdAt": "2024-01-05T10:00:00.000Z"
        }]}"#;
        let lib = Library::parse(raw, &categories()).unwrap();
        let cards = lib.cards(&Category::new("기업진단지도"));
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].image.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn parse_rejects_malformed_json_and_non_objects() {
        assert!(matches!(
            Library::parse("{not json", &categories()),
            Err(SchemaError::Json(_))
        ));
        assert!(matches!(
            Library::parse("[1, 2]", &categories()),
            Err(SchemaError::NotAnObject)
        ));
    }

    #[test]
    fn parse_skips_malformed_card_entries() {
        let good = serde_json::to_string(&card("a", "지게차")).unwrap();
        let raw = format!(r#"{{"산업안전일반": [{{"term": 5}}, {good}, {{"id": "b", "term": "x"}}]}}"#);
        let lib = Library::parse(&raw, &categories()).unwrap();
        let cards = lib.cards(&Category::new("산업안전일반"));
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].term, "지게차");
    }

    #[test]
    fn remove_keeps_relative_order() {
        let cat = Category::new("산업안전일반");
        let mut lib = Library::empty(&categories());
        lib.push(&cat, card("a", "지게차"));
        lib.push(&cat, card("b", "크레인"));
        lib.push(&cat, card("c", "안전모"));

        let removed = lib.remove(&cat, "b").unwrap();
        assert_eq!(removed.term, "크레인");
        let ids: Vec<_> = lib.cards(&cat).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(lib.remove(&cat, "missing").is_none());
    }

    #[test]
    fn card_new_trims_term() {
        assert_eq!(card("x", "  지게차 ").term, "지게차");
    }

    #[test]
    fn generated_ids_carry_timestamp_prefix() {
        let mut rng = SmallRng::seed_from_u64(7);
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let a = generate_card_id(now, &mut rng);
        let b = generate_card_id(now, &mut rng);
        assert!(a.starts_with(&format!("{}-", now.timestamp_millis())));
        assert_ne!(a, b);
    }
}
