use crate::{BingoError, DateKey};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered set of candidate labels for a card.
///
/// Duplicates are dropped on construction (first occurrence wins) so every
/// cell of a generated card is distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ItemPool {
    items: Vec<String>,
}

impl ItemPool {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .map(Into::into)
            .filter(|item: &String| seen.insert(item.clone()))
            .collect();
        Self { items }
    }

    /// Parse a pool from a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self, BingoError> {
        serde_json::from_str(json).map_err(BingoError::InvalidPool)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}

impl From<Vec<String>> for ItemPool {
    fn from(items: Vec<String>) -> Self {
        Self::new(items)
    }
}

impl From<ItemPool> for Vec<String> {
    fn from(pool: ItemPool) -> Self {
        pool.items
    }
}

/// Calendar season, used to vary the pool through the year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Meteorological season of a date (northern hemisphere)
    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Autumn => write!(f, "Autumn"),
            Season::Winter => write!(f, "Winter"),
        }
    }
}

/// Supplies the label pool for a given day.
pub trait PoolProvider {
    fn pool_for(&self, date: &DateKey) -> ItemPool;
}

/// A fixed pool serves every day unchanged.
impl PoolProvider for ItemPool {
    fn pool_for(&self, _date: &DateKey) -> ItemPool {
        self.clone()
    }
}

/// Year-round labels plus one extra list per season
#[derive(Debug, Clone, Default)]
pub struct SeasonalPool {
    pub universal: Vec<String>,
    pub spring: Vec<String>,
    pub summer: Vec<String>,
    pub autumn: Vec<String>,
    pub winter: Vec<String>,
}

impl SeasonalPool {
    /// The park label set the daily card ships with
    pub fn park() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            universal: owned(&[
                // Animals
                "Amsel",
                "Blesshuhn",
                "Ente",
                "Fisch",
                "Graureiher",
                "Hund",
                "Ratte",
                "Taube",
                // People
                "Banksitzer",
                "Fotograf",
                "Glatze",
                "Händchenhalter",
                "Raucher",
                "Schaukler",
                "Schwangere",
                "Selbe Person erneut",
                "Senior",
                "Telefonierer",
                "Zopf",
                // Sport
                "Fußballspieler",
                "Minigolfer",
                "Läufer",
                "Radfahrer",
                "Rollerfahrer",
                "Tischtennisspieler",
                // Things
                "2er-Kinderwagen",
                "Babytrage",
                "Buch",
                "Flugzeug",
                "Getränk",
                "Helm",
                "Hubschrauber",
                "Over-Ears",
                "Rollstuhl",
                "Rucksack",
            ]),
            spring: owned(&["Biene"]),
            summer: owned(&[
                "Eichhörnchen",
                "Badminton",
                "Frisbee",
                "Spikeball",
                "Campingstuhl",
                "Grill",
                "Picknick",
                "Regenbogen",
                "Schachspieler",
                "Schmetterling",
                "Wespe",
                "Wikinger Schach",
            ]),
            autumn: owned(&["Kastanie", "Regenschirm", "Fallendes Blatt"]),
            winter: owned(&["Mütze, Handschuhe", "Schneeflocke", "Schneemann"]),
        }
    }

    /// Universal labels followed by the season's own
    pub fn items(&self, season: Season) -> ItemPool {
        let extra = match season {
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Autumn => &self.autumn,
            Season::Winter => &self.winter,
        };
        ItemPool::new(self.universal.iter().chain(extra).cloned())
    }
}

impl PoolProvider for SeasonalPool {
    fn pool_for(&self, date: &DateKey) -> ItemPool {
        self.items(Season::of(date.date()))
    }
}
