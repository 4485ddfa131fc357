//! Creature records and the catalog payload they are decoded from.
//!
//! [`ApiPokemon`] mirrors the slice of the PokéAPI `/pokemon/{id}` schema the
//! tool consumes. Everything else in the payload is ignored. Converting it
//! into a [`Record`] normalizes display strings and flattens the sprite tree
//! into an ordered list of image candidates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A fetched creature, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Catalog id (national dex number).
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Categorical tags (types), in catalog slot order.
    pub tags: Vec<String>,
    /// Ability names, in catalog slot order.
    pub abilities: Vec<String>,
    /// Named base stats keyed by catalog stat name (`hp`, `attack`, ...).
    pub attributes: BTreeMap<String, u32>,
    /// Height in decimetres.
    pub height: Option<u32>,
    /// Weight in hectograms.
    pub weight: Option<u32>,
    /// Image candidates in order of preference. Entries may be empty.
    pub images: Vec<String>,
}

impl Record {
    /// Create a record with only an id and a name.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tags: Vec::new(),
            abilities: Vec::new(),
            attributes: BTreeMap::new(),
            height: None,
            weight: None,
            images: Vec::new(),
        }
    }

    /// Set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the abilities.
    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    /// Set a single named attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: u32) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Set height (decimetres) and weight (hectograms).
    pub fn with_size(mut self, height: u32, weight: u32) -> Self {
        self.height = Some(height);
        self.weight = Some(weight);
        self
    }

    /// Set the image candidates.
    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    /// Look up a named attribute.
    pub fn attribute(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    /// Tags joined for display, e.g. `Grass / Poison`.
    pub fn tags_label(&self) -> Option<String> {
        let shown: Vec<&str> = self
            .tags
            .iter()
            .map(String::as_str)
            .filter(|t| !t.trim().is_empty())
            .collect();
        if shown.is_empty() {
            None
        } else {
            Some(shown.join(" / "))
        }
    }
}

/// The subset of a PokéAPI `/pokemon/{id}` response the tool reads.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPokemon {
    /// National dex number.
    pub id: u32,
    /// Lowercase, hyphenated catalog name.
    pub name: String,
    /// Height in decimetres.
    #[serde(default)]
    pub height: Option<u32>,
    /// Weight in hectograms.
    #[serde(default)]
    pub weight: Option<u32>,
    /// Type slots.
    #[serde(default)]
    pub types: Vec<ApiTypeSlot>,
    /// Ability slots.
    #[serde(default)]
    pub abilities: Vec<ApiAbilitySlot>,
    /// Base stats.
    #[serde(default)]
    pub stats: Vec<ApiStat>,
    /// Sprite URLs.
    #[serde(default)]
    pub sprites: Option<ApiSprites>,
}

/// A named API resource reference.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiNamed {
    /// Resource name.
    pub name: String,
}

/// One entry of `types`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTypeSlot {
    /// The referenced type.
    #[serde(rename = "type")]
    pub kind: ApiNamed,
}

/// One entry of `abilities`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiAbilitySlot {
    /// The referenced ability.
    pub ability: ApiNamed,
}

/// One entry of `stats`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStat {
    /// Base value of the stat.
    pub base_stat: u32,
    /// The referenced stat.
    pub stat: ApiNamed,
}

/// The `sprites` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSprites {
    /// Default front sprite.
    #[serde(default)]
    pub front_default: Option<String>,
    /// Shiny front sprite.
    #[serde(default)]
    pub front_shiny: Option<String>,
    /// Alternative artwork collections.
    #[serde(default)]
    pub other: Option<ApiOtherSprites>,
}

/// The `sprites.other` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiOtherSprites {
    /// Official artwork.
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<ApiArtwork>,
    /// Pokémon HOME renders.
    #[serde(default)]
    pub home: Option<ApiArtwork>,
}

/// A single artwork entry with a front image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiArtwork {
    /// Front image URL.
    #[serde(default)]
    pub front_default: Option<String>,
}

impl ApiSprites {
    /// Image URLs in order of preference: front, shiny, official artwork, HOME.
    pub fn candidates(&self) -> Vec<String> {
        let other = self.other.as_ref();
        let artwork = other
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.clone());
        let home = other
            .and_then(|o| o.home.as_ref())
            .and_then(|a| a.front_default.clone());

        [
            self.front_default.clone(),
            self.front_shiny.clone(),
            artwork,
            home,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl From<ApiPokemon> for Record {
    fn from(api: ApiPokemon) -> Self {
        let attributes = api
            .stats
            .iter()
            .map(|s| (s.stat.name.clone(), s.base_stat))
            .collect();

        Self {
            id: api.id,
            name: title_case(&api.name),
            tags: api.types.iter().map(|t| title_case(&t.kind.name)).collect(),
            abilities: api
                .abilities
                .iter()
                .map(|a| title_case(&a.ability.name).replace('-', " "))
                .collect(),
            attributes,
            height: api.height,
            weight: api.weight,
            images: api
                .sprites
                .as_ref()
                .map(ApiSprites::candidates)
                .unwrap_or_default(),
        }
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
///
/// `"mr-mime"` becomes `"Mr-Mime"` and `"porygon2"` becomes `"Porygon2"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
