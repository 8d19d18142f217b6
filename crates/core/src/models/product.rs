use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Image shown when a product has no usable image URL.
pub const PLACEHOLDER_IMAGE: &str = "img/card-back.png";

/// Flavor text shown when a card has none.
pub const DEFAULT_FLAVOR_TEXT: &str = "This rare card has no description...";

// ── Raw document shapes ─────────────────────────────────────────────
//
// These mirror the catalog JSON exactly. Every field is optional because
// the upstream data is inconsistent; `Product::from_raw` turns a raw entry
// into a fully-defaulted value once, at load time.

/// `hp` appears both as `"60"` and as `60` in the wild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawHp {
    Text(String),
    Number(i64),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawImages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAttack {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cost: Option<Vec<String>>,
    #[serde(default)]
    pub damage: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWeakness {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSet {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub printed_total: Option<u32>,
    #[serde(default)]
    pub images: Option<RawImages>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrices {
    #[serde(default)]
    pub average_sell_price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMarket {
    #[serde(default)]
    pub prices: Option<RawPrices>,
}

/// One catalog entry as it appears in the JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Option<RawImages>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub hp: Option<RawHp>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub subtypes: Option<Vec<String>>,
    #[serde(default)]
    pub evolves_from: Option<String>,
    #[serde(default)]
    pub attacks: Option<Vec<RawAttack>>,
    #[serde(default)]
    pub weaknesses: Option<Vec<RawWeakness>>,
    #[serde(default)]
    pub retreat_cost: Option<Vec<String>>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub set: Option<RawSet>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub cardmarket: Option<RawMarket>,
}

// ── Normalized product ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImages {
    pub small: String,
    pub large: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attack {
    pub name: String,
    /// Energy types required to use the attack; empty means free.
    pub cost: Vec<String>,
    pub damage: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weakness {
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSet {
    pub name: String,
    pub printed_total: Option<u32>,
    pub logo: Option<String>,
}

/// A catalog product with every field resolved. Immutable for the session
/// and uniquely identified by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub images: ProductImages,
    pub types: Vec<String>,
    pub hp: String,
    pub rarity: String,
    pub subtypes: Vec<String>,
    pub evolves_from: Option<String>,
    pub attacks: Vec<Attack>,
    pub weaknesses: Vec<Weakness>,
    pub retreat_cost: Vec<String>,
    pub artist: String,
    pub set: CardSet,
    pub number: String,
    pub flavor_text: String,
    pub base_price: Decimal,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl Product {
    /// Resolve a raw entry into a complete product.
    ///
    /// Returns `None` for entries without an `id`: they cannot be linked to
    /// or added to the cart.
    pub fn from_raw(raw: RawProduct, default_price: Decimal) -> Option<Self> {
        let id = non_empty(raw.id)?;

        let images = raw.images.unwrap_or_default();
        let large = non_empty(images.large);
        let small = non_empty(images.small);
        let images = ProductImages {
            small: small
                .clone()
                .or_else(|| large.clone())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            large: large
                .or(small)
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        };

        let hp = match raw.hp {
            Some(RawHp::Text(text)) if !text.trim().is_empty() => text,
            Some(RawHp::Number(n)) => n.to_string(),
            _ => "N/A".to_string(),
        };

        let attacks = raw
            .attacks
            .unwrap_or_default()
            .into_iter()
            .map(|a| Attack {
                name: a.name.unwrap_or_default(),
                cost: a.cost.unwrap_or_default(),
                damage: a.damage.unwrap_or_default(),
                text: a.text.unwrap_or_default(),
            })
            .collect();

        let weaknesses = raw
            .weaknesses
            .unwrap_or_default()
            .into_iter()
            .filter_map(|w| {
                Some(Weakness {
                    kind: non_empty(w.kind)?,
                    value: w.value.unwrap_or_default(),
                })
            })
            .collect();

        let set = raw.set.unwrap_or_default();
        let set = CardSet {
            name: non_empty(set.name).unwrap_or_else(|| "N/A".to_string()),
            printed_total: set.printed_total,
            logo: set.images.and_then(|i| non_empty(i.logo)),
        };

        let base_price = raw
            .cardmarket
            .and_then(|m| m.prices)
            .and_then(|p| p.average_sell_price)
            .filter(|p| p.is_finite() && *p >= 0.0)
            .and_then(Decimal::from_f64)
            .unwrap_or(default_price);

        Some(Self {
            id,
            name: non_empty(raw.name).unwrap_or_else(|| "Unknown".to_string()),
            images,
            types: raw.types.unwrap_or_default(),
            hp,
            rarity: non_empty(raw.rarity).unwrap_or_else(|| "Common".to_string()),
            subtypes: raw.subtypes.unwrap_or_default(),
            evolves_from: non_empty(raw.evolves_from),
            attacks,
            weaknesses,
            retreat_cost: raw.retreat_cost.unwrap_or_default(),
            artist: non_empty(raw.artist).unwrap_or_else(|| "Unknown".to_string()),
            set,
            number: raw.number.unwrap_or_default(),
            flavor_text: non_empty(raw.flavor_text)
                .unwrap_or_else(|| DEFAULT_FLAVOR_TEXT.to_string()),
            base_price,
        })
    }

    /// Lowercased first type, used by the grid for per-type theming.
    pub fn primary_type(&self) -> String {
        self.types
            .first()
            .map(|t| t.to_lowercase())
            .unwrap_or_else(|| "normal".to_string())
    }

    /// First subtype, or the generic card class.
    pub fn primary_subtype(&self) -> &str {
        self.subtypes.first().map(String::as_str).unwrap_or("Pokémon")
    }

    /// Collector number as printed on the card, e.g. `"4/102"`.
    pub fn set_number(&self) -> String {
        match self.set.printed_total {
            Some(total) => format!("{}/{}", self.number, total),
            None => self.number.clone(),
        }
    }

    /// Case-insensitive substring match against the product name.
    /// `needle` must already be lowercased.
    pub fn name_matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}
