/// Data models for Purrr.love API types.
///
/// Response models deserialize from the `data` payload of an API response.
/// Timestamps are RFC 3339 strings on the wire; money amounts are JSON numbers
/// held as [`Decimal`].
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open-ended request fields merged into a JSON body.
pub type Params = Map<String, Value>;

fn default_one() -> u32 {
    1
}

fn default_full() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "USD".into()
}

fn default_offer_status() -> String {
    "pending".into()
}

fn default_show_status() -> String {
    "upcoming".into()
}

fn default_session_status() -> String {
    "active".into()
}

fn default_show_capacity() -> u32 {
    100
}

fn default_room_capacity() -> u32 {
    20
}

fn default_role() -> String {
    "user".into()
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// The wire name of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Cat personality types.
    PersonalityType {
        Playful => "playful",
        Shy => "shy",
        Aggressive => "aggressive",
        Calm => "calm",
        Curious => "curious",
        Independent => "independent",
        Social => "social",
        Lazy => "lazy",
    }
}

wire_enum! {
    /// Cat mood states.
    MoodState {
        Happy => "happy",
        Excited => "excited",
        Calm => "calm",
        Sleepy => "sleepy",
        Playful => "playful",
        Hungry => "hungry",
        Irritated => "irritated",
        Sick => "sick",
    }
}

wire_enum! {
    /// Common cat breeds.
    #[derive(Default)]
    CatBreed {
        Persian => "persian",
        Siamese => "siamese",
        MaineCoon => "maine_coon",
        Ragdoll => "ragdoll",
        Bengal => "bengal",
        BritishShorthair => "british_shorthair",
        Abyssinian => "abyssinian",
        RussianBlue => "russian_blue",
        #[default]
        Mixed => "mixed",
    }
}

wire_enum! {
    /// Games a cat can play.
    GameType {
        MouseHunt => "mouse_hunt",
        YarnChase => "yarn_chase",
        CatTowerClimbing => "cat_tower_climbing",
        BirdWatching => "bird_watching",
        LaserPointer => "laser_pointer",
        CatPuzzleBox => "cat_puzzle_box",
        StringMaze => "string_maze",
        BoxFort => "box_fort",
        CatnipFrenzy => "catnip_frenzy",
        LaserTag => "laser_tag",
    }
}

wire_enum! {
    /// Kinds of care.
    CareType {
        Feeding => "feeding",
        Grooming => "grooming",
        Playing => "playing",
        Training => "training",
        VetVisit => "vet_visit",
        Cleaning => "cleaning",
        Exercise => "exercise",
    }
}

// ---------------------------------------------------------------------------
// Cats
// ---------------------------------------------------------------------------

/// A virtual cat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    pub id: i64,
    pub name: String,
    pub species: String,
    /// Free text: the server also reports breeds outside [`CatBreed`].
    /// Compare with [`CatBreed::as_str`].
    pub breed: String,
    pub personality_type: PersonalityType,
    pub mood: MoodState,
    #[serde(default = "default_one")]
    pub level: u32,
    #[serde(default)]
    pub experience: u64,
    #[serde(default = "default_full")]
    pub health: u32,
    #[serde(default = "default_full")]
    pub hunger: u32,
    #[serde(default = "default_full")]
    pub happiness: u32,
    #[serde(default = "default_full")]
    pub energy: u32,
    #[serde(default)]
    pub age_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_profile: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vr_behavior: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub health_devices: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trading_status: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub show_participation: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplayer_status: Option<Value>,
}

/// Body of `POST /api/v1/cats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCat {
    pub name: String,
    pub species: String,
    pub personality_type: PersonalityType,
    pub breed: CatBreed,
}

impl NewCat {
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        personality_type: PersonalityType,
    ) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            personality_type,
            breed: CatBreed::default(),
        }
    }

    pub fn breed(mut self, breed: CatBreed) -> Self {
        self.breed = breed;
        self
    }
}

/// Body of `PUT /api/v1/cats/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<CatBreed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality_type: Option<PersonalityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodState>,
    /// Any further fields the API accepts.
    #[serde(flatten)]
    pub extra: Params,
}

impl CatUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.breed.is_none()
            && self.personality_type.is_none()
            && self.mood.is_none()
            && self.extra.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Users & API keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    pub name: String,
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_whitelist: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// True if the key has an expiry at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

/// Body of `POST /api/v1/keys`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewApiKey {
    pub name: String,
    pub scopes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Trading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingOffer {
    pub id: i64,
    pub seller_id: i64,
    pub cat_id: i64,
    pub price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_offer_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cat_details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/v1/trading/offers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTradingOffer {
    pub cat_id: i64,
    pub price: Decimal,
    pub description: String,
    pub currency: String,
}

impl NewTradingOffer {
    pub fn new(cat_id: i64, price: Decimal) -> Self {
        Self {
            cat_id,
            price,
            description: String::new(),
            currency: default_currency(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatShow {
    pub id: i64,
    pub name: String,
    pub organizer_id: i64,
    pub show_type: String,
    pub categories: Vec<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default = "default_show_status")]
    pub status: String,
    #[serde(default = "default_show_capacity")]
    pub max_participants: u32,
    #[serde(default)]
    pub entry_fee: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prizes: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
}

impl CatShow {
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants as usize
    }
}

// ---------------------------------------------------------------------------
// VR, health and multiplayer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VrInteraction {
    pub session_id: String,
    pub cat_id: i64,
    pub user_id: i64,
    pub interaction_type: String,
    pub interaction_data: Value,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDevice {
    pub id: i64,
    pub cat_id: i64,
    pub device_type: String,
    pub device_name: String,
    pub device_data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reading: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplayerSession {
    pub session_id: String,
    pub room_type: String,
    pub participants: Vec<Value>,
    #[serde(default = "default_room_capacity")]
    pub max_participants: u32,
    #[serde(default = "default_session_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_settings: Option<Value>,
    #[serde(default)]
    pub activities: Vec<String>,
}
