//! State types for the seller intake flow.
//!
//! Every seller is tracked by a single [`SellerRecord`] keyed on their
//! Telegram sender id. The record stores which question the seller is
//! currently answering ([`IntakeStep`]) plus the answers captured so far.
//! The types here are intentionally narrow so that illegal combinations
//! are hard to represent.

use std::fmt;

/// Stable identifier for a message sender, as reported by the transport.
///
/// Kept as a string rather than an integer so the rest of the crate never
/// has to care how the transport encodes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SenderId(pub String);

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SenderId {
    fn from(id: String) -> Self {
        SenderId(id)
    }
}

impl From<&str> for SenderId {
    fn from(id: &str) -> Self {
        SenderId(id.to_string())
    }
}

/// Opaque handle to an already-uploaded photo.
///
/// The bot never downloads image bytes; it forwards this identifier and the
/// transport resolves it on its side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoId(pub String);

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PhotoId {
    fn from(id: String) -> Self {
        PhotoId(id)
    }
}

impl From<&str> for PhotoId {
    fn from(id: &str) -> Self {
        PhotoId(id.to_string())
    }
}

/// The question a seller is currently being asked.
///
/// `Idle` doubles as "no active conversation": a seller whose record is
/// absent behaves exactly like one parked at `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStep {
    Idle,
    Phone,
    ShopName,
    Location,
    Title,
    Description,
    Material,
    MinOrder,
    Price,
    Photo,
    Feedback,
}

impl IntakeStep {
    /// Stored representation of the step.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeStep::Idle => "IDLE",
            IntakeStep::Phone => "PHONE",
            IntakeStep::ShopName => "SHOP_NAME",
            IntakeStep::Location => "LOCATION",
            IntakeStep::Title => "TITLE",
            IntakeStep::Description => "DESCRIPTION",
            IntakeStep::Material => "MATERIAL",
            IntakeStep::MinOrder => "MIN_ORDER",
            IntakeStep::Price => "PRICE",
            IntakeStep::Photo => "PHOTO",
            IntakeStep::Feedback => "FEEDBACK",
        }
    }

    /// Parse a stored step string. Callers decide how to treat unknown
    /// values; the repository maps them to `Idle`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IDLE" => Some(IntakeStep::Idle),
            "PHONE" => Some(IntakeStep::Phone),
            "SHOP_NAME" => Some(IntakeStep::ShopName),
            "LOCATION" => Some(IntakeStep::Location),
            "TITLE" => Some(IntakeStep::Title),
            "DESCRIPTION" => Some(IntakeStep::Description),
            "MATERIAL" => Some(IntakeStep::Material),
            "MIN_ORDER" => Some(IntakeStep::MinOrder),
            "PRICE" => Some(IntakeStep::Price),
            "PHOTO" => Some(IntakeStep::Photo),
            "FEEDBACK" => Some(IntakeStep::Feedback),
            _ => None,
        }
    }
}

impl fmt::Display for IntakeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything the bot knows about one seller.
///
/// Field values are plain strings where the empty string means "not
/// captured yet". Phone number, shop name and location survive across
/// submissions; the product fields are cleared whenever a new submission
/// starts or finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerRecord {
    pub sender_id: SenderId,
    pub step: IntakeStep,
    pub phone_number: String,
    pub shop_name: String,
    pub location: String,
    pub title: String,
    pub description: String,
    pub material: String,
    pub min_order: String,
    pub price: String,
}

impl SellerRecord {
    /// Fresh record for a seller we have never heard from.
    pub fn new(sender_id: SenderId) -> Self {
        SellerRecord {
            sender_id,
            step: IntakeStep::Idle,
            phone_number: String::new(),
            shop_name: String::new(),
            location: String::new(),
            title: String::new(),
            description: String::new(),
            material: String::new(),
            min_order: String::new(),
            price: String::new(),
        }
    }

    /// A seller who already completed the profile questions once.
    /// Shop name is the marker: it is only ever set by finishing the
    /// profile portion of a submission.
    pub fn is_returning_seller(&self) -> bool {
        !self.shop_name.is_empty()
    }

    /// Drop the per-product answers while keeping the seller profile.
    pub fn clear_product_fields(&mut self) {
        self.title = String::new();
        self.description = String::new();
        self.material = String::new();
        self.min_order = String::new();
        self.price = String::new();
    }
}
