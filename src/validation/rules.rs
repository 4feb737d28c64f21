//! Field rules and the constraint vocabulary used by the schema tables.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("Invalid regex"));
static CURRENCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("Invalid regex"));
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid regex"));
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://\S+$").expect("Invalid regex"));
static HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("Invalid regex"));

/// Whether a schema is checking a new document or changes to an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Creating a resource.
    Create,
    /// Updating a resource that already exists.
    Update,
}

/// When a field must be present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    /// Required in every mode.
    Always,
    /// Required when creating, optional when updating.
    OnCreate,
    /// Required when updating, optional when creating.
    OnUpdate,
    /// Never required; checked only when present.
    Optional,
    /// Required whenever the named sibling field is present.
    With(&'static str),
}

impl Presence {
    pub(crate) const fn required_in(self, mode: Mode) -> bool {
        matches!(
            (self, mode),
            (Self::Always, _) | (Self::OnCreate, Mode::Create) | (Self::OnUpdate, Mode::Update)
        )
    }

    /// Like [`Self::required_in`], also resolving [`Self::With`] against
    /// the object holding the field.
    pub(crate) fn required_for(self, mode: Mode, object: &Value) -> bool {
        match self {
            Self::With(sibling) => object.get(sibling).is_some_and(|value| !value.is_null()),
            other => other.required_in(mode),
        }
    }
}

/// The JSON shape a field must have.
#[derive(Clone, Copy, Debug)]
pub enum ValueKind {
    /// A string. Required text must not be blank.
    Text,
    /// A whole number.
    Integer,
    /// Any number.
    Number,
    /// A number or a numeric string, such as a price.
    Decimal,
    /// `true` or `false`.
    Boolean,
    /// A positive numeric id or a non-empty id string.
    Identifier,
    /// An array of strings.
    TextList,
    /// An array of objects, each checked against the nested rules.
    ListOf(&'static [FieldRule]),
    /// An object checked against the nested rules.
    Object(&'static [FieldRule]),
}

impl ValueKind {
    pub(crate) const fn describe(self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Integer => "an integer",
            Self::Number => "a number",
            Self::Decimal => "a decimal number or numeric string",
            Self::Boolean => "a boolean",
            Self::Identifier => "an identifier",
            Self::TextList => "a list of strings",
            Self::ListOf(_) => "a list",
            Self::Object(_) => "an object",
        }
    }
}

/// The named regular expressions a string field can be held to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    /// A non-negative decimal with at most two fraction digits.
    Price,
    /// An ISO 4217 currency code.
    Currency,
    /// An email address.
    Email,
    /// An `http` or `https` URL.
    Url,
    /// A lowercase, hyphen-separated handle.
    Handle,
}

impl PatternKind {
    pub(crate) fn regex(self) -> &'static Regex {
        match self {
            Self::Price => &*PRICE,
            Self::Currency => &*CURRENCY,
            Self::Email => &*EMAIL,
            Self::Url => &*URL,
            Self::Handle => &*HANDLE,
        }
    }

    pub(crate) const fn describe(self) -> &'static str {
        match self {
            Self::Price => "a decimal amount with at most two fraction digits",
            Self::Currency => "a three-letter uppercase currency code",
            Self::Email => "a valid email address",
            Self::Url => "an http(s) URL",
            Self::Handle => "a lowercase handle (letters, digits, hyphens)",
        }
    }
}

/// An additional restriction on a field's value.
#[derive(Clone, Copy, Debug)]
pub enum Constraint {
    /// The value must be one of the listed strings.
    OneOf(&'static [&'static str]),
    /// The value's string form must match a named pattern.
    Pattern(PatternKind),
}

/// One row of a schema table.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    /// Field name at this nesting level.
    pub name: &'static str,
    /// When the field is required.
    pub presence: Presence,
    /// The shape the value must have.
    pub kind: ValueKind,
    /// An optional restriction on the value.
    pub constraint: Option<Constraint>,
}

impl FieldRule {
    /// Creates a rule with no constraint.
    #[must_use]
    pub const fn new(name: &'static str, presence: Presence, kind: ValueKind) -> Self {
        Self {
            name,
            presence,
            kind,
            constraint: None,
        }
    }

    /// Restricts the value to one of `values`.
    #[must_use]
    pub const fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.constraint = Some(Constraint::OneOf(values));
        self
    }

    /// Restricts the value to a named pattern.
    #[must_use]
    pub const fn pattern(mut self, pattern: PatternKind) -> Self {
        self.constraint = Some(Constraint::Pattern(pattern));
        self
    }
}
