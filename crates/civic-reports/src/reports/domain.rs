use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Problem type a report is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Pothole,
    Streetlight,
    Garbage,
    #[serde(rename = "Water Leakage")]
    WaterLeakage,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Pothole,
        Category::Streetlight,
        Category::Garbage,
        Category::WaterLeakage,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Category::Pothole => "Pothole",
            Category::Streetlight => "Streetlight",
            Category::Garbage => "Garbage",
            Category::WaterLeakage => "Water Leakage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "pothole" | "potholes" => Ok(Category::Pothole),
            "streetlight" | "streetlights" => Ok(Category::Streetlight),
            "garbage" => Ok(Category::Garbage),
            "waterleakage" => Ok(Category::WaterLeakage),
            _ => Err(UnknownVariant::new("category", raw)),
        }
    }
}

/// Resolution state of a report. New reports always start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReportStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportStatus {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "pending" => Ok(ReportStatus::Pending),
            "inprogress" => Ok(ReportStatus::InProgress),
            "resolved" => Ok(ReportStatus::Resolved),
            _ => Err(UnknownVariant::new("status", raw)),
        }
    }
}

/// Category selector where `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(expected) => expected == category,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().is_empty() || normalize(raw) == "all" {
            return Ok(CategoryFilter::All);
        }
        raw.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Status selector where `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReportStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ReportStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().is_empty() || normalize(raw) == "all" {
            return Ok(StatusFilter::All);
        }
        raw.parse().map(StatusFilter::Only)
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportStatus> for StatusFilter {
    fn from(value: ReportStatus) -> Self {
        StatusFilter::Only(value)
    }
}

/// Raised when a category, status or sort name does not match any variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Lowercases and strips separators so "Water Leakage", "water_leakage" and
/// "water-leakage" compare equal.
pub(crate) fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Where an attached photo lives. Bytes are never held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Remote,
    Blob,
    Inline,
}

impl ImageKind {
    pub const fn label(self) -> &'static str {
        match self {
            ImageKind::Remote => "remote",
            ImageKind::Blob => "blob",
            ImageKind::Inline => "inline",
        }
    }
}

/// Validated reference to a report photo: an http(s) URL, a `blob:` handle,
/// or a `data:image/*` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageReference {
    raw: String,
    kind: ImageKind,
}

impl ImageReference {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let unsupported = || ValidationError::UnsupportedImage {
            reference: truncate_for_display(trimmed),
        };

        let kind = if let Some(rest) = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
        {
            if rest.is_empty() || rest.starts_with('/') {
                return Err(unsupported());
            }
            ImageKind::Remote
        } else if let Some(rest) = trimmed.strip_prefix("blob:") {
            if rest.is_empty() {
                return Err(unsupported());
            }
            ImageKind::Blob
        } else if let Some(rest) = trimmed.strip_prefix("data:") {
            let (header, payload) = rest.split_once(',').ok_or_else(unsupported)?;
            let media_type = header.split(';').next().unwrap_or_default();
            let parsed: mime::Mime = media_type.parse().map_err(|_| unsupported())?;
            if parsed.type_() != mime::IMAGE || payload.is_empty() {
                return Err(unsupported());
            }
            ImageKind::Inline
        } else {
            return Err(unsupported());
        };

        Ok(Self {
            raw: trimmed.to_string(),
            kind,
        })
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl TryFrom<String> for ImageReference {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ImageReference> for String {
    fn from(value: ImageReference) -> Self {
        value.raw
    }
}

fn truncate_for_display(raw: &str) -> String {
    const LIMIT: usize = 48;
    match raw.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &raw[..cut]),
        None => raw.to_string(),
    }
}

/// A submitted civic issue. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageReference>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub status: ReportStatus,
}

impl Report {
    /// Case-insensitive substring match against title or description.
    /// `needle` must already be lowercased.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// User-entered values for a new report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubmission {
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl ReportSubmission {
    /// Checks every field and builds the stored record.
    pub(crate) fn into_report(
        self,
        id: ReportId,
        created_at: DateTime<Utc>,
    ) -> Result<Report, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField { field: "title" });
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingField {
                field: "description",
            });
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::LongitudeOutOfRange(self.longitude));
        }

        let image_url = match self.image_url.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(ImageReference::parse(raw)?),
        };

        Ok(Report {
            id,
            title: title.to_string(),
            description: description.to_string(),
            category: self.category,
            image_url,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at,
            status: ReportStatus::Pending,
        })
    }
}

/// Submission rejected before it reached the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("please fill in all required fields: {field} is empty")]
    MissingField { field: &'static str },
    #[error("latitude must be between -90 and 90 (got {0})")]
    LatitudeOutOfRange(f64),
    #[error("longitude must be between -180 and 180 (got {0})")]
    LongitudeOutOfRange(f64),
    #[error("unsupported image reference '{reference}'")]
    UnsupportedImage { reference: String },
}
