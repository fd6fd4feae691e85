use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of colours a generated palette is expected to carry.
pub const PALETTE_SIZE: usize = 5;

/// Sentiment backend used by `/analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMethod {
    Textblob,
    Vader,
    #[default]
    Hybrid,
    Enhanced,
}

impl AnalysisMethod {
    pub const ALL: [AnalysisMethod; 4] = [
        AnalysisMethod::Textblob,
        AnalysisMethod::Vader,
        AnalysisMethod::Hybrid,
        AnalysisMethod::Enhanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisMethod::Textblob => "textblob",
            AnalysisMethod::Vader => "vader",
            AnalysisMethod::Hybrid => "hybrid",
            AnalysisMethod::Enhanced => "enhanced",
        }
    }

    pub fn next(self) -> Self {
        match self {
            AnalysisMethod::Textblob => AnalysisMethod::Vader,
            AnalysisMethod::Vader => AnalysisMethod::Hybrid,
            AnalysisMethod::Hybrid => AnalysisMethod::Enhanced,
            AnalysisMethod::Enhanced => AnalysisMethod::Textblob,
        }
    }
}

impl fmt::Display for AnalysisMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub text: &'a str,
    pub method: AnalysisMethod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub api: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Response of `POST /analyze`. Only `colors` is required; older backends
/// send nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub colors: Vec<String>,
    #[serde(default)]
    pub polarity: Option<f64>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub method_used: Option<String>,
    #[serde(default)]
    pub translated_text: Option<String>,
    #[serde(default)]
    pub original_text: Option<String>,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default)]
    pub emotion_details: Option<EmotionDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionDetails {
    pub emotion: Option<String>,
    pub description: Option<String>,
    pub temperature: Option<String>,
    pub harmony: Option<String>,
    pub mood: Option<String>,
    pub energy: Option<String>,
    pub color_meanings: Vec<serde_json::Value>,
}

impl Analysis {
    /// One-line human summary of the sentiment fields that are present.
    pub fn summary(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(emotion) = self.emotion_details.as_ref().and_then(|d| d.emotion.as_deref()) {
            parts.push(emotion.to_string());
        }
        if let Some(s) = &self.sentiment {
            parts.push(s.clone());
        }
        if let Some(p) = self.polarity {
            parts.push(format!("polarity {p:+.2}"));
        }
        if let Some(c) = self.confidence {
            parts.push(format!("confidence {:.0}%", c * 100.0));
        }
        if let Some(i) = &self.intensity {
            parts.push(format!("intensity {i}"));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" · "))
        }
    }
}

/// Server-side palette identifier. Integer on the wire today, treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PaletteId(pub String);

impl PaletteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaletteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for PaletteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => PaletteId(n.to_string()),
            Raw::Str(s) => PaletteId(s),
        })
    }
}

/// One persisted palette as listed by `/gallery`. `colors` stays the
/// comma-joined string the backend stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub id: PaletteId,
    pub colors: String,
    pub input_text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub translated_text: Option<String>,
    #[serde(default)]
    pub polarity: Option<String>,
    #[serde(default)]
    pub analysis_method: Option<String>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub sentiment_label: Option<String>,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default)]
    pub emotion_type: Option<String>,
}

impl GalleryEntry {
    pub fn color_list(&self) -> Vec<String> {
        split_colors(&self.colors)
    }
}

pub fn split_colors(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// `/gallery` has been served both as a bare array and wrapped in
/// `{ total, palettes }`; either decodes here.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GalleryPayload {
    Envelope {
        #[serde(default)]
        total: Option<usize>,
        palettes: Vec<GalleryEntry>,
    },
    Bare(Vec<GalleryEntry>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryListing {
    pub total: usize,
    pub entries: Vec<GalleryEntry>,
}

impl From<GalleryPayload> for GalleryListing {
    fn from(payload: GalleryPayload) -> Self {
        match payload {
            GalleryPayload::Envelope { total, palettes } => Self {
                total: total.unwrap_or(palettes.len()),
                entries: palettes,
            },
            GalleryPayload::Bare(entries) => Self {
                total: entries.len(),
                entries,
            },
        }
    }
}

impl GalleryListing {
    pub fn first_id(&self) -> Option<&PaletteId> {
        self.entries.first().map(|e| &e.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_palettes: u64,
    pub methods_usage: BTreeMap<String, u64>,
    pub emotions_distribution: BTreeMap<String, u64>,
    pub api_version: Option<String>,
    pub error: Option<String>,
}
