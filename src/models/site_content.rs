use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Proficiency on a 0-100 scale.
    #[serde(default, deserialize_with = "lenient_level")]
    pub level: u8,
    #[serde(default, deserialize_with = "lenient_count")]
    pub years: u32,
}

impl Skill {
    pub fn placeholder() -> Self {
        Self {
            name: "New Skill".to_string(),
            level: 50,
            years: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
}

impl Milestone {
    pub fn placeholder(year: i32) -> Self {
        Self {
            year: year.to_string(),
            title: "New Milestone".to_string(),
            description: "Add description here...".to_string(),
        }
    }
}

/// About-page narrative: three independently ordered lists.
///
/// Reading is forgiving, since the stored document is written by whoever
/// posted last: numbers and strings stand in for each other, and list
/// entries that are not objects (or not text, for the journey) are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    #[serde(default, deserialize_with = "lenient_paragraphs")]
    pub my_journey: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage {
    pub markdown: String,
    pub html: String,
}

fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn whole_number(value: Value) -> Option<u64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (number.is_finite() && number >= 0.0).then(|| number.round() as u64)
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let level = whole_number(Value::deserialize(deserializer)?).unwrap_or_default();
    Ok(level.min(100) as u8)
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let count = whole_number(Value::deserialize(deserializer)?).unwrap_or_default();
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

fn lenient_paragraphs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(text).collect(),
        _ => Vec::new(),
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
