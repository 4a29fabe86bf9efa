use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SkipReason;
use crate::strip::MarkupStripper;
use crate::types::PostRecord;
use crate::utils::{collapse_whitespace, normalize_date};

/// One post as handed over by the site generator.
///
/// Everything is optional at parse time so that a post with a missing title
/// still deserializes and can be skipped with a precise reason, instead of
/// failing as opaque bad JSON.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SourcePost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Front-matter date in any form `normalize_date` understands
    #[serde(default)]
    pub date: Option<String>,
    /// A list, or a single string for generators that emit one
    #[serde(default, deserialize_with = "one_or_many")]
    pub categories: Vec<String>,
    /// Rendered body (usually HTML)
    #[serde(default)]
    pub body: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}

impl SourcePost {
    /// Validate required fields and strip the body.
    ///
    /// Uniqueness of the url is a corpus-level concern and is not checked here.
    pub fn to_record<S>(&self, stripper: &S) -> Result<PostRecord, SkipReason>
    where
        S: MarkupStripper + ?Sized,
    {
        let title = required(self.title.as_deref()).ok_or(SkipReason::MissingTitle)?;
        let url = required(self.url.as_deref()).ok_or(SkipReason::MissingUrl)?;

        let date = match self.date.as_deref() {
            Some(raw) => normalize_date(raw).unwrap_or_else(|| {
                tracing::debug!(url, date = raw, "unrecognized date; leaving it blank");
                String::new()
            }),
            None => String::new(),
        };

        let categories = self
            .categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        Ok(PostRecord {
            title: collapse_whitespace(title),
            url: url.to_string(),
            date,
            categories,
            content: collapse_whitespace(&stripper.strip(&self.body)),
        })
    }
}

fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
