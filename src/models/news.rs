//! News reference model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One news item from the backend feed.
///
/// Upstream feeds are patchy; any field may be absent and is defaulted
/// rather than failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsReference {
    /// Headline
    #[serde(default)]
    pub title: String,
    /// Article summary
    #[serde(default)]
    pub summary: String,
    /// Illustration image URL
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Supported news feed sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsSource {
    Ndtv,
    TheHindu,
    TimesOfIndia,
}

impl NewsSource {
    /// Convert the source to its wire string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsSource::Ndtv => "ndtv",
            NewsSource::TheHindu => "the_hindu",
            NewsSource::TimesOfIndia => "times_of_india",
        }
    }
}

impl fmt::Display for NewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NewsSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ndtv" => Ok(NewsSource::Ndtv),
            "the_hindu" => Ok(NewsSource::TheHindu),
            "times_of_india" => Ok(NewsSource::TimesOfIndia),
            _ => Err(anyhow::anyhow!("Invalid news source: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_roundtrip() {
        assert_eq!(NewsSource::from_str("ndtv").unwrap(), NewsSource::Ndtv);
        assert_eq!(
            NewsSource::from_str("the_hindu").unwrap(),
            NewsSource::TheHindu
        );
        assert_eq!(
            NewsSource::from_str("TIMES_OF_INDIA").unwrap(),
            NewsSource::TimesOfIndia
        );
        assert!(NewsSource::from_str("bbc").is_err());
        assert_eq!(NewsSource::TheHindu.to_string(), "the_hindu");
    }

    #[test]
    fn test_reference_tolerates_missing_fields() {
        let item: NewsReference = serde_json::from_str("{}").unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.summary, "");
        assert_eq!(item.image_url, None);

        let item: NewsReference =
            serde_json::from_str(r#"{"title": "Markets rally", "summary": "Stocks rose."}"#)
                .unwrap();
        assert_eq!(item.title, "Markets rally");
        assert_eq!(item.image_url, None);
    }
}
