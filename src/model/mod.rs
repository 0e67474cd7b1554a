//! # Résumé Model
//!
//! The input representation for the composer, following the JSON Resume
//! schema (<https://jsonresume.org/schema/>). The model is read-only to the
//! layout code: every renderer borrows it immutably.
//!
//! Order matters in every collection: it is the render order.
//!
//! Optional text fields treat an empty or whitespace-only string the same as
//! a missing key, so `"email": ""` and no `email` at all render identically.

pub mod date;

pub use date::{year_range, year_span, DateError, PartialDate};

use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// A complete résumé ready for composition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(default)]
    pub basics: Basics,
    #[serde(default)]
    pub work: Vec<Work>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub interests: Vec<Interest>,
}

impl Resume {
    /// Parse a résumé from JSON Resume text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Contact details, title and photo.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basics {
    #[serde(default)]
    pub name: String,
    /// Job title shown under the name, e.g. "Software Engineer".
    #[serde(default)]
    pub label: String,
    /// Photo source: a file path or a `data:image/...;base64,` URI.
    #[serde(default, deserialize_with = "optional_text")]
    pub picture: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub summary: Option<String>,
    #[serde(default)]
    pub location: Location,
}

/// Postal address.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, deserialize_with = "optional_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub region: Option<String>,
}

impl Location {
    /// A location counts as given once it has a street address.
    pub fn is_present(&self) -> bool {
        self.address.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, deserialize_with = "date::deserialize_optional")]
    pub start_date: Option<PartialDate>,
    #[serde(default, deserialize_with = "date::deserialize_optional")]
    pub end_date: Option<PartialDate>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub area: String,
    /// Degree kind, e.g. "Bachelor". Absent for short courses and the like.
    #[serde(default, deserialize_with = "optional_text")]
    pub study_type: Option<String>,
    #[serde(default, deserialize_with = "date::deserialize_optional")]
    pub start_date: Option<PartialDate>,
    #[serde(default, deserialize_with = "date::deserialize_optional")]
    pub end_date: Option<PartialDate>,
    #[serde(default)]
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default)]
    pub name: String,
    /// Proficiency label, e.g. "Expert".
    #[serde(default)]
    pub level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Interest {
    #[serde(default)]
    pub name: String,
}

fn optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VitaeError;

    #[test]
    fn test_parse_minimal() {
        let resume = Resume::from_json(r#"{ "basics": { "name": "Jane Doe" } }"#).unwrap();
        assert_eq!(resume.basics.name, "Jane Doe");
        assert!(resume.work.is_empty());
        assert!(resume.basics.location.address.is_none());
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let resume = Resume::from_json(
            r#"{ "basics": { "name": "J", "email": "", "phone": "  ",
                 "location": { "address": "", "city": "Perth" } } }"#,
        )
        .unwrap();
        assert!(resume.basics.email.is_none());
        assert!(resume.basics.phone.is_none());
        assert!(resume.basics.location.address.is_none());
        assert_eq!(resume.basics.location.city.as_deref(), Some("Perth"));
    }

    #[test]
    fn test_work_dates_are_typed() {
        let resume = Resume::from_json(
            r#"{ "work": [{ "company": "Acme", "position": "Eng",
                 "startDate": "2019-01-01", "endDate": "" }] }"#,
        )
        .unwrap();
        let job = &resume.work[0];
        assert_eq!(job.start_date.map(|d| d.year()), Some(2019));
        assert!(job.end_date.is_none());
    }

    #[test]
    fn test_malformed_date_is_a_parse_error() {
        let err = Resume::from_json(r#"{ "education": [{ "startDate": "last year" }] }"#)
            .unwrap_err();
        match err {
            VitaeError::Parse { source, .. } => {
                assert!(source.to_string().contains("invalid year in date 'last year'"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_location_keys_are_camel_case() {
        let resume = Resume::from_json(
            r#"{ "basics": { "location": { "address": "1 Main St", "postalCode": "6000",
                 "city": "Perth", "countryCode": "AU" } } }"#,
        )
        .unwrap();
        let loc = &resume.basics.location;
        assert_eq!(loc.postal_code.as_deref(), Some("6000"));
        assert_eq!(loc.country_code.as_deref(), Some("AU"));
    }
}
