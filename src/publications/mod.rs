use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub mod bibtex;
pub mod ordering;
pub mod orcid;
pub mod resolver;

/// One entry of the publications JSON file.
///
/// Field order is the serialized order, which keeps generated files stable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Publication {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Publication years show up both as JSON numbers and as strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{}", n),
            Year::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Writes records the way every generated publications file is laid out:
/// two-space indented JSON with a trailing newline.
pub fn to_json(records: &[Publication]) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_forms() {
        let records: Vec<Publication> = serde_json::from_str(
            r#"[{"title": "A", "year": 2021}, {"title": "B", "year": "2019"}, {"title": "C"}]"#,
        ).unwrap();
        assert_eq!(records[0].year, Some(Year::Number(2021)));
        assert_eq!(records[1].year, Some(Year::Text("2019".to_string())));
        assert_eq!(records[2].year, None);
        assert_eq!(records[1].year.as_ref().unwrap().to_string(), "2019");
    }

    #[test]
    fn test_type_field_name() {
        let record: Publication = serde_json::from_str(r#"{"title": "A", "type": "journal-article"}"#).unwrap();
        assert_eq!(record.kind.as_deref(), Some("journal-article"));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"title":"A","type":"journal-article"}"#);
    }

    #[test]
    fn test_to_json_layout() {
        let records = vec![Publication {
            title: "T".to_string(),
            authors: Some(vec!["A".to_string()]),
            ..Default::default()
        }];
        let json = to_json(&records).unwrap();
        assert_eq!(json, "[\n  {\n    \"title\": \"T\",\n    \"authors\": [\n      \"A\"\n    ]\n  }\n]\n");
    }
}
