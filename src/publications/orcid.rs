use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use spdlog::info;
use thiserror::Error;

use crate::publications::bibtex::parse_authors;
use crate::publications::{to_json, Publication, Year};

#[derive(Debug, Error)]
pub enum OrcidError {
    #[error("an ORCID identifier is required: set [orcid] id in the configuration or ORCID_ID")]
    MissingId,

    #[error("invalid ORCID identifier '{0}'")]
    InvalidId(String),

    #[error("error reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("error writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed ORCID works payload: {0}")]
    Payload(String),

    #[error("error decoding ORCID payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Venues that name an indexing service rather than the publication outlet.
const AGGREGATE_VENUES: [&str; 3] = ["web of science", "scopus", "crossref"];

const VENUE_POINTERS: [&str; 5] = [
    "/journal-title/value",
    "/series-title/value",
    "/conference-name/value",
    "/publisher-name/value",
    "/source/source-name/value",
];

#[derive(Debug, Clone, PartialEq)]
pub struct OrcidId(String);

impl OrcidId {
    /// Validates an identifier of the form `0000-0002-1825-0097`.
    pub fn parse(raw: Option<&str>) -> Result<OrcidId, OrcidError> {
        lazy_static! {
            static ref ORCID_REGEX: Regex = Regex::new(r"^\d{4}-\d{4}-\d{4}-\d{3}[\dX]$").unwrap();
        }

        let raw = match raw.map(str::trim) {
            None | Some("") => return Err(OrcidError::MissingId),
            Some(raw) => raw,
        };

        if !ORCID_REGEX.is_match(raw) {
            return Err(OrcidError::InvalidId(raw.to_string()));
        }
        Ok(OrcidId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrcidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn text_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn extract_venue(metadata: &Value) -> String {
    let candidates: Vec<&str> = VENUE_POINTERS
        .iter()
        .filter_map(|pointer| text_at(metadata, pointer))
        .collect();

    let specific = candidates.iter().find(|candidate| {
        let normalized = candidate.to_lowercase();
        !AGGREGATE_VENUES.iter().any(|agg| normalized.contains(agg))
    });

    specific
        .or_else(|| candidates.first())
        .map(|venue| venue.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
}

fn extract_authors(metadata: &Value) -> Vec<String> {
    lazy_static! {
        static ref CITATION_AUTHOR_REGEX: Regex = Regex::new(r"(?i)author\s*=\s*\{([^}]*)\}").unwrap();
    }

    let contributors = metadata
        .pointer("/contributors/contributor")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let names: Vec<String> = contributors
        .iter()
        .filter_map(|contributor| {
            text_at(contributor, "/credit-name/value")
                .or_else(|| text_at(contributor, "/contributor-orcid/path"))
                .or_else(|| text_at(contributor, "/contributor-orcid/uri"))
                .or_else(|| text_at(contributor, "/contributor-attributes/contributor-role"))
        })
        .map(str::to_string)
        .collect();

    if !names.is_empty() {
        return dedup(names);
    }

    let citation = text_at(metadata, "/citation/citation-value").unwrap_or("");
    match CITATION_AUTHOR_REGEX.captures(citation) {
        Some(caps) => dedup(parse_authors(&caps[1])),
        None => vec![],
    }
}

fn extract_doi(summary: &Value) -> Option<String> {
    summary
        .pointer("/external-ids/external-id")
        .and_then(Value::as_array)?
        .iter()
        .find(|id| {
            text_at(id, "/external-id-type")
                .map(|t| t.eq_ignore_ascii_case("doi"))
                .unwrap_or(false)
        })
        .and_then(|id| text_at(id, "/external-id-value"))
        .map(str::to_string)
}

fn put_code(summary: &Value) -> Option<String> {
    match summary.get("put-code")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn work_to_publication(id: &OrcidId, group: &Value) -> Publication {
    let empty = Value::Null;
    let summary = group.pointer("/work-summary/0").unwrap_or(&empty);

    Publication {
        title: text_at(summary, "/title/title/value").unwrap_or("Untitled").to_string(),
        year: text_at(summary, "/publication-date/year/value").map(|y| Year::Text(y.to_string())),
        venue: Some(extract_venue(summary)),
        authors: Some(extract_authors(summary)),
        kind: Some(text_at(summary, "/type").map(str::to_lowercase).unwrap_or_default()),
        summary: Some(text_at(summary, "/work-title/title/value").unwrap_or("").to_string()),
        doi: extract_doi(summary),
        url: put_code(summary).map(|code| format!("https://orcid.org/{}/work/{}", id, code)),
    }
}

/// Maps an ORCID v3.0 `works` payload to publication records, one per work group.
pub fn works_to_publications(id: &OrcidId, payload: &Value) -> Result<Vec<Publication>, OrcidError> {
    if !payload.is_object() {
        return Err(OrcidError::Payload("expected a JSON object".to_string()));
    }

    let groups = match payload.get("group") {
        None | Some(Value::Null) => return Ok(vec![]),
        Some(Value::Array(groups)) => groups,
        Some(_) => return Err(OrcidError::Payload("'group' is not an array".to_string())),
    };

    Ok(groups.iter().map(|group| work_to_publication(id, group)).collect())
}

/// Reads a saved works payload and writes the publications file.
/// The output is only touched once the payload has been mapped.
pub fn sync(id: &OrcidId, input: &Path, output: &Path) -> Result<usize, OrcidError> {
    let raw = fs::read_to_string(input).map_err(|source| OrcidError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let payload: Value = serde_json::from_str(&raw)?;
    let publications = works_to_publications(id, &payload)?;
    let json = to_json(&publications)?;

    let write_err = |source| OrcidError::Write {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(output, json).map_err(write_err)?;

    info!("Wrote {} publications to {}", publications.len(), output.display());
    Ok(publications.len())
}

#[cfg(test)]
mod tests {
    use std::env;

    use serde_json::json;

    use crate::test_data::ORCID_WORKS_DATA;

    use super::*;

    fn orcid_id() -> OrcidId {
        OrcidId::parse(Some("0000-0002-1825-0097")).unwrap()
    }

    #[test]
    fn test_id_is_required() {
        assert!(matches!(OrcidId::parse(None), Err(OrcidError::MissingId)));
        assert!(matches!(OrcidId::parse(Some("  ")), Err(OrcidError::MissingId)));
        assert!(matches!(OrcidId::parse(Some("not-an-id")), Err(OrcidError::InvalidId(_))));
        assert_eq!(OrcidId::parse(Some("0000-0001-5109-371X")).unwrap().as_str(), "0000-0001-5109-371X");
    }

    #[test]
    fn test_works_payload() {
        let payload: Value = serde_json::from_str(ORCID_WORKS_DATA).unwrap();
        let records = works_to_publications(&orcid_id(), &payload).unwrap();
        assert_eq!(records.len(), 3);

        let first = &records[0];
        assert_eq!(first.title, "Typed effects in practice");
        assert_eq!(first.year, Some(Year::Text("2021".to_string())));
        assert_eq!(first.venue.as_deref(), Some("Proceedings of the Workshop on Types"));
        assert_eq!(first.kind.as_deref(), Some("conference-paper"));
        assert_eq!(first.doi.as_deref(), Some("10.1000/xyz123"));
        assert_eq!(first.url.as_deref(), Some("https://orcid.org/0000-0002-1825-0097/work/1001"));
        assert_eq!(first.authors.as_ref().unwrap(), &["Grace Hopper", "Alan Turing"]);

        let second = &records[1];
        assert_eq!(second.venue.as_deref(), Some("Journal of Tests"));
        assert_eq!(second.authors.as_ref().unwrap(), &["Ada Lovelace", "Charles Babbage"]);

        let third = &records[2];
        assert_eq!(third.title, "Untitled");
        assert_eq!(third.year, None);
        assert_eq!(third.venue.as_deref(), Some("Unknown"));
        assert!(third.url.is_none());
        assert!(third.authors.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_aggregate_venue_is_last_resort() {
        let summary = json!({"source": {"source-name": {"value": "Crossref"}}});
        assert_eq!(extract_venue(&summary), "Crossref");

        let summary = json!({
            "journal-title": {"value": "Scopus Index"},
            "publisher-name": {"value": "Example Press"}
        });
        assert_eq!(extract_venue(&summary), "Example Press");
    }

    #[test]
    fn test_contributors_are_deduplicated() {
        let metadata = json!({"contributors": {"contributor": [
            {"credit-name": {"value": "Grace Hopper"}},
            {"credit-name": {"value": "Grace Hopper"}},
            {"contributor-orcid": {"path": "0000-0001-5109-371X"}}
        ]}});
        assert_eq!(extract_authors(&metadata), ["Grace Hopper", "0000-0001-5109-371X"]);
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(works_to_publications(&orcid_id(), &json!([])), Err(OrcidError::Payload(_))));
        assert!(matches!(works_to_publications(&orcid_id(), &json!({"group": 3})), Err(OrcidError::Payload(_))));
        assert!(works_to_publications(&orcid_id(), &json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_sync_leaves_output_on_failure() {
        let out_dir = env::temp_dir().join(format!("folio-orcid-{}", std::process::id()));
        fs::create_dir_all(&out_dir).unwrap();
        let bad_input = out_dir.join("bad.json");
        let output = out_dir.join("publications.json");
        fs::write(&bad_input, "{ not json").unwrap();
        fs::write(&output, "[]\n").unwrap();

        assert!(sync(&orcid_id(), &bad_input, &output).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "[]\n");

        let count = sync(&orcid_id(), Path::new("res/test/publications/orcid-works.json"), &output).unwrap();
        assert_eq!(count, 3);
        let written: Vec<Publication> = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written[0].title, "Typed effects in practice");

        let _ = fs::remove_dir_all(&out_dir);
    }
}
