use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use lazy_static::lazy_static;
use regex::Regex;
use spdlog::info;
use thiserror::Error;

use crate::publications::{to_json, Publication, Year};

#[derive(Debug, Error)]
pub enum BibtexError {
    #[error("BibTeX syntax error on line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("error reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("error writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("error encoding publications: {0}")]
    Json(#[from] serde_json::Error),
}

/// A raw BibTeX entry. Field names are lower-cased, values have their outer delimiters removed.
#[derive(Debug, Clone, PartialEq)]
pub struct BibEntry {
    pub entry_type: String,
    pub key: String,
    pub fields: Vec<(String, String)>,
}

const VENUE_FIELDS: [&str; 5] = ["journal", "booktitle", "publisher", "organization", "school"];

fn publication_type(entry_type: &str) -> &'static str {
    match entry_type.to_ascii_lowercase().as_str() {
        "article" => "journal-article",
        "inproceedings" | "conference" => "conference-paper",
        "incollection" | "inbook" => "book-chapter",
        "phdthesis" | "mastersthesis" | "master'sthesis" => "dissertation",
        "techreport" => "report",
        _ => "other",
    }
}

/// Splits a BibTeX author list on its `and` separator.
pub fn parse_authors(author_field: &str) -> Vec<String> {
    lazy_static! {
        static ref AND_REGEX: Regex = Regex::new(r"(?i)\s+and\s+").unwrap();
    }

    AND_REGEX
        .split(author_field)
        .map(|author| author.trim())
        .filter(|author| !author.is_empty())
        .map(|author| author.to_string())
        .collect()
}

/// Maps a BibTeX entry to a publication record.
pub fn normalize(entry: &BibEntry) -> Publication {
    // Later duplicates of a field win
    let fields: HashMap<String, &str> = entry.fields
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.as_str()))
        .collect();
    let field = |name: &str| fields.get(name).map(|v| v.trim()).unwrap_or("");

    let authors = match fields.get("author").or_else(|| fields.get("authors")) {
        Some(author_field) => parse_authors(author_field),
        None => vec![],
    };

    let venue = VENUE_FIELDS
        .iter()
        .map(|name| field(name))
        .find(|value| !value.is_empty())
        .unwrap_or("");

    let doi = field("doi");
    let url = match field("url") {
        "" if !doi.is_empty() => format!("https://doi.org/{}", doi),
        url => url.to_string(),
    };

    Publication {
        title: field("title").to_string(),
        year: Some(Year::Text(field("year").to_string())),
        venue: Some(venue.to_string()),
        authors: Some(authors),
        kind: Some(publication_type(&entry.entry_type).to_string()),
        summary: Some(field("summary").to_string()),
        doi: Some(doi.to_string()).filter(|d| !d.is_empty()),
        url: Some(url).filter(|u| !u.is_empty()),
    }
}

/// Converts a `.bib` file into a publications JSON file. Returns the number of records written.
pub fn convert(input: &Path, output: &Path) -> Result<usize, BibtexError> {
    let raw = fs::read_to_string(input).map_err(|source| BibtexError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let records: Vec<Publication> = parse_bibtex(&raw)?.iter().map(normalize).collect();
    let json = to_json(&records)?;

    let write_err = |source| BibtexError::Write {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(output, json).map_err(write_err)?;

    info!("Converted {} entries to {}", records.len(), output.display());
    Ok(records.len())
}

pub fn parse_bibtex(src: &str) -> Result<Vec<BibEntry>, BibtexError> {
    Parser { src, pos: 0 }.entries()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn entries(mut self) -> Result<Vec<BibEntry>, BibtexError> {
        let mut entries = vec![];

        // Text outside of entries is a comment
        while let Some(offset) = self.src[self.pos..].find('@') {
            self.pos += offset + 1;
            self.skip_ws();
            let entry_type = self.identifier()?.to_ascii_lowercase();
            self.skip_ws();

            let close = match self.peek() {
                Some(b'{') => b'}',
                Some(b'(') => b')',
                _ => return Err(self.error("expected '{' or '(' after the entry type")),
            };
            self.pos += 1;

            match entry_type.as_str() {
                "comment" | "preamble" | "string" => self.skip_block(close)?,
                _ => entries.push(self.entry(entry_type, close)?),
            }
        }

        Ok(entries)
    }

    fn entry(&mut self, entry_type: String, close: u8) -> Result<BibEntry, BibtexError> {
        self.skip_ws();
        let key_start = self.pos;
        while let Some(c) = self.peek() {
            if c == b',' || c == close {
                break;
            }
            self.pos += 1;
        }
        let key = self.src[key_start..self.pos].trim().to_string();

        let mut fields = vec![];
        match self.peek() {
            Some(b',') => self.pos += 1,
            Some(c) if c == close => {
                self.pos += 1;
                return Ok(BibEntry { entry_type, key, fields });
            }
            _ => return Err(self.error("unterminated entry")),
        }

        loop {
            self.skip_ws();
            match self.peek() {
                Some(c) if c == close => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.error("unterminated entry")),
                _ => {}
            }

            let name = self.identifier()?.to_ascii_lowercase();
            self.skip_ws();
            if self.peek() != Some(b'=') {
                return Err(self.error(&format!("expected '=' after field '{}'", name)));
            }
            self.pos += 1;
            let value = self.value()?;
            fields.push((name, value));

            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(c) if c == close => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected ',' or the end of the entry")),
            }
        }

        Ok(BibEntry { entry_type, key, fields })
    }

    /// A field value, possibly several parts joined with `#`.
    fn value(&mut self) -> Result<String, BibtexError> {
        let mut value = String::new();
        loop {
            self.skip_ws();
            let part = match self.peek() {
                Some(b'{') => self.delimited(b'}')?,
                Some(b'"') => self.delimited(b'"')?,
                _ => self.identifier()?,
            };
            value.push_str(part);

            self.skip_ws();
            if self.peek() == Some(b'#') {
                self.pos += 1;
                continue;
            }
            break;
        }
        Ok(collapse_whitespace(&value))
    }

    /// Text between the opening delimiter at the current position and `end`, nested braces kept.
    fn delimited(&mut self, end: u8) -> Result<&'a str, BibtexError> {
        let open_line = self.line();
        self.pos += 1;
        let start = self.pos;
        let mut depth = 0usize;

        while let Some(c) = self.peek() {
            if c == end && depth == 0 {
                let text = &self.src[start..self.pos];
                self.pos += 1;
                return Ok(text);
            }
            match c {
                b'{' => depth += 1,
                b'}' => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.pos += 1;
        }

        Err(BibtexError::Syntax {
            line: open_line,
            reason: "unterminated value".to_string(),
        })
    }

    fn skip_block(&mut self, close: u8) -> Result<(), BibtexError> {
        let open_line = self.line();
        let mut depth = 0usize;

        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                b'{' => depth += 1,
                b'}' if depth > 0 => depth -= 1,
                c if c == close && depth == 0 => return Ok(()),
                _ => {}
            }
        }

        Err(BibtexError::Syntax {
            line: open_line,
            reason: "unterminated block".to_string(),
        })
    }

    fn identifier(&mut self) -> Result<&'a str, BibtexError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || b"_-:.+/'".contains(&c) {
                self.pos += 1;
            } else {
                break;
            }
        }

        if start == self.pos {
            return Err(self.error("expected an identifier"));
        }
        Ok(&self.src[start..self.pos])
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn line(&self) -> usize {
        self.src[..self.pos].matches('\n').count() + 1
    }

    fn error(&self, reason: &str) -> BibtexError {
        BibtexError::Syntax {
            line: self.line(),
            reason: reason.to_string(),
        }
    }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
