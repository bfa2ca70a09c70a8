#[cfg(test)]
pub const BIBTEX_DATA: &str = include_str!("../res/test/publications/publications.bib");

#[cfg(test)]
pub const ORCID_WORKS_DATA: &str = include_str!("../res/test/publications/orcid-works.json");
