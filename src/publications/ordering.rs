use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::publications::{Publication, Year};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "oldest" => Ok(SortDirection::Asc),
            "desc" | "newest" => Ok(SortDirection::Desc),
            _ => Err(format!("unknown sort direction '{}', expected asc or desc", s)),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Leading integer of a string, after optional whitespace and sign. 0 when there is none.
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };

    let digits: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<i64>() {
        Ok(n) => sign * n,
        Err(_) => 0,
    }
}

/// Numeric year of a record; missing or unparsable years count as 0.
pub fn year_value(publication: &Publication) -> i64 {
    match publication.year {
        Some(Year::Number(n)) => n,
        Some(Year::Text(ref s)) => leading_int(s),
        None => 0,
    }
}

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Orders by year in the given direction. Equal years are ordered by title, ascending.
pub fn sort_publications(records: &[Publication], direction: SortDirection) -> Vec<Publication> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let (first, second) = (year_value(a), year_value(b));
        if first == second {
            return compare_titles(&a.title, &b.title);
        }
        match direction {
            SortDirection::Asc => first.cmp(&second),
            SortDirection::Desc => second.cmp(&first),
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(title: &str, year: Option<Year>) -> Publication {
        Publication {
            title: title.to_string(),
            year,
            ..Default::default()
        }
    }

    fn summary(records: &[Publication]) -> Vec<String> {
        records.iter().map(|p| format!("{}/{}", year_value(p), p.title)).collect()
    }

    #[test]
    fn test_desc_ties_by_title() {
        let records = vec![
            publication("B", Some(Year::Number(2019))),
            publication("A", Some(Year::Number(2021))),
            publication("Z", Some(Year::Number(2021))),
        ];
        let sorted = sort_publications(&records, SortDirection::Desc);
        assert_eq!(summary(&sorted), ["2021/A", "2021/Z", "2019/B"]);
    }

    #[test]
    fn test_asc() {
        let records = vec![
            publication("Z", Some(Year::Text("2021".to_string()))),
            publication("B", Some(Year::Number(2019))),
            publication("A", Some(Year::Number(2021))),
        ];
        let sorted = sort_publications(&records, SortDirection::Asc);
        assert_eq!(summary(&sorted), ["2019/B", "2021/A", "2021/Z"]);
        // The input is left untouched
        assert_eq!(records[0].title, "Z");
    }

    #[test]
    fn test_year_value() {
        assert_eq!(year_value(&publication("a", Some(Year::Number(2020)))), 2020);
        assert_eq!(year_value(&publication("a", Some(Year::Text(" 2018a".to_string())))), 2018);
        assert_eq!(year_value(&publication("a", Some(Year::Text("in press".to_string())))), 0);
        assert_eq!(year_value(&publication("a", None)), 0);
    }

    #[test]
    fn test_unknown_years_sort_last_when_desc() {
        let records = vec![
            publication("undated", None),
            publication("dated", Some(Year::Number(2001))),
        ];
        let sorted = sort_publications(&records, SortDirection::Desc);
        assert_eq!(sorted[0].title, "dated");
    }

    #[test]
    fn test_title_compare_ignores_case() {
        let records = vec![
            publication("beta", Some(Year::Number(2020))),
            publication("Alpha", Some(Year::Number(2020))),
        ];
        let sorted = sort_publications(&records, SortDirection::Desc);
        assert_eq!(sorted[0].title, "Alpha");
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("sideways".parse::<SortDirection>().is_err());
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }
}
