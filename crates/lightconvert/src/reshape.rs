//! Column reshapes shared by the loaders
//!
//! Pure functions over cells and tables: release-year extraction, one-hot
//! genre collapse, Python-style list literals, category rejoining and date
//! conversion to Unix seconds. All dates are interpreted at UTC midnight so
//! the output does not depend on the machine's time zone.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::Result;
use crate::table::Table;

/// Genre labels of the MovieLens 100K one-hot columns, in file order
pub const ML100K_GENRES: [&str; 19] = [
    "unknown",
    "Action",
    "Adventure",
    "Animation",
    "Children's",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Fantasy",
    "Film-Noir",
    "Horror",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "War",
    "Western",
];

/// Splits `"Title (YYYY)"` into title and year
pub struct TitleYearSplitter {
    pattern: Regex,
}

impl TitleYearSplitter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"^(.*?)\s*\((\d{4})\)\s*$")?,
        })
    }

    /// `("Toy Story", "1995")` for `"Toy Story (1995)"`; titles without a
    /// trailing year come back unchanged with an empty year
    pub fn split(&self, title: &str) -> (String, String) {
        match self.pattern.captures(title) {
            Some(caps) => (caps[1].to_string(), caps[2].to_string()),
            None => (title.trim().to_string(), String::new()),
        }
    }
}

/// General MovieLens item reshape
///
/// `(id, title, genres)` rows become `(id, title, year, genres)`: the trailing
/// `(YYYY)` moves out of the title into its own column. Columns after the
/// title keep their order, shifted right by one.
pub fn split_release_year(table: Table) -> Result<Table> {
    let splitter = TitleYearSplitter::new()?;

    let rows = table
        .into_rows()
        .into_iter()
        .map(|mut row| {
            if row.len() < 2 {
                row.resize(2, String::new());
            }
            let (title, year) = splitter.split(&row[1]);
            row[1] = title;
            row.insert(2, year);
            row
        })
        .collect();

    Ok(Table::from_rows(rows))
}

/// Text before the last `(`, trimmed: `"Toy Story (1995)"` -> `"Toy Story"`
pub fn strip_parenthesized_suffix(title: &str) -> String {
    match title.rsplit_once('(') {
        Some((head, _)) => head.trim().to_string(),
        None => title.trim().to_string(),
    }
}

/// Labels whose one-hot cell is `1`, joined with `", "` in positional order
pub fn collapse_one_hot(cells: &[String], labels: &[&str]) -> String {
    cells
        .iter()
        .zip(labels)
        .filter(|(cell, _)| cell.trim() == "1")
        .map(|(_, label)| *label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Amazon category path without its top-level entry
///
/// `["Video Games", "Accessories", "Cables"]` -> `"Accessories, Cables"`; a
/// single category carries no information and yields `""`.
pub fn rejoin_categories(categories: &[String]) -> String {
    if categories.len() > 1 {
        categories[1..].join(", ")
    } else {
        String::new()
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// MovieLens 100K release date (`01-Jan-1995`) to Unix seconds
pub fn day_month_year_timestamp(value: &str) -> Option<i64> {
    NaiveDate::parse_from_str(value.trim(), "%d-%b-%Y")
        .ok()
        .map(midnight_utc)
}

const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y-%m-%d",
    "%d-%b-%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Month and year only, parsed with a leading `1 `
const MONTH_YEAR_FORMATS: &[&str] = &["%d %B %Y", "%d %b %Y"];

/// Tried only when the value ends in a two-digit year (`3/4/19`)
const SHORT_YEAR_FORMATS: &[&str] = &["%m/%d/%y"];

/// `%Y` also matches one to three digits; anything earlier is a misparse
const MIN_YEAR: i32 = 1000;

fn ends_in_short_year(value: &str) -> bool {
    value
        .rsplit_once('/')
        .is_some_and(|(_, year)| year.len() == 2 && year.bytes().all(|b| b.is_ascii_digit()))
}

/// Tolerant date parser for free-form catalog dates
///
/// Accepts the spellings seen in product metadata ("February 28, 2017",
/// "Sept. 2, 2019", "2nd March 2021", "2017-02-28", "March 2017", "2017").
/// Missing day or month default to the first. Returns Unix seconds at UTC.
pub struct LenientDateParser {
    ordinal: Regex,
}

impl LenientDateParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ordinal: Regex::new(r"(\d+)(st|nd|rd|th)\b")?,
        })
    }

    pub fn timestamp(&self, value: &str) -> Option<i64> {
        let normalized = self.normalize(value);
        if normalized.is_empty() {
            return None;
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
                if dt.year() >= MIN_YEAR {
                    return Some(dt.and_utc().timestamp());
                }
            }
        }

        if ends_in_short_year(&normalized) {
            for format in SHORT_YEAR_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(&normalized, format) {
                    return Some(midnight_utc(date));
                }
            }
        }

        let month_year = format!("1 {}", normalized);
        let candidates = DATE_FORMATS
            .iter()
            .map(|format| NaiveDate::parse_from_str(&normalized, format))
            .chain(
                MONTH_YEAR_FORMATS
                    .iter()
                    .map(|format| NaiveDate::parse_from_str(&month_year, format)),
            );
        for date in candidates.flatten() {
            if date.year() >= MIN_YEAR {
                return Some(midnight_utc(date));
            }
        }

        if normalized.len() == 4 {
            if let Ok(year) = normalized.parse::<i32>() {
                if year >= MIN_YEAR {
                    return NaiveDate::from_ymd_opt(year, 1, 1).map(midnight_utc);
                }
            }
        }

        None
    }

    fn normalize(&self, value: &str) -> String {
        let collapsed = value
            .split_whitespace()
            .map(|word| word.trim_end_matches('.'))
            .map(|word| match word {
                "Sept" => "Sep",
                "sept" => "sep",
                other => other,
            })
            .collect::<Vec<_>>()
            .join(" ");
        self.ordinal.replace_all(&collapsed, "$1").into_owned()
    }
}

/// Parse a Python list literal of strings, e.g. `['Drama', "Children's"]`
///
/// Single- and double-quoted items with backslash escapes are accepted.
/// Returns `None` for anything that is not a list of string literals.
pub fn parse_list_literal(value: &str) -> Option<Vec<String>> {
    let inner = value.trim().strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let Some(quote) = chars.next() else {
            break;
        };
        if quote != '\'' && quote != '"' {
            return None;
        }

        let mut item = String::new();
        loop {
            match chars.next()? {
                '\\' => match chars.next()? {
                    'n' => item.push('\n'),
                    't' => item.push('\t'),
                    other => item.push(other),
                },
                c if c == quote => break,
                c => item.push(c),
            }
        }
        items.push(item);

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return None,
        }
    }

    Some(items)
}
