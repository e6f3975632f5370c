//! Post listing - every post, newest first

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::content::{ContentItem, ReadingTime};
use crate::error::{Error, Result};
use crate::inventory::Inventory;
use crate::routes::route_path;

/// What a listing page needs to know about one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub title: String,
    /// Date as written by the author
    pub date: String,
    pub reading_time: ReadingTime,
    pub spoiler: String,
    pub slug: String,
    /// Page path of the post
    pub path: String,
    #[serde(skip)]
    published: NaiveDateTime,
}

impl ListingEntry {
    fn from_item(item: &ContentItem) -> Result<Self> {
        let published = parse_post_date(&item.date).ok_or_else(|| Error::DateParse {
            slug: item.slug.clone(),
            value: item.date.clone(),
        })?;

        Ok(Self {
            title: item.title.clone(),
            date: item.date.clone(),
            reading_time: item.reading_time.clone(),
            spoiler: item.spoiler.clone(),
            slug: item.slug.clone(),
            path: route_path(&item.slug),
            published,
        })
    }

    /// Parsed publication date
    pub fn published(&self) -> NaiveDateTime {
        self.published
    }
}

/// Every post of the inventory, most recent first.
///
/// All dates are parsed before anything is sorted; the first unparsable
/// date fails the whole listing. The sort is stable, so posts published on
/// the same date keep their inventory order.
pub fn list_posts(inventory: &Inventory) -> Result<Vec<ListingEntry>> {
    let mut entries = inventory
        .items()
        .iter()
        .map(ListingEntry::from_item)
        .collect::<Result<Vec<_>>>()?;

    entries.sort_by(|a, b| b.published.cmp(&a.published));

    Ok(entries)
}

/// Parse a post date in the formats authors actually write
pub fn parse_post_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Offsets compare by their UTC instant
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory(posts: &[(&str, &str)]) -> Inventory {
        Inventory::new(
            posts
                .iter()
                .map(|(slug, date)| ContentItem::new(*slug, slug.to_uppercase(), *date))
                .collect(),
        )
        .unwrap()
    }

    fn slugs(entries: &[ListingEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.slug.as_str()).collect()
    }

    #[test]
    fn test_newest_first() {
        let inv = inventory(&[("a", "2020-06-06"), ("b", "2020-07-10"), ("c", "2020-07-12")]);
        let entries = list_posts(&inv).unwrap();
        assert_eq!(slugs(&entries), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_dates_compare_as_dates_not_strings() {
        // Lexically "July" > "June" > "December" would give the wrong order
        let inv = inventory(&[
            ("june", "June 6, 2020"),
            ("dec", "December 1, 2019"),
            ("july", "July 12, 2020"),
            ("iso", "2020-07-10"),
        ]);
        let entries = list_posts(&inv).unwrap();
        assert_eq!(slugs(&entries), vec!["july", "iso", "june", "dec"]);
        for pair in entries.windows(2) {
            assert!(pair[0].published() >= pair[1].published());
        }
    }

    #[test]
    fn test_same_date_keeps_inventory_order() {
        let inv = inventory(&[("first", "2020-06-06"), ("second", "2020-06-06"), ("old", "2019-01-01")]);
        let entries = list_posts(&inv).unwrap();
        assert_eq!(slugs(&entries), vec!["first", "second", "old"]);
    }

    #[test]
    fn test_unparsable_date_fails() {
        let inv = inventory(&[("ok", "2020-06-06"), ("bad", "sometime in june")]);
        let err = list_posts(&inv).unwrap_err();
        match err {
            Error::DateParse { slug, value } => {
                assert_eq!(slug, "bad");
                assert_eq!(value, "sometime in june");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_date_fails() {
        let inv = inventory(&[("nodate", "")]);
        assert!(matches!(list_posts(&inv), Err(Error::DateParse { .. })));
    }

    #[test]
    fn test_empty_inventory() {
        assert!(list_posts(&Inventory::default()).unwrap().is_empty());
    }

    #[test]
    fn test_listing_is_idempotent() {
        let inv = inventory(&[("a", "2020-06-06"), ("b", "2020-06-06"), ("c", "2021-01-01")]);
        assert_eq!(list_posts(&inv).unwrap(), list_posts(&inv).unwrap());
    }

    #[test]
    fn test_entry_projection() {
        let item = ContentItem::new("how-react-works", "How React Works", "July 12, 2020")
            .with_spoiler("This is a test of the third article")
            .with_reading_time(ReadingTime::Minutes(5))
            .with_body("The body is not part of the listing.");
        let inv = Inventory::new(vec![item]).unwrap();

        let entry = &list_posts(&inv).unwrap()[0];
        assert_eq!(entry.title, "How React Works");
        assert_eq!(entry.date, "July 12, 2020");
        assert_eq!(entry.reading_time, ReadingTime::Minutes(5));
        assert_eq!(entry.spoiler, "This is a test of the third article");
        assert_eq!(entry.path, "articles/how-react-works");
    }

    #[test]
    fn test_parse_post_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2020, 7, 12)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        for s in ["2020-07-12", "2020/07/12", "July 12, 2020", "Jul 12, 2020", "12 July 2020"] {
            assert_eq!(parse_post_date(s), Some(expected), "format {s}");
        }

        let with_time = parse_post_date("2020-07-12 10:30:00").unwrap();
        assert_eq!(with_time.format("%H:%M").to_string(), "10:30");

        let rfc = parse_post_date("2020-07-12T10:30:00+02:00").unwrap();
        assert_eq!(rfc.format("%H:%M").to_string(), "08:30");

        assert_eq!(parse_post_date("not a date"), None);
    }
}
