//! crates/perfect_day_core/src/search.rs
//!
//! The query pipeline over an already-loaded collection of days:
//! filter, then sort, then count, then paginate. Each stage completes before
//! the next begins, and no criteria value is ever rejected; anything
//! malformed degrades to the permissive default.

use crate::domain::Day;
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    CreatedAt,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Resolved ordering for the sort stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortKey {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

impl SortKey {
    /// Interprets raw `sort`/`order` values.
    ///
    /// An absent field means `created_at` in the requested order; an
    /// unrecognized field means `created_at` descending whatever the order.
    /// Any order other than `asc` is descending.
    pub fn parse(field: Option<&str>, order: Option<&str>) -> Self {
        let order = match order.map(|o| o.trim().to_ascii_lowercase()) {
            Some(o) if o == "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        };
        let field = match field.map(str::trim).filter(|f| !f.is_empty()) {
            None => SortField::CreatedAt,
            Some("date") => SortField::Date,
            Some("created_at") | Some("createdAt") => SortField::CreatedAt,
            Some("title") => SortField::Title,
            Some(_) => return Self::default(),
        };
        Self { field, order }
    }
}

/// What to look for and which page of it to return.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    /// Whitespace-separated terms; every one must occur in the searchable text.
    pub query: String,
    pub username: Option<String>,
    /// A day matches when any of its areas equals any of these, ignoring case.
    pub areas: Vec<String>,
    /// Inclusive `YYYY-MM-DD` bounds.
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort: SortKey,
    /// Zero or negative means no limit.
    pub limit: i64,
    pub offset: i64,
}

/// One page of matches plus the number of matches before paging.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub items: Vec<Day>,
    pub total: usize,
    pub limit: i64,
    pub offset: i64,
}

impl SearchResult {
    pub fn has_more(&self) -> bool {
        self.limit > 0 && self.offset.max(0) + self.limit < self.total as i64
    }
}

/// Runs the full pipeline over `days`.
pub fn search(days: Vec<Day>, criteria: &SearchCriteria) -> SearchResult {
    let mut filtered: Vec<Day> = days
        .into_iter()
        .filter(|day| matches_criteria(day, criteria))
        .collect();

    sort_days(&mut filtered, criteria.sort);

    let total = filtered.len();
    let start = usize::try_from(criteria.offset).unwrap_or(0).min(total);
    let end = if criteria.limit <= 0 {
        total
    } else {
        start
            .saturating_add(usize::try_from(criteria.limit).unwrap_or(usize::MAX))
            .min(total)
    };

    let items = filtered.drain(start..end).collect();
    SearchResult {
        items,
        total,
        limit: criteria.limit,
        offset: criteria.offset,
    }
}

/// Sorted, de-duplicated union of every day's areas.
pub fn unique_areas(days: &[Day]) -> Vec<String> {
    days.iter()
        .flat_map(|day| day.areas().iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

fn matches_criteria(day: &Day, criteria: &SearchCriteria) -> bool {
    if let Some(username) = non_empty(&criteria.username) {
        if day.username() != username {
            return false;
        }
    }
    if let Some(from) = non_empty(&criteria.date_from) {
        if day.date() < from {
            return false;
        }
    }
    if let Some(to) = non_empty(&criteria.date_to) {
        if day.date() > to {
            return false;
        }
    }
    if !criteria.areas.is_empty() && !matches_areas(day, &criteria.areas) {
        return false;
    }
    matches_query(day, &criteria.query)
}

fn matches_areas(day: &Day, wanted: &[String]) -> bool {
    wanted.iter().any(|area| {
        day.areas()
            .iter()
            .any(|own| own.to_lowercase() == area.to_lowercase())
    })
}

fn matches_query(day: &Day, query: &str) -> bool {
    let query = query.to_lowercase();
    let mut terms = query.split_whitespace().peekable();
    if terms.peek().is_none() {
        return true;
    }
    let content = day.searchable_text();
    terms.all(|term| content.contains(term))
}

fn sort_days(days: &mut [Day], key: SortKey) {
    days.sort_by(|a, b| {
        let ordering = compare(a, b, key.field);
        match key.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &Day, b: &Day, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date().cmp(b.date()),
        SortField::CreatedAt => a.created_at().cmp(&b.created_at()),
        SortField::Title => a.title().cmp(b.title()),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Activity, DayParts, Location};
    use chrono::{Duration, TimeZone, Utc};

    fn make_day(id: &str, user: &str, date: &str, area: &str, text: &str, deleted: bool, minute: i64) -> Day {
        let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minute);
        let activity = Activity::new(
            &format!("{id}-a"),
            text,
            Location::freeform("Spot", area),
            "10:00",
            60,
            "",
            "",
        )
        .unwrap();
        Day::restore(DayParts {
            id: id.to_string(),
            title: format!("Day {id}"),
            description: String::new(),
            username: user.to_string(),
            date: date.to_string(),
            activities: vec![activity],
            is_deleted: deleted,
            created_at: stamp,
            updated_at: stamp,
        })
        .unwrap()
    }

    fn fixture() -> Vec<Day> {
        vec![
            make_day("id1", "alice", "2023-12-01", "Shibuya", "coffee", false, 1),
            make_day("id2", "bob", "2023-12-02", "Shinjuku", "sushi", false, 2),
            make_day("id3", "alice", "2023-11-30", "Ueno", "art", false, 3),
            make_day("id4", "charlie", "2023-12-03", "Shibuya", "coffee", true, 4),
        ]
    }

    fn live(days: Vec<Day>) -> Vec<Day> {
        days.into_iter().filter(|d| !d.is_deleted()).collect()
    }

    fn ids(result: &SearchResult) -> Vec<&str> {
        result.items.iter().map(|d| d.id()).collect()
    }

    #[test]
    fn free_text_respects_deletion_filter() {
        let criteria = SearchCriteria {
            query: "coffee".to_string(),
            ..Default::default()
        };
        assert_eq!(search(fixture(), &criteria).total, 2);
        assert_eq!(search(live(fixture()), &criteria).total, 1);
    }

    #[test]
    fn free_text_terms_are_anded() {
        let criteria = SearchCriteria {
            query: "COFFEE shibuya".to_string(),
            ..Default::default()
        };
        assert_eq!(search(live(fixture()), &criteria).total, 1);

        let criteria = SearchCriteria {
            query: "coffee ueno".to_string(),
            ..Default::default()
        };
        assert_eq!(search(live(fixture()), &criteria).total, 0);
    }

    #[test]
    fn username_filter() {
        let criteria = SearchCriteria {
            username: Some("alice".to_string()),
            ..Default::default()
        };
        let result = search(fixture(), &criteria);
        assert_eq!(result.total, 2);
        let mut found = ids(&result);
        found.sort();
        assert_eq!(found, ["id1", "id3"]);
    }

    #[test]
    fn area_filter_ignores_case() {
        let criteria = SearchCriteria {
            areas: vec!["shibuya".to_string()],
            ..Default::default()
        };
        assert_eq!(search(fixture(), &criteria).total, 2);

        let criteria = SearchCriteria {
            areas: vec!["Nowhere".to_string(), "UENO".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&search(fixture(), &criteria)), ["id3"]);
    }

    #[test]
    fn date_range_is_inclusive() {
        let criteria = SearchCriteria {
            date_from: Some("2023-12-01".to_string()),
            date_to: Some("2023-12-31".to_string()),
            sort: SortKey::parse(Some("date"), Some("asc")),
            ..Default::default()
        };
        assert_eq!(search(fixture(), &criteria).total, 3);
        let result = search(live(fixture()), &criteria);
        assert_eq!(ids(&result), ["id1", "id2"]);
    }

    #[test]
    fn default_sort_is_newest_first() {
        let result = search(fixture(), &SearchCriteria::default());
        assert_eq!(ids(&result), ["id4", "id3", "id2", "id1"]);
    }

    #[test]
    fn unknown_sort_field_falls_back_to_created_desc() {
        let key = SortKey::parse(Some("popularity"), Some("asc"));
        assert_eq!(key, SortKey::default());
        let key = SortKey::parse(None, Some("asc"));
        assert_eq!(key.field, SortField::CreatedAt);
        assert_eq!(key.order, SortOrder::Asc);
    }

    #[test]
    fn title_sort_both_directions() {
        let now = Utc::now();
        let days: Vec<Day> = ["Coffee Day in Tokyo", "Food Tour", "Museum Visit"]
            .iter()
            .enumerate()
            .map(|(i, title)| {
                Day::restore(DayParts {
                    id: format!("t{i}"),
                    title: title.to_string(),
                    description: String::new(),
                    username: "alice".to_string(),
                    date: "2023-12-01".to_string(),
                    activities: vec![],
                    is_deleted: false,
                    created_at: now,
                    updated_at: now,
                })
                .unwrap()
            })
            .collect();

        let asc = search(
            days.clone(),
            &SearchCriteria {
                sort: SortKey::parse(Some("title"), Some("asc")),
                ..Default::default()
            },
        );
        assert_eq!(ids(&asc), ["t0", "t1", "t2"]);

        let desc = search(
            days,
            &SearchCriteria {
                sort: SortKey::parse(Some("title"), Some("desc")),
                ..Default::default()
            },
        );
        assert_eq!(ids(&desc), ["t2", "t1", "t0"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let days = live(fixture());
        let criteria = SearchCriteria {
            sort: SortKey {
                field: SortField::Title,
                order: SortOrder::Desc,
            },
            ..Default::default()
        };
        let same_title: Vec<Day> = days
            .into_iter()
            .map(|mut d| {
                let activities = d.activities().to_vec();
                let date = d.date().to_string();
                d.revise("Same", "", &date, activities).unwrap();
                d
            })
            .collect();
        assert_eq!(ids(&search(same_title, &criteria)), ["id1", "id2", "id3"]);
    }

    #[test]
    fn pagination_boundaries() {
        let page = search(
            fixture(),
            &SearchCriteria {
                limit: 2,
                offset: 1,
                ..Default::default()
            },
        );
        assert_eq!(page.total, 4);
        assert_eq!(ids(&page), ["id3", "id2"]);
        assert!(page.has_more());

        let short = search(
            fixture(),
            &SearchCriteria {
                limit: 3,
                offset: 3,
                ..Default::default()
            },
        );
        assert_eq!(short.items.len(), 1);
        assert!(!short.has_more());

        let past_end = search(
            fixture(),
            &SearchCriteria {
                limit: 2,
                offset: 10,
                ..Default::default()
            },
        );
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 4);

        let unlimited = search(
            fixture(),
            &SearchCriteria {
                limit: 0,
                offset: 1,
                ..Default::default()
            },
        );
        assert_eq!(ids(&unlimited), ["id3", "id2", "id1"]);

        let negative = search(
            fixture(),
            &SearchCriteria {
                limit: -5,
                offset: -3,
                ..Default::default()
            },
        );
        assert_eq!(negative.items.len(), 4);
    }

    #[test]
    fn total_ignores_paging() {
        for (limit, offset) in [(0, 0), (1, 0), (2, 3), (10, 10)] {
            let result = search(
                fixture(),
                &SearchCriteria {
                    query: "coffee".to_string(),
                    limit,
                    offset,
                    ..Default::default()
                },
            );
            assert_eq!(result.total, 2);
            assert!(result.items.len() <= (limit.max(0) as usize).max(result.total));
        }
    }

    #[test]
    fn unique_areas_across_days() {
        assert_eq!(unique_areas(&fixture()), ["Shibuya", "Shinjuku", "Ueno"]);
        assert!(unique_areas(&[]).is_empty());
    }
}
