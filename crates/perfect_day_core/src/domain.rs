//! crates/perfect_day_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage or serialization format, and
//! every value is built through a validating constructor so the record
//! invariants hold from the moment an instance exists.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const MINUTES_PER_DAY: i64 = 24 * 60;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid regex"));

//=========================================================================================
// Validation Errors
//=========================================================================================

/// Raised when a constructor or mutation receives malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
    #[error("username is required")]
    EmptyUsername,
    #[error("username must be 3-20 characters long")]
    UsernameLength,
    #[error("username can only contain letters, numbers, hyphens, and underscores")]
    UsernameCharset,
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
    #[error("invalid date format, expected YYYY-MM-DD: {0}")]
    InvalidDate(String),
    #[error("activity name is required")]
    EmptyActivityName,
    #[error("invalid time format, expected HH:MM: {0}")]
    InvalidTime(String),
    #[error("duration must be positive")]
    NonPositiveDuration,
    #[error("place id is required for an external place")]
    MissingPlaceId,
}

//=========================================================================================
// User
//=========================================================================================

/// A registered journal author. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    username: String,
    timezone: String,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: &str, timezone: &str) -> Result<Self, ValidationError> {
        Self::restore(username, timezone, Utc::now())
    }

    /// Rebuilds a persisted user, re-running the same checks as `new`.
    pub fn restore(
        username: &str,
        timezone: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        validate_username(username)?;
        validate_timezone(timezone)?;
        Ok(Self {
            username: username.to_string(),
            timezone: timezone.to_string(),
            created_at,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// 3-20 characters of letters, digits, `-` or `_`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.len() < 3 || username.len() > 20 {
        return Err(ValidationError::UsernameLength);
    }
    if !USERNAME_PATTERN.is_match(username) {
        return Err(ValidationError::UsernameCharset);
    }
    Ok(())
}

fn validate_timezone(timezone: &str) -> Result<(), ValidationError> {
    timezone
        .parse::<chrono_tz::Tz>()
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidTimezone(e.to_string()))
}

//=========================================================================================
// Location
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A place reference resolved through the external places provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalPlace {
    place_id: String,
    name: String,
    address: String,
    area: String,
    coordinates: Option<Coordinates>,
}

impl ExternalPlace {
    pub fn place_id(&self) -> &str {
        &self.place_id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

/// A location typed in by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeformText {
    name: String,
    area: String,
}

/// Where an activity takes place.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    ExternalPlace(ExternalPlace),
    FreeformText(FreeformText),
}

impl Location {
    pub fn external_place(
        place_id: &str,
        name: &str,
        address: &str,
        area: &str,
        coordinates: Option<Coordinates>,
    ) -> Result<Self, ValidationError> {
        if place_id.trim().is_empty() {
            return Err(ValidationError::MissingPlaceId);
        }
        Ok(Location::ExternalPlace(ExternalPlace {
            place_id: place_id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            area: area.to_string(),
            coordinates,
        }))
    }

    pub fn freeform(name: &str, area: &str) -> Self {
        Location::FreeformText(FreeformText {
            name: name.to_string(),
            area: area.to_string(),
        })
    }

    /// Builds an external-place location from a provider search hit.
    pub fn from_place(place: &PlaceResult, area: &str) -> Result<Self, ValidationError> {
        Self::external_place(
            &place.place_id,
            &place.name,
            &place.address,
            area,
            Some(Coordinates {
                latitude: place.latitude,
                longitude: place.longitude,
            }),
        )
    }

    pub fn name(&self) -> &str {
        match self {
            Location::ExternalPlace(place) => &place.name,
            Location::FreeformText(text) => &text.name,
        }
    }

    pub fn area(&self) -> &str {
        match self {
            Location::ExternalPlace(place) => &place.area,
            Location::FreeformText(text) => &text.area,
        }
    }
}

/// A single hit returned by the places provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Guesses a neighbourhood from a formatted address: the second-to-last
/// comma-separated component, or the only component when there is one.
pub fn suggest_area_from_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() >= 2 {
        parts[parts.len() - 2].trim().to_string()
    } else {
        parts[0].trim().to_string()
    }
}

//=========================================================================================
// Activity
//=========================================================================================

/// One timed, located event within a day.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    id: String,
    name: String,
    location: Location,
    start_time: String,
    duration_minutes: i64,
    description: String,
    commentary: String,
    created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        id: &str,
        name: &str,
        location: Location,
        start_time: &str,
        duration_minutes: i64,
        description: &str,
        commentary: &str,
    ) -> Result<Self, ValidationError> {
        Self::restore(
            id,
            name,
            location,
            start_time,
            duration_minutes,
            description,
            commentary,
            Utc::now(),
        )
    }

    /// Rebuilds a persisted activity with its original creation time.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: &str,
        name: &str,
        location: Location,
        start_time: &str,
        duration_minutes: i64,
        description: &str,
        commentary: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let start = parse_clock_time(start_time)?;
        if duration_minutes <= 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        if name.is_empty() {
            return Err(ValidationError::EmptyActivityName);
        }
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            location,
            start_time: start.format(TIME_FORMAT).to_string(),
            duration_minutes,
            description: description.to_string(),
            commentary: commentary.to_string(),
            created_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Zero-padded `HH:MM`.
    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn commentary(&self) -> &str {
        &self.commentary
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Start time plus duration as a clock reading. Past midnight the clock
    /// simply wraps (`23:30` + 60 minutes is `00:30`).
    pub fn end_time(&self) -> String {
        match NaiveTime::parse_from_str(&self.start_time, TIME_FORMAT) {
            Ok(start) => {
                let minutes = self.duration_minutes.rem_euclid(MINUTES_PER_DAY);
                let (end, _) = start.overflowing_add_signed(Duration::minutes(minutes));
                end.format(TIME_FORMAT).to_string()
            }
            Err(_) => self.start_time.clone(),
        }
    }

    /// `HH:MM - HH:MM`
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time())
    }
}

fn parse_clock_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|e| ValidationError::InvalidTime(e.to_string()))
}

/// Renders a minute count as `45m`, `2h` or `1h 30m`.
pub fn format_duration(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

//=========================================================================================
// Day
//=========================================================================================

/// A user-authored "perfect day": a dated, titled sequence of activities.
///
/// `areas` is derived state. It is recomputed after every change to the
/// activity list and cannot be set from outside.
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    id: String,
    title: String,
    description: String,
    username: String,
    date: String,
    areas: Vec<String>,
    activities: Vec<Activity>,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Stored fields of a day, used to rebuild it from persistence.
#[derive(Debug, Clone)]
pub struct DayParts {
    pub id: String,
    pub title: String,
    pub description: String,
    pub username: String,
    pub date: String,
    pub activities: Vec<Activity>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Day {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        username: &str,
        date: &str,
    ) -> Result<Self, ValidationError> {
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if username.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        let date = normalize_date(date)?;
        let now = Utc::now();
        Ok(Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            username: username.to_string(),
            date,
            areas: Vec::new(),
            activities: Vec::new(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a persisted day. Areas are recomputed rather than trusted.
    pub fn restore(parts: DayParts) -> Result<Self, ValidationError> {
        let mut day = Self::new(
            &parts.id,
            &parts.title,
            &parts.description,
            &parts.username,
            &parts.date,
        )?;
        day.activities = parts.activities;
        day.recompute_areas();
        day.is_deleted = parts.is_deleted;
        day.created_at = parts.created_at;
        day.updated_at = parts.updated_at;
        Ok(day)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Zero-padded `YYYY-MM-DD`.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.push(activity);
        self.recompute_areas();
        self.touch();
    }

    /// Removes the activity at `index`. Out-of-range indexes change nothing.
    pub fn remove_activity(&mut self, index: usize) -> Option<Activity> {
        if index >= self.activities.len() {
            return None;
        }
        let removed = self.activities.remove(index);
        self.recompute_areas();
        self.touch();
        Some(removed)
    }

    /// Stable ascending sort on `HH:MM` start times.
    pub fn sort_activities_by_time(&mut self) {
        self.activities
            .sort_by(|a, b| a.start_time.cmp(&b.start_time));
    }

    /// Replaces the editable fields wholesale. Identity, owner and creation
    /// time are kept.
    pub fn revise(
        &mut self,
        title: &str,
        description: &str,
        date: &str,
        activities: Vec<Activity>,
    ) -> Result<(), ValidationError> {
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let date = normalize_date(date)?;
        self.title = title.to_string();
        self.description = description.to_string();
        self.date = date;
        self.activities = activities;
        self.recompute_areas();
        self.touch();
        Ok(())
    }

    /// Marks the day deleted. Calling it again is harmless.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.touch();
    }

    /// Lowercased text the free-text filter matches against.
    pub fn searchable_text(&self) -> String {
        let mut content = String::new();
        content.push_str(&self.title);
        content.push(' ');
        content.push_str(&self.description);
        content.push(' ');
        for area in &self.areas {
            content.push_str(area);
            content.push(' ');
        }
        for activity in &self.activities {
            for part in [
                activity.name(),
                activity.description(),
                activity.commentary(),
                activity.location().name(),
            ] {
                content.push_str(part);
                content.push(' ');
            }
        }
        content.to_lowercase()
    }

    fn recompute_areas(&mut self) {
        let areas: BTreeSet<&str> = self
            .activities
            .iter()
            .map(|activity| activity.location().area())
            .filter(|area| !area.is_empty())
            .collect();
        self.areas = areas.into_iter().map(str::to_string).collect();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Dates must already be zero-padded; `2023-1-5` is rejected.
fn normalize_date(value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| ValidationError::InvalidDate(e.to_string()))?
        .format(DATE_FORMAT)
        .to_string();
    if date != value {
        return Err(ValidationError::InvalidDate(value.to_string()));
    }
    Ok(date)
}

//=========================================================================================
// Session
//=========================================================================================

/// Represents a login session (auth cookie) owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(name: &str, area: &str) -> Location {
        Location::freeform(name, area)
    }

    fn activity(name: &str, area: &str, start: &str) -> Activity {
        Activity::new("a", name, custom(name, area), start, 60, "", "").unwrap()
    }

    fn day() -> Day {
        Day::new("id1", "Coffee Day in Tokyo", "", "alice", "2023-12-01").unwrap()
    }

    #[test]
    fn new_day_starts_empty() {
        let day = day();
        assert!(day.areas().is_empty());
        assert!(day.activities().is_empty());
        assert!(!day.is_deleted());
        assert_eq!(day.created_at(), day.updated_at());
    }

    #[test]
    fn new_day_rejects_missing_fields() {
        assert_eq!(
            Day::new("x", "", "", "alice", "2023-12-01"),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            Day::new("x", "t", "", "", "2023-12-01"),
            Err(ValidationError::EmptyUsername)
        );
        assert!(matches!(
            Day::new("x", "t", "", "alice", "2023-13-45"),
            Err(ValidationError::InvalidDate(_))
        ));
        assert!(matches!(
            Day::new("x", "t", "", "alice", "not a date"),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn dates_must_be_zero_padded() {
        assert!(matches!(
            Day::new("x", "t", "", "alice", "2023-1-5"),
            Err(ValidationError::InvalidDate(_))
        ));
        let day = Day::new("x", "t", "", "alice", " 2023-01-05 ").unwrap();
        assert_eq!(day.date(), "2023-01-05");
    }

    #[test]
    fn areas_follow_activity_changes() {
        let mut day = day();
        day.add_activity(activity("Sushi", "Shinjuku", "12:00"));
        day.add_activity(activity("Coffee", "Shibuya", "09:00"));
        day.add_activity(activity("More coffee", "Shibuya", "10:00"));
        day.add_activity(activity("Walk", "", "11:00"));
        day.add_activity(activity("Art", "shibuya", "14:00"));
        assert_eq!(day.areas(), ["Shibuya", "Shinjuku", "shibuya"]);

        let removed = day.remove_activity(0).unwrap();
        assert_eq!(removed.name(), "Sushi");
        assert_eq!(day.areas(), ["Shibuya", "shibuya"]);

        assert!(day.remove_activity(10).is_none());
        assert_eq!(day.activities().len(), 4);
    }

    #[test]
    fn add_activity_bumps_updated_at() {
        let mut day = day();
        let before = day.updated_at();
        day.add_activity(activity("Coffee", "Shibuya", "09:00"));
        assert!(day.updated_at() >= before);
    }

    #[test]
    fn sorting_by_time_is_stable_and_idempotent() {
        let mut day = day();
        day.add_activity(activity("Dinner", "Ginza", "19:00"));
        day.add_activity(activity("Breakfast", "Ueno", "08:00"));
        day.add_activity(activity("Second breakfast", "Ueno", "08:00"));
        day.sort_activities_by_time();
        let once: Vec<String> = day.activities().iter().map(|a| a.name().to_string()).collect();
        assert_eq!(once, ["Breakfast", "Second breakfast", "Dinner"]);

        day.sort_activities_by_time();
        let twice: Vec<String> = day.activities().iter().map(|a| a.name().to_string()).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn soft_delete_twice_is_harmless() {
        let mut day = day();
        day.soft_delete();
        day.soft_delete();
        assert!(day.is_deleted());
    }

    #[test]
    fn revise_replaces_fields_and_keeps_identity() {
        let mut day = day();
        day.add_activity(activity("Coffee", "Shibuya", "09:00"));
        let created = day.created_at();

        day.revise("Food Tour", "eat", "2024-02-03", vec![activity("Ramen", "Ikebukuro", "13:00")])
            .unwrap();
        assert_eq!(day.id(), "id1");
        assert_eq!(day.username(), "alice");
        assert_eq!(day.created_at(), created);
        assert_eq!(day.title(), "Food Tour");
        assert_eq!(day.areas(), ["Ikebukuro"]);

        assert_eq!(
            day.revise("", "", "2024-02-03", vec![]),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(day.title(), "Food Tour");
    }

    #[test]
    fn restore_recomputes_areas() {
        let now = Utc::now();
        let day = Day::restore(DayParts {
            id: "id9".to_string(),
            title: "Museum Visit".to_string(),
            description: String::new(),
            username: "bob".to_string(),
            date: "2023-11-30".to_string(),
            activities: vec![activity("Art", "Ueno", "10:00")],
            is_deleted: true,
            created_at: now,
            updated_at: now,
        })
        .unwrap();
        assert_eq!(day.areas(), ["Ueno"]);
        assert!(day.is_deleted());
    }

    #[test]
    fn searchable_text_is_lowercase_and_complete() {
        let mut day = Day::new("x", "Coffee Day", "Slow MORNING", "alice", "2023-12-01").unwrap();
        let loc = Location::external_place("p1", "Blue Bottle", "addr", "Kiyosumi", None).unwrap();
        day.add_activity(
            Activity::new("a1", "Pour Over", loc, "09:00", 30, "Single origin", "Loved it").unwrap(),
        );
        let text = day.searchable_text();
        for needle in ["coffee day", "slow morning", "kiyosumi", "pour over", "single origin", "loved it", "blue bottle"] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn activity_validation() {
        let loc = custom("Park", "Ueno");
        assert!(matches!(
            Activity::new("a", "Walk", loc.clone(), "25:00", 30, "", ""),
            Err(ValidationError::InvalidTime(_))
        ));
        assert_eq!(
            Activity::new("a", "Walk", loc.clone(), "10:00", 0, "", ""),
            Err(ValidationError::NonPositiveDuration)
        );
        assert_eq!(
            Activity::new("a", "", loc.clone(), "10:00", 30, "", ""),
            Err(ValidationError::EmptyActivityName)
        );
        let ok = Activity::new("a", "Walk", loc, "9:05", 30, "", "").unwrap();
        assert_eq!(ok.start_time(), "09:05");
    }

    #[test]
    fn end_time_adds_duration() {
        let a = Activity::new("a", "Lunch", custom("Cafe", ""), "11:45", 90, "", "").unwrap();
        assert_eq!(a.end_time(), "13:15");
        assert_eq!(a.time_range(), "11:45 - 13:15");

        let late = Activity::new("a", "Bar", custom("Bar", ""), "23:30", 60, "", "").unwrap();
        assert_eq!(late.end_time(), "00:30");
    }

    #[test]
    fn end_time_survives_huge_durations() {
        let a = Activity::new("a", "Forever", custom("Home", ""), "10:00", i64::MAX, "", "").unwrap();
        // i64::MAX minutes leaves 18h 07m after whole days.
        assert_eq!(a.end_time(), "04:07");

        let two_days = Activity::new("a", "Trip", custom("Road", ""), "08:15", 2 * 24 * 60, "", "")
            .unwrap();
        assert_eq!(two_days.end_time(), "08:15");
    }

    #[test]
    fn external_place_requires_place_id() {
        assert_eq!(
            Location::external_place("  ", "Tower", "", "Minato", None),
            Err(ValidationError::MissingPlaceId)
        );
        let free = Location::freeform("Home", "Setagaya");
        assert_eq!(free.name(), "Home");
        assert_eq!(free.area(), "Setagaya");
    }

    #[test]
    fn location_from_place_carries_coordinates() {
        let place = PlaceResult {
            place_id: "abc".to_string(),
            name: "Tokyo Tower".to_string(),
            address: "4 Chome-2-8 Shibakoen, Minato City, Tokyo 105-0011, Japan".to_string(),
            latitude: 35.65,
            longitude: 139.74,
        };
        let location = Location::from_place(&place, "Minato").unwrap();
        match location {
            Location::ExternalPlace(ref p) => {
                assert_eq!(p.place_id(), "abc");
                assert_eq!(p.coordinates().map(|c| c.latitude), Some(35.65));
            }
            Location::FreeformText(_) => panic!("expected external place"),
        }
    }

    #[test]
    fn area_suggestion() {
        assert_eq!(suggest_area_from_address("1 Main St, Shibuya, Japan"), "Shibuya");
        assert_eq!(suggest_area_from_address("Shibuya"), "Shibuya");
        assert_eq!(suggest_area_from_address(""), "");
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(90), "1h 30m");
    }

    #[test]
    fn user_validation() {
        assert!(User::new("alice_01", "Asia/Tokyo").is_ok());
        assert_eq!(User::new("al", "UTC"), Err(ValidationError::UsernameLength));
        assert_eq!(
            User::new("a".repeat(21).as_str(), "UTC"),
            Err(ValidationError::UsernameLength)
        );
        assert_eq!(User::new("alice!", "UTC"), Err(ValidationError::UsernameCharset));
        assert!(matches!(
            User::new("alice", "Mars/Olympus"),
            Err(ValidationError::InvalidTimezone(_))
        ));
    }
}
