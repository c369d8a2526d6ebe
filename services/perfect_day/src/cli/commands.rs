//! services/perfect_day/src/cli/commands.rs
//!
//! The terminal commands. Each one reads its answers through a `Prompt` and
//! talks to storage and the places provider through the core ports.

use super::args::{Command, SearchArgs, USAGE};
use super::config::{
    clear_current_user, read_current_user, write_current_user, CliConfig, CONFIG_FILE_NAME,
};
use super::prompt::Prompt;
use super::render::{self, short_id};
use super::CliError;
use chrono::Utc;
use chrono_tz::Tz;
use perfect_day_core::domain::{suggest_area_from_address, Activity, Day, Location, User};
use perfect_day_core::ports::{PlacesService, PortError, StorageService};
use perfect_day_core::search::{search, SearchCriteria, SortKey};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const MAX_PLACE_CHOICES: usize = 5;

/// What every command (other than `init`) runs against.
pub struct CliContext<R, W> {
    pub storage: Arc<dyn StorageService>,
    pub places: Arc<dyn PlacesService>,
    /// Holds the store and the remembered login.
    pub data_dir: PathBuf,
    pub io: Prompt<R, W>,
}

impl<R: BufRead, W: Write> CliContext<R, W> {
    async fn logged_in_user(&self) -> Result<String, CliError> {
        read_current_user(&self.data_dir)
            .await
            .ok_or(CliError::NotLoggedIn)
    }
}

pub async fn run<R: BufRead, W: Write>(
    command: Command,
    ctx: &mut CliContext<R, W>,
) -> Result<(), CliError> {
    match command {
        Command::Login => login(ctx).await,
        Command::Logout => logout(ctx).await,
        Command::Create => create(ctx).await,
        Command::Edit { id } => edit(ctx, &id).await,
        Command::List { user, all, deleted } => list(ctx, user, all, deleted).await,
        Command::Show { id } => show(ctx, &id).await,
        Command::Search(args) => search_days(ctx, args).await,
        Command::Delete { id, yes } => delete(ctx, &id, yes).await,
        Command::Version => version(ctx.io.out()),
        Command::Help => {
            write!(ctx.io.out(), "{}", USAGE)?;
            Ok(())
        }
        Command::Init { .. } => Err(CliError::Usage(
            "init is handled before the data directory is opened".to_string(),
        )),
    }
}

pub fn version<W: Write>(out: &mut W) -> Result<(), CliError> {
    writeln!(out, "perfect-day version {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

//=========================================================================================
// Setup and Login
//=========================================================================================

/// Writes `<config_dir>/config.json`. Flags are applied as given; with no
/// flags the settings are asked for interactively.
pub async fn init<R: BufRead, W: Write>(
    config_dir: &Path,
    api_key: Option<String>,
    data_dir: Option<String>,
    io: &mut Prompt<R, W>,
) -> Result<(), CliError> {
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    let mut config = CliConfig::load(&config_path).await?;

    if api_key.is_none() && data_dir.is_none() {
        writeln!(io.out(), "Perfect Day configuration setup")?;
        writeln!(io.out(), "Press Enter to keep the value in brackets.\n")?;

        let current_key = if config.google_places_api_key.is_some() {
            "***configured***"
        } else {
            "not set"
        };
        let key = io.ask(&format!("Google Places API key [{}]: ", current_key))?;
        if !key.is_empty() {
            config.google_places_api_key = Some(key);
        }

        let current_dir = config.data_dir_or(config_dir);
        let dir = io.ask(&format!("Data directory [{}]: ", current_dir.display()))?;
        if !dir.is_empty() {
            config.data_directory = Some(PathBuf::from(dir));
        }
    } else {
        if let Some(key) = api_key {
            config.google_places_api_key = Some(key);
        }
        if let Some(dir) = data_dir {
            config.data_directory = Some(PathBuf::from(dir));
        }
    }

    if config.data_directory.is_none() {
        config.data_directory = Some(config_dir.to_path_buf());
    }
    config.save(&config_path).await?;

    let data_dir = config.data_dir_or(config_dir);
    tokio::fs::create_dir_all(&data_dir).await?;

    let out = io.out();
    writeln!(out, "\nConfiguration saved to: {}", config_path.display())?;
    writeln!(out, "  Data Directory: {}", data_dir.display())?;
    if config.google_places_api_key.is_some() {
        writeln!(out, "  Google Places API: Configured")?;
    } else {
        writeln!(out, "  Google Places API: Not configured (custom locations only)")?;
    }
    writeln!(
        out,
        "\nPerfect Day is ready to use! Run 'perfect-day login' to get started."
    )?;
    Ok(())
}

async fn login<R: BufRead, W: Write>(ctx: &mut CliContext<R, W>) -> Result<(), CliError> {
    let username = ctx.io.ask("Username: ")?;
    if username.is_empty() {
        return Err(CliError::Usage("Username cannot be empty".to_string()));
    }

    let user = if ctx.storage.user_exists(&username).await {
        let user = ctx.storage.load_user(&username).await?;
        writeln!(
            ctx.io.out(),
            "Welcome back, {}! (Timezone: {})",
            user.username(),
            user.timezone()
        )?;
        user
    } else {
        writeln!(
            ctx.io.out(),
            "User '{}' not found. Let's create a new account.",
            username
        )?;
        let timezone = ctx
            .io
            .ask_or("Timezone (e.g., Asia/Tokyo, America/New_York) [UTC]: ", "UTC")?;
        let user = User::new(&username, &timezone).map_err(PortError::from)?;
        ctx.storage.save_user(&user).await?;
        writeln!(
            ctx.io.out(),
            "Welcome, {}! Your account has been created with timezone: {}",
            user.username(),
            user.timezone()
        )?;
        user
    };

    write_current_user(&ctx.data_dir, user.username()).await?;
    Ok(())
}

async fn logout<R: BufRead, W: Write>(ctx: &mut CliContext<R, W>) -> Result<(), CliError> {
    if clear_current_user(&ctx.data_dir).await? {
        writeln!(ctx.io.out(), "Logged out.")?;
    } else {
        writeln!(ctx.io.out(), "Nobody is logged in.")?;
    }
    Ok(())
}

//=========================================================================================
// Creating and Editing
//=========================================================================================

/// Today's date in `timezone`, falling back to UTC for unknown zone names.
fn today_in(timezone: &str) -> String {
    let tz: Tz = timezone.parse().unwrap_or(Tz::UTC);
    Utc::now().with_timezone(&tz).format("%Y-%m-%d").to_string()
}

enum ActivityOutcome {
    Finished,
    Skipped,
    Ready(Activity),
}

async fn create<R: BufRead, W: Write>(ctx: &mut CliContext<R, W>) -> Result<(), CliError> {
    let username = ctx.logged_in_user().await?;
    let timezone = match ctx.storage.load_user(&username).await {
        Ok(user) => user.timezone().to_string(),
        Err(_) => "UTC".to_string(),
    };

    writeln!(ctx.io.out(), "Creating a new Perfect Day...\n")?;
    let title = ctx.io.ask("Title: ")?;
    if title.is_empty() {
        return Err(CliError::Usage("Title is required".to_string()));
    }
    let description = ctx.io.ask("Description (optional): ")?;
    let today = today_in(&timezone);
    let date = ctx
        .io
        .ask_or(&format!("Date (YYYY-MM-DD) [{}]: ", today), &today)?;

    let mut day = Day::new(
        &Uuid::new_v4().to_string(),
        &title,
        &description,
        &username,
        &date,
    )
    .map_err(PortError::from)?;

    writeln!(
        ctx.io.out(),
        "\nNow let's add activities. Leave the name blank to finish."
    )?;
    loop {
        match prompt_activity(ctx).await? {
            ActivityOutcome::Finished => break,
            ActivityOutcome::Skipped => continue,
            ActivityOutcome::Ready(activity) => {
                writeln!(ctx.io.out(), "Added: {}", activity.name())?;
                day.add_activity(activity);
            }
        }
    }
    day.sort_activities_by_time();

    ctx.storage.save_day(&day).await?;
    debug!(id = %day.id(), username = %username, "Saved new day.");

    writeln!(ctx.io.out(), "\nPerfect day created successfully!")?;
    writeln!(ctx.io.out(), "ID: {}", day.id())?;
    writeln!(ctx.io.out(), "Activities: {}", day.activities().len())?;
    Ok(())
}

async fn prompt_activity<R: BufRead, W: Write>(
    ctx: &mut CliContext<R, W>,
) -> Result<ActivityOutcome, CliError> {
    writeln!(ctx.io.out(), "\n--- Adding Activity ---")?;
    let name = ctx.io.ask("Activity name (blank to finish): ")?;
    if name.is_empty() {
        return Ok(ActivityOutcome::Finished);
    }

    let Some(location) = prompt_location(ctx).await? else {
        writeln!(ctx.io.out(), "A location is required, skipping activity.")?;
        return Ok(ActivityOutcome::Skipped);
    };

    let start_time = ctx.io.ask("Start time (HH:MM): ")?;
    let duration = match ctx.io.ask("Duration in minutes: ")?.parse::<i64>() {
        Ok(minutes) => minutes,
        Err(_) => {
            writeln!(ctx.io.out(), "Invalid duration, skipping activity.")?;
            return Ok(ActivityOutcome::Skipped);
        }
    };
    let description = ctx.io.ask("Activity description (optional): ")?;
    let commentary = ctx.io.ask("Personal commentary (optional): ")?;

    match Activity::new(
        &Uuid::new_v4().to_string(),
        &name,
        location,
        &start_time,
        duration,
        &description,
        &commentary,
    ) {
        Ok(activity) => Ok(ActivityOutcome::Ready(activity)),
        Err(e) => {
            writeln!(ctx.io.out(), "Error creating activity: {}", e)?;
            Ok(ActivityOutcome::Skipped)
        }
    }
}

async fn prompt_location<R: BufRead, W: Write>(
    ctx: &mut CliContext<R, W>,
) -> Result<Option<Location>, CliError> {
    writeln!(ctx.io.out(), "Location options:")?;
    writeln!(ctx.io.out(), "1. Search places")?;
    writeln!(ctx.io.out(), "2. Enter custom location")?;
    let choice = ctx.io.ask("Choose option (1 or 2): ")?;

    match choice.as_str() {
        "1" if !ctx.places.is_enabled() => {
            writeln!(
                ctx.io.out(),
                "Place search is not configured; entering a custom location instead."
            )?;
        }
        "1" => {
            if let Some(location) = prompt_place_search(ctx).await? {
                return Ok(Some(location));
            }
        }
        "2" => {}
        _ => writeln!(ctx.io.out(), "Invalid choice, using a custom location.")?,
    }
    prompt_custom_location(&mut ctx.io)
}

/// Searches the provider and lets the user pick one of the first few hits.
/// `None` means the user fell through to a custom location.
async fn prompt_place_search<R: BufRead, W: Write>(
    ctx: &mut CliContext<R, W>,
) -> Result<Option<Location>, CliError> {
    let query = ctx.io.ask("Search for place: ")?;
    if query.is_empty() {
        return Ok(None);
    }

    let results = match ctx.places.search_places(&query).await {
        Ok(results) => results,
        Err(e) => {
            writeln!(ctx.io.out(), "Error searching places: {}", e)?;
            return Ok(None);
        }
    };
    if results.is_empty() {
        writeln!(ctx.io.out(), "No places found.")?;
        return Ok(None);
    }

    let shown = &results[..results.len().min(MAX_PLACE_CHOICES)];
    writeln!(ctx.io.out(), "\nFound places:")?;
    for (i, place) in shown.iter().enumerate() {
        writeln!(ctx.io.out(), "{}. {} - {}", i + 1, place.name, place.address)?;
    }

    let answer = ctx.io.ask(&format!(
        "Select place (1-{}) or 0 for custom: ",
        shown.len()
    ))?;
    let index = match answer.parse::<usize>() {
        Ok(n) if (1..=shown.len()).contains(&n) => n - 1,
        _ => return Ok(None),
    };

    // Details carry the full formatted address; the search hit is the fallback.
    let picked = &shown[index];
    let place = match ctx.places.place_details(&picked.place_id).await {
        Ok(place) => place,
        Err(e) => {
            debug!(place_id = %picked.place_id, "Place details unavailable: {}", e);
            picked.clone()
        }
    };
    let suggested = suggest_area_from_address(&place.address);
    let area = ctx.io.ask_or(&format!("Area [{}]: ", suggested), &suggested)?;
    Ok(Some(Location::from_place(&place, &area).map_err(PortError::from)?))
}

fn prompt_custom_location<R: BufRead, W: Write>(
    io: &mut Prompt<R, W>,
) -> Result<Option<Location>, CliError> {
    let name = io.ask("Location name: ")?;
    if name.is_empty() {
        return Ok(None);
    }
    let area = io.ask("Area (e.g., Shibuya, Asakusa): ")?;
    Ok(Some(Location::freeform(&name, &area)))
}

/// Deleted days exist only for their owner.
fn visible_to(day: &Day, current_user: Option<&str>) -> bool {
    !day.is_deleted() || current_user == Some(day.username())
}

fn matches_id(day: &Day, key: &str) -> bool {
    day.id() == key || short_id(day.id()) == key
}

/// One of `username`'s own days by full id or short prefix, deleted ones included.
async fn find_own_day<R: BufRead, W: Write>(
    ctx: &CliContext<R, W>,
    username: &str,
    key: &str,
) -> Result<Day, CliError> {
    ctx.storage
        .list_days_by_owner(username, true)
        .await
        .into_iter()
        .find(|day| matches_id(day, key))
        .ok_or_else(|| {
            CliError::Usage(format!(
                "Perfect day with ID '{}' not found or you don't have permission to change it",
                key
            ))
        })
}

async fn edit<R: BufRead, W: Write>(ctx: &mut CliContext<R, W>, key: &str) -> Result<(), CliError> {
    let username = ctx.logged_in_user().await?;
    let mut day = find_own_day(ctx, &username, key).await?;
    if day.is_deleted() {
        return Err(CliError::Usage(
            "Cannot edit a deleted perfect day".to_string(),
        ));
    }

    writeln!(ctx.io.out(), "Editing Perfect Day: {}", day.title())?;
    writeln!(ctx.io.out(), "Current date: {}", day.date())?;
    writeln!(ctx.io.out(), "Current activities: {}", day.activities().len())?;

    loop {
        let out = ctx.io.out();
        writeln!(out, "\n=== Edit Menu ===")?;
        writeln!(out, "1. Edit basic info (title, description, date)")?;
        writeln!(out, "2. Add activity")?;
        writeln!(out, "3. Remove activity")?;
        writeln!(out, "4. Sort activities by time")?;
        writeln!(out, "5. Preview")?;
        writeln!(out, "6. Save and exit")?;
        writeln!(out, "7. Exit without saving")?;

        match ctx.io.ask("Choose an option (1-7): ")?.as_str() {
            "1" => edit_basic_info(&mut ctx.io, &mut day)?,
            "2" => match prompt_activity(ctx).await? {
                ActivityOutcome::Ready(activity) => {
                    day.add_activity(activity);
                    day.sort_activities_by_time();
                    writeln!(ctx.io.out(), "Activity added.")?;
                }
                _ => writeln!(ctx.io.out(), "No activity added.")?,
            },
            "3" => remove_activity(&mut ctx.io, &mut day)?,
            "4" => {
                day.sort_activities_by_time();
                writeln!(ctx.io.out(), "Activities sorted by time.")?;
            }
            "5" => {
                writeln!(ctx.io.out(), "\n=== Preview ===")?;
                render::day_details(ctx.io.out(), &day)?;
            }
            "6" => {
                ctx.storage.save_day(&day).await?;
                debug!(id = %day.id(), "Saved edited day.");
                writeln!(ctx.io.out(), "Perfect day saved successfully!")?;
                return Ok(());
            }
            "7" => {
                writeln!(ctx.io.out(), "Exiting without saving changes.")?;
                return Ok(());
            }
            _ => writeln!(ctx.io.out(), "Invalid choice. Please enter 1-7.")?,
        }
    }
}

fn edit_basic_info<R: BufRead, W: Write>(
    io: &mut Prompt<R, W>,
    day: &mut Day,
) -> Result<(), CliError> {
    writeln!(io.out(), "\n=== Edit Basic Info ===")?;
    let title = io.ask_or(&format!("Title [{}]: ", day.title()), day.title())?;
    let description = io.ask_or(
        &format!("Description [{}]: ", day.description()),
        day.description(),
    )?;
    let date = io.ask_or(&format!("Date (YYYY-MM-DD) [{}]: ", day.date()), day.date())?;

    let activities = day.activities().to_vec();
    match day.revise(&title, &description, &date, activities) {
        Ok(()) => writeln!(io.out(), "Basic info updated.")?,
        Err(e) => writeln!(io.out(), "Basic info not updated: {}", e)?,
    }
    Ok(())
}

fn remove_activity<R: BufRead, W: Write>(
    io: &mut Prompt<R, W>,
    day: &mut Day,
) -> Result<(), CliError> {
    if day.activities().is_empty() {
        writeln!(io.out(), "No activities to remove.")?;
        return Ok(());
    }

    writeln!(io.out(), "\nCurrent activities:")?;
    for (i, activity) in day.activities().iter().enumerate() {
        writeln!(
            io.out(),
            "{}. {} at {} ({})",
            i + 1,
            activity.name(),
            activity.location().name(),
            activity.time_range()
        )?;
    }

    let count = day.activities().len();
    let index = match io.ask("Enter activity number to remove: ")?.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => n - 1,
        _ => {
            writeln!(io.out(), "Invalid activity number.")?;
            return Ok(());
        }
    };

    let label = format!("Remove '{}'?", day.activities()[index].name());
    if io.confirm(&label)? {
        day.remove_activity(index);
        writeln!(io.out(), "Activity removed.")?;
    }
    Ok(())
}

//=========================================================================================
// Reading and Deleting
//=========================================================================================

async fn list<R: BufRead, W: Write>(
    ctx: &mut CliContext<R, W>,
    user: Option<String>,
    all: bool,
    include_deleted: bool,
) -> Result<(), CliError> {
    let current = read_current_user(&ctx.data_dir).await;
    let mut days = if all {
        ctx.storage.list_all_days(include_deleted).await
    } else {
        let owner = user.or_else(|| current.clone()).ok_or_else(|| {
            CliError::Usage("Please login first using 'perfect-day login' or use --all".to_string())
        })?;
        ctx.storage.list_days_by_owner(&owner, include_deleted).await
    };
    days.retain(|day| visible_to(day, current.as_deref()));

    if days.is_empty() {
        writeln!(ctx.io.out(), "No perfect days found")?;
        return Ok(());
    }

    let ordered = search(days, &SearchCriteria::default());
    render::day_table(ctx.io.out(), &ordered.items)?;
    Ok(())
}

async fn show<R: BufRead, W: Write>(ctx: &mut CliContext<R, W>, key: &str) -> Result<(), CliError> {
    let days = ctx.storage.list_all_days(true).await;
    let current = read_current_user(&ctx.data_dir).await;

    let matches: Vec<&Day> = days
        .iter()
        .filter(|day| matches_id(day, key) && visible_to(day, current.as_deref()))
        .collect();
    // A prefix can collide across owners; the caller's own day wins.
    let day = matches
        .iter()
        .find(|day| Some(day.username()) == current.as_deref())
        .or(matches.first())
        .copied()
        .ok_or_else(|| CliError::Usage(format!("Perfect day with ID '{}' not found", key)))?;

    render::day_details(ctx.io.out(), day)?;
    Ok(())
}

async fn search_days<R: BufRead, W: Write>(
    ctx: &mut CliContext<R, W>,
    args: SearchArgs,
) -> Result<(), CliError> {
    let criteria = SearchCriteria {
        query: args.query,
        username: args.user,
        areas: args.areas,
        date_from: args.from,
        date_to: args.to,
        sort: SortKey::parse(args.sort.as_deref(), args.order.as_deref()),
        limit: args.limit,
        offset: args.offset.max(0),
    };
    let result = search(ctx.storage.list_all_days(false).await, &criteria);
    render::search_results(ctx.io.out(), &result)?;
    Ok(())
}

async fn delete<R: BufRead, W: Write>(
    ctx: &mut CliContext<R, W>,
    key: &str,
    skip_confirmation: bool,
) -> Result<(), CliError> {
    let username = ctx.logged_in_user().await?;
    let mut day = find_own_day(ctx, &username, key).await?;
    if day.is_deleted() {
        writeln!(ctx.io.out(), "Perfect day is already deleted")?;
        return Ok(());
    }

    writeln!(ctx.io.out(), "Perfect Day: {}", day.title())?;
    writeln!(ctx.io.out(), "Date: {}", day.date())?;
    writeln!(ctx.io.out(), "Activities: {}", day.activities().len())?;

    if !skip_confirmation
        && !ctx
            .io
            .confirm("Are you sure you want to delete this perfect day?")?
    {
        writeln!(ctx.io.out(), "Delete cancelled")?;
        return Ok(());
    }

    day.soft_delete();
    ctx.storage.save_day(&day).await?;
    writeln!(ctx.io.out(), "Perfect day '{}' has been deleted", day.title())?;
    Ok(())
}
