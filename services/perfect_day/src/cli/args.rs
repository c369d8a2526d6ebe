//! services/perfect_day/src/cli/args.rs
//!
//! Command-line parsing for the terminal client. Flags accept both
//! `--flag value` and `--flag=value`.

use super::CliError;

pub const USAGE: &str = "\
perfect-day - share and discover perfect days

Usage: perfect-day <command> [options]

Commands:
  init [--api-key KEY] [--data-dir DIR]   Write ~/.perfect-day/config.json
  login                                   Log in, creating the user if needed
  logout                                  Forget the logged-in user
  create                                  Create a perfect day interactively
  edit <id>                               Edit one of your perfect days
  list [--user U] [--all] [--deleted]     List perfect days
  show <id>                               Show a perfect day (full id or 8-char prefix)
  search [options]                        Search perfect days
      -q, --query TEXT    free-text terms
      -a, --areas A,B     comma-separated areas
      -u, --user NAME     only this author
          --from DATE     inclusive lower date bound
          --to DATE       inclusive upper date bound
          --sort FIELD    date | created_at | title
          --order ORDER   asc | desc
      -l, --limit N       results per page (default 10)
          --offset N      results to skip
  delete <id> [--yes]                     Delete one of your perfect days
  version                                 Print the version
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    pub query: String,
    pub areas: Vec<String>,
    pub user: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for SearchArgs {
    fn default() -> Self {
        Self {
            query: String::new(),
            areas: Vec::new(),
            user: None,
            from: None,
            to: None,
            sort: None,
            order: None,
            limit: 10,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init {
        api_key: Option<String>,
        data_dir: Option<String>,
    },
    Login,
    Logout,
    Create,
    Edit {
        id: String,
    },
    List {
        user: Option<String>,
        all: bool,
        deleted: bool,
    },
    Show {
        id: String,
    },
    Search(SearchArgs),
    Delete {
        id: String,
        yes: bool,
    },
    Version,
    Help,
}

/// A flag-or-positional token stream with `--name=value` splitting.
struct Tokens {
    items: std::vec::IntoIter<String>,
    pending: Option<String>,
}

impl Tokens {
    fn new(args: Vec<String>) -> Self {
        Self {
            items: args.into_iter(),
            pending: None,
        }
    }

    /// Next raw token; `--name=value` yields `--name` and queues `value`.
    fn next(&mut self) -> Option<String> {
        if let Some(value) = self.pending.take() {
            return Some(value);
        }
        let token = self.items.next()?;
        if token.starts_with("--") {
            if let Some((name, value)) = token.split_once('=') {
                self.pending = Some(value.to_string());
                return Some(name.to_string());
            }
        }
        Some(token)
    }

    fn value_for(&mut self, flag: &str) -> Result<String, CliError> {
        self.next()
            .ok_or_else(|| CliError::Usage(format!("{} requires a value", flag)))
    }
}

fn parse_number(flag: &str, raw: &str) -> Result<i64, CliError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CliError::Usage(format!("{} expects a number, got '{}'", flag, raw)))
}

fn unexpected(token: &str, command: &str) -> CliError {
    CliError::Usage(format!("unexpected argument '{}' for {}", token, command))
}

fn single_id(tokens: &mut Tokens, command: &str) -> Result<String, CliError> {
    let id = tokens
        .next()
        .ok_or_else(|| CliError::Usage(format!("{} requires an <id>", command)))?;
    if let Some(extra) = tokens.next() {
        return Err(unexpected(&extra, command));
    }
    Ok(id)
}

/// Parses the arguments after the program name.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut tokens = Tokens::new(args.into_iter().collect());
    let Some(command) = tokens.next() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "help" | "--help" | "-h" => Ok(Command::Help),
        "version" | "--version" => Ok(Command::Version),
        "login" => Ok(Command::Login),
        "logout" => Ok(Command::Logout),
        "create" => Ok(Command::Create),
        "edit" => Ok(Command::Edit {
            id: single_id(&mut tokens, "edit")?,
        }),
        "show" => Ok(Command::Show {
            id: single_id(&mut tokens, "show")?,
        }),
        "init" => {
            let (mut api_key, mut data_dir) = (None, None);
            while let Some(token) = tokens.next() {
                match token.as_str() {
                    "--api-key" => api_key = Some(tokens.value_for("--api-key")?),
                    "--data-dir" => data_dir = Some(tokens.value_for("--data-dir")?),
                    other => return Err(unexpected(other, "init")),
                }
            }
            Ok(Command::Init { api_key, data_dir })
        }
        "list" => {
            let (mut user, mut all, mut deleted) = (None, false, false);
            while let Some(token) = tokens.next() {
                match token.as_str() {
                    "--user" | "-u" => user = Some(tokens.value_for("--user")?),
                    "--all" | "-a" => all = true,
                    "--deleted" => deleted = true,
                    other => return Err(unexpected(other, "list")),
                }
            }
            Ok(Command::List { user, all, deleted })
        }
        "delete" => {
            let (mut id, mut yes) = (None, false);
            while let Some(token) = tokens.next() {
                match token.as_str() {
                    "--yes" | "-y" => yes = true,
                    other if id.is_none() && !other.starts_with('-') => id = Some(other.to_string()),
                    other => return Err(unexpected(other, "delete")),
                }
            }
            let id = id.ok_or_else(|| CliError::Usage("delete requires an <id>".to_string()))?;
            Ok(Command::Delete { id, yes })
        }
        "search" => {
            let mut search = SearchArgs::default();
            while let Some(token) = tokens.next() {
                match token.as_str() {
                    "--query" | "-q" => search.query = tokens.value_for("--query")?,
                    "--areas" | "-a" => {
                        let raw = tokens.value_for("--areas")?;
                        search.areas.extend(
                            raw.split(',')
                                .map(str::trim)
                                .filter(|a| !a.is_empty())
                                .map(str::to_string),
                        );
                    }
                    "--user" | "-u" => search.user = Some(tokens.value_for("--user")?),
                    "--from" => search.from = Some(tokens.value_for("--from")?),
                    "--to" => search.to = Some(tokens.value_for("--to")?),
                    "--sort" => search.sort = Some(tokens.value_for("--sort")?),
                    "--order" => search.order = Some(tokens.value_for("--order")?),
                    "--limit" | "-l" => {
                        search.limit = parse_number("--limit", &tokens.value_for("--limit")?)?
                    }
                    "--offset" => {
                        search.offset = parse_number("--offset", &tokens.value_for("--offset")?)?
                    }
                    other => return Err(unexpected(other, "search")),
                }
            }
            Ok(Command::Search(search))
        }
        other => Err(CliError::Usage(format!(
            "unknown command '{}'; run 'perfect-day help'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CliError> {
        parse_args(line.split_whitespace().map(str::to_string))
    }

    #[test]
    fn no_arguments_is_help() {
        assert_eq!(parse("").unwrap(), Command::Help);
    }

    #[test]
    fn parses_init_flags_in_both_forms() {
        assert_eq!(
            parse("init --api-key=abc --data-dir /tmp/pd").unwrap(),
            Command::Init {
                api_key: Some("abc".to_string()),
                data_dir: Some("/tmp/pd".to_string()),
            }
        );
    }

    #[test]
    fn parses_search_flags() {
        let command = parse("search -q coffee -a Shibuya,Asakusa -u alice --from 2023-01-01 --sort date --order asc -l 5 --offset 10").unwrap();
        assert_eq!(
            command,
            Command::Search(SearchArgs {
                query: "coffee".to_string(),
                areas: vec!["Shibuya".to_string(), "Asakusa".to_string()],
                user: Some("alice".to_string()),
                from: Some("2023-01-01".to_string()),
                to: None,
                sort: Some("date".to_string()),
                order: Some("asc".to_string()),
                limit: 5,
                offset: 10,
            })
        );
        assert_eq!(parse("search").unwrap(), Command::Search(SearchArgs::default()));
    }

    #[test]
    fn parses_list_and_delete() {
        assert_eq!(
            parse("list --all --deleted").unwrap(),
            Command::List {
                user: None,
                all: true,
                deleted: true,
            }
        );
        assert_eq!(
            parse("delete --yes 1a2b3c4d").unwrap(),
            Command::Delete {
                id: "1a2b3c4d".to_string(),
                yes: true,
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse("show"), Err(CliError::Usage(_))));
        assert!(matches!(parse("show a b"), Err(CliError::Usage(_))));
        assert!(matches!(parse("search --limit ten"), Err(CliError::Usage(_))));
        assert!(matches!(parse("search --query"), Err(CliError::Usage(_))));
        assert!(matches!(parse("list --bogus"), Err(CliError::Usage(_))));
        assert!(matches!(parse("dance"), Err(CliError::Usage(_))));
    }
}
