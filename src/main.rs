//! ipfo-blog - IPFO blog content pipeline
//!
//! Main entry point for the ipfo-blog CLI.

use clap::{Parser, Subcommand};
use ipfo_blog::article::{article_id_from_link, ArticleView};
use ipfo_blog::cache::{open_storage, SessionCache};
use ipfo_blog::config::{validate_config_result, BlogConfig};
use ipfo_blog::ingest::{FileSource, HttpSource, PostLoader, PostSource};
use ipfo_blog::query::CategoryFilter;
use ipfo_blog::render::{self, share_links, text};
use ipfo_blog::session::{BlogSession, Debouncer};
use ipfo_blog::{style, BlogError};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// IPFO blog - list, search and read posts from the published sheet
#[derive(Parser, Debug)]
#[command(name = "ipfo-blog")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/ipfo-blog/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session id scoping the post cache (default: the parent shell)
    #[arg(long, env = "IPFO_BLOG_SESSION")]
    session: Option<String>,

    /// Read posts from a local CSV file instead of the published sheet
    #[arg(long)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a configuration file with the default settings
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// List posts with optional category and search filters
    List {
        /// Category name, or "all"
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Case-insensitive search over title, excerpt, category and author
        #[arg(short, long)]
        search: Option<String>,

        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Posts per page (default from config)
        #[arg(long)]
        page_size: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one article with related posts
    Show {
        /// Post ID, or an article link containing ?id=
        target: String,

        /// Site root used to build absolute share links
        #[arg(long)]
        site_url: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show post counts per category
    Categories,

    /// Re-fetch posts from the source and replace the cache
    Refresh,

    /// Remove the cached posts for this session
    ClearCache,

    /// Interactive listing: type to search, :help for commands
    Browse,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    if let Err(e) = ipfo_blog::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Runs one command; `Ok(false)` means an empty or not-found state was
/// already rendered
async fn run(cli: Cli) -> ipfo_blog::Result<bool> {
    // Handle init command first (creates config)
    if let Commands::Init { force } = cli.command {
        handle_init_command(cli.config, force)?;
        return Ok(true);
    }

    let config = BlogConfig::load_or_default(cli.config.as_deref())?;
    validate_config_result(&config)?;

    let session_id = cli.session.unwrap_or_else(default_session_id);
    tracing::debug!(session = %session_id, "Using cache session");

    let storage = open_storage(&config.cache, &session_id)?;
    let source: Arc<dyn PostSource> = match cli.csv {
        Some(path) => Arc::new(FileSource::new(path)),
        None => Arc::new(HttpSource::with_timeout(
            config.source.url.clone(),
            config.source.timeout(),
        )?),
    };
    let loader = Arc::new(PostLoader::from_config(&config, source, storage));
    let mut session = BlogSession::new(loader.clone()).with_listing(&config.listing);

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::List {
            category,
            search,
            page,
            page_size,
            json,
        } => {
            if let Some(size) = page_size {
                session = session.with_page_size(size);
            }
            handle_list(&mut session, category, search, page, json).await
        }
        Commands::Show {
            target,
            site_url,
            json,
        } => handle_show(&mut session, &target, site_url.as_deref(), json).await,
        Commands::Categories => handle_categories(&mut session).await,
        Commands::Refresh => match session.reload().await {
            Ok(count) => {
                println!("{} Fetched {} posts", style::success("✓"), count);
                Ok(true)
            }
            Err(e) if e.is_empty_state() => {
                print!("{}", text::empty_state(Some(&e.to_string())));
                Ok(false)
            }
            Err(e) => Err(e),
        },
        Commands::ClearCache => {
            let cache: &SessionCache = loader.cache();
            cache.clear(loader.cache_key())?;
            println!("{} Cleared cached posts", style::success("✓"));
            Ok(true)
        }
        Commands::Browse => {
            let debounce = config.listing.search_debounce();
            browse(&mut session, Debouncer::new(debounce)).await
        }
    }
}

/// Session id for the cache when none is given
///
/// The parent process is the invoking shell, so every command run from one
/// terminal shares the cache and a new terminal starts fresh.
fn default_session_id() -> String {
    #[cfg(unix)]
    {
        format!("ppid-{}", std::os::unix::process::parent_id())
    }
    #[cfg(not(unix))]
    {
        "default".to_string()
    }
}

fn handle_init_command(config_path: Option<PathBuf>, force: bool) -> ipfo_blog::Result<()> {
    let config_file = config_path.unwrap_or_else(BlogConfig::default_path);

    // Check if already initialized
    if config_file.exists() && !force {
        println!("Configuration already exists at {}", config_file.display());
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    let config = BlogConfig::new();
    config.save(&config_file)?;

    println!("{} Created configuration at {}", style::success("✓"), config_file.display());
    println!();
    println!("Next steps:");
    println!("  ipfo-blog list");
    println!("  ipfo-blog show <post-id>");
    Ok(())
}

async fn load_or_render(session: &mut BlogSession, json: bool) -> ipfo_blog::Result<bool> {
    match session.load().await {
        Ok(_) => Ok(true),
        Err(e) if e.is_empty_state() => {
            let reason = e.to_string();
            if json {
                println!("{}", serde_json::to_string_pretty(&render::unavailable_json(&reason))?);
            } else {
                print!("{}", text::empty_state(Some(&reason)));
            }
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

async fn handle_list(
    session: &mut BlogSession,
    category: Option<String>,
    search: Option<String>,
    page: usize,
    json: bool,
) -> ipfo_blog::Result<bool> {
    if !load_or_render(session, json).await? {
        return Ok(false);
    }

    if let Some(category) = category {
        session.set_category(CategoryFilter::from(category.as_str()));
    }
    if let Some(search) = search {
        session.set_search(search);
    }
    session.set_page(page);

    let current = session.current_page();
    if json {
        let value = render::listing_json(&current, session.query(), session.category_counts());
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", text::category_bar(session.category_counts(), &session.query().category));
        println!();
        print!("{}", text::listing(&current));
    }
    Ok(true)
}

async fn handle_show(
    session: &mut BlogSession,
    target: &str,
    site_url: Option<&str>,
    json: bool,
) -> ipfo_blog::Result<bool> {
    let id = if target.contains('?') {
        article_id_from_link(target)
    } else {
        Some(target.to_string())
    };

    match session.article(id.as_deref()).await {
        Ok(view) => {
            let share = site_url.map(|base| {
                let url = format!("{}/{}", base.trim_end_matches('/'), view.post.link);
                share_links(&url, &view.post.title)
            });
            if json {
                let value = render::article_json(&view, share.as_ref());
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", text::article(&view, share.as_ref()));
            }
            Ok(true)
        }
        Err(e) if e.is_not_found() || e.is_empty_state() => {
            let reason = e.to_string();
            if json {
                println!("{}", serde_json::to_string_pretty(&render::not_found_json(&reason))?);
            } else {
                print!("{}", text::not_found(&reason));
            }
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

async fn handle_categories(session: &mut BlogSession) -> ipfo_blog::Result<bool> {
    if !load_or_render(session, false).await? {
        return Ok(false);
    }

    for (category, count) in session.category_counts() {
        println!("{:>4}  {}", style::count(*count), style::category_style(category));
    }
    Ok(true)
}

/// One line of browse input
#[derive(Debug, PartialEq, Eq)]
enum BrowseInput {
    Search(String),
    Filter(CategoryFilter),
    More,
    Show(String),
    Reload,
    Help,
    Quit,
}

fn parse_browse_input(line: &str) -> BrowseInput {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return BrowseInput::Search(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "filter" | "f" if !arg.is_empty() => BrowseInput::Filter(CategoryFilter::from(arg)),
        "all" | "a" => BrowseInput::Filter(CategoryFilter::All),
        "more" | "m" => BrowseInput::More,
        "show" | "s" if !arg.is_empty() => BrowseInput::Show(arg.to_string()),
        "reload" | "r" => BrowseInput::Reload,
        "quit" | "q" => BrowseInput::Quit,
        _ => BrowseInput::Help,
    }
}

const BROWSE_HELP: &str = "Type to search. Commands:\n  \
    :filter <category>   show one category\n  \
    :all                 show every category\n  \
    :more                load the next page\n  \
    :show <id>           read an article\n  \
    :reload              re-fetch posts\n  \
    :quit                exit";

fn print_browse_listing(session: &BlogSession) {
    println!();
    println!("{}", text::category_bar(session.category_counts(), &session.query().category));
    if !session.query().search.is_empty() {
        println!("{}", style::dim(&format!("search: {}", session.query().search)));
    }
    println!();
    print!("{}", text::listing(&session.listing()));
}

/// Re-ingest expired posts before a listing action
///
/// An unavailable source is shown as the empty state; `Ok(false)` then
/// means there is nothing to list.
async fn freshen(session: &mut BlogSession) -> ipfo_blog::Result<bool> {
    match session.ensure_fresh().await {
        Ok(_) => Ok(true),
        Err(e) if e.is_empty_state() => {
            print!("{}", text::empty_state(Some(&e.to_string())));
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Text for a `:show` request; only unexpected failures end the session
fn browse_article(result: ipfo_blog::Result<ArticleView>) -> ipfo_blog::Result<String> {
    match result {
        Ok(view) => Ok(text::article(&view, None)),
        Err(e) if e.is_not_found() => Ok(text::not_found(&e.to_string())),
        Err(e) if e.is_empty_state() => Ok(text::empty_state(Some(&e.to_string()))),
        Err(e) => Err(e),
    }
}

async fn browse(session: &mut BlogSession, mut debouncer: Debouncer<String>) -> ipfo_blog::Result<bool> {
    if !load_or_render(session, false).await? {
        return Ok(false);
    }

    println!("{}", style::dim(BROWSE_HELP));
    print_browse_listing(session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                match parse_browse_input(&line) {
                    BrowseInput::Search(query) => debouncer.push(query),
                    BrowseInput::Filter(category) => {
                        if freshen(session).await? {
                            session.set_category(category);
                            print_browse_listing(session);
                        }
                    }
                    BrowseInput::More => {
                        if !freshen(session).await? {
                            continue;
                        }
                        if session.load_more() {
                            print_browse_listing(session);
                        } else {
                            println!("{}", style::dim("No more posts."));
                        }
                    }
                    BrowseInput::Show(id) => {
                        let result = session.article(Some(&id)).await;
                        print!("{}", browse_article(result)?);
                    }
                    BrowseInput::Reload => match session.reload().await {
                        Ok(_) => print_browse_listing(session),
                        Err(BlogError::SourceUnavailable(reason)) => {
                            print!("{}", text::empty_state(Some(&reason)));
                        }
                        Err(e) => return Err(e),
                    },
                    BrowseInput::Help => println!("{}", BROWSE_HELP),
                    BrowseInput::Quit => break,
                }
            }
            Some(query) = debouncer.settled() => {
                tracing::debug!(query = %query, "Search settled");
                if freshen(session).await? {
                    session.set_search(query);
                    print_browse_listing(session);
                }
            }
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browse_input() {
        assert_eq!(parse_browse_input("budget"), BrowseInput::Search("budget".to_string()));
        assert_eq!(parse_browse_input(""), BrowseInput::Search(String::new()));
        assert_eq!(
            parse_browse_input(":filter Policy Notes"),
            BrowseInput::Filter(CategoryFilter::only("Policy Notes"))
        );
        assert_eq!(parse_browse_input(":filter all"), BrowseInput::Filter(CategoryFilter::All));
        assert_eq!(parse_browse_input(":all"), BrowseInput::Filter(CategoryFilter::All));
        assert_eq!(parse_browse_input(":more"), BrowseInput::More);
        assert_eq!(parse_browse_input(":show p1"), BrowseInput::Show("p1".to_string()));
        assert_eq!(parse_browse_input(":show"), BrowseInput::Help);
        assert_eq!(parse_browse_input(":q"), BrowseInput::Quit);
        assert_eq!(parse_browse_input(":nope"), BrowseInput::Help);
    }

    #[test]
    fn test_browse_article_keeps_session_alive() {
        let unavailable = browse_article(Err(BlogError::SourceUnavailable("HTTP 503".into()))).unwrap();
        assert!(unavailable.contains("No posts available"));
        assert!(unavailable.contains("HTTP 503"));

        let missing = browse_article(Err(BlogError::NotFound("p9".into()))).unwrap();
        assert!(missing.contains("Article not found."));

        assert!(browse_article(Err(BlogError::Config("bad".into()))).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::parse_from(["ipfo-blog", "--session", "s1", "list", "-C", "News", "--json"]);
        assert_eq!(cli.session.as_deref(), Some("s1"));
        assert!(matches!(
            cli.command,
            Commands::List { ref category, json: true, page: 1, .. } if category.as_deref() == Some("News")
        ));
    }
}
