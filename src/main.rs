use std::io::{self, Write};

use clap::Parser;

use feedlog::cli::{Cli, Commands};
use feedlog::config::Config;
use feedlog::domain::{Page, Subscription};
use feedlog::errors::{FeedlogError, FeedlogResult};
use feedlog::fetch::{FeedFetcher, HttpFetcher};
use feedlog::history::paginate;
use feedlog::services::{RefreshService, SubscriptionService};
use feedlog::storage::json::{JsonHistoryRepository, JsonSubscriptionRepository};
use feedlog::storage::HistoryRepository;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> FeedlogResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize storage
    let subscription_repo = JsonSubscriptionRepository::new(&config.subscriptions_path);
    let history_repo = JsonHistoryRepository::new(&config.history_path);
    let fetcher = HttpFetcher::new(config.fetch_timeout);

    match cli.command {
        Commands::Add { url, name } => cmd_add(&url, name, subscription_repo, fetcher),
        Commands::List => cmd_list(subscription_repo),
        Commands::Remove => cmd_remove(subscription_repo),
        Commands::Read { position } => {
            cmd_read(position, subscription_repo, history_repo, fetcher, &config)
        }
        Commands::Refresh => cmd_refresh(subscription_repo, history_repo, fetcher, &config),
    }
}

fn cmd_add(
    url: &str,
    name: Option<String>,
    subscription_repo: JsonSubscriptionRepository,
    fetcher: HttpFetcher,
) -> FeedlogResult<()> {
    let service = SubscriptionService::new(subscription_repo);
    SubscriptionService::<JsonSubscriptionRepository>::validate_url(url)?;

    // Fetching the title up front doubles as feed validation; an explicit
    // --name still requires the feed to answer.
    println!("Validating feed: {}", url);
    let fetched_title = fetcher.fetch_title(url)?;

    let name = name
        .or(fetched_title)
        .unwrap_or_else(SubscriptionService::<JsonSubscriptionRepository>::fallback_name);

    match service.add(&name, url) {
        Ok(subscription) => {
            println!("Subscribed to '{}'", subscription.name);
            println!("  URL: {}", subscription.url);
            Ok(())
        }
        Err(FeedlogError::DuplicateUrl(_)) => {
            println!("Already subscribed: {}", url);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn cmd_list(subscription_repo: JsonSubscriptionRepository) -> FeedlogResult<()> {
    let service = SubscriptionService::new(subscription_repo);
    let subscriptions = service.list()?;

    if subscriptions.is_empty() {
        println!("No subscriptions configured.");
        return Ok(());
    }

    println!("Subscriptions:\n");
    for (i, subscription) in subscriptions.iter().enumerate() {
        println!("  {}. {}", i + 1, subscription.name);
        println!("     {}", subscription.url);
    }

    Ok(())
}

fn cmd_remove(subscription_repo: JsonSubscriptionRepository) -> FeedlogResult<()> {
    let service = SubscriptionService::new(subscription_repo);
    let subscriptions = service.list()?;

    if subscriptions.is_empty() {
        println!("No subscriptions to remove.");
        return Ok(());
    }

    println!("Select a subscription to remove:\n");
    for (i, subscription) in subscriptions.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, subscription.name, subscription.url);
    }
    println!();

    let input = prompt("Enter number (or 'q' to cancel): ")?;
    if input.eq_ignore_ascii_case("q") {
        println!("Cancelled.");
        return Ok(());
    }

    let position: usize = input
        .parse()
        .map_err(|_| FeedlogError::InvalidInput("Invalid number".to_string()))?;
    let subscription = service.get_by_position(position)?;

    println!("About to remove:");
    println!("  Name: {}", subscription.name);
    println!("  URL:  {}", subscription.url);
    let confirm = prompt("Confirm removal? (y/N): ")?;
    if !confirm.eq_ignore_ascii_case("y") {
        println!("Cancelled.");
        return Ok(());
    }

    // Remove by position, not name: a name that happens to be numeric
    // would otherwise be taken for a position.
    let removed = service.remove(&position.to_string())?;
    println!("Removed: {}", removed.name);

    Ok(())
}

fn cmd_refresh(
    subscription_repo: JsonSubscriptionRepository,
    history_repo: JsonHistoryRepository,
    fetcher: HttpFetcher,
    config: &Config,
) -> FeedlogResult<()> {
    let service = SubscriptionService::new(subscription_repo);
    let subscriptions = service.list()?;

    if subscriptions.is_empty() {
        println!("No subscriptions configured.");
        return Ok(());
    }

    let refresher = RefreshService::new(
        history_repo,
        fetcher,
        config.summary_max_len,
        config.history_cap,
    );

    println!("Refreshing {} feeds...\n", subscriptions.len());
    for (subscription, result) in refresher.refresh_all(&subscriptions) {
        match result {
            Ok(outcome) => println!(
                "  {}: {} fetched, {} new",
                subscription.name, outcome.fetched_count, outcome.new_count
            ),
            Err(e) => eprintln!("  {}: failed: {}", subscription.name, e),
        }
    }

    Ok(())
}

enum ReadAction {
    BackToList,
    Quit,
}

fn cmd_read(
    mut position: Option<usize>,
    subscription_repo: JsonSubscriptionRepository,
    history_repo: JsonHistoryRepository,
    fetcher: HttpFetcher,
    config: &Config,
) -> FeedlogResult<()> {
    let service = SubscriptionService::new(subscription_repo);
    let refresher = RefreshService::new(
        history_repo.clone(),
        fetcher,
        config.summary_max_len,
        config.history_cap,
    );

    loop {
        let subscriptions = service.list()?;
        if subscriptions.is_empty() {
            println!("No subscriptions configured. Add one with 'feedlog add <url>'.");
            return Ok(());
        }

        let subscription = match position.take() {
            Some(p) => service.get_by_position(p)?,
            None => {
                println!("Select a subscription:\n");
                for (i, subscription) in subscriptions.iter().enumerate() {
                    println!("  {}. {}", i + 1, subscription.name);
                }
                println!();

                let input = prompt("Enter number (or 'q' to quit): ")?;
                if input.eq_ignore_ascii_case("q") {
                    return Ok(());
                }
                let p: usize = match input.parse() {
                    Ok(p) => p,
                    Err(_) => {
                        println!("Please enter a number.");
                        continue;
                    }
                };
                match service.get_by_position(p) {
                    Ok(subscription) => subscription,
                    Err(FeedlogError::NotFound(_)) => {
                        println!("No subscription at position {}.", p);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        match read_articles(&subscription, &history_repo, &refresher, config)? {
            ReadAction::BackToList => continue,
            ReadAction::Quit => return Ok(()),
        }
    }
}

fn read_articles(
    subscription: &Subscription,
    history_repo: &JsonHistoryRepository,
    refresher: &RefreshService<JsonHistoryRepository, HttpFetcher>,
    config: &Config,
) -> FeedlogResult<ReadAction> {
    println!("\nFetching latest articles for '{}'...", subscription.name);
    if let Err(e) = refresher.refresh(subscription) {
        eprintln!("Could not refresh {}: {}", subscription.name, e);
    }

    let mut page_index = 0usize;
    let mut notice: Option<&str> = None;

    loop {
        let history = history_repo.history_for(&subscription.url)?;
        let page = paginate::page(&history, config.page_size, page_index)?;
        let total_pages = page.total_count.div_ceil(config.page_size).max(1);

        render_page(&subscription.name, &page, total_pages);

        println!("\nOptions:");
        if !page.items.is_empty() {
            println!("  [1-{}] open article in browser", page.items.len());
        }
        println!("  [n] next page  [p] previous page  [r] refresh");
        println!("  [b] back to subscriptions  [q] quit");
        if let Some(message) = notice.take() {
            println!("\n{}", message);
        }

        let input = prompt("\nChoose an option: ")?.to_lowercase();
        match input.as_str() {
            "q" => return Ok(ReadAction::Quit),
            "b" => return Ok(ReadAction::BackToList),
            "r" => {
                println!("Refreshing...");
                match refresher.refresh(subscription) {
                    Ok(outcome) => println!("{} new article(s).", outcome.new_count),
                    Err(e) => eprintln!("Could not refresh {}: {}", subscription.name, e),
                }
                page_index = 0;
            }
            "n" => {
                if page.has_next {
                    page_index += 1;
                } else {
                    notice = Some("Already on the last page.");
                }
            }
            "p" => {
                if page.has_previous {
                    page_index -= 1;
                } else {
                    notice = Some("Already on the first page.");
                }
            }
            other => match other.parse::<usize>() {
                Ok(number) if number >= 1 && number <= page.items.len() => {
                    let article = &page.items[number - 1];
                    if article.link.is_empty() {
                        println!("This article has no link to open.");
                    } else {
                        println!("Opening {}", article.link);
                        if let Err(e) = open::that(&article.link) {
                            eprintln!("Could not open browser: {}", e);
                        }
                    }
                }
                _ => println!("Invalid choice, try again."),
            },
        }
    }
}

fn render_page(name: &str, page: &Page, total_pages: usize) {
    println!("\n{} (page {}/{})", name, page.page_index + 1, total_pages);

    if page.items.is_empty() {
        println!("\n  No articles in history yet. Press 'r' to refresh.");
        return;
    }

    for (i, article) in page.items.iter().enumerate() {
        println!("\n  {}. {}", i + 1, article.title);
        if !article.link.is_empty() {
            println!("     Link: {}", article.link);
        }
        if article.published != "unknown" {
            println!("     Published: {}", article.published);
        }
        println!("     Fetched: {}", article.fetch_time);
        if !article.summary.is_empty() {
            println!("     {}", article.summary);
        }
    }
}

fn prompt(message: &str) -> FeedlogResult<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    // EOF must be an error, or the interactive loops would spin forever
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(FeedlogError::InvalidInput(
            "unexpected end of input".to_string(),
        ));
    }
    Ok(input.trim().to_string())
}
