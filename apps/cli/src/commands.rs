//! Command execution and terminal output.

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context, bail};
use ludoteca_api::{Client, ENV_API_URL};
use ludoteca_library::{
    GameBackend, GameStore, GenreView, LibraryBrowser, MemoryBackend, ReviewBackend, ReviewBoard,
    ReviewForm, ReviewStats, genre_slug,
};
use ludoteca_protocol::{Game, GameDraft, Review};
use ludoteca_settings::{Notifier, Settings};
use tracing::debug;

use crate::cli::{Command, ListArgs, ReviewCommand};

/// The backends every command talks to.
pub struct Backends {
    pub games: Arc<dyn GameBackend>,
    pub reviews: Arc<dyn ReviewBackend>,
}

impl Backends {
    /// In-memory data when `api.usarMock` is set, the HTTP backend otherwise.
    pub fn from_settings(settings: &Settings, origin: Option<&str>) -> anyhow::Result<Self> {
        if settings.api.use_mock {
            debug!("using in-memory backend");
            let memory = Arc::new(MemoryBackend::new(settings.library.games.clone()));
            return Ok(Self {
                games: memory.clone(),
                reviews: memory,
            });
        }
        let env_override = std::env::var(ENV_API_URL).ok();
        let client = Arc::new(
            Client::from_settings(&settings.api, env_override.as_deref(), origin)
                .context("cannot build HTTP client")?,
        );
        Ok(Self {
            games: client.clone(),
            reviews: client,
        })
    }
}

/// Everything a command needs.
pub struct App {
    pub settings: Settings,
    pub backends: Backends,
    pub notifier: Arc<dyn Notifier>,
}

pub async fn run(command: Command, ctx: App) -> anyhow::Result<()> {
    let mut store = GameStore::new(&ctx.settings, ctx.backends.games.clone(), ctx.notifier.clone());

    match command {
        Command::List(args) => {
            load(&mut store).await?;
            list(&ctx.settings, store.games(), args)
        }
        Command::Show { id } => {
            let game = ctx.backends.games.get_game(&id).await?;
            print!("{}", game_details(&game));
            Ok(())
        }
        Command::Genres => {
            load(&mut store).await?;
            let mut browser = LibraryBrowser::new(&ctx.settings);
            let view = browser.view(store.games());
            for entry in &view.stats.genres {
                println!("{:<16} {:>4}  ({})", entry.genre, entry.count, genre_slug(&entry.genre));
            }
            Ok(())
        }
        Command::Genre { slug, search } => {
            load(&mut store).await?;
            let view = GenreView::resolve(&slug, &ctx.settings.library.genres, store.games());
            if view.name.is_empty() {
                bail!("no genre given");
            }
            let games = view.search(search.as_deref().unwrap_or_default());
            println!("{} ({} games)", view.name, view.games.len());
            if games.is_empty() {
                println!("{}", no_results(&ctx.settings));
            }
            for game in games {
                println!("{}", game_line(game));
            }
            Ok(())
        }
        Command::Add { name, fields } => {
            load(&mut store).await?;
            let mut draft = GameDraft {
                name,
                ..Default::default()
            };
            fields.apply(&mut draft);
            let game = store.create(draft).await?;
            println!("{}", game_line(&game));
            Ok(())
        }
        Command::Edit { id, name, fields } => {
            load(&mut store).await?;
            let mut draft = match store.find(&id) {
                Some(game) => game.to_draft(),
                None => ctx.backends.games.get_game(&id).await?.to_draft(),
            };
            if let Some(name) = name {
                draft.name = name;
            }
            fields.apply(&mut draft);
            let game = store.update(&id, draft).await?;
            println!("{}", game_line(&game));
            Ok(())
        }
        Command::Delete { id } => {
            store.delete(&id).await?;
            Ok(())
        }
        Command::Reviews { game_id, search } => {
            let mut board = open_board(&ctx, &store, &game_id).await?;
            board.load().await;
            println!("{}", board.game().name);
            println!("{}", stats_line(&board.stats()));
            for review in board.search(search.as_deref().unwrap_or_default()) {
                print!("{}", review_block(review));
            }
            Ok(())
        }
        Command::Review(ReviewCommand::Add { game_id, fields }) => {
            let mut board = open_board(&ctx, &store, &game_id).await?;
            let mut form = ReviewForm::default();
            fields.apply(&mut form);
            let review = board.save(&form, None).await?;
            print!("{}", review_block(&review));
            Ok(())
        }
        Command::Review(ReviewCommand::Edit {
            game_id,
            review_id,
            fields,
        }) => {
            let mut board = open_board(&ctx, &store, &game_id).await?;
            board.load().await;
            let Some(existing) = board.reviews().iter().find(|r| r.id == review_id) else {
                bail!("review {review_id} not found for {}", board.game().name);
            };
            let mut form = ReviewForm::from_review(existing);
            fields.apply(&mut form);
            let review = board.save(&form, Some(review_id.as_str())).await?;
            print!("{}", review_block(&review));
            Ok(())
        }
        Command::Review(ReviewCommand::Delete { game_id, review_id }) => {
            let mut board = open_board(&ctx, &store, &game_id).await?;
            board.delete(&review_id).await?;
            Ok(())
        }
        Command::Themes { variant } => {
            let themes = &ctx.settings.ui.theme;
            let active = themes.resolve(variant.as_deref());
            for name in themes.available() {
                let marker = if name == active.variant { '*' } else { ' ' };
                println!("{marker} {name}");
            }
            println!();
            for (key, value) in &active.palette {
                println!("  {key:<12} {value}");
            }
            for (key, value) in &active.gradients {
                println!("  {key:<12} {value}");
            }
            Ok(())
        }
    }
}

/// Loads the game list; fails only when there is nothing to show.
async fn load(store: &mut GameStore) -> anyhow::Result<()> {
    store.load().await;
    match store.error() {
        Some(message) if store.games().is_empty() => bail!("{message}"),
        _ => Ok(()),
    }
}

async fn open_board(ctx: &App, store: &GameStore, game_id: &str) -> anyhow::Result<ReviewBoard> {
    Ok(ReviewBoard::open(
        &ctx.settings.integrations,
        game_id,
        store,
        ctx.backends.games.as_ref(),
        ctx.backends.reviews.clone(),
        ctx.notifier.clone(),
    )
    .await?)
}

fn list(settings: &Settings, games: &[Game], args: ListArgs) -> anyhow::Result<()> {
    let mut settings = settings.clone();
    if let Some(order) = args.order {
        settings.library.default_order = order;
    }
    if args.completed {
        settings.library.show_only_completed = true;
    }

    let mut browser = LibraryBrowser::new(&settings);
    if let Some(size) = args.page_size {
        browser.set_page_size(Some(size));
    }
    if let Some(term) = args.search {
        browser.set_search_term(term);
    }
    browser.view(games);
    if !browser.go_to(args.page) {
        bail!("page {} does not exist", args.page);
    }
    let view = browser.view(games);

    let stats = &view.stats;
    println!(
        "Page {}/{} - {} games, {} completed, {} pending",
        view.page, view.total_pages, stats.total, stats.completed, stats.pending
    );
    for quota in [&stats.favorites_quota, &stats.pending_quota] {
        if let Some(message) = &quota.message {
            println!("! {message}");
        }
    }
    if view.filtered.is_empty() {
        println!("{}", browser.no_results_text());
    }
    for game in &view.page_items {
        println!("{}", game_line(game));
    }
    Ok(())
}

fn no_results(settings: &Settings) -> String {
    LibraryBrowser::new(settings).no_results_text().to_string()
}

/// One-line summary of a game.
pub fn game_line(game: &Game) -> String {
    let mut line = format!("{:<38} {}", game.id, game.name);
    if let Some(year) = game.year.filter(|y| *y != 0) {
        let _ = write!(line, " ({year})");
    }
    for part in [&game.genre, &game.platform] {
        if !part.is_empty() {
            let _ = write!(line, " | {part}");
        }
    }
    let mut flags = String::new();
    if game.is_favorite() {
        flags.push('F');
    }
    if game.is_completed() {
        flags.push('C');
    } else if game.is_pending() {
        flags.push('P');
    }
    if !flags.is_empty() {
        let _ = write!(line, " [{flags}]");
    }
    line
}

fn game_details(game: &Game) -> String {
    let mut out = format!("{}\n", game_line(game));
    let optional = [
        ("Developer", game.developer.as_deref()),
        ("Store", game.store.as_deref()),
        ("Added", game.created_at.as_deref()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            let _ = writeln!(out, "  {label}: {value}");
        }
    }
    if !game.image.is_empty() {
        let _ = writeln!(out, "  Image: {}", game.image);
    }
    if !game.synopsis.is_empty() {
        let _ = writeln!(out, "\n{}", game.synopsis);
    }
    out
}

fn stats_line(stats: &ReviewStats) -> String {
    let mut line = format!("{} reviews", stats.count);
    if let Some(avg) = stats.average_rating {
        let _ = write!(line, ", average {avg:.1}/5");
    }
    if let Some(hours) = stats.average_hours {
        let _ = write!(line, ", {hours} h played on average");
    }
    line
}

/// A review as printed by `reviews`.
pub fn review_block(review: &Review) -> String {
    let rating = review.rating.unwrap_or(0).min(5) as usize;
    let stars = format!("{}{}", "*".repeat(rating), ".".repeat(5 - rating));
    let mut out = format!("\n[{}] {stars}", review.id);
    if let Some(difficulty) = review.difficulty_text() {
        let _ = write!(out, " | {difficulty}");
    }
    if let Some(hours) = review.hours_played {
        let _ = write!(out, " | {hours} h");
    }
    out.push_str(if review.would_recommend {
        " | recomendado"
    } else {
        " | no recomendado"
    });
    if let Some(author) = &review.author {
        let _ = write!(out, " | {author}");
    }
    let _ = writeln!(out, "\n  {}", review.comment);
    out
}
