//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ludoteca_protocol::{Difficulty, GameDraft};
use ludoteca_library::ReviewForm;

use crate::config::ENV_CONFIG;

#[derive(Debug, Parser)]
#[command(name = "ludoteca", version, about = "Manage your video-game library")]
pub struct Cli {
    /// Settings file (JSON, or TOML with a `.toml` extension).
    #[arg(long, global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Origin the default backend URL is derived from.
    #[arg(long, global = true)]
    pub origin: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List games, one page at a time.
    List(ListArgs),
    /// Show one game.
    Show { id: String },
    /// Configured genres and how many games each has.
    Genres,
    /// Games of one genre.
    Genre {
        /// Genre name or URL slug.
        slug: String,
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Add a game.
    Add {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: GameFields,
    },
    /// Edit a game; only the given fields change.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: GameFields,
    },
    /// Delete a game.
    Delete { id: String },
    /// Reviews of a game.
    Reviews {
        game_id: String,
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Write, edit or delete a review.
    #[command(subcommand)]
    Review(ReviewCommand),
    /// Available themes and the active palette.
    Themes {
        /// Theme to resolve instead of the configured one.
        #[arg(long)]
        variant: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, short)]
    pub search: Option<String>,
    #[arg(long, short, default_value_t = 1)]
    pub page: usize,
    /// Games per page; 0 shows everything.
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Sort order such as `nombre-asc` or `año-desc`.
    #[arg(long)]
    pub order: Option<String>,
    /// Only completed games.
    #[arg(long)]
    pub completed: bool,
}

#[derive(Debug, Default, Args)]
pub struct GameFields {
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long)]
    pub platform: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub synopsis: Option<String>,
    #[arg(long)]
    pub developer: Option<String>,
    #[arg(long)]
    pub store: Option<String>,
    #[arg(long)]
    pub completed: Option<bool>,
    #[arg(long)]
    pub favorite: Option<bool>,
    #[arg(long)]
    pub pending: Option<bool>,
}

impl GameFields {
    /// Overwrites the fields that were given on the command line.
    pub fn apply(self, draft: &mut GameDraft) {
        if let Some(year) = self.year {
            draft.year = Some(year);
        }
        if let Some(genre) = self.genre {
            draft.genre = genre;
        }
        if let Some(platform) = self.platform {
            draft.platform = platform;
        }
        if let Some(image) = self.image {
            draft.image = image;
        }
        if let Some(synopsis) = self.synopsis {
            draft.synopsis = synopsis;
        }
        if self.developer.is_some() {
            draft.developer = self.developer;
        }
        if self.store.is_some() {
            draft.store = self.store;
        }
        if self.completed.is_some() {
            draft.completed = self.completed;
        }
        if self.favorite.is_some() {
            draft.favorite = self.favorite;
        }
        if self.pending.is_some() {
            draft.pending = self.pending;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ReviewCommand {
    /// Write a review for a game.
    Add {
        game_id: String,
        #[command(flatten)]
        fields: ReviewFields,
    },
    /// Edit one of a game's reviews.
    Edit {
        game_id: String,
        review_id: String,
        #[command(flatten)]
        fields: ReviewFields,
    },
    /// Delete one of a game's reviews.
    Delete { game_id: String, review_id: String },
}

#[derive(Debug, Default, Args)]
pub struct ReviewFields {
    /// Stars, 1 to 5.
    #[arg(long, short)]
    pub rating: Option<u8>,
    #[arg(long, short)]
    pub comment: Option<String>,
    /// Hours played; empty clears it.
    #[arg(long)]
    pub hours: Option<String>,
    /// `Muy fácil`, `Fácil`, `Normal`, `Difícil` or `Muy difícil`.
    #[arg(long, short)]
    pub difficulty: Option<Difficulty>,
    #[arg(long)]
    pub recommend: Option<bool>,
    #[arg(long)]
    pub author: Option<String>,
}

impl ReviewFields {
    pub fn apply(self, form: &mut ReviewForm) {
        if self.rating.is_some() {
            form.rating = self.rating;
        }
        if let Some(comment) = self.comment {
            form.comment = comment;
        }
        if let Some(hours) = self.hours {
            form.hours = hours;
        }
        if let Some(difficulty) = self.difficulty {
            form.difficulty = difficulty;
        }
        if let Some(recommend) = self.recommend {
            form.would_recommend = recommend;
        }
        if self.author.is_some() {
            form.author = self.author;
        }
    }
}
