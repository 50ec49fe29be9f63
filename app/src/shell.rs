//! Line-oriented front end over the gallery controller.

use gallery::{GalleryController, Photo, PhotoId, PhotoSource, CATEGORIES, COLORS};
use std::fmt::Write;

pub const HELP: &str = "\
Commands:
  list                 show photos matching the current filters
  search <text>        filter by author (empty clears)
  category [name|-]    filter by category, '-' clears
  color [name|-]       filter by color, '-' clears
  open <id>            show photo details
  close                close the detail view
  fav <id>             add or remove a favorite
  favorites            list favorites
  reload               fetch the photo page again
  help                 show this text
  quit                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Category(String),
    Color(String),
    Open(PhotoId),
    Close,
    Fav(PhotoId),
    Favorites,
    Reload,
    Help,
    Quit,
    Unknown(String),
}

fn filter_arg(arg: &str) -> String {
    if arg == "-" {
        String::new()
    } else {
        arg.to_string()
    }
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((w, a)) => (w, a.trim()),
            None => (line, ""),
        };
        let cmd = match word.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "search" => Command::Search(arg.to_string()),
            "category" => Command::Category(filter_arg(arg)),
            "color" => Command::Color(filter_arg(arg)),
            "open" if !arg.is_empty() => Command::Open(PhotoId::from(arg)),
            "close" => Command::Close,
            "fav" if !arg.is_empty() => Command::Fav(PhotoId::from(arg)),
            "favorites" | "favs" => Command::Favorites,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        };
        Some(cmd)
    }
}

pub enum Outcome {
    Print(String),
    Quit,
}

fn star(gallery: &GalleryController, id: &PhotoId) -> &'static str {
    if gallery.is_favorite(id) {
        "*"
    } else {
        " "
    }
}

pub fn render_view(gallery: &GalleryController) -> String {
    let mut out = String::new();
    if let Some(err) = gallery.error() {
        let _ = writeln!(out, "Error: {}", err);
    }
    let view = gallery.view();
    if view.is_empty() {
        out.push_str("No photos match the current filters");
        return out;
    }
    let lines: Vec<String> = view
        .iter()
        .map(|p| format!("{} {:>4}  {}", star(gallery, &p.id), p.id, p.author))
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

pub fn render_detail(gallery: &GalleryController, photo: &Photo) -> String {
    let favorite = if gallery.is_favorite(&photo.id) {
        "yes"
    } else {
        "no"
    };
    format!(
        "Author: {}\nSize: {} x {}\nID: {}\nImage: {}\nSource: {}\nFavorite: {}",
        photo.author,
        photo.width,
        photo.height,
        photo.id,
        photo.download_url,
        photo.page_url,
        favorite
    )
}

pub fn render_favorites(gallery: &GalleryController) -> String {
    let favorites = gallery.favorites();
    if favorites.is_empty() {
        return "No favorites yet".to_string();
    }
    favorites
        .iter()
        .map(|f| {
            if f.author.is_empty() {
                format!("* {:>4}  (not in current page)", f.id)
            } else {
                format!("* {:>4}  {}", f.id, f.author)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn check_option(kind: &str, value: &str, known: &[&str]) -> Option<String> {
    if value.is_empty() || known.iter().any(|k| k.eq_ignore_ascii_case(value)) {
        None
    } else {
        Some(format!(
            "Note: '{}' is not a listed {} ({})",
            value,
            kind,
            known.join(", ")
        ))
    }
}

pub async fn execute<S: PhotoSource>(
    gallery: &mut GalleryController,
    source: &S,
    cmd: Command,
) -> Outcome {
    let text = match cmd {
        Command::List => render_view(gallery),
        Command::Search(q) => {
            gallery.set_query(q);
            gallery.search();
            render_view(gallery)
        }
        Command::Category(c) => {
            let note = check_option("category", &c, &CATEGORIES);
            gallery.set_category_filter(c);
            with_note(note, render_view(gallery))
        }
        Command::Color(c) => {
            let note = check_option("color", &c, &COLORS);
            gallery.set_color_filter(c);
            with_note(note, render_view(gallery))
        }
        Command::Open(id) => match gallery.select_photo(&id).cloned() {
            Ok(photo) => render_detail(gallery, &photo),
            Err(e) => e.to_string(),
        },
        Command::Close => {
            gallery.close_detail();
            String::new()
        }
        Command::Fav(id) => {
            if gallery.toggle_favorite(&id) {
                format!("Added {} to favorites", id)
            } else {
                format!("Removed {} from favorites", id)
            }
        }
        Command::Favorites => render_favorites(gallery),
        Command::Reload => {
            if gallery.refresh(source).await {
                render_view(gallery)
            } else {
                "Already loading".to_string()
            }
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Outcome::Quit,
        Command::Unknown(line) => format!("Unknown command: {} (try 'help')", line),
    };
    Outcome::Print(text)
}

fn with_note(note: Option<String>, body: String) -> String {
    match note {
        Some(n) => format!("{}\n{}", n, body),
        None => body,
    }
}
