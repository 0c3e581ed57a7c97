use serde::{Deserialize, Serialize};

/// Navigation sections.  A section only picks the heading shown above the
/// grid; it never filters the movie list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Home,
    Top,
    Genres,
    Favorites,
    Catalog,
}

pub const ALL_SECTIONS: [Section; 5] = [
    Section::Home,
    Section::Top,
    Section::Genres,
    Section::Favorites,
    Section::Catalog,
];

impl Section {
    /// Stable string identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Top => "top",
            Self::Genres => "genres",
            Self::Favorites => "favorites",
            Self::Catalog => "catalog",
        }
    }

    /// Tab label shown in the navigation bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Главная",
            Self::Top => "Топ",
            Self::Genres => "Жанры",
            Self::Favorites => "Избранное",
            Self::Catalog => "Каталог",
        }
    }

    /// Short marker for the compact (narrow-terminal) tab rendering.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Home => "⌂",
            Self::Top => "▲",
            Self::Genres => "▦",
            Self::Favorites => "♥",
            Self::Catalog => "≡",
        }
    }

    /// Heading shown above the grid while this section is active.
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Популярное сегодня",
            Self::Top => "Топ фильмов",
            Self::Genres => "Жанры",
            Self::Favorites => "Избранное",
            Self::Catalog => "Каталог фильмов",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        ALL_SECTIONS.iter().copied().find(|s| s.id() == id)
    }

    pub fn next(self) -> Self {
        let pos = ALL_SECTIONS.iter().position(|&s| s == self).unwrap_or(0);
        ALL_SECTIONS[(pos + 1) % ALL_SECTIONS.len()]
    }

    pub fn prev(self) -> Self {
        let pos = ALL_SECTIONS.iter().position(|&s| s == self).unwrap_or(0);
        ALL_SECTIONS[(pos + ALL_SECTIONS.len() - 1) % ALL_SECTIONS.len()]
    }
}

/// Resolve a raw section id to its heading, falling back to "Главная" for
/// anything unrecognized.
pub fn section_title(id: &str) -> &'static str {
    Section::from_id(id).map(Section::title).unwrap_or("Главная")
}
