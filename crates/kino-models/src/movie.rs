use serde::{Deserialize, Serialize};

/// A single movie in the catalog.
///
/// Aggregate fields (`rating` and everything descriptive) are fixed at seed
/// time and never mutated.  Only `user_rating` changes, via `set_user_rating`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Aggregate score, 0.0–5.0, fractional allowed.  Supplied with the seed
    /// data; not user-editable.
    pub rating: f32,
    /// Opaque poster URI.  Resolution is the image collaborator's problem;
    /// the TUI renders a placeholder.
    pub poster: String,
    pub genre: String,
    pub year: u16,
    /// The viewer's own 1–5 score.  `None` until the viewer rates the movie;
    /// overwritten by subsequent rate actions.
    #[serde(default)]
    pub user_rating: Option<u8>,
}

impl Movie {
    /// Set the viewer's rating.  Values are clamped to 1..=5.
    pub fn set_user_rating(&mut self, rating: u8) {
        self.user_rating = Some(rating.clamp(1, 5));
    }
}

/// The fixed seed catalog: 6 entries, 3 distinct titles duplicated.
pub fn seed_catalog() -> Vec<Movie> {
    const POSTER_BASE: &str =
        "https://cdn.poehali.dev/projects/5cd0fc90-bfcd-449b-b64b-26c693986818/files";

    let dark_dawn = |id| Movie {
        id,
        title: "Тёмный рассвет".to_string(),
        description: "Захватывающий триллер о борьбе за выживание в постапокалиптическом мире, \
                      где каждое решение может стать последним."
            .to_string(),
        rating: 4.5,
        poster: format!("{}/56251d21-17d5-4fd3-90d6-c89cc4257c2d.jpg", POSTER_BASE),
        genre: "Боевик".to_string(),
        year: 2024,
        user_rating: None,
    };
    let star_trek = |id| Movie {
        id,
        title: "Звёздный путь: Новая эра".to_string(),
        description: "Эпическое космическое приключение о команде исследователей, открывающих \
                      тайны далёких галактик и неизведанных миров."
            .to_string(),
        rating: 4.8,
        poster: format!("{}/213c14ff-cd0c-4d86-ae88-456ea9abe848.jpg", POSTER_BASE),
        genre: "Фантастика".to_string(),
        year: 2024,
        user_rating: None,
    };
    let big_city_love = |id| Movie {
        id,
        title: "Любовь в большом городе".to_string(),
        description: "Лёгкая романтическая комедия о случайной встрече двух людей в шумном \
                      мегаполисе, которая меняет их жизни навсегда."
            .to_string(),
        rating: 4.2,
        poster: format!("{}/bdff5821-5e31-4572-b5cd-865ce3dec07e.jpg", POSTER_BASE),
        genre: "Комедия".to_string(),
        year: 2024,
        user_rating: None,
    };

    vec![
        dark_dawn(1),
        star_trek(2),
        big_city_love(3),
        dark_dawn(4),
        star_trek(5),
        big_city_love(6),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_shape() {
        let movies = seed_catalog();
        assert_eq!(movies.len(), 6);

        let ids: Vec<u32> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let mut titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), 3);

        assert!(movies.iter().all(|m| m.user_rating.is_none()));
        assert!(movies.iter().all(|m| (0.0..=5.0).contains(&m.rating)));
    }

    #[test]
    fn test_set_user_rating_clamps() {
        let mut movie = seed_catalog().remove(0);
        movie.set_user_rating(3);
        assert_eq!(movie.user_rating, Some(3));
        movie.set_user_rating(9);
        assert_eq!(movie.user_rating, Some(5));
        movie.set_user_rating(0);
        assert_eq!(movie.user_rating, Some(1));
    }
}
