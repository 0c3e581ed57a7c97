use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;
use serde::{Deserialize, Serialize};

/// A published review.  Created only via the review panel's submit action;
/// prepended to the panel's list; never edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub author: String,
    /// Integer star rating, 1–5.
    pub rating: u8,
    pub text: String,
    /// Display date, formatted at submission time (`%d.%m.%Y`).
    pub date: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Generator for review identifiers.
///
/// Seeded from the current Unix millisecond timestamp and strictly
/// monotonic within the process, so rapid successive submissions in the
/// same millisecond still get distinct ids.
static NEXT_REVIEW_ID: AtomicU64 = AtomicU64::new(0);

pub fn next_review_id() -> u64 {
    let now_ms = Local::now().timestamp_millis().max(0) as u64;
    NEXT_REVIEW_ID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(now_ms.max(last + 1))
        })
        .map(|last| now_ms.max(last + 1))
        .unwrap_or(now_ms)
}

/// Whether a draft `(rating, text)` pair is submittable.
pub fn draft_is_valid(rating: u8, text: &str) -> bool {
    rating >= 1 && !text.trim().is_empty()
}

/// Build a review from a valid draft.  The caller is expected to have
/// checked `draft_is_valid` first; the text is stored as typed.
pub fn review_from_draft(author: &str, rating: u8, text: String, date_format: &str) -> Review {
    Review {
        id: next_review_id(),
        author: author.to_string(),
        rating: rating.clamp(1, 5),
        text,
        date: Local::now().format(date_format).to_string(),
        avatar: None,
    }
}

/// The two fixed mock reviews shown when a detail dialog opens.
pub fn seed_reviews() -> Vec<Review> {
    vec![
        Review {
            id: 1,
            author: "Алексей Иванов".to_string(),
            rating: 5,
            text: "Потрясающий фильм! Визуальные эффекты на высшем уровне, сюжет держит в \
                   напряжении от начала до конца. Обязательно пересмотрю ещё раз!"
                .to_string(),
            date: "20.10.2024".to_string(),
            avatar: None,
        },
        Review {
            id: 2,
            author: "Мария Петрова".to_string(),
            rating: 4,
            text: "Очень интересная история, хотя местами темп немного проседает. В целом \
                   рекомендую к просмотру!"
                .to_string(),
            date: "19.10.2024".to_string(),
            avatar: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_ids_strictly_increase() {
        let ids: Vec<u64> = (0..64).map(|_| next_review_id()).collect();
        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0], "ids must be strictly increasing");
        }
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft_is_valid(1, "неплохо"));
        assert!(draft_is_valid(5, "  отлично  "));
        assert!(!draft_is_valid(0, "текст есть, оценки нет"));
        assert!(!draft_is_valid(3, ""));
        assert!(!draft_is_valid(3, "   \t\n"));
    }

    #[test]
    fn test_review_from_draft() {
        let review = review_from_draft("Вы", 4, "Хороший фильм".to_string(), "%d.%m.%Y");
        assert_eq!(review.author, "Вы");
        assert_eq!(review.rating, 4);
        assert_eq!(review.text, "Хороший фильм");
        // дд.мм.гггг
        assert_eq!(review.date.len(), 10);
        assert_eq!(review.date.matches('.').count(), 2);
    }

    #[test]
    fn test_seed_reviews_newest_first() {
        let reviews = seed_reviews();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].author, "Алексей Иванов");
        assert_eq!(reviews[0].rating, 5);
        assert_eq!(reviews[1].rating, 4);
    }
}
