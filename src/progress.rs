//! Progress Ledger
//!
//! Points, streak, lesson/word counters and badge unlocks. All mutation
//! goes through the transition methods here; badge evaluation is a pure
//! function over the ledger and is monotone and idempotent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::wordbank::Word;

/// Fixed reward per newly learned word
pub const POINTS_PER_WORD: u32 = 10;
/// Fixed reward per completed lesson
pub const POINTS_PER_LESSON: u32 = 50;

/// Which ledger counter a badge watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeKind {
    Words,
    Lessons,
    Streak,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub unlocked: bool,
    pub threshold: u32,
    pub kind: BadgeKind,
}

impl Badge {
    fn new(id: &str, name: &str, icon: &str, description: &str, threshold: u32, kind: BadgeKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
            unlocked: false,
            threshold,
            kind,
        }
    }
}

/// The starting badge set, all locked
pub fn default_badges() -> Vec<Badge> {
    vec![
        Badge::new("rookie", "Rookie", "🌱", "Learn 10 words", 10, BadgeKind::Words),
        Badge::new("wordsmith", "Wordsmith", "📖", "Learn 50 words", 50, BadgeKind::Words),
        Badge::new("vocabulary-master", "Vocabulary Master", "🏆", "Learn 100 words", 100, BadgeKind::Words),
        Badge::new("first-lesson", "First Lesson", "✏️", "Complete your first lesson", 1, BadgeKind::Lessons),
        Badge::new("dedicated", "Dedicated", "🎓", "Complete 5 lessons", 5, BadgeKind::Lessons),
        Badge::new("on-fire", "On Fire", "🔥", "Practice 3 days in a row", 3, BadgeKind::Streak),
        Badge::new("unstoppable", "Unstoppable", "⚡", "Practice 7 days in a row", 7, BadgeKind::Streak),
    ]
}

/// Learner progress: counters plus badge state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub points: u32,
    pub streak: u32,
    pub lessons_completed: u32,
    pub words_learned: u32,
    pub badges: Vec<Badge>,
    last_active: Option<NaiveDate>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            points: 0,
            streak: 1,
            lessons_completed: 0,
            words_learned: 0,
            badges: default_badges(),
            last_active: None,
        }
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record newly accepted words (dedup already done by the word bank).
    /// Awards fixed points per word and re-evaluates badges.
    pub fn apply_words_learned(&mut self, accepted: &[Word]) {
        if accepted.is_empty() {
            return;
        }
        self.words_learned += accepted.len() as u32;
        self.points += POINTS_PER_WORD * accepted.len() as u32;
        self.evaluate_badges();
    }

    /// Record a completed lesson: +1 lesson, fixed reward, badge pass.
    pub fn apply_lesson_complete(&mut self) {
        self.lessons_completed += 1;
        self.points += POINTS_PER_LESSON;
        self.evaluate_badges();
    }

    /// Record learner activity on a calendar day to maintain the streak.
    /// Same day: no-op. Next consecutive day: streak + 1. Gap: reset to 1.
    pub fn record_activity(&mut self, today: NaiveDate) {
        match self.last_active {
            Some(last) if last == today => return,
            Some(last) if last.succ_opt() == Some(today) => {
                self.streak += 1;
                info!("🔥 Streak extended to {} day(s)", self.streak);
            }
            Some(_) => {
                self.streak = 1;
            }
            None => {
                self.streak = 1;
            }
        }
        self.last_active = Some(today);
        self.evaluate_badges();
    }

    /// Unlock every locked badge whose watched counter has crossed its
    /// threshold. Never re-locks; calling twice on the same state is a
    /// no-op.
    pub fn evaluate_badges(&mut self) {
        let (words, lessons, streak) = (self.words_learned, self.lessons_completed, self.streak);
        for badge in &mut self.badges {
            if badge.unlocked {
                continue;
            }
            let metric = match badge.kind {
                BadgeKind::Words => words,
                BadgeKind::Lessons => lessons,
                BadgeKind::Streak => streak,
            };
            if metric >= badge.threshold {
                badge.unlocked = true;
                info!("🏅 Badge unlocked: {} {}", badge.icon, badge.name);
            }
        }
    }

    /// Badges currently unlocked, in definition order
    pub fn unlocked_badges(&self) -> impl Iterator<Item = &Badge> {
        self.badges.iter().filter(|b| b.unlocked)
    }
}
