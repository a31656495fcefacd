//! Report aggregation over registry and ledger rows
//!
//! Pure functions: the engine fetches users and completions, these build
//! the per-user views that replies are rendered from.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::model::day::{days_inclusive, MONTH_WINDOW_DAYS};
use crate::model::{Completion, User, UserId};

/// `/result <date>`: who completed and who missed a given day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub completed: Vec<User>,
    pub missed: Vec<User>,
}

impl DailyReport {
    /// Split `users` by whether they appear in `completions`
    ///
    /// Completions for other dates are ignored. User order is preserved.
    pub fn build(date: NaiveDate, users: &[User], completions: &[Completion]) -> Self {
        let done: HashSet<UserId> = completions
            .iter()
            .filter(|c| c.date == date)
            .map(|c| c.user_id)
            .collect();

        let (completed, missed) = users
            .iter()
            .cloned()
            .partition(|u| done.contains(&u.user_id));

        Self {
            date,
            completed,
            missed,
        }
    }
}

/// The range a tally counts over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyWindow {
    /// `/result_all`: every completion
    AllTime,
    /// `/result_month`: everything from 30 days ago on, days marked
    /// ahead of today included
    Month { from: NaiveDate },
    /// `/result_step <date>`: from a chosen day through today
    Since { from: NaiveDate, to: NaiveDate },
}

impl TallyWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            TallyWindow::AllTime => true,
            TallyWindow::Month { from } => from <= date,
            TallyWindow::Since { from, to } => from <= date && date <= to,
        }
    }

    /// Denominator shown next to each count, if the window has one
    pub fn out_of(&self) -> Option<i64> {
        match *self {
            TallyWindow::AllTime => None,
            TallyWindow::Month { .. } => Some(MONTH_WINDOW_DAYS),
            TallyWindow::Since { from, to } => Some(days_inclusive(from, to)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyRow {
    pub user: User,
    pub count: usize,
}

/// Per-user completion counts over a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyReport {
    pub window: TallyWindow,
    pub rows: Vec<TallyRow>,
}

impl TallyReport {
    /// Count completions inside `window` for every registered user
    ///
    /// Users without completions get a zero row; completions of unknown
    /// users are dropped.
    pub fn build(window: TallyWindow, users: &[User], completions: &[Completion]) -> Self {
        let mut counts: HashMap<UserId, usize> = HashMap::new();
        for completion in completions.iter().filter(|c| window.contains(c.date)) {
            *counts.entry(completion.user_id).or_default() += 1;
        }

        let rows = users
            .iter()
            .map(|user| TallyRow {
                user: user.clone(),
                count: counts.get(&user.user_id).copied().unwrap_or(0),
            })
            .collect();

        Self { window, rows }
    }
}
