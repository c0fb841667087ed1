//! Energy balance analysis for a single day's schedule
//!
//! Looks at the planned exertion levels of one day's sessions and produces
//! at most one advisory hint. Nothing here is persisted.

use std::collections::HashSet;

use crate::domain::{ExertionLevel, StudySession};

/// Kind of hint produced for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyHintKind {
    TooManyHigh,
    HighBackToBack,
    GoodBalance,
}

/// Advisory hint about a day's workload balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnergyHint {
    pub kind: EnergyHintKind,
    pub message: &'static str,
}

/// Analyze one day's sessions and return a hint, or `None` when there is
/// nothing useful to say.
///
/// Sessions without a planned exertion level are ignored. Checks run in
/// priority order: too many high-exertion sessions, then high sessions
/// back to back, then a positive balance note.
pub fn analyze_day_energy(sessions: &[StudySession]) -> Option<EnergyHint> {
    let mut ordered: Vec<&StudySession> =
        sessions.iter().filter(|s| s.exertion.is_some()).collect();
    ordered.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then(a.duration.cmp(&b.duration))
    });

    if ordered.is_empty() {
        return None;
    }

    let high_count = ordered
        .iter()
        .filter(|s| s.exertion == Some(ExertionLevel::High))
        .count();
    if high_count > 2 {
        return Some(EnergyHint {
            kind: EnergyHintKind::TooManyHigh,
            message: "You have a lot of demanding sessions planned for this day. \
                      Consider scheduling lighter work in between.",
        });
    }

    let mut consecutive_high = 0;
    for session in &ordered {
        if session.exertion == Some(ExertionLevel::High) {
            consecutive_high += 1;
            if consecutive_high >= 2 {
                return Some(EnergyHint {
                    kind: EnergyHintKind::HighBackToBack,
                    message: "Several demanding sessions are planned back to back. \
                              Want to slot an easier one in between?",
                });
            }
        } else {
            consecutive_high = 0;
        }
    }

    let levels: HashSet<ExertionLevel> = ordered.iter().filter_map(|s| s.exertion).collect();
    if ordered.len() >= 2 && levels.len() >= 2 {
        return Some(EnergyHint {
            kind: EnergyHintKind::GoodBalance,
            message: "Your plan has a good balance of demanding and lighter sessions.",
        });
    }

    None
}
