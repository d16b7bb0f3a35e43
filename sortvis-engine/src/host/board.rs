// Sortvis Host - Sort Board
//
// A collection of cards driven together: global slider changes fan out to
// every card, and sort-all runs every card concurrently.

use log::{info, warn};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinSet;

use sortvis_utils::{AlgorithmKey, SortingSettings};

use super::card::{RefreshOutcome, SortCard};
use super::FlagGuard;
use crate::algorithms::SortStats;
use crate::error::{SortError, SortResult};

/// Result of one card's completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardReport {
    pub algorithm: AlgorithmKey,
    pub bars: usize,
    #[serde(flatten)]
    pub stats: SortStats,
}

/// Results of a sort-all run, in board order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardReport {
    pub results: Vec<CardReport>,
}

impl BoardReport {
    pub fn total_swaps(&self) -> usize {
        self.results.iter().map(|r| r.stats.swaps).sum()
    }
}

/// Every card on screen plus the sliders they share.
pub struct SortBoard {
    settings: Arc<SortingSettings>,
    cards: Vec<Arc<SortCard>>,
    /// Held for the duration of a sort-all run
    ui_locked: AtomicBool,
}

impl SortBoard {
    pub fn new(settings: Arc<SortingSettings>) -> Self {
        Self {
            settings,
            cards: Vec::new(),
            ui_locked: AtomicBool::new(false),
        }
    }

    /// Add a card and return a handle to it
    pub fn add_card(&mut self, card: SortCard) -> Arc<SortCard> {
        let card = Arc::new(card);
        self.cards.push(Arc::clone(&card));
        card
    }

    pub fn cards(&self) -> &[Arc<SortCard>] {
        &self.cards
    }

    pub fn card(&self, key: AlgorithmKey) -> Option<&Arc<SortCard>> {
        self.cards.iter().find(|card| card.key() == key)
    }

    pub fn settings(&self) -> &Arc<SortingSettings> {
        &self.settings
    }

    /// Whether a sort-all run is in progress
    pub fn is_locked(&self) -> bool {
        self.ui_locked.load(Ordering::Acquire)
    }

    /// Move the speed slider; running cards pick it up on their next step
    pub fn set_speed(&self, speed: u32) -> u32 {
        self.settings.set_speed(speed)
    }

    /// Move the density slider and regenerate every idle card
    pub fn set_density(&self, density: u32) -> SortResult<u32> {
        let density = self.settings.set_density(density);
        self.for_each_card("density sync", SortCard::sync_density)?;
        Ok(density)
    }

    /// Regenerate every idle card
    pub fn refresh_all(&self) -> SortResult<()> {
        self.for_each_card("refresh", SortCard::refresh)
    }

    /// Restore slider defaults and regenerate every idle card.
    ///
    /// Cards re-adopt the global density only if resetting changed it, so a
    /// card's own spacing survives a reset that leaves density alone.
    pub fn reset_all(&self) -> SortResult<()> {
        let density_changed =
            self.settings.density() != self.settings.config().density.default;
        self.settings.reset();

        let synced = if density_changed {
            self.for_each_card("density sync", SortCard::sync_density)
        } else {
            Ok(())
        };
        let refreshed = self.for_each_card("refresh", SortCard::refresh);
        synced.and(refreshed)
    }

    /// Apply `action` to every card, then return the first error
    fn for_each_card(
        &self,
        what: &str,
        action: impl Fn(&SortCard) -> SortResult<RefreshOutcome>,
    ) -> SortResult<()> {
        let mut first_error = None;
        for card in &self.cards {
            if let Err(e) = action(card.as_ref()) {
                warn!("{}: {} failed: {}", card.key(), what, e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Sort every card concurrently and wait for all of them.
    ///
    /// Every run is awaited even if another fails; the first failure is
    /// returned once all runs have ended.
    ///
    /// # Returns
    ///
    /// * `Ok(BoardReport)` - Per-card statistics, in board order
    /// * `Err(SortError::BoardBusy)` - If a sort-all run is already in progress
    /// * `Err(SortError)` - The first error raised by any card
    pub async fn sort_all(&self) -> SortResult<BoardReport> {
        let _locked = FlagGuard::acquire(&self.ui_locked).ok_or(SortError::BoardBusy)?;
        info!("Sorting {} cards", self.cards.len());

        let mut runs = JoinSet::new();
        for (index, card) in self.cards.iter().enumerate() {
            let card = Arc::clone(card);
            runs.spawn(async move {
                let bars = card.bar_count();
                let result = card.sort().await;
                (index, card.key(), bars, result)
            });
        }

        let mut results: Vec<Option<CardReport>> = vec![None; self.cards.len()];
        let mut first_error = None;
        while let Some(joined) = runs.join_next().await {
            match joined {
                Ok((index, algorithm, bars, Ok(stats))) => {
                    results[index] = Some(CardReport {
                        algorithm,
                        bars,
                        stats,
                    });
                }
                Ok((_, algorithm, _, Err(e))) => {
                    warn!("{}: run failed during sort-all: {}", algorithm, e);
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    warn!("Sort task did not complete: {}", e);
                    first_error.get_or_insert(SortError::from(e));
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }
        let report = BoardReport {
            results: results.into_iter().flatten().collect(),
        };
        info!("Sort-all finished with {} swaps", report.total_swaps());
        Ok(report)
    }
}

#[cfg(test)]
#[path = "./unit/board_tests.rs"]
mod board_tests;
