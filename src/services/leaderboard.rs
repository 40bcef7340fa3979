//! Leaderboard ranking.
//!
//! Results are ordered by score (highest first), then completion time
//! (earliest first), then id, giving a total order. The viewer's own result is
//! injected when the store snapshot does not yet contain it, so a freshly
//! submitted attempt is always visible even under read-after-write lag.

use std::{cmp::Ordering, sync::Arc, time::Duration};

use crate::{
    errors::AppResult,
    models::domain::QuizResult,
    repositories::ResultRepository,
    services::bounded,
};

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub result: QuizResult,
    pub is_viewer: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardStats {
    pub participant_count: usize,
    pub mean_score: f64,
    pub max_score: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankedLeaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub viewer_rank: Option<usize>,
    pub stats: LeaderboardStats,
    /// Set when the store could not be read and only the viewer is shown.
    pub degraded: bool,
}

pub fn compare_results(a: &QuizResult, b: &QuizResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.completed_at.cmp(&b.completed_at))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_results(results: &mut [QuizResult]) {
    results.sort_by(compare_results);
}

pub fn compute_stats(results: &[QuizResult]) -> LeaderboardStats {
    if results.is_empty() {
        return LeaderboardStats {
            participant_count: 0,
            mean_score: 0.0,
            max_score: 0,
        };
    }

    let total: u64 = results.iter().map(|r| r.score as u64).sum();
    let mean = total as f64 / results.len() as f64;

    LeaderboardStats {
        participant_count: results.len(),
        mean_score: (mean * 10.0).round() / 10.0,
        max_score: results.iter().map(|r| r.score).max().unwrap_or(0),
    }
}

/// Ranks a snapshot from the viewer's point of view.
///
/// `results` must be every stored result for the quiz. The viewer's result is
/// matched by `(player_name, score)`, not by id. Stats cover the whole set
/// including the viewer. The viewer's rank is the first row carrying their
/// name. If that row falls outside the top `limit`, it is appended after the
/// truncated list with its true rank. Only that row and the viewer's own
/// `(player_name, score)` row are marked as the viewer.
pub fn rank_for_viewer(
    mut results: Vec<QuizResult>,
    viewer: &QuizResult,
    limit: usize,
) -> RankedLeaderboard {
    if !results.iter().any(|r| r.same_standing(viewer)) {
        results.insert(0, viewer.clone());
    }

    sort_results(&mut results);
    let stats = compute_stats(&results);

    let viewer_index = results
        .iter()
        .position(|r| r.player_name == viewer.player_name);
    let own_index = results.iter().position(|r| r.same_standing(viewer));

    let mut entries: Vec<LeaderboardEntry> = results
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, result)| LeaderboardEntry {
            rank: i + 1,
            result: result.clone(),
            is_viewer: Some(i) == viewer_index || Some(i) == own_index,
        })
        .collect();

    if let Some(index) = viewer_index.filter(|&i| i >= limit) {
        entries.push(LeaderboardEntry {
            rank: index + 1,
            result: results[index].clone(),
            is_viewer: true,
        });
    }

    RankedLeaderboard {
        entries,
        viewer_rank: viewer_index.map(|i| i + 1),
        stats,
        degraded: false,
    }
}

/// Self-only board used when the store cannot be read.
pub fn viewer_only(viewer: &QuizResult) -> RankedLeaderboard {
    RankedLeaderboard {
        entries: vec![LeaderboardEntry {
            rank: 1,
            result: viewer.clone(),
            is_viewer: true,
        }],
        viewer_rank: Some(1),
        stats: compute_stats(std::slice::from_ref(viewer)),
        degraded: true,
    }
}

pub struct LeaderboardService {
    results: Arc<dyn ResultRepository>,
    limit: usize,
    timeout: Duration,
}

impl LeaderboardService {
    pub fn new(results: Arc<dyn ResultRepository>, limit: usize, timeout: Duration) -> Self {
        Self {
            results,
            limit,
            timeout,
        }
    }

    /// Top results for a quiz in rank order, capped at the leaderboard limit.
    pub async fn top(&self, quiz_id: &str) -> AppResult<Vec<QuizResult>> {
        bounded(
            self.timeout,
            "leaderboard fetch",
            self.results.find_ranked_by_quiz(quiz_id, self.limit as i64),
        )
        .await
    }

    /// Never fails: a store error degrades to a board holding only the viewer.
    pub async fn for_viewer(&self, viewer: &QuizResult) -> RankedLeaderboard {
        let fetched = bounded(
            self.timeout,
            "leaderboard fetch",
            self.results.find_by_quiz(&viewer.quiz_id),
        )
        .await;

        match fetched {
            Ok(all) => rank_for_viewer(all, viewer, self.limit),
            Err(err) => {
                log::warn!(
                    "Leaderboard for quiz {} degraded to viewer only: {}",
                    viewer.quiz_id,
                    err
                );
                viewer_only(viewer)
            }
        }
    }
}
