//! Fixed-capacity FIFO of past tension scores.

use std::collections::VecDeque;

/// Bounded score history. Once full, each push evicts the oldest score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreHistory {
    capacity: usize,
    scores: VecDeque<f64>,
}

impl ScoreHistory {
    /// Creates an empty history. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            scores: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a score, returning the evicted one if the buffer was full.
    pub fn push(&mut self, score: f64) -> Option<f64> {
        let evicted = if self.scores.len() == self.capacity {
            self.scores.pop_front()
        } else {
            None
        };
        self.scores.push_back(score);
        evicted
    }

    pub fn last(&self) -> Option<f64> {
        self.scores.back().copied()
    }

    /// Mean of the most recent `window` scores, if any exist.
    pub fn recent_mean(&self, window: usize) -> Option<f64> {
        let recent: Vec<f64> = self.recent(window).collect();
        if recent.is_empty() {
            return None;
        }
        Some(recent.iter().sum::<f64>() / recent.len() as f64)
    }

    /// Population standard deviation of the most recent `window` scores.
    pub fn recent_std_dev(&self, window: usize) -> f64 {
        let recent: Vec<f64> = self.recent(window).collect();
        if recent.len() < 2 {
            return 0.0;
        }
        let n = recent.len() as f64;
        let mean = recent.iter().sum::<f64>() / n;
        let variance = recent.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt()
    }

    fn recent(&self, window: usize) -> impl Iterator<Item = f64> + '_ {
        let skip = self.scores.len().saturating_sub(window);
        self.scores.iter().skip(skip).copied()
    }

    /// Scores oldest first.
    pub fn to_vec(&self) -> Vec<f64> {
        self.scores.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }
}
