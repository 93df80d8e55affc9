//! Observer implementations for training and evaluation runs

use indicatif::{ProgressBar, ProgressStyle};

use super::evaluation::OutcomeCounts;
use crate::{Result, ports::Observer, tictactoe::GameOutcome};

/// Progress bar observer - Shows episodes done and running outcome counts
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    counts: OutcomeCounts,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            counts: OutcomeCounts::default(),
        }
    }

    fn message(&self) -> String {
        format!(
            "X:{} O:{} D:{}",
            self.counts.x_wins, self.counts.o_wins, self.counts.draws
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.counts = OutcomeCounts::default();
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome) -> Result<()> {
        self.counts.record(outcome);

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Callback receiving (episodes seen so far, counts of the finished window)
pub type IntervalReporter = Box<dyn FnMut(usize, &OutcomeCounts)>;

/// Tallies outcomes in blocks of `every` episodes
///
/// Each finished block is kept in [`reports`](Self::reports) and handed to
/// the reporter, if one is set.
pub struct IntervalObserver {
    every: usize,
    window: OutcomeCounts,
    reports: Vec<(usize, OutcomeCounts)>,
    reporter: Option<IntervalReporter>,
}

impl IntervalObserver {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            window: OutcomeCounts::default(),
            reports: Vec::new(),
            reporter: None,
        }
    }

    /// Call `reporter` after every finished window
    pub fn with_reporter<F>(mut self, reporter: F) -> Self
    where
        F: FnMut(usize, &OutcomeCounts) + 'static,
    {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// Completed windows as (episodes seen so far, counts in the window)
    pub fn reports(&self) -> &[(usize, OutcomeCounts)] {
        &self.reports
    }

    fn flush(&mut self, episodes_seen: usize) {
        if self.window.total() == 0 {
            return;
        }
        let window = std::mem::take(&mut self.window);
        if let Some(reporter) = &mut self.reporter {
            reporter(episodes_seen, &window);
        }
        self.reports.push((episodes_seen, window));
    }
}

impl Observer for IntervalObserver {
    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome) -> Result<()> {
        self.window.record(outcome);
        let seen = episode + 1;
        if seen.is_multiple_of(self.every) {
            self.flush(seen);
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        let seen = self.reports.last().map_or(0, |(n, _)| *n) + self.window.total();
        self.flush(seen);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn test_interval_observer_windows() {
        let mut observer = IntervalObserver::new(2);
        let outcomes = [
            GameOutcome::Win(Player::X),
            GameOutcome::Draw,
            GameOutcome::Win(Player::O),
            GameOutcome::Draw,
            GameOutcome::Draw,
        ];
        for (episode, outcome) in outcomes.into_iter().enumerate() {
            observer.on_episode_end(episode, outcome).unwrap();
        }
        observer.on_training_end().unwrap();

        let reports = observer.reports();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].0, 2);
        assert_eq!(reports[0].1.x_wins, 1);
        assert_eq!(reports[1].1.o_wins, 1);
        assert_eq!(reports[2], (5, OutcomeCounts { x_wins: 0, o_wins: 0, draws: 1 }));
    }

    #[test]
    fn test_interval_reporter_receives_each_window() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut observer = IntervalObserver::new(3)
            .with_reporter(move |episodes, counts| sink.borrow_mut().push((episodes, *counts)));

        for episode in 0..7 {
            observer
                .on_episode_end(episode, GameOutcome::Win(Player::O))
                .unwrap();
        }
        observer.on_training_end().unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen.as_slice(), observer.reports());
        assert_eq!(seen[0], (3, OutcomeCounts { x_wins: 0, o_wins: 3, draws: 0 }));
        assert_eq!(seen[2].0, 7);
    }

    #[test]
    fn test_progress_observer_lifecycle() {
        let mut observer = ProgressObserver::new();
        observer.on_training_start(2).unwrap();
        observer.on_episode_end(0, GameOutcome::Draw).unwrap();
        observer.on_episode_end(1, GameOutcome::Win(Player::X)).unwrap();
        observer.on_training_end().unwrap();
        assert_eq!(observer.message(), "X:1 O:0 D:1");
    }
}
