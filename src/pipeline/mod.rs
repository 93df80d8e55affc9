//! Training and evaluation pipeline
//!
//! This module provides:
//! - Self-play training with per-episode snapshots of tracked boards
//! - Evaluation of frozen policies against each other or themselves
//! - Observers reporting progress during either kind of run

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{Evaluation, OutcomeCounts, evaluate, evaluate_self};
pub use observers::{IntervalObserver, ProgressObserver};
pub use training::{Trainer, TrainingConfig, TrainingHistory, train};

pub use crate::ports::{Observer, Policy};
