//! CLI infrastructure for the Q-learning toolkit
//!
//! This module provides the command-line interface for training Q-tables
//! through self-play, evaluating them and inspecting individual rows.

pub mod commands;
pub mod output;
