//! Ports (trait boundaries) for external collaborators.
//!
//! The engine and the trainer only talk to policies, observers and storage
//! through these traits, so any implementation can be swapped in without
//! touching the game loop.

pub mod observer;
pub mod policy;
pub mod repository;

pub use observer::Observer;
pub use policy::Policy;
pub use repository::QTableRepository;
