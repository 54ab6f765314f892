//! Step-by-step animation of classic sorting algorithms.
//!
//! An algorithm body mutates a working copy of an array of [`VisualElement`]s and reports every
//! intermediate state through a [`SnapshotSink`], pausing between steps for a configurable delay.
//! Runs can be cancelled at any step and always end in a clean terminal state.
//!
//! [`run`] executes a single algorithm to completion. [`Visualizer`] adds the state a
//! presentation layer keeps around: the current array, speed and array size, and at most one
//! run in flight.

pub mod algorithms;
pub mod config;
pub mod controller;
pub mod element;
pub mod error;
pub mod patterns;
pub mod registry;
pub mod runner;
pub mod step;

pub use config::{RunConfig, Speed};
pub use controller::{RunState, Visualizer};
pub use element::VisualElement;
pub use error::{ControlError, ParseError, SortError};
pub use registry::{Algorithm, AlgorithmDescriptor, Category, Complexity, Precondition};
pub use runner::{run, RunOutcome, RunReport};
pub use step::{NullSink, Snapshot, SnapshotSink, StepStats, Stepper};
