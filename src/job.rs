//! Map a trial onto a scheduler submission
//!
//! Builds the inner command run by the remote worker, then wraps it in a `JobDescriptor`
//! describing placement, image, mounts and labels. Nothing here talks to the scheduler.

/// Inner command for the optimization script
pub mod inner;
/// The scheduler-facing job record
pub mod descriptor;
/// Render a human-readable job card
pub mod card;
