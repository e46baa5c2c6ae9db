//! Seam to the external neural-network runtime.
//!
//! The runtime itself is not part of this crate: embedders implement [`session::InferenceSession`]
//! over whatever executes the two model graphs.

/// Slot names and shapes of the model artifacts.
pub mod contract;
/// Session and loader traits.
pub mod session;
/// Minimal tensor container used at the session boundary.
pub mod tensor;
