//! Application state for the web layer.

use std::sync::Arc;

use crate::engine::Engine;
use crate::store::MemoryStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Matching and request operations over the journey store
    pub engine: Arc<Engine<MemoryStore>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: Engine<MemoryStore>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
