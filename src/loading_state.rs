use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Host-owned loading flag, shared by reference with the button.
///
/// Clones observe the same flag. The button only ever reads it.
#[derive(Debug, Clone, Default)]
pub struct LoadingState {
    flag: Arc<RwLock<bool>>,
}

impl LoadingState {
    pub fn new(initial: bool) -> Self {
        Self {
            flag: Arc::new(RwLock::new(initial)),
        }
    }

    /// Current value; a poisoned lock reads as idle
    pub fn get(&self) -> bool {
        match self.flag.read() {
            Ok(flag) => *flag,
            Err(e) => {
                warn!("Failed to read loading state: {}", e);
                false
            }
        }
    }

    /// Sets the flag and returns the previous value
    pub fn set(&self, loading: bool) -> bool {
        match self.flag.write() {
            Ok(mut flag) => {
                let previous = std::mem::replace(&mut *flag, loading);
                debug!("Loading state: {} -> {}", previous, loading);
                previous
            }
            Err(e) => {
                warn!("Failed to set loading state: {}", e);
                false
            }
        }
    }

    /// Sets the flag to `true` only if it was `false`; returns whether it changed
    pub fn begin(&self) -> bool {
        match self.flag.write() {
            Ok(mut flag) if !*flag => {
                *flag = true;
                debug!("Loading state: false -> true");
                true
            }
            Ok(_) => false,
            Err(e) => {
                warn!("Failed to begin loading: {}", e);
                false
            }
        }
    }

    /// True if both handles point at the same flag
    pub fn same_as(&self, other: &LoadingState) -> bool {
        Arc::ptr_eq(&self.flag, &other.flag)
    }
}

/// Loading flags for every button a host drives, keyed by button name
#[derive(Debug, Clone, Default)]
pub struct LoadingStates {
    states: Arc<RwLock<HashMap<String, LoadingState>>>,
}

impl LoadingStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the flag for `button_name`, creating an idle one on first use
    pub fn binding(&self, button_name: &str) -> LoadingState {
        if let Ok(states) = self.states.read() {
            if let Some(state) = states.get(button_name) {
                return state.clone();
            }
        }

        match self.states.write() {
            Ok(mut states) => states
                .entry(button_name.to_string())
                .or_insert_with(|| {
                    debug!("Created loading state for '{}'", button_name);
                    LoadingState::default()
                })
                .clone(),
            Err(e) => {
                warn!("Failed to register loading state for '{}': {}", button_name, e);
                LoadingState::default()
            }
        }
    }

    pub fn is_loading(&self, button_name: &str) -> bool {
        match self.states.read() {
            Ok(states) => states.get(button_name).map(LoadingState::get).unwrap_or(false),
            Err(e) => {
                warn!("Failed to read loading state for '{}': {}", button_name, e);
                false
            }
        }
    }
}
