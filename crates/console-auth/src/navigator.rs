//! Navigation collaborator
//!
//! The session core never renders anything. It only asks a `Navigator` to
//! move to a route; whatever shell hosts the console decides what that means.

use parking_lot::RwLock;
use std::sync::Arc;

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator that remembers where it was sent
pub struct RouteRecorder {
    current: Arc<RwLock<Option<String>>>,
    history: Arc<RwLock<Vec<String>>>,
    tracing: bool,
}

impl RouteRecorder {
    pub fn new(tracing: bool) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            history: Arc::new(RwLock::new(Vec::new())),
            tracing,
        }
    }

    pub fn current(&self) -> Option<String> {
        self.current.read().clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.read().clone()
    }
}

impl Navigator for RouteRecorder {
    fn navigate(&self, route: &str) {
        let previous = self.current.write().replace(route.to_string());
        self.history.write().push(route.to_string());

        if self.tracing {
            tracing::info!(
                from = previous.as_deref().unwrap_or("-"),
                to = %route,
                "Router navigation"
            );
        } else {
            tracing::debug!(to = %route, "Router navigation");
        }
    }
}

impl Clone for RouteRecorder {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            history: Arc::clone(&self.history),
            tracing: self.tracing,
        }
    }
}

impl Default for RouteRecorder {
    fn default() -> Self {
        Self::new(false)
    }
}
