use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Details(String),
}

impl Route {
    /// Accepts `list` and `details/{id}`. Any id is accepted here; unknown ids
    /// are resolved (and rendered as not found) by the detail screen.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw == "list" {
            return Ok(Route::List);
        }
        if let Some(id) = raw.strip_prefix("details/") {
            return Ok(Route::Details(id.to_string()));
        }
        Err(Error::msg(format!(
            "unknown route '{raw}' (expected 'list' or 'details/<id>')"
        )))
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "list".to_string(),
            Route::Details(id) => format!("details/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    stack: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::List],
        }
    }

    pub fn current(&self) -> &Route {
        // The root is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn navigate(&mut self, route: Route) {
        if route == Route::List && self.current() == &Route::List {
            return;
        }
        debug!(route = %route, "navigate");
        self.stack.push(route);
    }

    /// Returns `false` when already at the root.
    pub fn navigate_up(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        let left = self.stack.pop();
        debug!(from = ?left, to = %self.current(), "navigate up");
        true
    }
}
