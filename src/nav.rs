//! Page stack for the navigation shell

use crate::activity::RecordId;
use crate::theme::Gradient;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    /// Detail page seeded with the tile's record and its gradient
    Detail { record: RecordId, gradient: Gradient },
}

/// Stack of pages. The dashboard root can never be popped.
#[derive(Debug)]
pub struct NavStack {
    stack: Vec<Route>,
}

impl Default for NavStack {
    fn default() -> Self {
        Self {
            stack: vec![Route::Dashboard],
        }
    }
}

impl NavStack {
    #[inline]
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Dashboard)
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.stack.len() <= 1
    }

    pub fn push(&mut self, route: Route) {
        info!("Navigate to {:?}", route);
        self.stack.push(route);
    }

    /// Pop back one page. Returns the page left, or None at the root.
    pub fn pop(&mut self) -> Option<Route> {
        if self.is_root() {
            return None;
        }
        let left = self.stack.pop();
        info!("Navigate back to {:?}", self.current());
        left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::sample_records;
    use ratatui::style::Color;

    #[test]
    fn test_push_and_pop() {
        let id = sample_records().at(0).unwrap().id;
        let detail = Route::Detail {
            record: id,
            gradient: Gradient::new(Color::Green, Color::Blue),
        };
        let mut nav = NavStack::default();
        assert!(nav.is_root());
        assert_eq!(nav.current(), Route::Dashboard);

        nav.push(detail);
        assert!(!nav.is_root());
        assert_eq!(nav.current(), detail);

        assert_eq!(nav.pop(), Some(detail));
        assert_eq!(nav.current(), Route::Dashboard);
        assert_eq!(nav.pop(), None);
        assert!(nav.is_root());
    }
}
