//! Multi-step form progress (enquiry and booking flows)

use std::collections::BTreeSet;

use tracing::debug;

#[derive(Debug, Clone)]
pub struct Stepper<S> {
    steps: Vec<S>,
    current: usize,
    completed: BTreeSet<usize>,
}

impl<S> Stepper<S> {
    pub fn new(steps: Vec<S>) -> Self {
        Self {
            steps,
            current: 0,
            completed: BTreeSet::new(),
        }
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&S> {
        self.steps.get(self.current)
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.steps.len()
    }

    /// Every step has been completed
    pub fn is_finished(&self) -> bool {
        !self.steps.is_empty() && self.completed.len() == self.steps.len()
    }

    /// Complete the current step and advance; the last step only completes
    pub fn next(&mut self) -> bool {
        if self.steps.is_empty() {
            return false;
        }
        self.completed.insert(self.current);
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to a completed step or the first incomplete one
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.steps.len() {
            return false;
        }
        let frontier = (0..self.steps.len())
            .find(|i| !self.completed.contains(i))
            .unwrap_or(self.steps.len() - 1);
        if index > frontier {
            debug!(index, frontier, "Ignoring jump past an incomplete step");
            return false;
        }
        self.current = index;
        true
    }

    /// Completed fraction in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        self.completed.len() as f64 / self.steps.len() as f64
    }

    /// "Step 2 of 4"
    pub fn position_label(&self) -> String {
        format!("Step {} of {}", (self.current + 1).min(self.steps.len()), self.steps.len())
    }

    pub fn reset(&mut self) {
        self.current = 0;
        self.completed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> Stepper<&'static str> {
        Stepper::new(vec!["Service", "Date", "Details", "Confirm"])
    }

    #[test]
    fn test_next_and_back() {
        let mut s = booking();
        assert!(s.next());
        assert_eq!(s.position_label(), "Step 2 of 4");
        assert!(s.is_completed(0));
        assert!(s.back());
        assert!(!s.back());
        assert_eq!(s.current(), Some(&"Service"));
    }

    #[test]
    fn test_cannot_skip_incomplete() {
        let mut s = booking();
        s.next();
        assert!(!s.go_to(3));
        assert!(s.go_to(1));
        assert!(s.go_to(0));
    }

    #[test]
    fn test_last_step_completes_without_advancing() {
        let mut s = booking();
        for _ in 0..3 {
            s.next();
        }
        assert!(s.is_last());
        assert!(!s.next());
        assert!(s.is_finished());
        assert_eq!(s.progress(), 1.0);
    }

    #[test]
    fn test_empty_stepper() {
        let mut s: Stepper<&str> = Stepper::new(Vec::new());
        assert!(!s.next());
        assert_eq!(s.progress(), 0.0);
        assert_eq!(s.position_label(), "Step 0 of 0");
    }
}
