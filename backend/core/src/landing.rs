//! Name entry form.

use crate::session::normalize_name;

#[derive(Debug, Clone)]
pub struct LandingForm {
    input: String,
    max_chars: usize,
}

impl LandingForm {
    pub fn new(max_chars: usize) -> Self {
        Self {
            input: String::new(),
            max_chars,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Appends a character unless the field is full. Control characters are dropped.
    pub fn push(&mut self, c: char) -> bool {
        if c.is_control() || self.input.chars().count() >= self.max_chars {
            return false;
        }
        self.input.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// The trimmed name, or `None` while the field is blank.
    pub fn submit(&self) -> Option<String> {
        let name = normalize_name(&self.input, self.max_chars);
        (!name.is_empty()).then_some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_input_length() {
        let mut form = LandingForm::new(3);
        for c in "Alya".chars() {
            form.push(c);
        }
        assert_eq!(form.input(), "Aly");
        assert!(!form.push('x'));
    }

    #[test]
    fn blank_input_cannot_submit() {
        let mut form = LandingForm::new(20);
        form.push(' ');
        form.push(' ');
        assert!(!form.can_submit());
        assert_eq!(form.submit(), None);
    }

    #[test]
    fn submit_trims() {
        let mut form = LandingForm::new(20);
        for c in " Alya ".chars() {
            form.push(c);
        }
        assert_eq!(form.submit().as_deref(), Some("Alya"));
        form.backspace();
        form.backspace();
        assert_eq!(form.input(), " Aly");
    }

    #[test]
    fn control_chars_are_dropped() {
        let mut form = LandingForm::new(20);
        assert!(!form.push('\t'));
        assert!(form.input().is_empty());
    }
}
