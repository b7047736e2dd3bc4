//! Fixed-capacity text buffers backing the watchface text regions

use core::fmt;

/// A short text buffer of at most `N` bytes, overwritten in place.
///
/// Writes past the capacity are dropped, the same way `strftime`/`snprintf`
/// truncate into a fixed buffer. Truncation never splits a character.
#[derive(Clone)]
pub struct Label<const N: usize> {
    text: heapless::String<N>,
    /// Set once a write did not fit, later writes are dropped until `clear`
    truncated: bool,
}

impl<const N: usize> Label<N> {
    /// Create new empty label
    pub const fn new() -> Self {
        Self {
            text: heapless::String::new(),
            truncated: false,
        }
    }

    /// Maximum number of bytes the label holds
    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.truncated = false;
    }

    /// Replace the contents with the formatted arguments, truncating at capacity.
    pub fn set(&mut self, args: fmt::Arguments<'_>) {
        self.clear();
        // Our `write_str` never fails, it truncates instead.
        let _ = fmt::Write::write_fmt(self, args);
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl<const N: usize> Default for Label<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for Label<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        for c in s.chars() {
            if self.text.push(c).is_err() {
                self.truncated = true;
                break;
            }
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for Label<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for Label<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> PartialEq<&str> for Label<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for Label<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_previous_contents() {
        let mut label: Label<8> = Label::new();
        label.set(format_args!("{}%", 100));
        label.set(format_args!("{}%", 7));
        assert_eq!(label.as_str(), "7%");
    }

    #[test]
    fn truncates_at_capacity() {
        let mut label: Label<5> = Label::new();
        label.set(format_args!("{:02}:{:02}:{:02}", 13, 5, 9));
        assert_eq!(label.as_str(), "13:05");
        assert_eq!(label.capacity(), 5);
    }

    #[test]
    fn truncation_keeps_whole_characters() {
        let mut label: Label<3> = Label::new();
        label.set(format_args!("aä€"));
        assert_eq!(label.as_str(), "aä");
    }

    #[test]
    fn stops_at_first_character_that_does_not_fit() {
        let mut label: Label<3> = Label::new();
        label.set(format_args!("a€b"));
        assert_eq!(label.as_str(), "a");

        // A later argument that would fit is dropped too
        label.set(format_args!("{}{}", "a€", "b"));
        assert_eq!(label.as_str(), "a");
    }

    #[test]
    fn new_label_is_empty() {
        let label: Label<16> = Label::default();
        assert!(label.is_empty());
        assert_eq!(label, "");
    }
}
