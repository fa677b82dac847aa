use crate::NARRATION_CAP;
use std::collections::VecDeque;

/// Bounded play-by-play shown to everyone at the table.
/// Appending past [`NARRATION_CAP`] drops the oldest entry.
#[derive(Debug, Clone, Default)]
pub struct Narration(VecDeque<String>);

impl Narration {
    pub fn push<S>(&mut self, line: S)
    where
        S: Into<String>,
    {
        let line = line.into();
        log::debug!("[narration] {}", line);
        self.0.push_back(line);
        while self.0.len() > NARRATION_CAP {
            self.0.pop_front();
        }
    }
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
    pub fn last(&self) -> Option<&str> {
        self.0.back().map(String::as_str)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_beyond_cap() {
        let mut narration = Narration::default();
        (0..NARRATION_CAP + 5).for_each(|i| narration.push(format!("line {}", i)));
        assert_eq!(narration.len(), NARRATION_CAP);
        assert_eq!(narration.lines().next(), Some("line 5"));
        assert_eq!(narration.last(), Some(format!("line {}", NARRATION_CAP + 4).as_str()));
    }
}
