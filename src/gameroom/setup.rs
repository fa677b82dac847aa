use super::*;

/// What a host asks for when opening a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    pub name: String,
    /// Requested seat count, clamped into `MIN_PLAYERS..=MAX_PLAYERS`.
    pub capacity: usize,
    /// Private tables are reachable only by invite code.
    pub private: bool,
    pub password: Option<String>,
}

impl Setup {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
    pub fn capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }
    pub fn public(self) -> Self {
        Self {
            private: false,
            ..self
        }
    }
    pub fn password(self, password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..self
        }
    }
    pub fn seats(&self) -> usize {
        self.capacity.clamp(MIN_PLAYERS, MAX_PLAYERS)
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            name: String::from("31 Table"),
            capacity: MAX_PLAYERS,
            private: true,
            password: None,
        }
    }
}
