use super::*;
use crate::gameplay::Difficulty;
use std::time::Duration;
use tokio::time::Instant;

/// A lobby participant. Distinct from the round-scoped
/// [`Player`](crate::gameplay::Player) it is mapped to once a game starts.
#[derive(Debug, Clone)]
pub struct Seat {
    id: PlayerId,
    name: String,
    status: SeatStatus,
    host: bool,
    difficulty: Option<Difficulty>,
    joined: Instant,
    active: Instant,
}

impl Seat {
    pub fn human(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self::new(id.into(), name.into(), SeatStatus::Joined, None)
    }
    /// Computer seats are ready the moment they sit.
    pub fn robot(id: impl Into<PlayerId>, name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self::new(id.into(), name.into(), SeatStatus::Ready, Some(difficulty))
    }
    fn new(id: PlayerId, name: String, status: SeatStatus, difficulty: Option<Difficulty>) -> Self {
        let now = Instant::now();
        Self {
            id,
            name,
            status,
            difficulty,
            host: false,
            joined: now,
            active: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn status(&self) -> SeatStatus {
        self.status
    }
    pub fn is_host(&self) -> bool {
        self.host
    }
    pub fn is_robot(&self) -> bool {
        self.difficulty.is_some()
    }
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }
    /// Time since this seat was taken.
    pub fn seated(&self) -> Duration {
        self.joined.elapsed()
    }
    /// Time since this seat last showed signs of life.
    pub fn idle(&self) -> Duration {
        self.active.elapsed()
    }

    pub fn touch(&mut self) {
        self.active = Instant::now();
    }
    pub(crate) fn crown(&mut self) {
        self.host = true;
    }
    pub(crate) fn play(&mut self) {
        self.status = SeatStatus::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humans_join_and_robots_ready() {
        assert_eq!(Seat::human("u1", "Alice").status(), SeatStatus::Joined);
        assert_eq!(Seat::robot("ai_1", "ChipBot", Difficulty::Easy).status(), SeatStatus::Ready);
        assert!(!Seat::human("u1", "Alice").is_host());
    }

    #[tokio::test(start_paused = true)]
    async fn touch_resets_idle_time() {
        let mut seat = Seat::human("u1", "Alice");
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(seat.idle(), Duration::from_secs(30));
        seat.touch();
        assert_eq!(seat.idle(), Duration::ZERO);
        assert_eq!(seat.seated(), Duration::from_secs(30));
    }
}
