use crate::min_max::Player;
use crate::ttt::{GameBoard, BOARD_CODES};

/// Exact minimax scores keyed by board and side to move.
///
/// Scores depend on which mark the searcher plays, so a cache must not be
/// shared between searchers with different marks.
pub trait Cache {
    fn cache(&mut self, state: &GameBoard, player: Player, score: i32);
    fn lookup(&mut self, state: &GameBoard, player: Player) -> Option<i32>;
}

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Default)]
pub struct NullCache;

impl Cache for NullCache {
    fn cache(&mut self, _state: &GameBoard, _player: Player, _score: i32) {}

    fn lookup(&mut self, _state: &GameBoard, _player: Player) -> Option<i32> {
        None
    }
}

/// Flat table indexed by the board code, one half per side to move.
#[derive(Debug, Clone)]
pub struct ArrayCache(Vec<Option<i8>>);

impl ArrayCache {
    pub fn new() -> Self {
        Self(vec![None; 2 * BOARD_CODES])
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(state: &GameBoard, player: Player) -> usize {
        match player {
            Player::Max => state.code(),
            Player::Min => BOARD_CODES + state.code(),
        }
    }
}

impl Default for ArrayCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache for ArrayCache {
    fn cache(&mut self, state: &GameBoard, player: Player, score: i32) {
        self.0[Self::slot(state, player)] = i8::try_from(score).ok();
    }

    fn lookup(&mut self, state: &GameBoard, player: Player) -> Option<i32> {
        self.0[Self::slot(state, player)].map(i32::from)
    }
}

#[cfg(test)]
mod test {
    use crate::min_max::cache::{ArrayCache, Cache, NullCache};
    use crate::min_max::Player;
    use crate::ttt::GameBoard;

    #[test]
    fn array_cache_separates_sides() {
        let board: GameBoard = "X...O....".parse().unwrap();
        let mut cache = ArrayCache::new();
        assert!(cache.is_empty());

        cache.cache(&board, Player::Max, 1);
        assert_eq!(cache.lookup(&board, Player::Max), Some(1));
        assert_eq!(cache.lookup(&board, Player::Min), None);

        cache.cache(&board, Player::Min, -1);
        assert_eq!(cache.lookup(&board, Player::Min), Some(-1));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn null_cache_forgets() {
        let board = GameBoard::empty();
        let mut cache = NullCache;
        cache.cache(&board, Player::Max, 0);
        assert_eq!(cache.lookup(&board, Player::Max), None);
    }
}
