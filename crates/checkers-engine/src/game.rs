//! Game state: board, players, piece registry, and the move engine.
//!
//! [`Game`] owns the [`Board`] and the per-player piece registry, and is the
//! only place where both are mutated. It provides:
//! - simple-step and jump-chain generation per piece
//! - per-player aggregation under the mandatory-capture rule
//! - move application with capture removal and promotion

use std::collections::BTreeMap;
use std::iter;

use checkers_core::{GamePiece, Move, Offset, PieceId, Player, PlayerId, Position};
use thiserror::Error;
use tracing::{debug, trace};

use crate::board::{Board, BoardError};

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The requested board or player setup cannot be built.
    #[error("invalid setup: {0}")]
    InvalidSetup(String),

    /// No player with this id takes part in the game.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    /// The move is malformed or not among the legal moves.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A board primitive rejected the operation.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A checkers game: one board, two players, and their live pieces.
///
/// Invariant: a piece is on `board` at `(r, c)` exactly when its stored
/// position is `(r, c)` and the registry maps its id to `(r, c)` under its
/// owner.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: Vec<Player>,
    /// Live pieces per player, id -> current cell.
    pieces: BTreeMap<PlayerId, BTreeMap<PieceId, Position>>,
    next_piece_id: u32,
}

impl Game {
    /// Creates a `width × width` game with `number_populated_rows` rows of
    /// men in front of each player's home edge.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidSetup`] unless there are exactly two players
    /// advancing in opposite directions and both armies fit on the board
    /// without overlapping.
    pub fn new(
        players: Vec<Player>,
        number_populated_rows: usize,
        width: usize,
    ) -> Result<Self, GameError> {
        if number_populated_rows == 0 || 2 * number_populated_rows > width {
            return Err(GameError::InvalidSetup(format!(
                "{} populated rows per player do not fit on a {}x{} board",
                number_populated_rows, width, width
            )));
        }

        let mut game = Self::empty(players, width, width)?;
        game.populate(number_populated_rows)?;
        debug!(
            "new {}x{} game, {} pieces per player",
            width,
            width,
            game.piece_count(PlayerId(0))
        );
        Ok(game)
    }

    /// Creates a game with an empty `rows × cols` board.
    pub fn empty(players: Vec<Player>, rows: usize, cols: usize) -> Result<Self, GameError> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSetup(format!(
                "board dimensions must be positive, got {}x{}",
                rows, cols
            )));
        }
        if players.len() != 2 {
            return Err(GameError::InvalidSetup(format!(
                "expected 2 players, got {}",
                players.len()
            )));
        }
        if players[0].direction == players[1].direction {
            return Err(GameError::InvalidSetup(format!(
                "both players advance {}",
                players[0].direction
            )));
        }

        let pieces = (0..players.len())
            .map(|i| (PlayerId(i as u8), BTreeMap::new()))
            .collect();
        Ok(Game {
            board: Board::new(rows, cols),
            players,
            pieces,
            next_piece_id: 0,
        })
    }

    fn populate(&mut self, number_populated_rows: usize) -> Result<(), GameError> {
        let rows = self.board.rows();
        for id in self.player_ids().collect::<Vec<_>>() {
            let direction = self.players[id.index()].direction;
            let home = direction.home_row(rows);
            for k in 0..number_populated_rows as i32 {
                let row = home + direction.row_step() * k;
                for col in 0..self.board.cols() {
                    let pos = Position::new(row, col);
                    if pos.is_playable() {
                        self.place_piece(id, pos)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the players in id order.
    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the player with the given id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Iterates over all player ids.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.players.len()).map(|i| PlayerId(i as u8))
    }

    /// Returns the other player.
    pub fn opponent(&self, id: PlayerId) -> Option<PlayerId> {
        self.player_ids().find(|&other| other != id)
    }

    /// Iterates over the live pieces of `player` in placement order.
    pub fn pieces(&self, player: PlayerId) -> impl Iterator<Item = &GamePiece> + '_ {
        self.pieces
            .get(&player)
            .into_iter()
            .flat_map(|registry| registry.values())
            .filter_map(|pos| self.board.piece_at(*pos))
    }

    /// Returns how many pieces `player` has left.
    pub fn piece_count(&self, player: PlayerId) -> usize {
        self.pieces.get(&player).map_or(0, BTreeMap::len)
    }

    /// Looks up a live piece by id.
    pub fn piece(&self, id: PieceId) -> Option<&GamePiece> {
        self.pieces
            .values()
            .find_map(|registry| registry.get(&id))
            .and_then(|pos| self.board.piece_at(*pos))
    }

    /// Creates a man for `owner` on `pos`, registering and placing it.
    pub fn place_piece(&mut self, owner: PlayerId, pos: Position) -> Result<PieceId, GameError> {
        self.insert_piece(owner, pos, false)
    }

    /// Creates a king for `owner` on `pos`.
    pub fn place_king(&mut self, owner: PlayerId, pos: Position) -> Result<PieceId, GameError> {
        self.insert_piece(owner, pos, true)
    }

    fn insert_piece(
        &mut self,
        owner: PlayerId,
        pos: Position,
        king: bool,
    ) -> Result<PieceId, GameError> {
        let registry = self
            .pieces
            .get_mut(&owner)
            .ok_or(GameError::UnknownPlayer(owner))?;
        let id = PieceId(self.next_piece_id);
        let mut piece = GamePiece::new(id, owner, pos);
        if king {
            piece.transform();
        }
        self.board.place_piece(piece)?;
        registry.insert(id, pos);
        self.next_piece_id += 1;
        Ok(id)
    }

    /// Diagonal directions `piece` may move or capture in.
    fn directions(&self, piece: &GamePiece) -> impl Iterator<Item = Offset> {
        let forward = self
            .player(piece.owner)
            .map(|p| p.direction.row_step())
            .unwrap_or_default();
        let king = piece.is_king();
        Offset::DIAGONALS
            .into_iter()
            .filter(move |d| king || d.rows == forward)
    }

    fn promotion_row(&self, piece: &GamePiece) -> Option<i32> {
        self.player(piece.owner)
            .map(|p| p.direction.promotion_row(self.board.rows()))
    }

    /// Returns the empty cells `piece` can step to without capturing.
    ///
    /// Men step one cell diagonally forward; kings step one cell in any
    /// diagonal direction.
    pub fn get_possible_moves_for_piece(&self, piece: &GamePiece) -> Vec<Position> {
        self.directions(piece)
            .map(|d| piece.position + d)
            .filter(|&to| self.board.is_empty_cell(to))
            .collect()
    }

    /// Returns every maximal capture chain `piece` can play from its cell.
    pub fn get_possible_jumps_for_piece(&self, piece: &GamePiece) -> Vec<Move> {
        self.get_all_jumps_moves(piece.position, piece, &[])
            .into_iter()
            .map(|path| Move::new(*piece, path))
            .collect()
    }

    /// Enumerates the maximal capture chains of `piece` starting at
    /// `start_pos`, never jumping a cell listed in `blocked_pos`.
    ///
    /// Each chain is the ordered list of landing cells. Chains may revisit
    /// empty cells but never capture the same piece twice. A man that lands
    /// on its promotion row is crowned and its chain ends there.
    pub fn get_all_jumps_moves(
        &self,
        start_pos: Position,
        piece: &GamePiece,
        blocked_pos: &[Position],
    ) -> Vec<Vec<Position>> {
        self.chains_from(piece, start_pos, blocked_pos)
    }

    fn chains_from(
        &self,
        piece: &GamePiece,
        at: Position,
        captured: &[Position],
    ) -> Vec<Vec<Position>> {
        let promotion_row = self.promotion_row(piece);
        let mut chains = Vec::new();

        for d in self.directions(piece) {
            let over = at + d;
            let landing = at + d.scaled(2);
            if !self.can_jump(piece, over, landing, captured) {
                continue;
            }

            let crowned = !piece.is_king() && Some(landing.row) == promotion_row;
            let tails = if crowned {
                Vec::new()
            } else {
                let captured: Vec<Position> =
                    captured.iter().copied().chain(iter::once(over)).collect();
                self.chains_from(piece, landing, &captured)
            };

            if tails.is_empty() {
                chains.push(vec![landing]);
            } else {
                chains.extend(
                    tails
                        .into_iter()
                        .map(|tail| iter::once(landing).chain(tail).collect()),
                );
            }
        }

        chains
    }

    fn can_jump(
        &self,
        piece: &GamePiece,
        over: Position,
        landing: Position,
        captured: &[Position],
    ) -> bool {
        let enemy = self
            .board
            .piece_at(over)
            .is_some_and(|victim| victim.owner != piece.owner);
        // The mover's own starting cell is vacant while the chain runs.
        let free = self.board.is_empty_cell(landing) || landing == piece.position;
        enemy && free && !captured.contains(&over)
    }

    /// Returns every capture chain available to `player`.
    pub fn get_all_jumps(&self, player: PlayerId) -> Vec<Move> {
        self.pieces(player)
            .flat_map(|piece| self.get_possible_jumps_for_piece(piece))
            .collect()
    }

    /// Returns the legal moves of `player`.
    ///
    /// Captures are mandatory: when any capture chain exists, only capture
    /// chains are returned.
    pub fn get_possible_moves(&self, player: PlayerId) -> Vec<Move> {
        let jumps = self.get_all_jumps(player);
        if !jumps.is_empty() {
            trace!("{} must capture, {} chains", player, jumps.len());
            return jumps;
        }

        self.pieces(player)
            .flat_map(|piece| {
                self.get_possible_moves_for_piece(piece)
                    .into_iter()
                    .map(move |to| Move::step(*piece, to))
            })
            .collect()
    }

    /// Returns true if `mv` is among the legal moves of its owner.
    pub fn is_legal(&self, mv: &Move) -> bool {
        self.get_possible_moves(mv.piece.owner).contains(mv)
    }

    /// Returns true if `player` has no legal move left.
    pub fn has_lost(&self, player: PlayerId) -> bool {
        self.get_possible_moves(player).is_empty()
    }

    /// Applies one step from `from` to `to`.
    ///
    /// A two-row step removes the jumped piece from the board and from its
    /// owner's registry. Landing on an extreme row crowns the mover. Returns
    /// the captured piece, if any.
    pub fn move_piece(
        &mut self,
        from: Position,
        to: Position,
    ) -> Result<Option<GamePiece>, GameError> {
        let victim = if from.is_diagonal_step(to, 2) {
            let mid = from.midpoint(to);
            let victim = *self.board.piece_at(mid).ok_or(BoardError::IllegalMove {
                from,
                to,
                reason: "no piece to capture",
            })?;
            let mover = self.board.piece_at(from).map(|p| p.owner);
            if mover == Some(victim.owner) {
                return Err(BoardError::IllegalMove {
                    from,
                    to,
                    reason: "cannot capture own piece",
                }
                .into());
            }
            Some(victim)
        } else {
            None
        };

        let was_king = self.board.piece_at(from).is_some_and(GamePiece::is_king);
        let moved = self.board.move_piece(from, to)?;
        if let Some(registry) = self.pieces.get_mut(&moved.owner) {
            registry.insert(moved.id, to);
        }
        if moved.is_king() && !was_king {
            debug!("{} crowned at {}", moved.id, to);
        }

        if let Some(victim) = victim {
            self.remove_piece(&victim)?;
            debug!("{} captured {} at {}", moved.id, victim.id, victim.position);
        }
        Ok(victim)
    }

    /// Removes `piece` from the board and its owner's registry together.
    pub fn remove_piece(&mut self, piece: &GamePiece) -> Result<(), GameError> {
        let registered = self
            .pieces
            .get(&piece.owner)
            .and_then(|registry| registry.get(&piece.id));
        if registered != Some(&piece.position) {
            return Err(BoardError::IllegalState(*piece).into());
        }

        self.board.remove_piece(piece)?;
        if let Some(registry) = self.pieces.get_mut(&piece.owner) {
            registry.remove(&piece.id);
        }
        Ok(())
    }

    /// Applies `mv` step by step.
    ///
    /// The move is applied to a copy first, so a failing step leaves the game
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalMove`] for malformed paths and
    /// [`GameError::Board`] when the board rejects a step. Moves taken from
    /// [`get_possible_moves`](Self::get_possible_moves) never fail.
    pub fn make_move(&mut self, mv: &Move) -> Result<(), GameError> {
        Self::check_shape(mv)?;
        if self.piece(mv.piece.id).map(|p| p.position) != Some(mv.origin()) {
            return Err(BoardError::IllegalState(mv.piece).into());
        }

        debug!("{} plays {}", mv.piece.owner, mv);
        let mut next = self.clone();
        for (from, to) in mv.steps() {
            next.move_piece(from, to)?;
        }
        *self = next;
        Ok(())
    }

    /// Applies `mv` only if it is one of its owner's legal moves.
    ///
    /// This is the membership check callers use to reject a bad choice
    /// before it reaches the board.
    pub fn make_legal_move(&mut self, mv: &Move) -> Result<(), GameError> {
        if !self.is_legal(mv) {
            return Err(GameError::IllegalMove(mv.to_string()));
        }
        self.make_move(mv)
    }

    fn check_shape(mv: &Move) -> Result<(), GameError> {
        if mv.path.is_empty() {
            return Err(GameError::IllegalMove(format!(
                "{} has an empty path",
                mv.piece.id
            )));
        }
        let chain = mv.path.len() > 1;
        for (from, to) in mv.steps() {
            let step = from.is_diagonal_step(to, 1);
            let jump = from.is_diagonal_step(to, 2);
            if !(jump || (step && !chain)) {
                return Err(GameError::IllegalMove(format!(
                    "{} to {} is not a valid step of {}",
                    from, to, mv
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_core::Direction;

    const A: PlayerId = PlayerId(0);
    const B: PlayerId = PlayerId(1);

    fn players() -> Vec<Player> {
        vec![
            Player::new("Ann", "white", Direction::Up),
            Player::new("Bob", "black", Direction::Down),
        ]
    }

    fn empty_game() -> Game {
        Game::empty(players(), 8, 8).unwrap()
    }

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn piece(game: &Game, id: PieceId) -> GamePiece {
        *game.piece(id).unwrap()
    }

    fn paths(moves: &[Move]) -> Vec<Vec<Position>> {
        moves.iter().map(|m| m.path.clone()).collect()
    }

    #[test]
    fn new_game_populates_both_sides() {
        let game = Game::new(players(), 3, 8).unwrap();
        assert_eq!(game.piece_count(A), 12);
        assert_eq!(game.piece_count(B), 12);

        // Ann advances up, so she starts on the bottom rows.
        assert!(game.pieces(A).all(|p| p.position.row >= 5));
        assert!(game.pieces(B).all(|p| p.position.row <= 2));
        assert!(game
            .pieces(A)
            .chain(game.pieces(B))
            .all(|p| p.position.is_playable() && !p.is_king()));
        assert_eq!(game.board().pieces().count(), 24);
    }

    #[test]
    fn new_game_rejects_bad_setup() {
        assert!(matches!(
            Game::new(players(), 5, 8),
            Err(GameError::InvalidSetup(_))
        ));
        assert!(matches!(
            Game::new(players(), 0, 8),
            Err(GameError::InvalidSetup(_))
        ));
        let same_way = vec![
            Player::new("Ann", "white", Direction::Up),
            Player::new("Bob", "black", Direction::Up),
        ];
        assert!(matches!(
            Game::new(same_way, 3, 8),
            Err(GameError::InvalidSetup(_))
        ));
        assert!(matches!(
            Game::new(players()[..1].to_vec(), 3, 8),
            Err(GameError::InvalidSetup(_))
        ));
    }

    #[test]
    fn opening_moves() {
        let game = Game::new(players(), 3, 8).unwrap();
        // Only the front row can move: 4 men, 7 steps in total.
        assert_eq!(game.get_possible_moves(A).len(), 7);
        assert_eq!(game.get_possible_moves(B).len(), 7);
        assert!(game.get_all_jumps(A).is_empty());
    }

    #[test]
    fn simple_moves_for_lone_man() {
        let mut game = empty_game();
        let id = game.place_piece(A, pos(5, 2)).unwrap();
        let moves = game.get_possible_moves_for_piece(&piece(&game, id));
        assert_eq!(moves, vec![pos(4, 1), pos(4, 3)]);
    }

    #[test]
    fn simple_moves_respect_edges_and_blockers() {
        let mut game = empty_game();
        let edge = game.place_piece(A, pos(5, 0)).unwrap();
        game.place_piece(B, pos(4, 1)).unwrap();
        assert!(game
            .get_possible_moves_for_piece(&piece(&game, edge))
            .is_empty());

        let down = game.place_piece(B, pos(7, 6)).unwrap();
        assert!(game
            .get_possible_moves_for_piece(&piece(&game, down))
            .is_empty());
    }

    #[test]
    fn king_steps_in_all_directions() {
        let mut game = empty_game();
        let id = game.place_king(A, pos(3, 4)).unwrap();
        let moves = game.get_possible_moves_for_piece(&piece(&game, id));
        assert_eq!(moves, vec![pos(2, 3), pos(2, 5), pos(4, 3), pos(4, 5)]);
    }

    #[test]
    fn single_jump_scenario() {
        let mut game = empty_game();
        let id = game.place_piece(B, pos(2, 2)).unwrap();
        game.place_piece(A, pos(3, 3)).unwrap();

        let jumps = game.get_possible_jumps_for_piece(&piece(&game, id));
        assert_eq!(paths(&jumps), vec![vec![pos(4, 4)]]);

        game.make_move(&jumps[0]).unwrap();
        assert!(game.board().is_empty_cell(pos(2, 2)));
        assert!(game.board().is_empty_cell(pos(3, 3)));
        assert_eq!(game.board().piece_at(pos(4, 4)).map(|p| p.id), Some(id));
        assert_eq!(game.piece_count(A), 0);
    }

    #[test]
    fn men_do_not_capture_backwards() {
        let mut game = empty_game();
        let id = game.place_piece(A, pos(4, 4)).unwrap();
        game.place_piece(B, pos(5, 5)).unwrap();
        assert!(game
            .get_possible_jumps_for_piece(&piece(&game, id))
            .is_empty());
    }

    #[test]
    fn kings_capture_backwards() {
        let mut game = empty_game();
        let id = game.place_king(A, pos(4, 4)).unwrap();
        game.place_piece(B, pos(5, 5)).unwrap();
        let jumps = game.get_possible_jumps_for_piece(&piece(&game, id));
        assert_eq!(paths(&jumps), vec![vec![pos(6, 6)]]);
    }

    #[test]
    fn jump_needs_empty_on_grid_landing() {
        let mut game = empty_game();
        let id = game.place_piece(A, pos(2, 1)).unwrap();
        game.place_piece(B, pos(1, 0)).unwrap(); // landing off grid
        game.place_piece(B, pos(1, 2)).unwrap();
        game.place_piece(B, pos(0, 3)).unwrap(); // landing occupied
        assert!(game
            .get_possible_jumps_for_piece(&piece(&game, id))
            .is_empty());
    }

    #[test]
    fn double_jump_chain() {
        let mut game = empty_game();
        let id = game.place_piece(A, pos(6, 1)).unwrap();
        game.place_piece(B, pos(5, 2)).unwrap();
        game.place_piece(B, pos(3, 4)).unwrap();

        let jumps = game.get_possible_jumps_for_piece(&piece(&game, id));
        assert_eq!(paths(&jumps), vec![vec![pos(4, 3), pos(2, 5)]]);
        assert_eq!(jumps[0].capture_count(), 2);

        game.make_move(&jumps[0]).unwrap();
        assert_eq!(game.piece_count(B), 0);
        assert_eq!(game.piece(id).unwrap().position, pos(2, 5));
    }

    #[test]
    fn branching_chains_are_independent() {
        let mut game = empty_game();
        let id = game.place_piece(A, pos(6, 3)).unwrap();
        game.place_piece(B, pos(5, 2)).unwrap();
        game.place_piece(B, pos(5, 4)).unwrap();
        game.place_piece(B, pos(3, 4)).unwrap();

        let jumps = game.get_possible_jumps_for_piece(&piece(&game, id));
        assert_eq!(
            paths(&jumps),
            vec![vec![pos(4, 1)], vec![pos(4, 5), pos(2, 3)]]
        );

        game.place_piece(B, pos(3, 2)).unwrap();
        let jumps = game.get_possible_jumps_for_piece(&piece(&game, id));
        assert_eq!(
            paths(&jumps),
            vec![vec![pos(4, 1), pos(2, 3)], vec![pos(4, 5), pos(2, 3)]]
        );
    }

    #[test]
    fn king_never_captures_twice_but_may_revisit_squares() {
        // Four enemies around (3, 4): the king can loop back to its start.
        let mut game = empty_game();
        let id = game.place_king(A, pos(1, 4)).unwrap();
        game.place_piece(B, pos(2, 3)).unwrap();
        game.place_piece(B, pos(2, 5)).unwrap();
        game.place_piece(B, pos(4, 3)).unwrap();
        game.place_piece(B, pos(4, 5)).unwrap();

        let jumps = game.get_possible_jumps_for_piece(&piece(&game, id));
        assert!(!jumps.is_empty());
        for m in &jumps {
            let captured = m.captured_squares();
            let mut unique = captured.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(captured.len(), unique.len(), "double capture in {}", m);
        }
        let best = jumps.iter().map(Move::capture_count).max().unwrap();
        assert_eq!(best, 4);
        assert!(jumps
            .iter()
            .any(|m| m.destination() == pos(1, 4) && m.capture_count() == 4));

        let full = jumps
            .iter()
            .find(|m| m.capture_count() == 4)
            .unwrap()
            .clone();
        game.make_move(&full).unwrap();
        assert_eq!(game.piece_count(B), 0);
        assert_eq!(game.piece_count(A), 1);
    }

    #[test]
    fn blocked_positions_are_not_jumped() {
        let mut game = empty_game();
        let id = game.place_piece(A, pos(6, 1)).unwrap();
        game.place_piece(B, pos(5, 2)).unwrap();
        game.place_piece(B, pos(3, 4)).unwrap();
        let p = piece(&game, id);

        assert_eq!(
            game.get_all_jumps_moves(p.position, &p, &[pos(3, 4)]),
            vec![vec![pos(4, 3)]]
        );
        assert!(game
            .get_all_jumps_moves(p.position, &p, &[pos(5, 2)])
            .is_empty());
        // A fresh call sees no leftover blocks.
        assert_eq!(
            game.get_all_jumps_moves(p.position, &p, &[]),
            vec![vec![pos(4, 3), pos(2, 5)]]
        );
    }

    #[test]
    fn chain_stops_on_promotion() {
        let mut game = empty_game();
        let id = game.place_piece(A, pos(2, 1)).unwrap();
        game.place_piece(B, pos(1, 2)).unwrap();
        // A king could continue from (0, 3) over (1, 4), a new king may not.
        game.place_piece(B, pos(1, 4)).unwrap();

        let jumps = game.get_possible_jumps_for_piece(&piece(&game, id));
        assert_eq!(paths(&jumps), vec![vec![pos(0, 3)]]);

        game.make_move(&jumps[0]).unwrap();
        assert!(game.piece(id).unwrap().is_king());
        assert_eq!(game.piece_count(B), 1);
    }

    #[test]
    fn mandatory_capture_filters_steps() {
        let mut game = empty_game();
        game.place_piece(A, pos(5, 0)).unwrap();
        game.place_piece(A, pos(6, 5)).unwrap();
        game.place_piece(B, pos(5, 6)).unwrap();

        let moves = game.get_possible_moves(A);
        assert_eq!(moves.len(), 1);
        assert!(moves[0].is_jump());
        assert_eq!(moves[0].path, vec![pos(4, 7)]);
    }

    #[test]
    fn steps_when_no_capture() {
        let mut game = empty_game();
        game.place_piece(A, pos(5, 0)).unwrap();
        game.place_piece(B, pos(0, 7)).unwrap();
        let moves = game.get_possible_moves(A);
        assert_eq!(paths(&moves), vec![vec![pos(4, 1)]]);
        assert!(!moves[0].is_jump());
    }

    #[test]
    fn promotion_sticks() {
        let mut game = empty_game();
        let id = game.place_piece(A, pos(1, 2)).unwrap();
        let mv = Move::step(piece(&game, id), pos(0, 1));
        game.make_move(&mv).unwrap();
        assert!(game.piece(id).unwrap().is_king());

        let back = Move::step(piece(&game, id), pos(1, 2));
        game.make_move(&back).unwrap();
        assert!(game.piece(id).unwrap().is_king());
    }

    #[test]
    fn malformed_moves_are_rejected_without_side_effects() {
        let mut game = empty_game();
        let id = game.place_piece(A, pos(5, 2)).unwrap();
        let p = piece(&game, id);

        for path in [
            vec![],
            vec![pos(3, 2)],
            vec![pos(4, 1), pos(3, 0)],
            vec![pos(2, 5)],
        ] {
            let result = game.make_move(&Move::new(p, path));
            assert!(result.is_err());
        }
        // Jump over nothing
        assert!(matches!(
            game.make_move(&Move::new(p, vec![pos(3, 4)])),
            Err(GameError::Board(BoardError::IllegalMove { .. }))
        ));
        assert_eq!(game.piece(id).unwrap().position, pos(5, 2));
    }

    #[test]
    fn failing_chain_leaves_game_untouched() {
        let mut game = empty_game();
        let id = game.place_piece(A, pos(6, 1)).unwrap();
        game.place_piece(B, pos(5, 2)).unwrap();
        // Second capture over an empty cell must fail after the first succeeded.
        let mv = Move::new(piece(&game, id), vec![pos(4, 3), pos(2, 5)]);
        assert!(game.make_move(&mv).is_err());
        assert_eq!(game.piece(id).unwrap().position, pos(6, 1));
        assert_eq!(game.piece_count(B), 1);
    }

    #[test]
    fn stale_piece_is_illegal_state() {
        let mut game = empty_game();
        let id = game.place_piece(A, pos(5, 2)).unwrap();
        let stale = piece(&game, id);
        game.make_move(&Move::step(stale, pos(4, 1))).unwrap();
        assert_eq!(
            game.make_move(&Move::step(stale, pos(4, 3))),
            Err(GameError::Board(BoardError::IllegalState(stale)))
        );
    }

    #[test]
    fn make_legal_move_checks_membership() {
        let mut game = empty_game();
        let a = game.place_piece(A, pos(5, 2)).unwrap();
        game.place_piece(A, pos(6, 5)).unwrap();
        game.place_piece(B, pos(5, 6)).unwrap();

        // A plain step is illegal while a capture exists.
        let step = Move::step(piece(&game, a), pos(4, 1));
        assert!(!game.is_legal(&step));
        assert!(matches!(
            game.make_legal_move(&step),
            Err(GameError::IllegalMove(_))
        ));
        assert_eq!(game.piece(a).unwrap().position, pos(5, 2));

        let capture = game.get_possible_moves(A).remove(0);
        game.make_legal_move(&capture).unwrap();
        assert_eq!(game.piece_count(B), 0);
    }

    #[test]
    fn remove_piece_updates_both_structures() {
        let mut game = empty_game();
        let id = game.place_piece(B, pos(3, 3)).unwrap();
        let p = piece(&game, id);
        game.remove_piece(&p).unwrap();
        assert!(game.piece(id).is_none());
        assert!(game.board().is_empty_cell(pos(3, 3)));
        assert!(matches!(
            game.remove_piece(&p),
            Err(GameError::Board(BoardError::IllegalState(_)))
        ));
    }

    #[test]
    fn place_piece_rejects_occupied_and_unknown_owner() {
        let mut game = empty_game();
        game.place_piece(A, pos(3, 3)).unwrap();
        assert_eq!(
            game.place_piece(B, pos(3, 3)),
            Err(GameError::Board(BoardError::InvalidPlacement(pos(3, 3))))
        );
        assert_eq!(
            game.place_piece(PlayerId(7), pos(3, 5)),
            Err(GameError::UnknownPlayer(PlayerId(7)))
        );
        assert_eq!(game.piece_count(B), 0);
    }

    #[test]
    fn player_without_moves_has_lost() {
        let mut game = empty_game();
        game.place_piece(A, pos(5, 2)).unwrap();
        game.place_piece(B, pos(7, 0)).unwrap();
        assert!(game.has_lost(B), "a man on its last row cannot move");
        assert!(!game.has_lost(A));

        let wiped = empty_game();
        assert!(wiped.has_lost(A));
        assert_eq!(wiped.opponent(A), Some(B));
        assert_eq!(wiped.opponent(B), Some(A));
    }
}
