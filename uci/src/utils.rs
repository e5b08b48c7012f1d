//! UCI move notation helpers.
//!
//! cozy-chess uses "king captures rook" notation for castling internally (e.g., e1h1),
//! but UCI expects standard notation (e.g., e1g1). These helpers handle the conversion.

use cozy_chess::{
    util::{display_uci_move, parse_uci_move},
    Board, Move,
};

/// Convert a single move to UCI notation, handling castling correctly.
#[inline]
pub fn move_to_uci(board: &Board, mv: Move) -> String {
    display_uci_move(board, mv).to_string()
}

/// Convert a list of moves from the same position to UCI notation.
pub fn moves_to_uci(board: &Board, moves: &[Move]) -> Vec<String> {
    moves.iter().map(|&mv| move_to_uci(board, mv)).collect()
}

/// Parse UCI move strings against `board`, skipping any that do not parse.
/// Legality is left to the caller.
pub fn parse_moves(board: &Board, moves: &[String]) -> Vec<Move> {
    moves
        .iter()
        .filter_map(|mv| parse_uci_move(board, mv).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castling_round_trip() {
        let board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let parsed = parse_moves(&board, &["e1g1".to_string()]);
        assert_eq!(parsed.len(), 1);
        assert_eq!(move_to_uci(&board, parsed[0]), "e1g1");
    }

    #[test]
    fn test_parse_skips_garbage() {
        let board = Board::default();
        let parsed = parse_moves(&board, &["e2e4".to_string(), "zz99".to_string()]);
        assert_eq!(moves_to_uci(&board, &parsed), vec!["e2e4"]);
    }
}
