use cozy_chess::{Board, Move, Piece};

/// Check if a move removes an enemy piece.
/// Castling ("king captures rook" in cozy-chess) is never a capture, while
/// en passant is: a pawn changing file always takes something.
#[inline(always)]
pub fn is_capture(board: &Board, mv: Move) -> bool {
    if board.colors(!board.side_to_move()).has(mv.to) {
        return true;
    }

    board.piece_on(mv.from) == Some(Piece::Pawn) && mv.from.file() != mv.to.file()
}

/// Make a move and return a new board.
#[inline(always)]
pub fn make_move(board: &Board, mv: Move) -> Board {
    let mut new_board = board.clone();
    new_board.play_unchecked(mv);
    new_board
}

/// Check if there are any legal moves in the position.
#[inline(always)]
pub fn has_legal_moves(board: &Board) -> bool {
    board.generate_moves(|_| true)
}

/// Check if there is exactly one legal move in the position.
#[inline(always)]
pub fn only_move(board: &Board) -> bool {
    let mut count = 0;
    board.generate_moves(|moves| {
        count += moves.len();
        count > 1
    });
    count == 1
}

/// Collect all legal moves into a Vec, in generation order.
#[inline(always)]
pub fn collect_legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    board.generate_moves(|batch| {
        moves.extend(batch);
        false
    });
    moves
}

/// Legal moves narrowed to `allowed` when given. Generation order is kept,
/// and moves in `allowed` that are not legal are dropped.
pub fn restrict_moves(board: &Board, allowed: Option<&[Move]>) -> Vec<Move> {
    let legal = collect_legal_moves(board);

    match allowed {
        Some(allowed) => legal.into_iter().filter(|mv| allowed.contains(mv)).collect(),
        None => legal,
    }
}

/// Check if the side to move is in check.
#[inline(always)]
pub fn has_check(board: &Board) -> bool {
    !board.checkers().is_empty()
}
