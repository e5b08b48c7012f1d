mod moves;

pub use moves::{
    collect_legal_moves, has_check, has_legal_moves, is_capture, make_move, only_move,
    restrict_moves,
};
