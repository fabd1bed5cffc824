use crate::chess::{Board, Color, Piece, Role, Square};

/// The (file, rank) offsets of a knight's jumps.
pub const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// The (file, rank) offsets of a king's steps.
pub const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// The diagonal directions a bishop slides in.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// The orthogonal directions a rook slides in.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// The first piece met sliding from `target` in a direction, if any.
#[inline(always)]
fn slide(board: &Board, target: Square, direction: (i8, i8)) -> Option<Piece> {
    target.ray(direction).find_map(|sq| board[sq])
}

/// Whether any piece of color `by` attacks the `target` square.
///
/// Probes outwards from `target`, so pieces that merely defend their own
/// color's squares count too, and the piece standing on `target` is ignored.
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    let is = |sq: Option<Square>, r: Role| sq.is_some_and(|sq| board[sq] == Some(Piece::new(r, by)));

    let behind = -by.forward();
    if [(-1, behind), (1, behind)].into_iter().any(|(df, dr)| is(target.step(df, dr), Role::Pawn)) {
        return true;
    }

    if KNIGHT_STEPS.iter().any(|&(df, dr)| is(target.step(df, dr), Role::Knight)) {
        return true;
    }

    if KING_STEPS.iter().any(|&(df, dr)| is(target.step(df, dr), Role::King)) {
        return true;
    }

    let bishop = Piece::new(Role::Bishop, by);
    let rook = Piece::new(Role::Rook, by);
    let queen = Piece::new(Role::Queen, by);

    BISHOP_DIRECTIONS.iter().any(|&d| matches!(slide(board, target, d), Some(p) if p == bishop || p == queen))
        || ROOK_DIRECTIONS.iter().any(|&d| matches!(slide(board, target, d), Some(p) if p == rook || p == queen))
}
