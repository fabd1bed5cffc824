use crate::chess::{is_attacked, Bitboard, Board, Castles, CastlingSide, Color, Move, MoveKind};
use crate::chess::{Perspective, Piece, Rank, Role, Square};
use crate::chess::{BISHOP_DIRECTIONS, KING_STEPS, KNIGHT_STEPS, ROOK_DIRECTIONS};
use arrayvec::ArrayVec;
use derive_more::{Display, Error};
use std::str::FromStr;
use tracing::instrument;

#[cfg(test)]
use proptest::{prelude::*, sample::{Selector, SelectorStrategy}, strategy::Map};

#[cfg(test)]
use std::ops::Range;

/// The moves available to a single piece.
pub type Moves = ArrayVec<Move, 32>;

/// The state besides the placement of pieces needed to tell legal moves apart.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Auxiliary {
    pub castles: Castles,
    pub en_passant: Option<Square>,
}

impl Default for Auxiliary {
    #[inline(always)]
    fn default() -> Self {
        Auxiliary {
            castles: Castles::all(),
            en_passant: None,
        }
    }
}

/// The current position on the chess board.
///
/// Positions are values, [`Position::play`] returns the next one and leaves this one untouched.
#[derive(Debug, Default, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[display("{board}{turn} to move")]
pub struct Position {
    board: Board,
    turn: Color,
    auxiliary: Auxiliary,
}

#[cfg(test)]
impl Arbitrary for Position {
    type Parameters = ();
    type Strategy = Map<(Range<usize>, SelectorStrategy), fn((usize, Selector)) -> Position>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..128, any::<Selector>()).prop_map(|(moves, selector)| {
            let mut pos = Position::default();

            for _ in 0..moves {
                match selector.try_select(pos.moves()) {
                    None => break,
                    Some(m) => pos = pos.play(m),
                }
            }

            pos
        })
    }
}

impl Position {
    /// Constructs a [`Position`] from its parts.
    #[inline(always)]
    pub fn new(board: Board, turn: Color, auxiliary: Auxiliary) -> Self {
        Position {
            board,
            turn,
            auxiliary,
        }
    }

    /// The placement of pieces.
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The castling rights and en passant square.
    #[inline(always)]
    pub fn auxiliary(&self) -> &Auxiliary {
        &self.auxiliary
    }

    /// The castling rights.
    #[inline(always)]
    pub fn castles(&self) -> Castles {
        self.auxiliary.castles
    }

    /// The [en passant] square.
    ///
    /// [en passant]: https://www.chessprogramming.org/En_passant
    #[inline(always)]
    pub fn en_passant(&self) -> Option<Square> {
        self.auxiliary.en_passant
    }

    /// Whether the king of the side to move is attacked.
    ///
    /// A side without a king is always considered in check.
    pub fn is_check(&self) -> bool {
        self.board
            .king(self.turn)
            .map_or(true, |k| is_attacked(&self.board, k, !self.turn))
    }

    /// The moves the piece on `whence` could make, ignoring whether they expose its own king.
    ///
    /// Empty if there's no piece on `whence`.
    pub fn pseudo_legal_moves(&self, whence: Square) -> Moves {
        let mut moves = Moves::new();

        let Some(piece) = self.board[whence] else {
            return moves;
        };

        let side = piece.color();

        match piece.role() {
            Role::Pawn => self.pawn_moves(whence, side, &mut moves),
            Role::Knight => self.step_moves(whence, side, &KNIGHT_STEPS, &mut moves),
            Role::Bishop => self.slide_moves(whence, side, &BISHOP_DIRECTIONS, &mut moves),
            Role::Rook => self.slide_moves(whence, side, &ROOK_DIRECTIONS, &mut moves),
            Role::Queen => {
                self.slide_moves(whence, side, &BISHOP_DIRECTIONS, &mut moves);
                self.slide_moves(whence, side, &ROOK_DIRECTIONS, &mut moves);
            }

            Role::King => {
                self.step_moves(whence, side, &KING_STEPS, &mut moves);
                self.castling_moves(whence, side, &mut moves);
            }
        }

        moves
    }

    /// How moving onto `whither` would affect the piece standing there, if it's allowed at all.
    #[inline(always)]
    fn target(&self, whither: Square, side: Color) -> Option<MoveKind> {
        match self.board[whither] {
            None => Some(MoveKind::Quiet),
            Some(p) if p.color() != side => Some(MoveKind::Capture(p.role())),
            Some(_) => None,
        }
    }

    fn step_moves(&self, whence: Square, side: Color, steps: &[(i8, i8)], moves: &mut Moves) {
        for &(df, dr) in steps {
            if let Some(whither) = whence.step(df, dr) {
                if let Some(kind) = self.target(whither, side) {
                    moves.push(Move::new(whence, whither, kind));
                }
            }
        }
    }

    fn slide_moves(&self, whence: Square, side: Color, dirs: &[(i8, i8)], moves: &mut Moves) {
        for &d in dirs {
            for whither in whence.ray(d) {
                match self.target(whither, side) {
                    Some(MoveKind::Quiet) => moves.push(Move::new(whence, whither, MoveKind::Quiet)),
                    Some(kind) => {
                        moves.push(Move::new(whence, whither, kind));
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    fn pawn_moves(&self, whence: Square, side: Color, moves: &mut Moves) {
        let forward = side.forward();
        let last = Rank::Eighth.perspective(side);

        if let Some(one) = whence.step(0, forward) {
            if self.board[one].is_none() {
                if one.rank() == last {
                    moves.push(Move::new(whence, one, MoveKind::Promotion(None)));
                } else {
                    moves.push(Move::new(whence, one, MoveKind::Quiet));
                }

                if whence.rank() == Rank::Second.perspective(side) {
                    if let Some(two) = one.step(0, forward) {
                        if self.board[two].is_none() {
                            moves.push(Move::new(whence, two, MoveKind::DoublePush));
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(whither) = whence.step(df, forward) else {
                continue;
            };

            match self.board[whither] {
                Some(p) if p.color() != side => {
                    if whither.rank() == last {
                        moves.push(Move::new(whence, whither, MoveKind::Promotion(Some(p.role()))));
                    } else {
                        moves.push(Move::new(whence, whither, MoveKind::Capture(p.role())));
                    }
                }

                None if self.en_passant() == Some(whither) => {
                    let passed = Square::new(whither.file(), whence.rank());
                    if self.board[passed] == Some(Piece::new(Role::Pawn, !side)) {
                        moves.push(Move::new(whence, whither, MoveKind::EnPassant));
                    }
                }

                _ => {}
            }
        }
    }

    fn castling_moves(&self, whence: Square, side: Color, moves: &mut Moves) {
        if whence != Square::E1.perspective(side) {
            return;
        }

        for cs in CastlingSide::ALL {
            let rook = Piece::new(Role::Rook, side);
            if self.castles().has(side, cs)
                && self.board[cs.rook_whence(side)] == Some(rook)
                && cs.path(side).iter().all(|sq| self.board[sq].is_none())
            {
                moves.push(Move::new(whence, cs.king_whither(side), MoveKind::Castle(cs)));
            }
        }
    }

    /// Whether playing `m` keeps the mover's king safe.
    fn is_legal(&self, m: Move) -> bool {
        let Some(piece) = self.board[m.whence()] else {
            return false;
        };

        let side = piece.color();

        if let MoveKind::Castle(cs) = m.kind() {
            if is_attacked(&self.board, m.whence(), !side)
                || is_attacked(&self.board, cs.rook_whither(side), !side)
            {
                return false;
            }
        }

        let mut board = self.board;
        board.play(m);

        match board.king(side) {
            None => false,
            Some(k) => !is_attacked(&board, k, !side),
        }
    }

    /// The legal moves of the piece on `whence`.
    pub fn legal_moves(&self, whence: Square) -> Moves {
        let mut moves = self.pseudo_legal_moves(whence);
        moves.retain(|m| self.is_legal(*m));
        moves
    }

    /// The squares the piece on `whence` may move to.
    ///
    /// Empty unless it belongs to the side to move.
    pub fn destinations(&self, whence: Square) -> Bitboard {
        match self.board[whence] {
            Some(p) if p.color() == self.turn => {
                self.legal_moves(whence).iter().map(|m| m.whither()).collect()
            }

            _ => Bitboard::empty(),
        }
    }

    /// An iterator over the legal moves of the side to move.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.board
            .iter()
            .filter(|(p, _)| p.color() == self.turn)
            .flat_map(|(_, sq)| self.legal_moves(sq))
    }

    /// The legal move from `whence` to `whither`, if any.
    pub fn find(&self, whence: Square, whither: Square) -> Option<Move> {
        match self.board[whence] {
            Some(p) if p.color() == self.turn => self
                .legal_moves(whence)
                .into_iter()
                .find(|m| m.whither() == whither),

            _ => None,
        }
    }

    /// Plays a [`Move`] without checking whether it's legal.
    pub fn play(&self, m: Move) -> Position {
        let moving = self.board[m.whence()];
        let side = moving.map_or(self.turn, |p| p.color());

        let mut board = self.board;
        board.play(m);

        let mut castles = self.castles();
        match moving.map(|p| p.role()) {
            Some(Role::King) => castles -= Castles::of(side),
            Some(Role::Rook) => castles -= Castles::from(m.whence()),
            _ => {}
        }

        castles -= Castles::from(m.whither());

        let en_passant = match m.kind() {
            MoveKind::DoublePush => m.whence().step(0, side.forward()),
            _ => None,
        };

        Position {
            board,
            turn: !self.turn,
            auxiliary: Auxiliary {
                castles,
                en_passant,
            },
        }
    }
}

/// The reason why parsing the FEN string failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseFenError {
    #[display("expected 4 or 6 space separated fields")]
    InvalidSyntax,
    #[display("failed to parse piece placement")]
    InvalidPlacement,
    #[display("unknown piece `{_0}`")]
    InvalidPiece(#[error(not(source))] char),
    #[display("failed to parse side to move")]
    InvalidSideToMove,
    #[display("failed to parse castling rights")]
    InvalidCastlingRights,
    #[display("failed to parse en passant square")]
    InvalidEnPassantSquare,
    #[display("failed to parse halfmove clock")]
    InvalidHalfmoveClock,
    #[display("failed to parse fullmove number")]
    InvalidFullmoveNumber,
}

/// Parses a position in [FEN] notation.
///
/// The halfmove clock and fullmove number may be omitted, they are validated but otherwise ignored.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl FromStr for Position {
    type Err = ParseFenError;

    #[instrument(level = "trace", err)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split_whitespace().collect();
        let (board, turn, castles, en_passant) = match &fields[..] {
            [board, turn, castles, en_passant] => (board, turn, castles, en_passant),
            [board, turn, castles, en_passant, halfmoves, fullmoves] => {
                let Ok(_) = halfmoves.parse::<u32>() else {
                    return Err(ParseFenError::InvalidHalfmoveClock);
                };

                let Ok(_) = fullmoves.parse::<u32>() else {
                    return Err(ParseFenError::InvalidFullmoveNumber);
                };

                (board, turn, castles, en_passant)
            }

            _ => return Err(ParseFenError::InvalidSyntax),
        };

        let board: Board = board.parse()?;

        let Ok(turn) = turn.parse() else {
            return Err(ParseFenError::InvalidSideToMove);
        };

        let Ok(castles) = castles.parse() else {
            return Err(ParseFenError::InvalidCastlingRights);
        };

        let en_passant = match *en_passant {
            "-" => None,
            ep => match ep.parse() {
                Err(_) => return Err(ParseFenError::InvalidEnPassantSquare),
                Ok(sq) => Some(sq),
            },
        };

        Ok(Position::new(
            board,
            turn,
            Auxiliary {
                castles,
                en_passant,
            },
        ))
    }
}
