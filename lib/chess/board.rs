use crate::chess::{Color, Move, MoveKind, ParseFenError, Perspective, Piece, Role, Square};
use crate::util::Integer;
use derive_more::{Debug, Display};
use std::fmt::{self, Write};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// The placement of pieces on the chess board.
///
/// Squares are stored in grid order, row 0 being the eighth rank.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug("Board(\n{self})")]
pub struct Board([[Option<Piece>; 8]; 8]);

impl Default for Board {
    /// The initial placement.
    fn default() -> Self {
        use Role::*;
        const BACK: [Role; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Board::empty();
        for (col, role) in BACK.into_iter().enumerate() {
            board.0[0][col] = Some(Piece::new(role, Color::Black));
            board.0[1][col] = Some(Piece::new(Pawn, Color::Black));
            board.0[6][col] = Some(Piece::new(Pawn, Color::White));
            board.0[7][col] = Some(Piece::new(role, Color::White));
        }

        board
    }
}

impl Board {
    /// A board with no pieces.
    #[inline(always)]
    pub fn empty() -> Self {
        Board([[None; 8]; 8])
    }

    /// [`Square`] occupied by the king of a [`Color`].
    ///
    /// If there happen to be several, the first one in grid order.
    #[inline(always)]
    pub fn king(&self, side: Color) -> Option<Square> {
        let king = Piece::new(Role::King, side);
        self.iter().find_map(|(p, sq)| (p == king).then_some(sq))
    }

    /// An iterator over all pieces on the board, in grid order.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::iter()
            .map(|sq| sq.flip())
            .filter_map(|sq| Some((self[sq]?, sq)))
    }

    /// Relocates pieces according to a [`Move`], without checking whether it's legal.
    ///
    /// Does nothing if the source square is empty.
    pub fn play(&mut self, m: Move) {
        let Some(piece) = self[m.whence()] else {
            return;
        };

        let side = piece.color();

        match m.kind() {
            MoveKind::EnPassant => {
                self[Square::new(m.whither().file(), m.whence().rank())] = None;
            }

            MoveKind::Castle(cs) => {
                let rook = self[cs.rook_whence(side)].take();
                self[cs.rook_whither(side)] = rook;
            }

            _ => {}
        }

        self[m.whence()] = None;
        self[m.whither()] = Some(piece);

        if m.is_promotion() {
            self[m.whither()] = Some(Piece::new(Role::Queen, side));
        }
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.0[sq.row()][sq.col()]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, sq: Square) -> &mut Self::Output {
        &mut self.0[sq.row()][sq.col()]
    }
}

/// Draws the board as a grid, white pieces in upper case and empty squares as `.`.
impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for (col, sq) in row.iter().enumerate() {
                match sq {
                    Some(p) => Display::fmt(p, f)?,
                    None => f.write_char('.')?,
                }

                f.write_char(if col < 7 { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

/// Parses the piece placement field of a FEN record.
impl FromStr for Board {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<_> = s.split('/').collect();
        let rows @ [_, _, _, _, _, _, _, _] = &rows[..] else {
            return Err(ParseFenError::InvalidPlacement);
        };

        let mut board = Board::empty();
        for (row, segment) in rows.iter().enumerate() {
            let mut col = 0;
            for c in segment.chars() {
                let mut buffer = [0; 4];

                if let Some(skip @ 1..=8) = c.to_digit(10) {
                    col += skip as usize;
                } else if c.is_ascii_digit() {
                    return Err(ParseFenError::InvalidPlacement);
                } else if col >= 8 {
                    return Err(ParseFenError::InvalidPlacement);
                } else {
                    let p = Piece::from_str(c.encode_utf8(&mut buffer))
                        .map_err(|_| ParseFenError::InvalidPiece(c))?;

                    board.0[row][col] = Some(p);
                    col += 1;
                }

                if col > 8 {
                    return Err(ParseFenError::InvalidPlacement);
                }
            }

            if col != 8 {
                return Err(ParseFenError::InvalidPlacement);
            }
        }

        Ok(board)
    }
}
