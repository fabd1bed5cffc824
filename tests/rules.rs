use lib::chess::*;
use lib::util::Integer;
use test_strategy::proptest;

fn game(fen: &str) -> Game {
    fen.parse().unwrap()
}

#[test]
fn decoding_the_initial_position() {
    let g = game("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let board = g.position().board();

    assert_eq!(board.iter().filter(|(p, _)| p.color() == Color::White).count(), 16);
    assert_eq!(board.iter().filter(|(p, _)| p.color() == Color::Black).count(), 16);
    assert_eq!(board.king(Color::White), Some(Square::E1));
    assert_eq!(board.king(Color::Black), Some(Square::E8));
    assert_eq!(g.position().castles(), Castles::all());
    assert_eq!(g.position().en_passant(), None);
    assert_eq!(g.turn(), Color::White);
    assert_eq!(g, Game::reset());
}

#[test]
fn reset_twice_yields_identical_games() {
    assert_eq!(Game::reset(), Game::reset());
}

#[test]
fn reset_discards_the_game_in_progress() {
    let g = Game::reset().play(Square::E2, Square::E4).unwrap();
    assert_ne!(g, Game::reset());
    assert_eq!(Game::reset(), Game::default());
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let g = game("4k3/p7/8/1P6/8/8/8/4K3 b - - 0 1");
    let g = g.play(Square::A7, Square::A5).unwrap();
    assert_eq!(g.position().en_passant(), Some(Square::A6));

    let g = g.select(Square::B5);
    assert!(g.destinations().contains(Square::A6));

    let g = g.click(Square::A6);
    let board = g.position().board();
    assert_eq!(board[Square::A6], Some(Piece::new(Role::Pawn, Color::White)));
    assert_eq!(board[Square::A5], None);
    assert_eq!(board[Square::B5], None);
    assert_eq!(g.position().en_passant(), None);
}

#[test]
fn en_passant_expires_after_one_move() {
    let g = game("4k3/p7/8/1P6/8/8/8/4K3 b - - 0 1");
    let g = g.play(Square::A7, Square::A5).unwrap();
    let g = g.play(Square::E1, Square::E2).unwrap();
    let g = g.play(Square::E8, Square::E7).unwrap();
    assert_eq!(g.position().en_passant(), None);
    assert!(!g.select(Square::B5).destinations().contains(Square::A6));
}

#[test]
fn castling_kingside_moves_the_rook_and_clears_both_rights() {
    let g = game("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
    let g = g.play(Square::E1, Square::G1).unwrap();
    let board = g.position().board();

    assert_eq!(board[Square::G1], Some(Piece::new(Role::King, Color::White)));
    assert_eq!(board[Square::F1], Some(Piece::new(Role::Rook, Color::White)));
    assert_eq!(board[Square::H1], None);
    assert_eq!(board[Square::E1], None);
    assert_eq!(g.position().castles(), Castles::BLACK_SHORT | Castles::BLACK_LONG);
}

#[test]
fn castling_queenside_moves_the_rook_and_clears_both_rights() {
    let g = game("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1");
    let g = g.play(Square::E8, Square::C8).unwrap();
    let board = g.position().board();

    assert_eq!(board[Square::C8], Some(Piece::new(Role::King, Color::Black)));
    assert_eq!(board[Square::D8], Some(Piece::new(Role::Rook, Color::Black)));
    assert_eq!(board[Square::A8], None);
    assert_eq!(g.position().castles(), Castles::WHITE_SHORT | Castles::WHITE_LONG);
}

#[test]
fn pawn_promotes_to_queen_when_pushed() {
    let g = game("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let g = g.play(Square::A7, Square::A8).unwrap();
    assert_eq!(g.position().board()[Square::A8], Some(Piece::new(Role::Queen, Color::White)));
    assert_eq!(g.position().board()[Square::A7], None);
}

#[test]
fn pawn_promotes_to_queen_when_capturing() {
    let g = game("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let g = g.play(Square::A7, Square::B8).unwrap();
    assert_eq!(g.position().board()[Square::B8], Some(Piece::new(Role::Queen, Color::White)));
}

#[test]
fn black_pawn_promotes_on_the_first_rank() {
    let g = game("4k3/8/8/8/8/8/7p/K7 b - - 0 1");
    let g = g.play(Square::H2, Square::H1).unwrap();
    assert_eq!(g.position().board()[Square::H1], Some(Piece::new(Role::Queen, Color::Black)));
}

#[test]
fn moving_into_check_is_illegal() {
    let g = game("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1");
    assert!(!g.select(Square::E1).destinations().contains(Square::E2));
    assert_eq!(
        g.play(Square::E1, Square::E2),
        Err(IllegalMove {
            whence: Square::E1,
            whither: Square::E2
        })
    );
}

#[test]
fn check_must_be_answered() {
    let g = game("4k3/8/8/8/8/8/P7/4K2r w - - 0 1");
    assert!(g.position().is_check());
    assert!(g.select(Square::A2).destinations().is_empty());
    assert_eq!(
        g.select(Square::E1).destinations(),
        Bitboard::from_iter([Square::D2, Square::E2, Square::F2])
    );
}

#[test]
fn click_to_move_plays_a_game() {
    let g = Game::reset()
        .click(Square::E2)
        .click(Square::E4)
        .click(Square::E7)
        .click(Square::E5)
        .click(Square::G1)
        .click(Square::F3);

    assert_eq!(g.turn(), Color::Black);
    assert_eq!(g.position().board()[Square::F3], Some(Piece::new(Role::Knight, Color::White)));
    assert_eq!(g.position().board()[Square::E5], Some(Piece::new(Role::Pawn, Color::Black)));
}

#[proptest]
fn out_of_range_grid_coordinates_are_rejected(
    #[strategy(0usize..16)] row: usize,
    #[strategy(0usize..16)]
    #[filter(#row >= 8 || #col >= 8)]
    col: usize,
) {
    assert_eq!(Square::from_coords(row, col), Err(InvalidSquare { row, col }));
}

#[test]
fn grid_coordinates_address_the_same_square_as_chess_coordinates() {
    for sq in Square::iter() {
        assert_eq!(Square::from_coords(sq.row(), sq.col()), Ok(sq));
        assert_eq!(sq.row(), 7 - sq.rank().get() as usize);
        assert_eq!(sq.col(), sq.file().get() as usize);
    }
}
