//! Terminal view tests - rendered scenes inspected through the frame

use blockfall::core::{Board, Game, Piece};
use blockfall::term::{Frame, GameView, Viewport};
use blockfall::types::{PieceColor, ShapeKind, COLUMNS};

fn row_text(frame: &Frame, y: u16) -> String {
    (0..frame.width())
        .map(|x| frame.get(x, y).map(|g| g.ch).unwrap_or(' '))
        .collect()
}

fn render(game: &Game) -> Frame {
    let mut frame = Frame::new(80, 24);
    GameView::new().render(game, &mut frame);
    frame
}

fn game_over_game() -> Game {
    // Sit a piece on the floor with the spawn area walled off, then force
    // the blocked downward move that ends the game
    let mut board = Board::new();
    for x in 0..COLUMNS as i8 {
        board.set(x, 0, Some(PieceColor::Red));
        board.set(x, 1, Some(PieceColor::Red));
    }
    let mut piece = Piece::new(ShapeKind::O, PieceColor::Green);
    piece.x = 4;
    piece.y = 18;
    let mut game = Game::new(3).with_board(board).with_current(piece);
    game.start();
    game.move_piece(0, 1);
    assert!(game.game_over());
    game
}

#[test]
fn test_idle_scene_has_field_scores_and_buttons() {
    let game = Game::new(3);
    let frame = render(&game);

    // Field border spans rows 1 through 22
    assert!(row_text(&frame, 1).contains("┌──"));
    assert!(row_text(&frame, 22).contains("└──"));

    // Panel shows both score boxes and both buttons
    assert!(row_text(&frame, 9).contains("SCORE"));
    assert!(row_text(&frame, 10).contains('0'));
    assert!(row_text(&frame, 12).contains("HIGH SCORE"));
    assert!(row_text(&frame, 15).contains("[  START  ]"));
    assert!(row_text(&frame, 17).contains("[ RESTART ]"));
}

#[test]
fn test_idle_scene_hides_piece_and_preview() {
    let game = Game::new(3);
    let frame = render(&game);

    assert!(!row_text(&frame, 1).contains("NEXT"));
    for y in 2..22 {
        assert!(!row_text(&frame, y).contains('█'), "row {} has blocks", y);
    }
}

#[test]
fn test_running_scene_shows_piece_shadow_and_preview() {
    let mut game = Game::new(3);
    game.start();
    let frame = render(&game);

    assert!(row_text(&frame, 1).contains("NEXT"));
    // Active piece renders on the spawn row
    assert!(row_text(&frame, 2).contains('█'));
    // Shadow renders at the landing row in the quartered piece color
    let landing_row = 2 + (game.current().y + game.drop_distance()) as u16;
    assert!(row_text(&frame, landing_row).contains('█'));
}

#[test]
fn test_high_score_value_is_rendered() {
    let game = Game::new(3).with_high_score(1240);
    let frame = render(&game);
    assert!(row_text(&frame, 13).contains("1240"));
}

#[test]
fn test_game_over_scene_shows_overlay() {
    let game = game_over_game();
    let frame = render(&game);

    assert!(row_text(&frame, 11).contains("GAME OVER"));
    assert!(row_text(&frame, 12).contains("FINAL SCORE 0"));
    assert!(row_text(&frame, 13).contains("R TO RESTART"));
    // Dead games keep the buttons visible for the next round
    assert!(row_text(&frame, 15).contains("[  START  ]"));
    assert!(row_text(&frame, 17).contains("[ RESTART ]"));
}

#[test]
fn test_layout_rects_line_up_with_rendered_buttons() {
    let view = GameView::new();
    let layout = view.layout(Viewport {
        width: 80,
        height: 24,
    });
    let game = Game::new(3);
    let frame = render(&game);

    let row = row_text(&frame, layout.start_button.y);
    let x = layout.start_button.x as usize;
    let label: String = row.chars().skip(x).take(11).collect();
    assert_eq!(label, "[  START  ]");

    // A click one cell outside the rectangle misses
    assert!(layout.start_button.contains(layout.start_button.x, layout.start_button.y));
    assert!(!layout
        .start_button
        .contains(layout.start_button.x + 11, layout.start_button.y));
}

#[test]
fn test_narrow_terminal_drops_the_panel() {
    let game = Game::new(3);
    let mut frame = Frame::new(30, 24);
    GameView::new().render(&game, &mut frame);

    // Field still draws, panel does not fit
    assert!(row_text(&frame, 1).contains('┌'));
    for y in 0..24 {
        assert!(!row_text(&frame, y).contains("SCORE"), "row {}", y);
    }
}
