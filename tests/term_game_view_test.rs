use frostfall::core::{EngineConfig, GameState, ManualClock};
use frostfall::term::{encode_frame, GameView, Viewport};
use frostfall::types::{BlockColor, PieceKind, RunState};

fn running_game() -> GameState<ManualClock> {
    let mut game = GameState::with_clock(EngineConfig::default().with_seed(5), ManualClock::new());
    game.start();
    game
}

#[test]
fn term_view_renders_border_corners() {
    let snap = running_game().snapshot();
    let view = GameView::default();

    // 10 cells * 2 columns + border = 22 wide; 20 rows + border = 22 tall.
    let canvas = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(canvas.get(0, 0).unwrap().ch, '┌');
    assert_eq!(canvas.get(21, 0).unwrap().ch, '┐');
    assert_eq!(canvas.get(0, 21).unwrap().ch, '└');
    assert_eq!(canvas.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_locked_cells_in_their_color() {
    let mut snap = running_game().snapshot();
    snap.active = None;
    snap.board[19][0] = Some(BlockColor::Piece(PieceKind::S));
    snap.board[19][1] = Some(BlockColor::Frozen);

    let canvas = GameView::default().render(&snap, Viewport::new(22, 22));
    let (x0, y0) = (1, 1 + 19);
    let s = canvas.get(x0, y0).unwrap();
    assert_eq!(s.ch, '█');
    assert_eq!(canvas.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!((s.style.fg.0, s.style.fg.1, s.style.fg.2), BlockColor::Piece(PieceKind::S).rgb());
    assert_eq!(canvas.get(x0 + 2, y0).unwrap().ch, '▓');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = running_game().snapshot();
    snap.score = 1234;
    snap.level = 2;

    let view = GameView::default();
    let wide = view.render(&snap, Viewport::new(60, 24));
    assert!(wide.contains_text("SCORE"));
    assert!(wide.contains_text("1234"));
    assert!(wide.contains_text("LEVEL"));

    let narrow = view.render(&snap, Viewport::new(22, 22));
    assert!(!narrow.contains_text("SCORE"));
}

#[test]
fn term_view_tracks_engine_state() {
    let mut game = running_game();
    let view = GameView::default();
    let vp = Viewport::new(60, 24);

    game.pause();
    assert_eq!(game.snapshot().state, RunState::Paused);
    assert!(view.render(&game.snapshot(), vp).contains_text("PAUSED"));

    game.reset();
    assert!(view.render(&game.snapshot(), vp).contains_text("ENTER to start"));
}

#[test]
fn renderer_encodes_rendered_view() {
    let snap = running_game().snapshot();
    let canvas = GameView::default().render(&snap, Viewport::new(40, 24));
    let mut out = Vec::new();
    encode_frame(None, &canvas, &mut out).unwrap();
    assert!(!out.is_empty());

    let mut again = Vec::new();
    encode_frame(Some(&canvas), &canvas, &mut again).unwrap();
    assert!(again.len() < out.len());
}
