use crate::canvas::{Canvas, Rgba};
use crate::config::GameConfig;
use crate::grid::{Food, FoodKind};
use crate::interp::interpolate;
use crate::mode::Mode;
use crate::path::{build_paths, split_segments, Layout, Path, Point};
use crate::snake::{Direction, Snake};
use crate::stars::Star;

const BG_FROM: Rgba = Rgba::opaque(6, 10, 22);
const BG_TO: Rgba = Rgba::opaque(0, 0, 0);
const STAR: Rgba = Rgba::new(255, 255, 255, 70);
const BOARD_GLOW: Rgba = Rgba::new(120, 160, 255, 22);

const FOOD_NORMAL: Rgba = Rgba::opaque(255, 80, 140);
const FOOD_BONUS: Rgba = Rgba::opaque(255, 200, 70);
const FOOD_SHINE: Rgba = Rgba::new(255, 255, 255, 150);

const BODY_GLOW: Rgba = Rgba::new(0, 255, 210, 35);
const BODY_MAIN: Rgba = Rgba::new(0, 230, 175, 230);
const BODY_SHINE: Rgba = Rgba::new(210, 255, 245, 140);
const HEAD_GLOW: Rgba = Rgba::new(0, 255, 210, 50);
const HEAD: Rgba = Rgba::new(0, 245, 195, 240);
const EYE: Rgba = Rgba::new(255, 255, 255, 220);
const PUPIL: Rgba = Rgba::new(10, 10, 10, 180);

const TEXT: Rgba = Rgba::new(255, 255, 255, 230);
const PANEL: Rgba = Rgba::new(0, 0, 0, 175);
const PANEL_EDGE: Rgba = Rgba::new(255, 255, 255, 45);

/// Star radii are authored for a 24 pixel tile.
const REFERENCE_TILE: f64 = 24.0;

/// Everything a frame needs, borrowed from the game.
pub struct FrameView<'a> {
    pub config: &'a GameConfig,
    pub mode: Mode,
    pub snake: &'a Snake,
    pub food: Food,
    pub score: u32,
    pub best: u32,
    pub alpha: f64,
    pub stars: &'a [Star],
    /// Seconds since start, drives the food pulse.
    pub time_s: f64,
}

/// Screen-space body for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeGeometry {
    pub head: Point,
    pub segments: Vec<Vec<Point>>,
    pub paths: Vec<Path>,
}

/// Interpolates the body, maps it to the screen, splits it at wrap jumps
/// and rounds the corners of every piece.
pub fn snake_geometry(snake: &Snake, layout: &Layout, alpha: f64, config: &GameConfig) -> SnakeGeometry {
    let points = interpolate(snake.previous(), snake.body(), layout.dims, alpha)
        .map(|p| layout.to_screen(p));
    let segments = split_segments(points, layout.tile * config.wrap_jump_factor);
    let paths = build_paths(&segments, corner_radius(layout, config));
    let head = segments.first().and_then(|s| s.first()).copied().unwrap_or_default();

    SnakeGeometry { head, segments, paths }
}

pub fn stroke_width(layout: &Layout, config: &GameConfig) -> f64 {
    (layout.tile * 0.55).max(config.min_stroke)
}

pub fn corner_radius(layout: &Layout, config: &GameConfig) -> f64 {
    (layout.tile * 0.32).max(config.min_corner_radius)
}

pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C, view: &FrameView) {
    let layout = Layout::fit(canvas.size(), view.config.dims(), view.config.min_tile);

    draw_background(canvas, view.stars, layout.tile);
    draw_board_frame(canvas, &layout);
    draw_food(canvas, &layout, view.food, view.time_s);
    draw_snake(canvas, &layout, view);
    draw_hud(canvas, view.score, view.best);

    match view.mode {
        Mode::Menu => draw_menu(canvas),
        Mode::Paused => draw_pause(canvas),
        Mode::GameOver => draw_game_over(canvas, view.score, view.best),
        Mode::Running => {}
    }
}

fn draw_background<C: Canvas + ?Sized>(canvas: &mut C, stars: &[Star], tile: f64) {
    let (w, h) = canvas.size();
    canvas.fill_gradient(BG_FROM, BG_TO);

    let scale = tile / REFERENCE_TILE;
    for st in stars {
        let r = st.radius as f64 * scale / 2.0;
        canvas.fill_circle(Point::new(st.x as f64 * w, st.y as f64 * h), r, STAR);
    }
}

fn draw_board_frame<C: Canvas + ?Sized>(canvas: &mut C, layout: &Layout) {
    let pad = layout.tile * 0.6;
    let (bw, bh) = layout.board_size();
    canvas.fill_round_rect(
        layout.offset - Point::new(pad, pad),
        (bw + pad * 2.0, bh + pad * 2.0),
        layout.tile * 1.2,
        BOARD_GLOW,
    );
}

fn draw_food<C: Canvas + ?Sized>(canvas: &mut C, layout: &Layout, food: Food, time_s: f64) {
    let pulse = 0.85 + 0.15 * (time_s * 6.0).sin();
    let size = layout.tile * 0.70 * pulse;
    let center = layout.to_screen(Point::new(food.pos.0 as f64, food.pos.1 as f64));

    let core = match food.kind {
        FoodKind::Normal => FOOD_NORMAL,
        FoodKind::Bonus => FOOD_BONUS,
    };

    for i in (1..=3u8).rev() {
        let glow = size + i as f64 * layout.tile / 2.0;
        canvas.fill_circle(center, glow / 2.0, core.with_alpha(16 * i));
    }
    canvas.fill_circle(center, size / 2.0, core.with_alpha(235));

    let shine = center - Point::new(size * 0.4 / 3.0, size * 0.4 / 3.0);
    canvas.fill_circle(shine, size / 6.0, FOOD_SHINE);
}

fn draw_snake<C: Canvas + ?Sized>(canvas: &mut C, layout: &Layout, view: &FrameView) {
    if view.snake.is_empty() {
        return;
    }

    let geometry = snake_geometry(view.snake, layout, view.alpha, view.config);
    let thickness = stroke_width(layout, view.config);

    for path in &geometry.paths {
        canvas.stroke_path(path, thickness * 1.9, BODY_GLOW);
        canvas.stroke_path(path, thickness, BODY_MAIN);
        canvas.stroke_path(path, (thickness * 0.35).max(view.config.min_stroke), BODY_SHINE);
    }

    draw_head(canvas, geometry.head, thickness, layout.tile, view.snake.get_direction());
}

fn draw_head<C: Canvas + ?Sized>(canvas: &mut C, head: Point, thickness: f64, tile: f64, dir: Direction) {
    let r = thickness * 0.75;
    canvas.fill_circle(head, r + tile * 0.4, HEAD_GLOW);
    canvas.fill_circle(head, r, HEAD);

    let (fx, fy) = dir.delta();
    let forward = Point::new(fx as f64, fy as f64);
    let side = Point::new(-forward.y, forward.x);

    let eye_r = (r * 0.18).max(0.5);
    let pupil_r = eye_r * 0.55;
    for s in [1.0, -1.0] {
        let eye = head + forward * (r * 0.35) + side * (r * 0.28 * s);
        canvas.fill_circle(eye, eye_r, EYE);
        canvas.fill_circle(eye + forward * (r * 0.1), pupil_r, PUPIL);
    }
}

pub fn hud_right_text(best: u32) -> String {
    format!("Best: {}   F11 Fullscreen   P Pause   ESC Menu", best)
}

fn draw_hud<C: Canvas + ?Sized>(canvas: &mut C, score: u32, best: u32) {
    let (w, _) = canvas.size();
    let margin = canvas.text_width("  ");

    canvas.text(Point::new(margin, 0.0), &format!("Score: {}", score), TEXT);

    let right = hud_right_text(best);
    let x = w - canvas.text_width(&right) - margin;
    canvas.text(Point::new(x, 0.0), &right, TEXT);
}

/// Dimmed panel with a centered title; returns the y of the first body line.
fn panel_overlay<C: Canvas + ?Sized>(canvas: &mut C, title: &str) -> f64 {
    let (w, h) = canvas.size();
    let lh = canvas.line_height();

    let pw = (w * 0.7).min(w - lh * 2.0).max(0.0);
    let ph = (lh * 9.0).min(h - lh * 2.0).max(0.0);
    let origin = Point::new(((w - pw) / 2.0).floor(), ((h - ph) / 2.0).floor());

    canvas.fill_round_rect(origin - Point::new(1.0, 1.0), (pw + 2.0, ph + 2.0), lh * 1.5, PANEL_EDGE);
    canvas.fill_round_rect(origin, (pw, ph), lh * 1.5, PANEL);

    draw_centered(canvas, title, origin.y + lh);
    origin.y + lh * 3.5
}

fn draw_centered<C: Canvas + ?Sized>(canvas: &mut C, s: &str, y: f64) {
    let (w, _) = canvas.size();
    let x = ((w - canvas.text_width(s)) / 2.0).floor();
    canvas.text(Point::new(x, y), s, TEXT);
}

fn draw_lines<C: Canvas + ?Sized>(canvas: &mut C, lines: &[&str], mut y: f64) {
    let step = canvas.line_height() * 1.5;
    for line in lines {
        draw_centered(canvas, line, y);
        y += step;
    }
}

fn draw_menu<C: Canvas + ?Sized>(canvas: &mut C) {
    let y = panel_overlay(canvas, "WRAPSNAKE");
    draw_lines(
        canvas,
        &[
            "ENTER  ->  Start",
            "Arrow Keys / WASD  ->  Steer",
            "P Pause   R Restart   F11 Fullscreen   ESC Menu",
        ],
        y,
    );
}

fn draw_pause<C: Canvas + ?Sized>(canvas: &mut C) {
    let y = panel_overlay(canvas, "PAUSED");
    draw_lines(canvas, &["Press P to Resume", "Press R to Restart"], y);
}

fn draw_game_over<C: Canvas + ?Sized>(canvas: &mut C, score: u32, best: u32) {
    let y = panel_overlay(canvas, "GAME OVER");
    let final_score = format!("Final Score: {}", score);
    let best_score = format!("Best Score: {}", best);
    draw_lines(
        canvas,
        &[final_score.as_str(), best_score.as_str(), "Press R to Restart  |  ESC Menu"],
        y,
    );
}
