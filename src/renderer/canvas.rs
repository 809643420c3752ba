//! Canvas 2D render sink (browser only)
//!
//! Flat shapes only: the ship is a triangle, projectiles are bars, hostiles
//! are outlined squares. Also routes frame events to audio and mirrors the
//! dark mode flag onto `<body class="dark">`.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use super::{FrameSnapshot, RenderSink};
use crate::audio::{AudioManager, SoundEffect};
use crate::sim::GamePhase;

struct Palette {
    background: &'static str,
    ship: &'static str,
    projectile: &'static str,
    hostile: &'static str,
    text: &'static str,
    overlay: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#f4f4f8",
    ship: "#1a1a2e",
    projectile: "#d49a00",
    hostile: "#d62839",
    text: "#1a1a2e",
    overlay: "rgba(255, 255, 255, 0.75)",
};

const DARK: Palette = Palette {
    background: "#000000",
    ship: "#ffffff",
    projectile: "#facc15",
    hostile: "#ef4444",
    text: "#ffffff",
    overlay: "rgba(0, 0, 0, 0.75)",
};

pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
    body: Option<HtmlElement>,
    audio: AudioManager,
    /// Last dark mode flag written to the DOM
    dark_applied: Option<bool>,
}

impl CanvasSink {
    /// Sink drawing into `canvas` (None if a 2D context is unavailable)
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        let body = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body());
        Some(Self {
            ctx,
            body,
            audio: AudioManager::new(),
            dark_applied: None,
        })
    }

    fn apply_theme(&mut self, dark: bool) {
        if self.dark_applied == Some(dark) {
            return;
        }
        if let Some(body) = &self.body {
            let _ = body.class_list().toggle_with_force("dark", dark);
        }
        self.dark_applied = Some(dark);
    }

    fn draw(&self, frame: &FrameSnapshot, palette: &Palette) {
        let ctx = &self.ctx;
        let w = f64::from(frame.view_width);
        let h = f64::from(frame.view_height);

        ctx.set_fill_style_str(palette.background);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Ship
        let ship = frame.ship;
        ctx.set_fill_style_str(palette.ship);
        ctx.begin_path();
        ctx.move_to(f64::from(ship.x + ship.w / 2.0), f64::from(ship.y));
        ctx.line_to(f64::from(ship.x + ship.w), f64::from(ship.y + ship.h));
        ctx.line_to(f64::from(ship.x), f64::from(ship.y + ship.h));
        ctx.close_path();
        ctx.fill();

        ctx.set_fill_style_str(palette.projectile);
        for p in &frame.projectiles {
            ctx.fill_rect(f64::from(p.x), f64::from(p.y), f64::from(p.w), f64::from(p.h));
        }

        ctx.set_stroke_style_str(palette.hostile);
        ctx.set_line_width(2.0);
        for e in &frame.hostiles {
            ctx.stroke_rect(f64::from(e.x), f64::from(e.y), f64::from(e.w), f64::from(e.h));
        }

        // HUD
        let hud = frame.hud;
        ctx.set_fill_style_str(palette.text);
        ctx.set_font("16px monospace");
        ctx.set_text_align("left");
        let _ = ctx.fill_text(&format!("Score {}", hud.score), 12.0, 24.0);
        let _ = ctx.fill_text(&format!("High {}", hud.high_score), 12.0, 44.0);
        ctx.set_text_align("right");
        let _ = ctx.fill_text(&format!("Level {}", hud.level), w - 12.0, 24.0);
        let _ = ctx.fill_text(&format!("Lives {}", hud.lives), w - 12.0, 44.0);

        let banner = match frame.phase {
            GamePhase::Menu => Some("SPACE DEFENDER - press Enter"),
            GamePhase::GameOver => Some("GAME OVER - press Enter"),
            GamePhase::Playing => None,
        };
        if let Some(banner) = banner {
            ctx.set_fill_style_str(palette.overlay);
            ctx.fill_rect(0.0, 0.0, w, h);
            ctx.set_fill_style_str(palette.text);
            ctx.set_font("32px monospace");
            ctx.set_text_align("center");
            let _ = ctx.fill_text(banner, w / 2.0, h / 2.0);
        }
    }
}

impl RenderSink for CanvasSink {
    fn present(&mut self, frame: &FrameSnapshot) {
        self.apply_theme(frame.dark_mode);

        self.audio.set_muted(frame.muted);
        for effect in frame.events.iter().filter_map(SoundEffect::for_event) {
            self.audio.play(effect);
        }

        let palette = if frame.dark_mode { &DARK } else { &LIGHT };
        self.draw(frame, palette);
    }
}
