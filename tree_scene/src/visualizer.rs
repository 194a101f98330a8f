//! Software-rendered scene using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┬────────────┐
//! │                  MERRY CHRISTMAS                     │ hand       │
//! │                        ★                             │ preview    │
//! │                 ·  ·  ▲  ·  ·     [photo]            └────────────┤
//! │              ·   · ▲▲▲▲ ·   ·                                     │
//! │   [photo]      ·  ▲▲▲▲▲▲▲  ·                                      │
//! │                 ▲▲▲▲▲▲▲▲▲▲                                        │
//! ├───────────────────────────────────────────────────────────────────┤
//! │  mode | gesture status | photos                                   │
//! │  key legend                                                       │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is drawn back to front each frame: additive foliage points,
//! the star as a triangle fan, then photo cards sorted by depth.

use std::collections::HashMap;
use std::sync::mpsc::Sender;

use glam::{Mat4, Vec2, Vec3};
use hand_gesture::{GestureStatus, HandLandmarks, HAND_CONNECTIONS};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tree_motion::{FoliageField, Ornament, OrnamentSet, Star, TextureState, TreeMode};

use crate::camera::CameraRig;
use crate::error::SceneError;
use crate::photos::Thumbnail;
use crate::sim::{SimInput, SimPose};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:     usize = 960;
pub const WIN_H:     usize = 720;
const STATUS_H:      usize = 40;
const SCENE_H:       usize = WIN_H - STATUS_H;
const PREVIEW_W:     usize = 200;
const PREVIEW_H:     usize = 150;
const PREVIEW_X:     usize = WIN_W - PREVIEW_W - 12;
const PREVIEW_Y:     usize = 12;

const BG_COLOR:      u32 = 0xFF05080F;
const STATUS_BG:     u32 = 0xFF0B1A14;
const GOLD:          u32 = 0xFFD4AF37;
const PAPER:         u32 = 0xFFFDFDFD;
const PHOTO_LOADING: u32 = 0xFFCCCCCC;
const PHOTO_MISSING: u32 = 0xFF550000;
const CAPTION:       u32 = 0xFF333333;
const SKELETON:      u32 = 0xFF00FF88;
const PALM_DOT:      u32 = 0xFFFF3344;

const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
const NEAR:  f32 = 0.1;
const FAR:   f32 = 200.0;

// ── photo card geometry, card-local units ──────────────────────────────────

const CARD_HALF: Vec2 = Vec2::new(0.6, 0.75);
/// Photo area in card uv (u right, v down).
const PHOTO_UV_MIN: Vec2 = Vec2::new(0.1 / 1.2, 0.1 / 1.5);
const PHOTO_UV_MAX: Vec2 = Vec2::new(1.1 / 1.2, 1.1 / 1.5);
const CAPTION_Y: f32 = -0.55;
const STRING_LEN: f32 = 1.5;

// ════════════════════════════════════════════════════════════════════════════
// Projection
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x:     f32,
    pub y:     f32,
    /// View-space distance along the camera axis.
    pub depth: f32,
}

impl ScreenPoint {
    pub fn xy(&self) -> Vec2 { Vec2::new(self.x, self.y) }
}

/// World → framebuffer mapping for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    view_proj: Mat4,
    width:     f32,
    height:    f32,
    focal:     f32,
}

impl Projector {
    pub fn new(view: Mat4, width: usize, height: usize) -> Self {
        let (w, h) = (width as f32, height as f32);
        let proj = Mat4::perspective_rh(FOV_Y, w / h, NEAR, FAR);
        Projector {
            view_proj: proj * view,
            width:     w,
            height:    h,
            focal:     h * 0.5 / (FOV_Y * 0.5).tan(),
        }
    }

    /// `None` behind the near plane.
    pub fn project(&self, p: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_proj * p.extend(1.0);
        if clip.w < NEAR {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(ScreenPoint {
            x:     (ndc.x + 1.0) * 0.5 * self.width,
            y:     (1.0 - ndc.y) * 0.5 * self.height,
            depth: clip.w,
        })
    }

    /// Pixels per world unit at `depth`.
    pub fn scale_at(&self, depth: f32) -> f32 {
        self.focal / depth.max(NEAR)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Frame snapshot / UI actions
// ════════════════════════════════════════════════════════════════════════════

/// Everything the renderer reads, borrowed from the app for one frame.
pub struct SceneView<'a> {
    pub time:       f32,
    pub mode:       TreeMode,
    pub status:     GestureStatus,
    pub foliage:    &'a FoliageField,
    pub star:       &'a Star,
    pub ornaments:  &'a OrnamentSet,
    pub thumbnails: &'a HashMap<String, Thumbnail>,
    pub camera:     &'a CameraRig,
    pub landmarks:  Option<&'a HandLandmarks>,
}

/// Window input the app acts on directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    ToggleMode,
    ReloadPhotos,
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:   Window,
    buf:      Vec<u32>,
    sim_tx:   Option<Sender<SimInput>>,
    sim_step: f32,
}

impl Visualizer {
    /// `sim_tx` receives hand-simulator keys; `None` disables them.
    pub fn new(sim_tx: Option<Sender<SimInput>>, sim_step: f32) -> Result<Self, SceneError> {
        let mut window = Window::new(
            "Merry Christmas - gesture tree",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            sim_step,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll the keyboard.  Simulator keys go straight to the sim channel.
    pub fn poll_input(&mut self) -> Vec<UiAction> {
        let mut actions = Vec::new();
        if !self.window.is_open() {
            actions.push(UiAction::Quit);
            return actions;
        }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        let held     = |k: Key| self.window.is_key_pressed(k, KeyRepeat::Yes);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            actions.push(UiAction::Quit);
        }
        if one_shot(Key::Space) {
            actions.push(UiAction::ToggleMode);
        }
        if one_shot(Key::R) {
            actions.push(UiAction::ReloadPhotos);
        }

        if let Some(tx) = &self.sim_tx {
            let send = |input: SimInput| { let _ = tx.send(input); };
            for (key, pose) in [
                (Key::O, SimPose::Open),
                (Key::F, SimPose::Fist),
                (Key::Key3, SimPose::Three),
                (Key::H, SimPose::Hidden),
            ] {
                if one_shot(key) {
                    send(SimInput::Pose(pose));
                }
            }
            // Preview is mirrored, so screen-right is image-left.
            let step = self.sim_step;
            for (key, dx, dy) in [
                (Key::Left,  step, 0.0),
                (Key::Right, -step, 0.0),
                (Key::Up,    0.0, -step),
                (Key::Down,  0.0, step),
            ] {
                if held(key) {
                    send(SimInput::Move { dx, dy });
                }
            }
        }

        actions
    }

    /// Render one frame.
    pub fn render(&mut self, scene: &SceneView<'_>) {
        self.buf.fill(BG_COLOR);

        let proj = Projector::new(scene.camera.view(), WIN_W, SCENE_H);
        let eye = scene.camera.eye();

        self.draw_foliage(scene.foliage, scene.time, &proj);
        self.draw_star(scene.star, scene.time, &proj);
        self.draw_ornaments(scene.ornaments, scene.thumbnails, eye, &proj);

        // ── Title ─────────────────────────────────────────────────────────
        let title = "MERRY CHRISTMAS";
        let tx = (WIN_W - text_width(title, 4)) / 2;
        self.draw_text(title, tx, 20, 4, GOLD);

        self.draw_hand_preview(scene.landmarks);

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, SCENE_H, WIN_W, STATUS_H, STATUS_BG);
        let line = format!(
            "{}  |  {}  |  {} PHOTOS",
            scene.mode.name(), scene.status, scene.ornaments.len()
        );
        self.draw_text(&line, 10, SCENE_H + 8, 2, 0xFFEEEEEE);
        let legend = if self.sim_tx.is_some() {
            "SPACE=toggle  O=open  F=fist  3=three  H=hide  arrows=move  R=reload  Q=quit"
        } else {
            "SPACE=toggle  R=reload photos  Q=quit"
        };
        self.draw_text(legend, 10, WIN_H - 10, 1, 0xFF888888);

        if let Err(e) = self.window.update_with_buffer(&self.buf, WIN_W, WIN_H) {
            log::warn!("frame dropped: {}", e);
        }
    }

    // ── Foliage ───────────────────────────────────────────────────────────

    fn draw_foliage(&mut self, foliage: &FoliageField, time: f32, proj: &Projector) {
        for s in foliage.samples(time) {
            let Some(p) = proj.project(s.position) else { continue };
            let r = (s.size * 0.015 * proj.scale_at(p.depth)).clamp(1.0, 3.0) as i32;
            let color = rgb(s.color);
            for dy in 0..r {
                for dx in 0..r {
                    self.add_pixel(p.x as i32 + dx, p.y as i32 + dy, color);
                }
            }
        }
    }

    // ── Star ──────────────────────────────────────────────────────────────

    fn draw_star(&mut self, star: &Star, time: f32, proj: &Projector) {
        let t = star.transform();
        let Some(centre) = proj.project(t.position) else { return };

        // Halo
        let glow = star.glow(time);
        let halo = ((glow * 0.6 * proj.scale_at(centre.depth)) as i32).min(80);
        for dy in -halo..=halo {
            for dx in -halo..=halo {
                let d2 = (dx * dx + dy * dy) as f32 / (halo * halo).max(1) as f32;
                if d2 < 1.0 {
                    let a = ((1.0 - d2) * 0.12 * glow).min(1.0);
                    self.add_pixel(centre.x as i32 + dx, centre.y as i32 + dy, scale_color(GOLD, a));
                }
            }
        }

        let outline: Vec<Vec2> = star
            .outline()
            .iter()
            .filter_map(|v| proj.project(t.position + t.rotation * Vec3::new(v.x, v.y, 0.0)))
            .map(|p| p.xy())
            .collect();
        if outline.len() != star.outline().len() {
            return;
        }
        let fill = blend(GOLD, 0xFFFFFFFF, (glow - 1.5) * 0.4);
        for i in 0..outline.len() {
            let j = (i + 1) % outline.len();
            self.fill_triangle([centre.xy(), outline[i], outline[j]], [Vec2::ZERO; 3], |_| Some(fill));
        }
    }

    // ── Photo cards ───────────────────────────────────────────────────────

    fn draw_ornaments(
        &mut self,
        ornaments: &OrnamentSet,
        thumbnails: &HashMap<String, Thumbnail>,
        eye: Vec3,
        proj: &Projector,
    ) {
        let mut order: Vec<(&Ornament, f32)> = ornaments
            .iter()
            .filter_map(|o| proj.project(o.entity.position()).map(|p| (o, p.depth)))
            .collect();
        order.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (o, _) in order {
            self.draw_card(o, thumbnails.get(&o.key), eye, proj);
        }
    }

    fn draw_card(&mut self, o: &Ornament, thumb: Option<&Thumbnail>, eye: Vec3, proj: &Projector) {
        let t = o.entity.transform();
        let local = |x: f32, y: f32| t.position + t.rotation * Vec3::new(x, y, 0.0);

        // String up to the branch.
        if let (Some(a), Some(b)) = (
            proj.project(local(0.0, CARD_HALF.y)),
            proj.project(local(0.0, CARD_HALF.y + STRING_LEN)),
        ) {
            self.draw_line(a.xy(), b.xy(), scale_color(GOLD, 0.6));
        }

        let corners = [
            local(-CARD_HALF.x,  CARD_HALF.y),
            local( CARD_HALF.x,  CARD_HALF.y),
            local( CARD_HALF.x, -CARD_HALF.y),
            local(-CARD_HALF.x, -CARD_HALF.y),
        ];
        let mut screen = [Vec2::ZERO; 4];
        for (s, c) in screen.iter_mut().zip(corners) {
            match proj.project(c) {
                Some(p) => *s = p.xy(),
                None => return,
            }
        }
        let uv = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];

        let facing = (t.rotation * Vec3::Z).dot(eye - t.position) > 0.0;
        let photo = |p: Vec2| -> u32 {
            match (o.texture, thumb) {
                (TextureState::Loaded, Some(img)) => {
                    let s = (p - PHOTO_UV_MIN) / (PHOTO_UV_MAX - PHOTO_UV_MIN);
                    img.pixel((s.x * img.width as f32) as u32, (s.y * img.height as f32) as u32)
                }
                (TextureState::Missing, _) => PHOTO_MISSING,
                _ => PHOTO_LOADING,
            }
        };
        let shade = |p: Vec2| -> Option<u32> {
            let in_photo = p.cmpge(PHOTO_UV_MIN).all() && p.cmple(PHOTO_UV_MAX).all();
            Some(if facing && in_photo { photo(p) } else { PAPER })
        };
        self.fill_triangle([screen[0], screen[1], screen[2]], [uv[0], uv[1], uv[2]], &shade);
        self.fill_triangle([screen[0], screen[2], screen[3]], [uv[0], uv[2], uv[3]], &shade);

        if !facing {
            return;
        }
        // Clip
        if let Some(c) = proj.project(local(0.0, CARD_HALF.y - 0.05)) {
            let w = (0.1 * proj.scale_at(c.depth)).max(2.0) as usize;
            self.fill_rect(
                (c.x as usize).saturating_sub(w / 2),
                (c.y as usize).saturating_sub(w / 4),
                w, (w / 2).max(1), GOLD,
            );
        }
        // Caption, only once there is room for it.
        if let Some(c) = proj.project(local(0.0, CAPTION_Y)) {
            let card_px = 1.2 * proj.scale_at(c.depth);
            let caption = o.caption();
            let scale = if card_px > 260.0 { 2 } else { 1 };
            if card_px >= text_width(caption, 1) as f32 + 8.0 {
                let x = (c.x as usize).saturating_sub(text_width(caption, scale) / 2);
                let y = (c.y as usize).saturating_sub(5 * scale / 2);
                self.draw_text(caption, x, y, scale, CAPTION);
            }
        }
    }

    // ── Hand preview ──────────────────────────────────────────────────────

    fn draw_hand_preview(&mut self, landmarks: Option<&HandLandmarks>) {
        self.fill_rect(PREVIEW_X, PREVIEW_Y, PREVIEW_W, PREVIEW_H, 0xFF000000);
        self.draw_border(PREVIEW_X, PREVIEW_Y, PREVIEW_W, PREVIEW_H, scale_color(GOLD, 0.5));

        let Some(hand) = landmarks else {
            let msg = "NO HAND";
            let x = PREVIEW_X + (PREVIEW_W - text_width(msg, 2)) / 2;
            self.draw_text(msg, x, PREVIEW_Y + PREVIEW_H / 2 - 5, 2, 0xFF666666);
            return;
        };

        let to_panel = |x: f32, y: f32| Vec2::new(
            PREVIEW_X as f32 + (1.0 - x) * PREVIEW_W as f32,
            PREVIEW_Y as f32 + y * PREVIEW_H as f32,
        );
        for (a, b) in HAND_CONNECTIONS {
            let (pa, pb) = (&hand[a], &hand[b]);
            self.draw_line(to_panel(pa.x, pa.y), to_panel(pb.x, pb.y), SKELETON);
        }
        for p in hand.points() {
            let q = to_panel(p.x, p.y);
            self.fill_rect(q.x as usize, q.y as usize, 2, 2, 0xFFFFFFFF);
        }
        let (cx, cy) = hand.palm_center();
        let c = to_panel(cx, cy);
        self.fill_disc(c.x as i32, c.y as i32, 4, PALM_DOT);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        let (x1, y1) = (x + w - 1, y + h - 1);
        self.draw_line(Vec2::new(x as f32, y as f32), Vec2::new(x1 as f32, y as f32), color);
        self.draw_line(Vec2::new(x as f32, y1 as f32), Vec2::new(x1 as f32, y1 as f32), color);
        self.draw_line(Vec2::new(x as f32, y as f32), Vec2::new(x as f32, y1 as f32), color);
        self.draw_line(Vec2::new(x1 as f32, y as f32), Vec2::new(x1 as f32, y1 as f32), color);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    fn add_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < SCENE_H {
            let i = y as usize * WIN_W + x as usize;
            self.buf[i] = add_colors(self.buf[i], color);
        }
    }

    fn fill_disc(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: u32) {
        let (mut x0, mut y0) = (a.x as i32, a.y as i32);
        let (x1, y1) = (b.x as i32, b.y as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        // Bounded so a wild projection cannot stall the frame.
        for _ in 0..=(dx - dy).min(4 * WIN_W as i32) {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x0 += sx; }
            if e2 <= dx { err += dx; y0 += sy; }
        }
    }

    /// Rasterise a triangle, interpolating `uv` affinely; `shade` picks the
    /// colour (or skips the pixel).  Clipped to the scene area.
    fn fill_triangle<F>(&mut self, p: [Vec2; 3], uv: [Vec2; 3], mut shade: F)
    where
        F: FnMut(Vec2) -> Option<u32>,
    {
        let area = edge(p[0], p[1], p[2]);
        if area.abs() < 1e-3 {
            return;
        }
        let min = p[0].min(p[1]).min(p[2]).max(Vec2::ZERO);
        let max = p[0].max(p[1]).max(p[2]).min(Vec2::new(WIN_W as f32 - 1.0, SCENE_H as f32 - 1.0));
        if min.x > max.x || min.y > max.y {
            return;
        }

        for y in min.y as usize..=max.y as usize {
            for x in min.x as usize..=max.x as usize {
                let q = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(p[1], p[2], q) / area;
                let w1 = edge(p[2], p[0], q) / area;
                let w2 = 1.0 - w0 - w1;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                if let Some(c) = shade(uv[0] * w0 + uv[1] * w1 + uv[2] * w2) {
                    self.buf[y * WIN_W + x] = c;
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = glyph(ch);
            for row in 0..5usize {
                let bits = (glyph >> (3 * (4 - row))) & 0b111;
                for col in 0..3usize {
                    if bits & (0b100 >> col) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale;
            if cx + 4 * scale > WIN_W { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 font, one octal digit per row (top first)
// ────────────────────────────────────────────────────────────────────────────

fn glyph(c: char) -> u16 {
    match c.to_ascii_uppercase() {
        '0' => 0o75557, '1' => 0o26227, '2' => 0o71747, '3' => 0o71717,
        '4' => 0o55711, '5' => 0o74717, '6' => 0o74757, '7' => 0o71111,
        '8' => 0o75757, '9' => 0o75717,
        'A' => 0o25755, 'B' => 0o65656, 'C' => 0o34443, 'D' => 0o65556,
        'E' => 0o74647, 'F' => 0o74644, 'G' => 0o34553, 'H' => 0o55755,
        'I' => 0o72227, 'J' => 0o11153, 'K' => 0o55655, 'L' => 0o44447,
        'M' => 0o57555, 'N' => 0o65555, 'O' => 0o25552, 'P' => 0o65644,
        'Q' => 0o25563, 'R' => 0o65655, 'S' => 0o34216, 'T' => 0o72222,
        'U' => 0o55557, 'V' => 0o55522, 'W' => 0o55575, 'X' => 0o55255,
        'Y' => 0o55222, 'Z' => 0o71247,
        '(' => 0o12221, ')' => 0o42224, '|' => 0o22222, '!' => 0o22202,
        '/' => 0o11244, '-' => 0o00700, '.' => 0o00002, ',' => 0o00024,
        ':' => 0o02020, '=' => 0o07070, '+' => 0o02720, ' ' => 0,
        _   => 0o00200,
    }
}

fn text_width(text: &str, scale: usize) -> usize {
    text.chars().count() * 4 * scale
}

// ────────────────────────────────────────────────────────────────────────────
// Colour helpers
// ────────────────────────────────────────────────────────────────────────────

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Linear RGB (clamped) to ARGB.
fn rgb(c: [f32; 3]) -> u32 {
    let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u32;
    0xFF00_0000 | ch(c[0]) << 16 | ch(c[1]) << 8 | ch(c[2])
}

fn scale_color(c: u32, k: f32) -> u32 {
    blend(0xFF000000, c, k)
}

fn add_colors(a: u32, b: u32) -> u32 {
    let ch = |s: u32| (((a >> s) & 0xFF) + ((b >> s) & 0xFF)).min(0xFF) << s;
    0xFF00_0000 | ch(16) | ch(8) | ch(0)
}

/// Lerp two ARGB colours. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let ch = |s: u32| {
        let (ca, cb) = (((a >> s) & 0xFF) as f32, ((b >> s) & 0xFF) as f32);
        ((ca + (cb - ca) * t) as u32) << s
    };
    0xFF00_0000 | ch(16) | ch(8) | ch(0)
}
