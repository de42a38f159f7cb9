use crate::constants::*;
use drive_core::{
    AssetCache, FrameSnapshot, ModelKind, VehicleId, VehicleSnapshot, VehicleVisuals,
    ASSET_MAX_IDLE_SEC, ASSET_SWEEP_INTERVAL_SEC, LOOP_START, TRACK_PULSE_MAX,
};
use fnv::FnvHashMap;
use glam::Vec3;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-vehicle state the renderer keeps between frames.
struct VehicleVisual {
    kind: ModelKind,
    position: Vec3,
    heading: f32,
}

/// Top-down 2D canvas view of the drive.
///
/// The scenery is drawn relative to the world offset; traffic is drawn from
/// the visuals the reconciler maintains. Sprites are pre-rendered per model
/// kind and kept in a session `AssetCache`.
pub struct CanvasRenderer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    document: web::Document,
    sprites: AssetCache<ModelKind, web::HtmlCanvasElement>,
    vehicles: FnvHashMap<VehicleId, VehicleVisual>,
    now: f64,
}

fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("get_context failed: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

#[inline]
fn kind_color(kind: ModelKind) -> &'static str {
    match kind {
        ModelKind::Sedan => SEDAN_COLOR,
        ModelKind::Coupe => COUPE_COLOR,
        ModelKind::Taxi => TAXI_COLOR,
        ModelKind::Pickup => PICKUP_COLOR,
        ModelKind::Van => VAN_COLOR,
    }
}

/// Draw a car body (nose toward -x) into a fresh offscreen canvas.
fn build_sprite(document: &web::Document, color: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let sprite: web::HtmlCanvasElement = el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let scale = 4.0;
    let w = CAR_LENGTH * scale;
    let h = CAR_WIDTH * scale;
    sprite.set_width(w as u32);
    sprite.set_height(h as u32);
    let ctx = context_2d(&sprite)?;
    ctx.set_fill_style_str(color);
    ctx.fill_rect(0.0, 0.0, w as f64, h as f64);
    // windscreen and rear window
    ctx.set_fill_style_str("rgba(10,14,24,0.85)");
    ctx.fill_rect((w * 0.18) as f64, (h * 0.12) as f64, (w * 0.14) as f64, (h * 0.76) as f64);
    ctx.fill_rect((w * 0.74) as f64, (h * 0.16) as f64, (w * 0.1) as f64, (h * 0.68) as f64);
    // headlights
    ctx.set_fill_style_str("#fff6c8");
    ctx.fill_rect(0.0, (h * 0.1) as f64, (w * 0.04) as f64, (h * 0.2) as f64);
    ctx.fill_rect(0.0, (h * 0.7) as f64, (w * 0.04) as f64, (h * 0.2) as f64);
    Ok(sprite)
}

impl CanvasRenderer {
    pub fn new(
        canvas: &web::HtmlCanvasElement,
        document: &web::Document,
        now: f64,
    ) -> anyhow::Result<Self> {
        let ctx = context_2d(canvas)?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
            document: document.clone(),
            sprites: AssetCache::init(now),
            vehicles: FnvHashMap::default(),
            now,
        })
    }

    fn ensure_sprite(&mut self, kind: ModelKind) {
        if self.sprites.contains(&kind) {
            return;
        }
        match build_sprite(&self.document, kind_color(kind)) {
            Ok(sprite) => {
                self.sprites.register(kind, sprite, self.now);
            }
            Err(e) => log::error!("[render] sprite for {} failed: {:?}", kind.label(), e),
        }
    }

    /// Pixels per world unit, scaled with canvas height.
    #[inline]
    fn ppu(&self) -> f64 {
        (PIXELS_PER_UNIT * (self.canvas.height() as f32 / 540.0).max(0.5)) as f64
    }

    /// World (x, z) to canvas pixels; the player sits at the origin.
    #[inline]
    fn project(&self, x: f32, z: f32) -> (f64, f64) {
        let ppu = self.ppu();
        let sx = self.canvas.width() as f64 * PLAYER_SCREEN_X_FRACTION as f64 + x as f64 * ppu;
        let sy = self.canvas.height() as f64 * 0.5 + z as f64 * ppu;
        (sx, sy)
    }

    pub fn render(&mut self, snap: &FrameSnapshot, pulses: &[f32], now: f64) {
        self.now = now;
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        let ppu = self.ppu();
        let ctx = &self.ctx;

        ctx.set_fill_style_str(SKY_COLOR);
        ctx.fill_rect(0.0, 0.0, w, h);

        // Road surface
        let (_, road_top) = self.project(0.0, -ROAD_HALF_WIDTH);
        let road_h = ROAD_HALF_WIDTH as f64 * 2.0 * ppu;
        ctx.set_fill_style_str(ROAD_COLOR);
        ctx.fill_rect(0.0, road_top, w, road_h);

        // The world group sits at +offset; scenery repeats with periods that
        // divide the loop, so the wrap at loop end is invisible.
        let visible_units = (w / ppu) as f32;
        let shift = snap.offset - LOOP_START;

        ctx.set_fill_style_str(LANE_MARK_COLOR);
        let first = ((-visible_units - shift) / LANE_DASH_SPACING).floor() as i32;
        let last = ((visible_units - shift) / LANE_DASH_SPACING).ceil() as i32;
        for k in first..=last {
            let x = k as f32 * LANE_DASH_SPACING + shift;
            let (sx, sy) = self.project(x, 0.0);
            ctx.fill_rect(sx, sy - 0.2 * ppu, LANE_DASH_LENGTH as f64 * ppu, 0.4 * ppu);
        }

        let glow: f32 = pulses.iter().copied().fold(0.0, f32::max);
        let window_alpha = (WINDOW_GLOW_BASE + WINDOW_GLOW_SPAN * (glow / TRACK_PULSE_MAX)).clamp(0.0, 1.0);
        let first = ((-visible_units - shift) / CITY_BLOCK_SPACING).floor() as i32;
        let last = ((visible_units - shift) / CITY_BLOCK_SPACING).ceil() as i32;
        for k in first..=last {
            let slot = k.rem_euclid(CITY_BLOCKS_PER_LOOP as i32) as usize;
            let x = k as f32 * CITY_BLOCK_SPACING + shift;
            let depth = 14.0 + 6.0 * slot as f32;
            for side in [-1.0_f32, 1.0] {
                let z_front = side * (ROAD_HALF_WIDTH + CITY_SETBACK);
                let z_top = if side < 0.0 { z_front - depth } else { z_front };
                let (sx, sy) = self.project(x, z_top);
                let bw = (CITY_BLOCK_SPACING - 18.0) as f64 * ppu;
                let bh = depth as f64 * ppu;
                ctx.set_fill_style_str(BUILDING_COLORS[slot]);
                ctx.fill_rect(sx, sy, bw, bh);
                ctx.set_fill_style_str(&format!("rgba(255,214,140,{:.3})", window_alpha));
                let mut wx = sx + 2.0 * ppu;
                while wx < sx + bw - 3.0 * ppu {
                    ctx.fill_rect(wx, sy + 2.0 * ppu, 1.5 * ppu, bh - 4.0 * ppu);
                    wx += 5.0 * ppu;
                }
            }
        }

        // Oncoming traffic
        let origin_x = w * PLAYER_SCREEN_X_FRACTION as f64;
        let origin_y = h * 0.5;
        for v in self.vehicles.values() {
            let Some(sprite) = self.sprites.get(&v.kind, now) else {
                continue;
            };
            let sx = origin_x + v.position.x as f64 * ppu;
            let sy = origin_y + v.position.z as f64 * ppu;
            draw_rotated(ctx, sprite, sx, sy, v.heading, ppu);
        }

        // Player car, fixed on screen, nose toward oncoming traffic
        let (px, py) = self.project(0.0, PLAYER_LANE_Z);
        ctx.set_fill_style_str(PLAYER_COLOR);
        ctx.fill_rect(
            px - CAR_LENGTH as f64 * ppu * 0.5,
            py - CAR_WIDTH as f64 * ppu * 0.5,
            CAR_LENGTH as f64 * ppu,
            CAR_WIDTH as f64 * ppu,
        );

        if self.sprites.sweep_due(now, ASSET_SWEEP_INTERVAL_SEC) {
            self.sprites.sweep(now, ASSET_MAX_IDLE_SEC);
        }
    }

    /// Release cached sprites and forget all vehicle visuals.
    pub fn teardown(self) {
        let released = self.sprites.teardown();
        for (_, sprite) in released {
            sprite.remove();
        }
    }
}

fn draw_rotated(
    ctx: &web::CanvasRenderingContext2d,
    sprite: &web::HtmlCanvasElement,
    sx: f64,
    sy: f64,
    heading: f32,
    ppu: f64,
) {
    let w = CAR_LENGTH as f64 * ppu;
    let h = CAR_WIDTH as f64 * ppu;
    ctx.save();
    _ = ctx.translate(sx, sy);
    // Sprites face -x; a heading of PI faces +x in world space.
    _ = ctx.rotate(heading as f64 - std::f64::consts::PI);
    _ = ctx.draw_image_with_html_canvas_element_and_dw_and_dh(sprite, -w * 0.5, -h * 0.5, w, h);
    ctx.restore();
}

impl VehicleVisuals for CanvasRenderer {
    fn create(&mut self, v: &VehicleSnapshot) {
        self.ensure_sprite(v.model_kind);
        self.vehicles.insert(
            v.id,
            VehicleVisual {
                kind: v.model_kind,
                position: v.position,
                heading: v.heading,
            },
        );
    }

    fn update(&mut self, v: &VehicleSnapshot) {
        if let Some(vis) = self.vehicles.get_mut(&v.id) {
            vis.position = v.position;
            vis.heading = v.heading;
        }
    }

    fn destroy(&mut self, id: VehicleId) {
        self.vehicles.remove(&id);
    }
}
