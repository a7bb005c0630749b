use crate::{
    config::EngineConfig,
    engine::{
        dda::{cast_ray, ray_dir},
        types::Screen,
        walls::resolve_face,
    },
    renderer::{ColumnSpan, Renderer, Rgba},
    sim::{InputCmd, PlayerController},
    world::{Camera, DoorEvent, Level, TextureBank},
};

/// Everything one frame needs, owned by the frame loop.
///
/// `update` is the only place that mutates the level or the camera, and it
/// runs strictly between two `render_frame` calls.
pub struct Engine<R: Renderer> {
    pub renderer: R,
    pub level: Level,
    pub camera: Camera,
    pub texture_bank: TextureBank,
    pub controller: PlayerController,
    pub screen: Screen,
    /// Distance ahead of the eye used to find doors.
    pub door_probe_distance: f32,
}

impl<R: Renderer> Engine<R> {
    pub fn new(
        renderer: R,
        level: Level,
        camera: Camera,
        texture_bank: TextureBank,
        w: usize,
        h: usize,
    ) -> Self {
        Self {
            renderer,
            level,
            camera,
            texture_bank,
            controller: PlayerController::default(),
            screen: Screen::new(w, h),
            door_probe_distance: 0.5,
        }
    }

    /// Camera at the level's start, tunables from `cfg`.
    pub fn from_config(
        renderer: R,
        level: Level,
        texture_bank: TextureBank,
        cfg: &EngineConfig,
    ) -> Self {
        let camera = Camera::new(level.start_pos(), level.start_yaw(), cfg.fov());
        let mut engine = Self::new(renderer, level, camera, texture_bank, cfg.width, cfg.height);
        engine.controller = cfg.controller();
        engine.door_probe_distance = cfg.door_probe_distance;
        engine
    }

    /*──────────────────────── simulation ────────────────────────────*/

    /// Apply one frame of input: movement first, then doors.
    pub fn update(&mut self, cmd: &InputCmd, dt: f32) -> Option<DoorEvent> {
        self.controller
            .apply(&mut self.camera, cmd, dt, self.level.grid());

        let probe = self.camera.probe(self.door_probe_distance);
        let occupant = self.camera.pos;
        let (doors, grid) = self.level.doors_mut();
        doors.update(cmd.use_act, probe, occupant, grid)
    }

    /*──────────────────────── rendering ─────────────────────────────*/

    /// Ray-cast column `col`; `None` when the ray escapes the map.
    pub fn cast_column(&self, col: usize) -> Option<ColumnSpan> {
        let dir = ray_dir(&self.camera, col, self.screen.w);
        let hit = cast_ray(self.level.grid(), self.camera.pos, dir)?;
        let face = resolve_face(
            &hit,
            self.level.tiles(),
            self.level.faces(),
            &self.texture_bank,
        );
        Some(ColumnSpan {
            x: col,
            perp_dist: hit.perp_dist,
            side: hit.side,
            tex_id: face.tex_id,
            tex_x: face.tex_x,
            fallback: face.fallback,
        })
    }

    pub fn render_frame(&mut self, submit: impl FnOnce(&[Rgba], usize, usize)) {
        self.renderer.begin_frame(self.screen.w, self.screen.h);

        for col in 0..self.screen.w {
            if let Some(span) = self.cast_column(col) {
                self.renderer.draw_column(&span, &self.texture_bank);
            }
        }

        self.renderer.end_frame(submit);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
