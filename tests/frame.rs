//! Whole-frame checks through the public API.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use raycast_rs::{
    Engine, EngineConfig,
    engine::Side,
    renderer::{Shading, Software, shade::shade},
    sim::InputCmd,
    world::{
        Camera, DoorEvent, EMPTY, Level, LevelDef, PlayerStart, Texture, TextureBank,
    },
};

const W: usize = 64;
const H: usize = 48;
const SKY: u32 = 0xFF_0000AA;
const GROUND: u32 = 0xFF_00AA00;

const FLAT: Shading = Shading {
    falloff: 0.0,
    min_light: 0.0,
    y_side_factor: 1.0,
};

fn cfg() -> EngineConfig {
    EngineConfig {
        width: W,
        height: H,
        ..Default::default()
    }
}

fn engine(def: &LevelDef, bank: TextureBank, shading: Shading) -> Engine<Software> {
    let cfg = cfg();
    let level = Level::from_def(def, cfg.door_use_radius).unwrap();
    Engine::from_config(Software::new(shading, SKY, GROUND), level, bank, &cfg)
}

fn look(e: &mut Engine<Software>, x: f32, y: f32, yaw: f32) {
    e.camera = Camera::new(Vec2::new(x, y), yaw, e.camera.fov);
}

fn render(e: &mut Engine<Software>) {
    e.render_frame(|fb, w, h| assert_eq!(fb.len(), w * h));
}

fn press() -> InputCmd {
    InputCmd {
        use_act: true,
        ..Default::default()
    }
}

/*──────────────────────────── corridor ─────────────────────────────*/

fn corridor() -> LevelDef {
    LevelDef {
        name: "corridor".into(),
        rows: vec![vec![1; 8], vec![0, 0, 0, 0, 0, 0, 0, 2], vec![1; 8]],
        tiles: Default::default(),
        door_code: 5,
        doors: vec![],
        special_blocks: vec![],
        player: PlayerStart {
            x: 1.5,
            y: 1.5,
            yaw_deg: 0.0,
        },
        textures: Default::default(),
    }
}

#[test]
fn corridor_end_wall_is_centred_and_shaded() {
    let mut e = engine(&corridor(), TextureBank::new(), Shading::default());
    render(&mut e);

    let span = e.cast_column(W / 2).unwrap();
    assert_eq!(span.perp_dist, 5.5);
    assert_eq!(span.side, Side::X);
    assert_eq!(span.tex_id, None);

    // 48 / 5.5 → 8.7 px, half = 4 → rows 20..=28
    let expect = shade(0xFF_55FF55, Shading::default().factor(5.5, Side::X));
    let px = |y| e.renderer.pixel(W / 2, y);
    assert_eq!(px(19), SKY);
    assert_eq!(px(20), expect);
    assert_eq!(px(24), expect);
    assert_eq!(px(28), expect);
    assert_eq!(px(29), GROUND);
}

#[test]
fn corridor_side_walls_fill_edge_columns() {
    let mut e = engine(&corridor(), TextureBank::new(), FLAT);
    render(&mut e);
    // leftmost column looks north-east onto the top wall row
    let span = e.cast_column(0).unwrap();
    assert_eq!(span.side, Side::Y);
    assert_eq!(e.renderer.pixel(0, H / 2), 0xFF_5555FF);
}

/*──────────────────────────── doors ────────────────────────────────*/

#[test]
fn door_round_trip_through_update() {
    let mut e = engine(&LevelDef::builtin(), TextureBank::new(), FLAT);
    // west door of the middle rooms is at (5, 7)
    look(&mut e, 4.5, 7.5, 0.0);

    let closed = e.cast_column(W / 2).unwrap();
    assert_eq!(closed.perp_dist, 0.5);
    assert!(e.level.grid().is_blocked(5.5, 7.5));

    assert_eq!(e.update(&press(), 0.016), Some(DoorEvent::Opened { x: 5, y: 7 }));
    assert_eq!(e.level.grid().tile(5, 7), Some(EMPTY));
    assert!(!e.level.grid().is_blocked(5.5, 7.5));
    // now the ray runs on to the east door at (9, 7)
    assert_eq!(e.cast_column(W / 2).unwrap().perp_dist, 4.5);

    // held key does nothing, release + press closes
    assert_eq!(e.update(&press(), 0.016), None);
    assert_eq!(e.update(&InputCmd::default(), 0.016), None);
    assert_eq!(e.update(&press(), 0.016), Some(DoorEvent::Closed { x: 5, y: 7 }));
    assert_eq!(e.level.grid().tile(5, 7), Some(5));
    assert_eq!(e.cast_column(W / 2), Some(closed));
}

#[test]
fn open_door_can_be_walked_through() {
    let mut e = engine(&LevelDef::builtin(), TextureBank::new(), FLAT);
    look(&mut e, 4.5, 7.5, 0.0);
    let walk = InputCmd {
        forward: 1.0,
        ..Default::default()
    };

    // closed: blocked
    e.update(&walk, 0.1);
    e.update(&walk, 0.1);
    assert!(e.camera.pos.x < 5.0);

    e.update(&press(), 0.0);
    e.update(&InputCmd::default(), 0.0);
    for _ in 0..4 {
        e.update(&walk, 0.1);
    }
    assert!(e.camera.pos.x > 5.0);
}

/*──────────────────────── special faces ────────────────────────────*/

/// Slot 2/3/6/7 hold uniform textures; the builtin pillar at (7, 3)
/// shows 6 north, 7 south, 3 west, 2 east.
fn face_bank() -> TextureBank {
    let mut bank = TextureBank::new();
    for (slot, color) in [(2, 0xFF_000002), (3, 0xFF_000003), (6, 0xFF_000006), (7, 0xFF_000007)] {
        let tex = Texture::new(format!("S{slot}"), 4, 4, vec![color; 16]).unwrap();
        bank.insert_at(slot, tex);
    }
    bank
}

fn centre_pixel(e: &mut Engine<Software>) -> u32 {
    render(e);
    e.renderer.pixel(W / 2, H / 2)
}

#[test]
fn pillar_north_and_south_faces_differ() {
    let mut e = engine(&LevelDef::builtin(), face_bank(), FLAT);

    look(&mut e, 7.5, 5.5, -FRAC_PI_2);
    assert_eq!(e.cast_column(W / 2).unwrap().tex_id, Some(6));
    assert_eq!(centre_pixel(&mut e), 0xFF_000006);

    look(&mut e, 7.5, 1.5, FRAC_PI_2);
    assert_eq!(e.cast_column(W / 2).unwrap().tex_id, Some(7));
    assert_eq!(centre_pixel(&mut e), 0xFF_000007);
}

#[test]
fn pillar_east_and_west_faces_differ() {
    let mut e = engine(&LevelDef::builtin(), face_bank(), FLAT);

    look(&mut e, 4.5, 3.5, 0.0);
    assert_eq!(e.cast_column(W / 2).unwrap().tex_id, Some(3));
    assert_eq!(centre_pixel(&mut e), 0xFF_000003);

    look(&mut e, 10.5, 3.5, PI);
    assert_eq!(e.cast_column(W / 2).unwrap().tex_id, Some(2));
    assert_eq!(centre_pixel(&mut e), 0xFF_000002);
}
