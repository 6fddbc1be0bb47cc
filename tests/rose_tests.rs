// Host-side tests for the rose geometry, bloom animation and camera rig.

use rose_core::constants::{DESKTOP_CAMERA, MOBILE_CAMERA};
use rose_core::ease::damp;
use rose_core::{
    camera_for_viewport, petal_mesh, petal_point, BloomProgress, CameraPreset, PetalInstance,
    Rose, Scene, SceneParams,
};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI, TAU};

const EPS: f32 = 1e-4;

fn wrap_angle(a: f32) -> f32 {
    a.rem_euclid(TAU)
}

fn angle_close(a: f32, b: f32) -> bool {
    let d = wrap_angle(a - b);
    d < EPS || TAU - d < EPS
}

#[test]
fn rotation_stays_between_closed_and_open_targets() {
    for layer in 0..=7 {
        let petal = PetalInstance::new(0, 5, layer);
        let open = petal.open_rotation();
        let (lo, hi) = if open < 0.5 { (open, 0.5) } else { (0.5, open) };
        let mut prev = None;
        for step in 0..=100 {
            let bloom = step as f32 / 100.0;
            let r = petal.pose(bloom, 0.0).rotation_x;
            assert!(r >= lo - EPS && r <= hi + EPS, "layer {layer} bloom {bloom}: {r}");
            // Monotone toward the open target
            if let Some(p) = prev {
                let toward_open = (open - 0.5).signum();
                assert!((r - p) * toward_open >= -EPS);
            }
            prev = Some(r);
        }
    }
}

#[test]
fn bloom_progress_never_decreases_or_exceeds_one() {
    let mut bloom = BloomProgress::default();
    let mut last = bloom.value();
    for i in 0..5000 {
        let dt = if i % 7 == 0 { 0.5 } else { 1.0 / 60.0 };
        bloom.advance(dt);
        let v = bloom.value();
        assert!(v >= last);
        assert!(v <= 1.0);
        last = v;
    }
    assert!(last > 0.99, "bloom should approach 1, got {last}");
}

#[test]
fn damp_never_overshoots() {
    for &dt in &[0.0, 0.001, 1.0 / 60.0, 0.5, 10.0, 1e6] {
        let v = damp(0.2, 1.0, 0.1, dt);
        assert!((0.2..=1.0).contains(&v), "dt {dt}: {v}");
        let v = damp(1.0, -1.0, 3.0, dt);
        assert!((-1.0..=1.0).contains(&v), "dt {dt}: {v}");
    }
}

#[test]
fn petals_in_one_layer_are_evenly_spaced() {
    let total = 7;
    for layer in [0, 3, 7] {
        for i in 0..total {
            let a = PetalInstance::new(i, total, layer).angle;
            let b = PetalInstance::new((i + 1) % total, total, layer).angle;
            assert!(angle_close(b - a, TAU / total as f32), "layer {layer} i {i}");
        }
    }
}

#[test]
fn adjacent_layers_are_offset_by_the_golden_angle() {
    for layer in 0..7 {
        let a = PetalInstance::new(2, 6, layer).angle;
        let b = PetalInstance::new(2, 6, layer + 1).angle;
        assert!(angle_close(b - a, PI * 0.618), "layer {layer}");
    }
}

#[test]
fn petal_surface_is_deterministic_and_pinched_at_the_base() {
    for i in 0..=10 {
        let u = i as f32 / 10.0;
        assert_eq!(petal_point(u, 0.37), petal_point(u, 0.37));
        let base = petal_point(u, 0.0);
        assert!(base.x.abs() < EPS, "u {u}: x {}", base.x);
        // Only the edge ruffle may move the base off the axis, and it is scaled by v
        assert!(base.z.abs() < EPS, "u {u}: z {}", base.z);
    }
}

#[test]
fn closed_bud_and_fully_open_rotations() {
    for layer in 0..=7 {
        let petal = PetalInstance::new(1, 4, layer);
        assert_eq!(petal.pose(0.0, 3.0).rotation_x, 0.5, "layer {layer}");
    }
    let outer = PetalInstance::new(0, 12, 7).pose(1.0, 0.0).rotation_x;
    assert!((outer - -0.8).abs() < EPS, "outer {outer}");
    for layer in 0..2 {
        let inner = PetalInstance::new(0, 3, layer).pose(1.0, 0.0).rotation_x;
        assert!((inner - 0.2).abs() < EPS, "layer {layer}: {inner}");
    }
}

#[test]
fn camera_distance_follows_the_breakpoint() {
    assert_eq!(camera_for_viewport(768.0).z, 7.0);
    assert_eq!(camera_for_viewport(1920.0).z, 7.0);
    assert_eq!(camera_for_viewport(767.9).z, 10.0);
    assert_eq!(camera_for_viewport(320.0).z, 10.0);
    assert_eq!(CameraPreset::for_width(767.0), CameraPreset::Mobile);
}

#[test]
fn default_mesh_has_expected_topology() {
    let mesh = petal_mesh().expect("default tessellation is valid");
    assert_eq!(mesh.vertices.len(), 21 * 21);
    assert_eq!(mesh.indices.len(), 20 * 20 * 6);
    for v in &mesh.vertices {
        let n = glam::Vec3::from(v.normal);
        assert!((n.length() - 1.0).abs() < 1e-3, "normal {n:?}");
    }
}

#[test]
fn rose_has_one_transform_per_petal() {
    let mut rose = Rose::new();
    assert_eq!(rose.petals().len(), 3 + 4 + 5 + 6 + 7 + 8 + 10 + 12);
    rose.update(1.0 / 60.0, 1.0 / 60.0);
    assert_eq!(rose.petal_transforms().len(), rose.petals().len());
}

#[test]
fn scene_opens_the_rose_over_time() {
    let mut scene = Scene::new(SceneParams::default(), 1280.0, 720.0).expect("defaults are valid");
    let before = scene.rose.bloom().value();
    for _ in 0..600 {
        scene.update(1.0 / 60.0);
    }
    assert!(scene.rose.bloom().value() > before);
    assert!((scene.elapsed() - 10.0).abs() < 1e-2);
}

fn polar_of(scene: &Scene) -> f32 {
    let camera = scene.camera();
    let offset = camera.eye - camera.target;
    (offset.y / offset.length()).acos()
}

#[test]
fn orbit_polar_angle_stays_in_band_after_any_drag() {
    let mut scene = Scene::new(SceneParams::default(), 1280.0, 720.0).expect("defaults are valid");
    let drags = [
        (0.0, 1.0e6),
        (0.0, -1.0e6),
        (350.0, 40.0),
        (-20.0, -900.0),
        (5.0, 3.0),
        (0.0, 720.0),
    ];
    for &(dx, dy) in &drags {
        scene.drag(dx, dy, 720.0);
        scene.update(1.0 / 60.0);
        let polar = polar_of(&scene);
        assert!(
            polar >= FRAC_PI_3 - EPS && polar <= FRAC_PI_2 + EPS,
            "drag ({dx}, {dy}): polar {polar}"
        );
    }
    scene.drag(0.0, 1.0e6, 720.0);
    assert!((polar_of(&scene) - FRAC_PI_3).abs() < 1e-3);
    scene.drag(0.0, -1.0e6, 720.0);
    assert!((polar_of(&scene) - FRAC_PI_2).abs() < 1e-3);
}

#[test]
fn resize_moves_the_camera_only_across_the_breakpoint() {
    let mut scene = Scene::new(SceneParams::default(), 1280.0, 720.0).expect("defaults are valid");
    assert_eq!(scene.preset(), CameraPreset::Desktop);
    assert!((scene.camera().eye - DESKTOP_CAMERA).length() < 1e-4);

    // Same breakpoint class keeps a dragged camera where the user left it
    scene.drag(120.0, 0.0, 720.0);
    let dragged = scene.camera().eye;
    scene.resize(1024.0, 700.0);
    assert_eq!(scene.preset(), CameraPreset::Desktop);
    assert!((scene.camera().eye - dragged).length() < 1e-4);
    assert!((scene.camera().aspect - 1024.0 / 700.0).abs() < 1e-5);

    scene.resize(500.0, 800.0);
    assert_eq!(scene.preset(), CameraPreset::Mobile);
    assert!((scene.camera().eye - MOBILE_CAMERA).length() < 1e-4);

    scene.resize(600.0, 800.0);
    assert!((scene.camera().eye - MOBILE_CAMERA).length() < 1e-4);

    scene.resize(768.0, 800.0);
    assert_eq!(scene.preset(), CameraPreset::Desktop);
    assert!((scene.camera().eye - DESKTOP_CAMERA).length() < 1e-4);
}
