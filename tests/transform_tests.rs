//! Transform and camera behaviour through the public API.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use terrain_raster::camera::{Camera, CameraController, Transform};
use terrain_raster::config::{MOVE_SPEED, PITCH_LIMIT_DEGREES, ROTATION_SPEED};
use terrain_raster::math::DVec3;

fn random_vec(rng: &mut ChaCha8Rng, extent: f64) -> DVec3 {
    DVec3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

#[test]
fn world_local_round_trip() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);

    for _ in 0..1000 {
        let scale = DVec3::new(
            rng.gen_range(0.25..4.0),
            rng.gen_range(0.25..4.0),
            rng.gen_range(0.25..4.0),
        );
        let transform = Transform::new(random_vec(&mut rng, 50.0))
            .with_rotation(
                rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI),
                rng.gen_range(-1.5..1.5),
            )
            .with_scale(scale);
        let p = random_vec(&mut rng, 20.0);

        let back = transform.to_local_point(transform.to_world_point(p));
        assert!((back - p).length() < 1e-9, "{p:?} came back as {back:?}");

        let forward = transform.to_world_point(transform.to_local_point(p));
        assert!((forward - p).length() < 1e-9);
    }
}

#[test]
fn basis_stays_orthonormal() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..200 {
        let t = Transform::default()
            .with_rotation(rng.gen_range(-6.0..6.0), rng.gen_range(-1.5..1.5));
        let b = t.basis();
        for v in [b.ihat, b.jhat, b.khat] {
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
        assert!(b.ihat.dot(b.jhat).abs() < 1e-12);
        assert!(b.jhat.dot(b.khat).abs() < 1e-12);
        assert!((b.ihat.cross(b.jhat) - b.khat).length() < 1e-12);
    }
}

#[test]
fn setters_refresh_cached_bases() {
    let mut t = Transform::default();
    t.set_yaw(0.7);
    t.set_pitch(-0.3);
    assert_eq!(t.basis(), Transform::default().with_rotation(0.7, -0.3).basis());

    // the cached inverse undoes the cached basis
    let v = DVec3::new(0.2, -1.0, 3.0);
    let rotated = t.basis().apply(v);
    assert!((t.inverse_basis().apply(rotated) - v).length() < 1e-12);
}

#[test]
fn pitch_up_tilts_the_view_up() {
    let t = Transform::default().with_rotation(0.0, 0.5);
    assert!(t.forward().y > 0.0);
    assert!((t.right() - DVec3::X).length() < 1e-12);
}

#[test]
fn held_keys_accumulate_per_frame() {
    let mut camera = Camera::default();
    let controller = CameraController {
        pitch_up_pressed: true,
        up_pressed: true,
        ..Default::default()
    };

    for _ in 0..10 {
        controller.update_camera(&mut camera);
    }
    assert!((camera.transform.pitch() - 10.0 * ROTATION_SPEED).abs() < 1e-12);
    assert!((camera.position().y - 10.0 * MOVE_SPEED).abs() < 1e-12);

    for _ in 0..100 {
        controller.update_camera(&mut camera);
    }
    assert!((camera.transform.pitch() - PITCH_LIMIT_DEGREES.to_radians()).abs() < 1e-12);
}

#[test]
fn opposite_keys_cancel() {
    let mut camera = Camera::default();
    let controller = CameraController {
        forward_pressed: true,
        backward_pressed: true,
        left_pressed: true,
        right_pressed: true,
        yaw_left_pressed: true,
        yaw_right_pressed: true,
        ..Default::default()
    };
    controller.update_camera(&mut camera);
    assert_eq!(camera.position(), DVec3::ZERO);
    assert_eq!(camera.transform.yaw(), 0.0);
}
