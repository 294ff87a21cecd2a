//! Systems for running the session and syncing Bevy entities with it

use bevy::prelude::*;

use super::components::{CarBodyResource, MainCamera, PlayerCar, SessionResource};
use crate::simulation::CameraView;

/// System to run one simulation tick on the fixed timestep
pub fn tick_simulation(
    time: Res<Time>,
    mut session: ResMut<SessionResource>,
    mut body: ResMut<CarBodyResource>,
) {
    let delta = time.delta_secs();
    let snapshot = body.0.snapshot();

    match session.0.tick(delta, &snapshot) {
        Ok(output) => output.apply_to(&mut body.0),
        Err(e) => bevy::log::warn!("Simulation tick failed: {:#}", e),
    }
    body.0.integrate(delta);
}

/// System to move the car visual to the vehicle model's pose
pub fn sync_car(body: Res<CarBodyResource>, mut car_query: Query<&mut Transform, With<PlayerCar>>) {
    let car = &body.0;
    for mut transform in car_query.iter_mut() {
        transform.translation = Vec3::new(car.position.x, 0.5, car.position.z);
        transform.rotation = Quat::from_rotation_y(car.yaw);
    }
}

/// System to place the camera for the selected point of view
pub fn follow_car(
    session: Res<SessionResource>,
    body: Res<CarBodyResource>,
    mut camera_query: Query<&mut Transform, (With<MainCamera>, Without<PlayerCar>)>,
) {
    let car = &body.0;
    let (fx, fz) = car.forward();
    let forward = Vec3::new(fx, 0.0, fz);
    let chassis = Vec3::new(car.position.x, 0.5, car.position.z);

    let (eye, target) = match session.0.camera() {
        CameraView::Chase => (
            chassis - forward * 12.0 + Vec3::Y * 5.0,
            chassis + forward * 10.0,
        ),
        CameraView::TCam => (
            chassis + Vec3::Y * 1.3,
            chassis + forward * 30.0 + Vec3::Y * 1.0,
        ),
    };

    for mut transform in camera_query.iter_mut() {
        *transform = Transform::from_translation(eye).looking_at(target, Vec3::Y);
    }
}
