//! World setup systems for camera, lighting, ground, circuit and car

use bevy::prelude::*;

use super::components::{CarBodyResource, Ground, MainCamera, PlayerCar};
use crate::simulation::{Circuit, LAP_ZONE_ALONG_TRACK};

/// System to setup the world environment
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    body: Res<CarBodyResource>,
) {
    // Placed every frame by `follow_car`
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 8.0, -45.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(40.0, 80.0, 40.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(600.0, 600.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(100.0, 0.0, 0.0),
    ));

    // Track surface: one flat tile per waypoint
    let tile = meshes.add(Cuboid::new(12.0, 0.05, 12.0));
    let asphalt = materials.add(Color::srgb(0.2, 0.2, 0.22));
    for waypoint in Circuit::default().waypoints() {
        commands.spawn((
            Mesh3d(tile.clone()),
            MeshMaterial3d(asphalt.clone()),
            Transform::from_xyz(waypoint.x, 0.025, waypoint.z),
        ));
    }

    // Start/finish line across the main straight, spanning the lap zone window
    let (min_x, max_x) = LAP_ZONE_ALONG_TRACK;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(max_x - min_x, 0.06, 1.0))),
        MeshMaterial3d(materials.add(Color::srgba(1.0, 1.0, 1.0, 0.3))),
        Transform::from_xyz((min_x + max_x) / 2.0, 0.03, 0.0),
    ));

    let car = &body.0;
    commands.spawn((
        PlayerCar,
        Mesh3d(meshes.add(Cuboid::new(1.8, 0.8, 4.2))),
        MeshMaterial3d(materials.add(Color::srgb(0.8, 0.1, 0.1))),
        Transform::from_xyz(car.position.x, 0.5, car.position.z)
            .with_rotation(Quat::from_rotation_y(car.yaw)),
    ));
}
