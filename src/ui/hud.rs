//! Heads-up display: lap counter, lap times, speedometer and best-lap banner

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::components::{BestLapBanner, HudText, SessionResource, BEST_LAP_BANNER_SECS};
use crate::simulation::LAP_TIME_PLACEHOLDER;

/// System to setup the HUD panels
pub fn setup_hud(mut commands: Commands) {
    // Lap counter at top-left of screen
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(20.0),
                left: Val::Px(20.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("LAP 0"),
                TextFont {
                    font_size: 17.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                HudText::LapCounter,
            ));
        });

    // Current and best lap at top-right
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(20.0),
                right: Val::Px(20.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        ))
        .with_children(|parent| {
            spawn_labelled_time(parent, "CURRENT", HudText::CurrentLap);
            spawn_labelled_time(parent, "BEST", HudText::BestLap);
        });

    // Speedometer at bottom-right
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(20.0),
                right: Val::Px(20.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("0 MPH"),
                TextFont {
                    font_size: 17.0,
                    ..default()
                },
                TextColor(Color::srgb(0.0, 1.0, 0.0)),
                HudText::Speed,
            ));
        });

    // Best lap banner, hidden until a record is set
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            left: Val::Percent(40.0),
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        Visibility::Hidden,
        BestLapBanner::default(),
    ));
}

fn spawn_labelled_time(parent: &mut ChildSpawnerCommands, header: &str, kind: HudText) {
    parent.spawn((
        Text::new(header),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::WHITE),
    ));
    parent.spawn((
        Text::new(LAP_TIME_PLACEHOLDER),
        TextFont {
            font_size: 17.0,
            ..default()
        },
        TextColor(Color::WHITE),
        kind,
    ));
}

/// System to refresh the HUD text from the session
pub fn update_hud_text(
    session: Res<SessionResource>,
    mut text_query: Query<(&HudText, &mut Text, &mut TextColor)>,
) {
    let hud = session.0.hud();

    for (kind, mut text, mut color) in text_query.iter_mut() {
        match kind {
            HudText::LapCounter => **text = hud.lap_label.clone(),
            HudText::CurrentLap => **text = hud.current_lap.clone(),
            HudText::BestLap => **text = hud.best_lap.clone(),
            HudText::Speed => {
                **text = format!("{} MPH", hud.speed_mph);
                // Green when slow, red near the top of the gauge
                color.0 = Color::srgb(hud.speed_ratio, 1.0 - hud.speed_ratio, 0.0);
            }
        }
    }
}

/// System to show the banner when the session reports a new best lap
pub fn show_best_lap_banner(
    mut session: ResMut<SessionResource>,
    mut banner_query: Query<(&mut BestLapBanner, &mut Text, &mut Visibility)>,
) {
    let Some(best) = session.0.drain_best_lap_events().pop() else {
        return;
    };

    bevy::log::info!("New lap record: {}", best.formatted);
    for (mut banner, mut text, mut visibility) in banner_query.iter_mut() {
        **text = format!("New Lap Record!\n{}", best.formatted);
        banner.remaining_secs = BEST_LAP_BANNER_SECS;
        *visibility = Visibility::Visible;
    }
}

/// System to hide the banner once its time is up
pub fn expire_best_lap_banner(
    time: Res<Time>,
    mut banner_query: Query<(&mut BestLapBanner, &mut Visibility)>,
) {
    for (mut banner, mut visibility) in banner_query.iter_mut() {
        if banner.remaining_secs <= 0.0 {
            continue;
        }
        banner.remaining_secs -= time.delta_secs();
        if banner.remaining_secs <= 0.0 {
            *visibility = Visibility::Hidden;
        }
    }
}
