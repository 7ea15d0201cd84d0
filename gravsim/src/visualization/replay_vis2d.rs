//! Bevy replay window
//!
//! Left half: body trajectories with trails. Right half: two panels with
//! each body's `Ax` and `Ux` against time, drawn up to the replay cursor.

use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::{PrimaryWindow, WindowResolution};

use super::replay::{Replay, Series};

#[derive(Component)]
struct BodyIndex(pub usize);

#[derive(Resource)]
struct ReplayState {
    replay: Replay,
    colors: Vec<Color>,
}

const BODY_RADIUS: f32 = 5.0;
const WINDOW_WIDTH: f32 = 1520.0;
const WINDOW_HEIGHT: f32 = 760.0;
const TRAJECTORY_ORIGIN: Vec2 = Vec2::new(-380.0, 0.0);
const PANEL_SIZE: Vec2 = Vec2::new(680.0, 300.0);

/// Centre of the panel for `kind`; Ax on top, Ux below
fn panel_center(kind: Series) -> Vec2 {
    match kind {
        Series::Ax => Vec2::new(380.0, 180.0),
        Series::Ux => Vec2::new(380.0, -190.0),
    }
}

pub fn run_replay(replay: Replay) {
    let n = replay.bodies();
    let colors = (0..n)
        .map(|i| Color::hsl(360.0 * i as f32 / n.max(1) as f32, 0.75, 0.6))
        .collect();

    App::new()
        .insert_resource(ReplayState { replay, colors })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "gravsim".to_string(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, (setup_bodies_system, setup_panels_system))
        .add_systems(
            Update,
            (advance_system, sync_transforms_system, trail_system, series_system, title_system).chain(),
        )
        .run();
}

fn trajectory_point(state: &ReplayState, p: &crate::simulation::states::NVec2) -> Vec2 {
    let (x, y) = state.replay.to_screen(p);
    TRAJECTORY_ORIGIN + Vec2::new(x, y)
}

fn setup_bodies_system(mut commands: Commands, state: Res<ReplayState>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    info!("replaying {} frames of {} bodies", state.replay.len(), state.replay.bodies());

    // 2D camera
    commands.spawn(Camera2dBundle::default());

    let Some(first) = state.replay.current() else {
        warn!("trace is empty, nothing to replay");
        return;
    };

    for (i, p) in first.positions.iter().enumerate() {
        let at = trajectory_point(&state, p);
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(BODY_RADIUS))),
                material: materials.add(ColorMaterial::from(state.colors[i])),
                transform: Transform::from_xyz(at.x, at.y, 1.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn setup_panels_system(mut commands: Commands) {
    for kind in Series::ALL {
        let top = panel_center(kind) + Vec2::new(0.0, 0.5 * PANEL_SIZE.y + 14.0);
        commands.spawn(Text2dBundle {
            text: Text::from_section(
                kind.label(),
                TextStyle {
                    font_size: 18.0,
                    color: Color::WHITE,
                    ..default()
                },
            ),
            transform: Transform::from_xyz(top.x, top.y, 1.0),
            ..default()
        });
    }
}

fn advance_system(mut state: ResMut<ReplayState>) {
    state.replay.advance();
}

fn sync_transforms_system(state: Res<ReplayState>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let Some(frame) = state.replay.current() else {
        return;
    };
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(p) = frame.positions.get(*i) {
            let at = trajectory_point(&state, p);
            transform.translation.x = at.x;
            transform.translation.y = at.y;
        }
    }
}

fn trail_system(state: Res<ReplayState>, mut gizmos: Gizmos) {
    for (i, color) in state.colors.iter().enumerate() {
        let points = state.replay.trail(i).map(|p| trajectory_point(&state, &p));
        gizmos.linestrip_2d(points, *color);
    }
}

fn series_system(state: Res<ReplayState>, mut gizmos: Gizmos) {
    for kind in Series::ALL {
        let center = panel_center(kind);
        gizmos.rect_2d(center, 0.0, PANEL_SIZE, Color::srgb(0.4, 0.4, 0.4));

        for (i, color) in state.colors.iter().enumerate() {
            let points = state.replay.series(i, kind).map(|(t, v)| {
                let (u, w) = state.replay.to_plot(kind, t, v);
                center + (Vec2::new(u, w) - Vec2::splat(0.5)) * PANEL_SIZE
            });
            gizmos.linestrip_2d(points, *color);
        }
    }
}

fn title_system(state: Res<ReplayState>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let (Some(frame), Ok(mut window)) = (state.replay.current(), windows.get_single_mut()) {
        window.title = format!("Time: {:.6} sec", frame.time);
    }
}
