#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
use super::DebugState;
#[cfg(feature = "debug")]
use crate::core::components::Ball;
#[cfg(feature = "debug")]
use crate::device::collector::{OrientationCollector, ORIENTATION_STEPS};
#[cfg(feature = "debug")]
use crate::device::events::Arm;
#[cfg(feature = "debug")]
use crate::sync::pairing::PairingTable;

#[cfg(feature = "debug")]
#[derive(Component)]
pub(crate) struct DebugOverlayText;

#[cfg(feature = "debug")]
#[derive(Component)]
pub(crate) struct DebugToggleButton;

#[cfg(feature = "debug")]
#[allow(dead_code)]
pub(crate) fn debug_overlay_spawn(mut commands: Commands) {
    // Top-left anchored UI text node; default font.
    commands.spawn((
        Text::new(String::new()),
        TextFont {
            font_size: 13.0,
            ..Default::default()
        },
        TextColor(Color::WHITE),
        bevy::ui::Node {
            position_type: bevy::ui::PositionType::Absolute,
            top: Val::Px(4.0),
            left: Val::Px(6.0),
            ..Default::default()
        },
        DebugOverlayText,
    ));

    // Wireframe toggle button, top-right (the classic debug-draw button).
    commands
        .spawn((
            Button,
            bevy::ui::Node {
                position_type: bevy::ui::PositionType::Absolute,
                top: Val::Px(4.0),
                right: Val::Px(6.0),
                padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                ..Default::default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.6)),
            DebugToggleButton,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("debug"),
                TextFont {
                    font_size: 12.0,
                    ..Default::default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

#[cfg(feature = "debug")]
pub(crate) fn debug_toggle_button_interact(
    mut q_btn: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<DebugToggleButton>),
    >,
    mut state: ResMut<DebugState>,
) {
    for (interaction, mut bg) in q_btn.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                state.wireframe = !state.wireframe;
                *bg = BackgroundColor(Color::srgba(0.15, 0.15, 0.25, 0.8));
            }
            Interaction::Hovered => {
                *bg = BackgroundColor(Color::srgba(0.08, 0.08, 0.12, 0.7));
            }
            Interaction::None => {
                *bg = BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.6));
            }
        }
    }
}

/// Orientation bar in the band-SDK console style: `[****      ]`.
#[cfg(feature = "debug")]
fn orientation_bar(value: i32) -> String {
    let filled = value.clamp(0, ORIENTATION_STEPS) as usize;
    format!(
        "[{}{}]",
        "*".repeat(filled),
        " ".repeat(ORIENTATION_STEPS as usize - filled)
    )
}

#[cfg(feature = "debug")]
pub(crate) fn device_status_line(collector: &OrientationCollector) -> String {
    let mut line = format!(
        "{}{}{}",
        orientation_bar(collector.roll_w),
        orientation_bar(collector.pitch_w),
        orientation_bar(collector.yaw_w),
    );
    if collector.on_arm {
        let arm = match collector.arm {
            Some(Arm::Left) => "L",
            Some(Arm::Right) => "R",
            None => "?",
        };
        line.push_str(&format!("[{arm}][{:<14}]", collector.pose.label()));
    } else {
        line.push_str("[?][              ]");
    }
    line
}

#[cfg(feature = "debug")]
pub(crate) fn debug_overlay_update(
    state: Res<DebugState>,
    collector: Res<OrientationCollector>,
    pairing: Res<PairingTable>,
    q_balls: Query<(), With<Ball>>,
    mut q_text: Query<&mut Text, With<DebugOverlayText>>,
) {
    if let Ok(mut text) = q_text.single_mut() {
        if !state.overlay_visible {
            text.0.clear();
            return;
        }
        text.0 = format!(
            "balls {} pairs {} wireframe {}\n{}",
            q_balls.iter().len(),
            pairing.len(),
            if state.wireframe { "on" } else { "off" },
            device_status_line(&collector),
        );
    }
}

#[cfg(all(test, feature = "debug"))]
mod tests {
    use super::*;
    use crate::device::events::Pose;

    #[test]
    fn bar_fills_left_to_right() {
        assert_eq!(orientation_bar(0), format!("[{}]", " ".repeat(18)));
        assert_eq!(orientation_bar(18), format!("[{}]", "*".repeat(18)));
        assert_eq!(orientation_bar(3), "[***               ]");
    }

    #[test]
    fn status_line_shows_arm_and_pose_when_recognized() {
        let mut c = OrientationCollector::default();
        c.on_arm = true;
        c.arm = Some(Arm::Left);
        c.pose = Pose::Fist;
        let line = device_status_line(&c);
        assert!(line.contains("[L][fist          ]"), "line: {line}");
    }

    #[test]
    fn status_line_placeholder_without_arm() {
        let line = device_status_line(&OrientationCollector::default());
        assert!(line.ends_with("[?][              ]"), "line: {line}");
    }
}
