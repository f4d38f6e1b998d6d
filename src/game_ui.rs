//! Heads-up display of the current [`Scoreboard`].
use bevy::prelude::{Plugin as BevyPlugin, *};
use bevy_ui_build_macros::{size, style, unit};

use crate::{cricket::Innings, umpire::Scoreboard};

fn light_green() -> Color {
    Color::rgb_u8(200, 255, 200)
}

pub struct HudAssets {
    pub font: Handle<Font>,
}
impl FromWorld for HudAssets {
    fn from_world(world: &mut World) -> Self {
        let assets = world.get_resource::<AssetServer>().unwrap();
        Self { font: assets.load("fonts/FiraSans-Bold.ttf") }
    }
}
impl HudAssets {
    pub fn text(&self, content: &str, font_size: f32, color: Color) -> TextBundle {
        let style = TextStyle { color, font: self.font.clone(), font_size };
        let text = Text::with_section(content, style, TextAlignment::default());
        TextBundle { text, ..Default::default() }
    }
}

/// Which part of the [`Scoreboard`] a text shows.
#[derive(Component, Clone, Copy)]
enum HudLine {
    Clock,
    Target,
    BallSummary,
    Status,
    Score,
    RoundInnings,
    Instructions,
}
impl HudLine {
    fn color(self) -> Color {
        match self {
            HudLine::Clock | HudLine::RoundInnings => Color::WHITE,
            HudLine::Target => Color::rgb_u8(100, 200, 255),
            HudLine::Score => Color::rgb_u8(255, 200, 100),
            HudLine::BallSummary | HudLine::Status | HudLine::Instructions => light_green(),
        }
    }
    fn font_size(self) -> f32 {
        match self {
            HudLine::Instructions => 36.0,
            _ => 42.0,
        }
    }
    fn content(self, board: &Scoreboard) -> String {
        let state = &board.state;
        match self {
            HudLine::Clock => format!("Clock: {}", board.clock),
            HudLine::Target => match (state.innings, state.target) {
                (Innings::Second, Some(target)) => format!("Target: {}", target + 1),
                _ => String::new(),
            },
            HudLine::BallSummary => board.ball_summary.clone(),
            HudLine::Status => board.status.clone(),
            HudLine::Score => {
                format!("You: {} | Computer: {}", state.player_score, state.computer_score)
            }
            HudLine::RoundInnings => {
                format!("Round: {} | Innings: {}", state.round, state.innings.number())
            }
            HudLine::Instructions => board.instructions.to_owned(),
        }
    }
}

fn spawn_hud(mut cmds: Commands, hud: Res<HudAssets>) {
    let line = |line: HudLine| hud.text("", line.font_size(), line.color());
    cmds.spawn_bundle(UiCameraBundle::default());
    cmds.spawn_bundle(NodeBundle {
        color: Color::NONE.into(),
        style: style! {
            size: size!(100 pct, 100 pct),
            flex_direction: FlexDirection::ColumnReverse,
            justify_content: JustifyContent::SpaceBetween,
        },
        ..Default::default()
    })
    .insert(Name::new("Hud"))
    .with_children(|root| {
        root.spawn_bundle(NodeBundle {
            color: Color::rgba(0.0, 0.0, 0.0, 0.4).into(),
            style: style! {
                flex_direction: FlexDirection::ColumnReverse,
                padding: Rect::all(Val::Px(30.0)),
            },
            ..Default::default()
        })
        .with_children(|panel| {
            let mut title = hud.text("HAND CRICKET", 80.0, light_green());
            title.style.align_self = AlignSelf::Center;
            panel.spawn_bundle(title);
            panel
                .spawn_bundle(NodeBundle {
                    color: Color::NONE.into(),
                    style: style! { justify_content: JustifyContent::SpaceBetween, },
                    ..Default::default()
                })
                .with_children(|row| {
                    row.spawn_bundle(NodeBundle {
                        color: Color::NONE.into(),
                        style: style! { flex_direction: FlexDirection::ColumnReverse, },
                        ..Default::default()
                    })
                    .with_children(|info| {
                        use HudLine::*;
                        for kind in [Clock, Target, BallSummary, Status, Score] {
                            info.spawn_bundle(line(kind)).insert(kind);
                        }
                    });
                    row.spawn_bundle(line(HudLine::RoundInnings)).insert(HudLine::RoundInnings);
                });
        });
        root.spawn_bundle(NodeBundle {
            color: Color::rgb_u8(50, 50, 50).into(),
            style: style! {
                size: size!(100 pct, 10 pct),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
            },
            ..Default::default()
        })
        .insert(Name::new("Instruction bar"))
        .with_children(|bar| {
            bar.spawn_bundle(line(HudLine::Instructions)).insert(HudLine::Instructions);
        });
    });
}

fn update_hud(board: Res<Scoreboard>, mut lines: Query<(&mut Text, &HudLine)>) {
    if !board.is_changed() {
        return;
    }
    for (mut text, line) in lines.iter_mut() {
        text.sections[0].value = line.content(&board);
    }
}

pub struct Plugin;
impl BevyPlugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudAssets>()
            .add_startup_system(spawn_hud)
            .add_system(update_hud);
    }
}
