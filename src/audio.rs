use bevy::prelude::{Plugin as BevyPlugin, *};
use bevy_kira_audio::{Audio, AudioChannel as KiraChannel, AudioPlugin, AudioSource};
use enum_map::{enum_map, Enum, EnumMap};

use crate::umpire::SoundCue;

#[derive(Enum, Clone, Copy, Debug)]
enum Clip {
    Out,
    Run,
    Win,
    Lose,
    Tie,
}
impl Clip {
    fn path(self) -> &'static str {
        match self {
            Clip::Out => "sfx/out.wav",
            Clip::Run => "sfx/score.wav",
            Clip::Win => "sfx/Win.wav",
            Clip::Lose => "sfx/lose.wav",
            Clip::Tie => "sfx/tie.wav",
        }
    }
}

/// `run` holds the looping crowd sound, `event` the one-shot calls.
struct AudioChannels {
    run: KiraChannel,
    event: KiraChannel,
}
impl Default for AudioChannels {
    fn default() -> Self {
        Self {
            run: KiraChannel::new("run".to_owned()),
            event: KiraChannel::new("event".to_owned()),
        }
    }
}

struct AudioAssets {
    clips: EnumMap<Clip, Handle<AudioSource>>,
}
impl FromWorld for AudioAssets {
    fn from_world(world: &mut World) -> Self {
        let assets = world.get_resource::<AssetServer>().unwrap();
        Self { clips: enum_map! { clip => assets.load(clip.path()) } }
    }
}

fn play_audio(
    assets: Res<AudioAssets>,
    audio: Res<Audio>,
    channels: Res<AudioChannels>,
    mut events: EventReader<SoundCue>,
) {
    let play_event = |clip: Clip| {
        audio.play_in_channel(assets.clips[clip].clone(), &channels.event);
    };
    for cue in events.iter() {
        match cue {
            SoundCue::StartRunLoop => {
                audio.play_looped_in_channel(assets.clips[Clip::Run].clone(), &channels.run);
            }
            SoundCue::StopRunLoop => {
                audio.stop_channel(&channels.run);
            }
            SoundCue::Out => play_event(Clip::Out),
            SoundCue::Win => play_event(Clip::Win),
            SoundCue::Lose => play_event(Clip::Lose),
            SoundCue::Tie => play_event(Clip::Tie),
            SoundCue::StopAll => {
                audio.stop_channel(&channels.run);
                audio.stop_channel(&channels.event);
            }
        }
    }
}

pub struct Plugin {
    pub volume: f32,
}
impl BevyPlugin for Plugin {
    fn build(&self, app: &mut App) {
        let volume = self.volume;
        let set_volume = move |audio: Res<Audio>, channels: Res<AudioChannels>| {
            audio.set_volume_in_channel(volume, &channels.run);
            audio.set_volume_in_channel(volume, &channels.event);
        };
        app.add_plugin(AudioPlugin)
            .init_resource::<AudioChannels>()
            .init_resource::<AudioAssets>()
            .add_startup_system(set_volume)
            .add_system(play_audio);
    }
}
