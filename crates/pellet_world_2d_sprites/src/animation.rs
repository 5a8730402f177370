use std::ops::{Deref, DerefMut};

use nalgebra::{Point2, Vector2};
use pellet_assets::{Animation, AnimationKey, Atlas, Playback, RegionKey};
use pellet_renderer_2d::DrawTarget;

use crate::sprites::{Appearance, Sprite};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Playing,
    Paused,
}

/// Notifications produced while advancing an [`AnimatedSprite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The displayed frame changed.
    FrameChanged { from: usize, to: usize },
    /// Playback wrapped around to the first frame.
    Looped,
    /// A [`Playback::Once`] animation ran past its last frame and paused.
    Finished,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Frame {
    index: usize,
    // Ping-pong direction
    reversed: bool,
}

fn next_frame(animation: &Animation, playback: Playback, frame: Frame) -> Frame {
    let is_last_frame = animation.is_last_frame(frame.index);

    match playback {
        Playback::Loop => Frame {
            index: match is_last_frame {
                true => 0,
                false => frame.index + 1,
            },
            reversed: false,
        },
        Playback::PingPong => {
            let reversed = is_last_frame || (frame.reversed && frame.index > 0);
            Frame {
                index: match reversed {
                    true => frame.index - 1,
                    false => frame.index + 1,
                },
                reversed,
            }
        }
        Playback::Once => Frame {
            index: (frame.index + 1).min(animation.last_frame()),
            reversed: false,
        },
    }
}

/// Time after which a repeating playback is back on the same frame, heading
/// the same way. `None` for playback which ends.
fn cycle_duration(animation: &Animation, playback: Playback) -> Option<f32> {
    let frames = animation.frames();
    match playback {
        Playback::Loop => Some(animation.total_duration()),
        // 0, 1, .., n-1, n-2, .., 1, and again from 0
        Playback::PingPong if frames.len() > 1 => Some(
            animation.total_duration()
                + frames[1..frames.len() - 1]
                    .iter()
                    .map(|f| f.duration)
                    .sum::<f32>(),
        ),
        Playback::PingPong => Some(animation.total_duration()),
        Playback::Once => None,
    }
}

/// A [`Sprite`] whose region is driven by an animation.
///
/// The region of the inner sprite always matches the animation frame at
/// the current index. Placement is reachable through `Deref` to
/// [`Appearance`], the region itself only changes through playback.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedSprite {
    sprite: Sprite,
    animation: AnimationKey,
    first_region: RegionKey,
    playback: Playback,
    frame: Frame,
    elapsed: f32,
    state: PlaybackState,
    finished: bool,
}

impl AnimatedSprite {
    /// Starts playing `animation` from its first frame.
    pub fn new<T>(atlas: &Atlas<T>, animation: AnimationKey) -> Self {
        let definition = atlas.animation_by_key(animation);
        let first_region = definition.frame(0).region;

        Self {
            sprite: Sprite::new(first_region),
            animation,
            first_region,
            playback: definition.playback(),
            frame: Frame::default(),
            elapsed: 0.,
            state: PlaybackState::Playing,
            finished: false,
        }
    }

    pub fn animation(&self) -> AnimationKey {
        self.animation
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn region(&self) -> RegionKey {
        self.sprite.region()
    }

    pub fn frame_index(&self) -> usize {
        self.frame.index
    }

    /// Time spent on the current frame, in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// True once a [`Playback::Once`] animation has run past its last frame.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    /// Overrides the playback mode of this instance only.
    /// The animation in the atlas keeps its declared mode.
    pub fn set_playback(&mut self, playback: Playback) {
        self.playback = playback;
        if playback != Playback::PingPong {
            self.frame.reversed = false;
        }
    }

    pub fn is_looping(&self) -> bool {
        self.playback != Playback::Once
    }

    /// `false` switches to [`Playback::Once`]. `true` switches a
    /// non-looping instance to [`Playback::Loop`] and keeps ping-pong as is.
    pub fn set_looping(&mut self, looping: bool) {
        match (looping, self.playback) {
            (false, _) => self.set_playback(Playback::Once),
            (true, Playback::Once) => self.set_playback(Playback::Loop),
            (true, _) => {}
        }
    }

    /// Resumes playback. A finished animation starts over from its first frame.
    pub fn play(&mut self) {
        if self.finished {
            self.frame = Frame::default();
            self.elapsed = 0.;
            self.finished = false;
            self.sprite.set_region(self.first_region);
        }
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    /// Rewinds to the first frame and resumes playback.
    pub fn restart<T>(&mut self, atlas: &Atlas<T>) {
        self.rewind(atlas.animation_by_key(self.animation));
        self.state = PlaybackState::Playing;
    }

    /// Jumps to `index`, clamped to the last frame, and resets the frame timer.
    /// The playback state is left as is.
    pub fn set_frame<T>(&mut self, atlas: &Atlas<T>, index: usize) {
        let animation = atlas.animation_by_key(self.animation);
        self.frame = Frame {
            index: index.min(animation.last_frame()),
            reversed: false,
        };
        self.elapsed = 0.;
        self.finished = false;
        self.sync_region(animation);
    }

    /// Switches to another animation and restarts it, taking over its declared
    /// playback mode. Does nothing if `animation` is already playing, so it is
    /// safe to call every tick.
    pub fn play_animation<T>(&mut self, atlas: &Atlas<T>, animation: AnimationKey) {
        if self.animation == animation {
            return;
        }

        log::trace!("Switching animation {:?} -> {animation:?}", self.animation);
        let definition = atlas.animation_by_key(animation);
        self.animation = animation;
        self.first_region = definition.frame(0).region;
        self.playback = definition.playback();
        self.restart(atlas);
    }

    pub fn update<T>(&mut self, atlas: &Atlas<T>, delta: f32) {
        self.update_with(atlas, delta, |_| {});
    }

    /// Advances playback by `delta` seconds, reporting every frame change to
    /// `on_event`.
    ///
    /// Time is carried over between frames: while the accumulated time covers
    /// the current frame's duration, that duration is subtracted and the
    /// animation steps forward. A single large delta can therefore pass
    /// several frames, and the remainder counts towards the next one.
    ///
    /// Repeating playback drops whole cycles beyond the first before stepping,
    /// so the number of steps stays bounded however large `delta` is. Events
    /// are reported for the steps that remain. Negative and non-finite deltas
    /// are ignored.
    pub fn update_with<T>(
        &mut self,
        atlas: &Atlas<T>,
        delta: f32,
        mut on_event: impl FnMut(PlaybackEvent),
    ) {
        if self.state == PlaybackState::Paused {
            return;
        }

        if !(delta.is_finite() && delta >= 0.) {
            log::warn!("Ignoring animation update with delta {delta}");
            return;
        }

        let animation = atlas.animation_by_key(self.animation);
        self.elapsed += delta;

        if let Some(cycle) = cycle_duration(animation, self.playback) {
            if cycle.is_finite() && self.elapsed >= cycle * 2. {
                let skipped = self.elapsed;
                self.elapsed = cycle + self.elapsed % cycle;
                log::trace!("Skipped {} of playback", skipped - self.elapsed);
            }
        }

        while self.state == PlaybackState::Playing {
            let duration = animation.frame(self.frame.index).duration;
            if self.elapsed < duration {
                break;
            }

            if animation.frame_count() == 1 && self.playback != Playback::Once {
                // Nothing to switch to
                self.elapsed %= duration;
                break;
            }

            self.elapsed -= duration;
            self.advance(animation, &mut on_event);
        }

        self.sync_region(animation);
    }

    fn advance(&mut self, animation: &Animation, on_event: &mut impl FnMut(PlaybackEvent)) {
        let from = self.frame.index;

        if self.playback == Playback::Once && animation.is_last_frame(from) {
            self.elapsed = 0.;
            self.state = PlaybackState::Paused;
            self.finished = true;
            log::trace!("Animation `{}` finished", animation.name());
            on_event(PlaybackEvent::Finished);
            return;
        }

        self.frame = next_frame(animation, self.playback, self.frame);
        let to = self.frame.index;

        on_event(PlaybackEvent::FrameChanged { from, to });
        if to == 0 {
            on_event(PlaybackEvent::Looped);
        }
    }

    fn rewind(&mut self, animation: &Animation) {
        self.frame = Frame::default();
        self.elapsed = 0.;
        self.finished = false;
        self.sync_region(animation);
    }

    fn sync_region(&mut self, animation: &Animation) {
        self.sprite
            .set_region(animation.frame(self.frame.index).region);
    }

    pub fn width<T>(&self, atlas: &Atlas<T>) -> f32 {
        self.sprite.width(atlas)
    }

    pub fn height<T>(&self, atlas: &Atlas<T>) -> f32 {
        self.sprite.height(atlas)
    }

    pub fn size<T>(&self, atlas: &Atlas<T>) -> Vector2<f32> {
        self.sprite.size(atlas)
    }

    pub fn center_origin<T>(&mut self, atlas: &Atlas<T>) {
        self.sprite.center_origin(atlas);
    }

    pub fn draw<'a, T>(&self, atlas: &'a Atlas<T>, target: &mut impl DrawTarget<'a, T>) {
        self.sprite.draw(atlas, target);
    }

    pub fn draw_at<'a, T>(
        &self,
        atlas: &'a Atlas<T>,
        target: &mut impl DrawTarget<'a, T>,
        position: Point2<f32>,
    ) {
        self.sprite.draw_at(atlas, target, position);
    }
}

impl Deref for AnimatedSprite {
    type Target = Appearance;

    fn deref(&self) -> &Self::Target {
        &self.sprite
    }
}

impl DerefMut for AnimatedSprite {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.sprite
    }
}
