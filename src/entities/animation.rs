use bevy::prelude::*;

/// Read-only description of a frame sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClip {
    pub frames: u32,
    /// Ticks each frame stays on screen
    pub image_duration: u32,
    pub looping: bool,
}

impl AnimationClip {
    pub const fn new(frames: u32, image_duration: u32, looping: bool) -> Self {
        Self {
            frames,
            image_duration,
            looping,
        }
    }

    fn total_ticks(&self) -> u32 {
        (self.frames * self.image_duration).max(1)
    }
}

/// Playback state of a clip; plain value, copy freely
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub clip: AnimationClip,
    pub frame: u32,
    pub done: bool,
}

impl Animation {
    pub fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            frame: 0,
            done: false,
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        let total = self.clip.total_ticks();
        if self.clip.looping {
            self.frame = (self.frame + 1) % total;
        } else {
            self.frame = (self.frame + 1).min(total - 1);
            if self.frame >= total - 1 {
                self.done = true;
            }
        }
    }

    /// Index of the image to show
    pub fn frame_index(&self) -> usize {
        (self.frame / self.clip.image_duration.max(1)) as usize
    }
}
