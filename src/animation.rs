use glam::{Quat, Vec3};

use crate::math::slerp_shortest;
use crate::scene::{NodeTransform, ObjectId, SceneGraph};

/// How values between two keyframes are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Hold the earlier keyframe until the next one
    Step,
    /// Lerp translations and scales, slerp rotations
    Linear,
}

/// Keyframe values of one channel, one per keyframe time
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelValues {
    Translations(Vec<Vec3>),
    Rotations(Vec<Quat>),
    Scales(Vec<Vec3>),
}

impl ChannelValues {
    pub fn len(&self) -> usize {
        match self {
            ChannelValues::Translations(values) | ChannelValues::Scales(values) => values.len(),
            ChannelValues::Rotations(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only the keyframe values of cubic-spline output, dropping the
    /// in/out tangents stored around each value
    pub fn spline_points(self) -> Self {
        fn points<T: Copy>(values: Vec<T>) -> Vec<T> {
            values.into_iter().skip(1).step_by(3).collect()
        }
        match self {
            ChannelValues::Translations(values) => ChannelValues::Translations(points(values)),
            ChannelValues::Rotations(values) => ChannelValues::Rotations(points(values)),
            ChannelValues::Scales(values) => ChannelValues::Scales(points(values)),
        }
    }
}

/// One animated property of one scene node
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationChannel {
    target: ObjectId,
    keyframes: Vec<f32>,
    values: ChannelValues,
    interpolation: Interpolation,
}

impl AnimationChannel {
    /// `None` unless there is one value per keyframe and the keyframe times
    /// never decrease
    pub fn new(
        target: ObjectId,
        keyframes: Vec<f32>,
        values: ChannelValues,
        interpolation: Interpolation,
    ) -> Option<Self> {
        if keyframes.is_empty() || keyframes.len() != values.len() {
            return None;
        }
        if keyframes.windows(2).any(|pair| pair[1] < pair[0]) {
            return None;
        }
        Some(Self {
            target,
            keyframes,
            values,
            interpolation,
        })
    }

    pub fn target(&self) -> ObjectId {
        self.target
    }

    pub fn end_time(&self) -> f32 {
        self.keyframes.last().copied().unwrap_or(0.0)
    }

    /// Keyframe pair around `time` and the blend factor between them.
    /// Times outside the keyframe range hold the first or last value.
    fn segment(&self, time: f32) -> (usize, usize, f32) {
        let next = self.keyframes.partition_point(|&key| key <= time);
        if next == 0 {
            return (0, 0, 0.0);
        }
        let last = self.keyframes.len() - 1;
        if next > last {
            return (last, last, 0.0);
        }

        let previous = next - 1;
        if self.interpolation == Interpolation::Step {
            return (previous, previous, 0.0);
        }
        let span = self.keyframes[next] - self.keyframes[previous];
        let t = if span > 0.0 {
            (time - self.keyframes[previous]) / span
        } else {
            0.0
        };
        (previous, next, t)
    }

    /// Write the sampled value into `local`
    pub fn apply(&self, time: f32, local: &mut NodeTransform) {
        let (from, to, t) = self.segment(time);
        match &self.values {
            ChannelValues::Translations(values) => {
                local.translation = values[from].lerp(values[to], t);
            }
            ChannelValues::Rotations(values) => {
                local.rotation = slerp_shortest(values[from], values[to], t).normalize();
            }
            ChannelValues::Scales(values) => {
                local.scale = values[from].lerp(values[to], t);
            }
        }
    }
}

/// A keyframed clip over scene nodes
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    channels: Vec<AnimationChannel>,
}

impl AnimationClip {
    /// Duration is the last keyframe time over all channels
    pub fn new(name: impl Into<String>, channels: Vec<AnimationChannel>) -> Self {
        let duration = channels
            .iter()
            .map(AnimationChannel::end_time)
            .fold(0.0f32, f32::max);
        Self {
            name: name.into(),
            duration,
            channels,
        }
    }

    pub fn channels(&self) -> &[AnimationChannel] {
        &self.channels
    }

    /// Pose every animated node at `time`. Channels whose node is missing
    /// from `graph` are skipped.
    pub fn sample_into(&self, time: f32, graph: &mut SceneGraph) {
        for channel in &self.channels {
            let Some(mut local) = graph.node(channel.target).map(|node| node.local) else {
                continue;
            };
            channel.apply(time, &mut local);
            graph.set_local_transform(channel.target, local);
        }
    }
}

/// Loops a clip, driven by the same frame deltas as the camera
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clip: AnimationClip,
    time: f32,
}

impl AnimationPlayer {
    pub fn new(clip: AnimationClip) -> Self {
        Self { clip, time: 0.0 }
    }

    /// Step the playhead and write the sampled transforms into `graph`
    pub fn advance(&mut self, delta_seconds: f32, graph: &mut SceneGraph) {
        self.time = if self.clip.duration > 0.0 {
            (self.time + delta_seconds.max(0.0)) % self.clip.duration
        } else {
            0.0
        };
        self.clip.sample_into(self.time, graph);
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }
}
