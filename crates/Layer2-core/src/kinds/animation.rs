//! Skeletal Animation

use crate::handle::Resource;
use crate::kind::ResourceKind;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SkeletalAnimationOptions {
    /// 파일 안의 애니메이션 이름 (없으면 첫 번째)
    pub subobject_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub translation: [f32; 3],
}

/// 관절 하나의 키프레임 (시간 순)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JointChannel {
    pub joint_id: u32,
    pub keyframes: Vec<Keyframe>,
}

impl JointChannel {
    /// `time` 위치의 보간된 이동값
    pub fn sample(&self, time: f32) -> Option<[f32; 3]> {
        let first = self.keyframes.first()?;
        if time <= first.time {
            return Some(first.translation);
        }
        for pair in self.keyframes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if time <= b.time {
                let span = b.time - a.time;
                let t = if span > 0.0 { (time - a.time) / span } else { 1.0 };
                return Some([
                    a.translation[0] + (b.translation[0] - a.translation[0]) * t,
                    a.translation[1] + (b.translation[1] - a.translation[1]) * t,
                    a.translation[2] + (b.translation[2] - a.translation[2]) * t,
                ]);
            }
        }
        self.keyframes.last().map(|k| k.translation)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSkeletalAnimation {
    pub name: String,
    pub duration: f32,
    pub channels: Vec<JointChannel>,
}

#[derive(Debug)]
pub struct SkeletalAnimationBackend {
    name: String,
    duration: f32,
    channels: HashMap<u32, JointChannel>,
}

impl SkeletalAnimationBackend {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn channel(&self, joint_id: u32) -> Option<&JointChannel> {
        self.channels.get(&joint_id)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// 반복 재생 기준 샘플링
    pub fn sample(&self, joint_id: u32, time: f32) -> Option<[f32; 3]> {
        let time = if self.duration > 0.0 {
            time.rem_euclid(self.duration)
        } else {
            0.0
        };
        self.channel(joint_id)?.sample(time)
    }
}

pub struct SkeletalAnimationKind;

impl ResourceKind for SkeletalAnimationKind {
    const NAME: &'static str = "skeletalAnimation";
    type Options = SkeletalAnimationOptions;
    type Raw = RawSkeletalAnimation;
    type Backend = SkeletalAnimationBackend;

    fn make_backend(raw: RawSkeletalAnimation, _options: &SkeletalAnimationOptions) -> SkeletalAnimationBackend {
        let channels = raw
            .channels
            .into_iter()
            .map(|mut channel| {
                channel.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
                (channel.joint_id, channel)
            })
            .collect();
        SkeletalAnimationBackend {
            name: raw.name,
            duration: raw.duration,
            channels,
        }
    }
}

pub type SkeletalAnimation = Resource<SkeletalAnimationKind>;

#[cfg(test)]
mod tests {
    use super::*;

    fn walk() -> RawSkeletalAnimation {
        RawSkeletalAnimation {
            name: "walk".to_string(),
            duration: 2.0,
            channels: vec![JointChannel {
                joint_id: 3,
                keyframes: vec![
                    Keyframe { time: 2.0, translation: [0.0, 0.0, 0.0] },
                    Keyframe { time: 0.0, translation: [0.0, 0.0, 0.0] },
                    Keyframe { time: 1.0, translation: [2.0, 0.0, 0.0] },
                ],
            }],
        }
    }

    #[test]
    fn test_sample_interpolates() {
        let backend = SkeletalAnimationKind::make_backend(walk(), &Default::default());

        assert_eq!(backend.name(), "walk");
        assert_eq!(backend.channel_count(), 1);
        assert_eq!(backend.sample(3, 0.5), Some([1.0, 0.0, 0.0]));
        assert_eq!(backend.sample(3, 1.5), Some([1.0, 0.0, 0.0]));
        // wraps around the duration
        assert_eq!(backend.sample(3, 2.5), Some([1.0, 0.0, 0.0]));
        assert!(backend.sample(4, 0.5).is_none());
    }
}
