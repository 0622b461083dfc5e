//! Skeleton

use crate::handle::Resource;
use crate::kind::ResourceKind;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SkeletonOptions {
    pub subobject_name: Option<String>,
    /// 이 이름의 관절부터 시작 (없으면 파일의 루트)
    pub root_joint_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub id: u32,
    pub name: Option<String>,
    pub parent: Option<u32>,
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Joint {
    pub fn new(id: u32, name: impl Into<String>, parent: Option<u32>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            parent,
            translation: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
        }
    }
}

/// 바인드 포즈 관절 목록 (부모가 자식보다 먼저 올 필요는 없음)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSkeleton {
    pub joints: Vec<Joint>,
}

#[derive(Debug)]
pub struct SkeletonBackend {
    joints: Vec<Joint>,
    by_id: HashMap<u32, usize>,
    by_name: HashMap<String, usize>,
    root: Option<usize>,
}

impl SkeletonBackend {
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn root_joint(&self) -> Option<&Joint> {
        self.root.map(|index| &self.joints[index])
    }

    pub fn joint_with_id(&self, id: u32) -> Option<&Joint> {
        self.by_id.get(&id).map(|&index| &self.joints[index])
    }

    pub fn joint_named(&self, name: &str) -> Option<&Joint> {
        self.by_name.get(name).map(|&index| &self.joints[index])
    }

    pub fn children_of(&self, id: u32) -> impl Iterator<Item = &Joint> + '_ {
        self.joints.iter().filter(move |joint| joint.parent == Some(id))
    }
}

pub struct SkeletonKind;

impl ResourceKind for SkeletonKind {
    const NAME: &'static str = "skeleton";
    type Options = SkeletonOptions;
    type Raw = RawSkeleton;
    type Backend = SkeletonBackend;

    fn make_backend(raw: RawSkeleton, options: &SkeletonOptions) -> SkeletonBackend {
        let joints = raw.joints;
        let by_id: HashMap<u32, usize> = joints.iter().enumerate().map(|(i, j)| (j.id, i)).collect();
        let mut by_name = HashMap::new();
        for (index, joint) in joints.iter().enumerate() {
            if let Some(name) = &joint.name {
                by_name.entry(name.clone()).or_insert(index);
            }
        }

        let root = match &options.root_joint_name {
            Some(name) => by_name.get(name).copied(),
            None => joints
                .iter()
                .position(|joint| joint.parent.map_or(true, |parent| !by_id.contains_key(&parent))),
        };

        SkeletonBackend {
            joints,
            by_id,
            by_name,
            root,
        }
    }
}

pub type Skeleton = Resource<SkeletonKind>;
