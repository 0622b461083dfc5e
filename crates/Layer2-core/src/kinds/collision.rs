//! Collision Mesh

use super::geometry::Bounds;
use crate::handle::Resource;
use crate::kind::ResourceKind;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CollisionMeshOptions {
    pub subobject_name: Option<String>,
    pub apply_root_transform: bool,
    pub make_instances_real: bool,
    /// 삼각형 속성을 해석할 속성 그룹 이름 (없으면 기본 그룹)
    pub attribute_group: Option<String>,
}

impl CollisionMeshOptions {
    pub fn using(attribute_group: impl Into<String>) -> Self {
        Self {
            attribute_group: Some(attribute_group.into()),
            ..Default::default()
        }
    }
}

/// 디코딩된 충돌 메쉬. `attributes`는 삼각형마다 하나 (없으면 0)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawCollisionMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub attributes: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionTriangle {
    pub positions: [[f32; 3]; 3],
    pub normal: [f32; 3],
    pub attributes: u64,
}

impl CollisionTriangle {
    fn new(positions: [[f32; 3]; 3], attributes: u64) -> Self {
        let [a, b, c] = positions;
        let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let cross = [
            u[1] * v[2] - u[2] * v[1],
            u[2] * v[0] - u[0] * v[2],
            u[0] * v[1] - u[1] * v[0],
        ];
        let length = (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt();
        let normal = if length > f32::EPSILON {
            [cross[0] / length, cross[1] / length, cross[2] / length]
        } else {
            [0.0; 3]
        };
        Self {
            positions,
            normal,
            attributes,
        }
    }
}

#[derive(Debug)]
pub struct CollisionMeshBackend {
    raw: RawCollisionMesh,
    attribute_group: Option<String>,
    bounds: Bounds,
}

impl CollisionMeshBackend {
    pub fn raw(&self) -> &RawCollisionMesh {
        &self.raw
    }

    pub fn attribute_group(&self) -> Option<&str> {
        self.attribute_group.as_deref()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// 삼각형 목록 생성 (퇴화 삼각형은 법선이 0)
    pub fn generate_collision_triangles(&self) -> Vec<CollisionTriangle> {
        let raw = &self.raw;
        raw.indices
            .chunks_exact(3)
            .enumerate()
            .filter_map(|(index, tri)| {
                let positions = [
                    *raw.positions.get(tri[0] as usize)?,
                    *raw.positions.get(tri[1] as usize)?,
                    *raw.positions.get(tri[2] as usize)?,
                ];
                let attributes = raw.attributes.get(index).copied().unwrap_or(0);
                Some(CollisionTriangle::new(positions, attributes))
            })
            .collect()
    }
}

pub struct CollisionMeshKind;

impl ResourceKind for CollisionMeshKind {
    const NAME: &'static str = "collisionMesh";
    type Options = CollisionMeshOptions;
    type Raw = RawCollisionMesh;
    type Backend = CollisionMeshBackend;

    fn make_backend(raw: RawCollisionMesh, options: &CollisionMeshOptions) -> CollisionMeshBackend {
        CollisionMeshBackend {
            bounds: Bounds::from_points(&raw.positions).unwrap_or_default(),
            attribute_group: options.attribute_group.clone(),
            raw,
        }
    }
}

pub type CollisionMesh = Resource<CollisionMeshKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_triangles() {
        let raw = RawCollisionMesh {
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
            indices: vec![0, 1, 2, 0, 3, 0],
            attributes: vec![7],
        };
        let backend = CollisionMeshKind::make_backend(raw, &CollisionMeshOptions::using("terrain"));
        let triangles = backend.generate_collision_triangles();

        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(triangles[0].attributes, 7);
        // degenerate, no attribute entry
        assert_eq!(triangles[1].normal, [0.0; 3]);
        assert_eq!(triangles[1].attributes, 0);
        assert_eq!(backend.attribute_group(), Some("terrain"));
    }

    #[test]
    fn test_attribute_group_is_part_of_options_identity() {
        assert_ne!(CollisionMeshOptions::using("terrain"), CollisionMeshOptions::default());
    }
}
