//! Geometry (triangle mesh)

use crate::handle::Resource;
use crate::kind::ResourceKind;

/// 모델 파일 임포트 옵션
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GeometryOptions {
    /// 파일 안의 특정 오브젝트만 (없으면 첫 번째)
    pub subobject_name: Option<String>,
    pub apply_root_transform: bool,
    pub make_instances_real: bool,
}

impl GeometryOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            subobject_name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// 디코딩된 인덱스 삼각형 메쉬
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawGeometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl RawGeometry {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 인덱스 순서대로 삼각형 꼭짓점 (범위 밖 인덱스는 건너뜀)
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            Some([
                *self.positions.get(tri[0] as usize)?,
                *self.positions.get(tri[1] as usize)?,
                *self.positions.get(tri[2] as usize)?,
            ])
        })
    }
}

/// 축 정렬 경계 상자
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Bounds {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [f32; 3]>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(
            Bounds {
                min: first,
                max: first,
            },
            |mut bounds, point| {
                for axis in 0..3 {
                    bounds.min[axis] = bounds.min[axis].min(point[axis]);
                    bounds.max[axis] = bounds.max[axis].max(point[axis]);
                }
                bounds
            },
        ))
    }

    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }
}

#[derive(Debug)]
pub struct GeometryBackend {
    raw: RawGeometry,
    bounds: Bounds,
}

impl GeometryBackend {
    pub fn raw(&self) -> &RawGeometry {
        &self.raw
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.raw.triangle_count()
    }
}

pub struct GeometryKind;

impl ResourceKind for GeometryKind {
    const NAME: &'static str = "geometry";
    type Options = GeometryOptions;
    type Raw = RawGeometry;
    type Backend = GeometryBackend;

    fn make_backend(raw: RawGeometry, _options: &GeometryOptions) -> GeometryBackend {
        GeometryBackend {
            bounds: Bounds::from_points(&raw.positions).unwrap_or_default(),
            raw,
        }
    }
}

pub type Geometry = Resource<GeometryKind>;

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> RawGeometry {
        RawGeometry {
            positions: vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, -1.0], [0.0, 1.0, 0.0]],
            indices: vec![0, 1, 2, 0, 2, 3],
            ..Default::default()
        }
    }

    #[test]
    fn test_bounds() {
        let backend = GeometryKind::make_backend(quad(), &GeometryOptions::default());
        let bounds = backend.bounds();

        assert_eq!(bounds.min, [0.0, 0.0, -1.0]);
        assert_eq!(bounds.max, [2.0, 1.0, 0.0]);
        assert_eq!(bounds.size(), [2.0, 1.0, 1.0]);
        assert_eq!(bounds.center(), [1.0, 0.5, -0.5]);
        assert_eq!(backend.triangle_count(), 2);
    }

    #[test]
    fn test_empty_mesh_has_zero_bounds() {
        let backend = GeometryKind::make_backend(RawGeometry::default(), &GeometryOptions::default());
        assert_eq!(backend.bounds(), Bounds::default());
    }

    #[test]
    fn test_triangles_skip_bad_indices() {
        let mut raw = quad();
        raw.indices.extend([0, 1, 9]);
        assert_eq!(raw.triangle_count(), 3);
        assert_eq!(raw.triangles().count(), 2);
    }
}
