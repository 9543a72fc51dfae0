use std::path::Path;

use cgmath::Vector3;

use crate::{
    context::Primitive,
    error::{ResourceError, ResourceResult},
    node::{NodeId, NodeKind, SceneGraph},
    primitives::{calc_normals, PrimitiveVertex},
};

/// Lighting coefficients of one part, as read from an MTL file.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub ka: [f32; 3],
    pub kd: [f32; 3],
    pub ks: [f32; 3],
    pub shininess: f32,
    pub alpha: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            ka: [0.2, 0.2, 0.2],
            kd: [0.8, 0.8, 0.8],
            ks: [0.0, 0.0, 0.0],
            shininess: 1.0,
            alpha: 1.0,
        }
    }
}

impl From<&tobj::Material> for Material {
    fn from(m: &tobj::Material) -> Self {
        Self {
            name: m.name.clone(),
            ka: m.ambient,
            kd: m.diffuse,
            ks: m.specular,
            shininess: m.shininess,
            alpha: m.dissolve,
        }
    }
}

/// A run of indices drawn with one material.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjPart {
    pub name: String,
    pub start: usize,
    pub count: usize,
    pub material: Material,
}

/// Every mesh of an OBJ file merged into one vertex and one index buffer.
#[derive(Clone, Debug, Default)]
pub struct ObjModel {
    pub vertices: Vec<Vector3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub indices: Vec<u32>,
    pub parts: Vec<ObjPart>,
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

pub fn load_obj(path: impl AsRef<Path>) -> ResourceResult<ObjModel> {
    let path = path.as_ref();
    let (models, materials) =
        tobj::load_obj(path, &load_options()).map_err(|source| ResourceError::ObjLoad {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("loaded {} meshes from {}", models.len(), path.display());
    ObjModel::from_tobj(models, materials)
}

/// Parses an OBJ file held in memory. `mtl` supplies the text of whatever
/// material library the OBJ names.
pub fn parse_obj(obj: &str, mtl: Option<&str>) -> ResourceResult<ObjModel> {
    let (models, materials) = tobj::load_obj_buf(&mut obj.as_bytes(), &load_options(), |_| match mtl {
        Some(mtl) => tobj::load_mtl_buf(&mut mtl.as_bytes()),
        None => Err(tobj::LoadError::OpenFileFailed),
    })?;
    ObjModel::from_tobj(models, materials)
}

impl ObjModel {
    fn from_tobj(
        models: Vec<tobj::Model>,
        materials: Result<Vec<tobj::Material>, tobj::LoadError>,
    ) -> ResourceResult<Self> {
        if models.is_empty() {
            return Err(ResourceError::NoMeshes);
        }
        let materials = materials.unwrap_or_else(|e| {
            log::warn!("failed to load materials, using defaults: {e}");
            Vec::new()
        });

        let mut obj = ObjModel::default();
        for m in models {
            let mesh = m.mesh;
            let offset = obj.vertices.len() as u32;
            let positions: Vec<Vector3<f32>> = mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vector3::new(p[0], p[1], p[2]))
                .collect();

            if mesh.normals.len() == mesh.positions.len() {
                obj.normals.extend(
                    mesh.normals
                        .chunks_exact(3)
                        .map(|n| Vector3::new(n[0], n[1], n[2])),
                );
            } else {
                log::debug!("mesh '{}' has no normals, computing them", m.name);
                obj.normals
                    .extend(calc_normals(&positions, &mesh.indices, false));
            }

            let material = match mesh.material_id.map(|id| materials.get(id)) {
                Some(Some(material)) => Material::from(material),
                Some(None) => {
                    log::warn!("mesh '{}' refers to a missing material", m.name);
                    Material::default()
                }
                None => Material::default(),
            };

            obj.parts.push(ObjPart {
                name: m.name,
                start: obj.indices.len(),
                count: mesh.indices.len(),
                material,
            });
            obj.vertices.extend(positions);
            obj.indices.extend(mesh.indices.iter().map(|i| offset + i));
        }
        Ok(obj)
    }

    /// Moves the middle of the bounding box to the origin and returns the
    /// scale that makes the model's longest side about 1.
    pub fn center_and_scale(&mut self) -> f32 {
        let Some(&first) = self.vertices.first() else {
            return 1.0;
        };
        let (min, max) = self.vertices.iter().fold((first, first), |(min, max), v| {
            (
                Vector3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z)),
                Vector3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z)),
            )
        });
        let size = max - min;
        let middle = min + size * 0.5;
        if middle != Vector3::new(0.0, 0.0, 0.0) {
            log::warn!("model middle is {middle:?}, you should move the model to the origin");
            for v in &mut self.vertices {
                *v -= middle;
            }
        }

        // Flat axes have no size to fit
        let scale = [size.x, size.y, size.z]
            .into_iter()
            .filter(|s| *s > 0.0)
            .map(|s| 1.0 / s)
            .fold(0.0, f32::max);
        let scale = if scale > 0.0 { scale } else { 1.0 };
        log::info!("the scale is {scale}");
        scale
    }

    /// Interleaved position/normal data for upload.
    pub fn vertex_data(&self) -> Vec<PrimitiveVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| PrimitiveVertex {
                position: (*p).into(),
                normal: (*n).into(),
            })
            .collect()
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Adds one branch per part under `parent`: the part's material
    /// uniforms, then a triangle draw over its index range.
    pub fn build_scene(&self, graph: &mut SceneGraph, parent: NodeId) -> Vec<NodeId> {
        self.parts
            .iter()
            .map(|part| {
                let m = &part.material;
                let branch = graph.spawn(parent, NodeKind::set_uniform("ka", m.ka));
                graph.spawn_chain(
                    branch,
                    [
                        NodeKind::set_uniform("kd", m.kd),
                        NodeKind::set_uniform("ks", m.ks),
                        NodeKind::set_uniform("shininess", m.shininess),
                        NodeKind::set_uniform("alpha", m.alpha),
                        NodeKind::draw_elements(part.start, part.count, Primitive::Triangles),
                    ],
                );
                branch
            })
            .collect()
    }
}
