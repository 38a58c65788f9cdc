use crate::AssetError;
use crate::mesh::{MeshData, MeshVertex};
use std::path::Path;

/// Load every model in an OBJ file into one indexed mesh.
///
/// Materials are ignored; the caller pairs the mesh with its own texture.
/// Texture V is flipped so image rows run top-down like the cube mesh.
pub fn load_obj_mesh(path: impl AsRef<Path>) -> Result<MeshData, AssetError> {
    let path = path.as_ref();
    let (models, _materials) =
        tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS).map_err(|source| AssetError::Obj {
            path: path.to_path_buf(),
            source,
        })?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        let base = vertices.len() as u32;
        let count = mesh.positions.len() / 3;
        let has_uv = mesh.texcoords.len() >= count * 2;
        for i in 0..count {
            let uv = if has_uv {
                [mesh.texcoords[2 * i], 1.0 - mesh.texcoords[2 * i + 1]]
            } else {
                [0.0, 0.0]
            };
            vertices.push(MeshVertex {
                position: [
                    mesh.positions[3 * i],
                    mesh.positions[3 * i + 1],
                    mesh.positions[3 * i + 2],
                ],
                uv,
            });
        }
        indices.extend(mesh.indices.iter().map(|i| base + i));
    }

    if indices.is_empty() {
        return Err(AssetError::EmptyModel(path.to_path_buf()));
    }
    tracing::debug!(
        path = %path.display(),
        models = models.len(),
        vertices = vertices.len(),
        "OBJ mesh loaded"
    );
    Ok(MeshData::new(vertices, indices))
}
