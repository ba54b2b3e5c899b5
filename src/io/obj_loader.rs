use crate::error::LoadError;
use crate::scene::mesh::{Face, Mesh};
use log::{debug, info, warn};
use nalgebra::Point3;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;

/// Returns true when `path` carries the `.obj` extension (any case).
pub fn is_obj_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"))
}

/// Loads an OBJ file as a single polygon mesh.
///
/// # Arguments
/// * `path` - The file path to the .obj file.
///
/// # Errors
/// * `UnsupportedFormat` if the extension is not `.obj`.
/// * `Io` if the file cannot be opened.
/// * `Parse` / `EmptyGeometry` as for [`parse_obj`].
pub fn load_obj(path: &Path) -> Result<Mesh, LoadError> {
    if !is_obj_path(path) {
        return Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    info!("Loading OBJ file: {}", path.display());
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_obj(&mut BufReader::new(file), path)
}

/// Position records of an OBJ file, plus the face lines that cannot be
/// resolved against them.
struct Prescan {
    positions: Vec<Point3<f32>>,
    out_of_range_faces: Vec<usize>,
}

/// Collects every `v` record and flags `f` lines with a position index past
/// the vertex list. Malformed tokens are left for `tobj` to report.
fn prescan(text: &str) -> Prescan {
    let total = text
        .lines()
        .filter(|line| line.split_whitespace().next() == Some("v"))
        .count();

    let mut positions = Vec::with_capacity(total);
    let mut out_of_range_faces = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let coords: Vec<f32> = tokens.take(3).filter_map(|t| t.parse().ok()).collect();
                if let [x, y, z] = coords[..] {
                    positions.push(Point3::new(x, y, z));
                }
            }
            Some("f") => {
                // Negative indices are relative to the vertices read so far.
                let seen = positions.len() as i64;
                let bad = tokens.any(|token| {
                    match token.split('/').next().and_then(|i| i.parse::<i64>().ok()) {
                        Some(i) if i > 0 => i as usize > total,
                        Some(i) if i < 0 => seen + i < 0,
                        _ => false,
                    }
                });
                if bad {
                    out_of_range_faces.push(line_no);
                }
            }
            _ => {}
        }
    }

    Prescan {
        positions,
        out_of_range_faces,
    }
}

/// Bit-exact key for looking a position up again after `tobj` re-exported it.
fn position_key(p: &[f32]) -> [u32; 3] {
    [p[0].to_bits(), p[1].to_bits(), p[2].to_bits()]
}

/// Parses OBJ text into a mesh. `origin` is only used in messages.
///
/// Faces keep their arity (no triangulation). Face tokens of the form
/// `v/vt/vn` contribute only their position index, and indices come out
/// 0-based. Separate `o`/`g` groups are merged into one mesh that keeps every
/// `v` record of the file exactly once. Faces referencing a vertex that does
/// not exist are dropped; the rest of the file still loads. Material
/// libraries are ignored.
pub fn parse_obj<B: BufRead>(reader: &mut B, origin: &Path) -> Result<Mesh, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|source| LoadError::Io {
        path: origin.to_path_buf(),
        source,
    })?;

    let Prescan {
        mut positions,
        out_of_range_faces,
    } = prescan(&text);

    if !out_of_range_faces.is_empty() {
        warn!(
            "{}: dropped {} face(s) referencing vertices past the {} defined",
            origin.display(),
            out_of_range_faces.len(),
            positions.len()
        );
        let mut skip = out_of_range_faces.iter().peekable();
        text = text
            .lines()
            .enumerate()
            .filter(|(line_no, _)| {
                if skip.peek() == Some(&line_no) {
                    skip.next();
                    false
                } else {
                    true
                }
            })
            .map(|(_, line)| line)
            .collect::<Vec<_>>()
            .join("\n");
    }

    let load_options = tobj::LoadOptions {
        triangulate: false,
        single_index: false,
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj_buf(
        &mut Cursor::new(text.as_bytes()),
        &load_options,
        |_| Ok(Default::default()),
    )
    .map_err(|e| LoadError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    // First occurrence wins for repeated coordinates.
    let mut lookup: HashMap<[u32; 3], usize> = HashMap::with_capacity(positions.len());
    for (i, p) in positions.iter().enumerate() {
        lookup.entry(position_key(&[p.x, p.y, p.z])).or_insert(i);
    }

    let mut faces: Vec<Face> = Vec::new();

    // Iterate over all models found in the OBJ file
    for model in models {
        let mesh = &model.mesh;

        // Each group carries its own copy of the positions it uses; map them
        // back onto the file-wide vertex list.
        let remap: Vec<usize> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| {
                *lookup.entry(position_key(p)).or_insert_with(|| {
                    positions.push(Point3::new(p[0], p[1], p[2]));
                    positions.len() - 1
                })
            })
            .collect();
        let global = |i: &u32| remap.get(*i as usize).copied().unwrap_or(usize::MAX);

        let before = faces.len();
        if mesh.face_arities.is_empty() {
            // No arities means every face is a triangle.
            faces.extend(
                mesh.indices
                    .chunks_exact(3)
                    .map(|tri| tri.iter().map(global).collect()),
            );
        } else {
            let mut cursor = 0usize;
            for &arity in &mesh.face_arities {
                let end = cursor + arity as usize;
                let Some(indices) = mesh.indices.get(cursor..end) else {
                    warn!(
                        "Group '{}' in {} ends mid-face; ignoring the remainder",
                        model.name,
                        origin.display()
                    );
                    break;
                };
                faces.push(indices.iter().map(global).collect());
                cursor = end;
            }
        }
        debug!(
            "Group '{}': {} positions, {} faces",
            model.name,
            remap.len(),
            faces.len() - before
        );
    }

    let mesh = Mesh::new(positions, faces);
    if mesh.is_empty() {
        return Err(LoadError::EmptyGeometry {
            path: origin.to_path_buf(),
            vertices: mesh.vertex_count(),
            faces: mesh.face_count(),
        });
    }

    info!(
        "OBJ loaded successfully. Vertices: {}, Polygons: {}",
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Mesh, LoadError> {
        parse_obj(&mut Cursor::new(text.as_bytes()), Path::new("inline.obj"))
    }

    #[test]
    fn compound_face_tokens_use_position_index() {
        let mesh = parse(
            "# quad and a triangle\n\
             v 0 0 0\n\
             v 1 0 0\n\
             v 1 1 0\n\
             v 0 1 0\n\
             vt 0 0\n\
             vn 0 0 1\n\
             f 1/1/1 2/1/1 3/1/1 4/1/1\n\
             f 1/1/1 3/1/1 4/1/1\n",
        )
        .expect("valid obj");

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2, 3], vec![0, 2, 3]]);
        assert_eq!(mesh.vertices[2], Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn position_normal_tokens_skip_texture_slot() {
        let mesh = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 1 1 0\n\
             vn 0 0 1\n\
             f 3//1 1//1 2//1\n",
        )
        .unwrap();
        assert_eq!(mesh.faces, vec![vec![2, 0, 1]]);
    }

    #[test]
    fn triangles_only_file() {
        let mesh = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             v 0 0 1\n\
             f 1 2 3\n\
             f 1 2 4\n",
        )
        .unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert!(mesh.faces.iter().all(|f| f.len() == 3));
    }

    #[test]
    fn face_past_the_vertex_list_is_dropped_alone() {
        let mesh = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 1 1 0\n\
             v 0 1 0\n\
             f 1 2 3\n\
             f 1 2 6\n\
             f 1 3 4\n",
        )
        .expect("valid faces still load");

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2], vec![0, 2, 3]]);
    }

    #[test]
    fn relative_index_before_the_first_vertex_is_dropped() {
        let mesh = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 1 1 0\n\
             f -3 -2 -1\n\
             f -4 -2 -1\n",
        )
        .unwrap();
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn groups_share_one_vertex_list() {
        let mesh = parse(
            "o left\n\
             v 0 0 0\n\
             v 2 0 0\n\
             v 1 2 0\n\
             f 1 2 3\n\
             o right\n\
             v 1 0 2\n\
             f 1 3 4\n\
             # never referenced by a face\n\
             v 1 3 3\n",
        )
        .unwrap();

        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2], vec![0, 2, 3]]);

        let centroid = mesh
            .vertices
            .iter()
            .fold(nalgebra::Vector3::zeros(), |sum, v| sum + v.coords)
            / mesh.vertex_count() as f32;
        assert!((centroid - nalgebra::Vector3::new(1.0, 1.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn file_without_faces_is_empty_geometry() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap_err();
        assert!(matches!(err, LoadError::EmptyGeometry { faces: 0, .. }));
        assert!(err.is_parse_error());
    }

    #[test]
    fn empty_file_is_empty_geometry() {
        let err = parse("# nothing here\n").unwrap_err();
        assert!(matches!(err, LoadError::EmptyGeometry { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let err = load_obj(Path::new("does/not/exist/model.stl")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_obj(Path::new("does/not/exist/model.OBJ")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(is_obj_path(Path::new("a/b/Teapot.OBJ")));
        assert!(!is_obj_path(Path::new("a/b/teapot.obj.bak")));
        assert!(!is_obj_path(Path::new("a/b/objfile")));
    }
}
