use std::io::Write;

use model::{index_solid, Model, ModelError};
use stl_parser::{parse_bytes, Facet, ParseOptions, Solid, StlParsingErrorDetail, Vec3};

// ── Fixtures ─────────────────────────────────────────────────────────────

/// Unit cube, two triangles per face, one outward normal per face.
fn cube_facets() -> Vec<Facet> {
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        ([0., 0., -1.], [[0., 0., 0.], [0., 1., 0.], [1., 1., 0.], [1., 0., 0.]]),
        ([0., 0., 1.], [[0., 0., 1.], [1., 0., 1.], [1., 1., 1.], [0., 1., 1.]]),
        ([0., -1., 0.], [[0., 0., 0.], [1., 0., 0.], [1., 0., 1.], [0., 0., 1.]]),
        ([0., 1., 0.], [[0., 1., 0.], [0., 1., 1.], [1., 1., 1.], [1., 1., 0.]]),
        ([-1., 0., 0.], [[0., 0., 0.], [0., 0., 1.], [0., 1., 1.], [0., 1., 0.]]),
        ([1., 0., 0.], [[1., 0., 0.], [1., 1., 0.], [1., 1., 1.], [1., 0., 1.]]),
    ];

    faces
        .iter()
        .flat_map(|(normal, [a, b, c, d])| {
            [
                Facet::new(*normal, [*a, *b, *c], 0),
                Facet::new(*normal, [*a, *c, *d], 0),
            ]
        })
        .collect()
}

fn ascii_text(name: &str, facets: &[Facet]) -> String {
    let mut out = format!("solid {name}\n");
    for facet in facets {
        let [nx, ny, nz] = facet.normal();
        out.push_str(&format!("facet normal {nx:e} {ny:e} {nz:e}\n  outer loop\n"));
        for [x, y, z] in facet.vertices() {
            out.push_str(&format!("    vertex {x:e} {y:e} {z:e}\n"));
        }
        out.push_str("  endloop\nendfacet\n");
    }
    out.push_str(&format!("endsolid {name}\n"));
    out
}

fn binary_bytes(facets: &[Facet]) -> Vec<u8> {
    let mut buf = vec![0; 80];
    buf.write_all(&(facets.len() as u32).to_le_bytes()).unwrap();
    for facet in facets {
        for value in facet.normal().iter().chain(facet.vertices().iter().flatten()) {
            buf.write_all(&value.to_le_bytes()).unwrap();
        }
        buf.write_all(&facet.attribute().to_le_bytes()).unwrap();
    }
    buf
}

fn decode_one(bytes: &[u8]) -> Solid {
    let mut solids = parse_bytes(bytes, &ParseOptions::default()).unwrap();
    assert_eq!(solids.len(), 1);
    solids.remove(0)
}

fn assert_well_formed(model: &Model, facet_count: usize) {
    assert_eq!(model.elements().len(), 3 * facet_count);
    assert_eq!(model.normals().len(), model.vertices().len());
    for &element in model.elements() {
        assert!((element as usize) < model.vertices().len());
    }
}

// ── Properties ───────────────────────────────────────────────────────────

#[test]
fn ascii_and_binary_cubes_index_identically() {
    let facets = cube_facets();
    let from_ascii = decode_one(ascii_text("cube", &facets).as_bytes());
    let from_binary = decode_one(&binary_bytes(&facets));

    assert_eq!(from_ascii.facets(), from_binary.facets());

    let ascii_model = index_solid(&from_ascii).unwrap();
    let binary_model = index_solid(&from_binary).unwrap();
    assert_well_formed(&ascii_model, 12);
    assert_eq!(ascii_model.normals(), binary_model.normals());
    assert_eq!(ascii_model.vertices(), binary_model.vertices());
    assert_eq!(ascii_model.elements(), binary_model.elements());
}

#[test]
fn cube_shares_pairs_only_within_a_face() {
    let model = index_solid(&decode_one(&binary_bytes(&cube_facets()))).unwrap();

    assert_well_formed(&model, 12);
    // Four corners per face, each with that face's normal.
    assert_eq!(model.vertices().len(), 24);
}

#[test]
fn cube_without_shared_pairs_keeps_every_record() {
    // Give every triangle its own normal so no (normal, position) pair repeats.
    let facets: Vec<Facet> = cube_facets()
        .iter()
        .enumerate()
        .map(|(i, facet)| {
            let [x, y, z] = *facet.normal();
            let normal = if i % 2 == 0 { [x, y, z] } else { [x * 2., y * 2., z * 2.] };
            Facet::new(normal, *facet.vertices(), 0)
        })
        .collect();

    let model = index_solid(&decode_one(ascii_text("split", &facets).as_bytes())).unwrap();

    assert_well_formed(&model, 12);
    assert_eq!(model.vertices().len(), 36);
    assert_eq!(
        model.elements(),
        (0..36).collect::<Vec<u32>>().as_slice()
    );
}

#[test]
fn indexing_is_idempotent() {
    let solid = decode_one(ascii_text("cube", &cube_facets()).as_bytes());

    assert_eq!(index_solid(&solid).unwrap(), index_solid(&solid).unwrap());
}

#[test]
fn elements_follow_facet_order() {
    let solid = decode_one(&binary_bytes(&cube_facets()));
    let model = index_solid(&solid).unwrap();

    for (facet, triangle) in solid.facets().iter().zip(model.elements().chunks(3)) {
        for (position, &element) in facet.vertices().iter().zip(triangle) {
            assert_eq!(&model.vertices()[element as usize], position);
            assert_eq!(&model.normals()[element as usize], facet.normal());
        }
    }
}

#[test]
fn load_all_indexes_every_solid() {
    let text = format!(
        "{}{}",
        ascii_text("first", &cube_facets()[..2]),
        ascii_text("second", &cube_facets())
    );
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();

    let models = Model::load_all(file.path(), &ParseOptions::default()).unwrap();

    assert_eq!(models.len(), 2);
    assert_eq!(models[0].name(), "first");
    assert_well_formed(&models[0], 2);
    assert_well_formed(&models[1], 12);
}

#[test]
fn load_all_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = Model::load_all(dir.path().join("missing.stl"), &ParseOptions::default())
        .unwrap_err();

    let ModelError::Parsing(err) = err else {
        panic!("expected a parsing error, got {err:?}");
    };
    assert!(matches!(
        err.detail(),
        StlParsingErrorDetail::FailedToReadFile(_)
    ));
}
