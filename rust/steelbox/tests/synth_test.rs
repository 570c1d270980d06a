// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end checks on synthesized boxes

use approx::assert_relative_eq;
use steelbox::{
    resolve, split_band, synthesize, BoxParams, MiterPlaneSet, Node, SceneSummary, Side,
    SynthError,
};

fn variants() -> Vec<BoxParams> {
    let mut out = Vec::new();
    for straight_top in [true, false] {
        for handles in [true, false] {
            for perforation in [true, false] {
                out.push(BoxParams {
                    straight_top,
                    handles,
                    perforation,
                    hemmed_edges: !handles,
                    ..Default::default()
                });
            }
        }
    }
    out.push(BoxParams {
        length: 600.0,
        width: 400.0,
        height: 450.0,
        ribs: true,
        wheels: true,
        rubber_lining: true,
        straps: true,
        material: "darkSteel".into(),
        ..Default::default()
    });
    out
}

fn count_named(root: &steelbox::Assembly, prefix: &str) -> usize {
    root.children
        .iter()
        .filter(|p| p.node.name().starts_with(prefix))
        .count()
}

#[test]
fn test_every_box_has_base_walls_and_edges() {
    for params in variants() {
        let root = synthesize(&params).unwrap();
        assert_eq!(count_named(&root, "base"), 1);
        assert_eq!(count_named(&root, "wall-"), 4);
        assert_eq!(count_named(&root, "edge-"), 4);
        for side in Side::ALL {
            let edge = root.child(&format!("edge-{}", side.name())).unwrap();
            match &edge.node {
                Node::Solid(s) => assert_eq!(s.clipping.len(), 2),
                Node::Assembly(_) => panic!("edge should be a solid"),
            }
        }
    }
}

#[test]
fn test_synthesis_is_deterministic() {
    for params in variants() {
        let a = synthesize(&params).unwrap();
        let b = synthesize(&params).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_base_plate_caps() {
    for width in [50.0, 150.0, 200.0, 216.0, 400.0, 900.0] {
        let dims = resolve(&BoxParams {
            width,
            ..Default::default()
        })
        .unwrap()
        .dims;
        assert!(dims.base_plate_width <= (0.6 * width).min(130.0) + 1e-12);
        assert!(dims.base_plate_height <= (0.45 * width).min(95.0) + 1e-12);
    }
}

#[test]
fn test_miter_planes_meet_at_corners() {
    let (l, w) = (500.0, 300.0);
    let set = MiterPlaneSet::new(l, w, 0.0);
    for side in Side::ALL {
        let planes = set.for_side(side);
        for corner in MiterPlaneSet::corners(side, l, w) {
            // Inside both, and on the diagonal of one of them
            assert!(planes.iter().all(|p| p.contains(&corner, 1e-9)));
            let nearest = planes
                .iter()
                .map(|p| p.signed_distance(&corner).abs())
                .fold(f64::INFINITY, f64::min);
            assert_relative_eq!(nearest, 0.0, epsilon = 1e-9);
        }
    }

    // Adjacent sides share exactly one plane
    let pairs = [
        (Side::Front, Side::Right),
        (Side::Right, Side::Back),
        (Side::Back, Side::Left),
        (Side::Left, Side::Front),
    ];
    for (a, b) in pairs {
        let ia = MiterPlaneSet::indices_for_side(a);
        let ib = MiterPlaneSet::indices_for_side(b);
        let shared = ia.iter().filter(|i| ib.contains(i)).count();
        assert_eq!(shared, 1, "{:?} / {:?}", a, b);
    }
}

#[test]
fn test_rib_split_widths() {
    for (band, exclusion) in [(200.0, 120.0), (400.0, 104.0), (130.0, 129.0)] {
        let parts = split_band(band, exclusion);
        let total: f64 = parts.iter().map(|p| p.1).sum();
        assert_relative_eq!(total, band - exclusion, epsilon = 1e-9);
        assert!(parts.iter().all(|p| p.1 >= 0.0));
    }
    assert!(split_band(120.0, 120.0).is_empty());
}

#[test]
fn test_default_dimensions() {
    let resolved = resolve(&BoxParams::default()).unwrap();
    assert_relative_eq!(resolved.dims.total_height, 220.0);
    assert_relative_eq!(resolved.dims.base_plate_width, 120.0);
    assert_relative_eq!(resolved.dims.base_plate_height, 90.0);

    let wide = resolve(&BoxParams {
        width: 400.0,
        ..Default::default()
    })
    .unwrap();
    assert_relative_eq!(wide.dims.base_plate_width, 130.0);
    assert_relative_eq!(wide.dims.base_plate_height, 95.0);
}

fn panel_extents(params: &BoxParams) -> Vec<((f32, f32, f32), (f32, f32, f32))> {
    let root = synthesize(params).unwrap();
    root.flatten()
        .into_iter()
        .filter(|s| s.path.starts_with("wall-") && s.path.ends_with("/panel"))
        .map(|s| {
            let (min, max) = s.mesh.bounds();
            ((min.x, min.y, min.z), (max.x, max.y, max.z))
        })
        .collect()
}

#[test]
fn test_perforation_keeps_panel_extents() {
    for handles in [true, false] {
        let solid = BoxParams {
            handles,
            ..Default::default()
        };
        let perforated = BoxParams {
            perforation: true,
            ..solid.clone()
        };
        let a = panel_extents(&solid);
        let b = panel_extents(&perforated);
        assert_eq!(a.len(), 4);
        for (pa, pb) in a.iter().zip(&b) {
            assert_relative_eq!(pa.0 .0, pb.0 .0, epsilon = 1e-4);
            assert_relative_eq!(pa.0 .1, pb.0 .1, epsilon = 1e-4);
            assert_relative_eq!(pa.0 .2, pb.0 .2, epsilon = 1e-4);
            assert_relative_eq!(pa.1 .0, pb.1 .0, epsilon = 1e-4);
            assert_relative_eq!(pa.1 .1, pb.1 .1, epsilon = 1e-4);
            assert_relative_eq!(pa.1 .2, pb.1 .2, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_invalid_input_builds_nothing() {
    assert!(matches!(
        synthesize(&BoxParams {
            height: -1.0,
            ..Default::default()
        }),
        Err(SynthError::InvalidDimension { .. })
    ));
    assert!(matches!(
        synthesize(&BoxParams {
            material: "wood".into(),
            ..Default::default()
        }),
        Err(SynthError::UnknownMaterial(_))
    ));
}

#[test]
fn test_box_sits_on_base() {
    let root = synthesize(&BoxParams {
        lid: false,
        ..Default::default()
    })
    .unwrap();
    let summary = SceneSummary::from_assembly(&root);
    assert_relative_eq!(summary.bounds_min[1], -2.0, epsilon = 1e-4);
    // Straight lip hem rises one bend radius plus the sheet above the rim
    assert!(summary.bounds_max[1] >= 220.0 - 1e-3);
    assert!(summary.bounds_max[1] <= 224.0);
    assert!(summary.materials.iter().any(|m| m.material == "steel"));
}

#[test]
fn test_edge_cases_still_build_full_box() {
    for params in [
        BoxParams {
            thickness: 6.0,
            ..Default::default()
        },
        BoxParams {
            height: 50.0,
            straight_top: false,
            ..Default::default()
        },
        BoxParams {
            width: 15.0,
            length: 100.0,
            ..Default::default()
        },
    ] {
        let root = synthesize(&params).unwrap();
        assert_eq!(count_named(&root, "base"), 1);
        assert_eq!(count_named(&root, "wall-"), 4);
        assert_eq!(count_named(&root, "edge-"), 4);
    }
}
