mod util;

use bout_topology::mesh_error::MeshError;
use bout_topology::topology::builder::{build_regions, build_regions_for_tag, create_regions};
use bout_topology::topology::classify::Topology;
use bout_topology::topology::region::{Edge, Region};
use bout_topology::topology::region_set::RegionSet;
use util::*;

fn bounds(set: &RegionSet, name: &str) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
    let r = set.get(name).unwrap_or_else(|| panic!("no region `{name}`"));
    (r.x_range(), r.y_range())
}

fn link(set: &RegionSet, name: &str, edge: Edge) -> Option<String> {
    set.neighbour(name, edge).unwrap().map(|r| r.name.clone())
}

fn assert_mirrored(set: &RegionSet) {
    for region in set {
        for (edge, target) in region.connections() {
            let other = set
                .neighbour(&region.name, edge)
                .unwrap()
                .unwrap_or_else(|| panic!("{}: dangling {edge} link", region.name));
            assert_eq!(other.name, target);
            assert_eq!(
                other.connection(edge.opposite()),
                Some(region.name.as_str()),
                "{} -> {target} across {edge} is one-sided",
                region.name
            );
        }
    }
}

#[test]
fn core_only_mesh() {
    let set = create_regions(&core_mesh()).unwrap();
    assert_eq!(set.topology(), Topology::Core);
    assert_eq!(set.names().collect::<Vec<_>>(), vec!["core"]);
    assert_eq!(bounds(&set, "core"), (0..4, 0..8));
    assert_eq!(link(&set, "core", Edge::Lower).as_deref(), Some("core"));
    assert_eq!(link(&set, "core", Edge::Upper).as_deref(), Some("core"));
    assert_eq!(link(&set, "core", Edge::Inner), None);
    assert_eq!(link(&set, "core", Edge::Outer), None);
}

#[test]
fn sol_only_mesh_has_no_links() {
    let set = create_regions(&mesh(4, 8, (0, 0), [-1, 3, 3, 7], 4)).unwrap();
    assert_eq!(set.topology(), Topology::Sol);
    let sol = set.get("sol").unwrap();
    assert_eq!((sol.x_range(), sol.y_range()), (0..4, 0..8));
    assert_eq!(sol.connections().count(), 0);
}

#[test]
fn limiter_splits_at_separatrix() {
    let set = create_regions(&mesh(8, 8, (3, 3), [-1, 3, 3, 7], 4)).unwrap();
    assert_eq!(set.topology(), Topology::Limiter);
    assert_eq!(bounds(&set, "core"), (0..3, 0..8));
    assert_eq!(bounds(&set, "SOL"), (3..8, 0..8));
    assert_eq!(link(&set, "core", Edge::Outer).as_deref(), Some("SOL"));
    assert_eq!(link(&set, "core", Edge::Upper).as_deref(), Some("core"));
    assert_eq!(link(&set, "SOL", Edge::Upper), None);
    assert_mirrored(&set);
}

#[test]
fn single_null_regions_and_links() {
    let set = create_regions(&single_null_mesh()).unwrap();
    assert_eq!(set.topology(), Topology::SingleNull);
    let names: Vec<_> = set.names().map(str::to_string).collect();
    assert_permutation(
        &names,
        &["inner_PFR", "inner_SOL", "core", "SOL", "outer_PFR", "outer_SOL"].map(String::from),
    );

    assert_eq!(bounds(&set, "inner_PFR"), (0..4, 0..4));
    assert_eq!(bounds(&set, "core"), (0..4, 4..12));
    assert_eq!(bounds(&set, "SOL"), (4..8, 4..12));
    assert_eq!(bounds(&set, "outer_SOL"), (4..8, 12..16));

    assert_eq!(link(&set, "core", Edge::Upper).as_deref(), Some("core"));
    assert_eq!(link(&set, "inner_PFR", Edge::Upper).as_deref(), Some("outer_PFR"));
    assert_eq!(link(&set, "outer_PFR", Edge::Lower).as_deref(), Some("inner_PFR"));
    assert_eq!(link(&set, "inner_SOL", Edge::Upper).as_deref(), Some("SOL"));
    assert_eq!(link(&set, "SOL", Edge::Upper).as_deref(), Some("outer_SOL"));
    assert_eq!(link(&set, "inner_SOL", Edge::Lower), None);
    assert_eq!(link(&set, "outer_SOL", Edge::Upper), None);
    assert_mirrored(&set);
}

#[test]
fn disconnected_double_null_regions_and_links() {
    let set = create_regions(&disconnected_double_null_mesh()).unwrap();
    assert_eq!(set.topology(), Topology::DisconnectedDoubleNull);
    assert_eq!(set.len(), 18);

    assert_eq!(bounds(&set, "inner_core"), (0..5, 3..8));
    assert_eq!(bounds(&set, "outer_core"), (0..5, 16..21));
    assert_eq!(bounds(&set, "lower_inner_intersep"), (5..9, 0..3));
    assert_eq!(bounds(&set, "upper_outer_SOL"), (9..12, 12..16));

    assert_eq!(link(&set, "inner_core", Edge::Upper).as_deref(), Some("outer_core"));
    assert_eq!(link(&set, "inner_core", Edge::Lower).as_deref(), Some("outer_core"));
    assert_eq!(link(&set, "outer_core", Edge::Upper).as_deref(), Some("inner_core"));
    assert_eq!(link(&set, "inner_core", Edge::Outer).as_deref(), Some("inner_intersep"));
    assert_eq!(link(&set, "inner_intersep", Edge::Upper).as_deref(), Some("outer_intersep"));
    assert_eq!(
        link(&set, "upper_outer_intersep", Edge::Upper).as_deref(),
        Some("upper_inner_intersep")
    );
    assert_eq!(link(&set, "upper_inner_SOL", Edge::Upper), None);
    assert_mirrored(&set);
}

#[test]
fn connected_double_null_has_no_intersep() {
    let set = create_regions(&connected_double_null_mesh()).unwrap();
    assert_eq!(set.topology(), Topology::ConnectedDoubleNull);
    assert_eq!(set.len(), 12);
    assert!(set.names().all(|n| !n.contains("intersep")));
    assert_eq!(bounds(&set, "inner_SOL"), (5..12, 3..8));
    assert_eq!(link(&set, "inner_core", Edge::Outer).as_deref(), Some("inner_SOL"));
    assert_eq!(link(&set, "outer_core", Edge::Upper).as_deref(), Some("inner_core"));
    assert_mirrored(&set);
}

#[test]
fn xpoint_regions_and_links() {
    let set = create_regions(&xpoint_mesh()).unwrap();
    assert_eq!(set.topology(), Topology::Xpoint);
    assert_eq!(set.len(), 8);
    assert_eq!(bounds(&set, "lower_inner_PFR"), (0..5, 0..6));
    assert_eq!(bounds(&set, "upper_inner_SOL"), (5..12, 6..12));
    assert_eq!(bounds(&set, "lower_outer_SOL"), (5..12, 18..24));
    assert_eq!(
        link(&set, "lower_inner_PFR", Edge::Upper).as_deref(),
        Some("lower_outer_PFR")
    );
    assert_eq!(
        link(&set, "upper_outer_SOL", Edge::Upper).as_deref(),
        Some("lower_outer_SOL")
    );
    assert_mirrored(&set);
}

#[test]
fn tag_spellings_select_tables() {
    let meta = disconnected_double_null_mesh();
    let err = build_regions_for_tag("connected-double-null", &meta).unwrap_err();
    // the connected table expects ixseps1 == ixseps2, so the intersep band
    // is left uncovered
    assert!(matches!(err, MeshError::InvalidMeshGeometry(_)));

    let set = build_regions_for_tag("disconnected-double-null", &meta).unwrap();
    assert_eq!(set.len(), 18);
    assert_eq!(
        build_regions_for_tag("quadruple-null", &meta).unwrap_err(),
        MeshError::UnsupportedTopology("quadruple-null".into())
    );
}

#[test]
fn regions_are_never_duplicated() {
    let core = Region::new("core", 0..4, 0..8);
    let err = RegionSet::new(Topology::Core, vec![core.clone(), core]).unwrap_err();
    assert!(matches!(err, MeshError::InvalidMeshGeometry(_)));
}

#[test]
fn neighbour_of_unknown_region_is_not_found() {
    let set = build_regions(Topology::Core, &core_mesh()).unwrap();
    assert_eq!(
        set.neighbour("SOL", Edge::Inner).unwrap_err(),
        MeshError::RegionNotFound("SOL".into())
    );
}
