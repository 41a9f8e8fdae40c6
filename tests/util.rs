#![allow(dead_code)]
use bout_topology::topology::metadata::MeshMetadata;

/// Metadata with boundary cells kept in both directions and no guards.
pub fn mesh(nx: i64, ny: i64, ixseps: (i64, i64), jyseps: [i64; 4], ny_inner: i64) -> MeshMetadata {
    MeshMetadata::new()
        .with("nx", nx)
        .with("ny", ny)
        .with("ny_inner", ny_inner)
        .with("ixseps1", ixseps.0)
        .with("ixseps2", ixseps.1)
        .with("jyseps1_1", jyseps[0])
        .with("jyseps2_1", jyseps[1])
        .with("jyseps1_2", jyseps[2])
        .with("jyseps2_2", jyseps[3])
        .with("MXG", 0)
        .with("MYG", 0)
        .with("keep_xboundaries", 1)
        .with("keep_yboundaries", 1)
}

/// Same as [`mesh`] with explicit guard widths and boundary flags.
pub fn mesh_with_guards(
    base: MeshMetadata,
    mxg: i64,
    myg: i64,
    keep_x: bool,
    keep_y: bool,
) -> MeshMetadata {
    base.with("MXG", mxg)
        .with("MYG", myg)
        .with("keep_xboundaries", keep_x)
        .with("keep_yboundaries", keep_y)
}

pub fn core_mesh() -> MeshMetadata {
    mesh(4, 8, (10, 10), [-1, 3, 3, 7], 4)
}

pub fn single_null_mesh() -> MeshMetadata {
    mesh(8, 16, (4, 4), [3, 7, 7, 11], 8)
}

pub fn connected_double_null_mesh() -> MeshMetadata {
    mesh(12, 24, (5, 5), [2, 7, 15, 20], 12)
}

pub fn disconnected_double_null_mesh() -> MeshMetadata {
    mesh(12, 24, (5, 9), [2, 7, 15, 20], 12)
}

pub fn xpoint_mesh() -> MeshMetadata {
    mesh(12, 24, (5, 5), [5, 5, 17, 17], 12)
}

/// Assert `got` is a permutation of `want` (order-agnostic).
pub fn assert_permutation<T: Ord + Clone + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort();
    let mut b = want.to_vec();
    b.sort();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
