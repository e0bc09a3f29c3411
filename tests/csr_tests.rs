use steiner_emv::Csr;

#[test]
fn builds_symmetric_adjacency_from_an_undirected_edge_list() {
    let edges = [(0u32, 1u32, 4i64), (1, 2, 6), (2, 3, 1), (3, 0, 9)];
    let csr = Csr::build(4, &edges).unwrap();

    assert_eq!(csr.vertex_count(), 4);
    assert_eq!(csr.edge_count(), 4);
    for v in 0..4 {
        assert_eq!(csr.degree(v), 2);
    }
    assert!(csr.has_edge(0, 1, 4));
    assert!(csr.has_edge(1, 0, 4));
    assert!(csr.has_edge(3, 0, 9));
}

#[test]
fn rejects_an_edge_referencing_a_vertex_outside_the_declared_count() {
    let edges = [(0u32, 10u32, 1i64)];
    assert!(Csr::build(5, &edges).is_err());
}

#[test]
fn parallel_edges_are_both_retained() {
    let edges = [(0u32, 1u32, 3i64), (0, 1, 7)];
    let csr = Csr::build(2, &edges).unwrap();
    assert_eq!(csr.degree(0), 2);
    assert!(csr.has_edge(0, 1, 3));
    assert!(csr.has_edge(0, 1, 7));
}
