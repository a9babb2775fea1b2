use graph_editor::{AnalysisSettings, Graph, GraphError, GraphView, Report, analyze};
use ndarray::{Array2, array};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spectral::{Polynomial, SpectralError};

fn edge_list(g: &Graph) -> Vec<(String, String)> {
    g.edges()
        .map(|e| {
            let (a, b) = e.endpoints();
            (a.to_string(), b.to_string())
        })
        .collect()
}

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

fn report(g: &Graph) -> Report {
    analyze(g.snapshot().view(), &AnalysisSettings::default()).unwrap()
}

fn poly_text(p: &Result<Polynomial, SpectralError>) -> String {
    p.as_ref().unwrap().to_string()
}

fn scenario_a() -> Graph {
    let mut g = Graph::new();
    let ids: Vec<String> = (0..3).map(|_| g.add_vertex(None).unwrap()).collect();
    assert_eq!(ids, vec!["V0", "V1", "V2"]);
    g.toggle_edge("V0", "V1").unwrap();
    g.toggle_edge("V1", "V2").unwrap();
    g
}

#[test]
fn test_path_of_three() {
    let g = scenario_a();
    assert_eq!(edge_list(&g), pairs(&[("V0", "V1"), ("V1", "V2")]));
    assert_eq!(g.snapshot(), array![[0u8, 1, 0], [1, 0, 1], [0, 1, 0]]);

    let r = report(&g);
    assert_eq!(r.laplacian, array![[1i64, -1, 0], [-1, 2, -1], [0, -1, 1]]);
    assert_eq!(poly_text(&r.adjacency_char_poly), "x^3 - 2*x");
    assert_eq!(poly_text(&r.laplacian_char_poly), "x^3 - 4*x^2 + 3*x");
}

#[test]
fn test_complete_over_path_toggles_pairs() {
    let mut g = scenario_a();
    g.build_complete(&["V0", "V1", "V2"]).unwrap();
    assert_eq!(edge_list(&g), pairs(&[("V0", "V2")]));
}

#[test]
fn test_removing_middle_vertex() {
    let mut g = scenario_a();
    g.remove_vertices(&["V1"]).unwrap();
    assert_eq!(g.vertices().collect::<Vec<_>>(), vec!["V0", "V2"]);
    assert_eq!(g.snapshot(), Array2::<u8>::zeros((2, 2)));
    assert_eq!(report(&g).components, 2);
}

#[test]
fn test_star_on_edgeless_graph() {
    let mut g = Graph::new();
    for _ in 0..3 {
        g.add_vertex(None).unwrap();
    }
    g.build_star(&["V0", "V1", "V2"]).unwrap();
    assert_eq!(edge_list(&g), pairs(&[("V0", "V2"), ("V1", "V2")]));
}

#[test]
fn test_empty_graph_analysis() {
    let r = report(&Graph::new());
    assert!(r.adjacency_eigenvalues.is_empty());
    assert!(r.laplacian_eigenvalues.is_empty());
    assert_eq!(r.adjacency_char_poly, Ok(Polynomial::one()));
    assert_eq!(poly_text(&r.laplacian_char_poly), "1");
}

#[test]
fn test_triangle_spectrum() {
    let mut g = Graph::new();
    for _ in 0..3 {
        g.add_vertex(None).unwrap();
    }
    g.build_complete(&["V0", "V1", "V2"]).unwrap();
    let r = report(&g);
    for (got, want) in r.adjacency_eigenvalues.iter().zip([-1.0, -1.0, 2.0]) {
        assert!((got - want).abs() < 1e-9, "{:?}", r.adjacency_eigenvalues);
    }
}

#[test]
fn test_complete_graphs_keep_full_report() {
    for n in [17usize, 20] {
        let mut g = Graph::new();
        let ids: Vec<String> = (0..n).map(|_| g.add_vertex(None).unwrap()).collect();
        assert_eq!(g.build_complete(&ids), Ok(n * (n - 1) / 2));

        let r = report(&g);
        let x = n as i64;
        let lap = r.laplacian_char_poly.as_ref().unwrap();
        assert_eq!(lap.degree(), Some(n));
        assert!(lap.is_root(x), "K{} laplacian at {}", n, x);
        assert!(lap.is_root(0));
        assert!(r.adjacency_char_poly.as_ref().unwrap().is_root(x - 1));

        assert_eq!(r.adjacency_eigenvalues.len(), n);
        assert_eq!(r.laplacian_eigenvalues.len(), n);
        let largest = r.laplacian_eigenvalues[n - 1];
        assert!((largest - n as f64).abs() < 1e-6, "{:?}", r.laplacian_eigenvalues);
        assert_eq!(r.components, 1);
    }
}

#[test]
fn test_failed_analysis_leaves_graph_intact() {
    let mut g = scenario_a();
    g.toggle_edge("V0", "V2").unwrap();
    let before = g.snapshot();
    let settings = AnalysisSettings {
        max_sweeps: 0,
        ..AnalysisSettings::default()
    };
    assert!(analyze(g.snapshot().view(), &settings).is_err());
    assert_eq!(g.snapshot(), before);
    assert_eq!(g.edge_count(), 3);
}

// ------------------------------------------------------------------
// Random edit sequences
// ------------------------------------------------------------------

fn pick(rng: &mut StdRng, ids: &[String], n: usize) -> Vec<String> {
    (0..n)
        .map(|_| {
            // occasionally name a vertex that does not exist
            if ids.is_empty() || rng.random_bool(0.05) {
                "ghost".to_string()
            } else {
                ids[rng.random_range(0..ids.len())].clone()
            }
        })
        .collect()
}

fn check_invariants(g: &Graph) {
    assert!(g.is_consistent());
    let a = g.snapshot();
    let n = g.vertex_count();
    assert_eq!(a.dim(), (n, n));
    assert_eq!(a, a.t());
    for i in 0..n {
        assert_eq!(a[[i, i]], 0);
        let id = g.id_at(i).unwrap();
        assert_eq!(g.index_of(id), Some(i));
    }

    let r = report(g);
    for i in 0..n {
        let degree: i64 = a.row(i).iter().map(|&x| i64::from(x)).sum();
        assert_eq!(r.laplacian[[i, i]], degree);
        for j in 0..n {
            if i != j {
                assert_eq!(r.laplacian[[i, j]], -i64::from(a[[i, j]]));
            }
        }
    }
    assert_eq!(
        r.components,
        GraphView::from_graph(g).connected_components()
    );
}

#[test]
fn test_random_edits_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut g = Graph::new();

    for step in 0..400 {
        let ids: Vec<String> = g.vertices().map(str::to_string).collect();
        let before = g.snapshot();
        let k = rng.random_range(1..5);

        let result = match rng.random_range(0..7) {
            0 | 1 if ids.len() < 10 => g.add_vertex(None).map(|_| ()),
            2 => g.remove_vertices(&pick(&mut rng, &ids, 1)),
            3 => {
                let sel = pick(&mut rng, &ids, 2);
                g.toggle_edge(&sel[0], &sel[1]).map(|_| ())
            }
            4 => g.build_complete(&pick(&mut rng, &ids, k)).map(|_| ()),
            5 => g.build_star(&pick(&mut rng, &ids, k)).map(|_| ()),
            _ => g.clear_edges_among(&pick(&mut rng, &ids, k)).map(|_| ()),
        };

        match result {
            Ok(()) => {}
            Err(GraphError::UnknownVertex(_) | GraphError::SelfLoopRejected(_)) => {
                assert_eq!(g.snapshot(), before, "step {}", step);
            }
            Err(e) => panic!("step {}: unexpected error {}", step, e),
        }
        check_invariants(&g);
    }
}

#[test]
fn test_double_toggle_restores_edges() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut g = Graph::new();
    for _ in 0..6 {
        g.add_vertex(None).unwrap();
    }
    let ids: Vec<String> = g.vertices().map(str::to_string).collect();
    for _ in 0..10 {
        let u = rng.random_range(0..6);
        let v = (u + rng.random_range(1..6)) % 6;
        g.toggle_edge(&ids[u], &ids[v]).unwrap();
    }

    let before = edge_list(&g);
    let selection = vec!["V4", "V1", "V3", "V0"];
    g.build_complete(&selection).unwrap();
    g.build_complete(&selection).unwrap();
    assert_eq!(edge_list(&g), before);

    g.build_star(&selection).unwrap();
    g.build_star(&selection).unwrap();
    assert_eq!(edge_list(&g), before);
}
