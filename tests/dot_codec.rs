// tests/dot_codec.rs

mod common;
use crate::common::{init_tracing, sorted_edges, sorted_keys};

use std::error::Error;

use rungraph::dot::{decode, encode, EXAMPLE_GRAPH};
use rungraph::errors::RunGraphError;
use rungraph::fs::{FileSystem, RealFileSystem};

type TestResult = Result<(), Box<dyn Error>>;

const BUILD_GRAPH: &str = r#"
/* C build with two translation units */
strict digraph "hello build" {
    node [shape=ellipse];

    "main.c"; "util.c"; "util.h";

    compile_main [shape=box, label="Compile main", cmd="cc -c main.c -o main.o"];
    compile_util [shape=box; label="Compile util"
                  cmd="cc -c util.c -o util.o"];
    link [type=JOB, cmd="cc main.o util.o -o hello", "env.LDFLAGS"="-s"];

    "main.c" -> compile_main -> "main.o" -> link;
    "util.c" -> compile_util -> "util.o" -> link [color=grey];
    "util.h" -> compile_main;
    "util.h" -> compile_util;
    link -> hello
}
"#;

#[test]
fn decodes_a_realistic_build_graph() -> TestResult {
    init_tracing();
    let g = decode(BUILD_GRAPH)?;

    assert_eq!(g.node_count(), 9);
    assert_eq!(g.edge_count(), 9);

    let main_c = g.node_by_key("main.c").ok_or("main.c missing")?;
    let compile = g.node_by_key("compile_util").ok_or("compile_util missing")?;
    let util_o = g.node_by_key("util.o").ok_or("util.o missing")?;
    let link = g.node_by_key("link").ok_or("link missing")?;

    assert_eq!(g.node_attribute(main_c, "shape"), Some("ellipse"));
    assert_eq!(g.node_attribute(compile, "label"), Some("Compile util"));
    assert_eq!(g.node_attribute(link, "env.LDFLAGS"), Some("-s"));
    assert_eq!(g.edge_attribute(util_o, link, "color"), Some("grey"));
    assert_eq!(g.edge_attribute(compile, util_o, "color"), Some("grey"));
    Ok(())
}

#[test]
fn encoded_graph_decodes_to_the_same_graph() -> TestResult {
    init_tracing();
    let g = decode(BUILD_GRAPH)?;
    let text = encode(&g);
    assert!(text.starts_with("strict digraph {"));

    let again = decode(&text)?;
    assert_eq!(sorted_keys(&again), sorted_keys(&g));
    assert_eq!(sorted_edges(&again), sorted_edges(&g));
    for node in g.nodes() {
        let id = again.node_by_key(node.key()).ok_or("node lost")?;
        assert_eq!(again.node(id).map(|n| n.attributes()), Some(node.attributes()));
    }
    Ok(())
}

#[test]
fn graph_file_round_trip_on_disk() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let fs = RealFileSystem;
    let path = dir.path().join("example.dot");

    fs.write(&path, encode(&decode(EXAMPLE_GRAPH)?).as_bytes())?;
    let g = decode(&fs.read_to_string(&path)?)?;

    assert_eq!(sorted_keys(&g), vec!["A", "B", "C", "D", "E", "F"]);
    assert_eq!(g.edge_count(), 7);
    Ok(())
}

#[test]
fn errors_point_at_the_offending_token() {
    init_tracing();
    match decode("digraph {\n  a -> b;\n  c -> [x=1]\n}") {
        Err(RunGraphError::Decode { line, column, .. }) => {
            assert_eq!((line, column), (3, 8));
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn empty_graph() -> TestResult {
    let g = decode("digraph {}")?;
    assert!(g.is_empty());
    assert_eq!(encode(&g), "strict digraph {\n}\n");
    Ok(())
}
