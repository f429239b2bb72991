use pretty_assertions::assert_eq;

#[test]
fn snapshot_document_with_named_box() {
    let input = "\
compgraph
node A \"A!\" (w, x) -> (y, z)
node B (i, j) -> (k)
ext1 -> A.x
ext1 -> B.i
A.z -> B.j
A.y -> ext2
";
    let output = compgraph2txt::render(input).unwrap();
    let expected = [
        "│ ╭────────╮",
        "│ │   A!   │",
        "│ ├────────┤",
        "│ │─ w  y ─┼→",
        "├─┼→ x  z ─┼─╮",
        "│ ╰────────╯ │ ",
        "│ ╭──────────╯",
        "│ │ ╭─────────╮",
        "│ │ │    B    │",
        "│ │ ├─────────┤",
        "╰───┼→ i   k ─│",
        "  ╰─┼→ j      │",
        "    ╰─────────╯ ",
    ]
    .join("\n");
    assert_eq!(output, expected);
}

#[test]
fn snapshot_document_declaration_order_does_not_matter() {
    let edges_first = "\
compgraph
A.a -> B.b
node B (b) -> ()
node A () -> (a)
";
    let nodes_first = "\
compgraph
node A () -> (a)
node B (b) -> ()
A.a -> B.b
";
    let a = compgraph2txt::render(edges_first).unwrap();
    let b = compgraph2txt::render(nodes_first).unwrap();
    assert_eq!(a, b);
    assert!(a.contains("a ─┼─╮"));
    assert!(a.contains("╰─┼→ b"));
}

#[test]
fn snapshot_square_corners() {
    let input = "compgraph\nnode A () -> (a)\nnode B (b) -> ()\nA.a -> B.b\n";
    let options = compgraph2txt::RenderOptions {
        rounded_corners: false,
    };
    let output = compgraph2txt::render_with_options(input, &options).unwrap();
    let expected = [
        "┌─────┐",
        "│  A  │",
        "├─────┤",
        "│  a ─┼─┐",
        "└─────┘ │ ",
        "┌───────┘",
        "│ ┌─────┐",
        "│ │  B  │",
        "│ ├─────┤",
        "└─┼→ b  │",
        "  └─────┘ ",
    ]
    .join("\n");
    assert_eq!(output, expected);
}

#[test]
fn snapshot_comments_and_blank_lines_are_ignored() {
    let input = "\
# pipeline
compgraph

%% sources
node F \"filter\" (raw) -> (clean)
camera -> F.raw
F.clean -> display
";
    let output = compgraph2txt::render(input).unwrap();
    assert!(output.contains("filter"));
    assert!(output.contains("╰─┼→ raw"));
    assert!(output.contains("clean ─┼→"));
}

#[test]
fn snapshot_validation_error_surfaces_from_document() {
    let input = "compgraph\nnode A (a) -> (b)\nnode B (c) -> (d)\nA.b -> B.c\nx -> B.c\n";
    let err = compgraph2txt::render(input).unwrap_err();
    assert_eq!(err.kind(), compgraph2txt::ErrorKind::MultipleSources);
}

#[test]
fn snapshot_syntax_error() {
    let err = compgraph2txt::render("compgraph\nnode A (a -> (b)\n").unwrap_err();
    assert_eq!(err.kind(), compgraph2txt::ErrorKind::Syntax);
    assert!(err.to_string().starts_with("syntax error on line 2"), "got: {err}");
}
