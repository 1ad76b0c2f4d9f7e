#[cfg(test)]
mod verify {
    use scrivener::assembly::YulWriter;
    use scrivener::formatting::{Layout, Syntax};
    use scrivener::language::{Node, NodeId, NodeKind, Tree};
    use scrivener::mapping::{Range, RangeMap};
    use scrivener::writing::*;
    use semver::Version;

    use crate::samples::{self, Builder};

    // Statements one per line, with no braces and no indentation.
    fn bare_block<'t>(
        tree: &'t Tree,
        id: NodeId,
        _writer: &Writer,
    ) -> Result<Vec<Item<'t>>, WritingError> {
        let mut items = Vec::new();
        for (i, child) in tree
            .children(id)
            .iter()
            .enumerate()
        {
            if i > 0 {
                items.push(Item::text(Syntax::Newline, "\n"));
            }
            items.push(Item::Node(*child));
        }
        Ok(items)
    }

    fn bare_writer() -> Writer {
        let mut table = strategies();
        table.insert(NodeKind::Block, bare_block);
        Writer::new(
            table,
            YulWriter::standard(Layout::default()),
            Options::default(),
        )
    }

    #[test]
    fn statements_exclude_terminator_from_ranges() {
        let (tree, block, first, second) = samples::two_returns();
        let writer = bare_writer();

        let mut ranges = RangeMap::new();
        let text = writer
            .render_tracked(&tree, block, &mut ranges)
            .unwrap();

        assert_eq!(text, "return 10;\nreturn 20;");
        assert_eq!(ranges[&first], Range::new(0, 9));
        assert_eq!(ranges[&second], Range::new(11, 9));
        assert_eq!(ranges[&block], Range::new(0, 20));
    }

    #[test]
    fn terminator_trim_can_be_disabled() {
        let (tree, block, first, second) = samples::two_returns();

        let mut table = strategies();
        table.insert(NodeKind::Block, bare_block);
        let options = Options {
            terminator: None,
            ..Options::default()
        };
        let writer = Writer::new(table, YulWriter::standard(Layout::default()), options);

        let mut ranges = RangeMap::new();
        writer
            .render_tracked(&tree, block, &mut ranges)
            .unwrap();

        assert_eq!(ranges[&first], Range::new(0, 10));
        assert_eq!(ranges[&second], Range::new(11, 10));
    }

    #[test]
    fn standard_block_layout() {
        let (tree, block, _, _) = samples::two_returns();
        let writer = Writer::standard(Options::default());

        let text = writer
            .render(&tree, block)
            .unwrap();
        assert_eq!(text, "{\n    return 10;\n    return 20;\n}");
    }

    #[test]
    fn missing_strategy_aborts_without_output() {
        let mut builder = Builder::new();
        let x = builder.identifier("x");
        let first = builder.returning(x);
        let one = builder.number("1");
        let second = builder.returning(one);
        let block = builder.block(vec![first, second]);
        let tree = builder.tree;

        let mut table = strategies();
        table.remove(NodeKind::Literal);
        let writer = Writer::new(
            table,
            YulWriter::standard(Layout::default()),
            Options::default(),
        );

        let mut ranges = RangeMap::new();
        let result = writer.render_tracked(&tree, block, &mut ranges);

        match result {
            Err(WritingError::StrategyNotFound { kind, dump }) => {
                assert_eq!(kind, "Literal");
                assert!(dump.contains("Literal"));
            }
            other => panic!("expected StrategyNotFound, got {:?}", other),
        }

        // the first statement was written before the failure, but nothing
        // of it escapes
        assert!(ranges.is_empty());
    }

    #[test]
    fn empty_table() {
        let (tree, block, _, _) = samples::two_returns();
        let writer = Writer::new(
            Strategies::new(),
            YulWriter::standard(Layout::default()),
            Options::default(),
        );

        let error = writer
            .render(&tree, block)
            .unwrap_err();
        assert!(error
            .to_string()
            .starts_with("Unable to find writer for Block node:"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let document = samples::load("counter");
        let writer = Writer::standard(Options::default());

        let mut first = RangeMap::new();
        let mut second = RangeMap::new();
        let one = writer
            .render_tracked(&document.tree, document.root, &mut first)
            .unwrap();
        let two = writer
            .render_tracked(&document.tree, document.root, &mut second)
            .unwrap();

        assert_eq!(one, two);
        assert_eq!(first, second);
    }

    #[test]
    fn description_flattens_to_rendered_text() {
        let document = samples::load("tally");
        let writer = Writer::standard(Options::default());

        let description = writer
            .describe(&document.tree, document.root)
            .unwrap();
        let text = writer
            .render(&document.tree, document.root)
            .unwrap();

        assert_eq!(flatten(&description), text);
    }

    #[test]
    fn description_structure() {
        let (tree, block, first, second) = samples::two_returns();
        let writer = bare_writer();

        let description = writer
            .describe(&tree, block)
            .unwrap();

        assert_eq!(description.len(), 3);
        assert!(matches!(&description[0], Segment::Node(id, _) if *id == first));
        assert_eq!(description[1], Segment::Text("\n".to_string()));

        let Segment::Node(id, inner) = &description[2] else {
            panic!("expected a node segment");
        };
        assert_eq!(*id, second);
        assert_eq!(inner[0], Segment::Text("return".to_string()));
        assert_eq!(flatten(inner), "return 20;");
    }

    #[test]
    fn fragments_match_isolated_rendering() {
        let document = samples::load("counter");
        let writer = Writer::standard(Options::default());

        let fragments = writer
            .fragments(&document.tree, document.root)
            .unwrap();

        assert_eq!(fragments.len(), document.tree.len());
        for (id, fragment) in &fragments {
            assert_eq!(
                *fragment,
                writer
                    .render(&document.tree, *id)
                    .unwrap()
            );
        }
    }

    #[test]
    fn nested_statements_indent_identically_in_isolation() {
        let document = samples::load("counter");
        let writer = Writer::standard(Options::default());

        let whole = writer
            .render(&document.tree, document.root)
            .unwrap();

        for id in document
            .tree
            .walk(document.root)
        {
            let fragment = writer
                .render(&document.tree, id)
                .unwrap();
            assert!(
                whole.contains(&fragment),
                "fragment of {} not found:\n{}",
                id,
                fragment
            );
        }
    }

    #[test]
    fn optional_syntax_is_absent() {
        let mut builder = Builder::new();
        let condition = builder.identifier("ready");
        let x = builder.identifier("x");
        let statement = builder.returning(x);
        let body = builder.block(vec![statement]);
        let branch = builder.add(Node::IfStatement {
            condition,
            true_body: body,
            false_body: None,
        });
        let tree = builder.tree;

        let writer = Writer::standard(Options::default());
        let mut ranges = RangeMap::new();
        let text = writer
            .render_tracked(&tree, branch, &mut ranges)
            .unwrap();

        assert_eq!(text, "if (ready) {\n    return x;\n}");
        assert_eq!(ranges.len(), 5);
        assert_eq!(ranges[&condition], Range::new(4, 5));
        assert_eq!(ranges[&body], Range::new(11, 17));
    }

    #[test]
    fn target_version_gates_syntax() {
        let mut builder = Builder::new();
        let one = builder.number("1");
        let statement = builder.returning(one);
        let unchecked = builder.add(Node::UncheckedBlock {
            statements: vec![statement],
        });
        let event = builder.identifier("Ticked");
        let argument = builder.identifier("x");
        let call = builder.add(Node::FunctionCall {
            expression: event,
            arguments: vec![argument],
        });
        let emit = builder.add(Node::EmitStatement { event_call: call });
        let tree = builder.tree;

        let current = Writer::standard(Options::default());
        assert_eq!(
            current
                .options()
                .target,
            Version::new(0, 8, 30)
        );
        assert_eq!(
            current
                .render(&tree, unchecked)
                .unwrap(),
            "unchecked {\n    return 1;\n}"
        );
        assert_eq!(
            current
                .render(&tree, emit)
                .unwrap(),
            "emit Ticked(x);"
        );

        let older = Writer::standard(Options {
            target: Version::new(0, 4, 17),
            ..Options::default()
        });
        assert_eq!(older.target(), &Version::new(0, 4, 17));

        let result = older.render(&tree, unchecked);
        assert!(matches!(
            result,
            Err(WritingError::UnsupportedSyntax {
                kind: NodeKind::UncheckedBlock,
                ..
            })
        ));

        let mut ranges = RangeMap::new();
        let text = older
            .render_tracked(&tree, emit, &mut ranges)
            .unwrap();
        assert_eq!(text, "Ticked(x);");
        assert_eq!(ranges[&emit], Range::new(0, 9));
        assert_eq!(ranges[&call], Range::new(0, 9));
    }
}
