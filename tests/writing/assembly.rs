#[cfg(test)]
mod verify {
    use serde_json::json;

    use scrivener::assembly::*;
    use scrivener::formatting::{Indent, Layout};
    use scrivener::language::{Node, NodeKind};
    use scrivener::mapping::{Range, RangeMap};
    use scrivener::writing::*;

    use crate::samples::Builder;

    fn assignment() -> YulNode {
        serde_json::from_value(json!({
            "nodeType": "YulBlock",
            "statements": [{
                "nodeType": "YulAssignment",
                "variableNames": [{ "nodeType": "YulIdentifier", "name": "r" }],
                "value": { "nodeType": "YulLiteral", "kind": "number", "value": "7", "type": "" }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn embedded_at_statement_depth() {
        let mut builder = Builder::new();
        let inline = builder.add(Node::InlineAssembly { ast: assignment() });
        let inner = builder.block(vec![inline]);
        let outer = builder.block(vec![inner]);
        let tree = builder.tree;

        let writer = Writer::standard(Options::default());
        let mut ranges = RangeMap::new();
        let text = writer
            .render_tracked(&tree, outer, &mut ranges)
            .unwrap();

        assert_eq!(
            text,
            "{\n    {\n        assembly {\n            r := 7\n        }\n    }\n}"
        );
        // relative to the enclosing block
        assert_eq!(ranges[&inline], Range::new(10, 39));
    }

    #[test]
    fn layout_is_shared_with_primary_writer() {
        let mut builder = Builder::new();
        let inline = builder.add(Node::InlineAssembly { ast: assignment() });
        let block = builder.block(vec![inline]);
        let tree = builder.tree;

        let options = Options {
            layout: Layout {
                indent: Indent::Tabs,
                newline: "\n".to_string(),
            },
            ..Options::default()
        };
        let writer = Writer::standard(options);

        let text = writer
            .render(&tree, block)
            .unwrap();
        assert_eq!(text, "{\n\tassembly {\n\t\tr := 7\n\t}\n}");
    }

    #[test]
    fn unknown_tag_surfaces_through_primary_writer() {
        let mut builder = Builder::new();
        let ast = YulNode::new("YulObject").with("name", "Token");
        let inline = builder.add(Node::InlineAssembly { ast });
        let tree = builder.tree;

        let writer = Writer::standard(Options::default());
        match writer.render(&tree, inline) {
            Err(WritingError::StrategyNotFound { kind, dump }) => {
                assert_eq!(kind, "YulObject");
                assert!(dump.contains("Token"));
            }
            other => panic!("expected StrategyNotFound, got {:?}", other),
        }
    }

    #[test]
    fn replacing_a_dialect_strategy() {
        fn shout(node: &YulNode, _: &YulWriter, _: usize) -> Result<String, WritingError> {
            Ok(node
                .text("name")?
                .to_uppercase())
        }

        let mut table = scrivener::assembly::strategies();
        table.insert("YulIdentifier", shout);
        let assembly = YulWriter::new(table, Layout::default());

        let writer = Writer::new(
            scrivener::writing::strategies(),
            assembly,
            Options::default(),
        );

        let mut builder = Builder::new();
        let inline = builder.add(Node::InlineAssembly { ast: assignment() });
        let tree = builder.tree;

        assert_eq!(tree.kind(inline), Ok(NodeKind::InlineAssembly));
        assert_eq!(
            writer
                .render(&tree, inline)
                .unwrap(),
            "assembly {\n    R := 7\n}"
        );
    }
}
