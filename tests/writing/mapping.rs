#[cfg(test)]
mod verify {
    use scrivener::language::{Document, NodeId};
    use scrivener::mapping::*;
    use scrivener::writing::{Options, Writer};

    use crate::samples::{self, Builder};

    fn reconstruct(document: &Document) -> (String, FragmentMap, RangeMap) {
        let writer = Writer::standard(Options::default());
        let text = writer
            .render(&document.tree, document.root)
            .unwrap();
        let fragments = writer
            .fragments(&document.tree, document.root)
            .unwrap();
        let ranges = SourceMapComputer::default()
            .compute(&document.tree, document.root, &fragments)
            .unwrap();
        (text, fragments, ranges)
    }

    #[test]
    fn every_range_locates_its_fragment() {
        for name in ["counter", "tally"] {
            let document = samples::load(name);
            let (text, fragments, ranges) = reconstruct(&document);

            assert_eq!(ranges.len(), document.tree.len());
            for (id, range) in &ranges {
                let fragment = &fragments[id];
                let kind = document
                    .tree
                    .kind(*id)
                    .unwrap();
                let expected = &fragment[..span_length(kind, fragment, Some(';'))];

                assert_eq!(
                    &text[range.offset..range.end()],
                    expected,
                    "{} in {}",
                    id,
                    name
                );
            }
        }
    }

    #[test]
    fn children_lie_within_parents() {
        let document = samples::load("tally");
        let (_, _, ranges) = reconstruct(&document);
        let tree = &document.tree;

        for id in tree.walk(document.root) {
            let Some(parent) = tree.parent(id) else {
                continue;
            };
            let outer = ranges[&parent];
            let inner = ranges[&id];

            assert!(outer.contains(&inner), "{} escapes {}", id, parent);
        }
    }

    #[test]
    fn siblings_do_not_overlap() {
        for name in ["counter", "tally"] {
            let document = samples::load(name);
            let (_, _, ranges) = reconstruct(&document);
            let tree = &document.tree;

            for id in tree.walk(document.root) {
                let children = tree.children(id);
                for pair in children.windows(2) {
                    let a = ranges[&pair[0]];
                    let b = ranges[&pair[1]];
                    assert!(a.end() <= b.offset, "{} overlaps {}", pair[0], pair[1]);
                }
            }
        }
    }

    #[test]
    fn live_tracking_agrees_with_reconstruction() {
        for name in ["counter", "tally"] {
            let document = samples::load(name);
            let (_, fragments, reconstructed) = reconstruct(&document);

            let writer = Writer::standard(Options::default());
            let mut relative = RangeMap::new();
            writer
                .render_tracked(&document.tree, document.root, &mut relative)
                .unwrap();
            let live = to_absolute(&document.tree, document.root, &relative).unwrap();

            for (id, range) in &live {
                if fragments[id].is_empty() {
                    continue;
                }
                assert_eq!(*range, reconstructed[id], "{} in {}", id, name);
            }
        }
    }

    #[test]
    fn known_locations() {
        let document = samples::load("counter");
        let (_, _, ranges) = reconstruct(&document);

        // pragma solidity ^0.8.0;
        assert_eq!(ranges[&NodeId(28)], Range::new(0, 23));
        // contract Counter { ... }
        assert_eq!(ranges[&NodeId(27)].offset, 25);
        // uint256 total
        assert_eq!(ranges[&NodeId(1)], Range::new(48, 13));
        // the second `total`, on the right of the assignment
        let assignment = ranges[&NodeId(12)];
        assert_eq!(ranges[&NodeId(8)].offset, assignment.offset);
        assert_eq!(ranges[&NodeId(9)].offset, assignment.offset + 8);
    }

    #[test]
    fn repeated_text_is_told_apart() {
        let mut builder = Builder::new();
        let x = builder.identifier("x");
        let y = builder.identifier("x");
        let sum = builder.add(scrivener::language::Node::BinaryOperation {
            operator: "+".to_string(),
            left_expression: x,
            right_expression: y,
        });
        let document = Document {
            tree: builder.tree,
            root: sum,
        };

        let (text, _, ranges) = reconstruct(&document);
        assert_eq!(text, "x + x");
        assert_eq!(ranges[&x], Range::new(0, 1));
        assert_eq!(ranges[&y], Range::new(4, 1));
    }

    #[test]
    fn missing_fragments_are_empty() {
        let (tree, block, first, second) = samples::two_returns();
        let writer = Writer::standard(Options::default());
        let mut fragments = writer
            .fragments(&tree, block)
            .unwrap();

        // leave out the first statement's literal
        let ten = tree.children(first)[0];
        fragments.remove(&ten);

        let ranges = SourceMapComputer::default()
            .compute(&tree, block, &fragments)
            .unwrap();

        assert_eq!(ranges[&ten], Range::new(6, 0));
        assert_eq!(ranges[&first], Range::new(6, 9));
        assert_eq!(ranges[&second], Range::new(21, 9));
    }

    #[test]
    fn locations_in_compiler_notation() {
        let document = samples::load("counter");
        let (_, _, ranges) = reconstruct(&document);

        let location = ranges[&NodeId(28)].location(Some(0));
        assert_eq!(location.to_string(), "0:23:0");
        assert_eq!("0:23:0".parse::<SourceLocation>(), Ok(location));

        let location = ranges[&NodeId(28)].location(None);
        assert_eq!(location.to_string(), "0:23:-1");
    }
}
