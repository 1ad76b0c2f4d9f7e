//! Strategies for writing each kind of Solidity node

use semver::Version;
use std::borrow::Cow;

use super::error::WritingError;
use super::strategy::Strategies;
use super::writer::{Item, Writer};
use crate::formatting::Syntax;
use crate::language::{LiteralKind, Node, NodeId, NodeKind, Tree};

/// A table with every kind of node registered.
pub fn strategies() -> Strategies {
    let mut table = Strategies::new();

    table.insert(NodeKind::SourceUnit, source_unit);
    table.insert(NodeKind::PragmaDirective, pragma_directive);
    table.insert(NodeKind::ContractDefinition, contract_definition);
    table.insert(NodeKind::FunctionDefinition, function_definition);
    table.insert(NodeKind::ParameterList, parameter_list);
    table.insert(NodeKind::VariableDeclaration, variable_declaration);
    table.insert(NodeKind::ElementaryTypeName, elementary_type_name);
    table.insert(NodeKind::Block, block);
    table.insert(NodeKind::UncheckedBlock, unchecked_block);
    table.insert(
        NodeKind::VariableDeclarationStatement,
        variable_declaration_statement,
    );
    table.insert(NodeKind::ExpressionStatement, expression_statement);
    table.insert(NodeKind::Return, return_statement);
    table.insert(NodeKind::IfStatement, if_statement);
    table.insert(NodeKind::WhileStatement, while_statement);
    table.insert(NodeKind::ForStatement, for_statement);
    table.insert(NodeKind::Break, break_statement);
    table.insert(NodeKind::Continue, continue_statement);
    table.insert(NodeKind::EmitStatement, emit_statement);
    table.insert(NodeKind::InlineAssembly, inline_assembly);
    table.insert(NodeKind::Identifier, identifier);
    table.insert(NodeKind::Literal, literal);
    table.insert(NodeKind::UnaryOperation, unary_operation);
    table.insert(NodeKind::BinaryOperation, binary_operation);
    table.insert(NodeKind::Assignment, assignment);
    table.insert(NodeKind::FunctionCall, function_call);
    table.insert(NodeKind::MemberAccess, member_access);
    table.insert(NodeKind::IndexAccess, index_access);
    table.insert(NodeKind::TupleExpression, tuple_expression);

    table
}

/// How many levels in a node is written: the number of enclosing contracts
/// and blocks. This depends only on where the node sits in the tree, so a
/// node writes identically on its own and as part of its parent.
pub fn nesting(tree: &Tree, id: NodeId) -> usize {
    tree.ancestors(id)
        .filter(|ancestor| {
            tree.kind(*ancestor)
                .map(|kind| kind.opens_scope())
                .unwrap_or(false)
        })
        .count()
}

fn unexpected(tree: &Tree, id: NodeId, expected: NodeKind) -> WritingError {
    match tree.kind(id) {
        Ok(found) => WritingError::UnexpectedKind {
            expected,
            found,
            dump: tree.print(id),
        },
        Err(error) => error.into(),
    }
}

// Syntax that first appeared in `since` cannot be written for an older
// compiler.
fn available(tree: &Tree, id: NodeId, writer: &Writer, since: Version) -> Result<(), WritingError> {
    if *writer.target() >= since {
        return Ok(());
    }

    Err(WritingError::UnsupportedSyntax {
        kind: tree.kind(id)?,
        target: writer
            .target()
            .clone(),
        dump: tree.print(id),
    })
}

fn keyword<'t>(content: &'static str) -> Item<'t> {
    Item::text(Syntax::Keyword, content)
}

fn structure<'t>(content: &'static str) -> Item<'t> {
    Item::text(Syntax::Structure, content)
}

fn newline<'t>(writer: &Writer) -> Item<'t> {
    Item::text(
        Syntax::Newline,
        writer
            .layout()
            .newline()
            .to_string(),
    )
}

fn indent<'t>(writer: &Writer, depth: usize) -> Item<'t> {
    Item::text(
        Syntax::Indent,
        writer
            .layout()
            .indent(depth),
    )
}

// Children separated by the given text, as in argument lists.
fn separated<'t>(items: &mut Vec<Item<'t>>, nodes: &[NodeId], separator: &'static str) {
    for (i, node) in nodes
        .iter()
        .enumerate()
    {
        if i > 0 {
            items.push(structure(separator));
        }
        items.push(Item::Node(*node));
    }
}

// Statements one per line inside braces, each a level deeper than the
// closing brace.
fn braced<'t>(writer: &Writer, depth: usize, statements: &[NodeId]) -> Vec<Item<'t>> {
    if statements.is_empty() {
        return vec![structure("{}")];
    }

    let mut items = vec![structure("{"), newline(writer)];
    for statement in statements {
        items.push(indent(writer, depth + 1));
        items.push(Item::Node(*statement));
        items.push(newline(writer));
    }
    items.push(indent(writer, depth));
    items.push(structure("}"));
    items
}

fn source_unit<'t>(
    tree: &'t Tree,
    id: NodeId,
    writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::SourceUnit { nodes } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::SourceUnit));
    };

    let mut items = Vec::new();
    for (i, node) in nodes
        .iter()
        .enumerate()
    {
        if i > 0 {
            items.push(newline(writer));
            items.push(newline(writer));
        }
        items.push(Item::Node(*node));
    }
    Ok(items)
}

fn pragma_directive<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::PragmaDirective { literals } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::PragmaDirective));
    };

    // the first literal names the pragma, the rest is its value and is
    // joined without spaces, `solidity` `^` `0.8` `.0` and so on.
    let mut items = vec![keyword("pragma")];
    if let Some((name, value)) = literals.split_first() {
        items.push(Item::text(Syntax::Neutral, " "));
        items.push(Item::text(Syntax::Pragma, name.as_str()));
        if !value.is_empty() {
            items.push(Item::text(Syntax::Neutral, " "));
            items.push(Item::text(Syntax::Pragma, value.concat()));
        }
    }
    items.push(structure(";"));
    Ok(items)
}

fn contract_definition<'t>(
    tree: &'t Tree,
    id: NodeId,
    writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::ContractDefinition {
        name,
        contract_kind,
        nodes,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::ContractDefinition));
    };

    let depth = nesting(tree, id);

    let mut items = vec![
        keyword(contract_kind.keyword()),
        Item::text(Syntax::Neutral, " "),
        Item::text(Syntax::Declaration, name.as_str()),
        Item::text(Syntax::Neutral, " "),
    ];

    if nodes.is_empty() {
        items.push(structure("{}"));
        return Ok(items);
    }

    items.push(structure("{"));
    for (i, node) in nodes
        .iter()
        .enumerate()
    {
        // members are separated by a blank line
        if i > 0 {
            items.push(newline(writer));
        }
        items.push(newline(writer));
        items.push(indent(writer, depth + 1));
        items.push(Item::Node(*node));

        // state variables carry their terminator here, since the same
        // declaration node is also used for parameters
        if let NodeKind::VariableDeclaration = tree.kind(*node)? {
            items.push(structure(";"));
        }
    }
    items.push(newline(writer));
    items.push(indent(writer, depth));
    items.push(structure("}"));
    Ok(items)
}

fn function_definition<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::FunctionDefinition {
        name,
        visibility,
        state_mutability,
        parameters,
        return_parameters,
        body,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::FunctionDefinition));
    };

    let mut items = vec![
        keyword("function"),
        Item::text(Syntax::Neutral, " "),
        Item::text(Syntax::Declaration, name.as_str()),
        structure("("),
        Item::Node(*parameters),
        structure(")"),
    ];

    for modifier in [visibility.keyword(), state_mutability.keyword()]
        .into_iter()
        .flatten()
    {
        items.push(Item::text(Syntax::Neutral, " "));
        items.push(keyword(modifier));
    }

    // An empty return parameter list is still in the tree, but is not
    // written at all.
    let returns = match tree.node(*return_parameters)? {
        Node::ParameterList { parameters } if parameters.is_empty() => false,
        _ => true,
    };
    if returns {
        items.push(Item::text(Syntax::Neutral, " "));
        items.push(keyword("returns"));
        items.push(Item::text(Syntax::Neutral, " "));
        items.push(structure("("));
        items.push(Item::Node(*return_parameters));
        items.push(structure(")"));
    } else {
        items.push(Item::Absent);
    }

    match body {
        Some(body) => {
            items.push(Item::text(Syntax::Neutral, " "));
            items.push(Item::Node(*body));
        }
        None => items.push(structure(";")),
    }

    Ok(items)
}

fn parameter_list<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::ParameterList { parameters } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::ParameterList));
    };

    let mut items = Vec::new();
    separated(&mut items, parameters, ", ");
    Ok(items)
}

fn variable_declaration<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::VariableDeclaration {
        name,
        type_name,
        storage_location,
        value,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::VariableDeclaration));
    };

    let mut items = vec![Item::Node(*type_name)];

    if let Some(location) = storage_location.keyword() {
        items.push(Item::text(Syntax::Neutral, " "));
        items.push(keyword(location));
    }

    // return parameters are frequently unnamed
    if !name.is_empty() {
        items.push(Item::text(Syntax::Neutral, " "));
        items.push(Item::text(Syntax::Variable, name.as_str()));
    }

    if let Some(value) = value {
        items.push(Item::text(Syntax::Operator, " = "));
        items.push(Item::Node(*value));
    }

    Ok(items)
}

fn elementary_type_name<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::ElementaryTypeName { name } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::ElementaryTypeName));
    };

    Ok(vec![Item::text(Syntax::Type, name.as_str())])
}

fn block<'t>(tree: &'t Tree, id: NodeId, writer: &Writer) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::Block { statements } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::Block));
    };

    Ok(braced(writer, nesting(tree, id), statements))
}

fn unchecked_block<'t>(
    tree: &'t Tree,
    id: NodeId,
    writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::UncheckedBlock { statements } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::UncheckedBlock));
    };

    available(tree, id, writer, Version::new(0, 8, 0))?;

    let mut items = vec![keyword("unchecked"), Item::text(Syntax::Neutral, " ")];
    items.extend(braced(writer, nesting(tree, id), statements));
    Ok(items)
}

fn variable_declaration_statement<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::VariableDeclarationStatement {
        declarations,
        initial_value,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::VariableDeclarationStatement));
    };

    let mut items = Vec::new();

    if declarations.len() == 1 {
        items.push(Item::Node(declarations[0]));
    } else {
        items.push(structure("("));
        separated(&mut items, declarations, ", ");
        items.push(structure(")"));
    }

    if let Some(value) = initial_value {
        items.push(Item::text(Syntax::Operator, " = "));
        items.push(Item::Node(*value));
    }

    items.push(structure(";"));
    Ok(items)
}

fn expression_statement<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::ExpressionStatement { expression } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::ExpressionStatement));
    };

    // the loop expression in a `for` header is a statement, but the
    // header's `)` takes the place of its terminator
    let header = match tree
        .parent(id)
        .map(|parent| tree.node(parent))
    {
        Some(Ok(Node::ForStatement {
            loop_expression: Some(looped),
            ..
        })) => *looped == id,
        _ => false,
    };

    if header {
        Ok(vec![Item::Node(*expression)])
    } else {
        Ok(vec![Item::Node(*expression), structure(";")])
    }
}

fn return_statement<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::Return { expression } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::Return));
    };

    let mut items = vec![keyword("return")];
    if let Some(expression) = expression {
        items.push(Item::text(Syntax::Neutral, " "));
        items.push(Item::Node(*expression));
    }
    items.push(structure(";"));
    Ok(items)
}

fn if_statement<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::IfStatement {
        condition,
        true_body,
        false_body,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::IfStatement));
    };

    let mut items = vec![
        keyword("if"),
        Item::text(Syntax::Neutral, " "),
        structure("("),
        Item::Node(*condition),
        structure(")"),
        Item::text(Syntax::Neutral, " "),
        Item::Node(*true_body),
    ];

    if let Some(false_body) = false_body {
        items.push(Item::text(Syntax::Neutral, " "));
        items.push(keyword("else"));
        items.push(Item::text(Syntax::Neutral, " "));
        items.push(Item::Node(*false_body));
    }

    Ok(items)
}

fn while_statement<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::WhileStatement { condition, body } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::WhileStatement));
    };

    Ok(vec![
        keyword("while"),
        Item::text(Syntax::Neutral, " "),
        structure("("),
        Item::Node(*condition),
        structure(")"),
        Item::text(Syntax::Neutral, " "),
        Item::Node(*body),
    ])
}

fn for_statement<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::ForStatement {
        initialization_expression,
        condition,
        loop_expression,
        body,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::ForStatement));
    };

    let mut items = vec![
        keyword("for"),
        Item::text(Syntax::Neutral, " "),
        structure("("),
    ];

    // the initialization is a statement and brings its own `;`
    match initialization_expression {
        Some(initialization) => items.push(Item::Node(*initialization)),
        None => items.push(structure(";")),
    }

    if let Some(condition) = condition {
        items.push(Item::text(Syntax::Neutral, " "));
        items.push(Item::Node(*condition));
    }
    items.push(structure(";"));

    if let Some(expression) = loop_expression {
        items.push(Item::text(Syntax::Neutral, " "));
        items.push(Item::Node(*expression));
    }

    items.push(structure(")"));
    items.push(Item::text(Syntax::Neutral, " "));
    items.push(Item::Node(*body));
    Ok(items)
}

fn break_statement<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::Break = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::Break));
    };

    Ok(vec![keyword("break"), structure(";")])
}

fn continue_statement<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::Continue = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::Continue));
    };

    Ok(vec![keyword("continue"), structure(";")])
}

fn emit_statement<'t>(
    tree: &'t Tree,
    id: NodeId,
    writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::EmitStatement { event_call } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::EmitStatement));
    };

    // before 0.4.21 events were fired by calling them
    if *writer.target() < Version::new(0, 4, 21) {
        return Ok(vec![Item::Node(*event_call), structure(";")]);
    }

    Ok(vec![
        keyword("emit"),
        Item::text(Syntax::Neutral, " "),
        Item::Node(*event_call),
        structure(";"),
    ])
}

fn inline_assembly<'t>(
    tree: &'t Tree,
    id: NodeId,
    writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::InlineAssembly { ast } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::InlineAssembly));
    };

    let code = writer
        .assembly()
        .render_at(ast, nesting(tree, id))?;

    Ok(vec![
        keyword("assembly"),
        Item::text(Syntax::Neutral, " "),
        Item::text(Syntax::Assembly, code),
    ])
}

fn identifier<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::Identifier { name } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::Identifier));
    };

    Ok(vec![Item::text(Syntax::Variable, name.as_str())])
}

fn literal<'t>(tree: &'t Tree, id: NodeId, _writer: &Writer) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::Literal { kind, value } = tree.node(id)? else {
        return Err(unexpected(tree, id, NodeKind::Literal));
    };

    let item = match kind {
        LiteralKind::Number => Item::text(Syntax::Numeric, value.as_str()),
        LiteralKind::Bool => Item::text(Syntax::Keyword, value.as_str()),
        LiteralKind::String => Item::text(Syntax::String, format!("\"{}\"", escape(value))),
        LiteralKind::HexString => Item::text(Syntax::String, format!("hex\"{}\"", value)),
    };

    Ok(vec![item])
}

/// Escape text for use inside a double quoted string literal. Quotes,
/// backslashes and control characters are escaped; everything else is
/// written as is.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value
        .chars()
        .any(|c| c == '"' || c == '\\' || c.is_control())
    {
        return Cow::Borrowed(value);
    }

    let mut result = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_ascii_control() => {
                result.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

fn unary_operation<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::UnaryOperation {
        operator,
        prefix,
        sub_expression,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::UnaryOperation));
    };

    if !prefix {
        return Ok(vec![
            Item::Node(*sub_expression),
            Item::text(Syntax::Operator, operator.as_str()),
        ]);
    }

    let mut items = vec![Item::text(Syntax::Operator, operator.as_str())];

    // word operators like `delete` need separating from their operand
    if operator
        .chars()
        .all(|c| c.is_ascii_alphabetic())
    {
        items.push(Item::text(Syntax::Neutral, " "));
    }

    items.push(Item::Node(*sub_expression));
    Ok(items)
}

fn binary_operation<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::BinaryOperation {
        operator,
        left_expression,
        right_expression,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::BinaryOperation));
    };

    Ok(vec![
        Item::Node(*left_expression),
        Item::text(Syntax::Operator, format!(" {} ", operator)),
        Item::Node(*right_expression),
    ])
}

fn assignment<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::Assignment {
        operator,
        left_hand_side,
        right_hand_side,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::Assignment));
    };

    Ok(vec![
        Item::Node(*left_hand_side),
        Item::text(Syntax::Operator, format!(" {} ", operator)),
        Item::Node(*right_hand_side),
    ])
}

fn function_call<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::FunctionCall {
        expression,
        arguments,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::FunctionCall));
    };

    let mut items = vec![Item::Node(*expression), structure("(")];
    separated(&mut items, arguments, ", ");
    items.push(structure(")"));
    Ok(items)
}

fn member_access<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::MemberAccess {
        expression,
        member_name,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::MemberAccess));
    };

    Ok(vec![
        Item::Node(*expression),
        structure("."),
        Item::text(Syntax::Member, member_name.as_str()),
    ])
}

fn index_access<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::IndexAccess {
        base_expression,
        index_expression,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::IndexAccess));
    };

    Ok(vec![
        Item::Node(*base_expression),
        structure("["),
        Item::from(*index_expression),
        structure("]"),
    ])
}

fn tuple_expression<'t>(
    tree: &'t Tree,
    id: NodeId,
    _writer: &Writer,
) -> Result<Vec<Item<'t>>, WritingError> {
    let Node::TupleExpression {
        components,
        is_inline_array,
    } = tree.node(id)?
    else {
        return Err(unexpected(tree, id, NodeKind::TupleExpression));
    };

    let (open, close) = if *is_inline_array { ("[", "]") } else { ("(", ")") };

    let mut items = vec![structure(open)];
    for (i, component) in components
        .iter()
        .enumerate()
    {
        if i > 0 {
            items.push(structure(", "));
        }
        // elided components, as in `(, b) = f()`, write nothing
        items.push(Item::from(*component));
    }
    items.push(structure(close));
    Ok(items)
}
