//! Strategies for each tag of the assembly dialect

use serde_json::Value;

use super::node::YulNode;
use super::writer::{YulStrategies, YulWriter};
use crate::writing::{escape, WritingError};

pub fn strategies() -> YulStrategies {
    let mut table = YulStrategies::new();

    table.insert("YulBlock", block);
    table.insert("YulLiteral", literal);
    table.insert("YulIdentifier", identifier);
    table.insert("YulTypedName", typed_name);
    table.insert("YulFunctionCall", function_call);
    table.insert("YulVariableDeclaration", variable_declaration);
    table.insert("YulAssignment", assignment);
    table.insert("YulExpressionStatement", expression_statement);
    table.insert("YulIf", if_statement);
    table.insert("YulSwitch", switch);
    table.insert("YulCase", case);
    table.insert("YulForLoop", for_loop);
    table.insert("YulFunctionDefinition", function_definition);
    table.insert("YulBreak", break_statement);
    table.insert("YulContinue", continue_statement);
    table.insert("YulLeave", leave);

    table
}

fn block(node: &YulNode, writer: &YulWriter, depth: usize) -> Result<String, WritingError> {
    let statements = node.children("statements")?;
    if statements.is_empty() {
        return Ok("{}".to_string());
    }

    let layout = writer.layout();
    let mut output = String::from("{");
    output.push_str(layout.newline());

    for statement in &statements {
        output.push_str(&layout.indent(depth + 1));
        output.push_str(&writer.render_at(statement, depth + 1)?);
        output.push_str(layout.newline());
    }

    output.push_str(&layout.indent(depth));
    output.push('}');
    Ok(output)
}

fn literal(node: &YulNode, _writer: &YulWriter, _depth: usize) -> Result<String, WritingError> {
    // the kind is optional, but when present it must be a string
    let kind = if node.has("kind") {
        node.text("kind")?
    } else {
        "number"
    };

    // string literals that are not valid UTF-8 only carry a hex form
    if kind == "string" && !node.has("value") {
        return Ok(format!("hex\"{}\"", node.text("hexValue")?));
    }

    let value = node.text("value")?;
    match kind {
        "string" => Ok(format!("\"{}\"", escape(value))),
        _ => Ok(value.to_string()),
    }
}

fn identifier(node: &YulNode, _writer: &YulWriter, _depth: usize) -> Result<String, WritingError> {
    Ok(node
        .text("name")?
        .to_string())
}

fn typed_name(node: &YulNode, _writer: &YulWriter, _depth: usize) -> Result<String, WritingError> {
    let name = node.text("name")?;
    match node.text("type") {
        Ok(kind) if !kind.is_empty() => Ok(format!("{}:{}", name, kind)),
        _ => Ok(name.to_string()),
    }
}

fn function_call(node: &YulNode, writer: &YulWriter, depth: usize) -> Result<String, WritingError> {
    let function = writer.render_at(&node.child("functionName")?, depth)?;
    let arguments = writer.render_all(&node.children("arguments")?, depth, ", ")?;
    Ok(format!("{}({})", function, arguments))
}

fn variable_declaration(
    node: &YulNode,
    writer: &YulWriter,
    depth: usize,
) -> Result<String, WritingError> {
    let variables = writer.render_all(&node.children("variables")?, depth, ", ")?;

    match node.optional_child("value")? {
        Some(value) => Ok(format!(
            "let {} := {}",
            variables,
            writer.render_at(&value, depth)?
        )),
        None => Ok(format!("let {}", variables)),
    }
}

fn assignment(node: &YulNode, writer: &YulWriter, depth: usize) -> Result<String, WritingError> {
    let names = writer.render_all(&node.children("variableNames")?, depth, ", ")?;
    let value = writer.render_at(&node.child("value")?, depth)?;
    Ok(format!("{} := {}", names, value))
}

fn expression_statement(
    node: &YulNode,
    writer: &YulWriter,
    depth: usize,
) -> Result<String, WritingError> {
    writer.render_at(&node.child("expression")?, depth)
}

fn if_statement(node: &YulNode, writer: &YulWriter, depth: usize) -> Result<String, WritingError> {
    let condition = writer.render_at(&node.child("condition")?, depth)?;
    let body = writer.render_at(&node.child("body")?, depth)?;
    Ok(format!("if {} {}", condition, body))
}

fn switch(node: &YulNode, writer: &YulWriter, depth: usize) -> Result<String, WritingError> {
    let layout = writer.layout();
    let mut output = format!(
        "switch {}",
        writer.render_at(&node.child("expression")?, depth)?
    );

    // each case on its own line, level with the `switch`
    for case in node.children("cases")? {
        output.push_str(layout.newline());
        output.push_str(&layout.indent(depth));
        output.push_str(&writer.render_at(&case, depth)?);
    }

    Ok(output)
}

fn case(node: &YulNode, writer: &YulWriter, depth: usize) -> Result<String, WritingError> {
    let body = writer.render_at(&node.child("body")?, depth)?;

    match node
        .attributes
        .get("value")
    {
        Some(Value::String(value)) if value == "default" => Ok(format!("default {}", body)),
        _ => Ok(format!(
            "case {} {}",
            writer.render_at(&node.child("value")?, depth)?,
            body
        )),
    }
}

fn for_loop(node: &YulNode, writer: &YulWriter, depth: usize) -> Result<String, WritingError> {
    let pre = writer.render_at(&node.child("pre")?, depth)?;
    let condition = writer.render_at(&node.child("condition")?, depth)?;
    let post = writer.render_at(&node.child("post")?, depth)?;
    let body = writer.render_at(&node.child("body")?, depth)?;
    Ok(format!("for {} {} {} {}", pre, condition, post, body))
}

fn function_definition(
    node: &YulNode,
    writer: &YulWriter,
    depth: usize,
) -> Result<String, WritingError> {
    let name = node.text("name")?;
    let parameters = writer.render_all(&node.children("parameters")?, depth, ", ")?;
    let returns = node.children("returnVariables")?;
    let body = writer.render_at(&node.child("body")?, depth)?;

    if returns.is_empty() {
        Ok(format!("function {}({}) {}", name, parameters, body))
    } else {
        Ok(format!(
            "function {}({}) -> {} {}",
            name,
            parameters,
            writer.render_all(&returns, depth, ", ")?,
            body
        ))
    }
}

fn break_statement(_: &YulNode, _: &YulWriter, _: usize) -> Result<String, WritingError> {
    Ok("break".to_string())
}

fn continue_statement(_: &YulNode, _: &YulWriter, _: usize) -> Result<String, WritingError> {
    Ok("continue".to_string())
}

fn leave(_: &YulNode, _: &YulWriter, _: usize) -> Result<String, WritingError> {
    Ok("leave".to_string())
}
