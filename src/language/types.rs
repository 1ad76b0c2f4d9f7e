//! Types representing the Abstract Syntax Tree handed to the writer

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assembly::YulNode;

/// Handle to a node stored in a [`Tree`](super::Tree). Handles are only
/// meaningful for the tree that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKind {
    Contract,
    Interface,
    Library,
}

impl ContractKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ContractKind::Contract => "contract",
            ContractKind::Interface => "interface",
            ContractKind::Library => "library",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Default,
    External,
    Public,
    Internal,
    Private,
}

impl Visibility {
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Visibility::Default => None,
            Visibility::External => Some("external"),
            Visibility::Public => Some("public"),
            Visibility::Internal => Some("internal"),
            Visibility::Private => Some("private"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    #[default]
    Nonpayable,
    Payable,
    View,
    Pure,
}

impl Mutability {
    // nonpayable is implied and never written
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Mutability::Nonpayable => None,
            Mutability::Payable => Some("payable"),
            Mutability::View => Some("view"),
            Mutability::Pure => Some("pure"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageLocation {
    #[default]
    Default,
    Memory,
    Storage,
    Calldata,
}

impl StorageLocation {
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            StorageLocation::Default => None,
            StorageLocation::Memory => Some("memory"),
            StorageLocation::Storage => Some("storage"),
            StorageLocation::Calldata => Some("calldata"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LiteralKind {
    Number,
    Bool,
    String,
    HexString,
}

/// A node of the primary tree. Child nodes are referenced by handle; the
/// order in which the handle fields are declared is the order of the node's
/// children, and is also the order in which they appear in written text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all_fields = "camelCase")]
pub enum Node {
    SourceUnit {
        nodes: Vec<NodeId>,
    },
    PragmaDirective {
        literals: Vec<String>,
    },
    ContractDefinition {
        name: String,
        contract_kind: ContractKind,
        nodes: Vec<NodeId>,
    },
    FunctionDefinition {
        name: String,
        #[serde(default)]
        visibility: Visibility,
        #[serde(default)]
        state_mutability: Mutability,
        parameters: NodeId,
        return_parameters: NodeId,
        body: Option<NodeId>,
    },
    ParameterList {
        parameters: Vec<NodeId>,
    },
    VariableDeclaration {
        name: String,
        type_name: NodeId,
        #[serde(default)]
        storage_location: StorageLocation,
        value: Option<NodeId>,
    },
    ElementaryTypeName {
        name: String,
    },
    Block {
        statements: Vec<NodeId>,
    },
    UncheckedBlock {
        statements: Vec<NodeId>,
    },
    VariableDeclarationStatement {
        declarations: Vec<NodeId>,
        initial_value: Option<NodeId>,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    Return {
        expression: Option<NodeId>,
    },
    IfStatement {
        condition: NodeId,
        true_body: NodeId,
        false_body: Option<NodeId>,
    },
    WhileStatement {
        condition: NodeId,
        body: NodeId,
    },
    ForStatement {
        initialization_expression: Option<NodeId>,
        condition: Option<NodeId>,
        loop_expression: Option<NodeId>,
        body: NodeId,
    },
    Break,
    Continue,
    EmitStatement {
        event_call: NodeId,
    },
    InlineAssembly {
        ast: YulNode,
    },
    Identifier {
        name: String,
    },
    Literal {
        kind: LiteralKind,
        value: String,
    },
    UnaryOperation {
        operator: String,
        prefix: bool,
        sub_expression: NodeId,
    },
    BinaryOperation {
        operator: String,
        left_expression: NodeId,
        right_expression: NodeId,
    },
    Assignment {
        operator: String,
        left_hand_side: NodeId,
        right_hand_side: NodeId,
    },
    FunctionCall {
        expression: NodeId,
        arguments: Vec<NodeId>,
    },
    MemberAccess {
        expression: NodeId,
        member_name: String,
    },
    IndexAccess {
        base_expression: NodeId,
        index_expression: Option<NodeId>,
    },
    TupleExpression {
        components: Vec<Option<NodeId>>,
        #[serde(default)]
        is_inline_array: bool,
    },
}

/// The discriminant of a [`Node`], used as the key of the rendering
/// strategy table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    SourceUnit,
    PragmaDirective,
    ContractDefinition,
    FunctionDefinition,
    ParameterList,
    VariableDeclaration,
    ElementaryTypeName,
    Block,
    UncheckedBlock,
    VariableDeclarationStatement,
    ExpressionStatement,
    Return,
    IfStatement,
    WhileStatement,
    ForStatement,
    Break,
    Continue,
    EmitStatement,
    InlineAssembly,
    Identifier,
    Literal,
    UnaryOperation,
    BinaryOperation,
    Assignment,
    FunctionCall,
    MemberAccess,
    IndexAccess,
    TupleExpression,
}

impl NodeKind {
    pub const ALL: [NodeKind; 28] = [
        NodeKind::SourceUnit,
        NodeKind::PragmaDirective,
        NodeKind::ContractDefinition,
        NodeKind::FunctionDefinition,
        NodeKind::ParameterList,
        NodeKind::VariableDeclaration,
        NodeKind::ElementaryTypeName,
        NodeKind::Block,
        NodeKind::UncheckedBlock,
        NodeKind::VariableDeclarationStatement,
        NodeKind::ExpressionStatement,
        NodeKind::Return,
        NodeKind::IfStatement,
        NodeKind::WhileStatement,
        NodeKind::ForStatement,
        NodeKind::Break,
        NodeKind::Continue,
        NodeKind::EmitStatement,
        NodeKind::InlineAssembly,
        NodeKind::Identifier,
        NodeKind::Literal,
        NodeKind::UnaryOperation,
        NodeKind::BinaryOperation,
        NodeKind::Assignment,
        NodeKind::FunctionCall,
        NodeKind::MemberAccess,
        NodeKind::IndexAccess,
        NodeKind::TupleExpression,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::SourceUnit => "SourceUnit",
            NodeKind::PragmaDirective => "PragmaDirective",
            NodeKind::ContractDefinition => "ContractDefinition",
            NodeKind::FunctionDefinition => "FunctionDefinition",
            NodeKind::ParameterList => "ParameterList",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::ElementaryTypeName => "ElementaryTypeName",
            NodeKind::Block => "Block",
            NodeKind::UncheckedBlock => "UncheckedBlock",
            NodeKind::VariableDeclarationStatement => "VariableDeclarationStatement",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::Return => "Return",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::ForStatement => "ForStatement",
            NodeKind::Break => "Break",
            NodeKind::Continue => "Continue",
            NodeKind::EmitStatement => "EmitStatement",
            NodeKind::InlineAssembly => "InlineAssembly",
            NodeKind::Identifier => "Identifier",
            NodeKind::Literal => "Literal",
            NodeKind::UnaryOperation => "UnaryOperation",
            NodeKind::BinaryOperation => "BinaryOperation",
            NodeKind::Assignment => "Assignment",
            NodeKind::FunctionCall => "FunctionCall",
            NodeKind::MemberAccess => "MemberAccess",
            NodeKind::IndexAccess => "IndexAccess",
            NodeKind::TupleExpression => "TupleExpression",
        }
    }

    /// Statements are the kinds whose source location, by compiler
    /// convention, stops short of a trailing terminator.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeKind::Block
                | NodeKind::UncheckedBlock
                | NodeKind::VariableDeclarationStatement
                | NodeKind::ExpressionStatement
                | NodeKind::Return
                | NodeKind::IfStatement
                | NodeKind::WhileStatement
                | NodeKind::ForStatement
                | NodeKind::Break
                | NodeKind::Continue
                | NodeKind::EmitStatement
                | NodeKind::InlineAssembly
        )
    }

    /// Kinds whose members are written one level further in.
    pub fn opens_scope(&self) -> bool {
        matches!(
            self,
            NodeKind::ContractDefinition | NodeKind::Block | NodeKind::UncheckedBlock
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::SourceUnit { .. } => NodeKind::SourceUnit,
            Node::PragmaDirective { .. } => NodeKind::PragmaDirective,
            Node::ContractDefinition { .. } => NodeKind::ContractDefinition,
            Node::FunctionDefinition { .. } => NodeKind::FunctionDefinition,
            Node::ParameterList { .. } => NodeKind::ParameterList,
            Node::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            Node::ElementaryTypeName { .. } => NodeKind::ElementaryTypeName,
            Node::Block { .. } => NodeKind::Block,
            Node::UncheckedBlock { .. } => NodeKind::UncheckedBlock,
            Node::VariableDeclarationStatement { .. } => NodeKind::VariableDeclarationStatement,
            Node::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
            Node::Return { .. } => NodeKind::Return,
            Node::IfStatement { .. } => NodeKind::IfStatement,
            Node::WhileStatement { .. } => NodeKind::WhileStatement,
            Node::ForStatement { .. } => NodeKind::ForStatement,
            Node::Break => NodeKind::Break,
            Node::Continue => NodeKind::Continue,
            Node::EmitStatement { .. } => NodeKind::EmitStatement,
            Node::InlineAssembly { .. } => NodeKind::InlineAssembly,
            Node::Identifier { .. } => NodeKind::Identifier,
            Node::Literal { .. } => NodeKind::Literal,
            Node::UnaryOperation { .. } => NodeKind::UnaryOperation,
            Node::BinaryOperation { .. } => NodeKind::BinaryOperation,
            Node::Assignment { .. } => NodeKind::Assignment,
            Node::FunctionCall { .. } => NodeKind::FunctionCall,
            Node::MemberAccess { .. } => NodeKind::MemberAccess,
            Node::IndexAccess { .. } => NodeKind::IndexAccess,
            Node::TupleExpression { .. } => NodeKind::TupleExpression,
        }
    }

    /// The handles of this node's children, in order.
    pub fn children(&self) -> Vec<NodeId> {
        let mut result = Vec::new();

        match self {
            Node::SourceUnit { nodes } | Node::ContractDefinition { nodes, .. } => {
                result.extend(nodes);
            }
            Node::FunctionDefinition {
                parameters,
                return_parameters,
                body,
                ..
            } => {
                result.push(*parameters);
                result.push(*return_parameters);
                result.extend(body);
            }
            Node::ParameterList { parameters } => result.extend(parameters),
            Node::VariableDeclaration {
                type_name, value, ..
            } => {
                result.push(*type_name);
                result.extend(value);
            }
            Node::Block { statements } | Node::UncheckedBlock { statements } => {
                result.extend(statements);
            }
            Node::VariableDeclarationStatement {
                declarations,
                initial_value,
            } => {
                result.extend(declarations);
                result.extend(initial_value);
            }
            Node::ExpressionStatement { expression } => result.push(*expression),
            Node::Return { expression } => result.extend(expression),
            Node::IfStatement {
                condition,
                true_body,
                false_body,
            } => {
                result.push(*condition);
                result.push(*true_body);
                result.extend(false_body);
            }
            Node::WhileStatement { condition, body } => {
                result.push(*condition);
                result.push(*body);
            }
            Node::ForStatement {
                initialization_expression,
                condition,
                loop_expression,
                body,
            } => {
                result.extend(initialization_expression);
                result.extend(condition);
                result.extend(loop_expression);
                result.push(*body);
            }
            Node::EmitStatement { event_call } => result.push(*event_call),
            Node::UnaryOperation { sub_expression, .. } => result.push(*sub_expression),
            Node::BinaryOperation {
                left_expression,
                right_expression,
                ..
            } => {
                result.push(*left_expression);
                result.push(*right_expression);
            }
            Node::Assignment {
                left_hand_side,
                right_hand_side,
                ..
            } => {
                result.push(*left_hand_side);
                result.push(*right_hand_side);
            }
            Node::FunctionCall {
                expression,
                arguments,
            } => {
                result.push(*expression);
                result.extend(arguments);
            }
            Node::MemberAccess { expression, .. } => result.push(*expression),
            Node::IndexAccess {
                base_expression,
                index_expression,
            } => {
                result.push(*base_expression);
                result.extend(index_expression);
            }
            Node::TupleExpression { components, .. } => {
                result.extend(
                    components
                        .iter()
                        .flatten(),
                );
            }
            Node::PragmaDirective { .. }
            | Node::ElementaryTypeName { .. }
            | Node::Break
            | Node::Continue
            | Node::InlineAssembly { .. }
            | Node::Identifier { .. }
            | Node::Literal { .. } => {}
        }

        result
    }

    /// A short description of the node's salient attributes, for
    /// diagnostics.
    pub fn summary(&self) -> Option<String> {
        match self {
            Node::PragmaDirective { literals } => Some(format!("literals: {:?}", literals)),
            Node::ContractDefinition {
                name,
                contract_kind,
                ..
            } => Some(format!("name: {:?}, kind: {}", name, contract_kind.keyword())),
            Node::FunctionDefinition { name, .. }
            | Node::VariableDeclaration { name, .. }
            | Node::ElementaryTypeName { name }
            | Node::Identifier { name } => Some(format!("name: {:?}", name)),
            Node::Literal { kind, value } => Some(format!("kind: {:?}, value: {:?}", kind, value)),
            Node::UnaryOperation { operator, .. }
            | Node::BinaryOperation { operator, .. }
            | Node::Assignment { operator, .. } => Some(format!("operator: {:?}", operator)),
            Node::MemberAccess { member_name, .. } => Some(format!("member: {:?}", member_name)),
            Node::InlineAssembly { ast } => Some(format!("ast: {}", ast.tag)),
            _ => None,
        }
    }
}
