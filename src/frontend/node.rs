//! A uniform view of the AST: every node is a tag, an optional scalar value and a list of named
//! relations to its children. The view is only ever produced by lowering the typed tree, so the
//! relations of each kind are fixed by the `From` implementations below.
//!
//! It is what the tracing hook and the visualizer walk, and gives a compact textual rendering:
//! ```text
//! BinaryOp(operator=Operator:+, left=Ident:ab, right=Decimal:1.0)
//! ```

use std::fmt;

use super::ast::{
    Argument, Assignment, Call, CellRef, Definition, Expr, FormalArg, FunctionDefinition, Print,
    PrintTarget, Program, RangeDefinition, RangeExpr, ReturnValue, ScalarDefinition,
    SheetDefinition, SheetInit, SheetRow, Statement, SubroutineDefinition, VariableDefinition,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    ScalarDefinition,
    RangeDefinition,
    SheetDefinition,
    SheetInit,
    SheetRow,
    FunctionDefinition,
    SubroutineDefinition,
    FormalArg,
    TypeName,
    Assignment,
    If,
    While,
    For,
    Return,
    Print,
    SubroutineCall,
    FunctionCall,
    CellRef,
    RangeExpression,
    BinaryOp,
    UnaryOp,
    RangeCount,
    Operator,
    Ident,
    Decimal,
    Int,
    InfoString,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    Child(Node),
    Children(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub value: Option<String>,
    pub relations: Vec<(&'static str, Relation)>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            value: None,
            relations: Vec::new(),
        }
    }

    pub fn leaf(kind: NodeKind, value: impl Into<String>) -> Self {
        Self::new(kind).with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach a single-child relation.
    pub fn child(mut self, name: &'static str, node: impl Into<Node>) -> Self {
        self.relations.push((name, Relation::Child(node.into())));
        self
    }

    /// Attach a single-child relation only if there is a child.
    pub fn optional_child<T: Into<Node>>(self, name: &'static str, node: Option<T>) -> Self {
        match node {
            Some(node) => self.child(name, node),
            None => self,
        }
    }

    /// Attach a multi-child relation, keeping the order of `nodes`.
    pub fn children<I, T>(mut self, name: &'static str, nodes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Node>,
    {
        let nodes = nodes.into_iter().map(Into::into).collect();
        self.relations.push((name, Relation::Children(nodes)));
        self
    }

    /// Look up a relation by name.
    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations
            .iter()
            .find(|(relation, _)| *relation == name)
            .map(|(_, relation)| relation)
    }

    /// The child of a single-child relation.
    pub fn get_child(&self, name: &str) -> Option<&Node> {
        match self.relation(name)? {
            Relation::Child(node) => Some(node),
            Relation::Children(_) => None,
        }
    }

    /// The children of a multi-child relation.
    pub fn get_children(&self, name: &str) -> Option<&[Node]> {
        match self.relation(name)? {
            Relation::Children(nodes) => Some(nodes),
            Relation::Child(_) => None,
        }
    }

    /// Visit every node children first, in source order. This is the order in which the grammar
    /// reductions created them.
    pub fn walk_post_order(&self, visit: &mut dyn FnMut(&Node)) {
        for (_, relation) in self.relations.iter() {
            match relation {
                Relation::Child(node) => node.walk_post_order(visit),
                Relation::Children(nodes) => {
                    for node in nodes {
                        node.walk_post_order(visit);
                    }
                }
            }
        }
        visit(self);
    }

    /// `Kind` or `Kind:value`.
    pub fn label(&self) -> String {
        match self.value {
            Some(ref value) => format!("{}:{}", self.kind, value),
            None => self.kind.to_string(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())?;
        if self.relations.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, (name, relation)) in self.relations.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match relation {
                Relation::Child(node) => write!(f, "{}={}", name, node)?,
                Relation::Children(nodes) => {
                    write!(f, "{}=[", name)?;
                    for (j, node) in nodes.iter().enumerate() {
                        if j > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", node)?;
                    }
                    write!(f, "]")?;
                }
            }
        }
        write!(f, ")")
    }
}

fn ident(name: &str) -> Node {
    Node::leaf(NodeKind::Ident, name)
}

fn int(value: i64) -> Node {
    Node::leaf(NodeKind::Int, value.to_string())
}

impl From<&Program> for Node {
    fn from(program: &Program) -> Self {
        Node::new(NodeKind::Program)
            .children("definitions", &program.definitions)
            .children("statements", &program.statements)
    }
}

impl From<&Definition> for Node {
    fn from(definition: &Definition) -> Self {
        match definition {
            Definition::Variable(variable) => variable.into(),
            Definition::Function(function) => function.into(),
            Definition::Subroutine(subroutine) => subroutine.into(),
        }
    }
}

impl From<&VariableDefinition> for Node {
    fn from(definition: &VariableDefinition) -> Self {
        match definition {
            VariableDefinition::Scalar(scalar) => scalar.into(),
            VariableDefinition::Range(range) => range.into(),
            VariableDefinition::Sheet(sheet) => sheet.into(),
        }
    }
}

impl From<&ScalarDefinition> for Node {
    fn from(definition: &ScalarDefinition) -> Self {
        Node::leaf(NodeKind::ScalarDefinition, definition.name.as_str())
            .optional_child("value", definition.value.as_ref())
    }
}

impl From<&RangeDefinition> for Node {
    fn from(definition: &RangeDefinition) -> Self {
        Node::leaf(NodeKind::RangeDefinition, definition.name.as_str())
            .optional_child("value", definition.value.as_ref())
    }
}

impl From<&SheetDefinition> for Node {
    fn from(definition: &SheetDefinition) -> Self {
        Node::leaf(NodeKind::SheetDefinition, definition.name.as_str())
            .optional_child("init", definition.init.as_ref())
    }
}

impl From<&SheetInit> for Node {
    fn from(init: &SheetInit) -> Self {
        let node = Node::new(NodeKind::SheetInit);
        match init {
            SheetInit::Rows(rows) => node.children("rows", rows),
            SheetInit::Dimensions { width, height } => {
                node.child("width", int(*width)).child("height", int(*height))
            }
        }
    }
}

impl From<&SheetRow> for Node {
    fn from(row: &SheetRow) -> Self {
        Node::new(NodeKind::SheetRow).children("cells", &row.cells)
    }
}

impl From<&FunctionDefinition> for Node {
    fn from(function: &FunctionDefinition) -> Self {
        Node::leaf(NodeKind::FunctionDefinition, function.name.as_str())
            .children("formals", &function.formals)
            .child(
                "return_type",
                Node::leaf(NodeKind::TypeName, function.return_type.to_string()),
            )
            .children("locals", &function.locals)
            .children("body", &function.body)
    }
}

impl From<&SubroutineDefinition> for Node {
    fn from(subroutine: &SubroutineDefinition) -> Self {
        Node::leaf(NodeKind::SubroutineDefinition, subroutine.name.as_str())
            .children("formals", &subroutine.formals)
            .children("locals", &subroutine.locals)
            .children("body", &subroutine.body)
    }
}

impl From<&FormalArg> for Node {
    fn from(formal: &FormalArg) -> Self {
        Node::leaf(NodeKind::FormalArg, formal.name())
            .child("type", Node::leaf(NodeKind::TypeName, formal.type_name()))
    }
}

impl From<&Statement> for Node {
    fn from(statement: &Statement) -> Self {
        match statement {
            Statement::Print(print) => print.into(),
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let node = Node::new(NodeKind::If)
                    .child("condition", condition)
                    .children("then_branch", then_branch);
                match else_branch {
                    Some(else_branch) => node.children("else_branch", else_branch),
                    None => node,
                }
            }
            Statement::While { condition, body } => Node::new(NodeKind::While)
                .child("condition", condition)
                .children("body", body),
            Statement::For { ranges, body } => Node::new(NodeKind::For)
                .children("ranges", ranges)
                .children("body", body),
            Statement::SubroutineCall(call) => call_node(NodeKind::SubroutineCall, call),
            Statement::Return(ReturnValue::Scalar(value)) => {
                Node::new(NodeKind::Return).child("value", value)
            }
            Statement::Return(ReturnValue::Range(value)) => {
                Node::new(NodeKind::Return).child("value", value)
            }
            Statement::Assignment(assignment) => assignment.into(),
        }
    }
}

impl From<&Print> for Node {
    fn from(print: &Print) -> Self {
        let node = Node::leaf(NodeKind::Print, print.target.kind_name()).optional_child(
            "info",
            print
                .info
                .as_ref()
                .map(|info| Node::leaf(NodeKind::InfoString, info.as_str())),
        );
        match print.target {
            PrintTarget::Sheet(ref sheet) => node.child("target", ident(sheet)),
            PrintTarget::Range(ref range) => node.child("target", range),
            PrintTarget::Scalar(ref value) => node.child("target", value),
        }
    }
}

impl From<&Assignment> for Node {
    fn from(assignment: &Assignment) -> Self {
        let node = Node::new(NodeKind::Assignment);
        match assignment {
            Assignment::Scalar { target, value } => {
                node.child("variable", ident(target)).child("value", value)
            }
            Assignment::Cell { target, value } => node.child("cell", target).child("value", value),
            Assignment::Range { target, value } => {
                node.child("variable", ident(target)).child("value", value)
            }
            Assignment::Sheet { target, source } => node
                .child("variable", ident(target))
                .child("value", ident(source)),
        }
    }
}

fn call_node(kind: NodeKind, call: &Call) -> Node {
    Node::leaf(kind, call.name.as_str()).children("arguments", &call.arguments)
}

impl From<&Argument> for Node {
    fn from(argument: &Argument) -> Self {
        match argument {
            Argument::Scalar(value) => value.into(),
            Argument::Range(range) => range.into(),
            Argument::Sheet(sheet) => ident(sheet),
        }
    }
}

impl From<&CellRef> for Node {
    fn from(cell: &CellRef) -> Self {
        let node = Node::leaf(NodeKind::CellRef, cell.to_string());
        match cell {
            CellRef::Sheet { sheet, coordinate } => node
                .child("sheet", ident(sheet))
                .child("coordinate", ident(coordinate)),
            CellRef::CurrentInRange(range) => node.child("range", ident(range)),
            CellRef::Current => node,
        }
    }
}

impl From<&RangeExpr> for Node {
    fn from(range: &RangeExpr) -> Self {
        let node = Node::new(NodeKind::RangeExpression);
        match range {
            RangeExpr::Named(name) => node.with_value(name.as_str()),
            RangeExpr::Span { from, to } => node.child("from", from).child("to", to),
            RangeExpr::Call(call) => node.child("call", call_node(NodeKind::FunctionCall, call)),
            RangeExpr::SubRange { range, column, row } => node
                .child("range", &**range)
                .child("column", int(*column))
                .child("row", int(*row)),
        }
    }
}

impl From<&Expr> for Node {
    fn from(expr: &Expr) -> Self {
        match expr {
            Expr::Ident(name) => ident(name),
            Expr::Decimal(value) => Node::leaf(NodeKind::Decimal, format!("{:?}", value)),
            Expr::FunctionCall(call) => call_node(NodeKind::FunctionCall, call),
            Expr::CellRef(cell) => cell.into(),
            Expr::RangeCount(range) => Node::new(NodeKind::RangeCount).child("range", range),
            Expr::BinaryOp { op, left, right } => Node::new(NodeKind::BinaryOp)
                .child("operator", Node::leaf(NodeKind::Operator, op.symbol()))
                .child("left", &**left)
                .child("right", &**right),
            Expr::UnaryOp { op, operand } => Node::new(NodeKind::UnaryOp)
                .child("operator", Node::leaf(NodeKind::Operator, op.to_string()))
                .child("operand", &**operand),
        }
    }
}
