//! Abstract syntax tree datastructures.
//! In here are all datastructures the grammar actions build. Every node shape is its own type
//! or enum variant, so a node can only ever carry the children that belong to it.

use std::fmt;

/// Name of a variable, range, sheet, function or subroutine as written in the source.
pub type Identifier = String;

/// Root of the tree: optional definitions followed by a non-empty statement list.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub definitions: Vec<Definition>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Variable(VariableDefinition),
    Function(FunctionDefinition),
    Subroutine(SubroutineDefinition),
}

/// Variable definitions may appear at the top level and as locals of functions/subroutines.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableDefinition {
    Scalar(ScalarDefinition),
    Range(RangeDefinition),
    Sheet(SheetDefinition),
}

/// `scalar name [= expr]`
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarDefinition {
    pub name: Identifier,
    pub value: Option<Expr>,
}

/// `range _name [= range_expr]`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeDefinition {
    pub name: Identifier,
    pub value: Option<RangeExpr>,
}

/// `sheet NAME [sheet_init]`
#[derive(Debug, Clone, PartialEq)]
pub struct SheetDefinition {
    pub name: Identifier,
    pub init: Option<SheetInit>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SheetInit {
    /// `= { row row ... }` with literal contents.
    Rows(Vec<SheetRow>),
    /// `= width * height` declares the size only.
    Dimensions { width: i64, height: i64 },
}

/// Comma separated cells of one sheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub cells: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: Identifier,
    pub formals: Vec<FormalArg>,
    pub return_type: ReturnType,
    pub locals: Vec<VariableDefinition>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubroutineDefinition {
    pub name: Identifier,
    pub formals: Vec<FormalArg>,
    pub locals: Vec<VariableDefinition>,
    pub body: Vec<Statement>,
}

/// A formal parameter. The identifier family always matches the declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum FormalArg {
    Scalar(Identifier),
    Range(Identifier),
    Sheet(Identifier),
}

impl FormalArg {
    pub fn name(&self) -> &str {
        match self {
            FormalArg::Scalar(name) | FormalArg::Range(name) | FormalArg::Sheet(name) => name,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FormalArg::Scalar(_) => "scalar",
            FormalArg::Range(_) => "range",
            FormalArg::Sheet(_) => "sheet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    Scalar,
    Range,
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReturnType::Scalar => write!(f, "scalar"),
            ReturnType::Range => write!(f, "range"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Print(Print),
    If {
        condition: Expr,
        then_branch: Vec<Statement>,
        else_branch: Option<Vec<Statement>>,
    },
    While {
        condition: Expr,
        body: Vec<Statement>,
    },
    For {
        ranges: Vec<RangeExpr>,
        body: Vec<Statement>,
    },
    SubroutineCall(Call),
    Return(ReturnValue),
    Assignment(Assignment),
}

/// `print_sheet`, `print_range` or `print_scalar` with an optional info string.
#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    /// Text between the `!` delimiters.
    pub info: Option<String>,
    pub target: PrintTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrintTarget {
    Sheet(Identifier),
    Range(RangeExpr),
    Scalar(Expr),
}

impl PrintTarget {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PrintTarget::Sheet(_) => "sheet",
            PrintTarget::Range(_) => "range",
            PrintTarget::Scalar(_) => "scalar",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReturnValue {
    Scalar(Expr),
    Range(RangeExpr),
}

/// The target decides what may be assigned: scalars to variables and cells, ranges to range
/// names and sheets to sheet names.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Scalar { target: Identifier, value: Expr },
    Cell { target: CellRef, value: Expr },
    Range { target: Identifier, value: RangeExpr },
    Sheet { target: Identifier, source: Identifier },
}

/// `Name[arg, ...]`, used both as function call and as subroutine call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Identifier,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Scalar(Expr),
    Range(RangeExpr),
    Sheet(Identifier),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellRef {
    /// `SHEET'A1`
    Sheet {
        sheet: Identifier,
        coordinate: Identifier,
    },
    /// `$:_range`, the current cell within a named range.
    CurrentInRange(Identifier),
    /// `$`
    Current,
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CellRef::Sheet { sheet, coordinate } => write!(f, "{}'{}", sheet, coordinate),
            CellRef::CurrentInRange(range) => write!(f, "$:{}", range),
            CellRef::Current => write!(f, "$"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RangeExpr {
    Named(Identifier),
    /// `range SH'A1..SH'B3`
    Span { from: CellRef, to: CellRef },
    /// `[Func[...]]`
    Call(Call),
    /// `range_expr[column, row]`
    SubRange {
        range: Box<RangeExpr>,
        column: i64,
        row: i64,
    },
}

/// Scalar expressions. Chains of the same precedence level nest to the right, so
/// `a - b - c` is `a - (b - c)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Identifier),
    Decimal(f64),
    FunctionCall(Call),
    CellRef(CellRef),
    /// `#range_expr`
    RangeCount(RangeExpr),
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOperator, operand: Expr) -> Self {
        Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Plus,
    Minus,
    Mult,
    Div,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Mult => "*",
            BinaryOperator::Div => "/",
        }
    }

    pub fn is_comparison(&self) -> bool {
        !matches!(
            self,
            BinaryOperator::Plus | BinaryOperator::Minus | BinaryOperator::Mult | BinaryOperator::Div
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOperator::Minus => write!(f, "-"),
        }
    }
}
