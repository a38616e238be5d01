use phf::phf_map;
use std::fmt;

/// A classified lexeme together with the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str, line: usize) -> Self {
        Self {
            kind,
            text: text.to_string(),
            line,
        }
    }

    pub fn get_keyword(key: &str) -> Option<TokenKind> {
        KEYWORDS.get(key).copied()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {} @ {}>", self.kind, self.text, self.line)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Keywords
    Scalar,
    Range,
    Sheet,
    Do,
    Done,
    Is,
    While,
    For,
    If,
    Then,
    Else,
    Endif,
    Function,
    Subroutine,
    Return,
    End,
    PrintSheet,
    PrintScalar,
    PrintRange,

    // Identifier families
    Ident,
    CoordinateIdent,
    RangeIdent,
    SheetIdent,
    FuncIdent,

    // Literals
    IntLiteral,
    DecimalLiteral,
    InfoString,

    Assign,
    LeftParenthese,
    RightParenthese,
    LeftSquare,
    RightSquare,
    LeftCurly,
    RightCurly,
    Comma,
    DotDot,
    SingleQuote,
    Colon,
    Dollar,
    NumberSign,

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

impl TokenKind {
    /// Upper-case name of the token kind as it appears in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Scalar => "SCALAR",
            TokenKind::Range => "RANGE",
            TokenKind::Sheet => "SHEET",
            TokenKind::Do => "DO",
            TokenKind::Done => "DONE",
            TokenKind::Is => "IS",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::Endif => "ENDIF",
            TokenKind::Function => "FUNCTION",
            TokenKind::Subroutine => "SUBROUTINE",
            TokenKind::Return => "RETURN",
            TokenKind::End => "END",
            TokenKind::PrintSheet => "PRINT_SHEET",
            TokenKind::PrintScalar => "PRINT_SCALAR",
            TokenKind::PrintRange => "PRINT_RANGE",
            TokenKind::Ident => "IDENT",
            TokenKind::CoordinateIdent => "COORDINATE_IDENT",
            TokenKind::RangeIdent => "RANGE_IDENT",
            TokenKind::SheetIdent => "SHEET_IDENT",
            TokenKind::FuncIdent => "FUNC_IDENT",
            TokenKind::IntLiteral => "INT_LITERAL",
            TokenKind::DecimalLiteral => "DECIMAL_LITERAL",
            TokenKind::InfoString => "INFO_STRING",
            TokenKind::Assign => "ASSIGN",
            TokenKind::LeftParenthese => "LPAREN",
            TokenKind::RightParenthese => "RPAREN",
            TokenKind::LeftSquare => "LSQUARE",
            TokenKind::RightSquare => "RSQUARE",
            TokenKind::LeftCurly => "LCURLY",
            TokenKind::RightCurly => "RCURLY",
            TokenKind::Comma => "COMMA",
            TokenKind::DotDot => "DOTDOT",
            TokenKind::SingleQuote => "SQUOTE",
            TokenKind::Colon => "COLON",
            TokenKind::Dollar => "DOLLAR",
            TokenKind::NumberSign => "NUMBER_SIGN",
            TokenKind::Equal => "EQ",
            TokenKind::NotEqual => "NOTEQ",
            TokenKind::Less => "LT",
            TokenKind::LessEqual => "LTEQ",
            TokenKind::Greater => "GT",
            TokenKind::GreaterEqual => "GTEQ",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mult => "MULT",
            TokenKind::Div => "DIV",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "scalar" => TokenKind::Scalar,
    "range" => TokenKind::Range,
    "sheet" => TokenKind::Sheet,
    "do" => TokenKind::Do,
    "done" => TokenKind::Done,
    "is" => TokenKind::Is,
    "while" => TokenKind::While,
    "for" => TokenKind::For,
    "if" => TokenKind::If,
    "then" => TokenKind::Then,
    "else" => TokenKind::Else,
    "endif" => TokenKind::Endif,
    "function" => TokenKind::Function,
    "subroutine" => TokenKind::Subroutine,
    "return" => TokenKind::Return,
    "end" => TokenKind::End,
    "print_sheet" => TokenKind::PrintSheet,
    "print_scalar" => TokenKind::PrintScalar,
    "print_range" => TokenKind::PrintRange,
};

/// Shorthand for `TokenKind` variants, e.g. `T![:=]` or `T![print_sheet]`.
#[macro_export]
macro_rules! T {
    [scalar] => { $crate::frontend::token::TokenKind::Scalar };
    [range] => { $crate::frontend::token::TokenKind::Range };
    [sheet] => { $crate::frontend::token::TokenKind::Sheet };
    [do] => { $crate::frontend::token::TokenKind::Do };
    [done] => { $crate::frontend::token::TokenKind::Done };
    [is] => { $crate::frontend::token::TokenKind::Is };
    [while] => { $crate::frontend::token::TokenKind::While };
    [for] => { $crate::frontend::token::TokenKind::For };
    [if] => { $crate::frontend::token::TokenKind::If };
    [then] => { $crate::frontend::token::TokenKind::Then };
    [else] => { $crate::frontend::token::TokenKind::Else };
    [endif] => { $crate::frontend::token::TokenKind::Endif };
    [function] => { $crate::frontend::token::TokenKind::Function };
    [subroutine] => { $crate::frontend::token::TokenKind::Subroutine };
    [return] => { $crate::frontend::token::TokenKind::Return };
    [end] => { $crate::frontend::token::TokenKind::End };
    [print_sheet] => { $crate::frontend::token::TokenKind::PrintSheet };
    [print_scalar] => { $crate::frontend::token::TokenKind::PrintScalar };
    [print_range] => { $crate::frontend::token::TokenKind::PrintRange };
    [ident] => { $crate::frontend::token::TokenKind::Ident };
    [coord] => { $crate::frontend::token::TokenKind::CoordinateIdent };
    [range_ident] => { $crate::frontend::token::TokenKind::RangeIdent };
    [sheet_ident] => { $crate::frontend::token::TokenKind::SheetIdent };
    [func_ident] => { $crate::frontend::token::TokenKind::FuncIdent };
    [int] => { $crate::frontend::token::TokenKind::IntLiteral };
    [decimal] => { $crate::frontend::token::TokenKind::DecimalLiteral };
    [info] => { $crate::frontend::token::TokenKind::InfoString };
    [:=] => { $crate::frontend::token::TokenKind::Assign };
    ['('] => { $crate::frontend::token::TokenKind::LeftParenthese };
    [')'] => { $crate::frontend::token::TokenKind::RightParenthese };
    ['['] => { $crate::frontend::token::TokenKind::LeftSquare };
    [']'] => { $crate::frontend::token::TokenKind::RightSquare };
    ['{'] => { $crate::frontend::token::TokenKind::LeftCurly };
    ['}'] => { $crate::frontend::token::TokenKind::RightCurly };
    [,] => { $crate::frontend::token::TokenKind::Comma };
    [..] => { $crate::frontend::token::TokenKind::DotDot };
    [squote] => { $crate::frontend::token::TokenKind::SingleQuote };
    [:] => { $crate::frontend::token::TokenKind::Colon };
    [dollar] => { $crate::frontend::token::TokenKind::Dollar };
    [#] => { $crate::frontend::token::TokenKind::NumberSign };
    [=] => { $crate::frontend::token::TokenKind::Equal };
    [!=] => { $crate::frontend::token::TokenKind::NotEqual };
    [<] => { $crate::frontend::token::TokenKind::Less };
    [<=] => { $crate::frontend::token::TokenKind::LessEqual };
    [>] => { $crate::frontend::token::TokenKind::Greater };
    [>=] => { $crate::frontend::token::TokenKind::GreaterEqual };
    [+] => { $crate::frontend::token::TokenKind::Plus };
    [-] => { $crate::frontend::token::TokenKind::Minus };
    [*] => { $crate::frontend::token::TokenKind::Mult };
    [/] => { $crate::frontend::token::TokenKind::Div };
}
