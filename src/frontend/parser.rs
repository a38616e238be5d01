//! Table driven LALR(1) parser.
//!
//! The parse tables are generated from `grammar.lalrpop` at build time. `Parser` pulls the
//! tokens one by one out of a [`Lexer`] and translates the errors of the generated parser into
//! [`SheetError`]s.

use lalrpop_util::ParseError;

use super::{ast::Program, grammar::ProgramParser, lexer::Lexer, node::Node, token::Token};
use crate::error::SheetError::{self, SyntaxError};

/// Hook for diagnostic output during a parse. Both methods do nothing by default.
pub trait Trace {
    /// Called for every token the parser pulls from the lexer.
    fn token(&mut self, _token: &Token) {}
    /// Called for every node of a successful parse, children before their parent.
    fn reduced(&mut self, _node: &Node) {}
}

impl Trace for () {}

pub struct Parser {
    inner: ProgramParser,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            inner: ProgramParser::new(),
        }
    }

    /// Parse a whole program. The first lexical or syntax error aborts the parse.
    pub fn parse(&self, lexer: Lexer) -> Result<Program, SheetError> {
        self.parse_traced(lexer, &mut ())
    }

    /// Like `parse`, but reports every token and node to `trace`.
    pub fn parse_traced(
        &self,
        mut lexer: Lexer,
        trace: &mut dyn Trace,
    ) -> Result<Program, SheetError> {
        // line of the last token, reported when the input ends too early
        let mut last_line = 1;
        let result = {
            let tokens = lexer.by_ref().map(|result| {
                result.map(|token| {
                    trace.token(&token);
                    let line = token.line;
                    last_line = line;
                    (line, token, line)
                })
            });
            self.inner.parse(tokens)
        };
        let program = result.map_err(|err| convert_error(err, last_line))?;
        Node::from(&program).walk_post_order(&mut |node: &Node| trace.reduced(node));
        Ok(program)
    }
}

/// `eof_line` is the line of the last token.
fn convert_error(err: ParseError<usize, Token, SheetError>, eof_line: usize) -> SheetError {
    match err {
        ParseError::User { error } => error,
        ParseError::UnrecognizedToken {
            token: (_, token, _),
            ..
        }
        | ParseError::ExtraToken {
            token: (_, token, _),
        } => SyntaxError {
            token: token.text,
            line: token.line,
        },
        ParseError::UnrecognizedEof { .. } => SyntaxError {
            token: "EOF".to_string(),
            line: eof_line,
        },
        ParseError::InvalidToken { location } => SyntaxError {
            token: String::new(),
            line: location,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError::LexicalError;
    use crate::frontend::ast::{
        Definition, Expr, Print, PrintTarget, ScalarDefinition, SheetInit, Statement,
        VariableDefinition,
    };

    fn parse_str(src: &str) -> Result<Program, SheetError> {
        Parser::new().parse(Lexer::new(src))
    }

    fn tree(src: &str) -> String {
        Node::from(&parse_str(src).unwrap()).to_string()
    }

    /// Render the expression of `print_scalar <src>`.
    fn parse_expr(src: &str) -> String {
        let program = parse_str(&format!("print_scalar {}", src)).unwrap();
        match &program.statements[0] {
            Statement::Print(Print {
                target: PrintTarget::Scalar(expr),
                ..
            }) => Node::from(expr).to_string(),
            other => panic!("unexpected statement {:?}", other),
        }
    }

    fn first_definition(src: &str) -> String {
        let program = parse_str(src).unwrap();
        Node::from(&program.definitions[0]).to_string()
    }

    #[test]
    fn test_scalar_definition() {
        let program = parse_str("scalar sc = 1.0\nprint_scalar sc").unwrap();
        assert_eq!(
            program.definitions,
            vec![Definition::Variable(VariableDefinition::Scalar(
                ScalarDefinition {
                    name: "sc".to_string(),
                    value: Some(Expr::Decimal(1.0)),
                }
            ))]
        );

        let program = parse_str("scalar sc\nprint_scalar sc").unwrap();
        assert_eq!(
            program.definitions,
            vec![Definition::Variable(VariableDefinition::Scalar(
                ScalarDefinition {
                    name: "sc".to_string(),
                    value: None,
                }
            ))]
        );
    }

    #[test]
    fn test_sheet_row() {
        let program = parse_str("sheet SH = {1.0, 2.0, 3.0}\nprint_sheet SH").unwrap();
        let init = match &program.definitions[0] {
            Definition::Variable(VariableDefinition::Sheet(sheet)) => sheet.init.clone(),
            other => panic!("unexpected definition {:?}", other),
        };
        match init {
            Some(SheetInit::Rows(rows)) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(
                    rows[0].cells,
                    vec![Expr::Decimal(1.0), Expr::Decimal(2.0), Expr::Decimal(3.0)]
                );
            }
            other => panic!("unexpected sheet init {:?}", other),
        }
    }

    #[test]
    fn test_juxtaposed_sheet_rows() {
        assert_eq!(
            first_definition("sheet SH = {1.0, 2.0 3.0, 4.0}\nprint_sheet SH"),
            "SheetDefinition:SH(init=SheetInit(rows=[\
             SheetRow(cells=[Decimal:1.0, Decimal:2.0]), \
             SheetRow(cells=[Decimal:3.0, Decimal:4.0])]))"
        );
        // a negative literal opens a new row, a detached minus continues the cell
        assert_eq!(
            first_definition("sheet SH = {-1.0 -2.0 - ab}\nprint_sheet SH"),
            "SheetDefinition:SH(init=SheetInit(rows=[\
             SheetRow(cells=[Decimal:-1.0]), \
             SheetRow(cells=[BinaryOp(operator=Operator:-, left=Decimal:-2.0, right=Ident:ab)])]))"
        );
        assert_eq!(
            first_definition("sheet SH = {- ab, cd}\nprint_sheet SH"),
            "SheetDefinition:SH(init=SheetInit(rows=[\
             SheetRow(cells=[UnaryOp(operator=Operator:-, operand=Ident:ab), Ident:cd])]))"
        );
    }

    #[test]
    fn test_sheet_dimensions() {
        assert_eq!(
            first_definition("sheet SH = 3 * 4\nprint_sheet SH"),
            "SheetDefinition:SH(init=SheetInit(width=Int:3, height=Int:4))"
        );
        assert_eq!(
            first_definition("sheet SH\nprint_sheet SH"),
            "SheetDefinition:SH"
        );
    }

    #[test]
    fn test_range_definition() {
        assert_eq!(
            first_definition("range _r = range SH'A1..SH'B2\nprint_range _r"),
            "RangeDefinition:_r(value=RangeExpression(\
             from=CellRef:SH'A1(sheet=Ident:SH, coordinate=Ident:A1), \
             to=CellRef:SH'B2(sheet=Ident:SH, coordinate=Ident:B2)))"
        );
    }

    #[test]
    fn test_parse_basic_expr() {
        assert_eq!(parse_expr("ab"), "Ident:ab");
        assert_eq!(parse_expr("2.5"), "Decimal:2.5");
        assert_eq!(parse_expr("-1.0"), "Decimal:-1.0");
        assert_eq!(
            parse_expr("ab + cd * ef"),
            "BinaryOp(operator=Operator:+, left=Ident:ab, \
             right=BinaryOp(operator=Operator:*, left=Ident:cd, right=Ident:ef))"
        );
        assert_eq!(
            parse_expr("(ab + cd) * ef"),
            "BinaryOp(operator=Operator:*, \
             left=BinaryOp(operator=Operator:+, left=Ident:ab, right=Ident:cd), right=Ident:ef)"
        );
        assert_eq!(
            parse_expr("-ab * cd"),
            "BinaryOp(operator=Operator:*, \
             left=UnaryOp(operator=Operator:-, operand=Ident:ab), right=Ident:cd)"
        );
        assert_eq!(
            parse_expr("ab < cd + 1.0"),
            "BinaryOp(operator=Operator:<, left=Ident:ab, \
             right=BinaryOp(operator=Operator:+, left=Ident:cd, right=Decimal:1.0))"
        );
    }

    #[test]
    fn test_chains_nest_to_the_right() {
        assert_eq!(
            parse_expr("ab - cd - ef"),
            "BinaryOp(operator=Operator:-, left=Ident:ab, \
             right=BinaryOp(operator=Operator:-, left=Ident:cd, right=Ident:ef))"
        );
        assert_eq!(
            parse_expr("ab / cd / ef"),
            "BinaryOp(operator=Operator:/, left=Ident:ab, \
             right=BinaryOp(operator=Operator:/, left=Ident:cd, right=Ident:ef))"
        );
        assert_eq!(
            parse_expr("ab = cd != ef"),
            "BinaryOp(operator=Operator:=, left=Ident:ab, \
             right=BinaryOp(operator=Operator:!=, left=Ident:cd, right=Ident:ef))"
        );
    }

    #[test]
    fn test_cells_ranges_and_calls() {
        assert_eq!(
            parse_expr("SH'A1 + $ + $:_r"),
            "BinaryOp(operator=Operator:+, \
             left=CellRef:SH'A1(sheet=Ident:SH, coordinate=Ident:A1), \
             right=BinaryOp(operator=Operator:+, left=CellRef:$, \
             right=CellRef:$:_r(range=Ident:_r)))"
        );
        assert_eq!(
            parse_expr("Sum[_r, SH, 2.5]"),
            "FunctionCall:Sum(arguments=[RangeExpression:_r, Ident:SH, Decimal:2.5])"
        );
        assert_eq!(parse_expr("Now[]"), "FunctionCall:Now(arguments=[])");
        assert_eq!(
            parse_expr("#_r[1, 2]"),
            "RangeCount(range=RangeExpression(range=RangeExpression:_r, column=Int:1, row=Int:2))"
        );
        assert_eq!(
            parse_expr("#[Rows[SH]][0, 1][2, 3]"),
            "RangeCount(range=RangeExpression(\
             range=RangeExpression(range=RangeExpression(\
             call=FunctionCall:Rows(arguments=[Ident:SH])), column=Int:0, row=Int:1), \
             column=Int:2, row=Int:3))"
        );
    }

    #[test]
    fn test_print_statements() {
        assert_eq!(
            tree("print_sheet !Result:! SH\nprint_range _r\nprint_scalar !! 1.0"),
            "Program(definitions=[], statements=[\
             Print:sheet(info=InfoString:Result:, target=Ident:SH), \
             Print:range(target=RangeExpression:_r), \
             Print:scalar(info=InfoString:, target=Decimal:1.0)])"
        );
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(
            tree("if ab > 1.0 then print_scalar ab else print_scalar 1.0 endif"),
            "Program(definitions=[], statements=[If(\
             condition=BinaryOp(operator=Operator:>, left=Ident:ab, right=Decimal:1.0), \
             then_branch=[Print:scalar(target=Ident:ab)], \
             else_branch=[Print:scalar(target=Decimal:1.0)])])"
        );
        assert_eq!(
            tree("if ab then ab := 1.0 endif"),
            "Program(definitions=[], statements=[If(condition=Ident:ab, \
             then_branch=[Assignment(variable=Ident:ab, value=Decimal:1.0)])])"
        );
        assert_eq!(
            tree("while ab < 1.0 do ab := ab + 1.0 done"),
            "Program(definitions=[], statements=[While(\
             condition=BinaryOp(operator=Operator:<, left=Ident:ab, right=Decimal:1.0), \
             body=[Assignment(variable=Ident:ab, \
             value=BinaryOp(operator=Operator:+, left=Ident:ab, right=Decimal:1.0))])])"
        );
        assert_eq!(
            tree("for _r, [Cols[SH]] do $ := $ * 2.0 done"),
            "Program(definitions=[], statements=[For(ranges=[RangeExpression:_r, \
             RangeExpression(call=FunctionCall:Cols(arguments=[Ident:SH]))], \
             body=[Assignment(cell=CellRef:$, \
             value=BinaryOp(operator=Operator:*, left=CellRef:$, right=Decimal:2.0))])])"
        );
    }

    #[test]
    fn test_assignments() {
        assert_eq!(
            tree("_r := _s[1, 2]\nSH := SHB\nSH'C3 := 0.0\n$:_r := ab\nUpdate[_r]"),
            "Program(definitions=[], statements=[\
             Assignment(variable=Ident:_r, \
             value=RangeExpression(range=RangeExpression:_s, column=Int:1, row=Int:2)), \
             Assignment(variable=Ident:SH, value=Ident:SHB), \
             Assignment(cell=CellRef:SH'C3(sheet=Ident:SH, coordinate=Ident:C3), \
             value=Decimal:0.0), \
             Assignment(cell=CellRef:$:_r(range=Ident:_r), value=Ident:ab), \
             SubroutineCall:Update(arguments=[RangeExpression:_r])])"
        );
    }

    #[test]
    fn test_function_definition() {
        let src = "function Double[xx:scalar, _r:range, SH:sheet] return scalar is\n\
                   \x20 scalar tmp\n\
                   \x20 tmp := xx * 2.0\n\
                   \x20 return tmp\n\
                   end\n\
                   print_scalar Double[1.0, _r, SH]";
        assert_eq!(
            first_definition(src),
            "FunctionDefinition:Double(formals=[\
             FormalArg:xx(type=TypeName:scalar), \
             FormalArg:_r(type=TypeName:range), \
             FormalArg:SH(type=TypeName:sheet)], \
             return_type=TypeName:scalar, \
             locals=[ScalarDefinition:tmp], \
             body=[Assignment(variable=Ident:tmp, \
             value=BinaryOp(operator=Operator:*, left=Ident:xx, right=Decimal:2.0)), \
             Return(value=Ident:tmp)])"
        );

        let src = "function Whole[] return range is return range SH'A1..SH'C3 end\nab := 1.0";
        assert_eq!(
            first_definition(src),
            "FunctionDefinition:Whole(formals=[], return_type=TypeName:range, locals=[], \
             body=[Return(value=RangeExpression(\
             from=CellRef:SH'A1(sheet=Ident:SH, coordinate=Ident:A1), \
             to=CellRef:SH'C3(sheet=Ident:SH, coordinate=Ident:C3)))])"
        );
    }

    #[test]
    fn test_subroutine_definition() {
        let program = parse_str(
            "scalar total = 0.0\n\
             subroutine Reset[] is $ := 0.0 end\n\
             Reset[]",
        )
        .unwrap();
        assert_eq!(program.definitions.len(), 2);
        assert_eq!(
            Node::from(&program.definitions[1]).to_string(),
            "SubroutineDefinition:Reset(formals=[], locals=[], \
             body=[Assignment(cell=CellRef:$, value=Decimal:0.0)])"
        );
    }

    #[test]
    fn test_parse_is_repeatable() {
        let src = "sheet SH = {1.0, 2.0}\nprint_sheet SH";
        let parser = Parser::new();
        let first = parser.parse(Lexer::new(src)).unwrap();
        let second = parser.parse(Lexer::new(src)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_on_separate_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| parse_str("ab := cd - 1.0\nprint_scalar ab")))
            .collect();
        let expected = parse_str("ab := cd - 1.0\nprint_scalar ab").unwrap();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(
            parse_str("print_scalar ab\nendif"),
            Err(SyntaxError {
                token: "endif".to_string(),
                line: 2
            })
        );
        // `-1.0` is a single literal, so it cannot follow an operand
        assert_eq!(
            parse_str("print_scalar ab -1.0"),
            Err(SyntaxError {
                token: "-1.0".to_string(),
                line: 1
            })
        );
        // a single capital is a sheet name, never a function name
        assert_eq!(
            parse_str("function F[] return scalar is return 1.0 end\nprint_scalar 1.0"),
            Err(SyntaxError {
                token: "F".to_string(),
                line: 1
            })
        );
        // integers are only valid as indices and dimensions
        assert_eq!(
            parse_str("print_scalar 5"),
            Err(SyntaxError {
                token: "5".to_string(),
                line: 1
            })
        );
        assert_eq!(
            parse_str("sheet SH = {}\nprint_sheet SH"),
            Err(SyntaxError {
                token: "}".to_string(),
                line: 1
            })
        );
    }

    #[test]
    fn test_unexpected_end_of_input() {
        assert_eq!(
            parse_str("scalar sc = 1.0"),
            Err(SyntaxError {
                token: "EOF".to_string(),
                line: 1
            })
        );
        assert_eq!(
            parse_str("print_scalar ab\n\nab :="),
            Err(SyntaxError {
                token: "EOF".to_string(),
                line: 3
            })
        );
        assert_eq!(
            parse_str(""),
            Err(SyntaxError {
                token: "EOF".to_string(),
                line: 1
            })
        );
    }

    #[test]
    fn test_unexpected_end_after_trailing_newlines() {
        assert_eq!(
            parse_str("scalar sc = 1.0\n"),
            Err(SyntaxError {
                token: "EOF".to_string(),
                line: 1
            })
        );
        assert_eq!(
            parse_str("print_scalar ab\nwhile ab do\n\n\n"),
            Err(SyntaxError {
                token: "EOF".to_string(),
                line: 2
            })
        );
    }

    #[test]
    fn test_integer_overflow() {
        assert_eq!(
            parse_str("sheet SH = 99999999999999999999 * 2\nprint_sheet SH"),
            Err(SyntaxError {
                token: "99999999999999999999".to_string(),
                line: 1
            })
        );
    }

    #[test]
    fn test_lexical_error_aborts_parse() {
        assert_eq!(
            parse_str("print_scalar ab\nab := 1.0 ö"),
            Err(LexicalError {
                character: 'ö',
                line: 2
            })
        );
    }

    #[derive(Default)]
    struct Recorder {
        tokens: Vec<String>,
        nodes: Vec<String>,
    }

    impl Trace for Recorder {
        fn token(&mut self, token: &Token) {
            self.tokens.push(token.text.clone());
        }

        fn reduced(&mut self, node: &Node) {
            self.nodes.push(node.label());
        }
    }

    #[test]
    fn test_trace() {
        let mut recorder = Recorder::default();
        Parser::new()
            .parse_traced(Lexer::new("print_scalar ab + 1.0"), &mut recorder)
            .unwrap();
        assert_eq!(recorder.tokens, vec!["print_scalar", "ab", "+", "1.0"]);
        assert_eq!(
            recorder.nodes,
            vec![
                "Operator:+",
                "Ident:ab",
                "Decimal:1.0",
                "BinaryOp",
                "Print:scalar",
                "Program"
            ]
        );
    }

    #[test]
    fn test_trace_stops_at_error() {
        let mut recorder = Recorder::default();
        let result = Parser::new().parse_traced(Lexer::new("print_scalar ab ab"), &mut recorder);
        assert!(result.is_err());
        assert_eq!(recorder.tokens, vec!["print_scalar", "ab", "ab"]);
        assert!(recorder.nodes.is_empty());
    }
}
