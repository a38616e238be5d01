use std::{error::Error, fs, process, time::Instant};

use clap::{Arg, ArgAction, ArgMatches, Command};
use sheetscript::frontend::{
    lexer::Lexer,
    node::Node,
    parser::{Parser, Trace},
    visualize::Visualizer,
};

fn main() {
    let matches = Command::new("SheetScript")
        .version("1.0.0")
        .about("A parser for the SheetScript spreadsheet language written in Rust.")
        .arg(Arg::new("file")
            .short('f')
            .long("file")
            .value_name("FILE")
            .help("Path to the SheetScript file that will be parsed.")
            .required(true))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Output tokens as well as the AST. Useful for debugging.")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("trace")
            .short('t')
            .long("trace")
            .help("Print every node the parser builds to stderr.")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("visualize")
            .long("visualize")
            .help("Visualizes the abstract syntax tree with the help of GraphViz/DOT and outputs \
            a PDF with the AST as well as the corresponding .dot file with the given filename.")
            .value_name("PATH"))
        .get_matches();

    if let Err(err) = Runner::new(&matches).run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}

/// Prints the nodes in the order the grammar reduced them, e.g. `function_call( Sum )`.
struct StderrTrace;

impl Trace for StderrTrace {
    fn reduced(&mut self, node: &Node) {
        let kind = format!("{:?}", node.kind);
        eprintln!(
            "{}( {} )",
            to_snake_case(&kind),
            node.value.as_deref().unwrap_or("")
        );
    }
}

fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                snake.push('_');
            }
            snake.push(c.to_ascii_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

/// Simple struct responsible for coordinating parsing a SheetScript file and
/// the requested debug output.
struct Runner<'a> {
    args: &'a ArgMatches,
}

impl<'a> Runner<'a> {
    pub fn new(args: &'a ArgMatches) -> Self {
        Self { args }
    }

    /// Helper function for getting the content of the source file.
    fn load_source_file(&self) -> Result<String, Box<dyn Error>> {
        let path = self
            .args
            .get_one::<String>("file")
            .ok_or("no source file given")?;
        fs::read_to_string(path).map_err(|err| format!("{}: {}", err, path).into())
    }

    /// Parses a SheetScript program and prints whatever the flags ask for.
    pub fn run(&self) -> Result<(), Box<dyn Error>> {
        let src = self.load_source_file()?;
        let verbose = self.args.get_flag("verbose");
        // Time the parse duration
        let start = Instant::now();

        // Only output tokens if verbose flag is set.
        if verbose {
            let tokens = Lexer::new(&src).tokenize()?;
            println!("Tokens:");
            tokens.iter().for_each(|token| println!("\t{}", token));
        }

        let parser = Parser::new();
        let program = if self.args.get_flag("trace") {
            parser.parse_traced(Lexer::new(&src), &mut StderrTrace)?
        } else {
            parser.parse(Lexer::new(&src))?
        };
        let node = Node::from(&program);

        // Only output AST if verbose flag is set.
        if verbose {
            println!("AST:");
            println!("\t{}", node);
            println!("\ntook \u{1b}[32;40m{:.2?}\u{1b}[0m", start.elapsed());
        }
        // Only create graph if flag is set.
        if let Some(filename) = self.args.get_one::<String>("visualize") {
            let mut viz = Visualizer::new("ast", true);
            viz.visualize_node(&node);
            viz.write_to_dot(&format!("{}.dot", filename))?;
            viz.write_to_pdf(&format!("{}.pdf", filename))?;
        }
        Ok(())
    }
}
