use std::{
    fs,
    io::{self, Write},
    process,
};

use clap::{Arg, ArgMatches, Command};
use seed::error::SeedError;
use seed::frontend::{
    lexer::Lexer,
    parser::Parser,
    visualize::{RenderOptions, Visualizer},
};

fn main() {
    env_logger::init();

    let matches = Command::new("seed")
        .version("1.0.0")
        .about("Renders the S-expressions of a source file as a Graphviz DOT graph.")
        .arg(Arg::new("FILE")
            .help("Path to the source file that will be rendered.")
            .required(true)
            .index(1))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write the DOT graph to the given file instead of standard output.")
            .takes_value(true)
            .value_name("PATH"))
        .arg(Arg::new("pdf")
            .long("pdf")
            .help("Additionally render the graph with GraphViz/DOT into a PDF at the given path.")
            .takes_value(true)
            .value_name("PATH"))
        .arg(Arg::new("name")
            .long("name")
            .help("Name of the generated digraph.")
            .takes_value(true))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("Output tokens as well as the AST to standard error. Useful for debugging.")
            .takes_value(false))
        .get_matches();

    if let Err(err) = Runner::new(&matches).run() {
        eprintln!("error: {}.", err);
        process::exit(1);
    }
}

/// Coordinates reading the source file, parsing it and writing the graph.
struct Runner<'a> {
    args: &'a ArgMatches,
}

impl<'a> Runner<'a> {
    fn new(args: &'a ArgMatches) -> Self {
        Self { args }
    }

    fn path(&self) -> &'a str {
        self.args.value_of("FILE").expect("FILE is a required argument")
    }

    /// Helper function for getting the content of a file.
    fn load_source_file(&self) -> Result<String, SeedError> {
        let path = self.path();
        log::info!("reading {}", path);
        seed::read_source(path)
    }

    fn options(&self) -> RenderOptions {
        RenderOptions {
            graph_name: self.args.value_of("name").unwrap_or_default().to_string(),
            ..RenderOptions::default()
        }
    }

    pub fn run(&self) -> Result<(), SeedError> {
        let src = self.load_source_file()?;

        if self.args.is_present("verbose") {
            eprintln!("Tokens:");
            for token in Lexer::new(&src)?.tokenize()? {
                eprintln!("\t{}", token);
            }
        }

        let ast = Parser::new(Lexer::new(&src)?).parse()?;
        if self.args.is_present("verbose") {
            eprintln!("AST:");
            eprint!("{}", ast);
        }

        let mut viz = Visualizer::new(self.options());
        viz.visualize_ast(&ast);
        let graph = viz.graph.to_string();

        match self.args.value_of("output") {
            Some(path) => fs::write(path, &graph).map_err(|err| SeedError::io(path, err))?,
            None => io::stdout()
                .lock()
                .write_all(graph.as_bytes())
                .map_err(|err| SeedError::io("<stdout>", err))?,
        }

        if let Some(path) = self.args.value_of("pdf") {
            viz.write_to_pdf(path)?;
        }
        Ok(())
    }
}
