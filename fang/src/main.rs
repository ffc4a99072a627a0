//! Command-line interface for fang.
//!
//! `fang parse --input FILE` prints the syntax tree as an S-expression
//! (`--ast` prints the lowered AST instead); `fang tokens --input FILE`
//! prints one token per line. Errors are shown against the source text.

use anyhow::{Context, Result, bail};
use clap::{Parser as ClapParser, Subcommand};
use fang::{FangError, ParserTokenID};
use smartstring::alias::String;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses a fang source file
    Parse {
        /// Input file with fang expressions
        #[arg(short, long)]
        input: String,

        /// Print the lowered AST instead of the syntax tree
        #[arg(long)]
        ast: bool,
    },
    /// Lists the tokens of a fang source file
    Tokens {
        /// Input file with fang expressions
        #[arg(short, long)]
        input: String,
    },
}

fn read_source(path: &str) -> Result<std::string::String> {
    std::fs::read_to_string(path)
        .map_err(FangError::from)
        .with_context(|| format!("can't open {:?}", path))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Parse { input: path, ast } => {
            let source = read_source(&path)?;
            let tree = match fang::parse(&source) {
                Ok(tree) => tree,
                Err(e) => bail!("{}", e.render(&source)),
            };
            if ast {
                match fang::lower(&tree, &source) {
                    Ok(unit) => println!("{:#?}", unit),
                    Err(e) => bail!("{}", e.render(&source)),
                }
            } else {
                println!("{}", tree.to_sexp());
            }
        }
        Commands::Tokens { input: path } => {
            let source = read_source(&path)?;
            let tokens = match fang::tokenize(&source) {
                Ok(tokens) => tokens,
                Err(e) => bail!("{}", e.render(&source)),
            };
            for token in tokens {
                println!(
                    "{} {}..{} {:?}",
                    token.token_id.label(),
                    token.span.start.offset,
                    token.span.end.offset,
                    token.text(&source),
                );
            }
        }
    }
    Ok(())
}
