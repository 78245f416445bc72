use std::path::{Path, PathBuf};

use candi::{
    compile, get_result,
    compiler::{preprocessor::preprocess, tokenizer::tokenize},
    run_file,
};
use clap::Parser;

/// candi is the front-end of a compiler toolchain for the Candi directive
/// language: tokenizer, preprocessor, parser, and constant evaluator.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells candi to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints the final value of a candi program.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Print the preprocessed token stream instead of running the program.
    #[arg(long)]
    dump_tokens: bool,

    /// Print the program tree instead of running the program.
    #[arg(long)]
    dump_ast: bool,

    contents: String,
}

/// Loads the script and the directory include paths resolve against.
fn load(args: &Args) -> (String, PathBuf) {
    if args.file {
        let source = std::fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        });
        let dir = Path::new(&args.contents).parent()
                                           .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        (source, dir)
    } else {
        (args.contents.clone(), PathBuf::from("."))
    }
}

fn main() {
    let args = Args::parse();

    if args.dump_tokens {
        let (script, include_dir) = load(&args);
        match tokenize(&script).and_then(|t| preprocess(t, &include_dir)) {
            Ok(tokens) => {
                for token in tokens {
                    println!("{:?} {:?} ({}:{})",
                             token.kind, token.literal, token.line, token.column);
                }
            },
            Err(e) => eprintln!("{e}"),
        }
        return;
    }

    if args.dump_ast {
        let (script, include_dir) = load(&args);
        match compile(&script, &include_dir) {
            Ok(program) => print!("{program}"),
            Err(e) => eprintln!("{e}"),
        }
        return;
    }

    let result = if args.file {
        run_file(Path::new(&args.contents), args.pipe_mode)
    } else {
        get_result(&args.contents, args.pipe_mode)
    };
    if let Err(e) = result {
        eprintln!("{e}");
    }
}
