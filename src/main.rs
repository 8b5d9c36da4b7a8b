use std::{fs::read_to_string, path::PathBuf, process, rc::Rc, time::Instant};

use alanc::{
    display_error, errors::errors::Error, lexer::lexer::tokenize, parser::parser::parse,
    type_checker::type_checker::type_check,
};
use log::info;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "alanc", about = "Semantic checker for Alan programs")]
struct CliOpt {
    /// Source file to check
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Print the token stream and stop
    #[structopt(long)]
    tokens: bool,

    /// Print the parsed syntax tree and stop
    #[structopt(long)]
    ast: bool,

    /// Log scope and symbol activity
    #[structopt(short, long)]
    verbose: bool,
}

fn main() {
    let opt = CliOpt::from_args();

    let default_filter = if opt.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let source = match read_to_string(&opt.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: could not read {}: {}", opt.input.display(), err);
            process::exit(1);
        }
    };

    if let Err(error) = run(&opt, &source) {
        display_error(&error, &opt.input, &source);
        process::exit(1);
    }
}

fn run(opt: &CliOpt, source: &str) -> Result<(), Error> {
    let file_name = opt
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| opt.input.to_string_lossy().into_owned());

    let start = Instant::now();
    let tokens = tokenize(source.to_string(), Some(file_name.clone()))?;
    info!("Tokenized in {:?}", start.elapsed());

    if opt.tokens {
        for token in tokens.iter() {
            token.debug();
        }
        return Ok(());
    }

    let parse_start = Instant::now();
    let program = parse(tokens, Rc::new(file_name))?;
    info!("Parsed in {:?}", parse_start.elapsed());

    if opt.ast {
        println!("{}", pretty_print(format!("{:?}", program)));
        return Ok(());
    }

    let type_check_start = Instant::now();
    type_check(&program)?;
    info!("Type checked in {:?}", type_check_start.elapsed());
    info!("Total time: {:?}", start.elapsed());

    println!("{}: OK", opt.input.display());
    Ok(())
}

fn pretty_print(string: String) -> String {
    let mut result = String::new();
    let mut indent: usize = 0;
    let mut ignore_next_space = false;
    let mut in_string = false;
    let mut escaped = false;

    for c in string.chars() {
        if in_string {
            result.push(c);
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                result.push(c);
            }
            '{' => {
                indent += 1;
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                ignore_next_space = true;
            }
            '(' | '[' => {
                indent += 1;
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
            }
            '}' | ')' | ']' => {
                indent = indent.saturating_sub(1);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                result.push(c);
            }
            ',' => {
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                ignore_next_space = true;
            }
            ' ' if ignore_next_space => {
                ignore_next_space = false;
            }
            _ => result.push(c),
        }
    }

    result
}
