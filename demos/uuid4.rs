//! Simple command that prints one or '-n count' UUIDv4 strings in the '-f' encoding

use std::{env, io, io::Write, process::ExitCode};

use uuid4::{Depth, Encoding, Uuid4Gen};

#[derive(Debug, Default)]
struct Options {
    count: Option<usize>,
    encoding: Option<Encoding>,
    depth: Option<Depth>,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-f bin|hex|uuid|base64] [-d depth]",
                    program.as_deref().unwrap_or("uuid4")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let count = opts.count.unwrap_or(1);
    let encoding = opts.encoding.unwrap_or(Encoding::Uuid);
    let mut buf = io::BufWriter::new(io::stdout());
    if count == 1 && opts.depth.is_none() {
        match uuid4::try_uuid4() {
            Ok(e) => writeln!(buf, "{}", encoding.encode(e.as_bytes()))?,
            Err(err) => return fail(err),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let g = match Uuid4Gen::with_depth(opts.depth.unwrap_or_default()) {
        Ok(g) => g,
        Err(err) => return fail(err),
    };
    for e in g.take(count) {
        match e {
            Ok(e) => writeln!(buf, "{}", encoding.encode(e.as_bytes()))?,
            Err(err) => return fail(err),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn fail(err: uuid4::Error) -> io::Result<ExitCode> {
    eprintln!("Error: {}", err);
    Ok(ExitCode::FAILURE)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        let name = match arg.as_str() {
            "-n" => 'n',
            "-f" => 'f',
            "-d" => 'd',
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        };
        let Some(value) = args.next() else {
            return Err(format!("argument to option '{}' missing", name));
        };
        let given_twice = match name {
            'n' => opts
                .count
                .replace(value.parse().map_err(|_| invalid(name, &value))?)
                .is_some(),
            'f' => opts
                .encoding
                .replace(value.parse().map_err(|_| invalid(name, &value))?)
                .is_some(),
            _ => opts
                .depth
                .replace(value.parse().map_err(|err| format!("{}", err))?)
                .is_some(),
        };
        if given_twice {
            return Err(format!("option '{}' given more than once", name));
        }
    }
    Ok(opts)
}

fn invalid(name: char, value: &str) -> String {
    format!("invalid argument to option '{}': '{}'", name, value)
}
