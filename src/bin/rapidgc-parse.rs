use std::{env, fs};
use rapidgc::parse::parse;

fn main() {
    let filename = env::args().nth(1).expect("file name required");
    let input = fs::read_to_string(&filename).unwrap();

    for (n, raw) in input.lines().enumerate() {
        let line = parse(raw);
        if line.malformed {
            eprintln!("Unparseable line {}: {}", n + 1, raw);
        } else if !line.is_noop() {
            println!("{}", line);
        }
    }
}
