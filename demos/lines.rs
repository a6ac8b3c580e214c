use std::fs::read_to_string;
use std::process::exit;

use differences::{ChangeTag, Differences};

fn main() {
    let args: Vec<_> = std::env::args_os().collect();
    if args.len() != 3 {
        eprintln!("usage: lines [old] [new]");
        exit(1);
    }

    let old = read_to_string(&args[1]).unwrap();
    let new = read_to_string(&args[2]).unwrap();
    let old_lines: Vec<_> = old.lines().collect();
    let new_lines: Vec<_> = new.lines().collect();

    let diff = Differences::from_slices(&old_lines, &new_lines);
    for chunk in &diff {
        for line in chunk.values() {
            println!("{}{}", chunk.tag(), line);
        }
    }

    let changed = diff
        .iter()
        .filter(|chunk| chunk.tag() != ChangeTag::Equal)
        .count();
    eprintln!(
        "{} chunks, {} changed, similarity {:.2}",
        diff.len(),
        changed,
        diff.ratio()
    );
}
