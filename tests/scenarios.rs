use differences::{ChangeTag, Differences, Error};

type Shape<'a> = (ChangeTag, Option<Vec<&'a str>>, Option<Vec<&'a str>>);

fn shape<'a>(diff: &Differences<'a, &'a str>) -> Vec<Shape<'a>> {
    diff.iter()
        .map(|chunk| {
            (
                chunk.tag(),
                chunk.old_window().map(|w| w.as_slice().to_vec()),
                chunk.new_window().map(|w| w.as_slice().to_vec()),
            )
        })
        .collect()
}

#[test]
fn test_identical() {
    let diff = Differences::from_slices(&["a", "b", "c"], &["a", "b", "c"]);
    assert_eq!(
        shape(&diff),
        vec![(
            ChangeTag::Equal,
            Some(vec!["a", "b", "c"]),
            Some(vec!["a", "b", "c"])
        )]
    );
}

#[test]
fn test_single_replacement() {
    let diff = Differences::from_slices(&["a", "b", "c"], &["a", "x", "c"]);
    assert_eq!(
        shape(&diff),
        vec![
            (ChangeTag::Equal, Some(vec!["a"]), Some(vec!["a"])),
            (ChangeTag::Delete, Some(vec!["b"]), None),
            (ChangeTag::Insert, None, Some(vec!["x"])),
            (ChangeTag::Equal, Some(vec!["c"]), Some(vec!["c"])),
        ]
    );
}

#[test]
fn test_empty_old() {
    let diff = Differences::from_slices(&[], &["x", "y"]);
    assert_eq!(
        shape(&diff),
        vec![(ChangeTag::Insert, None, Some(vec!["x", "y"]))]
    );
}

#[test]
fn test_empty_new() {
    let diff = Differences::from_slices(&["x", "y"], &[]);
    assert_eq!(
        shape(&diff),
        vec![(ChangeTag::Delete, Some(vec!["x", "y"]), None)]
    );
}

#[test]
fn test_both_empty() {
    let diff = Differences::<&str>::from_slices(&[], &[]);
    assert!(diff.is_empty());
    assert_eq!(diff.to_string(), "");
}

#[test]
fn test_alternating() {
    let diff = Differences::from_slices(&["a", "b", "a", "b", "a"], &["b", "a", "b", "a", "b"]);
    let edits = diff
        .iter()
        .filter(|chunk| chunk.tag() != ChangeTag::Equal)
        .map(|chunk| chunk.len())
        .sum::<usize>();
    assert_eq!(edits, 2);
    insta::assert_snapshot!(diff.to_string(), @r###"
    + b
      a,b,a,b
    - a
    "###);
}

#[test]
fn test_render_lines() {
    let old = "fn main() {\n    let x = 1;\n    println!(x);\n}";
    let new = "fn main() {\n    let x = 2;\n    let y = 3;\n    println!(x);\n}";
    let old = old.lines().collect::<Vec<_>>();
    let new = new.lines().collect::<Vec<_>>();
    let diff = Differences::from_slices(&old, &new);
    assert_eq!(
        diff.to_string(),
        "  fn main() {\n-     let x = 1;\n+     let x = 2;,    let y = 3;\n      println!(x);,}\n"
    );
    assert_eq!(diff.len(), 4);
    assert_eq!(diff[2].old_range(), 2..2);
    assert_eq!(diff[2].new_range(), 1..3);
}

#[test]
fn test_range_errors() {
    let items = [1, 2, 3];
    assert_eq!(
        Differences::new(&items, 2, 2, &items, 0, 3).unwrap_err(),
        Error::OutOfRange {
            offset: 2,
            len: 2,
            available: 3
        }
    );
    assert!(matches!(
        Differences::new(&items, 0, 3, &items, usize::MAX, 2),
        Err(Error::Overflow { .. })
    ));
}

/// Tiny deterministic generator so the large inputs stay reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

#[test]
fn test_large_inputs() {
    let mut rng = Lcg(42);
    let base = (0..5000).map(|_| rng.next(64) as u32).collect::<Vec<_>>();

    let mut old = Vec::with_capacity(base.len());
    let mut new = Vec::with_capacity(base.len());
    let mut mutations = 0;
    for &item in &base {
        match rng.next(100) {
            0 => {
                old.push(item);
                mutations += 1;
            }
            1 => {
                new.push(item);
                mutations += 1;
            }
            2 => {
                old.push(item);
                new.push(1000 + item);
                mutations += 2;
            }
            _ => {
                old.push(item);
                new.push(item);
            }
        }
    }

    let diff = Differences::from_slices(&old, &new);

    let rebuilt_old = diff
        .iter()
        .filter_map(|chunk| chunk.old_window())
        .flat_map(|w| w.iter().copied())
        .collect::<Vec<_>>();
    let rebuilt_new = diff
        .iter()
        .filter_map(|chunk| chunk.new_window())
        .flat_map(|w| w.iter().copied())
        .collect::<Vec<_>>();
    assert_eq!(rebuilt_old, old);
    assert_eq!(rebuilt_new, new);

    let edits = diff
        .iter()
        .filter(|chunk| chunk.tag() != ChangeTag::Equal)
        .map(|chunk| chunk.len())
        .sum::<usize>();
    assert!(edits <= mutations, "{} edits for {} mutations", edits, mutations);
    assert!(diff.ratio() > 0.9);
}
