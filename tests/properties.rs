use differences::algorithms::{myers, Capture};
use differences::{ChangeTag, Differences, Window};
use proptest::prelude::*;

/// Small alphabets make sure the inputs share plenty of items.
fn seq(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..4, 0..max_len)
}

fn lcs_len(a: &[u8], b: &[u8]) -> usize {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 0..a.len() {
        for j in 0..b.len() {
            table[i + 1][j + 1] = if a[i] == b[j] {
                table[i][j] + 1
            } else {
                table[i][j + 1].max(table[i + 1][j])
            };
        }
    }
    table[a.len()][b.len()]
}

fn edited(diff: &Differences<'_, u8>, tag: ChangeTag) -> usize {
    diff.iter()
        .filter(|chunk| chunk.tag() == tag)
        .map(|chunk| chunk.len())
        .sum()
}

proptest! {
    #[test]
    fn test_reconstruction(old in seq(40), new in seq(40)) {
        let diff = Differences::from_slices(&old, &new);
        let rebuilt_old = diff
            .iter()
            .filter_map(|chunk| chunk.old_window())
            .flat_map(|window| window.iter().copied())
            .collect::<Vec<_>>();
        let rebuilt_new = diff
            .iter()
            .filter_map(|chunk| chunk.new_window())
            .flat_map(|window| window.iter().copied())
            .collect::<Vec<_>>();
        prop_assert_eq!(&rebuilt_old, &old);
        prop_assert_eq!(&rebuilt_new, &new);
    }

    #[test]
    fn test_partition(old in seq(40), new in seq(40)) {
        let diff = Differences::from_slices(&old, &new);
        let mut old_pos = 0;
        let mut new_pos = 0;
        for chunk in &diff {
            prop_assert_eq!(chunk.old_range().start, old_pos);
            prop_assert_eq!(chunk.new_range().start, new_pos);
            old_pos = chunk.old_range().end;
            new_pos = chunk.new_range().end;
        }
        prop_assert_eq!(old_pos, old.len());
        prop_assert_eq!(new_pos, new.len());
    }

    #[test]
    fn test_chunk_shapes(old in seq(40), new in seq(40)) {
        let diff = Differences::from_slices(&old, &new);
        for chunk in &diff {
            prop_assert!(!chunk.is_empty());
            match chunk.tag() {
                ChangeTag::Equal => {
                    let a = chunk.old_window().unwrap();
                    let b = chunk.new_window().unwrap();
                    prop_assert_eq!(a.as_slice(), b.as_slice());
                }
                ChangeTag::Delete => {
                    prop_assert!(chunk.old_window().is_some());
                    prop_assert!(chunk.new_window().is_none());
                }
                ChangeTag::Insert => {
                    prop_assert!(chunk.old_window().is_none());
                    prop_assert!(chunk.new_window().is_some());
                }
            }
        }
    }

    #[test]
    fn test_chunk_order(old in seq(40), new in seq(40)) {
        let diff = Differences::from_slices(&old, &new);
        for pair in diff.chunks().windows(2) {
            let allowed = matches!(
                (pair[0].tag(), pair[1].tag()),
                (ChangeTag::Equal, ChangeTag::Delete)
                    | (ChangeTag::Equal, ChangeTag::Insert)
                    | (ChangeTag::Delete, ChangeTag::Insert)
                    | (ChangeTag::Delete, ChangeTag::Equal)
                    | (ChangeTag::Insert, ChangeTag::Equal)
            );
            prop_assert!(allowed, "{:?} followed by {:?}", pair[0].tag(), pair[1].tag());
        }
    }

    #[test]
    fn test_minimal(old in seq(16), new in seq(16)) {
        let diff = Differences::from_slices(&old, &new);
        let common = lcs_len(&old, &new);
        prop_assert_eq!(edited(&diff, ChangeTag::Delete), old.len() - common);
        prop_assert_eq!(edited(&diff, ChangeTag::Insert), new.len() - common);
    }

    #[test]
    fn test_idempotence(items in seq(60)) {
        let diff = Differences::from_slices(&items, &items);
        if items.is_empty() {
            prop_assert!(diff.is_empty());
        } else {
            prop_assert_eq!(diff.len(), 1);
            prop_assert_eq!(diff[0].tag(), ChangeTag::Equal);
            prop_assert_eq!(diff[0].len(), items.len());
        }
    }

    #[test]
    fn test_symmetry(old in seq(40), new in seq(40)) {
        let forward = Differences::from_slices(&old, &new);
        let backward = Differences::from_slices(&new, &old);
        prop_assert_eq!(
            edited(&forward, ChangeTag::Equal),
            edited(&backward, ChangeTag::Equal)
        );
        prop_assert_eq!(
            edited(&forward, ChangeTag::Delete),
            edited(&backward, ChangeTag::Insert)
        );
        prop_assert_eq!(
            edited(&forward, ChangeTag::Insert),
            edited(&backward, ChangeTag::Delete)
        );
    }

    #[test]
    fn test_empty_sides(items in seq(40)) {
        let inserted = Differences::from_slices(&[], &items);
        let deleted = Differences::from_slices(&items, &[]);
        if items.is_empty() {
            prop_assert!(inserted.is_empty());
            prop_assert!(deleted.is_empty());
        } else {
            prop_assert_eq!(inserted.len(), 1);
            prop_assert_eq!(inserted[0].tag(), ChangeTag::Insert);
            prop_assert_eq!(inserted[0].len(), items.len());
            prop_assert_eq!(deleted.len(), 1);
            prop_assert_eq!(deleted[0].tag(), ChangeTag::Delete);
            prop_assert_eq!(deleted[0].len(), items.len());
        }
    }

    #[test]
    fn test_custom_comparison(old in "[a-cA-C]{0,30}", new in "[a-cA-C]{0,30}") {
        let old = old.chars().collect::<Vec<_>>();
        let new = new.chars().collect::<Vec<_>>();
        let diff = Differences::configure()
            .diff_by(&old, &new, |a, b| a.eq_ignore_ascii_case(b))
            .unwrap();
        for chunk in diff.iter().filter(|chunk| chunk.tag() == ChangeTag::Equal) {
            let a = chunk.old_window().unwrap();
            let b = chunk.new_window().unwrap();
            for (x, y) in a.iter().zip(b.iter()) {
                prop_assert!(x.eq_ignore_ascii_case(y));
            }
        }
        let lower = |s: &[char]| s.iter().map(|c| c.to_ascii_lowercase() as u8).collect::<Vec<_>>();
        let common = lcs_len(&lower(&old[..]), &lower(&new[..]));
        prop_assert_eq!(
            diff.iter()
                .filter(|chunk| chunk.tag() == ChangeTag::Equal)
                .map(|chunk| chunk.len())
                .sum::<usize>(),
            common
        );
    }

    #[test]
    fn test_windows_report_original_positions(
        old in seq(30),
        new in seq(30),
        cut in (0usize..8, 0usize..8),
    ) {
        let old_start = cut.0.min(old.len());
        let new_start = cut.1.min(new.len());
        let diff = Differences::new(
            &old,
            old_start,
            old.len() - old_start,
            &new,
            new_start,
            new.len() - new_start,
        )
        .unwrap();

        let mut direct = Capture::new();
        myers::diff(&mut direct, &old, old_start..old.len(), &new, new_start..new.len()).unwrap();
        prop_assert_eq!(diff.ops(), direct.into_ops());

        let whole = Window::full(&old);
        prop_assert_eq!(diff.old_window(), whole.sub_window(old_start, old.len() - old_start).unwrap());
    }

    #[test]
    fn test_ratio_bounds(old in seq(40), new in seq(40)) {
        let ratio = Differences::from_slices(&old, &new).ratio();
        prop_assert!((0.0..=1.0).contains(&ratio));
    }
}
