use np_diff::{Diff, EditType, CONTEXT_SIZE, SEPARATE_SIZE};
use proptest::prelude::*;

fn composed(a: &[u8], b: &[u8]) -> Diff<u8> {
    let mut d = Diff::new(a, b);
    d.compose();
    d
}

fn is_subsequence(needle: &[u8], haystack: &[u8]) -> bool {
    let mut it = haystack.iter();
    needle.iter().all(|n| it.any(|h| h == n))
}

proptest! {
    #[test]
    fn patch_round_trips(a in "[abc]{0,40}", b in "[abc]{0,40}") {
        let a = a.as_bytes();
        let b = b.as_bytes();
        let d = composed(a, b);
        prop_assert_eq!(d.patch(a), b.to_vec());
    }

    #[test]
    fn edit_distance_is_symmetric(a in "[abc]{0,30}", b in "[abc]{0,30}") {
        let fwd = composed(a.as_bytes(), b.as_bytes());
        let bwd = composed(b.as_bytes(), a.as_bytes());
        prop_assert_eq!(fwd.edit_distance(), bwd.edit_distance());
    }

    #[test]
    fn lcs_length_matches_distance(a in "[abcd]{0,30}", b in "[abcd]{0,30}") {
        let d = composed(a.as_bytes(), b.as_bytes());
        let total = a.len() + b.len();
        prop_assert!(d.edit_distance() <= total);
        prop_assert_eq!(d.lcs().len(), (total - d.edit_distance()) / 2);
    }

    #[test]
    fn lcs_is_common_subsequence(a in "[ab]{0,25}", b in "[ab]{0,25}") {
        let d = composed(a.as_bytes(), b.as_bytes());
        prop_assert!(is_subsequence(d.lcs().elements(), a.as_bytes()));
        prop_assert!(is_subsequence(d.lcs().elements(), b.as_bytes()));
    }

    #[test]
    fn script_length_accounts_for_every_element(a in "[abc]{0,30}", b in "[abc]{0,30}") {
        // Each input element is consumed by exactly one entry.
        let d = composed(a.as_bytes(), b.as_bytes());
        let mut before = 0usize;
        let mut after = 0usize;
        for e in d.ses().entries() {
            match e.info.edit {
                EditType::Delete => before += 1,
                EditType::Add => after += 1,
                EditType::Common => {
                    before += 1;
                    after += 1;
                }
            }
        }
        prop_assert_eq!(before, a.len());
        prop_assert_eq!(after, b.len());
    }

    #[test]
    fn hunk_contexts_stay_capped(a in "[ab]{0,40}", b in "[ab]{0,40}") {
        // Trailing context lives at the end of the change block as a run
        // of Common entries; that run is bounded like the leading side.
        let d = composed(a.as_bytes(), b.as_bytes());
        for hunk in d.compose_hunks() {
            prop_assert!(hunk.leading.len() <= CONTEXT_SIZE);
            let tail_commons = hunk
                .change
                .iter()
                .rev()
                .take_while(|e| e.info.edit == EditType::Common)
                .count();
            prop_assert!(tail_commons <= SEPARATE_SIZE);
            prop_assert!(hunk.trailing.len() <= SEPARATE_SIZE);
        }
    }

    #[test]
    fn hunks_cover_every_change(a in "[abc]{0,40}", b in "[abc]{0,40}") {
        // Every delete and every add of the script appears in some hunk's
        // change block, each side in script order. (The change buffer may
        // reorder a delete ahead of an adjacent add, so the two sides are
        // checked independently.)
        let d = composed(a.as_bytes(), b.as_bytes());
        let hunks = d.compose_hunks();

        for side in [EditType::Delete, EditType::Add] {
            let in_script: Vec<_> = d
                .ses()
                .entries()
                .iter()
                .filter(|e| e.info.edit == side)
                .cloned()
                .collect();
            let in_hunks: Vec<_> = hunks
                .iter()
                .flat_map(|h| h.change.iter())
                .filter(|e| e.info.edit == side)
                .cloned()
                .collect();
            prop_assert_eq!(in_script, in_hunks);
        }

        // Header lengths count exactly the entries the hunk spans.
        for hunk in &hunks {
            let before = hunk
                .entries()
                .filter(|e| e.info.edit != EditType::Add)
                .count();
            let after = hunk
                .entries()
                .filter(|e| e.info.edit != EditType::Delete)
                .count();
            prop_assert_eq!(hunk.before_len, before);
            prop_assert_eq!(hunk.after_len, after);
        }
    }
}
