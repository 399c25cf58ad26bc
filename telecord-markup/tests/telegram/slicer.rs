//! Budget properties of the slicer.

use proptest::prelude::*;
use telecord_markup::common::utf16;
use telecord_markup::error::RenderError;
use telecord_markup::slicer::slice_all;
use telecord_markup::{EntityKind, MessageEntity};

fn non_space(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn test_whole_text_when_it_fits() {
    assert_eq!(slice_all("12 34\n56789", &[], 100).unwrap(), vec!["12 34\n56789"]);
    assert!(slice_all("   \n ", &[], 10).unwrap().is_empty());
}

#[test]
fn test_markup_counts_against_budget() {
    let bold = [MessageEntity::new(EntityKind::Bold, 0, 9)];
    assert_eq!(
        slice_all("1234 6789", &bold, 9).unwrap(),
        vec!["**1234**", "**6789**"]
    );
}

#[test]
fn test_unsatisfiable_budget() {
    let bold = [MessageEntity::new(EntityKind::Bold, 0, 3)];
    assert!(matches!(
        slice_all("abc", &bold, 4),
        Err(RenderError::BudgetUnsatisfiable { max_length: 4 })
    ));
}

proptest! {
    #[test]
    fn plain_chunks_fit_and_keep_every_character(
        text in "[a-z \n\u{1f972}]{0,80}",
        max in 2usize..40,
    ) {
        let chunks = slice_all(&text, &[], max).unwrap();
        for chunk in &chunks {
            prop_assert!(utf16::len(chunk) <= max, "{:?} exceeds {}", chunk, max);
            prop_assert!(!chunk.is_empty());
        }
        prop_assert_eq!(non_space(&chunks.concat()), non_space(&text));
    }

    #[test]
    fn styled_chunks_never_exceed_budget(
        text in "[a-z \n]{1,60}",
        offset in 0usize..60,
        length in 1usize..60,
        max in 1usize..30,
    ) {
        let bold = [MessageEntity::new(EntityKind::Bold, offset, length)];
        match slice_all(&text, &bold, max) {
            Ok(chunks) => {
                for chunk in &chunks {
                    prop_assert!(utf16::len(chunk) <= max);
                }
            }
            Err(err) => prop_assert!(
                matches!(err, RenderError::BudgetUnsatisfiable { .. }),
                "unexpected error {:?}",
                err
            ),
        }
    }
}
