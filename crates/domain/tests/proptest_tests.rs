//! Property-based tests for domain entities and value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use std::collections::HashSet;

use domain::{Card, CardId, CardPatch, Language, NewCard, detect_speech_language};
use proptest::prelude::*;

fn new_card_strategy() -> impl Strategy<Value = NewCard> {
    (".*", ".*", ".*", ".*").prop_map(|(original, translated, description, image)| NewCard {
        original_text: original,
        translated_text: translated,
        image_description: description,
        image,
    })
}

fn patch_strategy() -> impl Strategy<Value = CardPatch> {
    (
        proptest::option::of(".*"),
        proptest::option::of(".*"),
        proptest::option::of(".*"),
        proptest::option::of(".*"),
    )
        .prop_map(|(original_text, translated_text, image_description, image)| CardPatch {
            original_text,
            translated_text,
            image_description,
            image,
        })
}

// ============================================================================
// Card Property Tests
// ============================================================================

mod card_tests {
    use super::*;

    proptest! {
        #[test]
        fn from_new_preserves_content(new in new_card_strategy()) {
            let card = Card::from_new(new.clone());
            prop_assert_eq!(card.original_text, new.original_text);
            prop_assert_eq!(card.translated_text, new.translated_text);
            prop_assert_eq!(card.image_description, new.image_description);
            prop_assert_eq!(card.image, new.image);
        }

        #[test]
        fn ids_are_pairwise_distinct(count in 1usize..200) {
            let ids: HashSet<CardId> = (0..count)
                .map(|_| Card::from_new(NewCard::new("a", "b")).id)
                .collect();
            prop_assert_eq!(ids.len(), count);
        }

        #[test]
        fn patch_never_changes_id(new in new_card_strategy(), patch in patch_strategy()) {
            let mut card = Card::from_new(new);
            let id = card.id.clone();
            card.apply(&patch);
            prop_assert_eq!(card.id, id);
        }

        #[test]
        fn patch_sets_present_and_keeps_absent(
            new in new_card_strategy(),
            patch in patch_strategy()
        ) {
            let original = Card::from_new(new);
            let mut card = original.clone();
            card.apply(&patch);

            prop_assert_eq!(
                &card.original_text,
                patch.original_text.as_ref().unwrap_or(&original.original_text)
            );
            prop_assert_eq!(
                &card.translated_text,
                patch.translated_text.as_ref().unwrap_or(&original.translated_text)
            );
            prop_assert_eq!(
                &card.image_description,
                patch.image_description.as_ref().unwrap_or(&original.image_description)
            );
            prop_assert_eq!(&card.image, patch.image.as_ref().unwrap_or(&original.image));
        }

        #[test]
        fn card_json_roundtrip(new in new_card_strategy()) {
            let card = Card::from_new(new);
            let json = serde_json::to_string(&card).unwrap();
            let parsed: Card = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(parsed, card);
        }
    }
}

// ============================================================================
// Language Property Tests
// ============================================================================

mod language_tests {
    use super::*;

    proptest! {
        #[test]
        fn ascii_text_is_spoken_as_english(text in "[ -~]*") {
            prop_assert_eq!(detect_speech_language(&text), Language::english());
        }

        #[test]
        fn any_thai_char_selects_thai(
            prefix in "[a-zA-Z ]*",
            thai in proptest::char::range('\u{0E00}', '\u{0E7F}'),
            suffix in "[a-zA-Z ]*"
        ) {
            let text = format!("{prefix}{thai}{suffix}");
            prop_assert_eq!(detect_speech_language(&text), Language::thai());
        }

        #[test]
        fn non_empty_codes_are_lowercased(code in "[a-zA-Z]{2,3}") {
            let lang = Language::new(&code).unwrap();
            prop_assert_eq!(lang.code(), code.to_lowercase());
        }
    }
}
