//! Flashcard entity and its create/update shapes

use serde::{Deserialize, Serialize};

use crate::value_objects::CardId;

/// A stored language-learning flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique card identifier, assigned at creation
    pub id: CardId,
    /// Phrase in the source language
    pub original_text: String,
    /// Phrase in the target language
    pub translated_text: String,
    /// Short visual description of the phrase
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_description: String,
    /// Base64 encoded image, empty when the card has none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
}

impl Card {
    /// Create a card from its content, assigning a fresh ID
    pub fn from_new(new: NewCard) -> Self {
        Self {
            id: CardId::new(),
            original_text: new.original_text,
            translated_text: new.translated_text,
            image_description: new.image_description,
            image: new.image,
        }
    }

    /// Merge the fields present in `patch` into this card
    ///
    /// The ID is never touched.
    pub fn apply(&mut self, patch: &CardPatch) {
        if let Some(value) = &patch.original_text {
            self.original_text.clone_from(value);
        }
        if let Some(value) = &patch.translated_text {
            self.translated_text.clone_from(value);
        }
        if let Some(value) = &patch.image_description {
            self.image_description.clone_from(value);
        }
        if let Some(value) = &patch.image {
            self.image.clone_from(value);
        }
    }
}

/// Card content without an ID, as submitted by a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub original_text: String,
    pub translated_text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
}

impl NewCard {
    /// Create card content with the two required phrases
    pub fn new(original_text: impl Into<String>, translated_text: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            translated_text: translated_text.into(),
            image_description: String::new(),
            image: String::new(),
        }
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.image_description = description.into();
        self
    }

    /// Attach a base64 encoded image
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

impl From<CardContent> for NewCard {
    fn from(content: CardContent) -> Self {
        Self {
            original_text: content.original_text,
            translated_text: content.translated_text,
            image_description: content.image_description,
            image: String::new(),
        }
    }
}

/// Partial update of a card
///
/// `None` (or an explicit JSON `null`) means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CardPatch {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.original_text.is_none()
            && self.translated_text.is_none()
            && self.image_description.is_none()
            && self.image.is_none()
    }

    /// Iterate over the fields that carry a value, keyed by field name
    pub fn present_fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("original_text", self.original_text.as_deref()),
            ("translated_text", self.translated_text.as_deref()),
            ("image_description", self.image_description.as_deref()),
            ("image", self.image.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

/// Generated flashcard content (translation plus description)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    pub original_text: String,
    pub translated_text: String,
    pub image_description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> NewCard {
        NewCard::new("Hello", "สวัสดี").with_description("A greeting gesture")
    }

    #[test]
    fn from_new_assigns_unique_ids() {
        let a = Card::from_new(hello());
        let b = Card::from_new(hello());
        assert_ne!(a.id, b.id);
        assert_eq!(a.original_text, "Hello");
        assert_eq!(a.translated_text, "สวัสดี");
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut card = Card::from_new(hello());
        let id = card.id.clone();

        card.apply(&CardPatch {
            translated_text: Some("สวัสดีครับ".to_string()),
            ..Default::default()
        });

        assert_eq!(card.id, id);
        assert_eq!(card.original_text, "Hello");
        assert_eq!(card.translated_text, "สวัสดีครับ");
        assert_eq!(card.image_description, "A greeting gesture");
    }

    #[test]
    fn apply_empty_patch_is_noop() {
        let mut card = Card::from_new(hello());
        let before = card.clone();
        card.apply(&CardPatch::default());
        assert_eq!(card, before);
    }

    #[test]
    fn apply_can_set_empty_string() {
        let mut card = Card::from_new(hello());
        card.apply(&CardPatch {
            image_description: Some(String::new()),
            ..Default::default()
        });
        assert!(card.image_description.is_empty());
    }

    #[test]
    fn new_card_defaults_optional_fields() {
        let json = r#"{"original_text": "Cat", "translated_text": "แมว"}"#;
        let new: NewCard = serde_json::from_str(json).unwrap();
        assert!(new.image_description.is_empty());
        assert!(new.image.is_empty());
    }

    #[test]
    fn new_card_treats_null_as_empty() {
        let json = r#"{"original_text": "Cat", "translated_text": "แมว", "image": null}"#;
        let new: NewCard = serde_json::from_str(json).unwrap();
        assert!(new.image.is_empty());
    }

    #[test]
    fn card_treats_null_like_new_card() {
        let json = r#"{"id": "abc", "original_text": "Cat", "translated_text": "แมว", "image_description": null, "image": null}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id.as_str(), "abc");
        assert!(card.image_description.is_empty());
        assert!(card.image.is_empty());

        let missing: Card =
            serde_json::from_str(r#"{"id": "abc", "original_text": "Cat", "translated_text": "แมว"}"#)
                .unwrap();
        assert_eq!(missing, card);
    }

    #[test]
    fn new_card_requires_texts() {
        let json = r#"{"original_text": "Cat"}"#;
        assert!(serde_json::from_str::<NewCard>(json).is_err());
    }

    #[test]
    fn patch_null_fields_are_unset() {
        let json = r#"{"translated_text": "แมว", "image": null}"#;
        let patch: CardPatch = serde_json::from_str(json).unwrap();
        assert_eq!(patch.translated_text.as_deref(), Some("แมว"));
        assert!(patch.image.is_none());

        let fields: Vec<_> = patch.present_fields().collect();
        assert_eq!(fields, vec![("translated_text", "แมว")]);
    }

    #[test]
    fn patch_is_empty() {
        assert!(CardPatch::default().is_empty());
        let patch = CardPatch {
            image: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn card_serializes_flat() {
        let card = Card::from_new(hello());
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["id"], card.id.as_str());
        assert_eq!(value["original_text"], "Hello");
        assert_eq!(value["image"], "");
    }

    #[test]
    fn content_converts_to_new_card_without_image() {
        let content = CardContent {
            original_text: "Dog".to_string(),
            translated_text: "หมา".to_string(),
            image_description: "A dog".to_string(),
        };
        let new = NewCard::from(content);
        assert_eq!(new.original_text, "Dog");
        assert!(new.image.is_empty());
        assert!(Card::from_new(new).image.is_empty());
    }
}
