//! Domain entities - Objects with identity and lifecycle

mod card;

pub use card::{Card, CardContent, CardPatch, NewCard};
