//! Bilingual values, locale resolution and language negotiation.

pub mod display;
pub mod negotiate;
pub mod resolve;
pub mod text;

pub use display::DisplayLanguage;
pub use negotiate::negotiate;
pub use resolve::resolve;
pub use text::{BilingualText, LangCode, Locale, LocalizedText};
