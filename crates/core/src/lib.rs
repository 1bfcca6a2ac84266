//! Content model and services for the bilingual (Arabic/German) city showcase.
//!
//! The crate is transport-agnostic: the HTTP surface lives in `cityfolio-api`.

pub mod auth;
pub mod document;
pub mod editor;
pub mod i18n;
pub mod media;
pub mod store;
