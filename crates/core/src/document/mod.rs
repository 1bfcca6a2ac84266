//! Persisted content documents and their projections.

pub mod city;
pub mod flatten;
pub mod id;
pub mod validate;
pub mod video;
pub mod youtube;

pub use city::{Activity, City, CityPatch, NewCity, Section};
pub use flatten::{FlatActivity, FlatCity, FlatSection, FlatVideo, Flatten};
pub use id::parse_document_id;
pub use validate::ValidationError;
pub use video::{NewVideo, Video};
