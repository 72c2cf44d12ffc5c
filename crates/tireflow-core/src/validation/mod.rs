//! Request validation and photo normalization

pub mod photos;
pub mod request;

pub use photos::{consolidate, has_image_signature, is_valid_image, to_data_url};
pub use request::{auto_populate, validate, validate_photo_uploads, PhotoUpload};
