//! API endpoint handlers.
//!
//! `detect` is the classification gateway; `upload` and `status` belong to
//! the image upload store. The two keep separate response contracts.

pub mod detect;
pub mod status;
pub mod upload;
