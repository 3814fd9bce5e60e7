//! Clamped probability-to-logit conversion on plain `f64`.

pub mod transformations;

pub use self::transformations::{LOGIT_EPS, safe_logit};

pub mod prelude {
    pub use super::transformations::{LOGIT_EPS, safe_logit};
}
