#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::return_self_not_must_use
)]

mod error;
pub use error::*;

mod diagnostics;
pub use diagnostics::*;

mod request;
pub use request::*;

mod canvas;
pub use canvas::*;

mod source;
pub use source::*;

mod baseline;
pub use baseline::*;

mod fitter;
pub use fitter::*;

mod packer;
pub use packer::*;

mod compose;
pub use compose::*;

mod convert;
pub use convert::*;
