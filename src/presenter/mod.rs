//! Interactive blog generation: form input, writer → editor, related image

pub mod image;
pub mod options;
pub mod page;
pub mod server;
pub mod session;

pub use image::{ImageError, ImageOutcome, ImageSearch, UnsplashClient};
pub use options::{Language, Tone};
pub use session::{BlogRequest, Presentation, Presenter, PresenterError, DEFAULT_TOPIC};
