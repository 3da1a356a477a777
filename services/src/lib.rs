pub mod unsplash;
pub mod uuid;

pub use unsplash::{ImageFetcher, UnsplashConfig};
