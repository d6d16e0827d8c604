pub mod brand;
pub mod food;
pub mod text;

pub use brand::{BrandSplit, detect_brand_and_item};
pub use food::{Food, Source};
