pub mod loader;

pub use loader::{AssetError, load_bank, load_texture};
