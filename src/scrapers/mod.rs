pub mod browser;
pub mod extract;
pub mod gallery;
pub mod site;
pub mod traits;

pub use browser::ChromeSession;
pub use traits::RenderingSession;
