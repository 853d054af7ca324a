pub(crate) mod catalog;
pub(crate) mod decode;
pub(crate) mod font;
pub(crate) mod loader;

pub use catalog::{Template, TemplateCatalog};
pub use decode::{PreparedImage, decode_image};
pub use font::CaptionFont;
pub use loader::{FsTemplateLoader, TemplateLoader, fetch_with_timeout};
