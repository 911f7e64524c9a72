pub mod digest_file;
pub mod drive;
pub mod renderer;

pub use digest_file::FileDigestSource;
pub use drive::DriveStore;
pub use renderer::TemplateRenderer;
