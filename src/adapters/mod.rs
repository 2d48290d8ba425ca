pub mod prompt_files;
pub mod prompt_store_embedded;
pub mod prompt_store_filesystem;
pub mod prompt_store_layered;
pub mod prompt_store_memory;
pub mod template;

pub use prompt_store_embedded::EmbeddedPromptStore;
pub use prompt_store_filesystem::FilesystemPromptStore;
pub use prompt_store_layered::LayeredPromptStore;
pub use prompt_store_memory::MemoryPromptStore;
pub use template::MinijinjaTemplateRenderer;
