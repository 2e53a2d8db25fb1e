//! Template store adapters.

mod local;
mod memory;

pub use local::LocalTemplateStore;
pub use memory::MemoryTemplateStore;
