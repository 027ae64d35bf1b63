//! Kernel of the SHELF service: the module contract, its registry, and layered settings.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
