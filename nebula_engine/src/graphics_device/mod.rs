/// Graphics device module - the narrow GPU interface consumed by the resource layer
///
/// The engine never owns a device implementation: backends (Vulkan, ...)
/// implement [`GraphicsDevice`] and hand it over as
/// `Arc<Mutex<dyn GraphicsDevice>>`. Every GPU object is an `Arc<dyn ...>`
/// handle destroyed when the last clone is dropped.

// Module declarations
pub mod graphics_device;
pub mod shader;
pub mod pipeline;
pub mod descriptor_set;
pub mod texture;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use shader::*;
pub use pipeline::*;
pub use descriptor_set::*;
pub use texture::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
