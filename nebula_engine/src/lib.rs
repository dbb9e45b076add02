/*!
# Nebula Engine

Resource persistence and GPU-binding layer of the Nebula engine.

Hash-identified asset records are loaded lazily from a binary cache
directory, linked to each other through reference-counted hashes and turned
into GPU objects through a narrow device trait. Uniform blocks get
device-alignment-correct offsets from the layout engine.

## Architecture

- **codec**: positional little-endian serializer/deserializer
- **layout**: alignment arithmetic and uniform layout objects
- **graphics_device**: GPU interface implemented by backends
- **shader_compiler**: external GLSL compiler interface
- **resource**: resource records, built-ins and the resource cache
- **settings**: project settings stored next to the cache
- **editor**: inspector accessors over one cached resource

Everything public is reachable through the [`nebula`] namespace.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod codec;
pub mod layout;
pub mod graphics_device;
pub mod shader_compiler;
pub mod resource;
pub mod settings;
pub mod editor;

// Main nebula namespace module
pub mod nebula {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, macros stay at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, EditorLog};
    }

    // Binary codec sub-module
    pub mod codec {
        pub use crate::codec::*;
    }

    // GPU interface sub-module
    pub mod device {
        pub use crate::graphics_device::*;
        pub use crate::shader_compiler::{ShaderCompiler, GlslcCompiler};
    }

    // Uniform layout sub-module
    pub mod layout {
        pub use crate::layout::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
        pub use crate::editor::ResourceEditor;
        pub use crate::settings::{ProjectSettings, PostProcessSettings};
    }
}

// Re-export math library at crate root
pub use glam;
