//! Error types for the backdrop engine
//!
//! Nothing here is fatal to the hosting page. The renderer logs these and
//! falls back to drawing nothing.

use thiserror::Error;

/// Failures surfaced by the renderer lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderError {
    /// No GPU context could be acquired for the canvas.
    #[error("GPU context unavailable: {0}")]
    ContextUnavailable(String),

    /// A shader stage failed to compile.
    #[error("{stage} shader failed to compile for {program}")]
    ShaderCompile {
        program: &'static str,
        stage: &'static str,
    },

    /// Both stages compiled but the program could not be linked.
    #[error("program '{0}' failed to link")]
    ProgramLink(&'static str),

    /// A buffer or texture could not be allocated.
    #[error("failed to allocate {0}")]
    ResourceAllocation(&'static str),

    /// The off-screen framebuffer is not usable as a render target.
    #[error("framebuffer incomplete (status 0x{status:04X})")]
    FramebufferIncomplete { status: u32 },

    /// The renderer was used after `destroy()`.
    #[error("renderer has been destroyed")]
    Destroyed,
}

/// Rejected host configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Grid spacing must be finite and strictly positive.
    #[error("grid spacing must be a positive number, got {0}")]
    InvalidSpacing(f32),

    /// A colour channel fell outside 0..=1.
    #[error("{field} channel {index} out of range: {value}")]
    ColorOutOfRange {
        field: &'static str,
        index: usize,
        value: f32,
    },

    /// The JSON could not be parsed into a configuration.
    #[error("invalid config JSON: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_status_formats_as_hex() {
        let err = RenderError::FramebufferIncomplete { status: 0x8CD6 };
        assert_eq!(err.to_string(), "framebuffer incomplete (status 0x8CD6)");
    }

    #[test]
    fn test_shader_compile_message_names_stage() {
        let err = RenderError::ShaderCompile {
            program: "lattice",
            stage: "fragment",
        };
        assert_eq!(err.to_string(), "fragment shader failed to compile for lattice");
    }

    #[test]
    fn test_config_error_from_json() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
