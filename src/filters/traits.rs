use crate::raster::Raster;

/// Core trait that all pixel kernels implement
///
/// A kernel is a pure function from one raster to a new raster of the same
/// dimensions. It must not panic on any well-formed input, and returns the
/// source unchanged when the source is empty or the kernel's strength is zero.
pub trait Kernel: Send + Sync {
    /// Returns the canonical filter token this kernel implements
    fn name(&self) -> &str;

    /// Returns a human-readable description of this kernel
    fn description(&self) -> &str;

    /// Apply the kernel to `source`, producing a fresh raster
    fn apply(&self, source: &Raster) -> Raster;

    /// Get kernel-specific metadata
    ///
    /// Used by the CLI listing and by tests that need to know whether two
    /// runs over the same input can be compared byte for byte.
    fn metadata(&self) -> KernelMetadata {
        KernelMetadata::default()
    }
}

/// Metadata about a kernel's characteristics
#[derive(Debug, Clone)]
pub struct KernelMetadata {
    /// Same input always yields a byte-identical output
    pub deterministic: bool,

    /// Estimated performance impact (0.0 = minimal, 1.0 = heavy)
    pub performance_impact: f32,

    /// Internal parameters with descriptions
    pub parameters: Vec<(String, String)>,
}

impl Default for KernelMetadata {
    fn default() -> Self {
        Self {
            deterministic: true,
            performance_impact: 0.1,
            parameters: Vec::new(),
        }
    }
}
