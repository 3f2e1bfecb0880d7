use std::collections::HashMap;

use crate::filters::{
    Cold, FilterId, Grayscale, Kernel, Negative, Posterize, Sepia, Solarize, Vintage, Warm,
};
use crate::raster::Raster;

/// Internal defaults for every parameterized kernel
///
/// These are not user settings; they exist so tests and embedding code can
/// build a registry with, say, dithered posterization or seeded grain.
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelSettings {
    pub posterize: Posterize,
    pub solarize: Solarize,
    pub cold: Cold,
    pub warm: Warm,
    pub vintage: Vintage,
}

/// Maps filter identifiers to kernels
///
/// `FilterId::None` and identifiers with no registered kernel resolve to the
/// identity: the source comes back unchanged.
pub struct FilterRegistry {
    kernels: HashMap<FilterId, Box<dyn Kernel>>,
}

impl FilterRegistry {
    /// Create a registry with all built-in kernels at their defaults
    pub fn new() -> Self {
        Self::with_settings(KernelSettings::default())
    }

    /// Create a registry with all built-in kernels using `settings`
    pub fn with_settings(settings: KernelSettings) -> Self {
        let mut registry = Self {
            kernels: HashMap::new(),
        };
        registry.register_builtin_kernels(settings);
        registry
    }

    fn register_builtin_kernels(&mut self, settings: KernelSettings) {
        self.register(FilterId::Grayscale, Grayscale);
        self.register(FilterId::Sepia, Sepia);
        self.register(FilterId::Negative, Negative);
        self.register(FilterId::Posterize, settings.posterize);
        self.register(FilterId::Solarize, settings.solarize);
        self.register(FilterId::Cold, settings.cold);
        self.register(FilterId::Warm, settings.warm);
        self.register(FilterId::Vintage, settings.vintage);
    }

    /// Register a kernel, replacing any previous one for `filter`
    pub fn register<K>(&mut self, filter: FilterId, kernel: K)
    where
        K: Kernel + 'static,
    {
        self.kernels.insert(filter, Box::new(kernel));
    }

    /// Get the kernel for a filter, if one is registered
    pub fn get(&self, filter: &FilterId) -> Option<&dyn Kernel> {
        self.kernels.get(filter).map(|kernel| kernel.as_ref())
    }

    pub fn has_kernel(&self, filter: &FilterId) -> bool {
        self.kernels.contains_key(filter)
    }

    /// Registered filters: known ones in canonical order, then custom ones
    /// sorted by token
    pub fn available_filters(&self) -> Vec<FilterId> {
        let mut filters: Vec<FilterId> = FilterId::KNOWN
            .iter()
            .filter(|id| self.has_kernel(id))
            .cloned()
            .collect();
        let mut custom: Vec<FilterId> = self
            .kernels
            .keys()
            .filter(|id| !id.is_known())
            .cloned()
            .collect();
        custom.sort_by(|a, b| a.token().cmp(b.token()));
        filters.extend(custom);
        filters
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Run the filter's kernel over `source`; never fails
    pub fn apply(&self, filter: &FilterId, source: &Raster) -> Raster {
        match self.get(filter) {
            Some(kernel) => kernel.apply(source),
            None => source.clone(),
        }
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
