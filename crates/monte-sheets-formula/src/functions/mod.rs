//! Built-in sampling functions

pub mod sampling;

use crate::error::FormulaResult;
use crate::value::Samples;
use std::collections::HashMap;
use std::sync::OnceLock;

pub use sampling::SAMPLE_COUNT;

/// Function implementation signature
///
/// Functions receive the fully evaluated argument vectors and return a fresh
/// sample vector. Sampling functions use the first element of each argument
/// vector as their scalar parameter.
pub type FunctionImpl = fn(&[Samples]) -> FormulaResult<Samples>;

/// Function definition
pub struct FunctionDef {
    /// Function name (lowercase; lookup is case-sensitive)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
    /// Is volatile (produces a fresh result every evaluation; such functions
    /// must be excluded from any external memoization layer)
    pub volatile: bool,
}

/// Function registry
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a registry with all built-in sampling functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register_sampling_functions();

        registry
    }

    /// Look up a function by name (case-sensitive)
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    /// Whether the named function is volatile
    pub fn is_volatile(&self, name: &str) -> bool {
        self.get(name).is_some_and(|def| def.volatile)
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.to_string(), def);
    }

    fn register_sampling_functions(&mut self) {
        // triangular(a, b) or triangular(a, b, c); c defaults to (a+b)/2
        self.register(FunctionDef {
            name: "triangular",
            min_args: 2,
            max_args: Some(3),
            implementation: sampling::fn_triangular,
            volatile: true,
        });

        self.register(FunctionDef {
            name: "uniform",
            min_args: 2,
            max_args: Some(2),
            implementation: sampling::fn_uniform,
            volatile: true,
        });

        self.register(FunctionDef {
            name: "beta",
            min_args: 2,
            max_args: Some(2),
            implementation: sampling::fn_beta,
            volatile: true,
        });

        self.register(FunctionDef {
            name: "normal",
            min_args: 2,
            max_args: Some(2),
            implementation: sampling::fn_normal,
            volatile: true,
        });

        self.register(FunctionDef {
            name: "lognormal",
            min_args: 2,
            max_args: Some(2),
            implementation: sampling::fn_lognormal,
            volatile: true,
        });
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared read-only registry of the built-in sampling functions
/// (lazily initialized)
pub fn sampling_registry() -> &'static FunctionRegistry {
    static REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(FunctionRegistry::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sampling_functions_registered() {
        let registry = sampling_registry();
        for name in ["triangular", "uniform", "beta", "normal", "lognormal"] {
            assert!(registry.get(name).is_some(), "missing {}", name);
            assert!(registry.is_volatile(name), "{} must be volatile", name);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = sampling_registry();
        assert!(registry.get("UNIFORM").is_none());
        assert!(registry.get("Triangular").is_none());
    }
}
