//! Callable Resolution
//!
//! Turning submitted source text into something invocable is delegated to a
//! [`CallableResolver`]. This crate ships [`RegistryResolver`], which only
//! knows precompiled solutions registered at link time with
//! [`submit_solution!`](crate::submit_solution): the source text names a
//! module, and the resolver looks up that module's entry point.
//!
//! Sandboxing and trust decisions belong to the resolver, not to the
//! measurement core.

use crate::candidate::{Arguments, Candidate, CandidateError};
use serde_json::Value;

/// Name of the callable every submission must define
pub const ENTRY_POINT: &str = "solution";

/// Signature of a registered solution function
pub type SolutionFn = fn(&Arguments) -> Result<Value, CandidateError>;

/// Turns source text into an invocable candidate
pub trait CallableResolver {
    /// Resolve `source` to its entry-point candidate, or `None` if it defines none
    fn resolve(&self, source: &str) -> Option<Box<dyn Candidate>>;
}

impl<F> CallableResolver for F
where
    F: Fn(&str) -> Option<Box<dyn Candidate>>,
{
    fn resolve(&self, source: &str) -> Option<Box<dyn Candidate>> {
        self(source)
    }
}

/// Solution registered via [`submit_solution!`](crate::submit_solution)
#[derive(Debug, Clone, Copy)]
pub struct SolutionDef {
    /// Module key the source text must name
    pub module: &'static str,
    /// Function name inside the module
    pub name: &'static str,
    /// Function pointer
    pub func: SolutionFn,
    /// Source file path
    pub file: &'static str,
    /// Source line number
    pub line: u32,
}

impl SolutionDef {
    /// Create a definition (used by the registration macro)
    pub const fn new(
        module: &'static str,
        name: &'static str,
        func: SolutionFn,
        file: &'static str,
        line: u32,
    ) -> Self {
        Self {
            module,
            name,
            func,
            file,
            line,
        }
    }

    /// Whether this definition is a module's entry point
    pub fn is_entry_point(&self) -> bool {
        self.name == ENTRY_POINT
    }
}

inventory::collect!(SolutionDef);

/// Anchor to prevent LTO from stripping inventory entries
#[used]
#[doc(hidden)]
pub static REGISTRY_ANCHOR: fn() = || {
    for _ in inventory::iter::<SolutionDef> {}
};

/// All registered solutions, sorted by module then name
pub fn registered_solutions() -> Vec<&'static SolutionDef> {
    let mut defs: Vec<_> = inventory::iter::<SolutionDef>.into_iter().collect();
    defs.sort_by(|a, b| (a.module, a.name).cmp(&(b.module, b.name)));
    defs
}

/// Resolves source text against link-time registered solutions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryResolver {
    entry_point: &'static str,
}

impl Default for RegistryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryResolver {
    /// Resolver looking for [`ENTRY_POINT`]
    pub fn new() -> Self {
        Self {
            entry_point: ENTRY_POINT,
        }
    }

    /// Resolver looking for a different function name
    pub fn with_entry_point(entry_point: &'static str) -> Self {
        Self { entry_point }
    }

    /// Find the registered definition for `source`
    pub fn lookup(&self, source: &str) -> Option<&'static SolutionDef> {
        let module = source.trim();
        inventory::iter::<SolutionDef>
            .into_iter()
            .find(|def| def.module == module && def.name == self.entry_point)
    }
}

impl CallableResolver for RegistryResolver {
    fn resolve(&self, source: &str) -> Option<Box<dyn Candidate>> {
        self.lookup(source)
            .map(|def| Box::new(def.func) as Box<dyn Candidate>)
    }
}

/// Register a function as a solution candidate.
///
/// ```ignore
/// fn solution(args: &Arguments) -> Result<Value, CandidateError> {
///     Ok(json!(args.require_i64(0, "x")? + 1))
/// }
/// solbench::submit_solution!("increment", solution);
/// ```
///
/// The two-argument form registers `func` as the module's entry point; the
/// three-argument form registers it under an explicit name.
#[macro_export]
macro_rules! submit_solution {
    ($module:expr, $func:path) => {
        $crate::submit_solution!($module, $crate::ENTRY_POINT, $func);
    };
    ($module:expr, $name:expr, $func:path) => {
        $crate::internal::inventory::submit! {
            $crate::SolutionDef::new($module, $name, $func, file!(), line!())
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Payload;
    use serde_json::json;

    fn answer(_: &Arguments) -> Result<Value, CandidateError> {
        Ok(json!(42))
    }

    fn helper(_: &Arguments) -> Result<Value, CandidateError> {
        Ok(json!("helper"))
    }

    crate::submit_solution!("registry_unit", answer);
    crate::submit_solution!("registry_helper_only", "helper", helper);

    #[test]
    fn test_resolves_registered_entry_point() {
        let candidate = RegistryResolver::new()
            .resolve("  registry_unit\n")
            .expect("registered");
        let args = Payload::Single(json!(0)).adapt();
        assert_eq!(candidate.call(&args), Ok(json!(42)));
    }

    #[test]
    fn test_module_without_entry_point() {
        let resolver = RegistryResolver::new();
        assert!(resolver.resolve("registry_helper_only").is_none());
        assert!(resolver.resolve("no_such_module").is_none());

        let helper_resolver = RegistryResolver::with_entry_point("helper");
        assert!(helper_resolver.resolve("registry_helper_only").is_some());
    }

    #[test]
    fn test_registered_solutions_sorted() {
        let defs = registered_solutions();
        let keys: Vec<_> = defs.iter().map(|d| (d.module, d.name)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert!(defs.iter().any(|d| d.module == "registry_unit" && d.is_entry_point()));
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |source: &str| -> Option<Box<dyn Candidate>> {
            (source == "inline").then(|| Box::new(answer as SolutionFn) as Box<dyn Candidate>)
        };
        assert!(resolver.resolve("inline").is_some());
        assert!(resolver.resolve("other").is_none());
    }
}
