//! Solution Listing Plan
//!
//! Selects registered solutions for `list` by filtering and ordering.
//!
//! Filtering options:
//! - Regex pattern matching on module key
//! - Entry points only, or every registered function
//!
//! Ordering: solutions are sorted by module, then function name.

use solbench_core::SolutionDef;
use std::collections::BTreeMap;

/// Selected solutions grouped by module
pub struct ListingPlan {
    /// Module key → registered functions, both in sorted order
    pub modules: BTreeMap<&'static str, Vec<&'static SolutionDef>>,
}

impl ListingPlan {
    /// Number of selected functions
    pub fn len(&self) -> usize {
        self.modules.values().map(Vec::len).sum()
    }

    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Build a listing plan from registered solutions
pub fn build_plan(
    solutions: impl IntoIterator<Item = &'static SolutionDef>,
    filter: Option<&regex::Regex>,
    entry_points_only: bool,
) -> ListingPlan {
    let mut modules: BTreeMap<&'static str, Vec<&'static SolutionDef>> = BTreeMap::new();

    for def in solutions {
        if let Some(re) = filter {
            if !re.is_match(def.module) {
                continue;
            }
        }
        if entry_points_only && !def.is_entry_point() {
            continue;
        }
        modules.entry(def.module).or_default().push(def);
    }

    for defs in modules.values_mut() {
        defs.sort_by_key(|d| d.name);
    }

    ListingPlan { modules }
}
