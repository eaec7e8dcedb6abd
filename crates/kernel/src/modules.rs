//! The compiled-in module set.

use tally_sdk::types::ModuleDescriptor;

/// Every built-in module in registration order: the core modules, then
/// finance. Settings is synthesized during composition and is not listed.
pub fn builtin_descriptors() -> Vec<ModuleDescriptor> {
    let mut descriptors = tally_core_modules::descriptors();
    descriptors.push(tally_finance::descriptor());
    descriptors
}
