// scour-core/src/domain/config/merge.rs

use super::configuration::{Configuration, Hooks};

/// Layers `override_` on top of `base`.
///
/// Each field takes the override's value when present and falls back to the
/// base otherwise. Arrays are replaced wholesale, never concatenated. `hooks`
/// is merged per sub-field. Neither input is modified.
pub fn merge(base: &Configuration, override_: &Configuration) -> Configuration {
    Configuration {
        targets: override_.targets.clone().or_else(|| base.targets.clone()),
        ignore: override_.ignore.clone().or_else(|| base.ignore.clone()),
        extends: override_.extends.clone().or_else(|| base.extends.clone()),
        hooks: merge_hooks(base.hooks.as_ref(), override_.hooks.as_ref()),
    }
}

fn merge_hooks(base: Option<&Hooks>, override_: Option<&Hooks>) -> Option<Hooks> {
    match (base, override_) {
        (None, None) => None,
        (Some(b), None) => Some(b.clone()),
        (None, Some(o)) => Some(o.clone()),
        (Some(b), Some(o)) => Some(Hooks {
            pre_clean: o.pre_clean.clone().or_else(|| b.pre_clean.clone()),
            post_clean: o.post_clean.clone().or_else(|| b.post_clean.clone()),
        }),
    }
}
