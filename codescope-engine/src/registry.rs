//! Profile registry for language discovery and selection
//!
//! This module provides a registry for language profiles. Profiles can be
//! registered and retrieved by name or by file extension. Names are matched
//! as-is; extensions are matched case-insensitively and include the dot.

use std::collections::HashMap;
use std::sync::Arc;

use crate::profile::Profile;

/// Registry of language profiles.
///
/// Re-registering a profile with the same name replaces the prior binding,
/// including all of its extension bindings.
#[derive(Default)]
pub struct ProfileRegistry {
    by_name: HashMap<String, Arc<Profile>>,
    by_extension: HashMap<String, Arc<Profile>>,
}

impl ProfileRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile under its name and every one of its extensions.
    pub fn register(&mut self, profile: Profile) -> Arc<Profile> {
        let profile = Arc::new(profile);
        if let Some(previous) = self.by_name.insert(profile.name.clone(), Arc::clone(&profile)) {
            // Drop extension bindings of the replaced profile so they cannot
            // shadow the new ones.
            self.by_extension
                .retain(|_, bound| !Arc::ptr_eq(bound, &previous));
        }
        for extension in &profile.extensions {
            self.by_extension
                .insert(extension.to_lowercase(), Arc::clone(&profile));
        }
        profile
    }

    /// Look up a profile by name (as-is) or extension (case-insensitively).
    pub fn lookup(&self, name_or_extension: &str) -> Option<Arc<Profile>> {
        if let Some(profile) = self.by_name.get(name_or_extension) {
            return Some(Arc::clone(profile));
        }
        self.by_extension
            .get(&name_or_extension.to_lowercase())
            .cloned()
    }

    /// Check whether a name or extension resolves to a profile.
    pub fn has(&self, name_or_extension: &str) -> bool {
        self.lookup(name_or_extension).is_some()
    }

    /// All registered profile names (sorted).
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.by_name.keys().cloned().collect();
        names.sort();
        names
    }

    /// All registered extensions (sorted, lowercased).
    pub fn list_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<_> = self.by_extension.keys().cloned().collect();
        extensions.sort();
        extensions
    }
}
