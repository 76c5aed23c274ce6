//! Localization lookup.
//!
//! A [`LocalizationResolver`] holds up to two lookup functions, one for
//! singular calls and one for plural calls. Sources are either caller-supplied
//! functions or flat key → text maps; maps are turned into the same function
//! shape once, at construction.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::core::{TriggerKind, format_number};

/// A literal argument passed on to a lookup function.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Num(f64),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            ArgValue::Num(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ArgValue::Num(n) => Some(*n),
            ArgValue::Str(_) => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Str(s) => write!(f, "{}", s),
            ArgValue::Num(n) => write!(f, "{}", format_number(*n)),
        }
    }
}

/// Lookup function: `(key, remaining arguments) -> translation`.
pub type LocalizeFn = Arc<dyn Fn(&str, &[ArgValue]) -> Option<String> + Send + Sync>;

/// Where translations come from.
#[derive(Clone)]
pub enum LocalizationSource {
    /// Flat key → text table. Extra arguments are ignored.
    Map(HashMap<String, String>),
    /// Caller-supplied function, called with the key and the remaining
    /// arguments in source order.
    Function(LocalizeFn),
}

impl LocalizationSource {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str, &[ArgValue]) -> Option<String> + Send + Sync + 'static,
    {
        LocalizationSource::Function(Arc::new(f))
    }

    fn into_lookup(self) -> LocalizeFn {
        match self {
            LocalizationSource::Function(f) => f,
            LocalizationSource::Map(map) => {
                Arc::new(move |key: &str, _args: &[ArgValue]| map.get(key).cloned())
            }
        }
    }
}

impl From<HashMap<String, String>> for LocalizationSource {
    fn from(map: HashMap<String, String>) -> Self {
        LocalizationSource::Map(map)
    }
}

impl fmt::Debug for LocalizationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalizationSource::Map(map) => f.debug_tuple("Map").field(&map.len()).finish(),
            LocalizationSource::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Translated(String),
    /// No resolver, no entry, or an entry equal to the key itself.
    Missing,
}

/// Singular and plural lookup behind one `resolve` call.
#[derive(Clone, Default)]
pub struct LocalizationResolver {
    singular: Option<LocalizeFn>,
    plural: Option<LocalizeFn>,
}

impl LocalizationResolver {
    pub fn new(singular: Option<LocalizationSource>, plural: Option<LocalizationSource>) -> Self {
        Self {
            singular: singular.map(LocalizationSource::into_lookup),
            plural: plural.map(LocalizationSource::into_lookup),
        }
    }

    pub fn has_singular(&self) -> bool {
        self.singular.is_some()
    }

    pub fn has_plural(&self) -> bool {
        self.plural.is_some()
    }

    /// Look up `key` with the resolver matching `kind`.
    ///
    /// A translation equal to the key counts as missing: it means no distinct
    /// text exists for it.
    pub fn resolve(&self, kind: TriggerKind, key: &str, args: &[ArgValue]) -> Lookup {
        let lookup = match kind {
            TriggerKind::Singular => self.singular.as_ref(),
            TriggerKind::Plural => self.plural.as_ref(),
        };
        match lookup.and_then(|f| f(key, args)) {
            Some(value) if value != key => Lookup::Translated(value),
            _ => Lookup::Missing,
        }
    }
}

impl fmt::Debug for LocalizationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizationResolver")
            .field("singular", &self.singular.is_some())
            .field("plural", &self.plural.is_some())
            .finish()
    }
}
