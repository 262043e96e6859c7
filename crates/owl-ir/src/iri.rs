//! IRI normalization and abbreviation
//!
//! Ontology documents reference entities either by an absolute IRI or by an
//! abbreviated `prefix:suffix` form. The IR always keys resources by the
//! absolute (canonical) form; [`PrefixTable`] converts between the two.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical IRI of the universal top class.
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";

/// Abbreviated form of [`OWL_THING`].
pub const OWL_THING_ABBREVIATED: &str = "owl:Thing";

/// Returns true if the reference denotes the universal top class.
pub fn is_owl_thing(reference: &str) -> bool {
    reference == OWL_THING || reference == OWL_THING_ABBREVIATED || reference == "owl.Thing"
}

/// Anything in a raw document that names an entity by IRI or abbreviated IRI.
pub trait Entity {
    /// Absolute IRI, if the document carries one.
    fn iri(&self) -> Option<&str>;

    /// Abbreviated `prefix:suffix` IRI, if the document carries one.
    fn abbreviated_iri(&self) -> Option<&str>;

    /// The identifier as written in the document, preferring the absolute form.
    fn identifier(&self) -> Option<&str> {
        self.iri().or_else(|| self.abbreviated_iri())
    }
}

/// Short-name to IRI-base mapping used for bidirectional abbreviation.
///
/// Iteration order is the sorted order of the short names, which makes
/// [`PrefixTable::abbreviate`] deterministic when bases overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefixTable {
    prefixes: BTreeMap<String, String>,
}

impl PrefixTable {
    /// Create an empty prefix table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prefix. A later registration of the same short name wins.
    pub fn insert(&mut self, name: impl Into<String>, iri: impl Into<String>) -> &mut Self {
        self.prefixes.insert(name.into(), iri.into());
        self
    }

    /// Look up the IRI base for a short name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.prefixes.get(name).map(String::as_str)
    }

    /// Number of registered prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Iterate `(short name, IRI base)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Expand an abbreviated IRI, e.g. `ex:Storage` -> `http://example.com/cloud/Storage`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIri`] if the input has no `:` separator and
    /// [`Error::UnknownPrefix`] if the prefix is not registered.
    pub fn expand(&self, abbreviated: &str) -> Result<String> {
        let (prefix, name) = abbreviated
            .split_once(':')
            .ok_or_else(|| Error::invalid_iri(abbreviated, "missing prefix separator ':'"))?;

        match self.prefixes.get(prefix) {
            Some(base) => Ok(format!("{base}{name}")),
            None => Err(Error::unknown_prefix(prefix)),
        }
    }

    /// Resolve an entity reference to its canonical IRI.
    ///
    /// The absolute IRI is returned as-is when present; otherwise the
    /// abbreviated form is expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity carries neither form, or the
    /// abbreviated form cannot be expanded.
    pub fn normalize<E: Entity + ?Sized>(&self, entity: &E) -> Result<String> {
        if let Some(iri) = entity.iri() {
            return Ok(iri.to_string());
        }

        match entity.abbreviated_iri() {
            Some(abbreviated) => self.expand(abbreviated),
            None => Err(Error::invalid_iri("", "neither IRI nor abbreviated IRI present")),
        }
    }

    /// Abbreviate an absolute IRI, e.g. `http://example.com/Resource` ->
    /// `ex:Resource`. Returns the input unchanged when no prefix matches.
    ///
    /// When several bases match, the longest one wins; equally long bases
    /// are tried in short-name order.
    pub fn abbreviate(&self, iri: &str) -> String {
        let mut best: Option<(&str, &str)> = None;

        for (short, base) in &self.prefixes {
            if base.is_empty() || !iri.starts_with(base.as_str()) {
                continue;
            }
            if best.is_none_or(|(_, current)| base.len() > current.len()) {
                best = Some((short.as_str(), base.as_str()));
            }
        }

        match best {
            Some((short, base)) => format!("{short}:{}", &iri[base.len()..]),
            None => iri.to_string(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PrefixTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (name, iri) in iter {
            table.insert(name, iri);
        }
        table
    }
}
