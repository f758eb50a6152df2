// Axis model types
// Defines Scope, AxisValue, ValueSource, and Axis as consumed by the registry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifetime boundary over which a resolved axis value sequence is cached.
///
/// Ordered outermost-first: `Session < Module < Function`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Session,
    Module,
    Function,
}

impl Scope {
    /// True when `self` is the same scope as `other` or an outer one.
    pub fn encloses(self, other: Scope) -> bool {
        self <= other
    }
}

/// A single concrete value an axis can take.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisValue::Str(value) => write!(f, "{value}"),
            AxisValue::Int(value) => write!(f, "{value}"),
            AxisValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        AxisValue::Str(value.to_string())
    }
}

impl From<String> for AxisValue {
    fn from(value: String) -> Self {
        AxisValue::Str(value)
    }
}

impl From<i64> for AxisValue {
    fn from(value: i64) -> Self {
        AxisValue::Int(value)
    }
}

impl From<bool> for AxisValue {
    fn from(value: bool) -> Self {
        AxisValue::Bool(value)
    }
}

/// Generator signature for dynamically produced value sequences.
pub type GeneratorFn = Box<dyn Fn() -> anyhow::Result<Vec<AxisValue>> + Send + Sync>;

/// Mapping signature for sources derived from another axis's resolved values.
pub type DeriveFn = Box<dyn Fn(&[AxisValue]) -> anyhow::Result<Vec<AxisValue>> + Send + Sync>;

/// Where an axis's value sequence comes from.
pub enum ValueSource {
    /// A fixed value list supplied at registration time.
    Literal(Vec<AxisValue>),
    /// A generator evaluated lazily, once per scope instance.
    Dynamic(GeneratorFn),
    /// A mapping over another axis's resolved sequence. The base axis must
    /// already be registered with an outer-or-equal scope, so dependency
    /// chains cannot cycle.
    Derived { base: String, derive: DeriveFn },
}

impl ValueSource {
    /// Build a literal source from anything convertible to axis values.
    pub fn literal<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AxisValue>,
    {
        ValueSource::Literal(values.into_iter().map(Into::into).collect())
    }

    /// Build a dynamic source from a generator closure.
    pub fn dynamic<F>(generator: F) -> Self
    where
        F: Fn() -> anyhow::Result<Vec<AxisValue>> + Send + Sync + 'static,
    {
        ValueSource::Dynamic(Box::new(generator))
    }

    /// Build a derived source mapping the resolved values of `base`.
    pub fn derived<F>(base: impl Into<String>, derive: F) -> Self
    where
        F: Fn(&[AxisValue]) -> anyhow::Result<Vec<AxisValue>> + Send + Sync + 'static,
    {
        ValueSource::Derived {
            base: base.into(),
            derive: Box::new(derive),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            ValueSource::Literal(_) => SourceKind::Literal,
            ValueSource::Dynamic(_) => SourceKind::Dynamic,
            ValueSource::Derived { .. } => SourceKind::Derived,
        }
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Literal(values) => f.debug_tuple("Literal").field(values).finish(),
            ValueSource::Dynamic(_) => f.write_str("Dynamic(..)"),
            ValueSource::Derived { base, .. } => f
                .debug_struct("Derived")
                .field("base", base)
                .finish_non_exhaustive(),
        }
    }
}

/// Which kind of source supplied an axis, retained for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Literal,
    Dynamic,
    Derived,
}

/// A single named dimension of parametrization.
#[derive(Debug)]
pub struct Axis {
    pub name: String,
    pub scope: Scope,
    pub source: ValueSource,
}

impl Axis {
    pub fn new(name: impl Into<String>, scope: Scope, source: ValueSource) -> Self {
        Self {
            name: name.into(),
            scope,
            source,
        }
    }
}
