use crate::{
    config::{AliasCollision, EngineConfig},
    operator::{
        BuiltinOperator, Clock, DynamicRangeOperator, Operator, OperatorError, RangeContext,
        SystemClock,
    },
    value::ValueType,
};
use std::{collections::HashMap, fmt, ops::Deref, sync::Arc};

///
/// OperatorRegistry
///
/// Alias table from uppercased operator name to operator, with dynamic
/// range parsing as the fallback for numeric and temporal fields.
///
/// Populate it during start-up, then `freeze` it into a `SharedRegistry`
/// before handing it to concurrent readers.
///

pub struct OperatorRegistry {
    operators: HashMap<String, Operator>,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
}

impl OperatorRegistry {
    /// Registry holding the built-in operator table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let mut registry = Self::empty(config);
        registry.register(BuiltinOperator::ALL.map(Operator::Builtin));
        registry
    }

    /// Registry without any operators; lookups only reach range parsing.
    #[must_use]
    pub fn empty(config: EngineConfig) -> Self {
        Self {
            operators: HashMap::new(),
            config,
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register each operator under every one of its aliases.
    /// A colliding alias is rebound to the later operator.
    ///
    /// Dynamic ranges are keyed by their alias only. Range text always goes
    /// through parsing at lookup, so an unnamed range is not registered.
    pub fn register(&mut self, operators: impl IntoIterator<Item = Operator>) {
        for op in operators {
            let names = match &op {
                Operator::Builtin(builtin) => builtin.names().to_vec(),
                Operator::DynamicRange(range) => range.alias().into_iter().collect(),
            };
            if names.is_empty() {
                tracing::debug!(range = op.canonical_name(), "unnamed range not registered");
            }

            for name in names {
                self.insert_alias(name, &op);
            }
        }
    }

    fn insert_alias(&mut self, name: &str, op: &Operator) {
        let Some(previous) = self.operators.insert(name.to_uppercase(), op.clone()) else {
            return;
        };

        if previous.canonical_name() == op.canonical_name() {
            return;
        }
        match self.config.alias_collision {
            AliasCollision::Overwrite => tracing::debug!(
                alias = name,
                previous = previous.canonical_name(),
                current = op.canonical_name(),
                "operator alias rebound"
            ),
            AliasCollision::Warn => tracing::warn!(
                alias = name,
                previous = previous.canonical_name(),
                current = op.canonical_name(),
                "operator alias rebound"
            ),
        }
    }

    /// Static alias lookup only (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Operator> {
        self.operators.get(&name.to_uppercase())
    }

    /// Resolve an operator for a field of `value_type`.
    ///
    /// Exact alias match wins; otherwise numeric and temporal fields fall
    /// back to range parsing. A named range is resolved again for
    /// `value_type` on every hit, against the current clock.
    /// `Ok(None)` means no criterion applies.
    pub fn lookup<'a>(
        &self,
        name: impl Into<Option<&'a str>>,
        value_type: ValueType,
    ) -> Result<Option<Operator>, OperatorError> {
        let Some(name) = name.into() else {
            return Ok(None);
        };

        if let Some(op) = self.get(name) {
            if self.config.debug {
                tracing::debug!(name, operator = op.canonical_name(), "operator alias hit");
            }

            return match op {
                Operator::Builtin(_) => Ok(Some(op.clone())),
                Operator::DynamicRange(range) => Ok(range
                    .resolve_for(value_type, &self.range_context())?
                    .map(Operator::DynamicRange)),
            };
        }

        if !value_type.supports_dynamic_range() {
            return Ok(None);
        }

        let parsed = DynamicRangeOperator::parse(name, value_type, &self.range_context())?;
        if self.config.debug {
            tracing::debug!(
                name,
                %value_type,
                matched = parsed.is_some(),
                "dynamic range fallback"
            );
        } else {
            tracing::trace!(
                name,
                %value_type,
                matched = parsed.is_some(),
                "dynamic range fallback"
            );
        }

        Ok(parsed.map(Operator::DynamicRange))
    }

    /// Context relative dates resolve against: the clock's current instant
    /// and the configured week start.
    #[must_use]
    pub fn range_context(&self) -> RangeContext {
        RangeContext::new(self.clock.now(), self.config.week_start)
    }

    /// Registered aliases (uppercased), in no particular order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.operators.keys().map(String::as_str)
    }

    /// Finish registration and share the registry read-only.
    #[must_use]
    pub fn freeze(self) -> SharedRegistry {
        SharedRegistry(Arc::new(self))
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("aliases", &self.operators.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

///
/// SharedRegistry
///
/// Frozen, cheaply clonable registry. Only the read side of
/// `OperatorRegistry` is reachable through it.
///

#[derive(Clone, Debug)]
pub struct SharedRegistry(Arc<OperatorRegistry>);

impl Deref for SharedRegistry {
    type Target = OperatorRegistry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
