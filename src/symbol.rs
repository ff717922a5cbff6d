use crate::value::{Value, ValueType};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SymbolError {
    #[error("Variable '{0}' already declared")]
    AlreadyDeclared(String),

    #[error("Variable '{0}' used before declaration")]
    UsedBeforeDeclaration(String),

    #[error("Variable '{0}' assigned before declaration")]
    AssignedBeforeDeclaration(String),

    #[error("Symbol table full (max {0} variables)")]
    TableFull(usize),

    #[error("Symbol table could not grow past {0} variables")]
    Allocation(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub value_type: ValueType,
    pub value: Value,
    pub declared: bool,
}

/// The single global table of variables, in declaration order.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    max_symbols: Option<usize>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub const DEFAULT_CAPACITY: usize = 4;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY, None)
    }

    pub fn with_capacity(initial_capacity: usize, max_symbols: Option<usize>) -> Self {
        Self {
            symbols: Vec::with_capacity(initial_capacity.max(1)),
            max_symbols,
        }
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.symbols
            .iter()
            .position(|symbol| symbol.declared && symbol.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.find(name).map(|index| &self.symbols[index])
    }

    /// Adds `name` with a zero value of `value_type` and returns its index.
    pub fn declare(&mut self, name: &str, value_type: ValueType) -> Result<usize, SymbolError> {
        if self.is_declared(name) {
            return Err(SymbolError::AlreadyDeclared(name.to_string()));
        }

        if let Some(limit) = self.max_symbols {
            if self.symbols.len() >= limit {
                return Err(SymbolError::TableFull(limit));
            }
        }

        self.grow_if_full()?;

        self.symbols.push(Symbol {
            name: name.to_string(),
            value_type,
            value: value_type.zero(),
            declared: true,
        });
        debug!(name, %value_type, "declared variable");
        Ok(self.symbols.len() - 1)
    }

    pub fn get_value(&self, name: &str) -> Result<f64, SymbolError> {
        self.get(name)
            .map(|symbol| symbol.value.as_f64())
            .ok_or_else(|| SymbolError::UsedBeforeDeclaration(name.to_string()))
    }

    /// Stores `number` coerced to the variable's declared type.
    pub fn set_value(&mut self, name: &str, number: f64) -> Result<(), SymbolError> {
        let index = self
            .find(name)
            .ok_or_else(|| SymbolError::AssignedBeforeDeclaration(name.to_string()))?;
        let symbol = &mut self.symbols[index];
        symbol.value = symbol.value_type.coerce(number);
        trace!(name, value = %symbol.value, "stored value");
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.symbols.capacity()
    }

    // Doubles capacity when full. Allocation failure is returned, not aborted on.
    fn grow_if_full(&mut self) -> Result<(), SymbolError> {
        let capacity = self.symbols.capacity();
        if self.symbols.len() < capacity {
            return Ok(());
        }

        self.symbols
            .try_reserve_exact(capacity.max(1))
            .map_err(|_| SymbolError::Allocation(capacity))?;
        debug!(from = capacity, to = self.symbols.capacity(), "grew symbol table");
        Ok(())
    }
}
