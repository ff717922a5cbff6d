use std::fmt;

/// Declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Int,
    Double,
}

impl ValueType {
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Double => "double",
        }
    }

    /// Coerces an evaluated number into this storage type. Integer targets
    /// truncate toward zero.
    pub fn coerce(&self, number: f64) -> Value {
        match self {
            ValueType::Int => Value::Int(number as i64),
            ValueType::Double => Value::Double(number),
        }
    }

    pub fn zero(&self) -> Value {
        self.coerce(0.0)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A stored value. Arithmetic always happens on `f64`; a `Value` only exists
/// once a number has been stored into a typed variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Double(f64),
}

impl Value {
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Int(n) => *n as f64,
            Value::Double(n) => *n,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Double(n) => write!(f, "{:.2}", n),
        }
    }
}
