//! Positional arguments as they arrive from the host.
//!
//! The host hands over loosely typed values. They are converted once into
//! [`Argument`] and then pulled out per kernel through [`Args`], which
//! rejects a bad shape before any computation starts.

use serde_json::Value;

use crate::error::{KernelError, Result};

/// One host value.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Argument>),
}

impl Argument {
    /// Short type name for error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Argument::Null => "null",
            Argument::Bool(_) => "boolean",
            Argument::Int(_) => "integer",
            Argument::Float(_) => "number",
            Argument::Str(_) => "string",
            Argument::List(_) => "array",
        }
    }

    pub const fn is_number(&self) -> bool {
        matches!(self, Argument::Int(_) | Argument::Float(_))
    }

    fn as_f64(&self) -> Option<f64> {
        match *self {
            Argument::Int(i) => Some(i as f64),
            Argument::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Integers, and floats with no fractional part (host numbers are doubles).
    fn as_i64(&self) -> Option<i64> {
        match *self {
            Argument::Int(i) => Some(i),
            Argument::Float(f)
                if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 =>
            {
                Some(f as i64)
            }
            _ => None,
        }
    }
}

impl From<bool> for Argument {
    fn from(v: bool) -> Self {
        Argument::Bool(v)
    }
}

impl From<i64> for Argument {
    fn from(v: i64) -> Self {
        Argument::Int(v)
    }
}

impl From<i32> for Argument {
    fn from(v: i32) -> Self {
        Argument::Int(i64::from(v))
    }
}

impl From<u32> for Argument {
    fn from(v: u32) -> Self {
        Argument::Int(i64::from(v))
    }
}

impl From<f64> for Argument {
    fn from(v: f64) -> Self {
        Argument::Float(v)
    }
}

impl From<&str> for Argument {
    fn from(v: &str) -> Self {
        Argument::Str(v.to_string())
    }
}

impl From<String> for Argument {
    fn from(v: String) -> Self {
        Argument::Str(v)
    }
}

impl<T: Into<Argument>> From<Vec<T>> for Argument {
    fn from(v: Vec<T>) -> Self {
        Argument::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<Value> for Argument {
    /// Objects become their JSON text, the way a host stringifies them.
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Argument::Null,
            Value::Bool(b) => Argument::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Argument::Int(i),
                None => Argument::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Argument::Str(s),
            Value::Array(items) => Argument::List(items.into_iter().map(Argument::from).collect()),
            obj @ Value::Object(_) => Argument::Str(obj.to_string()),
        }
    }
}

/// Typed view over one call's arguments.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    args: &'a [Argument],
}

impl<'a> Args<'a> {
    pub fn new(args: &'a [Argument]) -> Self {
        Self { args }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Fail unless at least `n` arguments are present.
    pub fn require(&self, n: usize, required: &'static str) -> Result<()> {
        if self.args.len() < n {
            return Err(KernelError::MissingArguments {
                required,
                got: self.args.len(),
            });
        }
        Ok(())
    }

    /// Whether argument `i` is present and numeric.
    pub fn is_number(&self, i: usize) -> bool {
        self.args.get(i).is_some_and(Argument::is_number)
    }

    fn get(&self, i: usize) -> Option<&'a Argument> {
        match self.args.get(i) {
            None | Some(Argument::Null) => None,
            Some(arg) => Some(arg),
        }
    }

    fn mismatch(&self, index: usize, expected: &'static str) -> KernelError {
        KernelError::InvalidArgument {
            index,
            expected,
            got: self.args.get(index).map_or("nothing", Argument::type_name),
        }
    }

    pub fn string(&self, i: usize) -> Result<&'a str> {
        match self.get(i) {
            Some(Argument::Str(s)) => Ok(s),
            _ => Err(self.mismatch(i, "string")),
        }
    }

    pub fn int(&self, i: usize) -> Result<i64> {
        self.get(i)
            .and_then(Argument::as_i64)
            .ok_or_else(|| self.mismatch(i, "integer"))
    }

    /// `None` when the argument is absent or null.
    pub fn int_opt(&self, i: usize) -> Result<Option<i64>> {
        match self.get(i) {
            None => Ok(None),
            Some(_) => self.int(i).map(Some),
        }
    }

    pub fn int_or(&self, i: usize, default: i64) -> Result<i64> {
        Ok(self.int_opt(i)?.unwrap_or(default))
    }

    /// An array of arrays of numbers. Shape checks (rectangular, non-empty)
    /// are left to the matrix kernel.
    pub fn matrix(&self, i: usize) -> Result<Vec<Vec<f64>>> {
        const EXPECTED: &str = "array of number arrays";
        let Some(Argument::List(rows)) = self.get(i) else {
            return Err(self.mismatch(i, EXPECTED));
        };

        let invalid = |got: &Argument| KernelError::InvalidArgument {
            index: i,
            expected: EXPECTED,
            got: got.type_name(),
        };

        rows.iter()
            .map(|row| match row {
                Argument::List(cells) => cells
                    .iter()
                    .map(|c| c.as_f64().ok_or_else(|| invalid(c)))
                    .collect::<Result<Vec<f64>>>(),
                other => Err(invalid(other)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require() {
        let args = [Argument::from("a")];
        let view = Args::new(&args);
        assert!(view.require(1, "one thing").is_ok());
        assert_eq!(
            view.require(2, "two things"),
            Err(KernelError::MissingArguments {
                required: "two things",
                got: 1
            })
        );
    }

    #[test]
    fn test_int_coercion() {
        let args = [
            Argument::Int(5),
            Argument::Float(6.0),
            Argument::Float(6.5),
            Argument::from("7"),
            Argument::Null,
        ];
        let view = Args::new(&args);
        assert_eq!(view.int(0), Ok(5));
        assert_eq!(view.int(1), Ok(6));
        assert!(view.int(2).is_err());
        assert_eq!(
            view.int(3),
            Err(KernelError::InvalidArgument {
                index: 3,
                expected: "integer",
                got: "string"
            })
        );
        assert_eq!(view.int_opt(4), Ok(None));
        assert_eq!(view.int_opt(9), Ok(None));
        assert_eq!(view.int_or(9, 42), Ok(42));
    }

    #[test]
    fn test_matrix_extraction() {
        let args = [
            Argument::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]),
            Argument::from(vec![vec![Argument::Int(1), Argument::from("x")]]),
            Argument::from(vec![1.0, 2.0]),
            Argument::from(Vec::<Argument>::new()),
        ];
        let view = Args::new(&args);
        assert_eq!(view.matrix(0), Ok(vec![vec![1.0, 2.0], vec![3.0, 4.0]]));
        assert!(view.matrix(1).is_err());
        assert!(view.matrix(2).is_err());
        assert_eq!(view.matrix(3), Ok(vec![]));
    }

    #[test]
    fn test_from_json_value() {
        let arg = Argument::from(json!([[1, 2.5], [3, 4]]));
        assert_eq!(
            arg,
            Argument::List(vec![
                Argument::List(vec![Argument::Int(1), Argument::Float(2.5)]),
                Argument::List(vec![Argument::Int(3), Argument::Int(4)]),
            ])
        );

        let key = Argument::from(json!({"n": "3233", "e": 17}));
        let Argument::Str(text) = key else {
            panic!("objects should become JSON text");
        };
        assert_eq!(
            serde_json::from_str::<Value>(&text).unwrap(),
            json!({"n": "3233", "e": 17})
        );
    }
}
