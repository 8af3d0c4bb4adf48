use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;

/// Runtime trust boundary for decoded cookie values.
///
/// `parse` returns the value callers should see, which may be a refined or
/// normalized version of the input.
pub trait Validator: Send + Sync {
    /// Validate `value`, returning the accepted value.
    fn parse(&self, value: Value) -> std::result::Result<Value, ValidationError>;
}

/// Validates by deserializing into `T` and serializing back.
///
/// Unknown object fields are dropped and `serde` defaults are filled in, so
/// the returned value is the normalized shape of `T`.
pub struct SerdeValidator<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeValidator<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SerdeValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeValidator")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Validator for SerdeValidator<T>
where
    T: DeserializeOwned + Serialize,
{
    fn parse(&self, value: Value) -> std::result::Result<Value, ValidationError> {
        let typed: T = serde_json::from_value(value)?;
        Ok(serde_json::to_value(typed)?)
    }
}

/// Validator backed by a closure.
pub struct FnValidator<F> {
    parse: F,
}

impl<F> FnValidator<F>
where
    F: Fn(Value) -> std::result::Result<Value, ValidationError> + Send + Sync,
{
    pub fn new(parse: F) -> Self {
        Self { parse }
    }
}

impl<F> fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnValidator").finish_non_exhaustive()
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(Value) -> std::result::Result<Value, ValidationError> + Send + Sync,
{
    fn parse(&self, value: Value) -> std::result::Result<Value, ValidationError> {
        (self.parse)(value)
    }
}
