//! Attribute values.
//!
//! [`Value`] is a closed union over every kind an attribute can carry. Opaque
//! payloads live behind [`AnyValue`], and self-describing payloads implement
//! [`LogValuer`] and are expanded explicitly with [`Value::resolve`].

use std::any::Any;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use tracing::warn;

use crate::attr::Attr;
use crate::error::{AttrError, AttrResult};

/// Maximum number of [`LogValuer`] expansions performed by [`Value::resolve`].
pub const MAX_RESOLVE_STEPS: usize = 100;

/// The kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// UTF-8 string.
    String,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// 64-bit float.
    Float,
    /// Boolean.
    Bool,
    /// Elapsed time.
    Duration,
    /// Point in time.
    Time,
    /// Nested sequence of attributes.
    Group,
    /// Opaque payload (nil, error or arbitrary object).
    Any,
    /// Self-describing payload awaiting resolution.
    LogValuer,
}

/// The value half of an [`Attr`].
#[derive(Debug, Clone)]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// 64-bit float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Elapsed time.
    Duration(Duration),
    /// Point in time, in the offset it was recorded with.
    Time(DateTime<FixedOffset>),
    /// Ordered child attributes.
    Group(Vec<Attr>),
    /// Opaque payload.
    Any(AnyValue),
    /// Self-describing payload.
    LogValuer(Arc<dyn LogValuer>),
}

impl Value {
    /// The nil value, used as the "removed" marker by replace callbacks.
    #[must_use]
    pub fn nil() -> Self {
        Self::Any(AnyValue::Nil)
    }

    /// Wrap an error.
    #[must_use]
    pub fn error<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Any(AnyValue::Error(ErrorValue::new(err)))
    }

    /// Wrap an arbitrary value that renders through its `Debug` output.
    #[must_use]
    pub fn object<T>(value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        Self::Any(AnyValue::Object(ObjectValue::new(value)))
    }

    /// Wrap a value that can render itself as text.
    #[must_use]
    pub fn text<T>(value: T) -> Self
    where
        T: TextMarshal + fmt::Debug + Send + Sync + 'static,
    {
        Self::Any(AnyValue::Object(ObjectValue::with_text(value)))
    }

    /// Wrap a self-describing value.
    #[must_use]
    pub fn valuer<V>(valuer: V) -> Self
    where
        V: LogValuer + 'static,
    {
        Self::LogValuer(Arc::new(valuer))
    }

    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::String(_) => Kind::String,
            Self::Int(_) => Kind::Int,
            Self::Uint(_) => Kind::Uint,
            Self::Float(_) => Kind::Float,
            Self::Bool(_) => Kind::Bool,
            Self::Duration(_) => Kind::Duration,
            Self::Time(_) => Kind::Time,
            Self::Group(_) => Kind::Group,
            Self::Any(_) => Kind::Any,
            Self::LogValuer(_) => Kind::LogValuer,
        }
    }

    /// Expand self-describing values until a concrete value is reached.
    ///
    /// Expansion stops after [`MAX_RESOLVE_STEPS`]; a value still unresolved
    /// at that point is replaced by an error value describing the failure.
    #[must_use]
    pub fn resolve(self) -> Self {
        let mut value = self;
        for _ in 0..MAX_RESOLVE_STEPS {
            match value {
                Self::LogValuer(valuer) => value = valuer.log_value(),
                resolved => return resolved,
            }
        }

        match value {
            Self::LogValuer(valuer) => {
                warn!(?valuer, limit = MAX_RESOLVE_STEPS, "log value did not resolve");
                Self::error(AttrError::ResolutionLimit {
                    limit: MAX_RESOLVE_STEPS,
                })
            },
            resolved => resolved,
        }
    }

    /// Borrowing variant of [`Value::resolve`]; only clones self-describing values.
    #[must_use]
    pub fn resolved(&self) -> Cow<'_, Self> {
        match self {
            Self::LogValuer(_) => Cow::Owned(self.clone().resolve()),
            _ => Cow::Borrowed(self),
        }
    }

    /// Whether this is the nil value.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Any(AnyValue::Nil))
    }

    /// Whether this is a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Children of a group value.
    #[must_use]
    pub fn as_group(&self) -> Option<&[Attr]> {
        match self {
            Self::Group(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// String payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Error payload, if any.
    #[must_use]
    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Self::Any(AnyValue::Error(err)) => Some(err),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::nil()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Duration(a), Self::Duration(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Group(a), Self::Group(b)) => a == b,
            (Self::Any(a), Self::Any(b)) => a == b,
            (Self::LogValuer(a), Self::LogValuer(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Uint(u64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Time(value)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(value: Vec<Attr>) -> Self {
        Self::Group(value)
    }
}

impl From<AnyValue> for Value {
    fn from(value: AnyValue) -> Self {
        Self::Any(value)
    }
}

impl From<ErrorValue> for Value {
    fn from(value: ErrorValue) -> Self {
        Self::Any(AnyValue::Error(value))
    }
}

/// Convert any zoned timestamp into a [`Value::Time`].
#[must_use]
pub fn time_value<Tz: TimeZone>(time: &DateTime<Tz>) -> Value {
    Value::Time(time.fixed_offset())
}

/// A value able to describe itself as another [`Value`], typically a group.
///
/// Implementors are expanded by [`Value::resolve`] before any helper inspects
/// them, so masking logic never sees the wrapper.
pub trait LogValuer: fmt::Debug + Send + Sync {
    /// The value to log in place of `self`.
    fn log_value(&self) -> Value;
}

/// Text rendering capability for opaque values.
pub trait TextMarshal {
    /// Failure reported by [`TextMarshal::marshal_text`].
    type Error: fmt::Display;

    /// Render `self` as text.
    ///
    /// # Errors
    ///
    /// Returns the implementor's error when no text form can be produced.
    fn marshal_text(&self) -> Result<String, Self::Error>;
}

/// Opaque attribute payloads.
#[derive(Debug, Clone, Default)]
pub enum AnyValue {
    /// Absent value.
    #[default]
    Nil,
    /// An error.
    Error(ErrorValue),
    /// Any other value.
    Object(ObjectValue),
}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Error(a), Self::Error(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// A shared error with the name of its concrete type.
#[derive(Clone)]
pub struct ErrorValue {
    inner: Arc<dyn Error + Send + Sync>,
    type_name: &'static str,
}

impl ErrorValue {
    /// Wrap `err`, remembering its concrete type name.
    #[must_use]
    pub fn new<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(err),
            type_name: std::any::type_name::<E>(),
        }
    }

    /// Concrete type name of the wrapped error.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The wrapped error.
    #[must_use]
    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }

    /// Downcast to the concrete error type.
    #[must_use]
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

impl PartialEq for ErrorValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl Error for ErrorValue {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// A shared arbitrary value, optionally able to render itself as text.
#[derive(Clone)]
pub struct ObjectValue(Arc<dyn Opaque>);

impl ObjectValue {
    /// Wrap a value rendered through its `Debug` output.
    #[must_use]
    pub fn new<T>(value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        Self(Arc::new(Plain(value)))
    }

    /// Wrap a value rendered through [`TextMarshal`].
    #[must_use]
    pub fn with_text<T>(value: T) -> Self
    where
        T: TextMarshal + fmt::Debug + Send + Sync + 'static,
    {
        Self(Arc::new(Marshaled(value)))
    }

    /// Concrete type name of the wrapped value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Text form of the value, or `None` when it has no text capability.
    #[must_use]
    pub fn marshal_text(&self) -> Option<AttrResult<String>> {
        self.0.marshal_text()
    }

    /// Downcast to the concrete type.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

trait Opaque: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &'static str;
    fn marshal_text(&self) -> Option<AttrResult<String>>;
    fn as_any(&self) -> &dyn Any;
}

struct Plain<T>(T);

impl<T: fmt::Debug> fmt::Debug for Plain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> Opaque for Plain<T>
where
    T: fmt::Debug + Send + Sync + 'static,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn marshal_text(&self) -> Option<AttrResult<String>> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }
}

struct Marshaled<T>(T);

impl<T: fmt::Debug> fmt::Debug for Marshaled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T> Opaque for Marshaled<T>
where
    T: TextMarshal + fmt::Debug + Send + Sync + 'static,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn marshal_text(&self) -> Option<AttrResult<String>> {
        Some(
            self.0
                .marshal_text()
                .map_err(|e| AttrError::MarshalError {
                    type_name: std::any::type_name::<T>(),
                    message: e.to_string(),
                }),
        )
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }
}
