//! # Parameter Codec
//!
//! Converts a single raw path-variable string into a typed value. The route
//! trie and dispatch table only ever carry raw strings; conversion happens
//! lazily, when a handler calls [`PathParams::get`](crate::PathParams::get)
//! with a declared target type.
//!
//! Rather than one monolithic branch-on-type function, each target type
//! implements [`FromParam`], so the converter is selected by the caller's
//! declared type. Structured targets are delegated to `serde_json` through
//! the [`Json`] wrapper.
//!
//! ## Conversion rules
//!
//! | Target            | Rule                                                    |
//! | ----------------- | ------------------------------------------------------- |
//! | `String`          | returned verbatim                                       |
//! | `bool`            | case-insensitive `true`/`1` and `false`/`0`             |
//! | integers / floats | `FromStr` of the exact target width                     |
//! | `char`            | one char literal; empty → `'\0'`; longer → code point   |
//! | `Json<T>`         | `serde_json::from_str`, error surfaced as conversion    |

use serde::de::DeserializeOwned;
use std::fmt;

/// Conversion failure for a single path variable.
///
/// Carries the variable name and raw value for diagnostics; the dispatcher
/// logs these but never lets them leak into a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// The handler asked for a variable the matched pattern never bound.
    Missing {
        /// The requested variable name
        name: String,
    },
    /// The raw value could not be coerced to the requested type.
    Invalid {
        /// The variable name (filled in by `PathParams::get`)
        name: String,
        /// The raw value as extracted from the path
        value: String,
        /// The requested target type
        expected: &'static str,
        /// Underlying parser/serde message, when one exists
        detail: Option<String>,
    },
}

impl ParamError {
    /// Build an `Invalid` error from inside a converter, before the variable
    /// name is known.
    fn invalid(expected: &'static str, value: &str, detail: Option<String>) -> Self {
        ParamError::Invalid {
            name: String::new(),
            value: value.to_string(),
            expected,
            detail,
        }
    }

    /// Attach the variable name once the lookup site knows it.
    #[must_use]
    pub(crate) fn with_name(mut self, param: &str) -> Self {
        match &mut self {
            ParamError::Missing { name } | ParamError::Invalid { name, .. } => {
                *name = param.to_string();
            }
        }
        self
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::Missing { name } => {
                write!(f, "missing path variable '{name}'")
            }
            ParamError::Invalid {
                name,
                value,
                expected,
                detail,
            } => {
                write!(
                    f,
                    "invalid value '{value}' for path variable '{name}': expected {expected}"
                )?;
                if let Some(detail) = detail {
                    write!(f, " ({detail})")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ParamError {}

/// A type that can be produced from one raw path-variable string.
pub trait FromParam: Sized {
    /// Convert the raw string, or report why it cannot be done.
    ///
    /// # Errors
    ///
    /// [`ParamError::Invalid`] describing the raw value and the target type.
    fn from_param(raw: &str) -> Result<Self, ParamError>;
}

impl FromParam for String {
    fn from_param(raw: &str) -> Result<Self, ParamError> {
        Ok(raw.to_string())
    }
}

impl FromParam for bool {
    fn from_param(raw: &str) -> Result<Self, ParamError> {
        if raw.eq_ignore_ascii_case("true") || raw == "1" {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
            Ok(false)
        } else {
            Err(ParamError::invalid("bool", raw, None))
        }
    }
}

macro_rules! impl_from_param_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromParam for $ty {
                fn from_param(raw: &str) -> Result<Self, ParamError> {
                    raw.parse::<$ty>().map_err(|e| {
                        ParamError::invalid(stringify!($ty), raw, Some(e.to_string()))
                    })
                }
            }
        )*
    };
}

impl_from_param_number!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl FromParam for char {
    fn from_param(raw: &str) -> Result<Self, ParamError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            // Empty input maps to the zero value.
            (None, _) => Ok('\0'),
            (Some(c), None) => Ok(c),
            // Longer input is re-attempted as a numeric code point, so
            // small-width numeric codes like "65" still convert.
            _ => raw
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| ParamError::invalid("char", raw, None)),
        }
    }
}

/// Wrapper that delegates conversion to `serde_json`.
///
/// Any structured target the primitive converters do not cover goes through
/// here; whatever error serde raises is surfaced as a conversion error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: DeserializeOwned> FromParam for Json<T> {
    fn from_param(raw: &str) -> Result<Self, ParamError> {
        serde_json::from_str(raw)
            .map(Json)
            .map_err(|e| ParamError::invalid("json", raw, Some(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_verbatim() {
        assert_eq!(String::from_param("abc").unwrap(), "abc");
        assert_eq!(String::from_param("").unwrap(), "");
    }

    #[test]
    fn test_bool_accepts_case_insensitive_words_and_digits() {
        assert!(bool::from_param("true").unwrap());
        assert!(bool::from_param("TRUE").unwrap());
        assert!(bool::from_param("1").unwrap());
        assert!(!bool::from_param("false").unwrap());
        assert!(!bool::from_param("False").unwrap());
        assert!(!bool::from_param("0").unwrap());
        assert!(bool::from_param("yes").is_err());
        assert!(bool::from_param("10").is_err());
    }

    #[test]
    fn test_integer_width_is_respected() {
        assert_eq!(u8::from_param("255").unwrap(), 255);
        assert!(u8::from_param("256").is_err());
        assert_eq!(i32::from_param("-17").unwrap(), -17);
        assert!(i32::from_param("abc").is_err());
        assert!(u32::from_param("-1").is_err());
    }

    #[test]
    fn test_float_parse() {
        assert_eq!(f64::from_param("2.5").unwrap(), 2.5);
        assert!(f32::from_param("two").is_err());
    }

    #[test]
    fn test_char_literal_empty_and_numeric_code() {
        assert_eq!(char::from_param("A").unwrap(), 'A');
        assert_eq!(char::from_param("").unwrap(), '\0');
        assert_eq!(char::from_param("65").unwrap(), 'A');
        assert!(char::from_param("abc").is_err());
    }

    #[test]
    fn test_json_delegation() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let Json(point) = Json::<Point>::from_param(r#"{"x":1,"y":2}"#).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });

        let err = Json::<Point>::from_param("not json").unwrap_err();
        assert!(matches!(err, ParamError::Invalid { detail: Some(_), .. }));
    }

    #[test]
    fn test_error_display_names_the_variable() {
        let err = i64::from_param("abc").unwrap_err().with_name("id");
        let text = err.to_string();
        assert!(text.contains("'abc'"));
        assert!(text.contains("'id'"));
        assert!(text.contains("i64"));
    }
}
