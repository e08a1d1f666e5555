//! # `closed_enum!` — Declaring a Closed Enum Type
//!
//! Declares a string-backed newtype over [`CanonicalValue`](crate::CanonicalValue)
//! together with its process-wide [`EnumDefinition`](crate::EnumDefinition),
//! built on first use. The first declared value is the default.
//!
//! ```
//! use cenum_core::{closed_enum, ClosedEnum};
//!
//! closed_enum! {
//!     /// Lifecycle of an order.
//!     pub struct OrderStatus {
//!         PENDING => "pending",
//!         PAID => "paid",
//!         SHIPPED => "shipped",
//!     }
//! }
//!
//! let paid = OrderStatus::parse(OrderStatus::PAID).unwrap();
//! assert!(paid.is_valid_value());
//! assert_eq!(OrderStatus::default_variant().as_str(), "pending");
//! assert!(OrderStatus::parse("refunded").is_none());
//! ```
//!
//! At least one value is required:
//!
//! ```compile_fail
//! cenum_core::closed_enum! {
//!     pub struct Nothing {}
//! }
//! ```

/// Declare a closed enum type. See the [module docs](crate::macros).
#[macro_export]
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $first:ident => $first_text:literal
            $(, $variant:ident => $text:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name($crate::CanonicalValue);

        impl $name {
            #[doc = concat!("Text of `", $first_text, "` (the default).")]
            pub const $first: &'static str = $first_text;
            $(
                #[doc = concat!("Text of `", $text, "`.")]
                pub const $variant: &'static str = $text;
            )*

            /// Every declared value in declaration order, default first.
            pub const VALUES: &'static [&'static str] = &[$first_text $(, $text)*];

            fn declaration() -> &'static ($crate::EnumDefinition, $crate::CanonicalValue) {
                static DECLARATION: ::std::sync::OnceLock<(
                    $crate::EnumDefinition,
                    $crate::CanonicalValue,
                )> = ::std::sync::OnceLock::new();
                DECLARATION.get_or_init(|| {
                    $crate::EnumDefinition::with_default($first_text, Self::VALUES.iter().skip(1))
                })
            }

            /// The process-wide definition backing this type.
            pub fn definition() -> &'static $crate::EnumDefinition {
                &Self::declaration().0
            }

            /// Validate `text` against the closed set.
            pub fn parse(text: &str) -> ::std::option::Option<Self> {
                $crate::enum_get(Self::definition(), text)
            }

            /// The default value.
            pub fn default_variant() -> Self {
                Self(Self::declaration().1.clone())
            }

            /// Every member, in declaration order.
            pub fn all() -> ::std::vec::Vec<Self> {
                Self::definition().values().cloned().map(Self).collect()
            }

            /// The value's text.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            /// The underlying canonical value.
            pub fn canonical(&self) -> &$crate::CanonicalValue {
                &self.0
            }
        }

        impl ::std::convert::From<$crate::CanonicalValue> for $name {
            fn from(value: $crate::CanonicalValue) -> Self {
                Self(value)
            }
        }

        impl $crate::ClosedEnum for $name {
            fn is_valid_value(&self) -> bool {
                Self::definition().owns(&self.0)
            }

            fn default_value(&self) -> &str {
                $first_text
            }

            fn column_value(
                &self,
            ) -> ::std::result::Result<$crate::ColumnValue, $crate::EnumError> {
                if !$crate::ClosedEnum::is_valid_value(self) {
                    return ::std::result::Result::Err($crate::EnumError::NotAMember {
                        enum_name: ::std::stringify!($name),
                        value: self.0.as_str().to_owned(),
                    });
                }
                ::std::result::Result::Ok($crate::ColumnValue::Text(self.0.as_str().to_owned()))
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::default_variant()
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::EnumError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Self::parse(s).ok_or_else(|| $crate::EnumError::NotAMember {
                    enum_name: ::std::stringify!($name),
                    value: s.to_owned(),
                })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.0.as_str())
            }
        }

        impl ::std::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str(self.0.as_str())
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let text =
                    <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(
                        deserializer,
                    )?;
                Self::parse(&text).ok_or_else(|| {
                    <D::Error as $crate::__private::serde::de::Error>::custom(::std::format!(
                        "unknown {} value {:?}",
                        ::std::stringify!($name),
                        text
                    ))
                })
            }
        }
    };
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crate::{ClosedEnum, ColumnValue, EnumDefinition, EnumError};

    crate::closed_enum! {
        /// Three-valued enum used throughout the tests.
        pub struct AbcEnum {
            A1 => "a1",
            B2 => "b2",
            C3 => "c3",
        }
    }

    crate::closed_enum! {
        struct Single {
            ONLY => "only"
        }
    }

    #[test]
    fn test_constants_and_values() {
        assert_eq!(AbcEnum::A1, "a1");
        assert_eq!(AbcEnum::C3, "c3");
        assert_eq!(AbcEnum::VALUES, &["a1", "b2", "c3"]);
    }

    #[test]
    fn test_parse_known_and_unknown() {
        let s = AbcEnum::parse("a1").unwrap();
        assert_eq!(s.as_str(), "a1");
        assert!(AbcEnum::parse("d4").is_none());
    }

    #[test]
    fn test_parse_interns() {
        let s1 = format!("a{}", 1);
        let s2 = format!("a{}", 1);
        let e1 = AbcEnum::parse(&s1).unwrap();
        let e2 = AbcEnum::parse(&s2).unwrap();
        assert!(e1.canonical().is_identical(e2.canonical()));
    }

    #[test]
    fn test_default() {
        assert_eq!(AbcEnum::default_variant().as_str(), "a1");
        assert_eq!(AbcEnum::default(), AbcEnum::parse("a1").unwrap());
        assert!(AbcEnum::default()
            .canonical()
            .is_identical(AbcEnum::definition().default_value().unwrap()));
        assert_eq!(Single::default().as_str(), "only");
    }

    #[test]
    fn test_closed_enum_capability() {
        let b = AbcEnum::parse(AbcEnum::B2).unwrap();
        assert!(b.is_valid_value());
        assert_eq!(ClosedEnum::default_value(&b), "a1");
        assert_eq!(b.column_value().unwrap(), ColumnValue::Text("b2".into()));
    }

    #[test]
    fn test_foreign_value_is_not_a_member() {
        let foreign = EnumDefinition::new(["a1"]);
        let impostor = AbcEnum::from(foreign.lookup("a1").unwrap().clone());
        assert!(!impostor.is_valid_value());
        assert_eq!(
            impostor.column_value().unwrap_err(),
            EnumError::NotAMember {
                enum_name: "AbcEnum",
                value: "a1".to_string(),
            }
        );
    }

    #[test]
    fn test_all_in_declaration_order() {
        let all: Vec<String> = AbcEnum::all().iter().map(ToString::to_string).collect();
        assert_eq!(all, vec!["a1", "b2", "c3"]);
    }

    #[test]
    fn test_from_str() {
        let c: AbcEnum = "c3".parse().unwrap();
        assert_eq!(c.as_ref(), "c3");
        let err = "z9".parse::<AbcEnum>().unwrap_err();
        assert_eq!(err.to_string(), "value \"z9\" is not a member of closed enum AbcEnum");
    }

    #[test]
    fn test_serde() {
        let b = AbcEnum::parse("b2").unwrap();
        assert_eq!(serde_json::to_string(&b).unwrap(), "\"b2\"");
        let parsed: AbcEnum = serde_json::from_str("\"b2\"").unwrap();
        assert!(parsed.canonical().is_identical(b.canonical()));
        assert!(serde_json::from_str::<AbcEnum>("\"d4\"").is_err());
    }
}
