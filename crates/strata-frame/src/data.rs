//! Scalar kinds, values and typed column storage.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Declared type of a column: a scalar kind plus nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnType {
    /// Scalar kind of the column's values.
    pub kind: TypeKind,
    /// Whether the column admits absent values.
    pub nullable: bool,
}

impl ColumnType {
    /// A non-nullable column of `kind`.
    #[must_use]
    pub fn plain(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// A nullable column of `kind`.
    #[must_use]
    pub fn nullable(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Nullable({})", self.kind.as_str())
        } else {
            f.write_str(self.kind.as_str())
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! column_kinds {
    ($(($kind:ident, $nullable:ident, $rust:ty, $name:literal)),+ $(,)?) => {
        /// Scalar type of a column, without nullability.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TypeKind {
            $(
                #[doc = concat!("ClickHouse `", $name, "`.")]
                $kind,
            )+
        }

        impl TypeKind {
            /// The ClickHouse name of this kind.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$kind => $name,)+
                }
            }

            /// Parse a bare (unwrapped) ClickHouse type name.
            #[must_use]
            pub fn parse(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$kind),)+
                    _ => None,
                }
            }
        }

        /// A single typed scalar value.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Value {
            /// Absent value; only valid in nullable columns.
            Null,
            $(
                #[doc = concat!("A `", $name, "` value.")]
                $kind($rust),
            )+
        }

        impl Value {
            /// The kind this value belongs to; `None` for [`Value::Null`].
            #[must_use]
            pub fn kind(&self) -> Option<TypeKind> {
                match self {
                    Self::Null => None,
                    $(Self::$kind(_) => Some(TypeKind::$kind),)+
                }
            }
        }

        /// Typed storage for the values of one column.
        #[derive(Debug, Clone, PartialEq)]
        pub enum ColumnData {
            $(
                #[doc = concat!("A `", $name, "` column.")]
                $kind(Vec<$rust>),
                #[doc = concat!("A `Nullable(", $name, ")` column.")]
                $nullable(Vec<Option<$rust>>),
            )+
        }

        impl ColumnData {
            /// Empty storage matching `column_type`.
            #[must_use]
            pub fn new(column_type: &ColumnType) -> Self {
                match (column_type.kind, column_type.nullable) {
                    $(
                        (TypeKind::$kind, false) => Self::$kind(Vec::new()),
                        (TypeKind::$kind, true) => Self::$nullable(Vec::new()),
                    )+
                }
            }

            /// Number of stored values.
            #[must_use]
            pub fn len(&self) -> usize {
                match self {
                    $(
                        Self::$kind(values) => values.len(),
                        Self::$nullable(values) => values.len(),
                    )+
                }
            }

            /// `true` when no values are stored.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// The column type this storage holds.
            #[must_use]
            pub fn column_type(&self) -> ColumnType {
                match self {
                    $(
                        Self::$kind(_) => ColumnType::plain(TypeKind::$kind),
                        Self::$nullable(_) => ColumnType::nullable(TypeKind::$kind),
                    )+
                }
            }

            /// Append one value.
            ///
            /// # Errors
            ///
            /// Returns the value unchanged when its type does not fit this
            /// column, including [`Value::Null`] pushed into a non-nullable
            /// column.
            pub fn push(&mut self, value: Value) -> Result<(), Value> {
                match (self, value) {
                    $(
                        (Self::$kind(values), Value::$kind(v)) => {
                            values.push(v);
                            Ok(())
                        }
                        (Self::$nullable(values), Value::$kind(v)) => {
                            values.push(Some(v));
                            Ok(())
                        }
                        (Self::$nullable(values), Value::Null) => {
                            values.push(None);
                            Ok(())
                        }
                    )+
                    (_, value) => Err(value),
                }
            }
        }
    };
}

column_kinds! {
    (UInt8, UInt8Nullable, u8, "UInt8"),
    (UInt16, UInt16Nullable, u16, "UInt16"),
    (UInt32, UInt32Nullable, u32, "UInt32"),
    (UInt64, UInt64Nullable, u64, "UInt64"),
    (Int8, Int8Nullable, i8, "Int8"),
    (Int16, Int16Nullable, i16, "Int16"),
    (Int32, Int32Nullable, i32, "Int32"),
    (Int64, Int64Nullable, i64, "Int64"),
    (Float32, Float32Nullable, f32, "Float32"),
    (Float64, Float64Nullable, f64, "Float64"),
    (Text, TextNullable, String, "String"),
    (Date, DateNullable, NaiveDate, "Date"),
    (DateTime, DateTimeNullable, NaiveDateTime, "DateTime"),
}
