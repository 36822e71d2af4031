//! Dictionary type code mapping.
//!
//! Maps `_item_type.code` values to a Python host type and a SQLAlchemy
//! column type.

use std::fmt;

/// Column storage kind for a dictionary type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Bounded string with an explicit length.
    VarChar(u32),
    /// Short free text, stored as a bounded string.
    TinyText,
    /// Calendar date.
    Date,
    /// Date with time of day.
    DateTime,
    /// Integer.
    Int,
    /// Floating point.
    Float,
    /// Boolean flag.
    Boolean,
}

/// Length used for [`TypeKind::TinyText`] columns.
pub const TINYTEXT_LENGTH: u32 = 255;

impl TypeKind {
    /// Returns the Python type annotation for the kind.
    #[must_use]
    pub const fn host_type(self) -> &'static str {
        match self {
            Self::VarChar(_) | Self::TinyText => "str",
            Self::Date => "datetime.date",
            Self::DateTime => "datetime.datetime",
            Self::Int => "int",
            Self::Float => "float",
            Self::Boolean => "bool",
        }
    }

    /// Returns the SQLAlchemy column type expression for the kind.
    #[must_use]
    pub fn descriptor(self) -> String {
        match self {
            Self::VarChar(length) => format!("String({length})"),
            Self::TinyText => format!("String({TINYTEXT_LENGTH})"),
            Self::Date => "Date".to_string(),
            Self::DateTime => "DateTime".to_string(),
            Self::Int => "Integer".to_string(),
            Self::Float => "Float".to_string(),
            Self::Boolean => "Boolean".to_string(),
        }
    }

    /// Returns true for kinds rendered as Python strings.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::VarChar(_) | Self::TinyText)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VarChar(length) => write!(f, "varchar({length})"),
            Self::TinyText => f.write_str("tinytext"),
            Self::Date => f.write_str("date"),
            Self::DateTime => f.write_str("datetime"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
        }
    }
}

/// Known dictionary type codes.
///
/// `yyyy-mm-dd` is a date and the `yyyy-mm-dd:hh:mm` codes are date-times;
/// `boolean` maps to `Boolean` rather than a `String(80)` column.
static TYPE_MAP: &[(&str, TypeKind)] = &[
    ("3x4_matrices", TypeKind::VarChar(10)),
    ("3x4_matrix", TypeKind::TinyText),
    ("4x3_matrix", TypeKind::TinyText),
    ("any", TypeKind::TinyText),
    ("asym_id", TypeKind::VarChar(80)),
    ("atcode", TypeKind::VarChar(6)),
    ("author", TypeKind::VarChar(150)),
    ("binary", TypeKind::TinyText),
    // Native boolean, not String(80).
    ("boolean", TypeKind::Boolean),
    ("citation_doi", TypeKind::VarChar(80)),
    ("code", TypeKind::VarChar(20)),
    ("date_dep", TypeKind::Date),
    ("deposition_email", TypeKind::VarChar(80)),
    ("ec-type", TypeKind::VarChar(10)),
    ("email", TypeKind::VarChar(80)),
    ("emd_id", TypeKind::VarChar(15)),
    ("entity_id_list", TypeKind::TinyText),
    ("exp_data_doi", TypeKind::VarChar(80)),
    ("fax", TypeKind::VarChar(25)),
    ("float", TypeKind::Float),
    ("float-range", TypeKind::VarChar(30)),
    ("id_list", TypeKind::TinyText),
    ("id_list_spc", TypeKind::VarChar(200)),
    ("idname", TypeKind::VarChar(80)),
    ("int", TypeKind::Int),
    ("int-range", TypeKind::VarChar(20)),
    ("int_list", TypeKind::TinyText),
    ("line", TypeKind::VarChar(128)),
    ("name", TypeKind::VarChar(80)),
    ("operation_expression", TypeKind::VarChar(511)),
    ("orcid_id", TypeKind::VarChar(20)),
    ("pdb_id", TypeKind::VarChar(20)),
    ("pdb_id_u", TypeKind::VarChar(20)),
    ("pdbx_PDB_obsoleted_db_id", TypeKind::TinyText),
    ("pdbx_related_db_id", TypeKind::VarChar(80)),
    ("phone", TypeKind::VarChar(25)),
    ("point_group", TypeKind::VarChar(20)),
    ("point_group_helical", TypeKind::VarChar(5)),
    ("point_symmetry", TypeKind::VarChar(20)),
    ("positive_int", TypeKind::Int),
    ("seq-one-letter-code", TypeKind::TinyText),
    ("sequence_dep", TypeKind::TinyText),
    ("symmetry_operation", TypeKind::VarChar(80)),
    ("symop", TypeKind::VarChar(10)),
    ("text", TypeKind::TinyText),
    ("uchar1", TypeKind::VarChar(2)),
    ("uchar3", TypeKind::VarChar(4)),
    ("uchar5", TypeKind::VarChar(6)),
    ("ucode", TypeKind::VarChar(10)),
    ("ucode-alphanum-csv", TypeKind::VarChar(25)),
    ("uline", TypeKind::VarChar(50)),
    ("uniprot_ptm_id", TypeKind::VarChar(20)),
    ("url", TypeKind::TinyText),
    // Date only; the time-of-day codes below are date-times.
    ("yyyy-mm-dd", TypeKind::Date),
    ("yyyy-mm-dd:hh:mm", TypeKind::DateTime),
    ("yyyy-mm-dd:hh:mm-flex", TypeKind::DateTime),
];

/// Resolved column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// Storage kind.
    pub kind: TypeKind,
    /// Python type annotation, e.g. `str`.
    pub host_type: &'static str,
    /// SQLAlchemy column type, e.g. `String(20)`.
    pub descriptor: String,
}

impl From<TypeKind> for MappedType {
    fn from(kind: TypeKind) -> Self {
        Self {
            kind,
            host_type: kind.host_type(),
            descriptor: kind.descriptor(),
        }
    }
}

/// Returns the storage kind for a type code.
#[must_use]
pub fn type_kind(type_code: &str) -> Option<TypeKind> {
    TYPE_MAP
        .iter()
        .find(|(code, _)| *code == type_code)
        .map(|&(_, kind)| kind)
}

/// Maps a type code to its host type and column type.
///
/// Returns `None` for codes outside the known table.
#[must_use]
pub fn map_type(type_code: &str) -> Option<MappedType> {
    type_kind(type_code).map(MappedType::from)
}

/// Iterates over every known type code.
pub fn known_type_codes() -> impl Iterator<Item = &'static str> {
    TYPE_MAP.iter().map(|&(code, _)| code)
}
