//! # URI Template
//!
//! Compiles URI path templates and matches request paths against them:
//! - Literal segments (`/about`)
//! - Variable segments (`/users/{id}`, `/list/{page=1}`)
//! - Compound segments mixing literals and variables (`/files/{name}.{ext}`)
//! - Wildcards (`/static/*`, `/docs/{*path}`)
//!
//! ## Ambiguity Ordering
//!
//! Compound segments can overlap: `food{x}ar` and `foo{x}bar` both accept
//! `foodbar`. Every segment kind carries a deterministic preference order so a
//! [`TemplateTable`] always tries the more specific template first and can
//! reject real duplicates.
//!
//! ## Example
//!
//! ```
//! use uri_template::{TemplateTable, UriTemplate};
//!
//! let mut table = TemplateTable::new();
//! table.insert_str("/files/{name}.{ext}", "any").unwrap();
//! table.insert_str("/files/{name}.json", "json").unwrap();
//!
//! let m = table.match_path("/files/report.json").unwrap();
//! assert_eq!(*m.value, "json");
//! assert_eq!(m.bindings.get("name"), Some(&"report".to_string()));
//!
//! let template = UriTemplate::parse("/files/{name}.{ext}").unwrap();
//! assert_eq!(template.bind_by_position(&["report", "pdf"]).unwrap(), "/files/report.pdf");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod binding;
mod error;
mod options;
pub mod path;
pub mod segment;
mod table;
mod template;
mod text;
mod variables;

pub use binding::BindingSink;
pub use error::{ContractViolation, FormatReason, Result, TemplateError};
pub use options::TableOptions;
pub use segment::{
    CompoundSegment, LiteralSegment, PathSegment, SegmentContext, SegmentKind, ShapeClass,
    VariablePair, VariableSegment, WildcardSegment,
};
pub use table::{TableEntry, TableMatch, TemplateTable};
pub use template::UriTemplate;
pub use variables::{RegisteredVariable, VariableRegistry, VariableSite, VariableTable};
