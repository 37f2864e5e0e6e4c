//! Static RML schema
//!
//! The schema is the single source of truth for completion candidates:
//! - `tags` lists every known tag with its insertion snippet
//! - `attributes` maps tags to the attributes they accept, plus a common set
//!   shared by every tag
//! - `values` maps value kinds to the literals an attribute of that kind accepts
//!
//! All tables are immutable `static` data. Lookups never fail; unknown names
//! degrade to the common attribute set or to an empty candidate list.

mod attributes;
mod tags;
mod values;

pub use attributes::{AttributeSpec, COMMON_ATTRIBUTES, attributes_for, value_kind_of};
pub use tags::{TagSpec, tag_list};
pub use values::{ValueCandidate, ValueKind, values_for, values_for_name};
