// Field numbering model

pub mod layout;
pub mod row;
pub mod spec;

pub use layout::FieldLayout;
pub use row::{FieldRow, PlotSlot};
pub use spec::{FieldSpec, RowDirection, RowSpec};
