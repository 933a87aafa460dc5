//! Text widgets: formatted labels and editable fields.

mod edit_text;
mod editing;
mod field;
mod rich_text;
mod text_input;

pub use edit_text::EditText;
pub use editing::{CharFilter, EditOutcome, TextEditState};
pub use rich_text::{RichText, Run, SCRIPT_SHIFT, SCRIPT_SIZE_REDUCTION, Script, parse_markup};
pub use text_input::TextInput;

pub(crate) use field::FieldNodes;
