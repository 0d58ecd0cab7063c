pub mod declaration;
pub mod language;
pub mod symbol;
pub mod type_ref;

pub use declaration::*;
pub use language::*;
pub use symbol::*;
pub use type_ref::*;
