//! Term model, variables, substitution frames, and the surface `?x`
//! convention for the deductive query engine.

mod frame;
mod instantiate;
mod surface;
mod term;

pub use frame::{Binding, Frame};
pub use instantiate::{instantiate, instantiate_for_display};
pub use surface::{contract_question_mark, query_syntax_process};
pub use term::{Constant, ListIter, Symbol, Term, Variable};
