pub(crate) mod grammar;
pub(crate) mod node;
