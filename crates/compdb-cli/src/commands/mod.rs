pub mod inspect;
pub mod load_compilations;
