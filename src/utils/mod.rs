pub mod form;
pub mod record;
pub mod text;
pub mod validation;
