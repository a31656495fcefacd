//! Input validation rules for registry writes

pub mod validation;
