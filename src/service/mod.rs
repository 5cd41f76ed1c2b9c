//! Request validation and per-resource form schemas.

mod forms;
mod validation;
pub use forms::{BeerNames, BreweryNames, BEER_FIELDS, BREWERY_FIELDS, NAME_MAX_LENGTH};
pub use validation::{
    Constraint, FieldErrors, FieldRule, Submission, UniquenessCheck, Validator, ALREADY_USED, EXTRA_FIELD,
    NOT_A_STRING, NOT_BLANK,
};
