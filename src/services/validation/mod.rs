pub mod field_validator;

pub use field_validator::{
    check_username_available, rule_for, validate, validate_all, Field, FieldRule, UsernameProbe,
    ValidatedRecord, DUPLICATE_EMAIL_MESSAGE, DUPLICATE_USERNAME_MESSAGE, REQUIRED_MESSAGE,
};
