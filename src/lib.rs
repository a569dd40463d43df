#![deny(rust_2018_idioms)]

mod domain;
mod form;
mod refdata;
mod widgets;

pub use domain::{
    FieldKind, FieldPath, FieldPathError, FieldSchema, FormSchema, PENDING_OPTION_VALUE,
    SelectItem, TextTransform,
};
pub use form::{
    ErrorNode, ErrorTree, FieldBinding, FieldCoercionError, FieldState, FieldValue, FormState,
    SetOptions, StampValue, ValidationOutcome, validate_field, validate_form,
};
pub use refdata::{City, Country, Nationality, ReferenceCache, ReferenceSource};
pub use widgets::{
    BoolRadio, CircularRadio, CityCascade, CityRequest, CountrySelect, DATE_REQUIRED_MESSAGE,
    DatePicker, Dropdown, DropdownChange, MINUTE_CHOICES, MaskedInput, Meridiem,
    NationalitySelect, NumberInput, PhoneField, SubErrors, TextInput, TimePicker,
};

pub mod prelude {
    pub use super::{
        ErrorTree, FieldKind, FieldPath, FieldSchema, FormSchema, FormState, SelectItem,
        SetOptions, validate_form,
    };
}
