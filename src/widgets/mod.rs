mod cascade;
mod date;
mod dropdown;
mod phone;
mod radio;
mod text;
mod time;

pub use cascade::{CityCascade, CityRequest, CountrySelect, NationalitySelect};
pub use date::DatePicker;
pub use dropdown::{Dropdown, DropdownChange};
pub use phone::PhoneField;
pub use radio::{BoolRadio, CircularRadio};
pub use text::{MaskedInput, NumberInput, TextInput};
pub use time::{DATE_REQUIRED_MESSAGE, MINUTE_CHOICES, Meridiem, SubErrors, TimePicker};
