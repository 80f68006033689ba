use std::collections::BTreeMap;

use convert_case::{Case, Casing};
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::models::dish::DishRecord;
use crate::services::validation;

/// Preparation time shown by a freshly mounted or reset form.
pub const START_OF_DAY: &str = "00:00:00";

/// Fields of the dish form, named in the model's camelCase convention.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    Name,
    PreparationTime,
    Type,
    NoOfSlices,
    Diameter,
    SpicinessScale,
    SlicesOfBread,
}

impl FormField {
    /// Key used for this field by the dishes API (`noOfSlices` -> `no_of_slices`).
    pub fn wire_name(&self) -> String {
        self.as_ref().to_case(Case::Snake)
    }

    /// Map a key from an API response back to a form field.
    ///
    /// Returns `None` for keys that do not name a form field.
    pub fn from_wire_key(key: &str) -> Option<Self> {
        key.to_case(Case::Camel).parse().ok()
    }

    /// Helper text displayed next to the field while it is in error.
    pub fn help_text(&self) -> &'static str {
        match self {
            FormField::Name => "* Name must have at least 3 characters",
            FormField::PreparationTime | FormField::Type => "* Required",
            FormField::NoOfSlices | FormField::SlicesOfBread => {
                "* Must be a number greater than 0"
            }
            FormField::Diameter => "* Must be a decimal greater than 0",
            FormField::SpicinessScale => "* Must be a number between 1 and 10",
        }
    }
}

/// Why a single field is in error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FieldError {
    /// A local rule failed; carries the rule's message.
    Invalid(String),
    /// The raw input is not a value of the expected shape.
    Unparsable,
    /// The dishes API rejected the submitted value.
    Rejected,
}

pub type FieldErrors = BTreeMap<FormField, FieldError>;

/// Raw values of every control on the dish form.
///
/// Values of fields belonging to a non-selected dish type are kept but
/// ignored by [`DishForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishForm {
    pub name: String,
    pub preparation_time: String,
    #[serde(rename = "type")]
    pub dish_type: String,
    pub no_of_slices: String,
    pub diameter: String,
    pub spiciness_scale: String,
    pub slices_of_bread: String,
}

impl Default for DishForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            preparation_time: START_OF_DAY.to_string(),
            dish_type: String::new(),
            no_of_slices: String::new(),
            diameter: String::new(),
            spiciness_scale: String::new(),
            slices_of_bread: String::new(),
        }
    }
}

impl DishForm {
    /// Store the raw value of one field.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::PreparationTime => &self.preparation_time,
            FormField::Type => &self.dish_type,
            FormField::NoOfSlices => &self.no_of_slices,
            FormField::Diameter => &self.diameter,
            FormField::SpicinessScale => &self.spiciness_scale,
            FormField::SlicesOfBread => &self.slices_of_bread,
        }
    }

    /// Check every rule that applies to the selected dish type.
    ///
    /// All failing fields are reported together.
    pub fn validate(&self) -> Result<DishRecord, FieldErrors> {
        validation::validate_form(self)
    }

    /// Restore the defaults of a freshly mounted form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Field values keyed by their camelCase names.
    pub fn values(&self) -> BTreeMap<String, String> {
        FormField::iter()
            .map(|field| (field.to_string(), self.field(field).to_string()))
            .collect()
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::PreparationTime => &mut self.preparation_time,
            FormField::Type => &mut self.dish_type,
            FormField::NoOfSlices => &mut self.no_of_slices,
            FormField::Diameter => &mut self.diameter,
            FormField::SpicinessScale => &mut self.spiciness_scale,
            FormField::SlicesOfBread => &mut self.slices_of_bread,
        }
    }
}
