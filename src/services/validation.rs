use chrono::NaiveTime;
use garde::Validate;

use crate::models::dish::{Diameter, DishDetails, DishRecord, DishType};
use crate::models::form::{DishForm, FieldError, FieldErrors, FormField};

/// Largest count or diameter (in hundredths) the dishes API record can carry.
const MAX_WIRE_VALUE: i64 = u32::MAX as i64;

/// Fields every dish needs regardless of its type.
#[derive(Debug, Validate)]
struct CommonInput {
    #[garde(required, length(chars, min = 3))]
    name: Option<String>,

    #[garde(required)]
    preparation_time: Option<NaiveTime>,

    #[garde(required)]
    dish_type: Option<DishType>,
}

// Numeric inputs are parsed wide so that out-of-range values reach the
// garde range rules instead of failing to parse.
#[derive(Debug, Validate)]
struct PizzaInput {
    #[garde(required, range(min = 1, max = MAX_WIRE_VALUE))]
    no_of_slices: Option<i64>,

    /// Hundredths of the entered diameter.
    #[garde(required, range(min = 1, max = MAX_WIRE_VALUE))]
    diameter: Option<i64>,
}

#[derive(Debug, Validate)]
struct SoupInput {
    #[garde(required, range(min = 1, max = 10))]
    spiciness_scale: Option<i64>,
}

#[derive(Debug, Validate)]
struct SandwichInput {
    #[garde(required, range(min = 1, max = MAX_WIRE_VALUE))]
    slices_of_bread: Option<i64>,
}

/// Validate the raw form values and build a [`DishRecord`].
///
/// Performs:
/// - Parsing of the time and numeric inputs (empty input counts as missing)
/// - The common rules: name of at least 3 characters, time and type present
/// - The rules of the selected dish type only; other types' inputs are ignored
///
/// Every failing field is reported; the first problem found for a field wins.
pub fn validate_form(form: &DishForm) -> Result<DishRecord, FieldErrors> {
    let mut errors = FieldErrors::new();

    let common = CommonInput {
        name: (!form.name.is_empty()).then(|| form.name.clone()),
        preparation_time: parse_input(
            FormField::PreparationTime,
            &form.preparation_time,
            parse_time,
            &mut errors,
        ),
        dish_type: parse_input(
            FormField::Type,
            &form.dish_type,
            |raw| raw.parse().ok(),
            &mut errors,
        ),
    };
    record_report(common.validate(), &mut errors);

    let details = match common.dish_type {
        Some(DishType::Pizza) => validate_pizza(form, &mut errors),
        Some(DishType::Soup) => validate_soup(form, &mut errors),
        Some(DishType::Sandwich) => validate_sandwich(form, &mut errors),
        None => None,
    };

    match (common.name, common.preparation_time, details) {
        (Some(name), Some(preparation_time), Some(details)) if errors.is_empty() => {
            Ok(DishRecord {
                name,
                preparation_time,
                details,
            })
        }
        _ => Err(errors),
    }
}

fn validate_pizza(form: &DishForm, errors: &mut FieldErrors) -> Option<DishDetails> {
    let input = PizzaInput {
        no_of_slices: parse_input(
            FormField::NoOfSlices,
            &form.no_of_slices,
            |raw| raw.parse().ok(),
            errors,
        ),
        diameter: parse_input(FormField::Diameter, &form.diameter, parse_diameter, errors),
    };
    let passed = record_report(input.validate(), errors);

    match (input.no_of_slices, input.diameter) {
        (Some(no_of_slices), Some(diameter)) if passed => Some(DishDetails::Pizza {
            no_of_slices: u32::try_from(no_of_slices).ok()?,
            diameter: Diameter::from_hundredths(u32::try_from(diameter).ok()?),
        }),
        _ => None,
    }
}

fn validate_soup(form: &DishForm, errors: &mut FieldErrors) -> Option<DishDetails> {
    let input = SoupInput {
        spiciness_scale: parse_input(
            FormField::SpicinessScale,
            &form.spiciness_scale,
            |raw| raw.parse().ok(),
            errors,
        ),
    };
    let passed = record_report(input.validate(), errors);

    input
        .spiciness_scale
        .filter(|_| passed)
        .and_then(|scale| u8::try_from(scale).ok())
        .map(|spiciness_scale| DishDetails::Soup { spiciness_scale })
}

fn validate_sandwich(form: &DishForm, errors: &mut FieldErrors) -> Option<DishDetails> {
    let input = SandwichInput {
        slices_of_bread: parse_input(
            FormField::SlicesOfBread,
            &form.slices_of_bread,
            |raw| raw.parse().ok(),
            errors,
        ),
    };
    let passed = record_report(input.validate(), errors);

    input
        .slices_of_bread
        .filter(|_| passed)
        .and_then(|slices| u32::try_from(slices).ok())
        .map(|slices_of_bread| DishDetails::Sandwich { slices_of_bread })
}

/// Parse one raw input. Blank input is `None` and left to the `required`
/// rule; unparsable input is recorded as [`FieldError::Unparsable`].
fn parse_input<T>(
    field: FormField,
    raw: &str,
    parse: impl Fn(&str) -> Option<T>,
    errors: &mut FieldErrors,
) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = parse(raw);
    if parsed.is_none() {
        errors.entry(field).or_insert(FieldError::Unparsable);
    }
    parsed
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Parse a decimal with at most two fractional digits into hundredths.
///
/// Works on the digits directly so large values keep their exact value.
fn parse_diameter(raw: &str) -> Option<i64> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty())
        || fraction.len() > 2
        || !all_digits(whole)
        || !all_digits(fraction)
    {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    let hundredths = whole.checked_mul(100)?.checked_add(fraction)?;
    Some(if negative { -hundredths } else { hundredths })
}

/// Merge a garde report into the field errors. Returns whether validation passed.
fn record_report(result: Result<(), garde::Report>, errors: &mut FieldErrors) -> bool {
    let Err(report) = result else {
        return true;
    };

    for (path, error) in report.iter() {
        let path = path.to_string();
        let field = match path.as_str() {
            "dish_type" => Some(FormField::Type),
            other => FormField::from_wire_key(other),
        };

        match field {
            Some(field) => {
                errors
                    .entry(field)
                    .or_insert_with(|| FieldError::Invalid(error.message().to_string()));
            }
            None => tracing::warn!(path = %path, "Validation error for unknown form path"),
        }
    }
    false
}
