use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;
use tera::{Context, Tera};

use crate::models::dish::DishType;
use crate::services::form_session::{Banner, FormSession};

const DISH_FORM_TEMPLATE: &str = "dish_form.html";

/// Compile the page templates embedded in the binary.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        DISH_FORM_TEMPLATE,
        include_str!("../../templates/dish_form.html"),
    )?;
    Ok(tera)
}

#[derive(Serialize)]
struct DishTypeOption {
    value: String,
    label: String,
}

#[derive(Serialize)]
struct DishFormPage {
    values: BTreeMap<String, String>,
    /// Helper text keyed by the camelCase name of each field in error.
    errors: BTreeMap<String, &'static str>,
    dish_types: Vec<DishTypeOption>,
    banner: Option<Banner>,
    busy: bool,
}

/// Render the dish form for the session's current state.
pub fn render_dish_form(tera: &Tera, session: &FormSession) -> Result<String, tera::Error> {
    let page = DishFormPage {
        values: session.form().values(),
        errors: session
            .errors()
            .keys()
            .map(|field| (field.to_string(), field.help_text()))
            .collect(),
        dish_types: DishType::iter()
            .map(|dish_type| {
                let value = dish_type.to_string();
                let mut label = value.clone();
                label[..1].make_ascii_uppercase();
                DishTypeOption { value, label }
            })
            .collect(),
        banner: session.banner(),
        busy: session.is_busy(),
    };

    tera.render(DISH_FORM_TEMPLATE, &Context::from_serialize(&page)?)
}
