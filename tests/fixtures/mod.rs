//! Dish form fixtures shared by the integration tests

use serde_json::{json, Value};

/// A filled-in form and the body the dishes API should receive for it.
#[derive(Debug, Clone)]
pub struct DishFixture {
    pub description: &'static str,
    pub fields: &'static [(&'static str, &'static str)],
    pub wire_body: fn() -> Value,
}

pub const PEPPERONI: DishFixture = DishFixture {
    description: "Whole-number pizza diameter",
    fields: &[
        ("name", "Pepperoni"),
        ("preparationTime", "01:30:00"),
        ("type", "pizza"),
        ("noOfSlices", "8"),
        ("diameter", "32"),
        ("spicinessScale", ""),
        ("slicesOfBread", ""),
    ],
    wire_body: || {
        json!({
            "name": "Pepperoni",
            "preparation_time": "1:30:0",
            "type": "pizza",
            "no_of_slices": 8,
            "diameter": 32
        })
    },
};

pub const TOM_YUM: DishFixture = DishFixture {
    description: "Soup with leftover pizza inputs",
    fields: &[
        ("name", "Tom Yum"),
        ("preparationTime", "00:45:10"),
        ("type", "soup"),
        ("noOfSlices", "0"),
        ("diameter", "abc"),
        ("spicinessScale", "10"),
    ],
    wire_body: || {
        json!({
            "name": "Tom Yum",
            "preparation_time": "0:45:10",
            "type": "soup",
            "spiciness_scale": 10
        })
    },
};

pub const CLUB: DishFixture = DishFixture {
    description: "Sandwich",
    fields: &[
        ("name", "Club"),
        ("preparationTime", "00:05:00"),
        ("type", "sandwich"),
        ("slicesOfBread", "3"),
    ],
    wire_body: || {
        json!({
            "name": "Club",
            "preparation_time": "0:5:0",
            "type": "sandwich",
            "slices_of_bread": 3
        })
    },
};

pub const VALID_DISHES: &[DishFixture] = &[PEPPERONI, TOM_YUM, CLUB];

/// Pizza with a two-letter name; never valid.
pub const SHORT_NAME_PIZZA: &[(&str, &str)] = &[
    ("name", "ab"),
    ("preparationTime", "01:30:00"),
    ("type", "pizza"),
    ("noOfSlices", "8"),
    ("diameter", "30.5"),
];
