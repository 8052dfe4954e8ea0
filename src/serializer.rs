//! Record to JSON mapping conversion.
//!
//! Every entity row has an explicit column table (name and accessor, in
//! schema order). Loaded records add relationship expansion on top of their
//! row through the `Has*` capability traits. Nested `pizza` and `restaurant`
//! values go through [`leaf_document`], which only sees row columns, so the
//! output is never more than one level deep below the top-level call.

use serde_json::{Map, Value};

use crate::models::{
    Pizza, PizzaDetail, Restaurant, RestaurantDetail, RestaurantPizza, RestaurantPizzaDetail,
};

pub type Document = Map<String, Value>;

pub const RESTAURANT_PIZZAS: &str = "restaurant_pizzas";
pub const PIZZA: &str = "pizza";
pub const RESTAURANT: &str = "restaurant";

const PIZZA_LEAF_FIELDS: &[&str] = &["id", "name", "ingredients"];
const RESTAURANT_LEAF_FIELDS: &[&str] = &["id", "name", "address"];

/// Allow-list (`only`) and deny-list (`exclude`) applied to every key,
/// scalar columns and relationships alike.
///
/// `None` means no restriction. An empty allow-list admits nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldFilter<'a> {
    only: Option<&'a [&'a str]>,
    exclude: Option<&'a [&'a str]>,
}

impl<'a> FieldFilter<'a> {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only(fields: &'a [&'a str]) -> Self {
        Self {
            only: Some(fields),
            exclude: None,
        }
    }

    pub fn exclude(fields: &'a [&'a str]) -> Self {
        Self {
            only: None,
            exclude: Some(fields),
        }
    }

    pub fn and_exclude(self, fields: &'a [&'a str]) -> Self {
        Self {
            exclude: Some(fields),
            ..self
        }
    }

    pub fn admits(&self, field: &str) -> bool {
        if let Some(only) = self.only {
            if !only.contains(&field) {
                return false;
            }
        }
        match self.exclude {
            Some(exclude) => !exclude.contains(&field),
            None => true,
        }
    }
}

/// One scalar column of a row type.
pub struct Column<T> {
    pub name: &'static str,
    pub value: fn(&T) -> Value,
}

/// A row type with a fixed column table.
pub trait Columns: Sized + 'static {
    const COLUMNS: &'static [Column<Self>];
}

/// Anything that can be serialized: a row, or a row plus loaded relationships.
pub trait Record {
    type Row: Columns;

    fn row(&self) -> &Self::Row;

    /// Adds relationship keys after the columns. Rows have none.
    fn expand(&self, _filter: &FieldFilter<'_>, _document: &mut Document) {}
}

pub trait HasRestaurantPizzas {
    fn restaurant_pizzas(&self) -> &[RestaurantPizzaDetail];
}

pub trait HasPizza {
    fn pizza(&self) -> &Pizza;
}

pub trait HasRestaurant {
    fn restaurant(&self) -> &Restaurant;
}

/// Serializes `record` into a mapping of field name to value.
pub fn to_document<R: Record>(record: &R, filter: &FieldFilter<'_>) -> Document {
    let mut document = columns(record.row(), filter);
    record.expand(filter, &mut document);
    document
}

/// Serializes only the named columns of a row. Never expands relationships.
pub fn leaf_document<T: Columns>(row: &T, fields: &[&str]) -> Document {
    columns(row, &FieldFilter::only(fields))
}

fn columns<T: Columns>(row: &T, filter: &FieldFilter<'_>) -> Document {
    T::COLUMNS
        .iter()
        .filter(|column| filter.admits(column.name))
        .map(|column| (column.name.to_string(), (column.value)(row)))
        .collect()
}

fn expand_restaurant_pizzas<R: HasRestaurantPizzas>(
    record: &R,
    filter: &FieldFilter<'_>,
    document: &mut Document,
) {
    if !filter.admits(RESTAURANT_PIZZAS) {
        return;
    }
    let nested = record
        .restaurant_pizzas()
        .iter()
        .map(|rp| Value::Object(to_document(rp, &FieldFilter::all())))
        .collect();
    document.insert(RESTAURANT_PIZZAS.to_string(), Value::Array(nested));
}

fn expand_pizza<R: HasPizza>(record: &R, filter: &FieldFilter<'_>, document: &mut Document) {
    if filter.admits(PIZZA) {
        let nested = leaf_document(record.pizza(), PIZZA_LEAF_FIELDS);
        document.insert(PIZZA.to_string(), Value::Object(nested));
    }
}

fn expand_restaurant<R: HasRestaurant>(
    record: &R,
    filter: &FieldFilter<'_>,
    document: &mut Document,
) {
    if filter.admits(RESTAURANT) {
        let nested = leaf_document(record.restaurant(), RESTAURANT_LEAF_FIELDS);
        document.insert(RESTAURANT.to_string(), Value::Object(nested));
    }
}

impl Columns for Restaurant {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            name: "id",
            value: |r: &Restaurant| Value::from(r.id),
        },
        Column {
            name: "name",
            value: |r: &Restaurant| Value::from(r.name.as_str()),
        },
        Column {
            name: "address",
            value: |r: &Restaurant| Value::from(r.address.as_str()),
        },
    ];
}

impl Columns for Pizza {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            name: "id",
            value: |p: &Pizza| Value::from(p.id),
        },
        Column {
            name: "name",
            value: |p: &Pizza| Value::from(p.name.as_str()),
        },
        Column {
            name: "ingredients",
            value: |p: &Pizza| Value::from(p.ingredients.as_str()),
        },
    ];
}

impl Columns for RestaurantPizza {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            name: "id",
            value: |rp: &RestaurantPizza| Value::from(rp.id),
        },
        Column {
            name: "price",
            value: |rp: &RestaurantPizza| Value::from(rp.price),
        },
        Column {
            name: "restaurant_id",
            value: |rp: &RestaurantPizza| Value::from(rp.restaurant_id),
        },
        Column {
            name: "pizza_id",
            value: |rp: &RestaurantPizza| Value::from(rp.pizza_id),
        },
    ];
}

impl Record for Restaurant {
    type Row = Self;

    fn row(&self) -> &Self {
        self
    }
}

impl Record for Pizza {
    type Row = Self;

    fn row(&self) -> &Self {
        self
    }
}

impl Record for RestaurantPizza {
    type Row = Self;

    fn row(&self) -> &Self {
        self
    }
}

impl HasRestaurantPizzas for RestaurantDetail {
    fn restaurant_pizzas(&self) -> &[RestaurantPizzaDetail] {
        &self.restaurant_pizzas
    }
}

impl Record for RestaurantDetail {
    type Row = Restaurant;

    fn row(&self) -> &Restaurant {
        &self.restaurant
    }

    fn expand(&self, filter: &FieldFilter<'_>, document: &mut Document) {
        expand_restaurant_pizzas(self, filter, document);
    }
}

impl HasRestaurantPizzas for PizzaDetail {
    fn restaurant_pizzas(&self) -> &[RestaurantPizzaDetail] {
        &self.restaurant_pizzas
    }
}

impl Record for PizzaDetail {
    type Row = Pizza;

    fn row(&self) -> &Pizza {
        &self.pizza
    }

    fn expand(&self, filter: &FieldFilter<'_>, document: &mut Document) {
        expand_restaurant_pizzas(self, filter, document);
    }
}

impl HasPizza for RestaurantPizzaDetail {
    fn pizza(&self) -> &Pizza {
        &self.pizza
    }
}

impl HasRestaurant for RestaurantPizzaDetail {
    fn restaurant(&self) -> &Restaurant {
        &self.restaurant
    }
}

// no HasRestaurantPizzas here: nested associations stop at their two leaves
impl Record for RestaurantPizzaDetail {
    type Row = RestaurantPizza;

    fn row(&self) -> &RestaurantPizza {
        &self.restaurant_pizza
    }

    fn expand(&self, filter: &FieldFilter<'_>, document: &mut Document) {
        expand_pizza(self, filter, document);
        expand_restaurant(self, filter, document);
    }
}
