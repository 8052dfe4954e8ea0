use serde::Deserialize;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[table_name = "restaurants"]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[table_name = "pizzas"]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String, //freeform description
}

/// A pizza offered at a restaurant for a price.
///
/// The referenced restaurant and pizza are fixed once the row exists; only
/// `price` may change, and it must stay within
/// [`MIN_PRICE`](crate::validation::MIN_PRICE)..=[`MAX_PRICE`](crate::validation::MAX_PRICE).
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Identifiable, Associations)]
#[table_name = "restaurant_pizzas"]
#[belongs_to(Restaurant)]
#[belongs_to(Pizza)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32, //foreign key
    pub pizza_id: i32,      //foreign key
}

#[derive(Debug, Clone, Insertable, Deserialize)]
#[table_name = "restaurants"]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Insertable, Deserialize)]
#[table_name = "pizzas"]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

#[derive(Debug, Clone, Insertable)]
#[table_name = "restaurant_pizzas"]
pub struct NewRestaurantPizza {
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

/// An association loaded together with both rows it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantPizzaDetail {
    pub restaurant_pizza: RestaurantPizza,
    pub restaurant: Restaurant,
    pub pizza: Pizza,
}

/// A restaurant loaded together with its associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub restaurant_pizzas: Vec<RestaurantPizzaDetail>,
}

impl RestaurantDetail {
    /// Pizzas offered here, one per association.
    pub fn pizzas(&self) -> impl Iterator<Item = &Pizza> + '_ {
        self.restaurant_pizzas.iter().map(|rp| &rp.pizza)
    }
}

/// A pizza loaded together with its associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PizzaDetail {
    pub pizza: Pizza,
    pub restaurant_pizzas: Vec<RestaurantPizzaDetail>,
}

impl PizzaDetail {
    /// Restaurants offering this pizza, one per association.
    pub fn restaurants(&self) -> impl Iterator<Item = &Restaurant> + '_ {
        self.restaurant_pizzas.iter().map(|rp| &rp.restaurant)
    }
}
